//! Linked type labels such as "Array of String".

use crate::model::{Items, SchemaNode};

use super::escape::code_span;
use super::slugify::slugify;

/// Render a schema's `type` as a label linked to its glossary entry.
///
/// Array item types are appended recursively: a titled item schema is named by
/// its title (bold, unlinked), otherwise its own type label is used. Only the
/// first entry of a tuple-form `items` is considered.
///
/// Returns `None` when the schema has no `type`.
///
/// # Examples
///
/// ```
/// use protodoc::markdown::format_type;
/// use protodoc::model::SchemaNode;
///
/// let node: SchemaNode = serde_json::from_str(
///     r#"{"type": "array", "items": {"type": "string"}}"#,
/// ).unwrap();
/// assert_eq!(
///     format_type(&node).unwrap(),
///     "[**`Array`**](#array) of [**`String`**](#string)",
/// );
/// ```
pub fn format_type(node: &SchemaNode) -> Option<String> {
    let name = node.kind.as_ref()?.display_name();
    let mut label = format!("[**{}**](#{})", code_span(name), slugify(name));

    if let Some(item) = node.items.as_ref().and_then(Items::first) {
        if let Some(title) = &item.title {
            label.push_str(&format!(" of **{}**", code_span(title)));
        } else if let Some(item_label) = format_type(item) {
            label.push_str(" of ");
            label.push_str(&item_label);
        }
    }

    Some(label)
}
