//! Text rendering for `enum`, numeric range and `pattern` constraints.

use serde_json::Number;

use crate::model::SchemaNode;

use super::escape::code_span;

/// Pattern shown when a schema declares none.
pub const DEFAULT_PATTERN: &str = ".*";

/// Join each `enum` value, as a code-quoted JSON literal, with `|`.
///
/// An absent or empty `enum` yields an empty string.
pub fn format_enum(node: &SchemaNode) -> String {
    node.variants
        .iter()
        .flatten()
        .map(|value| code_span(&value.to_string()))
        .collect::<Vec<_>>()
        .join("|")
}

/// Render the inclusive range allowed by the numeric bound keywords.
///
/// `exclusiveMinimum` / `exclusiveMaximum` are only consulted when the
/// inclusive keyword is absent, and are shifted by one to make them inclusive.
/// The shift assumes an integer domain and is applied regardless of `type`.
/// Without both a lower and an upper bound the range is `Unrestricted`.
pub fn format_range(node: &SchemaNode) -> String {
    let lower = node
        .minimum
        .clone()
        .or_else(|| node.exclusive_minimum.as_ref().and_then(|n| shift(n, 1)));
    let upper = node
        .maximum
        .clone()
        .or_else(|| node.exclusive_maximum.as_ref().and_then(|n| shift(n, -1)));

    match (lower, upper) {
        (Some(lower), Some(upper)) => format!("{lower}–{upper}"),
        _ => "Unrestricted".to_string(),
    }
}

fn shift(bound: &Number, delta: i64) -> Option<Number> {
    if let Some(n) = bound.as_i64() {
        return n.checked_add(delta).map(Number::from);
    }
    if let Some(n) = bound.as_u64() {
        return n.checked_add_signed(delta).map(Number::from);
    }
    bound.as_f64().and_then(|n| Number::from_f64(n + delta as f64))
}

/// Render the `pattern` keyword as a regex literal, e.g. `` `/^[a-z]+$/` ``.
pub fn format_pattern(node: &SchemaNode) -> String {
    let pattern = node.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
    code_span(&format!("/{pattern}/"))
}
