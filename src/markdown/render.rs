//! Schema tree → Markdown rendering.
//!
//! [`RenderContext`] streams fields, packets, sections and table-of-contents
//! entries to any [`Write`] sink in document order. Loading and packet
//! resolution happen before rendering; see [`crate::export`].

use std::io::{self, Write};

use log::debug;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::model::{Packet, PacketRef, SchemaNode, Section};

use super::constraints::{format_enum, format_pattern, format_range};
use super::escape::{code_span, fenced_block};
use super::slugify::slug_link;
use super::types::format_type;

/// List bullet used for fields, references and TOC entries.
pub const BULLET: &str = "*";

/// Marker appended to required fields; links to the appendix legend.
pub const REQUIRED_MARKER: &str = "[🔒](#symbols)";

/// Property of a packet whose own properties are listed as packet fields.
pub const BODY_PROPERTY: &str = "body";

/// Paragraph emitted for a `body` with neither properties nor pattern properties.
pub const NO_BODY_FIELDS: &str = "This packet has no body fields.";

/// Title used for packets, sections and subschemas that have none.
pub const UNTITLED: &str = "Untitled";

/// Description used for packets and sections that have none.
pub const NO_DESCRIPTION: &str = "No description";

/// Info string of the fenced blocks holding packet examples.
const EXAMPLE_INFO: &str = "js";

/// Indent unit of example payloads.
const EXAMPLE_INDENT: &[u8] = b"    ";

/// Streaming renderer over a Markdown sink.
pub struct RenderContext<'w, W: Write> {
    out: &'w mut W,
    indent: String,
}

impl<'w, W: Write> RenderContext<'w, W> {
    /// Create a context that indents nested list content by `indent_width` spaces.
    pub fn new(out: &'w mut W, indent_width: usize) -> Self {
        Self {
            out,
            indent: " ".repeat(indent_width),
        }
    }

    /// Write a heading of the given depth.
    pub fn write_heading(&mut self, depth: usize, text: &str) -> Result<()> {
        writeln!(self.out, "{} {}\n", "#".repeat(depth), text)?;
        Ok(())
    }

    /// Write a paragraph at the given list nesting level.
    ///
    /// An empty paragraph writes nothing.
    pub fn write_paragraph(&mut self, level: usize, text: &str) -> Result<()> {
        if !text.is_empty() {
            writeln!(self.out, "{}{}\n", self.indent.repeat(level), text)?;
        }
        Ok(())
    }

    /// Write a single line at the given nesting level, with no trailing blank line.
    pub fn write_raw_line(&mut self, level: usize, text: &str) -> Result<()> {
        writeln!(self.out, "{}{}", self.indent.repeat(level), text)?;
        Ok(())
    }

    /// Terminate a tight list with a blank line.
    pub fn end_list(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    /// Document one named field of `parent`.
    ///
    /// Emits the field bullet, then one level deeper the `enum`, `range` and
    /// `pattern` lines and the description. Item, property and pattern
    /// property schemas that carry a title or description follow as
    /// subschema blocks.
    pub fn write_field(
        &mut self,
        parent: &SchemaNode,
        name: &str,
        schema: &SchemaNode,
        level: usize,
        location: &str,
    ) -> Result<()> {
        let location = child_location(location, name);
        let title = schema.title.as_deref().unwrap_or(name);
        let type_label = type_label(schema, &location)?;
        let marker = if parent.is_required(name) {
            format!(" {REQUIRED_MARKER}")
        } else {
            String::new()
        };

        self.write_paragraph(
            level,
            &format!("{BULLET} {}: {type_label}{marker}", code_span(title)),
        )?;

        let inner = level + 1;
        if schema.variants.is_some() {
            self.write_paragraph(inner, &format!("**`enum`**: {}", format_enum(schema)))?;
        }
        if schema.has_bounds() {
            self.write_paragraph(inner, &format!("**`range`**: {}", format_range(schema)))?;
        }
        if schema.pattern.is_some() {
            self.write_paragraph(inner, &format!("**`pattern`**: {}", format_pattern(schema)))?;
        }
        self.write_paragraph(inner, schema.description.as_deref().unwrap_or_default())?;

        if let Some(items) = &schema.items {
            let items_location = child_location(&location, "items");
            for item in items.as_slice() {
                self.write_nested(item, inner, &items_location)?;
            }
        }
        for (key, property) in schema.properties.iter() {
            self.write_nested(property, inner, &child_location(&location, key))?;
        }
        for (key, property) in schema.pattern_properties.iter() {
            self.write_nested(property, inner, &child_location(&location, key))?;
        }

        Ok(())
    }

    fn write_nested(&mut self, schema: &SchemaNode, level: usize, location: &str) -> Result<()> {
        if schema.is_documented() {
            self.write_subschema(schema, level, location)?;
        }
        Ok(())
    }

    /// Document a nested schema as a type: header, description, then its
    /// `properties` as fields. Its own items and pattern properties are not
    /// descended into.
    pub fn write_subschema(
        &mut self,
        schema: &SchemaNode,
        level: usize,
        location: &str,
    ) -> Result<()> {
        let title = schema.title.as_deref().unwrap_or(UNTITLED);
        let type_label = type_label(schema, location)?;

        self.write_paragraph(
            level,
            &format!("{BULLET} **{}** ({type_label})", code_span(title)),
        )?;

        let inner = level + 1;
        self.write_paragraph(inner, schema.description.as_deref().unwrap_or_default())?;

        for (name, property) in schema.properties.iter() {
            self.write_field(schema, name, property, inner, location)?;
        }

        Ok(())
    }

    /// Document a packet: heading, description, examples and fields.
    ///
    /// The fields of a `body` property are listed as if they were fields of
    /// the packet itself.
    pub fn write_packet(&mut self, packet: &Packet, depth: usize) -> Result<()> {
        let title = packet.title.as_deref().unwrap_or(UNTITLED);
        debug!("rendering packet {title}");

        self.write_heading(depth, &code_span(title))?;
        self.write_paragraph(0, packet.description.as_deref().unwrap_or(NO_DESCRIPTION))?;

        for example in &packet.examples {
            let text = pretty_json(example)?;
            writeln!(self.out, "{}", fenced_block(&text, EXAMPLE_INFO))?;
        }

        for (name, schema) in packet.properties.iter() {
            if schema.is_documented() {
                self.write_field(packet, name, schema, 0, title)?;
            }

            if name == BODY_PROPERTY {
                if schema.properties.is_empty() && schema.pattern_properties.is_empty() {
                    self.write_paragraph(0, NO_BODY_FIELDS)?;
                    continue;
                }

                let body_location = child_location(title, name);
                let fields = schema.properties.iter().chain(schema.pattern_properties.iter());
                for (field, field_schema) in fields {
                    self.write_field(schema, field, field_schema, 0, &body_location)?;
                }
            }
        }

        Ok(())
    }

    /// Document a section: heading, description, references, then any nested
    /// sections one heading level deeper, then the section's own packets.
    ///
    /// Every packet must already be loaded.
    pub fn write_section(&mut self, section: &Section, depth: usize) -> Result<()> {
        let title = section.title.as_deref().unwrap_or(UNTITLED);
        debug!("rendering section {title}");

        self.write_heading(depth, title)?;
        self.write_paragraph(0, section.description.as_deref().unwrap_or(NO_DESCRIPTION))?;

        if let Some(references) = &section.references {
            self.write_heading(depth + 1, "References")?;
            for uri in references {
                self.write_raw_line(0, &format!("{BULLET} <{uri}>"))?;
            }
            self.end_list()?;
        }

        for subsection in &section.sections {
            self.write_section(subsection, depth + 1)?;
        }

        if let Some(packets) = &section.packets {
            self.write_heading(depth + 1, "Packets")?;
            for packet in packets {
                let packet = loaded(packet, title)?;
                self.write_packet(packet, depth + 2)?;
            }
        }

        Ok(())
    }

    /// Write the table-of-contents outline for a section.
    ///
    /// Nested sections come first, then the section's packets, in the same
    /// order `write_section` emits them.
    pub fn write_toc(&mut self, section: &Section, level: usize) -> Result<()> {
        let title = section.title.as_deref().unwrap_or(UNTITLED);
        self.write_toc_entry(title, false, level)?;

        for subsection in &section.sections {
            self.write_toc(subsection, level + 1)?;
        }

        for packet in section.packets.iter().flatten() {
            let packet = loaded(packet, title)?;
            self.write_toc_entry(packet.title.as_deref().unwrap_or(UNTITLED), true, level + 1)?;
        }

        Ok(())
    }

    /// Write one linked TOC bullet. Packet titles are linked as code spans,
    /// the same text their headings use.
    pub fn write_toc_entry(&mut self, title: &str, is_packet: bool, level: usize) -> Result<()> {
        let text = if is_packet {
            code_span(title)
        } else {
            title.to_string()
        };
        self.write_raw_line(level, &format!("{BULLET} {}", slug_link(&text)))
    }
}

fn child_location(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn type_label(schema: &SchemaNode, location: &str) -> Result<String> {
    format_type(schema).ok_or_else(|| Error::Schema {
        location: location.to_string(),
        key: "type",
    })
}

fn loaded<'a>(packet: &'a PacketRef, section: &str) -> Result<&'a Packet> {
    match packet {
        PacketRef::Loaded(packet) => Ok(packet.as_ref()),
        PacketRef::Id(id) => Err(Error::UnresolvedPacket {
            location: section.to_string(),
            id: id.clone(),
        }),
    }
}

/// Pretty-print an example payload with 4-space indentation, keeping key order.
fn pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(EXAMPLE_INDENT));
    value.serialize(&mut serializer).map_err(io::Error::from)?;
    Ok(String::from_utf8(buf)?)
}

/// Render a single packet to a string.
pub fn render_packet(packet: &Packet, depth: usize, indent_width: usize) -> Result<String> {
    let mut buf = Vec::new();
    RenderContext::new(&mut buf, indent_width).write_packet(packet, depth)?;
    Ok(String::from_utf8(buf)?)
}

/// Render a section (and its nested sections) to a string.
pub fn render_section(section: &Section, depth: usize, indent_width: usize) -> Result<String> {
    let mut buf = Vec::new();
    RenderContext::new(&mut buf, indent_width).write_section(section, depth)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: &str) -> SchemaNode {
        serde_json::from_str(json).unwrap()
    }

    fn render_field(parent: &SchemaNode, name: &str) -> String {
        let mut buf = Vec::new();
        let field = parent.properties.get(name).unwrap();
        RenderContext::new(&mut buf, 4)
            .write_field(parent, name, field, 0, "test")
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_required_marker() {
        let parent = schema(
            r#"{
                "required": ["a"],
                "properties": {
                    "a": {"type": "string"},
                    "b": {"type": "string"}
                }
            }"#,
        );
        assert!(render_field(&parent, "a").contains(REQUIRED_MARKER));
        assert!(!render_field(&parent, "b").contains(REQUIRED_MARKER));
    }

    #[test]
    fn test_field_line_order() {
        let parent = schema(
            r#"{"properties": {"level": {
                "type": "number",
                "title": "Level",
                "description": "Charge level",
                "enum": [1, 2],
                "minimum": 0,
                "maximum": 100,
                "pattern": "[0-9]+"
            }}}"#,
        );
        assert_eq!(
            render_field(&parent, "level"),
            "* `Level`: [**`Number`**](#number)\n\n\
             \x20   **`enum`**: `1`|`2`\n\n\
             \x20   **`range`**: 0–100\n\n\
             \x20   **`pattern`**: `/[0-9]+/`\n\n\
             \x20   Charge level\n\n"
        );
    }

    #[test]
    fn test_title_defaults_to_name() {
        let parent = schema(r#"{"properties": {"isCharging": {"type": "boolean"}}}"#);
        assert_eq!(
            render_field(&parent, "isCharging"),
            "* `isCharging`: [**`Boolean`**](#boolean)\n\n"
        );
    }

    #[test]
    fn test_range_line_for_single_bound() {
        let parent = schema(r#"{"properties": {"n": {"type": "number", "minimum": 0}}}"#);
        assert!(render_field(&parent, "n").contains("**`range`**: Unrestricted"));
    }

    #[test]
    fn test_missing_type_is_schema_error() {
        let parent = schema(r#"{"properties": {"n": {"description": "untyped"}}}"#);
        let mut buf = Vec::new();
        let err = RenderContext::new(&mut buf, 4)
            .write_field(&parent, "n", parent.properties.get("n").unwrap(), 0, "pkt")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema { ref location, key: "type" } if location == "pkt.n"
        ));
    }

    #[test]
    fn test_subschemas_of_items_and_properties() {
        let parent = schema(
            r#"{"properties": {"actions": {
                "type": "array",
                "description": "Buttons",
                "items": {
                    "type": "object",
                    "title": "Action",
                    "description": "A button",
                    "required": ["id"],
                    "properties": {
                        "id": {"type": "string", "description": "Identifier"},
                        "extra": {
                            "type": "array",
                            "items": {"type": "string", "title": "Hidden"}
                        }
                    }
                }
            }}}"#,
        );
        assert_eq!(
            render_field(&parent, "actions"),
            "* `actions`: [**`Array`**](#array) of **`Action`**\n\n\
             \x20   Buttons\n\n\
             \x20   * **`Action`** ([**`Object`**](#object))\n\n\
             \x20       A button\n\n\
             \x20       * `id`: [**`String`**](#string) [🔒](#symbols)\n\n\
             \x20           Identifier\n\n\
             \x20       * `extra`: [**`Array`**](#array) of **`Hidden`**\n\n\
             \x20           * **`Hidden`** ([**`String`**](#string))\n\n"
        );
    }

    #[test]
    fn test_tuple_items_render_every_subschema() {
        let parent = schema(
            r#"{"properties": {"pair": {
                "type": "array",
                "items": [
                    {"type": "string", "title": "First"},
                    {"type": "number", "description": "second"}
                ]
            }}}"#,
        );
        assert_eq!(
            render_field(&parent, "pair"),
            "* `pair`: [**`Array`**](#array) of **`First`**\n\n\
             \x20   * **`First`** ([**`String`**](#string))\n\n\
             \x20   * **`Untitled`** ([**`Number`**](#number))\n\n\
             \x20       second\n\n"
        );
    }

    #[test]
    fn test_subschema_skips_own_pattern_properties() {
        let parent = schema(
            r#"{"properties": {"map": {
                "type": "object",
                "patternProperties": {
                    "^.*$": {
                        "type": "object",
                        "title": "Entry",
                        "patternProperties": {
                            "^x$": {"type": "string", "description": "never shown"}
                        }
                    }
                }
            }}}"#,
        );
        let out = render_field(&parent, "map");
        assert!(out.contains("* **`Entry`** ([**`Object`**](#object))"));
        assert!(!out.contains("never shown"));
    }

    #[test]
    fn test_packet_examples_and_body() {
        let packet = schema(
            r#"{
                "title": "kdeconnect.ping",
                "description": "Send a ping",
                "examples": [{"id": 0, "type": "kdeconnect.ping", "body": {}}],
                "properties": {
                    "id": {"type": "number", "description": "Timestamp"},
                    "type": {"type": "string"},
                    "body": {
                        "type": "object",
                        "required": ["message"],
                        "properties": {
                            "message": {"type": "string", "description": "Text"}
                        }
                    }
                }
            }"#,
        );
        let out = render_packet(&packet, 4, 4).unwrap();
        assert_eq!(
            out,
            "#### `kdeconnect.ping`\n\n\
             Send a ping\n\n\
             ```js\n\
             {\n    \"id\": 0,\n    \"type\": \"kdeconnect.ping\",\n    \"body\": {}\n}\n\
             ```\n\n\
             * `id`: [**`Number`**](#number)\n\n\
             \x20   Timestamp\n\n\
             * `message`: [**`String`**](#string) [🔒](#symbols)\n\n\
             \x20   Text\n\n"
        );
    }

    #[test]
    fn test_packet_without_body_fields() {
        let packet = schema(
            r#"{"title": "p", "properties": {"body": {"type": "object", "properties": {}}}}"#,
        );
        let out = render_packet(&packet, 4, 4).unwrap();
        assert!(out.ends_with(&format!("{NO_BODY_FIELDS}\n\n")));
    }

    #[test]
    fn test_body_pattern_properties_are_flattened() {
        let packet = schema(
            r#"{"title": "p", "properties": {"body": {
                "type": "object",
                "patternProperties": {"^[0-9]+$": {"type": "string", "title": "Slot"}}
            }}}"#,
        );
        let out = render_packet(&packet, 4, 4).unwrap();
        assert!(out.contains("* `Slot`: [**`String`**](#string)"));
        assert!(!out.contains(NO_BODY_FIELDS));
    }

    #[test]
    fn test_documented_body_renders_twice() {
        let packet = schema(
            r#"{"title": "p", "properties": {"body": {
                "type": "object",
                "description": "Payload",
                "properties": {"x": {"type": "boolean"}}
            }}}"#,
        );
        let out = render_packet(&packet, 4, 4).unwrap();
        let body_line = out.find("* `body`: [**`Object`**](#object)").unwrap();
        let x_line = out.find("* `x`: [**`Boolean`**](#boolean)").unwrap();
        assert!(body_line < x_line);
        assert!(out.contains("    Payload\n\n"));
    }

    #[test]
    fn test_packet_defaults() {
        let out = render_packet(&SchemaNode::default(), 2, 4).unwrap();
        assert_eq!(out, "## `Untitled`\n\nNo description\n\n");
    }

    #[test]
    fn test_section_layout() {
        let packet = SchemaNode::default()
            .with_title("a.b")
            .with_description("d");
        let mut section = Section::new("Core")
            .with_description("Core packets")
            .with_packet(packet)
            .with_section(Section::new("Extras").with_description("More"));
        section.references = Some(vec!["https://example.com/spec".to_string()]);

        assert_eq!(
            render_section(&section, 2, 4).unwrap(),
            "## Core\n\n\
             Core packets\n\n\
             ### References\n\n\
             * <https://example.com/spec>\n\n\
             ### Extras\n\n\
             More\n\n\
             ### Packets\n\n\
             #### `a.b`\n\n\
             d\n\n"
        );
    }

    #[test]
    fn test_section_body_follows_toc_order() {
        let section = Section::new("Outer")
            .with_packet(SchemaNode::default().with_title("a.b"))
            .with_section(Section::new("Inner"));

        let mut buf = Vec::new();
        RenderContext::new(&mut buf, 4).write_toc(&section, 0).unwrap();
        let toc = String::from_utf8(buf).unwrap();
        let body = render_section(&section, 2, 4).unwrap();

        assert!(toc.find("[Inner]").unwrap() < toc.find("[`a.b`]").unwrap());
        assert!(body.find("### Inner").unwrap() < body.find("#### `a.b`").unwrap());
    }

    #[test]
    fn test_section_with_unresolved_packet() {
        let section = Section::new("Core").with_packet(PacketRef::Id("core.pair".to_string()));
        let err = render_section(&section, 2, 4).unwrap_err();
        assert!(matches!(err, Error::UnresolvedPacket { ref id, .. } if id == "core.pair"));
    }

    #[test]
    fn test_toc_outline() {
        let section = Section::new("Core")
            .with_section(Section::new("Sub Section"))
            .with_packet(SchemaNode::default().with_title("core.identity"));
        let mut buf = Vec::new();
        RenderContext::new(&mut buf, 4).write_toc(&section, 0).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "* [Core](#core)\n\
             \x20   * [Sub Section](#sub-section)\n\
             \x20   * [`core.identity`](#coreidentity)\n"
        );
    }
}
