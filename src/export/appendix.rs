//! The fixed appendix closing every protocol document.
//!
//! The glossary headings are rendered from [`SchemaType::display_name`], the
//! same text type labels link to, so every type link has a target.

use std::io::Write;

use crate::error::Result;
use crate::markdown::{BULLET, RenderContext, code_span};
use crate::model::SchemaType;

/// Glossary entries, one per documented JSON Schema type.
const DATA_TYPES: [(SchemaType, &str); 5] = [
    (
        SchemaType::Boolean,
        "A logical data type that can have only the values `true` or `false`.",
    ),
    (
        SchemaType::Number,
        "A numeric data type in the double-precision 64-bit floating point format\n(IEEE 754).",
    ),
    (
        SchemaType::String,
        "A null-terminated sequence of UTF-8 encoded bytes.",
    ),
    (SchemaType::Array, "An ordered collection of values."),
    (SchemaType::Object, "A mapping collection of string keys to values."),
];

const DATA_TYPES_INTRO: &str = "These are the basic data types in the protocol, as described by the\n\
JSON Schema specification. Note that the `integer` type defined in some versions\n\
of JSON Schema is never used.";

const REQUIRED_LEGEND: &str = "Packets missing these fields may be ignored or result in undefined\nbehaviour.";

const REFERENCES: [&str; 2] = [
    "https://json-schema.org",
    "https://datatracker.ietf.org/doc/html/draft-fge-json-schema-validation-00",
];

/// Write the appendix entries of the table of contents.
pub fn write_appendix_toc<W: Write>(ctx: &mut RenderContext<'_, W>) -> Result<()> {
    ctx.write_toc_entry("Appendix", false, 0)?;
    ctx.write_toc_entry("Symbols", false, 1)?;
    ctx.write_toc_entry("Data Types", false, 1)?;
    Ok(())
}

/// Write the appendix body: data type glossary, symbol legend, references.
pub fn write_appendix<W: Write>(ctx: &mut RenderContext<'_, W>) -> Result<()> {
    ctx.write_heading(2, "Appendix")?;

    ctx.write_heading(3, "Data Types")?;
    ctx.write_paragraph(0, DATA_TYPES_INTRO)?;
    for (kind, description) in &DATA_TYPES {
        ctx.write_heading(4, &code_span(kind.display_name()))?;
        ctx.write_paragraph(0, description)?;
    }

    ctx.write_heading(3, "Symbols")?;
    ctx.write_paragraph(0, &format!("{BULLET} 🔒 **Required**"))?;
    for line in REQUIRED_LEGEND.lines() {
        // Each line of the legend continues the list item's paragraph.
        ctx.write_raw_line(1, line)?;
    }
    ctx.end_list()?;

    ctx.write_heading(3, "References")?;
    for uri in REFERENCES {
        ctx.write_raw_line(0, &format!("{BULLET} <{uri}>"))?;
    }
    ctx.end_list()?;

    Ok(())
}
