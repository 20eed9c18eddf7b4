//! Pure markdown generation from protocol schemas.
//!
//! This module renders the protocol model to Markdown. The design separates
//! formatting from orchestration:
//!
//! - [`slugify`]: heading anchors shared by headings, TOC links and type labels
//! - [`escape`]: code spans and fenced blocks that survive embedded backticks
//! - [`constraints`]: `enum`, numeric range and `pattern` descriptions
//! - [`types`]: linked type labels such as "Array of String"
//! - [`render`]: streaming field, packet, section and TOC writers
//!
//! The export layer ([`crate::export`]) resolves packet references and
//! assembles the full document around these pieces.
//!
//! ## Anchors
//!
//! Nothing records which anchors exist. A link resolves only because its text
//! and the heading text pass through the same [`slugify`]; packet headings and
//! packet TOC entries both use the code-span form of the title, and type labels
//! use the same display name as the glossary headings in the appendix.

mod constraints;
mod escape;
mod render;
mod slugify;
mod types;

pub use constraints::{DEFAULT_PATTERN, format_enum, format_pattern, format_range};
pub use escape::{calculate_fence_length, calculate_inline_code_ticks, code_span, fenced_block};
pub use render::{
    BODY_PROPERTY, BULLET, NO_BODY_FIELDS, NO_DESCRIPTION, REQUIRED_MARKER, RenderContext,
    UNTITLED, render_packet, render_section,
};
pub use slugify::{slug_link, slugify};
pub use types::format_type;
