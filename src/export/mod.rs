//! Document assembly: from a loaded protocol tree to one Markdown document.
//!
//! # Architecture
//!
//! Generation is two steps:
//! - [`resolve_packets`] replaces the packet identifiers of every top-level
//!   section with the schemas returned by a [`Loader`]
//! - [`MarkdownExporter::export`] streams the document to any [`Write`] sink
//!
//! Splitting them means every file has been read and parsed before the
//! first byte of output is written.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use protodoc::Config;
//! use protodoc::export::{MarkdownExporter, load_protocol};
//!
//! let config = Config::default();
//! let index = load_protocol(Path::new("doc/protocol/index.json"), &config)?;
//!
//! let mut out = std::io::stdout().lock();
//! MarkdownExporter::with_config(config).export(&index, &mut out)?;
//! # Ok::<(), protodoc::Error>(())
//! ```
//!
//! # Document layout
//!
//! Title metadata line, H1 title and description, the table of contents
//! (sections, then the appendix stub), the content of every section at
//! heading depth 2, and finally the fixed appendix.

mod appendix;

use std::io::Write;
use std::path::Path;

use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::import::{FsLoader, Loader, load_index};
use crate::markdown::RenderContext;
use crate::model::{Index, PacketRef};

pub use appendix::{write_appendix, write_appendix_toc};

/// Heading depth of top-level sections.
const SECTION_DEPTH: usize = 2;

/// Replace packet identifiers with loaded packets.
///
/// Only the `packets` of top-level sections are resolved; identifiers in
/// nested sections are left as they are. Packets load in document order and
/// the first failure aborts.
pub fn resolve_packets<L: Loader>(index: &mut Index, loader: &L) -> Result<()> {
    for section in &mut index.sections {
        for packet in section.packets.iter_mut().flatten() {
            if let PacketRef::Id(id) = packet {
                *packet = PacketRef::from(loader.load_packet(id)?);
            }
        }
    }
    Ok(())
}

/// Load the index at `index_path` and resolve its packets from disk.
pub fn load_protocol(index_path: &Path, config: &Config) -> Result<Index> {
    let mut index = load_index(index_path)?;
    resolve_packets(&mut index, &FsLoader::for_index(index_path, config))?;
    Ok(index)
}

/// Exporter for the Markdown protocol reference.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter {
    config: Config,
}

impl MarkdownExporter {
    /// Create a MarkdownExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MarkdownExporter with the specified configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Write the full document for a resolved index.
    pub fn export<W: Write>(&self, index: &Index, writer: &mut W) -> Result<()> {
        let mut ctx = RenderContext::new(writer, self.config.indent_width);

        ctx.write_paragraph(0, &format!("Title: {}", index.title))?;
        ctx.write_heading(1, &index.title)?;
        ctx.write_paragraph(0, &index.description)?;

        ctx.write_heading(2, "Table of Contents")?;
        for section in &index.sections {
            ctx.write_toc(section, 0)?;
        }
        write_appendix_toc(&mut ctx)?;
        ctx.end_list()?;

        for section in &index.sections {
            ctx.write_section(section, SECTION_DEPTH)?;
        }

        write_appendix(&mut ctx)?;
        writer.flush()?;

        info!(
            "rendered {} ({} top-level sections)",
            index.title,
            index.sections.len()
        );
        Ok(())
    }

    /// Render the full document to a string.
    pub fn export_to_string(&self, index: &Index) -> Result<String> {
        let mut buf = Vec::new();
        self.export(index, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Resolve `index` through `loader` and write its document to `writer`.
pub fn assemble<L: Loader, W: Write>(
    mut index: Index,
    loader: &L,
    writer: &mut W,
    config: &Config,
) -> Result<()> {
    resolve_packets(&mut index, loader)?;
    MarkdownExporter::with_config(config.clone()).export(&index, writer)
}
