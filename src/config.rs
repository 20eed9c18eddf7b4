//! Generation settings.

use std::path::{Path, PathBuf};

/// Settings for one generation run.
///
/// Built once (by the CLI or the caller) and passed down; nothing is read
/// from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory packet identifiers are resolved against.
    /// `None` means the directory containing the index file.
    pub packet_dir: Option<PathBuf>,
    /// File extension appended to packet identifiers, without the dot.
    pub packet_extension: String,
    /// Spaces per nesting level in field lists and the table of contents.
    pub indent_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packet_dir: None,
            packet_extension: "json".to_string(),
            indent_width: 4,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packet_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.packet_dir = Some(dir.into());
        self
    }

    pub fn with_packet_extension(mut self, extension: impl Into<String>) -> Self {
        self.packet_extension = extension.into();
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// The directory packets are loaded from for the given index file.
    pub fn packet_root(&self, index_path: &Path) -> PathBuf {
        match &self.packet_dir {
            Some(dir) => dir.clone(),
            None => index_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}
