//! Loading protocol documents.
//!
//! The [`Loader`] trait turns a packet identifier into a parsed packet
//! schema. [`FsLoader`] reads `<root>/<identifier>.<extension>` from disk;
//! [`MemoryLoader`] serves packets registered in memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Index, Packet};

/// Source of packet schemas, keyed by the identifiers listed in sections.
pub trait Loader {
    /// Load and parse the packet named `id`.
    fn load_packet(&self, id: &str) -> Result<Packet>;
}

/// Read and parse a JSON document.
///
/// Read failures become [`Error::Load`], decode failures [`Error::Parse`];
/// both carry `path`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("loading {}", path.display());
    let bytes = fs::read(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the root index document.
pub fn load_index(path: &Path) -> Result<Index> {
    load_json(path)
}

// --- Implementation: Local Files ---

/// Loads packets from `<root>/<identifier>.<extension>`.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
    extension: String,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Loader for the packets that belong to the index at `index_path`.
    pub fn for_index(index_path: &Path, config: &Config) -> Self {
        Self::new(config.packet_root(index_path), config.packet_extension.clone())
    }

    /// Path a packet identifier resolves to.
    ///
    /// The extension is appended, never substituted, so dotted identifiers
    /// such as `kdeconnect.battery` keep every component.
    pub fn packet_path(&self, id: &str) -> PathBuf {
        if self.extension.is_empty() {
            self.root.join(id)
        } else {
            self.root.join(format!("{id}.{}", self.extension))
        }
    }
}

impl Loader for FsLoader {
    fn load_packet(&self, id: &str) -> Result<Packet> {
        load_json(&self.packet_path(id))
    }
}

// --- Implementation: In Memory ---

/// Serves packets from an in-memory map.
///
/// A missing identifier is reported as [`Error::Load`] with the identifier
/// as the path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    packets: HashMap<String, Packet>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, packet: Packet) {
        self.packets.insert(id.into(), packet);
    }

    pub fn with_packet(mut self, id: impl Into<String>, packet: Packet) -> Self {
        self.insert(id, packet);
        self
    }
}

impl Loader for MemoryLoader {
    fn load_packet(&self, id: &str) -> Result<Packet> {
        self.packets.get(id).cloned().ok_or_else(|| Error::Load {
            path: PathBuf::from(id),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such packet"),
        })
    }
}
