//! # protodoc
//!
//! Render a protocol described as JSON Schema packet definitions into a single
//! cross-linked Markdown reference.
//!
//! ## Features
//!
//! - Table of contents mirroring the section/packet tree, with anchor links
//! - Per-field type labels linked to a data type glossary
//! - `enum`, numeric range and `pattern` constraints, required-field markers
//! - Pretty-printed example payloads
//!
//! ## Input
//!
//! A root index (`title`, `description`, `sections`) whose sections list
//! packet identifiers. Each identifier names a packet schema file, by default
//! `<identifier>.json` next to the index.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use protodoc::{Config, MarkdownExporter, load_protocol};
//!
//! let config = Config::default();
//! let index = load_protocol(Path::new("doc/protocol/index.json"), &config)?;
//! let markdown = MarkdownExporter::with_config(config).export_to_string(&index)?;
//! print!("{markdown}");
//! # Ok::<(), protodoc::Error>(())
//! ```
//!
//! ## Rendering In Memory
//!
//! ```
//! use protodoc::model::{Index, SchemaNode, Section};
//! use protodoc::{Config, MarkdownExporter};
//!
//! let packet: SchemaNode = serde_json::from_str(r#"{
//!     "title": "kdeconnect.ping",
//!     "description": "Send a ping",
//!     "properties": {"body": {"type": "object", "properties": {}}}
//! }"#).unwrap();
//!
//! let index = Index {
//!     title: "Protocol".to_string(),
//!     description: String::new(),
//!     sections: vec![Section::new("Core").with_packet(packet)],
//! };
//!
//! let markdown = MarkdownExporter::with_config(Config::default())
//!     .export_to_string(&index)
//!     .unwrap();
//! assert!(markdown.contains("#### `kdeconnect.ping`"));
//! assert!(markdown.contains("This packet has no body fields."));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod markdown;
pub mod model;

pub use config::Config;
pub use error::{Error, Result};
pub use export::{MarkdownExporter, assemble, load_protocol, resolve_packets};
pub use import::{FsLoader, Loader, MemoryLoader};
pub use model::{Index, Packet, PacketRef, SchemaNode, Section};
