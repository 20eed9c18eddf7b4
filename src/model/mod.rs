//! Core data model for protocol documents.
//!
//! This module contains:
//! - Schema nodes and the subset of JSON Schema keywords the renderer reads
//! - Sections, packet references and the root index

mod schema;
mod section;

pub use schema::{Items, Packet, Properties, SchemaNode, SchemaType};
pub use section::{Index, PacketRef, Section};
