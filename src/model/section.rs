//! Sections and the root index of a protocol tree.

use serde::Deserialize;

use super::schema::Packet;

/// A packet entry in a section: an identifier until it has been loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PacketRef {
    Id(String),
    Loaded(Box<Packet>),
}

impl PacketRef {
    /// The loaded packet, if this reference has been resolved.
    pub fn packet(&self) -> Option<&Packet> {
        match self {
            Self::Loaded(packet) => Some(packet.as_ref()),
            Self::Id(_) => None,
        }
    }
}

impl From<Packet> for PacketRef {
    fn from(packet: Packet) -> Self {
        Self::Loaded(Box::new(packet))
    }
}

/// A named group of packets and nested sections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Section {
    pub title: Option<String>,
    pub description: Option<String>,
    pub references: Option<Vec<String>>,
    pub packets: Option<Vec<PacketRef>>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_packet(mut self, packet: impl Into<PacketRef>) -> Self {
        self.packets.get_or_insert_with(Vec::new).push(packet.into());
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

/// The root document describing the whole protocol.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Index {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_with_packet_identifiers() {
        let index: Index = serde_json::from_str(
            r#"{
                "title": "Protocol",
                "description": "All packets",
                "sections": [
                    {
                        "title": "Core",
                        "references": ["https://example.com/core"],
                        "packets": ["core.identity", "core.pair"]
                    }
                ]
            }"#,
        )
        .unwrap();

        let core = &index.sections[0];
        assert_eq!(core.title.as_deref(), Some("Core"));
        assert_eq!(core.references.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            core.packets.as_deref(),
            Some(
                &[
                    PacketRef::Id("core.identity".to_string()),
                    PacketRef::Id("core.pair".to_string()),
                ][..]
            )
        );
        assert!(core.sections.is_empty());
    }

    #[test]
    fn test_inline_packet_is_loaded() {
        let section: Section =
            serde_json::from_str(r#"{"title": "S", "packets": [{"title": "inline"}]}"#).unwrap();
        let packet = section.packets.unwrap()[0].packet().cloned().unwrap();
        assert_eq!(packet.title.as_deref(), Some("inline"));
    }

    #[test]
    fn test_index_requires_title() {
        assert!(serde_json::from_str::<Index>(r#"{"description": "x"}"#).is_err());
    }
}
