//! Typed view of the JSON Schema subset used by protocol packets.
//!
//! Only the keywords the renderer reads are modelled; anything else in the
//! source document is ignored during deserialization.

use std::fmt;

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Number, Value};

/// The `type` keyword of a schema.
///
/// The five kinds documented in the glossary get their own variant. Any other
/// string (e.g. `integer`, or a named object type) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SchemaType {
    Boolean,
    Number,
    String,
    Array,
    Object,
    Other(String),
}

impl SchemaType {
    /// Display name used in type labels and glossary headings.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for SchemaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "boolean" => Self::Boolean,
            "number" => Self::Number,
            "string" => Self::String,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for SchemaType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

/// The `items` keyword: a single schema for every element, or the tuple form.
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    Tuple(Vec<SchemaNode>),
    Single(Box<SchemaNode>),
}

impl Items {
    /// The schema that describes the array's element type in labels.
    ///
    /// For the tuple form this is the first entry.
    pub fn first(&self) -> Option<&SchemaNode> {
        match self {
            Self::Tuple(items) => items.first(),
            Self::Single(item) => Some(item.as_ref()),
        }
    }

    /// Every item schema, with a bare schema treated as a one-element list.
    pub fn as_slice(&self) -> &[SchemaNode] {
        match self {
            Self::Tuple(items) => items,
            Self::Single(item) => std::slice::from_ref(item.as_ref()),
        }
    }
}

impl<'de> Deserialize<'de> for Items {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemsVisitor;

        impl<'de> Visitor<'de> for ItemsVisitor {
            type Value = Items;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a schema or an array of schemas")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Items, A::Error> {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(Items::Tuple)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Items, A::Error> {
                SchemaNode::deserialize(MapAccessDeserializer::new(map))
                    .map(|item| Items::Single(Box::new(item)))
            }
        }

        deserializer.deserialize_any(ItemsVisitor)
    }
}

/// An ordered `name → schema` mapping (`properties` / `patternProperties`).
///
/// Keys keep their document order. A repeated key replaces the earlier value
/// in place, matching how a JSON object would be read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Vec<(String, SchemaNode)>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, schema: SchemaNode) {
        let name = name.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = schema,
            None => self.0.push((name, schema)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.0.iter().map(|(key, schema)| (key.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of property names to schemas")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Properties, A::Error> {
                let mut properties = Properties::new();
                while let Some((name, schema)) = map.next_entry::<String, SchemaNode>()? {
                    properties.insert(name, schema);
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// One node of a packet schema tree.
///
/// Schema trees are assumed acyclic; the renderer recurses without a guard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub kind: Option<SchemaType>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "enum")]
    pub variants: Option<Vec<Value>>,
    pub pattern: Option<String>,
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub exclusive_minimum: Option<Number>,
    pub exclusive_maximum: Option<Number>,
    pub items: Option<Items>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub pattern_properties: Properties,
    /// Names of `properties` that must be present. Not validated against them.
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub examples: Vec<Value>,
}

/// A packet is a root-level schema, conventionally with a `body` property.
pub type Packet = SchemaNode;

impl SchemaNode {
    /// Create an untitled schema of the given type.
    pub fn of_type(kind: impl Into<SchemaType>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the schema is documented on its own (has a title or description).
    pub fn is_documented(&self) -> bool {
        self.title.is_some() || self.description.is_some()
    }

    /// Whether any of the four numeric bound keywords is present.
    pub fn has_bounds(&self) -> bool {
        self.minimum.is_some()
            || self.maximum.is_some()
            || self.exclusive_minimum.is_some()
            || self.exclusive_maximum.is_some()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}
