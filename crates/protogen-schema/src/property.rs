use serde::Deserialize;
use smol_str::SmolStr;

use crate::{
    de,
    node::{Kind, NodeRole, TypeBearing},
};

/// A member of an object type, or a command/event parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub name: SmolStr,
    #[serde(rename = "type", default, deserialize_with = "de::non_empty")]
    pub kind: Option<Kind>,
    #[serde(rename = "$ref", default, deserialize_with = "de::non_empty")]
    pub reference: Option<SmolStr>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<SmolStr>,
    #[serde(default)]
    pub items: Option<Item>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
}

/// The element descriptor of an array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    #[serde(rename = "type", default, deserialize_with = "de::non_empty")]
    pub kind: Option<Kind>,
    #[serde(rename = "$ref", default, deserialize_with = "de::non_empty")]
    pub reference: Option<SmolStr>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<SmolStr>,
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Element descriptor of a nested array.
    #[serde(default)]
    pub items: Option<Box<Item>>,
}

impl TypeBearing for Property {
    fn role(&self) -> NodeRole {
        NodeRole::Property
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn kind(&self) -> Option<Kind> {
        self.kind
    }

    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn items(&self) -> Option<&Item> {
        self.items.as_ref()
    }

    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn enum_values(&self) -> &[SmolStr] {
        &self.enum_values
    }
}

impl TypeBearing for Item {
    fn role(&self) -> NodeRole {
        NodeRole::Item
    }

    fn name(&self) -> Option<&str> {
        None
    }

    fn kind(&self) -> Option<Kind> {
        self.kind
    }

    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn items(&self) -> Option<&Item> {
        self.items.as_deref()
    }

    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn enum_values(&self) -> &[SmolStr] {
        &self.enum_values
    }
}
