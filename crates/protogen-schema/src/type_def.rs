use serde::Deserialize;
use smol_str::SmolStr;

use crate::{
    de,
    node::{ArrayBounds, Kind, NodeRole, TypeBearing},
    property::{Item, Property},
};

/// A named type declared in a domain's `types` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    pub id: SmolStr,
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
    #[serde(default)]
    pub items: Option<Item>,
    #[serde(default)]
    pub min_items: Option<u64>,
    #[serde(default)]
    pub max_items: Option<u64>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
}

impl TypeBearing for TypeDef {
    fn role(&self) -> NodeRole {
        NodeRole::TypeDef
    }

    fn name(&self) -> Option<&str> {
        Some(&self.id)
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

    fn array_bounds(&self) -> ArrayBounds {
        ArrayBounds {
            min_items: self.min_items,
            max_items: self.max_items,
        }
    }
}
