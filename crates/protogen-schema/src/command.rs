use serde::Deserialize;
use smol_str::SmolStr;

use crate::{
    de,
    node::{Kind, NodeRole, TypeBearing},
    property::{Item, Property},
};

/// A method a client can invoke on a domain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Command {
    pub name: SmolStr,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub handlers: Vec<SmolStr>,
    #[serde(default)]
    pub parameters: Vec<Property>,
    #[serde(default)]
    pub returns: Vec<ReturnValue>,
    #[serde(rename = "async", default)]
    pub is_async: bool,
    /// Domain (or `Domain.command`) that actually implements this command.
    #[serde(default, deserialize_with = "de::non_empty")]
    pub redirect: Option<SmolStr>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
}

impl Command {
    /// The wire method name, e.g. `Page.navigate`.
    pub fn method_name(&self, domain: &str) -> String {
        format!("{}.{}", domain, self.name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Property> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn return_value(&self, name: &str) -> Option<&ReturnValue> {
        self.returns.iter().find(|r| r.name == name)
    }
}

/// A named value in a command's response. Always required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReturnValue {
    pub name: SmolStr,
    #[serde(rename = "type", default, deserialize_with = "de::non_empty")]
    pub kind: Option<Kind>,
    #[serde(rename = "$ref", default, deserialize_with = "de::non_empty")]
    pub reference: Option<SmolStr>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<SmolStr>,
    #[serde(default)]
    pub items: Option<Item>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl TypeBearing for ReturnValue {
    fn role(&self) -> NodeRole {
        NodeRole::ReturnValue
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
