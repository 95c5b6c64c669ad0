use serde::Deserialize;
use smol_str::SmolStr;

use crate::{command::Command, event::Event, type_def::TypeDef};

/// A named group of types, commands and events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Domain {
    #[serde(rename = "domain")]
    pub name: SmolStr,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<SmolStr>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
}

impl Domain {
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == name)
    }
}
