use serde::Deserialize;
use smol_str::SmolStr;

use crate::property::Property;

/// A notification a domain emits once enabled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub name: SmolStr,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Property>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub experimental: bool,
}

impl Event {
    /// The wire method name, e.g. `Page.frameNavigated`.
    pub fn method_name(&self, domain: &str) -> String {
        format!("{}.{}", domain, self.name)
    }
}
