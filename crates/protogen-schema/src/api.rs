use std::{fmt, io::Read};

use serde::Deserialize;
use smol_str::SmolStr;

use crate::{Result, de, domain::Domain};

/// The root of a protocol description document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiRoot {
    pub version: Version,
    #[serde(default)]
    pub domains: Vec<Domain>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Version {
    #[serde(deserialize_with = "de::string_or_number")]
    pub major: SmolStr,
    #[serde(deserialize_with = "de::string_or_number")]
    pub minor: SmolStr,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl ApiRoot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
