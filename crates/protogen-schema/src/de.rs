use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de};
use smol_str::SmolStr;

/// Decodes an optional string field, treating `""` the same as an absent field.
pub(crate) fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<SmolStr>::deserialize(deserializer)? {
        Some(value) if !value.is_empty() => value.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// Version components are strings on the wire, but some exports emit bare numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<SmolStr, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Component {
        String(SmolStr),
        Number(u64),
    }

    Ok(match Component::deserialize(deserializer)? {
        Component::String(value) => value,
        Component::Number(value) => SmolStr::new(value.to_string()),
    })
}
