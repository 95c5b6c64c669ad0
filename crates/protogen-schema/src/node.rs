use std::{fmt, str::FromStr};

use smol_str::SmolStr;

use crate::{Item, Property};

/// The underlying wire type of a schema node (`"type"` in the document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    Any,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Any => "any",
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Kind::String),
            "integer" => Ok(Kind::Integer),
            "number" => Ok(Kind::Number),
            "boolean" => Ok(Kind::Boolean),
            "object" => Ok(Kind::Object),
            "array" => Ok(Kind::Array),
            "any" => Ok(Kind::Any),
            _ => Err(format!("unknown type `{}`", s)),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which concrete schema structure a [`TypeBearing`] node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    TypeDef,
    Property,
    Item,
    ReturnValue,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeRole::TypeDef => "type",
            NodeRole::Property => "property",
            NodeRole::Item => "array item",
            NodeRole::ReturnValue => "return value",
        };
        write!(f, "{}", s)
    }
}

/// Array-length bounds declared with `minItems` / `maxItems`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayBounds {
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

/// The shared shape of every node that declares a type: type definitions,
/// properties, parameters, return values and array items.
///
/// A node carries an inline [`Kind`], a `$ref`, or (when malformed) both or
/// neither. Deciding what that means is left to the type resolver.
pub trait TypeBearing {
    fn role(&self) -> NodeRole;

    /// The member name, `None` for array items.
    fn name(&self) -> Option<&str>;

    fn kind(&self) -> Option<Kind>;

    fn reference(&self) -> Option<&str>;

    fn items(&self) -> Option<&Item>;

    fn properties(&self) -> &[Property];

    fn enum_values(&self) -> &[SmolStr];

    fn array_bounds(&self) -> ArrayBounds {
        ArrayBounds::default()
    }

    #[inline(always)]
    fn is_array(&self) -> bool {
        self.kind() == Some(Kind::Array)
    }

    #[inline(always)]
    fn is_opaque_object(&self) -> bool {
        self.kind() == Some(Kind::Object) && self.properties().is_empty()
    }
}
