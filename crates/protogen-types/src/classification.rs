//! Resolved kinds of type-bearing schema nodes.

use std::fmt;

use itertools::Itertools;
use protogen_schema::{ArrayBounds, Kind, Location, Property, TypeHandle};

/// Scalar wire types that map straight onto target-language primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
    /// An arbitrary JSON value.
    Any,
}

impl PrimitiveKind {
    /// Maps a scalar kind; `None` for `object` and `array`.
    pub fn from_kind(kind: Kind) -> Option<Self> {
        match kind {
            Kind::String => Some(PrimitiveKind::String),
            Kind::Integer => Some(PrimitiveKind::Integer),
            Kind::Number => Some(PrimitiveKind::Number),
            Kind::Boolean => Some(PrimitiveKind::Boolean),
            Kind::Any => Some(PrimitiveKind::Any),
            Kind::Object | Kind::Array => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Any => "any",
        }
    }
}

/// The resolved kind of a schema node.
///
/// Borrows from the registry it was resolved against. References are kept as
/// indirections: a [`Classification::Reference`] names its target but does not
/// contain the target's own classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification<'a> {
    Primitive(PrimitiveKind),
    /// A string restricted to a set of literals.
    Enum(EnumClass<'a>),
    Array(ArrayClass<'a>),
    /// A `$ref` to a named, structured type.
    Reference { target: TypeHandle<'a> },
    /// An object with declared properties.
    Object(ObjectClass<'a>),
    /// An object without declared properties, to be rendered as a dynamic value.
    OpaqueObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumClass<'a> {
    /// Where the enum is declared; names the symbolic type.
    pub owner: Location,
    /// Literals in declaration order, each listed once.
    pub values: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayClass<'a> {
    pub element: Box<Classification<'a>>,
    pub bounds: ArrayBounds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectClass<'a> {
    /// Where the object is declared. Bare references inside it resolve in `location.domain`.
    pub location: Location,
    pub properties: &'a [Property],
}

impl<'a> ObjectClass<'a> {
    /// Each property paired with its own location.
    pub fn members(&self) -> impl Iterator<Item = (&'a Property, Location)> + '_ {
        let properties: &'a [Property] = self.properties;
        properties
            .iter()
            .map(move |property| (property, self.location.member(property.name.clone())))
    }
}

impl<'a> Classification<'a> {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Classification::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Classification::Array(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Classification::Reference { .. })
    }

    pub fn is_opaque_object(&self) -> bool {
        matches!(self, Classification::OpaqueObject)
    }

    /// The element classification if this is an array.
    pub fn element(&self) -> Option<&Classification<'a>> {
        match self {
            Classification::Array(array) => Some(&array.element),
            _ => None,
        }
    }

    /// The referenced type if this is a reference.
    pub fn target(&self) -> Option<TypeHandle<'a>> {
        match self {
            Classification::Reference { target } => Some(*target),
            _ => None,
        }
    }
}

impl fmt::Display for Classification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Primitive(kind) => write!(f, "{}", kind.as_str()),
            Classification::Enum(class) => {
                write!(f, "enum({})", class.values.iter().map(|v| format!("\"{}\"", v)).join(", "))
            }
            Classification::Array(array) => write!(f, "[{}]", array.element),
            Classification::Reference { target } => write!(f, "{}", target.qualified_name()),
            Classification::Object(object) => {
                write!(f, "{{{}}}", object.properties.iter().map(|p| p.name.as_str()).join(", "))
            }
            Classification::OpaqueObject => write!(f, "object"),
        }
    }
}
