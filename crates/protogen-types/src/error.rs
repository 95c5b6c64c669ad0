use miette::Diagnostic;
use protogen_schema::{Kind, Location, NodeRole, SchemaError};
use smol_str::SmolStr;
use thiserror::Error;

/// Type resolution errors. All of them are fatal to a generation run.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// Registry failures, most commonly an unresolved `$ref`, passed through as is.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    #[error("Array {role} in {location} has no `items` descriptor")]
    #[diagnostic(code(protogen::types::malformed_array))]
    MalformedArray { role: NodeRole, location: Location },

    #[error("Ambiguous {role} in {location}: declares both `type: {kind}` and `$ref: {reference}`")]
    #[diagnostic(
        code(protogen::types::ambiguous_type),
        help("a node names its type either inline with `type` or by `$ref`, never both")
    )]
    AmbiguousType {
        role: NodeRole,
        kind: Kind,
        reference: SmolStr,
        location: Location,
    },

    #[error("The {role} in {location} declares neither `type` nor `$ref`")]
    #[diagnostic(code(protogen::types::missing_type))]
    MissingType { role: NodeRole, location: Location },

    #[error("Type mismatch in {location}: expected {expected}, found {found}")]
    #[diagnostic(code(protogen::types::mismatch))]
    Mismatch {
        expected: &'static str,
        found: String,
        location: Location,
    },
}

impl ResolveError {
    /// The declaring location of the offending node, when known.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ResolveError::Schema(error) => error.location(),
            ResolveError::MalformedArray { location, .. }
            | ResolveError::AmbiguousType { location, .. }
            | ResolveError::MissingType { location, .. }
            | ResolveError::Mismatch { location, .. } => Some(location),
        }
    }
}
