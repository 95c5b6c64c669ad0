use itertools::Itertools;
use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

use crate::Location;

#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("Failed to decode protocol document: {0}")]
    #[diagnostic(code(protogen::schema::parse))]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate domain `{name}`")]
    #[diagnostic(code(protogen::schema::duplicate_domain))]
    DuplicateDomain { name: SmolStr },

    #[error("Duplicate type `{id}` in domain `{domain}`")]
    #[diagnostic(code(protogen::schema::duplicate_type))]
    DuplicateType { domain: SmolStr, id: SmolStr },

    #[error("Duplicate {member} `{name}` in domain `{domain}`")]
    #[diagnostic(code(protogen::schema::duplicate_member))]
    DuplicateMember {
        domain: SmolStr,
        member: &'static str,
        name: SmolStr,
    },

    #[error(
        "Unresolved reference `{reference}` in {location}{}",
        similar_hint(.similar_names)
    )]
    #[diagnostic(code(protogen::schema::unresolved_reference))]
    UnresolvedReference {
        reference: SmolStr,
        location: Location,
        similar_names: Vec<SmolStr>,
    },
}

impl SchemaError {
    pub fn location(&self) -> Option<&Location> {
        match self {
            SchemaError::UnresolvedReference { location, .. } => Some(location),
            _ => None,
        }
    }
}

fn similar_hint(names: &[SmolStr]) -> String {
    if names.is_empty() {
        String::new()
    } else {
        format!(", these names seem close though: `{}`", names.iter().join(", "))
    }
}
