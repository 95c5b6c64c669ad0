//! Type resolution for remote-debugging protocol bindings.
//!
//! Given a [`protogen_schema::Registry`], the [`TypeResolver`] classifies any
//! node that declares a type (a type definition, property, parameter, return
//! value or array item) into a [`Classification`]:
//! - primitives (`string`, `integer`, `number`, `boolean`, `any`)
//! - string enumerations, keeping literal order
//! - arrays, always with their element classification attached
//! - references to named types in the same or another domain
//! - structured objects, and opaque objects without declared properties
//!
//! References stay indirections. Resolving a reference yields the target's
//! handle; its classification is computed only when asked for, so cyclic
//! and forward references need no special treatment.
//!
//! ## Example
//!
//! ```rust
//! use protogen_schema::Registry;
//! use protogen_types::{Classification, TypeResolver};
//!
//! let registry = Registry::from_json_str(
//!     r#"{
//!       "version": {"major": "1", "minor": "3"},
//!       "domains": [
//!         {"domain": "Network", "types": [
//!           {"id": "Cookie", "type": "object", "properties": [{"name": "name", "type": "string"}]}
//!         ]},
//!         {"domain": "Page", "commands": [
//!           {"name": "getCookies", "returns": [
//!             {"name": "cookies", "type": "array", "items": {"$ref": "Network.Cookie"}}
//!           ]}
//!         ]}
//!       ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let resolver = TypeResolver::new(&registry);
//! assert!(resolver.check().is_empty());
//!
//! let page = registry.domain("Page").unwrap();
//! let command = page.command("getCookies").unwrap();
//! let at = protogen_schema::Location::of_command("Page", "getCookies").member("returns").member("cookies");
//! let classification = resolver.classify(&command.returns[0], &at).unwrap();
//!
//! assert_eq!(classification.to_string(), "[Network.Cookie]");
//! assert!(matches!(classification.element(), Some(Classification::Reference { .. })));
//! ```

pub mod classification;
pub mod error;
pub mod resolver;

pub use classification::{ArrayClass, Classification, EnumClass, ObjectClass, PrimitiveKind};
pub use error::ResolveError;
pub use resolver::TypeResolver;

/// Result type for type resolution
pub type Result<T> = std::result::Result<T, ResolveError>;
