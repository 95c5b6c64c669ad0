//! Schema model and domain registry for remote-debugging protocol descriptions.
//!
//! A protocol document is decoded into an [`ApiRoot`] and indexed once into a
//! [`Registry`]. The registry is read-only afterwards and can be shared freely
//! between threads; `$ref` strings stay names and are resolved on demand.
//!
//! ## Example
//!
//! ```rust
//! use protogen_schema::{Location, Registry, TraversalOptions};
//!
//! let registry = Registry::from_json_str(
//!     r#"{
//!       "version": {"major": "1", "minor": "3"},
//!       "domains": [
//!         {"domain": "Network", "types": [{"id": "Cookie", "type": "object"}]},
//!         {"domain": "Page", "commands": [{"name": "getCookies"}]}
//!       ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let cookie = registry
//!     .lookup("Network.Cookie", &Location::of_command("Page", "getCookies"))
//!     .unwrap();
//! assert_eq!(cookie.qualified_name(), "Network.Cookie");
//!
//! for declaration in registry.declarations(TraversalOptions::default()) {
//!     println!("{}", declaration.qualified_name());
//! }
//! ```
mod api;
mod arena;
mod command;
mod de;
mod declaration;
mod domain;
mod error;
mod event;
mod location;
mod node;
mod property;
mod registry;
mod type_def;

pub use api::ApiRoot;
pub use api::Version;
pub use arena::Arena;
pub use arena::ArenaId;
pub use command::Command;
pub use command::ReturnValue;
pub use declaration::CommandHandle;
pub use declaration::Declaration;
pub use declaration::EventHandle;
pub use declaration::TraversalOptions;
pub use declaration::TypeHandle;
pub use domain::Domain;
pub use error::SchemaError;
pub use event::Event;
pub use location::Location;
pub use location::Owner;
pub use node::ArrayBounds;
pub use node::Kind;
pub use node::NodeRole;
pub use node::TypeBearing;
pub use property::Item;
pub use property::Property;
pub use registry::DomainId;
pub use registry::Registry;
pub use registry::domain_declarations;
pub use type_def::TypeDef;

pub type Result<T> = std::result::Result<T, SchemaError>;
