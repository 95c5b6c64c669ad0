use crate::{Command, Domain, Event, Location, TypeDef};

/// A type definition together with the domain that owns it.
#[derive(Debug, Clone, Copy)]
pub struct TypeHandle<'a> {
    pub domain: &'a Domain,
    pub def: &'a TypeDef,
}

impl TypeHandle<'_> {
    /// `Domain.TypeId`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.domain.name, self.def.id)
    }

    pub fn location(&self) -> Location {
        Location::of_type(self.domain.name.clone(), self.def.id.clone())
    }
}

// Ids are unique per domain once the registry is built, so the pair identifies the type.
impl PartialEq for TypeHandle<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.domain.name == other.domain.name && self.def.id == other.def.id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandHandle<'a> {
    pub domain: &'a Domain,
    pub command: &'a Command,
}

impl CommandHandle<'_> {
    pub fn method_name(&self) -> String {
        self.command.method_name(&self.domain.name)
    }

    pub fn location(&self) -> Location {
        Location::of_command(self.domain.name.clone(), self.command.name.clone())
    }
}

impl PartialEq for CommandHandle<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.domain.name == other.domain.name && self.command.name == other.command.name
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventHandle<'a> {
    pub domain: &'a Domain,
    pub event: &'a Event,
}

impl EventHandle<'_> {
    pub fn method_name(&self) -> String {
        self.event.method_name(&self.domain.name)
    }

    pub fn location(&self) -> Location {
        Location::of_event(self.domain.name.clone(), self.event.name.clone())
    }
}

/// One top-level declaration, as yielded by [`crate::Registry::declarations`].
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'a> {
    Type(TypeHandle<'a>),
    Command(CommandHandle<'a>),
    Event(EventHandle<'a>),
}

impl<'a> Declaration<'a> {
    pub fn domain(&self) -> &'a Domain {
        match self {
            Declaration::Type(handle) => handle.domain,
            Declaration::Command(handle) => handle.domain,
            Declaration::Event(handle) => handle.domain,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Declaration::Type(handle) => &handle.def.id,
            Declaration::Command(handle) => &handle.command.name,
            Declaration::Event(handle) => &handle.event.name,
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.domain().name, self.name())
    }

    pub fn location(&self) -> Location {
        match self {
            Declaration::Type(handle) => handle.location(),
            Declaration::Command(handle) => handle.location(),
            Declaration::Event(handle) => handle.location(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            Declaration::Type(handle) => handle.def.hidden,
            Declaration::Command(handle) => handle.command.hidden,
            Declaration::Event(handle) => handle.event.hidden,
        }
    }

    pub fn is_deprecated(&self) -> bool {
        match self {
            Declaration::Type(handle) => handle.def.deprecated,
            Declaration::Command(handle) => handle.command.deprecated,
            Declaration::Event(handle) => handle.event.deprecated,
        }
    }
}

/// Which declarations a traversal yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Yield hidden domains and hidden declarations.
    pub include_hidden: bool,
    /// Yield deprecated domains and deprecated declarations.
    pub include_deprecated: bool,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            include_hidden: false,
            include_deprecated: true,
        }
    }
}

impl TraversalOptions {
    /// Yields every declaration regardless of flags.
    pub fn all() -> Self {
        Self {
            include_hidden: true,
            include_deprecated: true,
        }
    }

    pub fn admits_domain(&self, domain: &Domain) -> bool {
        (self.include_hidden || !domain.hidden) && (self.include_deprecated || !domain.deprecated)
    }

    pub fn admits(&self, declaration: &Declaration<'_>) -> bool {
        (self.include_hidden || !declaration.is_hidden()) && (self.include_deprecated || !declaration.is_deprecated())
    }
}
