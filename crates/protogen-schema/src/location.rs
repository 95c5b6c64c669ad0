use std::fmt;

use itertools::Itertools;
use smol_str::SmolStr;

/// The declaration a diagnostic points into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    Domain,
    Type(SmolStr),
    Command(SmolStr),
    Event(SmolStr),
}

/// Where a schema node is declared: a domain, the type/command/event inside
/// it, and the member path down to the node itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub domain: SmolStr,
    pub owner: Owner,
    pub path: Vec<SmolStr>,
}

impl Location {
    pub fn new(domain: impl Into<SmolStr>, owner: Owner) -> Self {
        Self {
            domain: domain.into(),
            owner,
            path: Vec::new(),
        }
    }

    pub fn of_domain(domain: impl Into<SmolStr>) -> Self {
        Self::new(domain, Owner::Domain)
    }

    pub fn of_type(domain: impl Into<SmolStr>, id: impl Into<SmolStr>) -> Self {
        Self::new(domain, Owner::Type(id.into()))
    }

    pub fn of_command(domain: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self::new(domain, Owner::Command(name.into()))
    }

    pub fn of_event(domain: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self::new(domain, Owner::Event(name.into()))
    }

    /// Returns a copy of this location one path segment deeper.
    pub fn member(&self, segment: impl Into<SmolStr>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            domain: self.domain.clone(),
            owner: self.owner.clone(),
            path,
        }
    }

    pub fn owner_name(&self) -> Option<&str> {
        match &self.owner {
            Owner::Domain => None,
            Owner::Type(name) | Owner::Command(name) | Owner::Event(name) => Some(name.as_str()),
        }
    }

    /// `Domain.Owner`, or just `Domain` for domain-level locations.
    pub fn qualified_owner(&self) -> String {
        match self.owner_name() {
            Some(name) => format!("{}.{}", self.domain, name),
            None => self.domain.to_string(),
        }
    }

    /// `Domain.Owner.path.segments`, used to derive names for anonymous types.
    pub fn qualified_path(&self) -> String {
        if self.path.is_empty() {
            self.qualified_owner()
        } else {
            format!("{}.{}", self.qualified_owner(), self.path.iter().join("."))
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.owner {
            Owner::Domain => "domain",
            Owner::Type(_) => "type",
            Owner::Command(_) => "command",
            Owner::Event(_) => "event",
        };
        write!(f, "{} `{}`", label, self.qualified_owner())?;
        if !self.path.is_empty() {
            write!(f, " at `{}`", self.path.iter().join("."))?;
        }
        Ok(())
    }
}
