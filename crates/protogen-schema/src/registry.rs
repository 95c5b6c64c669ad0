use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::{
    ApiRoot, Domain, Location, Result, SchemaError, Version,
    arena::{Arena, ArenaId},
    declaration::{CommandHandle, Declaration, EventHandle, TraversalOptions, TypeHandle},
};

pub type DomainId = ArenaId<Domain>;

const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Index over every domain and type of one protocol document.
///
/// The registry owns the document. Domains live in an arena in document
/// order, and `$ref` strings are resolved by name against the indexes on
/// demand, so forward and cyclic references need no special handling.
#[derive(Debug)]
pub struct Registry {
    version: Version,
    domains: Arena<Domain>,
    domain_index: FxHashMap<SmolStr, DomainId>,
    type_index: FxHashMap<(DomainId, SmolStr), usize>,
    command_index: FxHashMap<(DomainId, SmolStr), usize>,
}

impl Registry {
    /// Indexes `root` in one pass. Either the whole document is indexed or an
    /// error is returned; no partially built registry is ever observable.
    pub fn build(root: ApiRoot) -> Result<Self> {
        let ApiRoot { version, domains } = root;

        let mut arena = Arena::with_capacity(domains.len());
        let mut domain_index = FxHashMap::default();
        let mut type_index = FxHashMap::default();
        let mut command_index = FxHashMap::default();

        for domain in domains {
            if domain_index.contains_key(&domain.name) {
                return Err(SchemaError::DuplicateDomain { name: domain.name });
            }

            let domain_name = domain.name.clone();
            let domain_id = arena.alloc(domain);
            let domain = &arena[domain_id];

            for (index, def) in domain.types.iter().enumerate() {
                if type_index.insert((domain_id, def.id.clone()), index).is_some() {
                    return Err(SchemaError::DuplicateType {
                        domain: domain.name.clone(),
                        id: def.id.clone(),
                    });
                }
            }

            for (index, command) in domain.commands.iter().enumerate() {
                if command_index.insert((domain_id, command.name.clone()), index).is_some() {
                    return Err(SchemaError::DuplicateMember {
                        domain: domain.name.clone(),
                        member: "command",
                        name: command.name.clone(),
                    });
                }
            }

            let mut event_names = rustc_hash::FxHashSet::default();
            for event in &domain.events {
                if !event_names.insert(&event.name) {
                    return Err(SchemaError::DuplicateMember {
                        domain: domain.name.clone(),
                        member: "event",
                        name: event.name.clone(),
                    });
                }
            }

            domain_index.insert(domain_name, domain_id);
        }

        tracing::debug!(
            version = %version,
            domains = arena.len(),
            types = type_index.len(),
            commands = command_index.len(),
            "indexed protocol"
        );

        Ok(Self {
            version,
            domains: arena,
            domain_index,
            type_index,
            command_index,
        })
    }

    /// Decodes a JSON document and indexes it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::build(ApiRoot::from_json_str(json)?)
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Domains in document order.
    pub fn domains(&self) -> impl ExactSizeIterator<Item = &Domain> + '_ {
        self.domains.values()
    }

    pub fn domain_id(&self, name: &str) -> Option<DomainId> {
        self.domain_index.get(name).copied()
    }

    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domain_id(name).and_then(|id| self.domains.get(id))
    }

    pub fn type_count(&self) -> usize {
        self.type_index.len()
    }

    /// Direct `(domain, id)` lookup without any reference parsing.
    pub fn type_def(&self, domain: &str, id: &str) -> Option<TypeHandle<'_>> {
        let domain_id = self.domain_id(domain)?;
        self.type_in(domain_id, id)
    }

    fn type_in(&self, domain_id: DomainId, id: &str) -> Option<TypeHandle<'_>> {
        let domain = &self.domains[domain_id];
        self.type_index
            .get(&(domain_id, SmolStr::new(id)))
            .map(|index| TypeHandle {
                domain,
                def: &domain.types[*index],
            })
    }

    /// Resolves a `$ref` declared at `at`.
    ///
    /// `Domain.Name` is looked up in `Domain`; a bare `Name` only ever in
    /// `at.domain`, even when another domain declares the same id.
    pub fn lookup(&self, reference: &str, at: &Location) -> Result<TypeHandle<'_>> {
        let (domain_name, id) = split_reference(reference, &at.domain);

        let Some(domain_id) = self.domain_id(domain_name) else {
            return Err(self.unresolved(reference, at, self.similar_domain_names(domain_name)));
        };

        match self.type_in(domain_id, id) {
            Some(handle) => {
                tracing::trace!(reference, resolved = %handle.qualified_name(), "resolved reference");
                Ok(handle)
            }
            None => Err(self.unresolved(reference, at, self.similar_type_names(domain_id, id))),
        }
    }

    /// Resolves a command reference such as `Network.getCookies`; a bare name
    /// resolves in `at.domain`.
    pub fn lookup_command(&self, reference: &str, at: &Location) -> Result<CommandHandle<'_>> {
        let (domain_name, name) = split_reference(reference, &at.domain);

        let command = self.domain_id(domain_name).and_then(|domain_id| {
            let domain = &self.domains[domain_id];
            self.command_index
                .get(&(domain_id, SmolStr::new(name)))
                .map(|index| CommandHandle {
                    domain,
                    command: &domain.commands[*index],
                })
        });

        command.ok_or_else(|| self.unresolved(reference, at, Vec::new()))
    }

    /// Follows a command's `redirect`. A bare domain name redirects to the
    /// command of the same name in that domain.
    pub fn redirect_target<'a>(&'a self, source: &CommandHandle<'_>) -> Result<Option<CommandHandle<'a>>> {
        let Some(redirect) = source.command.redirect.as_deref() else {
            return Ok(None);
        };

        let at = source.location().member("redirect");
        let reference = if redirect.contains('.') {
            redirect.to_string()
        } else {
            format!("{}.{}", redirect, source.command.name)
        };

        self.lookup_command(&reference, &at).map(Some)
    }

    /// Every declaration admitted by `options` in document order: domains in
    /// order, and within each domain its types, then commands, then events.
    pub fn declarations(&self, options: TraversalOptions) -> impl Iterator<Item = Declaration<'_>> + '_ {
        self.domains
            .values()
            .filter(move |domain| options.admits_domain(domain))
            .flat_map(domain_declarations)
            .filter(move |declaration| options.admits(declaration))
    }

    fn unresolved(&self, reference: &str, at: &Location, similar_names: Vec<SmolStr>) -> SchemaError {
        SchemaError::UnresolvedReference {
            reference: SmolStr::new(reference),
            location: at.clone(),
            similar_names,
        }
    }

    fn similar_domain_names(&self, target: &str) -> Vec<SmolStr> {
        similar_names(target, self.domains.values().map(|d| &d.name))
    }

    fn similar_type_names(&self, domain_id: DomainId, target: &str) -> Vec<SmolStr> {
        similar_names(target, self.domains[domain_id].types.iter().map(|t| &t.id))
    }
}

/// Every declaration of one domain: types, then commands, then events.
pub fn domain_declarations(domain: &Domain) -> impl Iterator<Item = Declaration<'_>> + '_ {
    let types = domain
        .types
        .iter()
        .map(move |def| Declaration::Type(TypeHandle { domain, def }));
    let commands = domain
        .commands
        .iter()
        .map(move |command| Declaration::Command(CommandHandle { domain, command }));
    let events = domain
        .events
        .iter()
        .map(move |event| Declaration::Event(EventHandle { domain, event }));

    types.chain(commands).chain(events)
}

fn split_reference<'a>(reference: &'a str, context_domain: &'a str) -> (&'a str, &'a str) {
    reference.split_once('.').unwrap_or((context_domain, reference))
}

fn similar_names<'a>(target: &str, candidates: impl Iterator<Item = &'a SmolStr>) -> Vec<SmolStr> {
    candidates
        .filter(|name| name.as_str() != target && strsim::jaro_winkler(target, name) > SIMILARITY_THRESHOLD)
        .cloned()
        .collect()
}
