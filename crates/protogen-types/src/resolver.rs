use itertools::Itertools;
use protogen_schema::{
    Declaration, Domain, Kind, Location, NodeRole, Property, Registry, TypeBearing, TypeHandle, domain_declarations,
};
use rayon::prelude::*;

use crate::{
    Result,
    classification::{ArrayClass, Classification, EnumClass, ObjectClass, PrimitiveKind},
    error::ResolveError,
};

/// Classifies schema nodes against one [`Registry`].
///
/// The resolver holds no state besides the registry reference, so a single
/// instance can be shared by any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a Registry,
}

impl<'a> TypeResolver<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Classifies `node`, declared at `at`.
    ///
    /// Arrays are classified down to their element. References are only
    /// dereferenced far enough to recognise opaque targets; the target's own
    /// classification is left to [`TypeResolver::classify_target`].
    pub fn classify<N>(&self, node: &'a N, at: &Location) -> Result<Classification<'a>>
    where
        N: TypeBearing + ?Sized,
    {
        tracing::trace!(location = %at, role = %node.role(), "classify");

        match (node.kind(), node.reference()) {
            (Some(kind), Some(reference)) => Err(ResolveError::AmbiguousType {
                role: node.role(),
                kind,
                reference: reference.into(),
                location: at.clone(),
            }),
            (None, Some(_)) => {
                let target = self.resolve_reference(node, at)?;
                if target.def.is_opaque_object() {
                    Ok(Classification::OpaqueObject)
                } else {
                    Ok(Classification::Reference { target })
                }
            }
            (Some(kind), None) => self.classify_kind(node, kind, at),
            // Untyped array items fall back to objects.
            (None, None) if node.role() == NodeRole::Item => Ok(object_or_opaque(node.properties(), at)),
            (None, None) => Err(ResolveError::MissingType {
                role: node.role(),
                location: at.clone(),
            }),
        }
    }

    /// Classifies the element type of an array node.
    pub fn resolve_array_element<N>(&self, node: &'a N, at: &Location) -> Result<Classification<'a>>
    where
        N: TypeBearing + ?Sized,
    {
        if !node.is_array() {
            return Err(ResolveError::Mismatch {
                expected: "array",
                found: describe(node),
                location: at.clone(),
            });
        }

        let Some(item) = node.items() else {
            return Err(ResolveError::MalformedArray {
                role: node.role(),
                location: at.clone(),
            });
        };

        self.classify(item, &at.member("items"))
    }

    /// Looks up the type a `$ref` node points to.
    pub fn resolve_reference<N>(&self, node: &'a N, at: &Location) -> Result<TypeHandle<'a>>
    where
        N: TypeBearing + ?Sized,
    {
        let Some(reference) = node.reference() else {
            return Err(ResolveError::Mismatch {
                expected: "$ref",
                found: describe(node),
                location: at.clone(),
            });
        };

        if let Some(kind) = node.kind() {
            return Err(ResolveError::AmbiguousType {
                role: node.role(),
                kind,
                reference: reference.into(),
                location: at.clone(),
            });
        }

        Ok(self.registry.lookup(reference, at)?)
    }

    /// Classifies the definition a reference points to.
    pub fn classify_target(&self, target: TypeHandle<'a>) -> Result<Classification<'a>> {
        self.classify(target.def, &target.location())
    }

    /// Classifies every type-bearing node in the document and collects every
    /// error, in document order.
    ///
    /// Each domain is checked on its own worker.
    pub fn check(&self) -> Vec<ResolveError> {
        let domains = self.registry.domains().collect_vec();
        let errors: Vec<ResolveError> = domains
            .par_iter()
            .map(|domain| self.check_domain(*domain))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        tracing::debug!(domains = domains.len(), errors = errors.len(), "checked protocol");
        errors
    }

    fn check_domain(&self, domain: &'a Domain) -> Vec<ResolveError> {
        let mut errors = Vec::new();

        for declaration in domain_declarations(domain) {
            let at = declaration.location();
            match declaration {
                Declaration::Type(handle) => self.check_node(handle.def, &at, &mut errors),
                Declaration::Command(handle) => {
                    self.check_members(&handle.command.parameters, &at.member("parameters"), &mut errors);
                    for value in &handle.command.returns {
                        self.check_node(value, &at.member("returns").member(value.name.clone()), &mut errors);
                    }
                    if let Err(error) = self.registry.redirect_target(&handle) {
                        errors.push(error.into());
                    }
                }
                Declaration::Event(handle) => {
                    self.check_members(&handle.event.parameters, &at.member("parameters"), &mut errors)
                }
            }
        }

        errors
    }

    fn check_members(&self, properties: &'a [Property], at: &Location, errors: &mut Vec<ResolveError>) {
        for property in properties {
            self.check_node(property, &at.member(property.name.clone()), errors);
        }
    }

    fn check_node<N>(&self, node: &'a N, at: &Location, errors: &mut Vec<ResolveError>)
    where
        N: TypeBearing + ?Sized,
    {
        match self.classify(node, at) {
            Ok(classification) => self.check_nested(&classification, errors),
            Err(error) => errors.push(error),
        }
    }

    // References are not followed: their targets are checked as declarations
    // of their own, which keeps cyclic schemas finite.
    fn check_nested(&self, classification: &Classification<'a>, errors: &mut Vec<ResolveError>) {
        match classification {
            Classification::Object(object) => {
                for (property, at) in object.members() {
                    self.check_node(property, &at, errors);
                }
            }
            Classification::Array(array) => self.check_nested(&array.element, errors),
            _ => {}
        }
    }

    fn classify_kind<N>(&self, node: &'a N, kind: Kind, at: &Location) -> Result<Classification<'a>>
    where
        N: TypeBearing + ?Sized,
    {
        match kind {
            Kind::String if !node.enum_values().is_empty() => Ok(Classification::Enum(EnumClass {
                owner: at.clone(),
                values: node.enum_values().iter().map(|v| v.as_str()).unique().collect(),
            })),
            Kind::Object => Ok(object_or_opaque(node.properties(), at)),
            Kind::Array => Ok(Classification::Array(ArrayClass {
                element: Box::new(self.resolve_array_element(node, at)?),
                bounds: node.array_bounds(),
            })),
            Kind::String => Ok(Classification::Primitive(PrimitiveKind::String)),
            Kind::Integer => Ok(Classification::Primitive(PrimitiveKind::Integer)),
            Kind::Number => Ok(Classification::Primitive(PrimitiveKind::Number)),
            Kind::Boolean => Ok(Classification::Primitive(PrimitiveKind::Boolean)),
            Kind::Any => Ok(Classification::Primitive(PrimitiveKind::Any)),
        }
    }
}

fn object_or_opaque<'a>(properties: &'a [Property], at: &Location) -> Classification<'a> {
    if properties.is_empty() {
        Classification::OpaqueObject
    } else {
        Classification::Object(ObjectClass {
            location: at.clone(),
            properties,
        })
    }
}

fn describe<N: TypeBearing + ?Sized>(node: &N) -> String {
    match (node.kind(), node.reference()) {
        (Some(kind), _) => kind.to_string(),
        (None, Some(reference)) => format!("$ref `{}`", reference),
        (None, None) => "untyped node".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use protogen_schema::ApiRoot;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn registry(types: serde_json::Value) -> Registry {
        let root = ApiRoot::from_value(json!({
            "version": {"major": "1", "minor": "3"},
            "domains": [{"domain": "Test", "types": types}]
        }))
        .unwrap();
        Registry::build(root).unwrap()
    }

    fn classify_type(registry: &Registry, id: &str) -> Result<String> {
        let resolver = TypeResolver::new(registry);
        let handle = registry.type_def("Test", id).unwrap();
        resolver.classify_target(handle).map(|c| c.to_string())
    }

    #[rstest]
    #[case(json!({"id": "T", "type": "string"}), "string")]
    #[case(json!({"id": "T", "type": "integer"}), "integer")]
    #[case(json!({"id": "T", "type": "number"}), "number")]
    #[case(json!({"id": "T", "type": "boolean"}), "boolean")]
    #[case(json!({"id": "T", "type": "any"}), "any")]
    #[case(json!({"id": "T", "type": "string", "enum": ["a", "b", "a"]}), r#"enum("a", "b")"#)]
    #[case(json!({"id": "T", "type": "string", "enum": []}), "string")]
    #[case(json!({"id": "T", "type": "object"}), "object")]
    #[case(json!({"id": "T", "type": "object", "properties": [{"name": "x", "type": "number"}]}), "{x}")]
    #[case(json!({"id": "T", "type": "array", "items": {"type": "array", "items": {"type": "integer"}}}), "[[integer]]")]
    #[case(json!({"id": "T", "type": "array", "items": {}}), "[object]")]
    #[case(json!({"id": "T", "type": "array", "items": {"properties": [{"name": "y", "type": "string"}]}}), "[{y}]")]
    #[case(json!({"id": "T", "$ref": "Base"}), "Test.Base")]
    fn test_classify_type(#[case] def: serde_json::Value, #[case] expected: &str) {
        let registry = registry(json!([def, {"id": "Base", "type": "integer"}]));
        assert_eq!(classify_type(&registry, "T").unwrap(), expected);
    }

    #[test]
    fn test_array_without_items_is_malformed() {
        let registry = registry(json!([{"id": "T", "type": "array"}]));

        match classify_type(&registry, "T") {
            Err(ResolveError::MalformedArray { role, location }) => {
                assert_eq!(role, NodeRole::TypeDef);
                assert_eq!(location, Location::of_type("Test", "T"));
            }
            other => panic!("expected malformed array, got {:?}", other),
        }
    }

    #[test]
    fn test_type_without_kind_is_missing_type() {
        let registry = registry(json!([{"id": "T"}]));
        assert!(matches!(
            classify_type(&registry, "T"),
            Err(ResolveError::MissingType { role: NodeRole::TypeDef, .. })
        ));
    }

    #[test]
    fn test_resolve_array_element_rejects_non_array() {
        let registry = registry(json!([{"id": "T", "type": "string"}]));
        let resolver = TypeResolver::new(&registry);
        let handle = registry.type_def("Test", "T").unwrap();

        assert!(matches!(
            resolver.resolve_array_element(handle.def, &handle.location()),
            Err(ResolveError::Mismatch { expected: "array", .. })
        ));
    }

    #[test]
    fn test_resolve_reference_rejects_inline_kind() {
        let registry = registry(json!([{"id": "T", "type": "object", "properties": [{"name": "p", "type": "integer"}]}]));
        let resolver = TypeResolver::new(&registry);
        let handle = registry.type_def("Test", "T").unwrap();
        let property = &handle.def.properties[0];

        assert!(matches!(
            resolver.resolve_reference(property, &handle.location().member("p")),
            Err(ResolveError::Mismatch { expected: "$ref", .. })
        ));
    }

    #[test]
    fn test_enum_records_owner() {
        let registry = registry(json!([{"id": "T", "type": "object", "properties": [
            {"name": "mode", "type": "string", "enum": ["on", "off"]}
        ]}]));
        let resolver = TypeResolver::new(&registry);
        let handle = registry.type_def("Test", "T").unwrap();
        let at = handle.location().member("mode");

        match resolver.classify(&handle.def.properties[0], &at).unwrap() {
            Classification::Enum(class) => {
                assert_eq!(class.owner.qualified_path(), "Test.T.mode");
                assert_eq!(class.values, vec!["on", "off"]);
            }
            other => panic!("expected enum, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_through_trait_object() {
        let registry = registry(json!([{"id": "T", "type": "boolean"}]));
        let resolver = TypeResolver::new(&registry);
        let handle = registry.type_def("Test", "T").unwrap();
        let node: &dyn TypeBearing = handle.def;

        assert_eq!(
            resolver.classify(node, &handle.location()).unwrap(),
            Classification::Primitive(PrimitiveKind::Boolean)
        );
    }
}
