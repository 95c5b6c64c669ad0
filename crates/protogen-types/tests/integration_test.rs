//! Integration tests for the type resolver

use protogen_schema::{ApiRoot, Location, Registry, TypeBearing};
use protogen_types::{Classification, EnumClass, PrimitiveKind, ResolveError, TypeResolver};
use rstest::{fixture, rstest};
use serde_json::json;

/// Helper to build a registry from a list of domains
fn build(domains: serde_json::Value) -> Registry {
    let root = ApiRoot::from_value(json!({"version": {"major": "1", "minor": "3"}, "domains": domains})).unwrap();
    Registry::build(root).unwrap()
}

#[fixture]
fn protocol() -> Registry {
    build(json!([
        {
            "domain": "Network",
            "types": [
                {"id": "Cookie", "type": "object", "properties": [
                    {"name": "name", "type": "string"},
                    {"name": "value", "type": "string"},
                    {"name": "sameSite", "$ref": "CookieSameSite", "optional": true}
                ]},
                {"id": "CookieSameSite", "type": "string", "enum": ["Strict", "Lax", "None"]},
                {"id": "Headers", "type": "object"}
            ],
            "events": [
                {"name": "responseReceived", "parameters": [{"name": "headers", "$ref": "Headers"}]}
            ]
        },
        {
            "domain": "Page",
            "dependencies": ["Network"],
            "types": [
                {"id": "Foo", "type": "object"},
                {"id": "Frame", "type": "object", "properties": [
                    {"name": "parent", "$ref": "Frame", "optional": true},
                    {"name": "extra", "$ref": "Foo"}
                ]}
            ],
            "commands": [
                {"name": "getCookies", "returns": [
                    {"name": "cookies", "type": "array", "items": {"$ref": "Network.Cookie"}}
                ]},
                {"name": "navigate", "parameters": [
                    {"name": "url", "type": "string"},
                    {"name": "transitionType", "type": "string", "enum": ["link", "typed"], "optional": true}
                ]}
            ]
        }
    ]))
}

#[rstest]
fn test_array_of_cross_domain_reference(protocol: Registry) {
    let resolver = TypeResolver::new(&protocol);
    let command = protocol.domain("Page").and_then(|d| d.command("getCookies")).unwrap();
    let at = Location::of_command("Page", "getCookies").member("returns").member("cookies");

    let classification = resolver.classify(&command.returns[0], &at).unwrap();

    let element = classification.element().expect("array must carry its element");
    let target = element.target().expect("element must be a reference");
    assert_eq!(target.qualified_name(), "Network.Cookie");
    assert_eq!(target.def.properties.len(), 3);
}

#[rstest]
fn test_opaque_object_for_every_consumer(protocol: Registry) {
    let resolver = TypeResolver::new(&protocol);

    let foo = protocol.type_def("Page", "Foo").unwrap();
    assert_eq!(resolver.classify_target(foo).unwrap(), Classification::OpaqueObject);

    let frame = protocol.type_def("Page", "Frame").unwrap();
    let extra = &frame.def.properties[1];
    assert_eq!(
        resolver.classify(extra, &frame.location().member("extra")).unwrap(),
        Classification::OpaqueObject
    );

    let event = protocol.domain("Network").and_then(|d| d.event("responseReceived")).unwrap();
    let headers = &event.parameters[0];
    let at = Location::of_event("Network", "responseReceived").member("parameters").member("headers");
    assert!(resolver.classify(headers, &at).unwrap().is_opaque_object());
}

#[test]
fn test_both_type_and_ref_is_ambiguous() {
    let registry = build(json!([
        {"domain": "Page", "types": [
            {"id": "Bar", "type": "string"},
            {"id": "Holder", "type": "object", "properties": [{"name": "bar", "type": "string", "$ref": "Bar"}]}
        ]}
    ]));
    let resolver = TypeResolver::new(&registry);
    let holder = registry.type_def("Page", "Holder").unwrap();
    let at = holder.location().member("bar");

    match resolver.classify(&holder.def.properties[0], &at) {
        Err(ResolveError::AmbiguousType {
            reference, location, ..
        }) => {
            assert_eq!(reference, "Bar");
            assert_eq!(location, at);
        }
        other => panic!("expected ambiguous type, got {:?}", other),
    }

    let errors = resolver.check();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ResolveError::AmbiguousType { .. }));
}

#[test]
fn test_same_id_in_two_domains() {
    let registry = build(json!([
        {"domain": "A", "types": [
            {"id": "Params", "type": "object", "properties": [{"name": "a", "type": "integer"}]},
            {"id": "User", "type": "object", "properties": [{"name": "params", "$ref": "Params"}]}
        ]},
        {"domain": "B", "types": [
            {"id": "Params", "type": "object", "properties": [{"name": "b", "type": "string"}]}
        ]}
    ]));
    let resolver = TypeResolver::new(&registry);
    let user = registry.type_def("A", "User").unwrap();

    let classification = resolver
        .classify(&user.def.properties[0], &user.location().member("params"))
        .unwrap();

    let target = classification.target().unwrap();
    assert_eq!(target.qualified_name(), "A.Params");
    assert_eq!(target.def.properties[0].name, "a");
}

#[rstest]
fn test_reference_classification_is_lazy_and_idempotent(protocol: Registry) {
    let resolver = TypeResolver::new(&protocol);
    let frame = protocol.type_def("Page", "Frame").unwrap();
    let parent = &frame.def.properties[0];
    let at = frame.location().member("parent");

    let first = resolver.classify(parent, &at).unwrap();
    let second = resolver.classify(parent, &at).unwrap();
    assert_eq!(first, second);

    // Self-reference: the target is the declaring type itself.
    let target = first.target().unwrap();
    assert_eq!(target, frame);
    let expanded = resolver.classify_target(target).unwrap();
    assert!(matches!(expanded, Classification::Object(ref object) if object.properties.len() == 2));
    assert_eq!(resolver.classify_target(target).unwrap(), expanded);
}

#[rstest]
fn test_resolve_reference_propagates_lookup_error(protocol: Registry) {
    let registry = build(json!([
        {"domain": "Page", "types": [
            {"id": "Frame", "type": "object", "properties": [{"name": "loader", "$ref": "Network.LoaderId"}]}
        ]}
    ]));
    let resolver = TypeResolver::new(&registry);
    let frame = registry.type_def("Page", "Frame").unwrap();
    let at = frame.location().member("loader");

    match resolver.resolve_reference(&frame.def.properties[0], &at) {
        Err(ResolveError::Schema(protogen_schema::SchemaError::UnresolvedReference {
            reference, location, ..
        })) => {
            assert_eq!(reference, "Network.LoaderId");
            assert_eq!(location.qualified_path(), "Page.Frame.loader");
        }
        other => panic!("expected unresolved reference, got {:?}", other),
    }

    assert!(TypeResolver::new(&protocol).check().is_empty());
}

#[rstest]
fn test_enum_preserves_order(protocol: Registry) {
    let resolver = TypeResolver::new(&protocol);
    let same_site = protocol.type_def("Network", "CookieSameSite").unwrap();

    match resolver.classify_target(same_site).unwrap() {
        Classification::Enum(class) => {
            assert_eq!(class.values, vec!["Strict", "Lax", "None"]);
            assert_eq!(class.owner.qualified_owner(), "Network.CookieSameSite");
        }
        other => panic!("expected enum, got {:?}", other),
    }

    // A named enum reached through `$ref` stays a reference.
    let cookie = protocol.type_def("Network", "Cookie").unwrap();
    let reference = resolver
        .classify(&cookie.def.properties[2], &cookie.location().member("sameSite"))
        .unwrap();
    assert!(reference.is_reference());
}

#[rstest]
#[case("url", Classification::Primitive(PrimitiveKind::String))]
#[case("transitionType", Classification::Enum(EnumClass {
    owner: Location::of_command("Page", "navigate").member("parameters").member("transitionType"),
    values: vec!["link", "typed"],
}))]
fn test_command_parameters(protocol: Registry, #[case] name: &str, #[case] expected: Classification<'static>) {
    let resolver = TypeResolver::new(&protocol);
    let command = protocol.domain("Page").and_then(|d| d.command("navigate")).unwrap();
    let parameter = command.parameter(name).unwrap();
    let at = Location::of_command("Page", "navigate").member("parameters").member(name);

    assert_eq!(resolver.classify(parameter, &at).unwrap(), expected);
    assert_eq!(parameter.name(), Some(name));
}

#[rstest]
fn test_concurrent_classification(protocol: Registry) {
    let resolver = TypeResolver::new(&protocol);

    let results: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = protocol
            .domains()
            .map(|domain| {
                scope.spawn(move || {
                    domain
                        .types
                        .iter()
                        .map(|def| {
                            let at = Location::of_type(domain.name.clone(), def.id.clone());
                            resolver.classify(def, &at).unwrap().to_string()
                        })
                        .collect::<Vec<String>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![
            vec![
                "{name, value, sameSite}".to_string(),
                r#"enum("Strict", "Lax", "None")"#.to_string(),
                "object".to_string()
            ],
            vec!["object".to_string(), "{parent, extra}".to_string()],
        ]
    );
}

#[test]
fn test_mutually_recursive_types_check_cleanly() {
    let registry = build(json!([
        {"domain": "DOM", "types": [
            {"id": "Node", "type": "object", "properties": [
                {"name": "children", "type": "array", "optional": true, "items": {"$ref": "Node"}},
                {"name": "shadow", "$ref": "Shadow", "optional": true}
            ]},
            {"id": "Shadow", "type": "object", "properties": [{"name": "host", "$ref": "Node"}]}
        ]}
    ]));

    assert!(TypeResolver::new(&registry).check().is_empty());
}
