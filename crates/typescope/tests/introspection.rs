//! End-to-end resolution of derived types.

use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, HashMap, HashSet};
use typescope::{
    ApiType, Describe, NamedSchema, PrimitiveSchema, ResolveError, Resolver, ResolverConfig,
    SchemaNode, Severity, TypeRegistry,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("typescope=debug")
        .try_init();
}

/// Someone on the payroll
#[derive(Describe)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub age: u8,
    pub department: Option<Department>,
}

#[derive(Describe)]
pub struct Department {
    pub code: String,
    pub head: Option<Box<Employee>>,
}

#[derive(Describe)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Describe)]
pub struct Container<A, B> {
    pub first: A,
    pub second: B,
}

#[derive(Describe)]
pub struct Inner<T> {
    pub value: T,
}

#[derive(Describe)]
pub struct Outer<T> {
    pub value: T,
    pub inner: Inner<Department>,
}

#[derive(Describe)]
pub struct Node {
    pub label: String,
    pub next: Option<Box<Node>>,
}

#[derive(Describe)]
pub enum Color {
    Red,
    Green,
    Blue,
}

#[derive(Describe)]
pub enum Priority {
    Low,
    High,
}

#[derive(Describe)]
pub struct Tag {
    pub label: String,
}

/// Holds a map that strict key checking rejects
#[derive(Describe)]
pub struct Ledger {
    pub id: u64,
    pub owner: Employee,
    pub entries: BTreeMap<u64, String>,
}

fn property_names(resolver: &Resolver, schema: &NamedSchema) -> Vec<String> {
    resolver
        .dereference(schema)
        .and_then(|cached| cached.node.properties())
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default()
}

fn snapshot(resolver: &Resolver) -> Vec<(String, String, SchemaNode)> {
    resolver
        .schemas()
        .map(|s| (s.name.clone(), s.identity.clone(), s.node.clone()))
        .collect()
}

#[test]
fn test_generic_instantiation_names() {
    init_tracing();
    let mut resolver = Resolver::new(TypeRegistry::new());

    let page = resolver.introspect_type::<Page<Employee>>().unwrap();
    let container = resolver
        .introspect_type::<Container<Employee, Department>>()
        .unwrap();
    let nested = resolver.introspect_type::<Page<Vec<Employee>>>().unwrap();

    assert_eq!(page.name, "PageOfEmployee");
    assert_eq!(container.name, "ContainerOfEmployeeOfDepartment");
    assert_eq!(nested.name, "PageOfArrayOfEmployee");
    assert_eq!(resolver.conflicts().count(), 0);
}

#[test]
fn test_property_declaration_order() {
    let mut resolver = Resolver::new(TypeRegistry::new());

    let schema = resolver.introspect_type::<Employee>().unwrap();

    assert_eq!(
        property_names(&resolver, &schema),
        vec!["id", "name", "age", "department"]
    );
}

#[test]
fn test_cycles_terminate() {
    let mut resolver = Resolver::new(TypeRegistry::new());

    let node = resolver.introspect_type::<Node>().unwrap();
    resolver.introspect_type::<Employee>().unwrap();

    let cached = resolver.dereference(&node).unwrap();
    assert_eq!(
        cached.node.properties().unwrap()["next"].schema,
        node.node
    );

    let department = resolver
        .schemas()
        .find(|s| s.name == "Department")
        .unwrap();
    assert_eq!(
        department.node.properties().unwrap()["head"].schema.target(),
        Some("Employee")
    );
    assert_eq!(resolver.schemas().count(), 3);
}

#[test]
fn test_binding_isolation() {
    let mut resolver = Resolver::new(TypeRegistry::new());

    let outer = resolver.introspect_type::<Outer<Employee>>().unwrap();

    let props = resolver.dereference(&outer).unwrap().node.properties().unwrap();
    assert_eq!(props["value"].schema.target(), Some("Employee"));
    assert_eq!(props["inner"].schema.target(), Some("InnerOfDepartment"));

    let inner = resolver
        .schemas()
        .find(|s| s.name == "InnerOfDepartment")
        .unwrap();
    assert_eq!(
        inner.node.properties().unwrap()["value"].schema.target(),
        Some("Department")
    );
}

#[test]
fn test_map_with_integer_key_documents_value_only() {
    let mut resolver = Resolver::new(TypeRegistry::new());

    let schema = resolver
        .introspect_type::<HashMap<i32, String>>()
        .unwrap();

    assert_eq!(
        schema.node,
        SchemaNode::MapOf {
            value: Box::new(SchemaNode::Primitive(PrimitiveSchema::new(ApiType::String)))
        }
    );
    let warnings: Vec<_> = resolver
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_strict_map_keys_abort() {
    let config = ResolverConfig::new().with_strict_map_keys(true);
    let mut resolver = Resolver::with_config(TypeRegistry::new(), config);

    let err = resolver
        .introspect_type::<BTreeMap<u64, Employee>>()
        .unwrap_err();

    assert!(matches!(err, ResolveError::NonStringMapKey { .. }));
}

#[test]
fn test_enum_is_stable_across_uses() {
    let mut resolver = Resolver::new(TypeRegistry::new());

    let first = resolver.introspect_type::<Color>().unwrap();
    let in_list = resolver.introspect_type::<Vec<Color>>().unwrap();
    let in_set = resolver.introspect_type::<HashSet<Color>>().unwrap();

    let expected = first.node.clone();
    match (&in_list.node, &in_set.node) {
        (
            SchemaNode::ArrayOf { items: a, .. },
            SchemaNode::ArrayOf { items: b, unique_items: true },
        ) => {
            assert_eq!(**a, expected);
            assert_eq!(**b, expected);
        }
        other => panic!("unexpected nodes: {:?}", other),
    }
    assert_eq!(
        resolver.dereference(&first).unwrap().node,
        SchemaNode::Enum {
            values: vec!["Red".into(), "Green".into(), "Blue".into()]
        }
    );
    assert_eq!(resolver.schemas().count(), 1);
}

#[test]
fn test_resolution_is_deterministic() {
    let run = || {
        let mut resolver = Resolver::new(TypeRegistry::new());
        resolver.introspect_type::<Page<Employee>>().unwrap();
        resolver.introspect_type::<Container<Color, Node>>().unwrap();
        resolver.introspect_type::<Outer<Vec<Department>>>().unwrap();
        snapshot(&resolver)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_reset_matches_fresh_resolver() {
    let mut reused = Resolver::new(TypeRegistry::new());
    reused.introspect_type::<Node>().unwrap();
    reused.introspect_type::<HashMap<i32, String>>().unwrap();
    reused.reset();
    reused.introspect_type::<Page<Employee>>().unwrap();

    let mut fresh = Resolver::new(TypeRegistry::new());
    fresh.introspect_type::<Page<Employee>>().unwrap();

    assert_eq!(snapshot(&reused), snapshot(&fresh));
    assert!(reused.diagnostics().is_empty());
}

#[test]
fn test_custom_mapping_takes_precedence() {
    let id = Employee::descriptor();
    let config = ResolverConfig::new().with_custom_mapping(
        id.qualified_name(),
        PrimitiveSchema::new(ApiType::String).with_pattern("^E[0-9]+$"),
    );
    let mut resolver = Resolver::with_config(TypeRegistry::new(), config);

    let page = resolver.introspect_type::<Page<Employee>>().unwrap();

    let props = resolver.dereference(&page).unwrap().node.properties().unwrap();
    match &props["items"].schema {
        SchemaNode::ArrayOf { items, .. } => match items.as_ref() {
            SchemaNode::Primitive(p) => assert_eq!(p.pattern.as_deref(), Some("^E[0-9]+$")),
            other => panic!("expected primitive, got {:?}", other),
        },
        other => panic!("expected array, got {:?}", other),
    }
    assert!(resolver.schemas().all(|s| s.name != "Employee"));
}

#[test]
fn test_instantiations_register_their_own_arguments() {
    init_tracing();
    let mut resolver = Resolver::new(TypeRegistry::new());

    resolver.introspect_type::<Page<Employee>>().unwrap();
    resolver.introspect_type::<Page<Priority>>().unwrap();
    let tags = resolver.introspect_type::<Page<Tag>>().unwrap();

    assert_eq!(
        resolver
            .schema(&Priority::descriptor().identity())
            .unwrap()
            .node,
        SchemaNode::Enum {
            values: vec!["Low".into(), "High".into()]
        }
    );
    let props = resolver.dereference(&tags).unwrap().node.properties().unwrap();
    match &props["items"].schema {
        SchemaNode::ArrayOf { items, .. } => assert_eq!(items.target(), Some("Tag")),
        other => panic!("expected array, got {:?}", other),
    }
    let tag = resolver.schema(&Tag::descriptor().identity()).unwrap();
    assert_eq!(
        tag.node.properties().unwrap().keys().collect::<Vec<_>>(),
        vec!["label"]
    );
    assert!(resolver.diagnostics().is_empty());
}

#[test]
fn test_nullable_argument_makes_property_nullable() {
    let mut resolver = Resolver::new(TypeRegistry::new());

    let nullable = resolver.introspect_type::<Inner<Option<Employee>>>().unwrap();
    let plain = resolver.introspect_type::<Inner<Employee>>().unwrap();

    assert_eq!(nullable.name, "InnerOfNullableEmployee");
    assert_eq!(plain.name, "InnerOfEmployee");

    let value = &resolver.dereference(&nullable).unwrap().node.properties().unwrap()["value"];
    assert!(value.nullable);
    assert!(!value.required);

    let value = &resolver.dereference(&plain).unwrap().node.properties().unwrap()["value"];
    assert!(!value.nullable);
    assert!(value.required);

    let schemas = typescope::ComponentExporter::default()
        .schemas(resolver.schemas())
        .unwrap();
    assert!(schemas["InnerOfNullableEmployee"].get("required").is_none());
    assert_eq!(
        schemas["InnerOfNullableEmployee"]["properties"]["value"]["nullable"],
        serde_json::Value::Bool(true)
    );
    assert_eq!(resolver.conflicts().count(), 0);
}

#[test]
fn test_failed_type_is_not_cached() {
    let config = ResolverConfig::new().with_strict_map_keys(true);
    let mut resolver = Resolver::with_config(TypeRegistry::new(), config);

    for _ in 0..2 {
        let err = resolver.introspect_type::<Ledger>().unwrap_err();
        assert!(matches!(err, ResolveError::NonStringMapKey { .. }));
        assert!(!resolver.is_cached(&Ledger::descriptor()));
        assert_eq!(resolver.schemas().count(), 0);
    }

    resolver.introspect_type::<Employee>().unwrap();
    assert_eq!(
        resolver.schemas().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["Employee", "Department"]
    );
}
