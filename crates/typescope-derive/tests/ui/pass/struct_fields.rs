use typescope::{Classifier, Describe, TypeRegistry};

/// A person on the payroll
#[derive(Describe)]
struct Employee {
    id: u64,
    #[describe(rename = "fullName")]
    name: String,
    nickname: Option<String>,
    #[describe(transient)]
    cache_key: String,
    #[describe(skip)]
    password_hash: String,
}

fn main() {
    let descriptor = Employee::descriptor();
    assert_eq!(descriptor.classifier(), Classifier::Class);
    assert!(descriptor.qualified_name().ends_with("::Employee"));

    let mut registry = TypeRegistry::new();
    Employee::register(&mut registry);

    let definition = registry.get(descriptor.qualified_name()).unwrap();
    assert_eq!(definition.properties.len(), 5);
    assert_eq!(definition.description.as_deref(), Some("A person on the payroll"));
    assert_eq!(definition.properties[1].attributes.rename.as_deref(), Some("fullName"));
    assert!(definition.properties[2].ty.is_nullable());
    assert!(definition.properties[3].attributes.transient);
    assert!(!definition.properties[4].is_public());
}
