use std::collections::HashMap;
use typescope::{Classifier, Describe, TypeDescriptor, TypeRegistry};

#[derive(Describe)]
struct Employee {
    id: u64,
}

#[derive(Describe)]
struct Department {
    code: String,
}

#[derive(Describe)]
struct Page<T> {
    items: Vec<T>,
    by_id: HashMap<String, T>,
    first: Option<Box<T>>,
    total: u64,
}

fn main() {
    let descriptor = <Page<Employee>>::descriptor();
    assert_eq!(descriptor.arguments().len(), 1);
    assert_eq!(descriptor.argument(0), Some(&Employee::descriptor()));

    let mut registry = TypeRegistry::new();
    <Page<Employee>>::register(&mut registry);
    assert!(registry.contains(Employee::descriptor().qualified_name()));

    let page = registry.get(descriptor.qualified_name()).unwrap();
    assert_eq!(page.type_params, vec!["T".to_string()]);

    let items = &page.properties[0].ty;
    assert_eq!(items.classifier(), Classifier::Collection { unique: false });
    assert_eq!(items.argument(0), Some(&TypeDescriptor::param("T")));

    let by_id = &page.properties[1].ty;
    assert_eq!(by_id.classifier(), Classifier::Map);
    assert_eq!(by_id.argument(1), Some(&TypeDescriptor::param("T")));

    let first = &page.properties[2].ty;
    assert!(first.is_nullable());
    assert_eq!(first.classifier(), Classifier::Parameter);

    // a second instantiation still registers its own argument
    <Page<Department>>::register(&mut registry);
    assert!(registry.contains(Department::descriptor().qualified_name()));
}
