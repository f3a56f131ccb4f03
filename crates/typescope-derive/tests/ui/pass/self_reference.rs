use typescope::{Describe, TypeRegistry};

#[derive(Describe)]
struct Category {
    name: String,
    parent: Option<Box<Category>>,
    children: Vec<Category>,
}

#[derive(Describe)]
struct Tree<T> {
    value: T,
    children: Vec<Tree<T>>,
}

fn main() {
    let mut registry = TypeRegistry::new();
    Category::register(&mut registry);
    <Tree<String>>::register(&mut registry);

    assert_eq!(registry.len(), 2);
}
