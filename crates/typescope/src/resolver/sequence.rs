use super::{map_primitive, Resolver};
use crate::{
    bindings::BindingContext,
    descriptor::{Classifier, TypeDescriptor},
    error::ResolveResult,
    naming::{ARRAY_PREFIX, FALLBACK_ELEMENT},
    schema::{NamedSchema, SchemaNode},
};

impl Resolver {
    /// Resolves arrays, lists and sets into an inline `ArrayOf` node.
    ///
    /// Sequences are structural, so the result is never cached as a
    /// component. A missing element argument degrades to an empty object.
    pub(crate) fn resolve_sequence(
        &mut self,
        ty: &TypeDescriptor,
        bindings: &BindingContext,
    ) -> ResolveResult<NamedSchema> {
        let identity = ty.identity();

        if let Classifier::PrimitiveArray(kind) = ty.classifier() {
            let items = SchemaNode::Primitive(map_primitive(kind));
            return Ok(NamedSchema::new(
                format!("{}{}", ARRAY_PREFIX, kind.display_name()),
                identity,
                SchemaNode::ArrayOf {
                    items: Box::new(items),
                    unique_items: false,
                },
            ));
        }

        let unique_items = matches!(ty.classifier(), Classifier::Collection { unique: true });

        let (element_name, items) = match ty.argument(0) {
            Some(element) => {
                let element = self.resolve(element, bindings)?;
                (element.name, element.node)
            }
            None => {
                self.warn(
                    identity.clone(),
                    "sequence has no element type; using an empty object",
                );
                (FALLBACK_ELEMENT.to_string(), SchemaNode::empty_object())
            }
        };

        Ok(NamedSchema::new(
            format!("{}{}", ARRAY_PREFIX, element_name),
            identity,
            SchemaNode::ArrayOf {
                items: Box::new(items),
                unique_items,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        descriptor::{Classifier, PrimitiveKind, TypeDescriptor},
        registry::{TypeDef, TypeRegistry},
        resolver::Resolver,
        schema::{ApiType, SchemaNode},
    };

    #[test]
    fn test_list_of_objects_is_not_cached() {
        let registry = TypeRegistry::new().with(
            TypeDef::class("app::Employee")
                .field("id", TypeDescriptor::primitive(PrimitiveKind::I64)),
        );
        let mut resolver = Resolver::new(registry);

        let schema = resolver
            .introspect(&TypeDescriptor::list(TypeDescriptor::class("app::Employee")))
            .unwrap();

        assert_eq!(schema.name, "ArrayOfEmployee");
        match &schema.node {
            SchemaNode::ArrayOf { items, unique_items } => {
                assert_eq!(items.target(), Some("Employee"));
                assert!(!unique_items);
            }
            other => panic!("expected array, got {:?}", other),
        }
        let cached: Vec<_> = resolver.schemas().map(|s| s.identity.as_str()).collect();
        assert_eq!(cached, vec!["app::Employee"]);
    }

    #[test]
    fn test_primitive_array_short_circuits() {
        let mut resolver = Resolver::new(TypeRegistry::new());
        let ints = TypeDescriptor::array(TypeDescriptor::primitive(PrimitiveKind::I32));

        let schema = resolver.introspect(&ints).unwrap();

        assert_eq!(schema.name, "ArrayOfInt32");
        match schema.node {
            SchemaNode::ArrayOf { items, .. } => match *items {
                SchemaNode::Primitive(p) => assert_eq!(p.api_type, ApiType::Integer),
                other => panic!("expected primitive, got {:?}", other),
            },
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_sets_are_unique() {
        let mut resolver = Resolver::new(TypeRegistry::new());
        let tags = TypeDescriptor::set(TypeDescriptor::primitive(PrimitiveKind::String));

        let schema = resolver.introspect(&tags).unwrap();

        assert!(matches!(
            schema.node,
            SchemaNode::ArrayOf { unique_items: true, .. }
        ));
    }

    #[test]
    fn test_missing_element_falls_back_to_empty_object() {
        let mut resolver = Resolver::new(TypeRegistry::new());
        let bare = TypeDescriptor::new("alloc::vec::Vec", Classifier::Collection { unique: false });

        let schema = resolver.introspect(&bare).unwrap();

        assert_eq!(schema.name, "ArrayOfObject");
        assert_eq!(
            schema.node,
            SchemaNode::ArrayOf {
                items: Box::new(SchemaNode::empty_object()),
                unique_items: false
            }
        );
        assert_eq!(resolver.diagnostics().len(), 1);
    }
}
