#[cfg(test)]
pub mod fixtures {
    use crate::{
        descriptor::{PrimitiveKind, TypeDescriptor},
        registry::{PropertyDef, TypeDef, TypeRegistry},
    };

    pub fn employee() -> TypeDescriptor {
        TypeDescriptor::class("app::Employee")
    }

    pub fn department() -> TypeDescriptor {
        TypeDescriptor::class("app::Department")
    }

    pub fn node() -> TypeDescriptor {
        TypeDescriptor::class("app::Node")
    }

    /// A small company model with one- and two-parameter generics
    pub fn company_registry() -> TypeRegistry {
        let t = || TypeDescriptor::param("T");

        TypeRegistry::new()
            .with(
                TypeDef::class("app::Employee")
                    .field("id", TypeDescriptor::primitive(PrimitiveKind::I64))
                    .field("name", TypeDescriptor::primitive(PrimitiveKind::String))
                    .field("department", department().nullable()),
            )
            .with(
                TypeDef::class("app::Department")
                    .field("code", TypeDescriptor::primitive(PrimitiveKind::String))
                    .property(
                        PropertyDef::new("budget", TypeDescriptor::primitive(PrimitiveKind::BigDecimal))
                            .private(),
                    ),
            )
            .with(
                TypeDef::class("app::Page")
                    .type_param("T")
                    .field("items", TypeDescriptor::list(t()))
                    .field("total", TypeDescriptor::primitive(PrimitiveKind::U64)),
            )
            .with(
                TypeDef::class("app::Container")
                    .type_param("A")
                    .type_param("B")
                    .field("first", TypeDescriptor::param("A"))
                    .field("second", TypeDescriptor::param("B")),
            )
            .with(
                TypeDef::class("app::Outer")
                    .type_param("T")
                    .field("value", t())
                    .field(
                        "inner",
                        TypeDescriptor::generic("app::Inner", vec![department()]),
                    ),
            )
            .with(TypeDef::class("app::Inner").type_param("T").field("value", t()))
    }

    /// A singly linked node that points at itself
    pub fn node_registry() -> TypeRegistry {
        TypeRegistry::new().with(
            TypeDef::class("app::Node")
                .field("label", TypeDescriptor::primitive(PrimitiveKind::String))
                .field("next", node().nullable()),
        )
    }
}
