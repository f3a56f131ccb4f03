//! Registry of nominal type definitions.
//!
//! The registry replaces runtime reflection: every record or enum type that
//! should be documented gets a [`TypeDef`] here, either by hand through
//! [`TypeDef::class`] / [`TypeDef::enumeration`] or through
//! `#[derive(Describe)]`.

use crate::descriptor::{Classifier, TypeDescriptor};
use indexmap::IndexMap;

/// Whether a property is visible to schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Declared per-property attributes, the language-neutral equivalent of
/// serialization annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyAttributes {
    /// Serialized name, if it differs from the declared one.
    pub rename: Option<String>,
    /// Excluded from serialization.
    pub transient: bool,
    /// Never required, even when non-nullable.
    pub optional: bool,
    /// Explicit required-ness, overriding every default rule.
    pub required: Option<bool>,
    pub description: Option<String>,
}

/// One declared property of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: String,
    pub ty: TypeDescriptor,
    pub visibility: Visibility,
    pub attributes: PropertyAttributes,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            attributes: PropertyAttributes::default(),
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.attributes.rename = Some(name.into());
        self
    }

    pub fn transient(mut self) -> Self {
        self.attributes.transient = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attributes.optional = true;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.attributes.required = Some(required);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.attributes.description = Some(description.into());
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Definition of a record or enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub qualified_name: String,
    pub classifier: Classifier,
    /// Declared type-parameter symbols, in declaration order.
    pub type_params: Vec<String>,
    /// Declared properties, in declaration order.
    pub properties: Vec<PropertyDef>,
    /// Enum constants, in declaration order.
    pub constants: Vec<String>,
    /// Direct ancestors, nearest first.
    pub supertypes: Vec<TypeDescriptor>,
    pub description: Option<String>,
}

impl TypeDef {
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            classifier: Classifier::Class,
            type_params: Vec::new(),
            properties: Vec::new(),
            constants: Vec::new(),
            supertypes: Vec::new(),
            description: None,
        }
    }

    pub fn enumeration<I, S>(qualified_name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classifier: Classifier::Enum,
            constants: constants.into_iter().map(Into::into).collect(),
            ..Self::class(qualified_name)
        }
    }

    pub fn type_param(mut self, symbol: impl Into<String>) -> Self {
        self.type_params.push(symbol.into());
        self
    }

    pub fn property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Shorthand for a public property with default attributes.
    pub fn field(self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.property(PropertyDef::new(name, ty))
    }

    pub fn extends(mut self, supertype: TypeDescriptor) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Descriptor for this definition without type arguments.
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::new(self.qualified_name.clone(), self.classifier)
    }
}

/// Definitions keyed by qualified name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    definitions: IndexMap<String, TypeDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a definition.
    pub fn register(&mut self, definition: TypeDef) -> &mut Self {
        self.definitions
            .insert(definition.qualified_name.clone(), definition);
        self
    }

    pub fn with(mut self, definition: TypeDef) -> Self {
        self.register(definition);
        self
    }

    pub fn get(&self, qualified_name: &str) -> Option<&TypeDef> {
        self.definitions.get(qualified_name)
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.definitions.contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TypeDef> {
        self.definitions.values()
    }

    /// Merges every definition of `other` into this registry.
    pub fn extend(&mut self, other: TypeRegistry) {
        self.definitions.extend(other.definitions);
    }
}
