//! Per-property metadata extraction.
//!
//! The resolver never looks at attributes directly. It asks a
//! [`MetadataProvider`] for the serialized name, required-ness and
//! transience of each property, so hosts with their own annotation system
//! can plug it in.

use crate::registry::{PropertyDef, TypeDef};

/// Resolved metadata for a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMetadata {
    /// Name the property is serialized under.
    pub serialized_name: String,
    pub nullable: bool,
    pub required: bool,
    pub transient: bool,
    pub description: Option<String>,
}

impl PropertyMetadata {
    /// Declared name if the serialized name differs from it.
    pub fn renamed_from<'a>(&self, property: &'a PropertyDef) -> Option<&'a str> {
        (self.serialized_name != property.name).then_some(property.name.as_str())
    }
}

/// Source of property metadata.
pub trait MetadataProvider {
    fn metadata(&self, owner: &TypeDef, property: &PropertyDef) -> PropertyMetadata;
}

/// Reads the attributes declared on each [`PropertyDef`].
///
/// Required-ness follows "non-nullable means required" when
/// `required_by_default` is set. Transient and explicitly optional
/// properties are never required. An explicit `required` attribute
/// overrides everything else.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredMetadata {
    pub required_by_default: bool,
}

impl Default for DeclaredMetadata {
    fn default() -> Self {
        Self {
            required_by_default: true,
        }
    }
}

impl MetadataProvider for DeclaredMetadata {
    fn metadata(&self, _owner: &TypeDef, property: &PropertyDef) -> PropertyMetadata {
        let attributes = &property.attributes;
        let nullable = property.ty.is_nullable();
        let implied = self.required_by_default
            && !nullable
            && !attributes.transient
            && !attributes.optional;

        PropertyMetadata {
            serialized_name: attributes
                .rename
                .clone()
                .unwrap_or_else(|| property.name.clone()),
            nullable,
            required: attributes.required.unwrap_or(implied),
            transient: attributes.transient,
            description: attributes.description.clone(),
        }
    }
}
