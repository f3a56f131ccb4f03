//! Schema intermediate representation produced by the resolver.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// OpenAPI data type of a primitive leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ApiType {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiType::String => "string",
            ApiType::Integer => "integer",
            ApiType::Number => "number",
            ApiType::Boolean => "boolean",
        }
    }
}

/// Leaf schema for scalar types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSchema {
    #[serde(rename = "type")]
    pub api_type: ApiType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "minLength")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "maxLength")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl PrimitiveSchema {
    pub fn new(api_type: ApiType) -> Self {
        Self {
            api_type,
            format: None,
            minimum: None,
            maximum: None,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn with_length(mut self, min: u64, max: u64) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }
}

/// A resolved schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(PrimitiveSchema),
    Enum {
        values: Vec<String>,
    },
    ArrayOf {
        items: Box<SchemaNode>,
        unique_items: bool,
    },
    /// String-keyed map; only the value schema is represented.
    MapOf {
        value: Box<SchemaNode>,
    },
    Object {
        properties: IndexMap<String, PropertySchema>,
    },
    /// Pointer to a cached named schema.
    Reference {
        target: String,
        identity: String,
    },
}

impl SchemaNode {
    /// An object with no properties, used for placeholders and fallbacks.
    pub fn empty_object() -> Self {
        SchemaNode::Object {
            properties: IndexMap::new(),
        }
    }

    pub fn reference(target: impl Into<String>, identity: impl Into<String>) -> Self {
        SchemaNode::Reference {
            target: target.into(),
            identity: identity.into(),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, SchemaNode::Reference { .. })
    }

    pub fn properties(&self) -> Option<&IndexMap<String, PropertySchema>> {
        match self {
            SchemaNode::Object { properties } => Some(properties),
            _ => None,
        }
    }

    pub fn properties_mut(&mut self) -> Option<&mut IndexMap<String, PropertySchema>> {
        match self {
            SchemaNode::Object { properties } => Some(properties),
            _ => None,
        }
    }

    /// Name of the referenced schema, if this is a reference.
    pub fn target(&self) -> Option<&str> {
        match self {
            SchemaNode::Reference { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Schema of one property inside an object, with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub schema: SchemaNode,
    pub nullable: bool,
    pub required: bool,
    /// Declared name when the property is serialized under another name.
    pub renamed_from: Option<String>,
    pub transient: bool,
    pub description: Option<String>,
}

/// A schema node with its display name, keyed by qualified identity.
///
/// Equality and hashing only look at `identity`: two types that share a
/// display name are still distinct entries.
#[derive(Debug, Clone)]
pub struct NamedSchema {
    pub name: String,
    pub identity: String,
    pub node: SchemaNode,
}

impl NamedSchema {
    pub fn new(name: impl Into<String>, identity: impl Into<String>, node: SchemaNode) -> Self {
        Self {
            name: name.into(),
            identity: identity.into(),
            node,
        }
    }

    /// Reference node pointing at this schema.
    pub fn to_reference(&self) -> SchemaNode {
        SchemaNode::reference(self.name.clone(), self.identity.clone())
    }
}

impl PartialEq for NamedSchema {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for NamedSchema {}

impl Hash for NamedSchema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}
