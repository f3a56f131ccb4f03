/*!
Rendering of resolved schemas into OpenAPI 3.0 `components/schemas`.

Objects keep their property order, references become `$ref` pointers
under the configured prefix, transient properties are left out and the
`required` list is built from property metadata.
*/

use crate::{
    config::{ExportConfig, ExportFormat},
    error::ExportResult,
    schema::{NamedSchema, PropertySchema, SchemaNode},
};
use serde_json::{json, Map, Value};
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};
use tracing::{debug, warn};

/// Renders named schemas as OpenAPI components
#[derive(Debug, Clone, Default)]
pub struct ComponentExporter {
    config: ExportConfig,
}

impl ComponentExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The `schemas` map, keyed by display name.
    ///
    /// When two identities share a display name the first one keeps it and
    /// the later one is exported under a name derived from its identity.
    /// References follow the identity, so they always point at the right
    /// component. The conflict detector still reports the clash.
    pub fn schemas<'a, I>(&self, schemas: I) -> ExportResult<Map<String, Value>>
    where
        I: IntoIterator<Item = &'a NamedSchema>,
    {
        let schemas: Vec<&NamedSchema> = schemas.into_iter().collect();
        let names = component_names(&schemas);

        let mut rendered = Map::new();
        for schema in schemas {
            let name = names
                .get(&schema.identity)
                .cloned()
                .unwrap_or_else(|| schema.name.clone());
            rendered.insert(name, self.render(&schema.node, &names)?);
        }
        debug!("Rendered {} component schema(s)", rendered.len());
        Ok(rendered)
    }

    /// A full `{ "components": { "schemas": ... } }` document fragment
    pub fn components<'a, I>(&self, schemas: I) -> ExportResult<Value>
    where
        I: IntoIterator<Item = &'a NamedSchema>,
    {
        Ok(json!({ "components": { "schemas": self.schemas(schemas)? } }))
    }

    /// Renders a single node, e.g. a top-level request body schema.
    pub fn node(&self, node: &SchemaNode) -> ExportResult<Value> {
        self.render(node, &HashMap::new())
    }

    fn render(&self, node: &SchemaNode, names: &ComponentNames) -> ExportResult<Value> {
        let value = match node {
            SchemaNode::Primitive(primitive) => serde_json::to_value(primitive)?,
            SchemaNode::Enum { values } => json!({ "type": "string", "enum": values }),
            SchemaNode::ArrayOf {
                items,
                unique_items,
            } => {
                let mut array = json!({ "type": "array", "items": self.render(items, names)? });
                if *unique_items {
                    array["uniqueItems"] = Value::Bool(true);
                }
                array
            }
            SchemaNode::MapOf { value } => {
                json!({ "type": "object", "additionalProperties": self.render(value, names)? })
            }
            SchemaNode::Object { properties } => {
                let mut rendered = Map::new();
                let mut required = Vec::new();
                for (name, property) in properties {
                    if property.transient {
                        continue;
                    }
                    if property.required {
                        required.push(Value::String(name.clone()));
                    }
                    rendered.insert(name.clone(), self.property(property, names)?);
                }

                let mut object = Map::new();
                object.insert("type".to_string(), json!("object"));
                object.insert("properties".to_string(), Value::Object(rendered));
                if !required.is_empty() {
                    object.insert("required".to_string(), Value::Array(required));
                }
                Value::Object(object)
            }
            SchemaNode::Reference { target, identity } => {
                self.reference(resolve_name(names, target, identity))
            }
        };
        Ok(value)
    }

    fn reference(&self, target: &str) -> Value {
        json!({ "$ref": format!("{}{}", self.config.reference_prefix, target) })
    }

    /// `$ref` cannot carry siblings in OpenAPI 3.0, so a nullable or
    /// described reference is wrapped in `allOf`.
    fn property(&self, property: &PropertySchema, names: &ComponentNames) -> ExportResult<Value> {
        let decorated = property.nullable || property.description.is_some();
        let mut value = match &property.schema {
            SchemaNode::Reference { target, identity } if decorated => {
                json!({ "allOf": [self.reference(resolve_name(names, target, identity))] })
            }
            other => self.render(other, names)?,
        };

        if let Value::Object(map) = &mut value {
            if property.nullable {
                map.insert("nullable".to_string(), Value::Bool(true));
            }
            if let Some(description) = &property.description {
                map.insert("description".to_string(), json!(description));
            }
        }
        Ok(value)
    }

    /// Serialize components to JSON, pretty printed if configured
    pub fn to_json<'a, I>(&self, schemas: I) -> ExportResult<String>
    where
        I: IntoIterator<Item = &'a NamedSchema>,
    {
        let document = self.components(schemas)?;
        if self.config.pretty_print {
            Ok(serde_json::to_string_pretty(&document)?)
        } else {
            Ok(serde_json::to_string(&document)?)
        }
    }

    pub fn to_yaml<'a, I>(&self, schemas: I) -> ExportResult<String>
    where
        I: IntoIterator<Item = &'a NamedSchema>,
    {
        Ok(serde_yaml::to_string(&self.components(schemas)?)?)
    }

    /// Write components to `path` in the configured format
    pub fn write_to<'a, I, P>(&self, schemas: I, path: P) -> ExportResult<()>
    where
        I: IntoIterator<Item = &'a NamedSchema>,
        P: AsRef<Path>,
    {
        let content = match self.config.format {
            ExportFormat::Json => self.to_json(schemas)?,
            ExportFormat::Yaml => self.to_yaml(schemas)?,
        };
        std::fs::write(path.as_ref(), content)?;
        debug!("Components written to {}", path.as_ref().display());
        Ok(())
    }
}

/// Component name per identity.
type ComponentNames = HashMap<String, String>;

/// Assigns every identity a unique component name, first come first served.
fn component_names(schemas: &[&NamedSchema]) -> ComponentNames {
    let mut taken = HashSet::new();
    let mut names = HashMap::new();
    for schema in schemas {
        let mut name = schema.name.clone();
        if !taken.insert(name.clone()) {
            let base = identity_name(&schema.identity);
            name = base.clone();
            let mut suffix = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            warn!(
                "Name '{}' is already taken; exporting {} as '{}'",
                schema.name, schema.identity, name
            );
        }
        names.insert(schema.identity.clone(), name);
    }
    names
}

/// `shipping::Address` becomes `shipping_Address`.
fn identity_name(identity: &str) -> String {
    identity
        .split(|c: char| !c.is_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn resolve_name<'a>(names: &'a ComponentNames, target: &'a str, identity: &str) -> &'a str {
    names.get(identity).map(String::as_str).unwrap_or(target)
}
