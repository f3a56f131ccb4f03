use super::Resolver;
use crate::{
    bindings::BindingContext,
    descriptor::{Classifier, PrimitiveKind, TypeDescriptor},
    error::{ResolveError, ResolveResult},
    naming::{FALLBACK_ELEMENT, MAP_PREFIX},
    schema::{NamedSchema, SchemaNode},
};
use tracing::debug;

fn is_string_key(key: &TypeDescriptor) -> bool {
    key.classifier() == Classifier::Primitive(PrimitiveKind::String)
}

impl Resolver {
    /// Resolves a string-keyed map into an inline `MapOf` node.
    ///
    /// OpenAPI cannot express non-string keys, so a non-string key is
    /// recorded as a warning and only the value type is documented, unless
    /// `strict_map_keys` is set.
    pub(crate) fn resolve_map(
        &mut self,
        ty: &TypeDescriptor,
        bindings: &BindingContext,
    ) -> ResolveResult<NamedSchema> {
        let identity = ty.identity();

        match ty.argument(0) {
            Some(key) if !is_string_key(key) => {
                if self.config.strict_map_keys {
                    self.record_error(
                        identity.clone(),
                        format!("map key type {} is not a string", key.identity()),
                    );
                    return Err(ResolveError::non_string_map_key(&identity, key.identity()));
                }
                self.warn(
                    identity.clone(),
                    format!(
                        "map key type {} is not a string; only the value type is documented",
                        key.identity()
                    ),
                );
            }
            Some(_) => {}
            None => debug!("Map {} has no key type information", identity),
        }

        let (value_name, value) = match ty.argument(1) {
            Some(value) => {
                let value = self.resolve(value, bindings)?;
                (value.name, value.node)
            }
            None => {
                self.warn(
                    identity.clone(),
                    "map has no value type; using an empty object",
                );
                (FALLBACK_ELEMENT.to_string(), SchemaNode::empty_object())
            }
        };

        Ok(NamedSchema::new(
            format!("{}{}", MAP_PREFIX, value_name),
            identity,
            SchemaNode::MapOf {
                value: Box::new(value),
            },
        ))
    }
}
