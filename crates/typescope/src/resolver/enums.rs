use super::Resolver;
use crate::{
    descriptor::TypeDescriptor,
    schema::{NamedSchema, SchemaNode},
};
use tracing::debug;

impl Resolver {
    /// Caches the `Enum` node for `ty` once and always returns a reference
    /// to it, so enums are emitted as shared components and never inlined.
    pub(crate) fn resolve_enum(&mut self, ty: &TypeDescriptor) -> NamedSchema {
        let identity = ty.identity();
        let name = self.display_name(ty);

        if self.cache.contains(&identity) {
            debug!("Enum {} already cached", identity);
        } else {
            let values = match self.registry.get(ty.qualified_name()) {
                Some(definition) => definition.constants.clone(),
                None => {
                    self.warn(identity.clone(), "enum is not registered; no constants known");
                    Vec::new()
                }
            };
            if values.is_empty() {
                self.warn(identity.clone(), "enum has no constants");
            }
            self.cache.insert(NamedSchema::new(
                name.clone(),
                identity.clone(),
                SchemaNode::Enum { values },
            ));
        }

        let reference = SchemaNode::reference(name.clone(), identity.clone());
        NamedSchema::new(name, identity, reference)
    }
}
