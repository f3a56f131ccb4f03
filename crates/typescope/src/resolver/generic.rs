use super::Resolver;
use crate::{
    bindings::BindingContext,
    descriptor::{Classifier, TypeDescriptor},
    error::{ResolveError, ResolveResult},
    schema::{NamedSchema, SchemaNode},
};
use tracing::debug;

impl Resolver {
    /// Resolves a parameterized record such as `Page<Employee>` into a
    /// cached object named `PageOfEmployee`.
    ///
    /// The placeholder goes into the cache before any property is resolved,
    /// so self- and mutually-referential generics terminate. Properties are
    /// resolved under `outer ∪ local` bindings; the outer context is never
    /// modified.
    pub(crate) fn resolve_generic(
        &mut self,
        ty: &TypeDescriptor,
        bindings: &BindingContext,
    ) -> ResolveResult<NamedSchema> {
        let identity = ty.identity();
        let name = self.display_name(ty);

        if self.cache.contains(&identity) {
            debug!("Generic {} already cached as '{}'", identity, name);
            return Ok(reference(name, identity));
        }

        let Some(definition) = self.registry.get(ty.qualified_name()).cloned() else {
            self.warn(identity, "generic type is not registered");
            return Ok(self.resolve_unknown(ty));
        };

        if definition.classifier == Classifier::Enum {
            return Ok(self.resolve_enum(ty));
        }

        let expected = definition.type_params.len();
        let found = ty.arguments().len();
        if expected != found {
            self.record_error(
                identity.clone(),
                format!("expected {} type argument(s), found {}", expected, found),
            );
            return Err(ResolveError::arity_mismatch(identity, expected, found));
        }

        let id = self.cache.insert_placeholder(&name, &identity);
        debug!("Placeholder for {} allocated at {:?}", identity, id);

        let local = BindingContext::from_pairs(&definition.type_params, ty.arguments());
        let effective = bindings.scoped(&local);

        self.in_flight.insert(identity.clone());
        let result = self.resolve_properties(&definition, id, &identity, &effective);
        self.in_flight.remove(&identity);
        if result.is_err() {
            debug!("Discarding partial schema for {}", identity);
            self.cache.rollback_to(id);
        }
        result?;

        Ok(reference(name, identity))
    }
}

fn reference(name: String, identity: String) -> NamedSchema {
    let node = SchemaNode::reference(name.clone(), identity.clone());
    NamedSchema::new(name, identity, node)
}
