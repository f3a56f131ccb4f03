use super::{map_primitive, Resolver};
use crate::{
    arena::SchemaId,
    bindings::BindingContext,
    descriptor::{Classifier, TypeDescriptor},
    error::{ResolveError, ResolveResult},
    registry::{PropertyDef, TypeDef},
    schema::{NamedSchema, PropertySchema, SchemaNode},
};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// A definition whose properties are resolved under a fixed binding context.
struct PropertyScope {
    definition: TypeDef,
    bindings: BindingContext,
}

impl Resolver {
    /// Resolves primitives inline and record types into cached objects.
    ///
    /// Record types go through the cycle guard: an identity that is already
    /// in flight or cached comes back as a reference straight away.
    pub(crate) fn resolve_object(
        &mut self,
        ty: &TypeDescriptor,
        bindings: &BindingContext,
    ) -> ResolveResult<NamedSchema> {
        if let Classifier::Primitive(kind) = ty.classifier() {
            return Ok(NamedSchema::new(
                kind.display_name(),
                ty.identity(),
                SchemaNode::Primitive(map_primitive(kind)),
            ));
        }

        let identity = ty.identity();
        let name = self.display_name(ty);

        if self.in_flight.contains(&identity) {
            debug!("Cycle detected at {}; emitting reference", identity);
            return Ok(reference(name, identity));
        }
        if self.cache.contains(&identity) {
            debug!("Object {} already cached", identity);
            return Ok(reference(name, identity));
        }

        let Some(definition) = self.registry.get(ty.qualified_name()).cloned() else {
            self.warn(identity, "type is not registered");
            return Ok(self.resolve_unknown(ty));
        };

        if definition.classifier == Classifier::Enum {
            return Ok(self.resolve_enum(ty));
        }

        self.in_flight.insert(identity.clone());
        let id = self.cache.insert_placeholder(&name, &identity);
        let result = self.resolve_properties(&definition, id, &identity, bindings);
        self.in_flight.remove(&identity);
        if result.is_err() {
            debug!("Discarding partial schema for {}", identity);
            self.cache.rollback_to(id);
        }
        result?;

        Ok(reference(name, identity))
    }

    /// Resolves the public properties of `definition` and its ancestors and
    /// writes them into the cached object at `id`, in place.
    pub(crate) fn resolve_properties(
        &mut self,
        definition: &TypeDef,
        id: SchemaId,
        identity: &str,
        bindings: &BindingContext,
    ) -> ResolveResult<()> {
        let scopes = self.property_scopes(definition, identity, bindings)?;
        let mut written = 0usize;

        for scope in &scopes {
            for property in scope.definition.properties.iter().filter(|p| p.is_public()) {
                let bound = PropertyDef {
                    ty: scope.bindings.substitute(&property.ty),
                    ..property.clone()
                };
                let meta = self.metadata.metadata(&scope.definition, &bound);
                let resolved = self.resolve(&bound.ty, &scope.bindings)?;

                let schema = PropertySchema {
                    schema: resolved.node,
                    nullable: meta.nullable,
                    required: meta.required,
                    renamed_from: meta.renamed_from(property).map(str::to_string),
                    transient: meta.transient,
                    description: meta.description.clone(),
                };

                if self.cache.put_property(id, meta.serialized_name.clone(), schema) {
                    written += 1;
                } else {
                    debug!(
                        "Property '{}' of {} shadowed by an earlier declaration",
                        meta.serialized_name, scope.definition.qualified_name
                    );
                }
            }
        }

        if written == 0 {
            self.warn(identity.to_string(), "type has no public properties");
        }
        Ok(())
    }

    /// The definition itself followed by its ancestors, one level at a time.
    ///
    /// Ancestors that were already visited are skipped, so malformed
    /// hierarchies with loops still terminate. Generic ancestors get their
    /// own scope with their arguments bound.
    fn property_scopes(
        &mut self,
        definition: &TypeDef,
        identity: &str,
        bindings: &BindingContext,
    ) -> ResolveResult<Vec<PropertyScope>> {
        let mut visited = HashSet::new();
        visited.insert(definition.qualified_name.clone());

        let mut queue = VecDeque::new();
        queue.push_back(PropertyScope {
            definition: definition.clone(),
            bindings: bindings.clone(),
        });

        let mut scopes = Vec::new();
        while let Some(scope) = queue.pop_front() {
            for supertype in &scope.definition.supertypes {
                let supertype = scope.bindings.substitute(supertype);
                if !visited.insert(supertype.qualified_name().to_string()) {
                    debug!("Ancestor {} already visited", supertype.qualified_name());
                    continue;
                }

                let Some(parent) = self.registry.get(supertype.qualified_name()).cloned() else {
                    self.warn(
                        identity.to_string(),
                        format!("ancestor {} is not registered", supertype.identity()),
                    );
                    continue;
                };

                let expected = parent.type_params.len();
                let found = supertype.arguments().len();
                if expected != found {
                    self.record_error(
                        supertype.identity(),
                        format!("expected {} type argument(s), found {}", expected, found),
                    );
                    return Err(ResolveError::arity_mismatch(
                        supertype.identity(),
                        expected,
                        found,
                    ));
                }

                let local = BindingContext::from_pairs(&parent.type_params, supertype.arguments());
                queue.push_back(PropertyScope {
                    bindings: scope.bindings.scoped(&local),
                    definition: parent,
                });
            }
            scopes.push(scope);
        }

        Ok(scopes)
    }
}

fn reference(name: String, identity: String) -> NamedSchema {
    let node = SchemaNode::reference(name.clone(), identity.clone());
    NamedSchema::new(name, identity, node)
}
