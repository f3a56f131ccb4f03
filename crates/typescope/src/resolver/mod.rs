/*!
The traversal dispatcher and the resolvers it routes to.

[`Resolver`] is one schema-generation pass. It owns the registry, the
identity-keyed schema cache, the in-flight cycle guard, the conflict
detector and the recorded diagnostics. Every resolver recurses back through
[`Resolver::resolve`], so the classification order below applies at every
depth of the type graph.
*/

mod enums;
mod generic;
mod map;
mod object;
mod primitive;
mod sequence;

pub use primitive::map_primitive;

use crate::{
    arena::{SchemaArena, SchemaId},
    bindings::BindingContext,
    config::ResolverConfig,
    conflicts::{ConflictDetector, ConflictRecord},
    describe::Describe,
    descriptor::{Classifier, TypeDescriptor},
    diagnostics::Diagnostic,
    error::ResolveResult,
    metadata::{DeclaredMetadata, MetadataProvider},
    naming,
    registry::TypeRegistry,
    schema::{NamedSchema, SchemaNode},
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// One schema-generation pass over a set of registered types.
pub struct Resolver {
    registry: TypeRegistry,
    config: ResolverConfig,
    metadata: Box<dyn MetadataProvider>,
    cache: SchemaArena,
    in_flight: HashSet<String>,
    conflicts: ConflictDetector,
    diagnostics: Vec<Diagnostic>,
    depth: usize,
}

impl Resolver {
    /// Create a resolver with the default configuration
    pub fn new(registry: TypeRegistry) -> Self {
        Self::with_config(registry, ResolverConfig::default())
    }

    pub fn with_config(registry: TypeRegistry, config: ResolverConfig) -> Self {
        let metadata = DeclaredMetadata {
            required_by_default: config.required_by_default,
        };
        Self {
            registry,
            config,
            metadata: Box::new(metadata),
            cache: SchemaArena::new(),
            in_flight: HashSet::new(),
            conflicts: ConflictDetector::new(),
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    /// Replace the source of per-property metadata
    pub fn with_metadata_provider(mut self, provider: impl MetadataProvider + 'static) -> Self {
        self.metadata = Box::new(provider);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Resolves a top-level type and runs conflict detection on the result.
    ///
    /// This is the entry point for route, parameter and body registration
    /// code. Each call is self-contained; calls may come in any order.
    pub fn introspect(&mut self, ty: &TypeDescriptor) -> ResolveResult<NamedSchema> {
        let first_new = self.cache.len();
        let schema = self.resolve(ty, &BindingContext::empty())?;

        self.conflicts.analyze(&schema, self.cache.iter());
        for fresh in self.cache.iter_from(first_new) {
            self.conflicts.analyze(fresh, self.cache.iter());
        }

        debug!(
            "Introspected {} as '{}' ({} cached schema(s))",
            ty,
            schema.name,
            self.cache.len()
        );
        Ok(schema)
    }

    /// Registers `T` and everything it mentions, then introspects it.
    pub fn introspect_type<T: Describe + ?Sized>(&mut self) -> ResolveResult<NamedSchema> {
        T::register(&mut self.registry);
        self.introspect(&T::descriptor())
    }

    /// Classifies `ty` and routes it to the matching resolver.
    ///
    /// Order matters because the checks overlap: arrays before collections,
    /// collections and maps before generics, and anything with type
    /// arguments before plain objects.
    pub fn resolve(
        &mut self,
        ty: &TypeDescriptor,
        bindings: &BindingContext,
    ) -> ResolveResult<NamedSchema> {
        let ty = bindings.substitute(ty);

        if let Some(schema) = self.custom_mapping(&ty) {
            return Ok(schema);
        }

        if self.depth >= self.config.max_depth {
            self.warn(
                ty.identity(),
                format!("nesting exceeds {} levels; type left unresolved", self.config.max_depth),
            );
            return Ok(self.resolve_unknown(&ty));
        }

        self.depth += 1;
        let result = self.dispatch(&ty, bindings);
        self.depth -= 1;
        result
    }

    fn dispatch(
        &mut self,
        ty: &TypeDescriptor,
        bindings: &BindingContext,
    ) -> ResolveResult<NamedSchema> {
        match ty.classifier() {
            Classifier::Array | Classifier::PrimitiveArray(_) => {
                self.resolve_sequence(ty, bindings)
            }
            Classifier::Collection { .. } => self.resolve_sequence(ty, bindings),
            Classifier::Map => self.resolve_map(ty, bindings),
            Classifier::Enum => Ok(self.resolve_enum(ty)),
            Classifier::Parameter => {
                self.warn(
                    ty.identity(),
                    "type parameter is not bound in the current scope",
                );
                Ok(self.resolve_unknown(ty))
            }
            Classifier::Unknown => {
                self.warn(ty.identity(), "cannot determine the kind of this type");
                Ok(self.resolve_unknown(ty))
            }
            _ if ty.is_parameterized() => self.resolve_generic(ty, bindings),
            Classifier::Primitive(_) | Classifier::Class => self.resolve_object(ty, bindings),
        }
    }

    /// Best-effort empty object under `Unknown_<name>`. Never cached.
    pub(crate) fn resolve_unknown(&self, ty: &TypeDescriptor) -> NamedSchema {
        let name = naming::unknown_name(ty, &self.config.unknown_prefix);
        NamedSchema::new(name, ty.identity(), SchemaNode::empty_object())
    }

    fn custom_mapping(&self, ty: &TypeDescriptor) -> Option<NamedSchema> {
        let identity = ty.identity();
        let schema = self
            .config
            .custom_mappings
            .get(&identity)
            .or_else(|| self.config.custom_mappings.get(ty.qualified_name()))?;
        Some(NamedSchema::new(
            ty.simple_name(),
            identity,
            SchemaNode::Primitive(schema.clone()),
        ))
    }

    /// Display name of `ty` under this resolver's naming settings.
    pub(crate) fn display_name(&self, ty: &TypeDescriptor) -> String {
        naming::display_name(ty, &self.config.unknown_prefix)
    }

    pub(crate) fn warn(&mut self, identity: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic::warning(identity, message);
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn record_error(&mut self, identity: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic::error(identity, message);
        tracing::error!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// True once `ty`'s identity has a slot, placeholder or complete.
    pub fn is_cached(&self, ty: &TypeDescriptor) -> bool {
        self.cache.contains(&ty.identity())
    }

    /// Inserts or overwrites a named schema. Never fails.
    pub fn add_to_cache(&mut self, schema: NamedSchema) -> SchemaId {
        self.cache.insert(schema)
    }

    /// All named schemas of this pass, in the order they were first cached.
    pub fn schemas(&self) -> impl Iterator<Item = &NamedSchema> {
        self.cache.iter()
    }

    pub fn schema(&self, identity: &str) -> Option<&NamedSchema> {
        self.cache.get_by_identity(identity)
    }

    /// The cached schema a reference points at, if `schema` is a reference.
    pub fn dereference(&self, schema: &NamedSchema) -> Option<&NamedSchema> {
        match &schema.node {
            SchemaNode::Reference { identity, .. } => self.cache.get_by_identity(identity),
            _ => None,
        }
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ConflictRecord> {
        self.conflicts.records()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Clears cache, in-flight set, conflicts and diagnostics. The registry
    /// and configuration are kept.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.in_flight.clear();
        self.conflicts.clear();
        self.diagnostics.clear();
        self.depth = 0;
    }
}
