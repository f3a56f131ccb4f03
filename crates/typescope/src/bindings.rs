//! Type-parameter binding contexts.

use crate::descriptor::{Classifier, TypeDescriptor};
use indexmap::IndexMap;

/// Active mapping from type-parameter symbols to concrete descriptors.
///
/// Contexts are immutable once built: a nested generic scope gets a new
/// context from [`BindingContext::scoped`] and the outer one is left as is,
/// so two unrelated generics that both call their parameter `T` never see
/// each other's bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingContext {
    bindings: IndexMap<String, TypeDescriptor>,
}

impl BindingContext {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zips declared symbols with concrete arguments, positionally.
    ///
    /// Callers check arity first; extra symbols or arguments are ignored.
    pub fn from_pairs<'a, I>(symbols: I, arguments: &[TypeDescriptor]) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let bindings = symbols
            .into_iter()
            .cloned()
            .zip(arguments.iter().cloned())
            .collect();
        Self { bindings }
    }

    /// `self ∪ local`, with `local` winning on key collisions.
    pub fn scoped(&self, local: &BindingContext) -> BindingContext {
        let mut bindings = self.bindings.clone();
        for (symbol, ty) in &local.bindings {
            bindings.insert(symbol.clone(), ty.clone());
        }
        BindingContext { bindings }
    }

    pub fn get(&self, symbol: &str) -> Option<&TypeDescriptor> {
        self.bindings.get(symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Symbols in binding order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Replaces every bound parameter inside `ty`, recursively.
    ///
    /// A bound parameter keeps the nullability of the use site, so `Option<T>`
    /// with `T = Employee` becomes a nullable `Employee`. Unbound parameters
    /// are left untouched for the dispatcher to report.
    pub fn substitute(&self, ty: &TypeDescriptor) -> TypeDescriptor {
        if ty.classifier() == Classifier::Parameter {
            return match self.bindings.get(ty.qualified_name()) {
                Some(bound) => bound
                    .clone()
                    .with_nullable(bound.is_nullable() || ty.is_nullable()),
                None => ty.clone(),
            };
        }
        if !ty.is_parameterized() || self.bindings.is_empty() {
            return ty.clone();
        }
        let arguments = ty.arguments().iter().map(|arg| self.substitute(arg)).collect();
        ty.clone().with_arguments(arguments)
    }
}
