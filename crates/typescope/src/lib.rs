/*!
# typescope

Type introspection that turns Rust type descriptions into an OpenAPI schema
model.

Types describe themselves through [`Describe`] (usually derived), their
definitions land in a [`TypeRegistry`], and a [`Resolver`] walks the type
graph to produce named, deduplicated schemas that can be exported as
OpenAPI 3.0 `components/schemas`.

## Features

- Primitive, enum, sequence, map, record and generic type resolution
- Deterministic names for generic instantiations (`PageOfEmployee`)
- Cycle-safe traversal of self- and mutually-referential types
- Detection of distinct types that share a display name
- JSON and YAML export of component schemas

## Usage

```rust,no_run
use typescope::{ComponentExporter, Describe, Resolver, TypeRegistry};

#[derive(Describe)]
struct Employee {
    id: u64,
    name: String,
}

#[derive(Describe)]
struct Page<T> {
    items: Vec<T>,
    total: u64,
}

let mut resolver = Resolver::new(TypeRegistry::new());
let page = resolver.introspect_type::<Page<Employee>>().unwrap();
assert_eq!(page.name, "PageOfEmployee");

let json = ComponentExporter::default().to_json(resolver.schemas()).unwrap();
println!("{}", json);
```
*/

// Re-export main types
pub use crate::{
    arena::{SchemaArena, SchemaId},
    bindings::BindingContext,
    config::{ExportConfig, ExportFormat, ResolverConfig},
    conflicts::{ConflictDetector, ConflictRecord},
    describe::Describe,
    descriptor::{Classifier, PrimitiveKind, TypeDescriptor},
    diagnostics::{Diagnostic, Severity},
    error::{ConfigError, ExportError, ExportResult, ResolveError, ResolveResult},
    export::ComponentExporter,
    metadata::{DeclaredMetadata, MetadataProvider, PropertyMetadata},
    registry::{PropertyAttributes, PropertyDef, TypeDef, TypeRegistry, Visibility},
    resolver::{map_primitive, Resolver},
    schema::{ApiType, NamedSchema, PrimitiveSchema, PropertySchema, SchemaNode},
};

// Lets derived code name `::typescope` from inside this crate
extern crate self as typescope;

// Re-export the derive macro from the proc-macro crate
pub use typescope_derive::Describe;

// Type model
pub mod descriptor;
pub mod describe;
pub mod registry;

// Schema model
pub mod arena;
pub mod schema;

// Resolution
pub mod bindings;
pub mod conflicts;
pub mod metadata;
pub mod naming;
pub mod resolver;

// Configuration and reporting
pub mod config;
pub mod diagnostics;
pub mod error;

// Export functionality
pub mod export;

// Test utilities
#[cfg(test)]
mod test_utils;
