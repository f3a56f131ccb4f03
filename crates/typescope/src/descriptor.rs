//! Type descriptors: the input side of the resolution engine.
//!
//! A [`TypeDescriptor`] is a value-level handle for a type. It carries the
//! qualified name, a [`Classifier`], nullability and the ordered type
//! arguments of a parameterized type. Nominal definitions (properties, enum
//! constants, declared type parameters) live in the
//! [`TypeRegistry`](crate::registry::TypeRegistry) and are looked up by
//! qualified name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in scalar kinds that map straight to schema leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    Char,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    ISize,
    U8,
    U16,
    U32,
    U64,
    U128,
    USize,
    F32,
    F64,
    BigInteger,
    BigDecimal,
    Uuid,
    Date,
    DateTime,
    Time,
    Duration,
    Uri,
    Bytes,
}

impl PrimitiveKind {
    /// Name used when the primitive takes part in a synthesized schema name,
    /// e.g. `ArrayOfInt32`.
    pub fn display_name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "String",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::Bool => "Boolean",
            PrimitiveKind::I8 => "Int8",
            PrimitiveKind::I16 => "Int16",
            PrimitiveKind::I32 => "Int32",
            PrimitiveKind::I64 => "Int64",
            PrimitiveKind::I128 => "Int128",
            PrimitiveKind::ISize => "ISize",
            PrimitiveKind::U8 => "UInt8",
            PrimitiveKind::U16 => "UInt16",
            PrimitiveKind::U32 => "UInt32",
            PrimitiveKind::U64 => "UInt64",
            PrimitiveKind::U128 => "UInt128",
            PrimitiveKind::USize => "USize",
            PrimitiveKind::F32 => "Float",
            PrimitiveKind::F64 => "Double",
            PrimitiveKind::BigInteger => "BigInteger",
            PrimitiveKind::BigDecimal => "BigDecimal",
            PrimitiveKind::Uuid => "Uuid",
            PrimitiveKind::Date => "Date",
            PrimitiveKind::DateTime => "DateTime",
            PrimitiveKind::Time => "Time",
            PrimitiveKind::Duration => "Duration",
            PrimitiveKind::Uri => "Uri",
            PrimitiveKind::Bytes => "Bytes",
        }
    }

    /// Qualified name used as the descriptor identity of the primitive.
    pub fn qualified_name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "alloc::string::String",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::I128 => "i128",
            PrimitiveKind::ISize => "isize",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::U128 => "u128",
            PrimitiveKind::USize => "usize",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
            PrimitiveKind::BigInteger => "num::BigInt",
            PrimitiveKind::BigDecimal => "num::BigDecimal",
            PrimitiveKind::Uuid => "uuid::Uuid",
            PrimitiveKind::Date => "chrono::NaiveDate",
            PrimitiveKind::DateTime => "chrono::DateTime",
            PrimitiveKind::Time => "chrono::NaiveTime",
            PrimitiveKind::Duration => "core::time::Duration",
            PrimitiveKind::Uri => "url::Url",
            PrimitiveKind::Bytes => "bytes::Bytes",
        }
    }
}

/// Shape of a type, used by the dispatcher to pick a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classifier {
    /// Scalar leaf.
    Primitive(PrimitiveKind),
    /// Native array or slice with one element-type argument.
    Array,
    /// Native array of a primitive element with no explicit argument.
    PrimitiveArray(PrimitiveKind),
    /// List- or set-like collection with one element-type argument.
    Collection { unique: bool },
    /// Associative type with key and value arguments.
    Map,
    /// Enumerated type with string constants.
    Enum,
    /// Record / struct type.
    Class,
    /// Generic type-parameter symbol, bound through a binding context.
    Parameter,
    /// The classifier could not be determined.
    Unknown,
}

/// Handle for a concrete (or partially generic) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    qualified_name: String,
    classifier: Classifier,
    nullable: bool,
    arguments: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub fn new(qualified_name: impl Into<String>, classifier: Classifier) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            classifier,
            nullable: false,
            arguments: Vec::new(),
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(kind.qualified_name(), Classifier::Primitive(kind))
    }

    /// A record type with no type arguments.
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, Classifier::Class)
    }

    /// A record type instantiated with the given arguments.
    pub fn generic(qualified_name: impl Into<String>, arguments: Vec<TypeDescriptor>) -> Self {
        Self::class(qualified_name).with_arguments(arguments)
    }

    pub fn enumeration(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, Classifier::Enum)
    }

    /// Reference to a declared type parameter such as `T`.
    pub fn param(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Classifier::Parameter)
    }

    pub fn list(element: TypeDescriptor) -> Self {
        Self::new("alloc::vec::Vec", Classifier::Collection { unique: false })
            .with_arguments(vec![element])
    }

    pub fn set(element: TypeDescriptor) -> Self {
        Self::new(
            "std::collections::HashSet",
            Classifier::Collection { unique: true },
        )
        .with_arguments(vec![element])
    }

    /// A native array. Primitive elements collapse to
    /// [`Classifier::PrimitiveArray`].
    pub fn array(element: TypeDescriptor) -> Self {
        match element.classifier {
            Classifier::Primitive(kind) if !element.nullable => {
                Self::new("array", Classifier::PrimitiveArray(kind))
            }
            _ => Self::new("array", Classifier::Array).with_arguments(vec![element]),
        }
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::new("std::collections::HashMap", Classifier::Map).with_arguments(vec![key, value])
    }

    pub fn unknown(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, Classifier::Unknown)
    }

    pub fn with_arguments(mut self, arguments: Vec<TypeDescriptor>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Marks the descriptor nullable (`Option<T>`).
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn classifier(&self) -> Classifier {
        self.classifier
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn arguments(&self) -> &[TypeDescriptor] {
        &self.arguments
    }

    pub fn argument(&self, index: usize) -> Option<&TypeDescriptor> {
        self.arguments.get(index)
    }

    pub fn is_parameterized(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// Last path segment of the qualified name. Both `::` and `.` separate
    /// segments, so `com.a.Address` and `app::models::Address` both give
    /// `Address`.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    /// Identity used as the cache key. The type's own nullability is not
    /// part of it.
    ///
    /// Parameterized types include the identities of their arguments, so
    /// `Page<Employee>` and `Page<Department>` are different entries. A
    /// nullable argument is marked with `?`, since it changes the shape of
    /// the properties it binds.
    pub fn identity(&self) -> String {
        if self.arguments.is_empty() {
            return self.qualified_name.clone();
        }
        let args = self
            .arguments
            .iter()
            .map(|arg| {
                if arg.nullable {
                    format!("{}?", arg.identity())
                } else {
                    arg.identity()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}<{}>", self.qualified_name, args)
    }

    /// True if this descriptor or any nested argument is a type parameter.
    pub fn mentions_parameters(&self) -> bool {
        self.classifier == Classifier::Parameter
            || self.arguments.iter().any(TypeDescriptor::mentions_parameters)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity())?;
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

pub(crate) fn simple_name(qualified_name: &str) -> &str {
    let raw = qualified_name
        .split('<')
        .next()
        .unwrap_or(qualified_name);
    raw.rsplit(|c| c == ':' || c == '.')
        .find(|segment| !segment.is_empty())
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name_handles_both_separators() {
        assert_eq!(TypeDescriptor::class("com.a.Address").simple_name(), "Address");
        assert_eq!(
            TypeDescriptor::class("app::models::Address").simple_name(),
            "Address"
        );
        assert_eq!(TypeDescriptor::class("Address").simple_name(), "Address");
    }

    #[test]
    fn test_identity_includes_arguments_but_not_nullability() {
        let page = TypeDescriptor::generic(
            "app::Page",
            vec![TypeDescriptor::class("app::Employee")],
        );
        assert_eq!(page.identity(), "app::Page<app::Employee>");
        assert_eq!(page.clone().nullable().identity(), page.identity());
        assert_ne!(page.clone().nullable(), page);
    }

    #[test]
    fn test_identity_marks_nullable_arguments() {
        let inner = TypeDescriptor::generic(
            "app::Inner",
            vec![TypeDescriptor::class("app::Employee").nullable()],
        );
        assert_eq!(inner.identity(), "app::Inner<app::Employee?>");
        assert_ne!(
            inner.identity(),
            TypeDescriptor::generic("app::Inner", vec![TypeDescriptor::class("app::Employee")])
                .identity()
        );
    }

    #[test]
    fn test_array_of_primitive_collapses() {
        let ints = TypeDescriptor::array(TypeDescriptor::primitive(PrimitiveKind::I32));
        assert_eq!(ints.classifier(), Classifier::PrimitiveArray(PrimitiveKind::I32));
        assert!(ints.arguments().is_empty());

        let nodes = TypeDescriptor::array(TypeDescriptor::class("app::Node"));
        assert_eq!(nodes.classifier(), Classifier::Array);
        assert_eq!(nodes.arguments().len(), 1);
    }

    #[test]
    fn test_mentions_parameters() {
        let list_of_t = TypeDescriptor::list(TypeDescriptor::param("T"));
        assert!(list_of_t.mentions_parameters());
        assert!(!TypeDescriptor::list(TypeDescriptor::class("app::Node")).mentions_parameters());
    }
}
