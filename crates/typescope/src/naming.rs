//! Deterministic display names for resolved types.

use crate::descriptor::{Classifier, TypeDescriptor};

pub const ARRAY_PREFIX: &str = "ArrayOf";
pub const MAP_PREFIX: &str = "MapOf";
pub const GENERIC_SEPARATOR: &str = "Of";
/// Marks a nullable type argument, as in `InnerOfNullableEmployee`.
pub const NULLABLE_PREFIX: &str = "Nullable";
/// Element name used when a sequence or map has no usable argument.
pub const FALLBACK_ELEMENT: &str = "Object";

/// Display name of a descriptor, matching the name its resolver produces.
///
/// `unknown_prefix` is prepended to types whose classifier cannot be
/// determined.
pub fn display_name(ty: &TypeDescriptor, unknown_prefix: &str) -> String {
    match ty.classifier() {
        Classifier::Primitive(kind) => kind.display_name().to_string(),
        Classifier::PrimitiveArray(kind) => format!("{}{}", ARRAY_PREFIX, kind.display_name()),
        Classifier::Array | Classifier::Collection { .. } => {
            sequence_name(ty.argument(0), unknown_prefix)
        }
        Classifier::Map => map_name(ty.argument(1), unknown_prefix),
        Classifier::Enum | Classifier::Class => generic_name(ty, unknown_prefix),
        Classifier::Parameter => ty.qualified_name().to_string(),
        Classifier::Unknown => unknown_name(ty, unknown_prefix),
    }
}

/// `ArrayOf<Element>`.
pub fn sequence_name(element: Option<&TypeDescriptor>, unknown_prefix: &str) -> String {
    let element = element
        .map(|e| display_name(e, unknown_prefix))
        .unwrap_or_else(|| FALLBACK_ELEMENT.to_string());
    format!("{}{}", ARRAY_PREFIX, element)
}

/// `MapOf<Value>`.
pub fn map_name(value: Option<&TypeDescriptor>, unknown_prefix: &str) -> String {
    let value = value
        .map(|v| display_name(v, unknown_prefix))
        .unwrap_or_else(|| FALLBACK_ELEMENT.to_string());
    format!("{}{}", MAP_PREFIX, value)
}

/// `<Raw>Of<Arg1>Of<Arg2>...`, or the simple name when there are no arguments.
pub fn generic_name(ty: &TypeDescriptor, unknown_prefix: &str) -> String {
    let mut name = ty.simple_name().to_string();
    for argument in ty.arguments() {
        name.push_str(GENERIC_SEPARATOR);
        if argument.is_nullable() {
            name.push_str(NULLABLE_PREFIX);
        }
        name.push_str(&display_name(argument, unknown_prefix));
    }
    name
}

pub fn unknown_name(ty: &TypeDescriptor, unknown_prefix: &str) -> String {
    format!("{}{}", unknown_prefix, ty.simple_name())
}
