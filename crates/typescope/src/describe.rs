/*!
The [`Describe`] trait and its implementations for standard types.

Record and enum types get their implementation from `#[derive(Describe)]`;
this module covers scalars, std containers and the optional `uuid`,
`chrono` and `url` types.
*/

use crate::{
    descriptor::{Classifier, PrimitiveKind, TypeDescriptor},
    registry::TypeRegistry,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Types that can describe themselves to the resolver
pub trait Describe {
    /// Descriptor for this concrete type
    fn descriptor() -> TypeDescriptor;

    /// Record the definitions of this type and every type it mentions
    fn register(_registry: &mut TypeRegistry) {}
}

/// Stand-in for a generic parameter while `#[derive(Describe)]` builds the
/// descriptor of a field such as `Vec<T>`. Never instantiated.
#[doc(hidden)]
pub enum TypeParam {}

impl Describe for TypeParam {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::param("_")
    }
}

macro_rules! describe_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::primitive(PrimitiveKind::$kind)
                }
            }
        )*
    };
}

describe_primitive! {
    String => String,
    str => String,
    char => Char,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => ISize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => USize,
    f32 => F32,
    f64 => F64,
    std::time::Duration => Duration,
    std::path::PathBuf => String,
}

#[cfg(feature = "uuid")]
describe_primitive! {
    uuid::Uuid => Uuid,
}

#[cfg(feature = "chrono")]
describe_primitive! {
    chrono::NaiveDate => Date,
    chrono::NaiveTime => Time,
    chrono::NaiveDateTime => DateTime,
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::primitive(PrimitiveKind::DateTime)
    }
}

#[cfg(feature = "url")]
describe_primitive! {
    url::Url => Uri,
}

impl<T: Describe> Describe for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor().nullable()
    }

    fn register(registry: &mut TypeRegistry) {
        T::register(registry);
    }
}

macro_rules! describe_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $wrapper<T> {
                fn descriptor() -> TypeDescriptor {
                    T::descriptor()
                }

                fn register(registry: &mut TypeRegistry) {
                    T::register(registry);
                }
            }
        )*
    };
}

describe_transparent!(Box, Arc, Rc);

impl<T: Describe + ?Sized> Describe for &T {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }

    fn register(registry: &mut TypeRegistry) {
        T::register(registry);
    }
}

macro_rules! describe_sequence {
    ($($ty:ident => $name:literal, unique = $unique:literal);* $(;)?) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::new($name, Classifier::Collection { unique: $unique })
                        .with_arguments(vec![T::descriptor()])
                }

                fn register(registry: &mut TypeRegistry) {
                    T::register(registry);
                }
            }
        )*
    };
}

describe_sequence! {
    Vec => "alloc::vec::Vec", unique = false;
    VecDeque => "alloc::collections::VecDeque", unique = false;
    LinkedList => "alloc::collections::LinkedList", unique = false;
    BTreeSet => "alloc::collections::BTreeSet", unique = true;
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }

    fn register(registry: &mut TypeRegistry) {
        T::register(registry);
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::descriptor(), V::descriptor())
    }

    fn register(registry: &mut TypeRegistry) {
        K::register(registry);
        V::register(registry);
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new("alloc::collections::BTreeMap", Classifier::Map)
            .with_arguments(vec![K::descriptor(), V::descriptor()])
    }

    fn register(registry: &mut TypeRegistry) {
        K::register(registry);
        V::register(registry);
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn register(registry: &mut TypeRegistry) {
        T::register(registry);
    }
}

impl<T: Describe> Describe for [T] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn register(registry: &mut TypeRegistry) {
        T::register(registry);
    }
}
