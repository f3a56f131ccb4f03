use crate::{
    descriptor::PrimitiveKind,
    schema::{ApiType, PrimitiveSchema},
};

/// Maps a built-in scalar to its leaf schema.
pub fn map_primitive(kind: PrimitiveKind) -> PrimitiveSchema {
    match kind {
        // String types
        PrimitiveKind::String => PrimitiveSchema::new(ApiType::String),
        PrimitiveKind::Char => PrimitiveSchema::new(ApiType::String).with_length(1, 1),

        PrimitiveKind::Bool => PrimitiveSchema::new(ApiType::Boolean),

        // Signed integers
        PrimitiveKind::I8 | PrimitiveKind::I16 | PrimitiveKind::I32 => {
            PrimitiveSchema::new(ApiType::Integer).with_format("int32")
        }
        PrimitiveKind::I64 | PrimitiveKind::I128 | PrimitiveKind::ISize => {
            PrimitiveSchema::new(ApiType::Integer).with_format("int64")
        }

        // Unsigned integers
        PrimitiveKind::U8 | PrimitiveKind::U16 | PrimitiveKind::U32 => PrimitiveSchema::new(ApiType::Integer)
            .with_format("int32")
            .with_minimum(0.0),
        PrimitiveKind::U64 | PrimitiveKind::U128 | PrimitiveKind::USize => {
            PrimitiveSchema::new(ApiType::Integer)
                .with_format("int64")
                .with_minimum(0.0)
        }

        PrimitiveKind::F32 => PrimitiveSchema::new(ApiType::Number).with_format("float"),
        PrimitiveKind::F64 => PrimitiveSchema::new(ApiType::Number).with_format("double"),

        // Arbitrary precision
        PrimitiveKind::BigInteger => PrimitiveSchema::new(ApiType::Integer),
        PrimitiveKind::BigDecimal => PrimitiveSchema::new(ApiType::Number),

        // Formatted strings
        PrimitiveKind::Uuid => PrimitiveSchema::new(ApiType::String).with_format("uuid"),
        PrimitiveKind::Date => PrimitiveSchema::new(ApiType::String).with_format("date"),
        PrimitiveKind::DateTime => PrimitiveSchema::new(ApiType::String).with_format("date-time"),
        PrimitiveKind::Time => PrimitiveSchema::new(ApiType::String).with_format("time"),
        PrimitiveKind::Duration => PrimitiveSchema::new(ApiType::String).with_format("duration"),
        PrimitiveKind::Uri => PrimitiveSchema::new(ApiType::String).with_format("uri"),
        PrimitiveKind::Bytes => PrimitiveSchema::new(ApiType::String).with_format("byte"),
    }
}
