use serde::{Deserialize, Serialize};

/// Dialect-independent column type tags. A dialect adapter maps these to the
/// native type system of a particular database engine; this crate never emits
/// native type names.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    Boolean,

    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,

    Float32,
    Float64,
    Decimal,

    /// Fixed-length ANSI string
    Char,
    /// Variable-length ANSI string
    VarChar,
    /// Fixed-length Unicode string
    NChar,
    /// Variable-length Unicode string
    NVarChar,

    Date,
    Time,
    DateTime,

    Guid,

    /// Fixed-length byte sequence
    Binary,
    /// Variable-length byte sequence
    VarBinary,

    Json,
    Xml,
}

impl DbType {
    /// Types whose column declaration carries a size.
    pub fn is_sized(&self) -> bool {
        matches!(
            self,
            DbType::Char
                | DbType::VarChar
                | DbType::NChar
                | DbType::NVarChar
                | DbType::Binary
                | DbType::VarBinary
        )
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            DbType::Int8
                | DbType::Int16
                | DbType::Int32
                | DbType::Int64
                | DbType::UInt8
                | DbType::UInt16
                | DbType::UInt32
                | DbType::UInt64
        )
    }

    /// The variable-length counterpart of a fixed-length string/binary tag. A
    /// bound scalar value must not be padded to a fixed column width, so
    /// parameters against `Char`/`NChar`/`Binary` columns register as the
    /// variable-length form.
    pub fn to_variable_length(self) -> DbType {
        match self {
            DbType::Char => DbType::VarChar,
            DbType::NChar => DbType::NVarChar,
            DbType::Binary => DbType::VarBinary,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_length_tags_map_to_variable_length() {
        assert_eq!(DbType::Char.to_variable_length(), DbType::VarChar);
        assert_eq!(DbType::NChar.to_variable_length(), DbType::NVarChar);
        assert_eq!(DbType::Binary.to_variable_length(), DbType::VarBinary);
    }

    #[test]
    fn variable_and_scalar_tags_are_unchanged() {
        assert_eq!(DbType::NVarChar.to_variable_length(), DbType::NVarChar);
        assert_eq!(DbType::Int32.to_variable_length(), DbType::Int32);
        assert_eq!(DbType::Guid.to_variable_length(), DbType::Guid);
    }
}
