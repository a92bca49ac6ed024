use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::compile_error::CompileError;
use crate::schema::DbType;

use super::types::ScalarKind;

/// A runtime constant value appearing in an expression tree. The closed set of
/// shapes a bound parameter can take.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),

    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    Float32(f32),
    Float64(f64),
    Decimal(Decimal),

    String(String),
    Bytes(Bytes),
    Uuid(Uuid),

    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),

    Json(serde_json::Value),

    /// An enumerated value carried as its underlying integral value.
    Enum { value: i64, underlying: DbType },

    /// A domain primitive wrapping its underlying scalar.
    Domain(Box<SqlValue>),
}

impl SqlValue {
    pub fn enum_value(value: i64, underlying: DbType) -> Self {
        SqlValue::Enum { value, underlying }
    }

    pub fn domain(inner: SqlValue) -> Self {
        SqlValue::Domain(Box::new(inner))
    }

    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::Null => true,
            SqlValue::Domain(inner) => inner.is_null(),
            _ => false,
        }
    }

    /// Strip enum and domain wrappers down to the plain scalar that actually
    /// gets bound to the statement.
    pub fn unwrapped(&self) -> SqlValue {
        match self {
            SqlValue::Domain(inner) => inner.unwrapped(),
            SqlValue::Enum { value, underlying } => match underlying {
                DbType::Int8 => SqlValue::Int8(*value as i8),
                DbType::Int16 => SqlValue::Int16(*value as i16),
                DbType::Int32 => SqlValue::Int32(*value as i32),
                DbType::UInt8 => SqlValue::UInt8(*value as u8),
                DbType::UInt16 => SqlValue::UInt16(*value as u16),
                DbType::UInt32 => SqlValue::UInt32(*value as u32),
                DbType::UInt64 => SqlValue::UInt64(*value as u64),
                _ => SqlValue::Int64(*value),
            },
            other => other.clone(),
        }
    }

    /// Natural length of a sized value: character count for strings, byte
    /// count for byte sequences. `None` for values with no length dimension.
    pub fn natural_size(&self) -> Option<u32> {
        match self {
            SqlValue::String(s) => Some(s.chars().count() as u32),
            SqlValue::Bytes(b) => Some(b.len() as u32),
            SqlValue::Domain(inner) => inner.natural_size(),
            _ => None,
        }
    }

    /// Infer an abstract db type and size from the value's own shape. Used
    /// when no column context applies (or the value outgrows the column).
    pub fn inferred_db_type(&self) -> (DbType, Option<u32>) {
        match self {
            // NULL is emitted inline, never bound
            SqlValue::Null => (DbType::NVarChar, None),
            SqlValue::Bool(_) => (DbType::Boolean, None),
            SqlValue::Int8(_) => (DbType::Int8, None),
            SqlValue::Int16(_) => (DbType::Int16, None),
            SqlValue::Int32(_) => (DbType::Int32, None),
            SqlValue::Int64(_) => (DbType::Int64, None),
            SqlValue::UInt8(_) => (DbType::UInt8, None),
            SqlValue::UInt16(_) => (DbType::UInt16, None),
            SqlValue::UInt32(_) => (DbType::UInt32, None),
            SqlValue::UInt64(_) => (DbType::UInt64, None),
            SqlValue::Float32(_) => (DbType::Float32, None),
            SqlValue::Float64(_) => (DbType::Float64, None),
            SqlValue::Decimal(_) => (DbType::Decimal, None),
            SqlValue::String(_) => (DbType::NVarChar, self.natural_size()),
            SqlValue::Bytes(_) => (DbType::VarBinary, self.natural_size()),
            SqlValue::Uuid(_) => (DbType::Guid, None),
            SqlValue::Date(_) => (DbType::Date, None),
            SqlValue::Time(_) => (DbType::Time, None),
            SqlValue::DateTime(_) => (DbType::DateTime, None),
            SqlValue::Json(_) => (DbType::Json, None),
            SqlValue::Enum { .. } | SqlValue::Domain(_) => self.unwrapped().inferred_db_type(),
        }
    }

    /// Semantic type family, `None` for `Null`.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            SqlValue::Null => None,
            SqlValue::Bool(_) => Some(ScalarKind::Bool),
            SqlValue::Int8(_)
            | SqlValue::Int16(_)
            | SqlValue::Int32(_)
            | SqlValue::Int64(_)
            | SqlValue::UInt8(_)
            | SqlValue::UInt16(_)
            | SqlValue::UInt32(_)
            | SqlValue::UInt64(_) => Some(ScalarKind::Int),
            SqlValue::Float32(_) | SqlValue::Float64(_) => Some(ScalarKind::Float),
            SqlValue::Decimal(_) => Some(ScalarKind::Decimal),
            SqlValue::String(_) => Some(ScalarKind::Text),
            SqlValue::Bytes(_) => Some(ScalarKind::Bytes),
            SqlValue::Uuid(_) => Some(ScalarKind::Uuid),
            SqlValue::Date(_) => Some(ScalarKind::Date),
            SqlValue::Time(_) => Some(ScalarKind::Time),
            SqlValue::DateTime(_) => Some(ScalarKind::DateTime),
            SqlValue::Json(_) => Some(ScalarKind::Json),
            SqlValue::Enum { .. } => Some(ScalarKind::Enum),
            SqlValue::Domain(inner) => inner.scalar_kind(),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        SqlValue::Int16(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int32(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int64(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float64(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::String(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::String(v)
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

/// A compile-time-constant root for member-access chains: a captured variable,
/// a static value, or a nested structure of either. Chains over it fold to a
/// literal during normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedValue {
    Scalar(SqlValue),
    Composite(BTreeMap<String, CapturedValue>),
}

impl CapturedValue {
    pub fn scalar(value: impl Into<SqlValue>) -> Self {
        CapturedValue::Scalar(value.into())
    }

    pub fn composite<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, CapturedValue)>,
        K: Into<String>,
    {
        CapturedValue::Composite(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Walk a member path over the captured structure down to a scalar.
    pub fn resolve(&self, path: &[String]) -> Result<SqlValue, CompileError> {
        match (self, path) {
            (CapturedValue::Scalar(value), []) => Ok(value.clone()),
            (CapturedValue::Composite(_), []) => Err(CompileError::InvalidConstant(
                "captured chain does not end in a primitive value".to_string(),
            )),
            (CapturedValue::Composite(fields), [head, tail @ ..]) => fields
                .get(head)
                .ok_or_else(|| {
                    CompileError::InvalidConstant(format!(
                        "no member `{head}` on the captured value"
                    ))
                })?
                .resolve(tail),
            (CapturedValue::Scalar(_), [head, ..]) => Err(CompileError::InvalidConstant(format!(
                "member `{head}` accessed on a primitive captured value"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn captured_chain_resolves_nested_scalars() {
        let root = CapturedValue::composite([
            ("limit", CapturedValue::scalar(10)),
            (
                "user",
                CapturedValue::composite([("name", CapturedValue::scalar("Jo"))]),
            ),
        ]);

        assert_eq!(root.resolve(&path(&["limit"])).unwrap(), SqlValue::Int32(10));
        assert_eq!(
            root.resolve(&path(&["user", "name"])).unwrap(),
            SqlValue::String("Jo".to_string())
        );
    }

    #[test]
    fn captured_chain_failures() {
        let root = CapturedValue::composite([(
            "user",
            CapturedValue::composite::<[(&str, CapturedValue); 0], &str>([]),
        )]);

        assert!(matches!(
            root.resolve(&path(&["missing"])),
            Err(CompileError::InvalidConstant(_))
        ));
        // bottoms out in a composite, not a primitive
        assert!(matches!(
            root.resolve(&path(&["user"])),
            Err(CompileError::InvalidConstant(_))
        ));
        // member access on a scalar
        let scalar = CapturedValue::scalar(1);
        assert!(matches!(
            scalar.resolve(&path(&["anything"])),
            Err(CompileError::InvalidConstant(_))
        ));
    }

    #[test]
    fn enum_and_domain_values_unwrap_to_plain_scalars() {
        let status = SqlValue::enum_value(2, DbType::Int32);
        assert_eq!(status.unwrapped(), SqlValue::Int32(2));
        assert_eq!(status.inferred_db_type(), (DbType::Int32, None));

        let account_id = SqlValue::domain(SqlValue::Int64(77));
        assert_eq!(account_id.unwrapped(), SqlValue::Int64(77));
        assert_eq!(account_id.inferred_db_type(), (DbType::Int64, None));
    }

    #[test]
    fn natural_size_counts_characters_not_bytes() {
        let value = SqlValue::String("héllo".to_string());
        assert_eq!(value.natural_size(), Some(5));
    }
}
