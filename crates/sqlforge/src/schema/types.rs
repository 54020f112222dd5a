//! Column type descriptors and value conversion.

use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Dialect-independent semantic SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Decimal { precision: u8, scale: u8 },
    Varchar(u32),
    Char(u32),
    Text,
    Boolean,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Uuid,
    Binary,
    Json,
}

impl SqlType {
    /// ANSI base type name. Dialects override individual names.
    pub fn base_name(&self) -> String {
        match self {
            SqlType::SmallInt => "SMALLINT".to_string(),
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::BigInt => "BIGINT".to_string(),
            SqlType::Real => "REAL".to_string(),
            SqlType::Double => "DOUBLE PRECISION".to_string(),
            SqlType::Decimal { precision, scale } => format!("DECIMAL({precision}, {scale})"),
            SqlType::Varchar(n) => format!("VARCHAR({n})"),
            SqlType::Char(n) => format!("CHAR({n})"),
            SqlType::Text => "TEXT".to_string(),
            SqlType::Boolean => "BOOLEAN".to_string(),
            SqlType::Date => "DATE".to_string(),
            SqlType::Time => "TIME".to_string(),
            SqlType::Timestamp => "TIMESTAMP".to_string(),
            SqlType::TimestampTz => "TIMESTAMP WITH TIME ZONE".to_string(),
            SqlType::Uuid => "UUID".to_string(),
            SqlType::Binary => "BLOB".to_string(),
            SqlType::Json => "JSON".to_string(),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, SqlType::SmallInt | SqlType::Integer | SqlType::BigInt)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_name())
    }
}

/// Conversion between an application type and a database-bound [`Value`].
pub trait ColumnValue: Sized {
    /// Whether the type admits SQL NULL.
    const NULLABLE: bool = false;

    fn to_value(self) -> Value;

    fn from_value(value: Value) -> SqlResult<Self>;
}

/// Marker for types usable with LIKE/ILIKE operators.
pub trait TextValue: ColumnValue {}

/// Marker for types usable with arithmetic operators and SUM/AVG.
pub trait NumericValue: ColumnValue {}

macro_rules! impl_column_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ColumnValue for $ty {
                fn to_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> SqlResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(SqlError::conversion(
                            stringify!($variant),
                            other.type_name(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_column_value! {
    bool => Bool,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    Uuid => Uuid,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    serde_json::Value => Json,
}

#[cfg(feature = "rust_decimal")]
impl_column_value! {
    rust_decimal::Decimal => Decimal,
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    const NULLABLE: bool = true;

    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> SqlResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl TextValue for String {}
impl TextValue for Option<String> {}

macro_rules! impl_numeric {
    ($($ty:ty),*) => {
        $(
            impl NumericValue for $ty {}
            impl NumericValue for Option<$ty> {}
        )*
    };
}

impl_numeric!(i16, i32, i64, f32, f64);

#[cfg(feature = "rust_decimal")]
impl_numeric!(rust_decimal::Decimal);

/// Typed column descriptor: a semantic SQL type bound to an application type.
pub struct ColumnType<T> {
    sql_type: SqlType,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ColumnType<T> {
    fn clone(&self) -> Self {
        Self {
            sql_type: self.sql_type,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ColumnType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ColumnType").field(&self.sql_type).finish()
    }
}

impl<T: ColumnValue> ColumnType<T> {
    /// Bind an arbitrary SQL type to `T`.
    pub fn custom(sql_type: SqlType) -> Self {
        Self {
            sql_type,
            _marker: PhantomData,
        }
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    pub fn base_name(&self) -> String {
        self.sql_type.base_name()
    }

    /// Convert an application value into its bound form.
    pub fn to_db(&self, value: T) -> Value {
        value.to_value()
    }

    /// Convert a database value back into `T`.
    pub fn from_db(&self, value: Value) -> SqlResult<T> {
        T::from_value(value)
    }

    /// The same SQL type, admitting NULL.
    pub fn nullable(self) -> ColumnType<Option<T>> {
        ColumnType::custom(self.sql_type)
    }
}

impl ColumnType<i16> {
    pub fn small_int() -> Self {
        Self::custom(SqlType::SmallInt)
    }
}

impl ColumnType<i32> {
    pub fn integer() -> Self {
        Self::custom(SqlType::Integer)
    }
}

impl ColumnType<i64> {
    pub fn big_int() -> Self {
        Self::custom(SqlType::BigInt)
    }
}

impl ColumnType<f32> {
    pub fn real() -> Self {
        Self::custom(SqlType::Real)
    }
}

impl ColumnType<f64> {
    pub fn double() -> Self {
        Self::custom(SqlType::Double)
    }
}

#[cfg(feature = "rust_decimal")]
impl ColumnType<rust_decimal::Decimal> {
    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self::custom(SqlType::Decimal { precision, scale })
    }
}

impl ColumnType<String> {
    pub fn varchar(len: u32) -> Self {
        Self::custom(SqlType::Varchar(len))
    }

    pub fn char(len: u32) -> Self {
        Self::custom(SqlType::Char(len))
    }

    pub fn text() -> Self {
        Self::custom(SqlType::Text)
    }
}

impl ColumnType<bool> {
    pub fn boolean() -> Self {
        Self::custom(SqlType::Boolean)
    }
}

impl ColumnType<NaiveDate> {
    pub fn date() -> Self {
        Self::custom(SqlType::Date)
    }
}

impl ColumnType<NaiveTime> {
    pub fn time() -> Self {
        Self::custom(SqlType::Time)
    }
}

impl ColumnType<NaiveDateTime> {
    pub fn timestamp() -> Self {
        Self::custom(SqlType::Timestamp)
    }
}

impl ColumnType<DateTime<Utc>> {
    pub fn timestamp_tz() -> Self {
        Self::custom(SqlType::TimestampTz)
    }
}

impl ColumnType<Uuid> {
    pub fn uuid() -> Self {
        Self::custom(SqlType::Uuid)
    }
}

impl ColumnType<Vec<u8>> {
    pub fn binary() -> Self {
        Self::custom(SqlType::Binary)
    }
}

impl ColumnType<serde_json::Value> {
    pub fn json() -> Self {
        Self::custom(SqlType::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_names() {
        assert_eq!(ColumnType::varchar(255).base_name(), "VARCHAR(255)");
        assert_eq!(ColumnType::big_int().base_name(), "BIGINT");
        assert_eq!(
            ColumnType::<serde_json::Value>::json().base_name(),
            "JSON"
        );
        assert_eq!(
            SqlType::Decimal { precision: 10, scale: 2 }.base_name(),
            "DECIMAL(10, 2)"
        );
    }

    #[test]
    fn converts_both_ways() {
        let ty = ColumnType::integer();
        assert_eq!(ty.to_db(7), Value::I32(7));
        assert_eq!(ty.from_db(Value::I32(7)).unwrap(), 7);
    }

    #[test]
    fn wrong_shape_is_conversion_error() {
        let err = ColumnType::integer().from_db(Value::from("x")).unwrap_err();
        assert_eq!(
            err,
            SqlError::conversion("I32", "TEXT")
        );
    }

    #[test]
    fn nullable_accepts_null() {
        let ty = ColumnType::text().nullable();
        assert_eq!(ty.from_db(Value::Null).unwrap(), None);
        assert_eq!(ty.to_db(None), Value::Null);
        assert_eq!(
            ty.from_db(Value::from("a")).unwrap(),
            Some("a".to_string())
        );
        assert!(<Option<String> as ColumnValue>::NULLABLE);
    }
}
