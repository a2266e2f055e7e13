//! Runtime values produced by string -> value conversion
//!
//! `Value` is the typed form of one cell. Backends hand the converter strings;
//! the converter hands consumers `Value`s, and takes them back when writing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Layout used for values that carry a time-of-day. Fractional seconds are
/// printed only when non-zero.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Layout used for date-only values
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Binary floating point number
    Float(f64),
    /// Arbitrary precision decimal
    Decimal(Decimal),
    /// Character data
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time without an offset
    DateTime(NaiveDateTime),
    /// Date and time with a UTC offset
    Timestamp(DateTime<FixedOffset>),
    /// Ordered list, possibly nested
    Array(Vec<Value>),
    /// Nullable container carrying a validity flag
    Nullable(NullableValue),
}

impl Value {
    /// Check if this value is absent (`Null` or an invalid nullable container)
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Nullable(inner) => !inner.is_valid(),
            _ => false,
        }
    }

    /// Short name of the variant, used in error messages
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Timestamp(_) => "timestamp",
            Self::Array(_) => "array",
            Self::Nullable(inner) => inner.kind_name(),
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Nullable(NullableValue::Bool(b)) => *b,
            _ => None,
        }
    }

    /// Try to get as signed integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UInt(u) => i64::try_from(*u).ok(),
            Self::Nullable(NullableValue::Int(i)) => *i,
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Nullable(NullableValue::Float(f)) => *f,
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Nullable(NullableValue::Text(s)) => s.as_deref(),
            _ => None,
        }
    }

    /// Construct a text value
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Construct a list value
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(items.into_iter().collect())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::UInt(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(ts: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<NullableValue> for Value {
    fn from(inner: NullableValue) -> Self {
        Self::Nullable(inner)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

/// A typed container that is either valid (holds a value) or invalid (NULL).
///
/// Nullable columns convert into one of these shapes so consumers can tell a
/// NULL apart from a valid zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum NullableValue {
    /// Nullable integer
    Int(Option<i64>),
    /// Nullable float
    Float(Option<f64>),
    /// Nullable boolean
    Bool(Option<bool>),
    /// Nullable date/time
    Time(Option<NaiveDateTime>),
    /// Nullable string, also used for every category without its own shape
    Text(Option<String>),
}

impl NullableValue {
    /// Check if the container holds a value
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Int(v) => v.is_some(),
            Self::Float(v) => v.is_some(),
            Self::Bool(v) => v.is_some(),
            Self::Time(v) => v.is_some(),
            Self::Text(v) => v.is_some(),
        }
    }

    /// Short name of the container shape
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "nullable int",
            Self::Float(_) => "nullable float",
            Self::Bool(_) => "nullable bool",
            Self::Time(_) => "nullable time",
            Self::Text(_) => "nullable text",
        }
    }

    /// Unwrap into a plain value, mapping an invalid container to `Value::Null`
    pub fn into_value(self) -> Value {
        match self {
            Self::Int(v) => v.into(),
            Self::Float(v) => v.into(),
            Self::Bool(v) => v.into(),
            Self::Time(v) => v.into(),
            Self::Text(v) => v.into(),
        }
    }
}

/// Render a date/time, dropping the time-of-day when it is exactly midnight.
pub fn format_time(dt: &NaiveDateTime) -> String {
    if dt.time().num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
        dt.format(DATE_FORMAT).to_string()
    } else {
        dt.format(DATETIME_FORMAT).to_string()
    }
}
