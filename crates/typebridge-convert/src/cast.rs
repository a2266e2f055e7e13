//! Lenient scalar casts
//!
//! Used by the generic fallback path, by nullable wrapping, and by the
//! built-in conversion strategies. String inputs are read the way database
//! drivers print them: `12.00` is a valid integer, `0x1F` is hex, `t` is true.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use typebridge_diagnostics::{
    ConvertError, ErrorCode, Result, TB0100, TB0101, TB0103, TB0105, TB0106,
};
use typebridge_parser::ClickHouseArrayCodec;
use typebridge_types::{
    DATE_FORMAT, NullableValue, Value, format_time, parse_bool, trim_zero_decimal,
};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f %z"];

/// Parse a signed integer, accepting `0x`/`0o`/`0b` prefixes and an all-zero fraction
pub fn parse_i64(s: &str) -> Option<i64> {
    let (negative, digits) = split_sign(trim_zero_decimal(s));
    let (radix, digits) = split_radix(digits);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Parse an unsigned integer with the same spellings as [`parse_i64`]
pub fn parse_u64(s: &str) -> Option<u64> {
    let (negative, digits) = split_sign(trim_zero_decimal(s));
    let (radix, digits) = split_radix(digits);
    if negative || digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn split_radix(s: &str) -> (u32, &str) {
    let prefix = s.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (16, &s[2..]),
        Some("0o") => (8, &s[2..]),
        Some("0b") => (2, &s[2..]),
        _ => (10, s),
    }
}

/// Parse a date/time string.
///
/// Offset-bearing input (RFC 3339 and friends) yields `Value::Timestamp`,
/// naive input yields `Value::DateTime`, and a bare date yields midnight.
pub fn parse_datetime(s: &str) -> Option<Value> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(Value::Timestamp(ts));
    }
    if let Some(ts) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::<FixedOffset>::parse_from_str(s, fmt).ok())
    {
        return Some(Value::Timestamp(ts));
    }
    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(Value::DateTime(dt));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .map(|d| Value::DateTime(d.and_time(NaiveTime::MIN)))
}

/// Cast to a signed integer. Floats truncate; decimals are rejected.
pub fn to_i64(value: &Value) -> Result<i64> {
    let cast = match value {
        Value::Int(i) => Some(*i),
        Value::UInt(u) => i64::try_from(*u).ok(),
        Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Text(s) => parse_i64(s),
        Value::Nullable(inner) if inner.is_valid() => {
            return to_i64(&inner.clone().into_value());
        }
        _ => None,
    };
    cast.ok_or_else(|| cast_error(TB0101, value, "integer"))
}

/// Cast to a binary float.
///
/// Decimals are rejected: narrowing them into a float would silently lose
/// precision.
pub fn to_f64(value: &Value) -> Result<f64> {
    let cast = match value {
        Value::Float(f) => Some(*f),
        Value::Int(i) => Some(*i as f64),
        Value::UInt(u) => Some(*u as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s.parse::<f64>().ok(),
        Value::Nullable(inner) if inner.is_valid() => {
            return to_f64(&inner.clone().into_value());
        }
        _ => None,
    };
    cast.ok_or_else(|| cast_error(TB0103, value, "float"))
}

/// Cast to a boolean. Numbers are true when non-zero.
pub fn to_bool(value: &Value) -> Result<bool> {
    let cast = match value {
        Value::Bool(b) => Some(*b),
        Value::Int(i) => Some(*i != 0),
        Value::UInt(u) => Some(*u != 0),
        Value::Float(f) => Some(*f != 0.0),
        Value::Text(s) => parse_bool(s),
        Value::Nullable(inner) if inner.is_valid() => {
            return to_bool(&inner.clone().into_value());
        }
        _ => None,
    };
    cast.ok_or_else(|| cast_error(TB0105, value, "boolean"))
}

/// Cast to a naive date/time.
///
/// Timestamps keep their local wall-clock time. Integers are read as Unix
/// seconds.
pub fn to_time(value: &Value) -> Result<NaiveDateTime> {
    let cast = match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
        Value::Timestamp(ts) => Some(ts.naive_local()),
        Value::Int(secs) => DateTime::from_timestamp(*secs, 0).map(|ts| ts.naive_utc()),
        Value::Text(s) => match parse_datetime(s) {
            Some(Value::Timestamp(ts)) => Some(ts.naive_local()),
            Some(Value::DateTime(dt)) => Some(dt),
            _ => None,
        },
        Value::Nullable(inner) if inner.is_valid() => {
            return to_time(&inner.clone().into_value());
        }
        _ => None,
    };
    cast.ok_or_else(|| cast_error(TB0106, value, "date/time"))
}

/// String form of a scalar value. `None` for lists.
///
/// Absent values render as the empty string. Floats use the shortest
/// round-trip form without an exponent (`3`, `0.1`).
pub fn try_stringify(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Text(s) => s.clone(),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::Date(d) => d.format(DATE_FORMAT).to_string(),
        Value::DateTime(dt) => format_time(dt),
        Value::Timestamp(ts) => format_time(&ts.naive_local()),
        Value::Nullable(inner) => render_nullable(inner),
        Value::Array(_) => return None,
    };
    Some(text)
}

/// String form of a value that never fails: lists render as bracket literals
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Array(items) => ClickHouseArrayCodec::new().format_slice(items),
        other => try_stringify(other).unwrap_or_default(),
    }
}

/// [`try_stringify`] that reports lists as a conversion error
pub fn to_text(value: &Value) -> Result<String> {
    try_stringify(value).ok_or_else(|| cast_error(TB0100, value, "string"))
}

/// Render a nullable container: invalid is the empty string
pub fn render_nullable(inner: &NullableValue) -> String {
    match inner {
        NullableValue::Int(Some(i)) => i.to_string(),
        NullableValue::Float(Some(f)) => f.to_string(),
        NullableValue::Bool(Some(b)) => b.to_string(),
        NullableValue::Time(Some(dt)) => format_time(dt),
        NullableValue::Text(Some(s)) => s.clone(),
        _ => String::new(),
    }
}

fn cast_error(code: ErrorCode, value: &Value, target: &str) -> ConvertError {
    ConvertError::conversion(
        code,
        stringify(value),
        target,
        format!("{} value has no {target} form", value.kind_name()),
    )
}
