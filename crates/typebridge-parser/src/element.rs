//! Array element typing
//!
//! [`ElementKind`] decides how an unquoted token becomes a [`Value`] on the
//! way in. [`ArrayElement`] lets any slice (values, numbers, strings,
//! options) present its items to a formatter on the way out.

use rust_decimal::Decimal;
use std::borrow::Cow;
use std::str::FromStr;
use typebridge_types::{
    DATE_FORMAT, LOW_CARDINALITY_WRAPPER, NULLABLE_WRAPPER, NullableValue, Value,
    array_inner_type, format_time, is_boolean_type, is_decimal_type, is_float_type,
    is_integer_type, is_unsigned_integer_type, parse_bool, type_name_head,
};

/// How the elements of a list are typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind<'t> {
    /// Each element is itself a list of the inner type
    Nested(&'t str),
    /// Signed integer alias
    Integer,
    /// Unsigned integer alias
    Unsigned,
    /// Binary float alias
    Float,
    /// Fixed-point alias
    Decimal,
    /// Boolean alias
    Boolean,
    /// Strings, dates, UUIDs and every unknown name
    Untyped,
}

impl<'t> ElementKind<'t> {
    /// Classify an element type name.
    ///
    /// `Nullable(...)` and `LowCardinality(...)` wrappers are looked through,
    /// as are the PostgreSQL array spellings `_int4` and `int4[]`.
    /// Parameters are ignored, so `Decimal(10, 2)` is a decimal.
    pub fn classify(element_type: &'t str) -> Self {
        let name = strip_wrappers(element_type);
        if let Some(inner) = array_inner_type(name) {
            return Self::Nested(inner);
        }

        let name = name.strip_prefix('_').unwrap_or(name);
        let name = name.strip_suffix("[]").unwrap_or(name);
        let head = type_name_head(name);

        if is_unsigned_integer_type(head) {
            Self::Unsigned
        } else if is_integer_type(head) {
            Self::Integer
        } else if is_float_type(head) {
            Self::Float
        } else if is_decimal_type(head) {
            Self::Decimal
        } else if is_boolean_type(head) {
            Self::Boolean
        } else {
            Self::Untyped
        }
    }

    /// Element type to parse a nested list with
    pub fn nested_type(&self, element_type: &'t str) -> &'t str {
        match self {
            Self::Nested(inner) => inner,
            _ => element_type,
        }
    }

    /// Convert an unquoted, non-NULL token.
    ///
    /// Integer and float kinds read `.`-free tokens as integers and dotted
    /// tokens as floats. A float token like `1e3` or `inf` that is not an
    /// integer still reads as a float. With `infer_untyped`, untyped tokens that look like numbers
    /// become numbers too. Tokens that fail to parse stay text.
    pub fn convert_scalar(&self, token: &str, infer_untyped: bool) -> Value {
        let converted = match self {
            Self::Integer if token.contains('.') => parse_float(token),
            Self::Integer => token.parse::<i64>().ok().map(Value::Int),
            Self::Unsigned if token.contains('.') => parse_float(token),
            Self::Unsigned => token
                .parse::<u64>()
                .ok()
                .map(Value::UInt)
                .or_else(|| token.parse::<i64>().ok().map(Value::Int)),
            Self::Float if token.contains('.') => parse_float(token),
            Self::Float => token
                .parse::<i64>()
                .ok()
                .map(Value::Int)
                .or_else(|| parse_float(token)),
            Self::Decimal => Decimal::from_str(token).ok().map(Value::Decimal),
            Self::Boolean => parse_bool(token).map(Value::Bool),
            Self::Untyped | Self::Nested(_) if infer_untyped => infer_number(token),
            Self::Untyped | Self::Nested(_) => None,
        };
        converted.unwrap_or_else(|| Value::text(token))
    }
}

fn parse_float(token: &str) -> Option<Value> {
    token.parse::<f64>().ok().map(Value::Float)
}

fn infer_number(token: &str) -> Option<Value> {
    if let Ok(i) = token.parse::<i64>() {
        return Some(Value::Int(i));
    }
    if token.contains('.') { parse_float(token) } else { None }
}

fn strip_wrappers(element_type: &str) -> &str {
    let mut name = element_type.trim();
    loop {
        let inner = [NULLABLE_WRAPPER, LOW_CARDINALITY_WRAPPER]
            .iter()
            .find_map(move |wrapper| {
                let prefix = name.get(..wrapper.len())?;
                if !prefix.eq_ignore_ascii_case(wrapper) {
                    return None;
                }
                name[wrapper.len()..].strip_suffix(')')
            });
        match inner {
            Some(inner) => name = inner.trim(),
            None => return name,
        }
    }
}

/// One item of a list as seen by a formatter
#[derive(Debug, Clone, PartialEq)]
pub enum Element<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Float32(f32),
    Decimal(Decimal),
    Text(Cow<'a, str>),
    Nested(&'a [Value]),
}

/// Float rendering that always keeps a fractional part for finite values,
/// so `3.0` reads back as a float and not as the integer `3`.
pub fn float_literal(value: f64) -> String {
    with_fraction(value.to_string(), value.is_finite())
}

/// 32-bit counterpart of [`float_literal`]
pub fn float32_literal(value: f32) -> String {
    with_fraction(value.to_string(), value.is_finite())
}

fn with_fraction(mut text: String, finite: bool) -> String {
    if finite && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Anything that can be an item of a formatted list
pub trait ArrayElement {
    fn as_element(&self) -> Element<'_>;
}

impl ArrayElement for Value {
    fn as_element(&self) -> Element<'_> {
        match self {
            Value::Null => Element::Null,
            Value::Bool(b) => Element::Bool(*b),
            Value::Int(i) => Element::Int(*i),
            Value::UInt(u) => Element::UInt(*u),
            Value::Float(f) => Element::Float(*f),
            Value::Decimal(d) => Element::Decimal(*d),
            Value::Text(s) => Element::Text(Cow::Borrowed(s)),
            Value::Bytes(bytes) => Element::Text(String::from_utf8_lossy(bytes)),
            Value::Date(d) => Element::Text(Cow::Owned(d.format(DATE_FORMAT).to_string())),
            Value::DateTime(dt) => Element::Text(Cow::Owned(format_time(dt))),
            Value::Timestamp(ts) => Element::Text(Cow::Owned(format_time(&ts.naive_local()))),
            Value::Array(items) => Element::Nested(items),
            Value::Nullable(inner) => match inner {
                NullableValue::Int(Some(i)) => Element::Int(*i),
                NullableValue::Float(Some(f)) => Element::Float(*f),
                NullableValue::Bool(Some(b)) => Element::Bool(*b),
                NullableValue::Time(Some(t)) => Element::Text(Cow::Owned(format_time(t))),
                NullableValue::Text(Some(s)) => Element::Text(Cow::Borrowed(s)),
                _ => Element::Null,
            },
        }
    }
}

macro_rules! signed_element {
    ($($ty:ty),*) => {$(
        impl ArrayElement for $ty {
            fn as_element(&self) -> Element<'_> {
                Element::Int(i64::from(*self))
            }
        }
    )*};
}

macro_rules! unsigned_element {
    ($($ty:ty),*) => {$(
        impl ArrayElement for $ty {
            fn as_element(&self) -> Element<'_> {
                Element::UInt(u64::from(*self))
            }
        }
    )*};
}

signed_element!(i8, i16, i32, i64);
unsigned_element!(u8, u16, u32, u64);

impl ArrayElement for f64 {
    fn as_element(&self) -> Element<'_> {
        Element::Float(*self)
    }
}

impl ArrayElement for f32 {
    fn as_element(&self) -> Element<'_> {
        Element::Float32(*self)
    }
}

impl ArrayElement for bool {
    fn as_element(&self) -> Element<'_> {
        Element::Bool(*self)
    }
}

impl ArrayElement for Decimal {
    fn as_element(&self) -> Element<'_> {
        Element::Decimal(*self)
    }
}

impl ArrayElement for str {
    fn as_element(&self) -> Element<'_> {
        Element::Text(Cow::Borrowed(self))
    }
}

impl ArrayElement for String {
    fn as_element(&self) -> Element<'_> {
        Element::Text(Cow::Borrowed(self))
    }
}

impl<T: ArrayElement + ?Sized> ArrayElement for &T {
    fn as_element(&self) -> Element<'_> {
        (**self).as_element()
    }
}

impl<T: ArrayElement> ArrayElement for Option<T> {
    fn as_element(&self) -> Element<'_> {
        match self {
            Some(inner) => inner.as_element(),
            None => Element::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ElementKind::classify("Int32"), ElementKind::Integer);
        assert_eq!(ElementKind::classify("Nullable(UInt8)"), ElementKind::Unsigned);
        assert_eq!(
            ElementKind::classify("LowCardinality(Nullable(Float64))"),
            ElementKind::Float
        );
        assert_eq!(ElementKind::classify("Decimal(10, 2)"), ElementKind::Decimal);
        assert_eq!(ElementKind::classify("_BOOL"), ElementKind::Boolean);
        assert_eq!(ElementKind::classify("int4[]"), ElementKind::Integer);
        assert_eq!(ElementKind::classify("String"), ElementKind::Untyped);
        assert_eq!(ElementKind::classify(""), ElementKind::Untyped);
        assert_eq!(
            ElementKind::classify("Array(Nullable(String))"),
            ElementKind::Nested("Nullable(String)")
        );
    }

    #[test]
    fn test_convert_scalar_typed() {
        assert_eq!(ElementKind::Integer.convert_scalar("42", false), Value::Int(42));
        assert_eq!(ElementKind::Integer.convert_scalar("4.5", false), Value::Float(4.5));
        assert_eq!(
            ElementKind::Unsigned.convert_scalar("18446744073709551615", false),
            Value::UInt(u64::MAX)
        );
        assert_eq!(ElementKind::Float.convert_scalar("3", false), Value::Int(3));
        assert_eq!(ElementKind::Float.convert_scalar("inf", false), Value::Float(f64::INFINITY));
        assert_eq!(ElementKind::Boolean.convert_scalar("t", false), Value::Bool(true));
        assert_eq!(ElementKind::Integer.convert_scalar("abc", false), Value::text("abc"));
    }

    #[test]
    fn test_convert_scalar_inference() {
        assert_eq!(ElementKind::Untyped.convert_scalar("7", true), Value::Int(7));
        assert_eq!(ElementKind::Untyped.convert_scalar("7.5", true), Value::Float(7.5));
        assert_eq!(ElementKind::Untyped.convert_scalar("7", false), Value::text("7"));
        assert_eq!(ElementKind::Untyped.convert_scalar("inf", true), Value::text("inf"));
    }

    #[test]
    fn test_float_literal_keeps_fraction() {
        assert_eq!(float_literal(3.0), "3.0");
        assert_eq!(float_literal(-0.25), "-0.25");
        assert_eq!(float_literal(f64::INFINITY), "inf");
        assert_eq!(float32_literal(0.1), "0.1");
    }

    #[test]
    fn test_value_elements() {
        assert_eq!(Value::Null.as_element(), Element::Null);
        assert_eq!(
            Value::Nullable(NullableValue::Int(None)).as_element(),
            Element::Null
        );
        assert_eq!(
            Value::Nullable(NullableValue::Text(Some("x".into()))).as_element(),
            Element::Text(Cow::Borrowed("x"))
        );
        assert_eq!(Some(5i32).as_element(), Element::Int(5));
        assert_eq!("a".as_element(), Element::Text(Cow::Borrowed("a")));
    }
}
