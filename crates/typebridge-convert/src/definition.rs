//! Type definitions and their conversion strategies
//!
//! A [`TypeDefinition`] names one semantic kind of value and lists the vendor
//! aliases that map to it. The conversion itself is one of a closed set of
//! [`ConversionStrategy`] variants, so every definition in a registry can be
//! enumerated and tested. Backends that need more than this go through a
//! [`DatabaseTypeHandler`](crate::DatabaseTypeHandler).

use crate::cast::{parse_i64, parse_u64, stringify, to_text, to_time, try_stringify};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use typebridge_diagnostics::{
    ConvertError, ErrorCode, Result, TB0101, TB0102, TB0103, TB0104, TB0105, TB0106, TB0107,
    TB0108,
};
use typebridge_parser::{ArrayCodec, ClickHouseArrayCodec, PostgresArrayCodec};
use typebridge_types::{DATE_FORMAT, TypeCategory, Value, format_time, parse_bool};

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Offset-carrying values render in RFC 3339 so the offset survives a reparse
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Array literal syntax used by an `Array` strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayDialect {
    /// `[1,'a',NULL]`
    Bracket,
    /// `{1,"a",NULL}`
    Brace,
}

impl ArrayDialect {
    /// The codec for this dialect
    pub fn codec(self) -> &'static dyn ArrayCodec {
        static BRACKET: ClickHouseArrayCodec = ClickHouseArrayCodec::new();
        static BRACE: PostgresArrayCodec = PostgresArrayCodec::new();
        match self {
            Self::Bracket => &BRACKET,
            Self::Brace => &BRACE,
        }
    }
}

/// How a definition turns strings into values and back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionStrategy {
    /// Signed 64-bit integer
    Integer,
    /// Unsigned 64-bit integer
    UnsignedInteger,
    /// Binary float
    Float,
    /// Arbitrary precision decimal
    Decimal,
    /// Boolean in any of the usual spellings (`t`, `1`, `TRUE`, ...)
    Boolean,
    /// Calendar date; time-of-day input is truncated
    Date,
    /// Date and time, with or without an offset
    DateTime,
    /// Text passthrough
    Text,
    /// Text that must parse as a UUID; rendered uppercase
    Uuid,
    /// Raw bytes
    Binary,
    /// JSON document kept as text
    Json,
    /// Spatial value kept as text
    Geometry,
    /// Array literal decoded with the given element type
    Array {
        dialect: ArrayDialect,
        element_type: String,
    },
}

impl ConversionStrategy {
    /// Construct an array strategy
    pub fn array(dialect: ArrayDialect, element_type: impl Into<String>) -> Self {
        Self::Array {
            dialect,
            element_type: element_type.into(),
        }
    }

    /// Convert a wire string into a value
    pub fn parse(&self, input: &str) -> Result<Value> {
        match self {
            Self::Integer => parse_i64(input)
                .map(Value::Int)
                .ok_or_else(|| rejected(TB0101, input, "integer")),
            Self::UnsignedInteger => parse_u64(input)
                .map(Value::UInt)
                .ok_or_else(|| rejected(TB0102, input, "unsigned integer")),
            Self::Float => input
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| rejected(TB0103, input, "float")),
            Self::Decimal => parse_decimal(input)
                .map(Value::Decimal)
                .ok_or_else(|| rejected(TB0104, input, "decimal")),
            Self::Boolean => parse_bool(input)
                .map(Value::Bool)
                .ok_or_else(|| rejected(TB0105, input, "boolean")),
            Self::Date => parse_date(input)
                .map(Value::Date)
                .ok_or_else(|| rejected(TB0106, input, "date")),
            Self::DateTime => {
                parse_timestamp(input).ok_or_else(|| rejected(TB0106, input, "datetime"))
            }
            Self::Uuid => uuid::Uuid::parse_str(input)
                .map(|_| Value::text(input))
                .map_err(|e| {
                    ConvertError::conversion(TB0107, input, "uuid", format!("invalid UUID: {e}"))
                }),
            Self::Text | Self::Json | Self::Geometry => Ok(Value::text(input)),
            Self::Binary => Ok(Value::Bytes(input.as_bytes().to_vec())),
            Self::Array {
                dialect,
                element_type,
            } => dialect
                .codec()
                .parse_array(input, element_type)
                .map(Value::Array),
        }
    }

    /// Convert a value into its wire string
    pub fn render(&self, value: &Value) -> Result<String> {
        match self {
            Self::Decimal => match value {
                Value::Decimal(d) => Ok(d.to_string()),
                other => to_text(other),
            },
            Self::Date => Ok(to_time(value)?.format(DATE_FORMAT).to_string()),
            Self::DateTime => match value {
                Value::Timestamp(ts) => Ok(ts.format(TIMESTAMP_FORMAT).to_string()),
                other => Ok(format_time(&to_time(other)?)),
            },
            Self::Uuid => Ok(stringify(value).to_uppercase()),
            Self::Array { dialect, .. } => Ok(dialect
                .codec()
                .format_value(value)
                .or_else(|| try_stringify(value))
                .unwrap_or_default()),
            Self::Integer
            | Self::UnsignedInteger
            | Self::Float
            | Self::Boolean
            | Self::Text
            | Self::Binary
            | Self::Json
            | Self::Geometry => to_text(value),
        }
    }
}

/// Optional input check run by consumers before conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validator {
    /// Input must be a recognized boolean spelling
    Boolean,
    /// Input must be a UUID
    Uuid,
    /// Input must be well-formed JSON
    Json,
}

impl Validator {
    /// Check an input string
    pub fn check(self, input: &str) -> Result<()> {
        match self {
            Self::Boolean => parse_bool(input)
                .map(|_| ())
                .ok_or_else(|| rejected(TB0105, input, "boolean")),
            Self::Uuid => uuid::Uuid::parse_str(input).map(|_| ()).map_err(|e| {
                ConvertError::conversion(TB0107, input, "uuid", format!("invalid UUID: {e}"))
            }),
            Self::Json => serde_json::from_str::<serde::de::IgnoredAny>(input)
                .map(|_| ())
                .map_err(|e| {
                    ConvertError::conversion(TB0108, input, "json", format!("invalid JSON: {e}"))
                }),
        }
    }
}

/// A named conversion unit for one semantic kind of value.
///
/// `name` is a label only; lookups go through the aliases in `sql_types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Human readable label
    pub name: String,
    /// Semantic category
    pub category: TypeCategory,
    /// Vendor aliases, matched case-insensitively
    #[serde(default)]
    pub sql_types: Vec<String>,
    /// Conversion in both directions, absent for shape-only definitions
    #[serde(default)]
    pub strategy: Option<ConversionStrategy>,
    /// Optional input check
    #[serde(default)]
    pub validator: Option<Validator>,
}

impl TypeDefinition {
    /// Create a definition with no aliases and no conversion
    pub fn new(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
            sql_types: Vec::new(),
            strategy: None,
            validator: None,
        }
    }

    /// Set the vendor aliases
    pub fn with_sql_types<I, S>(mut self, sql_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sql_types = sql_types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the conversion strategy
    pub fn with_strategy(mut self, strategy: ConversionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the input validator
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Run the string -> value conversion, `None` if the definition has none
    pub fn convert_from_string(&self, input: &str) -> Option<Result<Value>> {
        self.strategy.as_ref().map(|s| s.parse(input))
    }

    /// Run the value -> string conversion, `None` if the definition has none
    pub fn convert_to_string(&self, value: &Value) -> Option<Result<String>> {
        self.strategy.as_ref().map(|s| s.render(value))
    }

    /// Validate user input. Succeeds when there is no validator.
    pub fn validate(&self, input: &str) -> Result<()> {
        self.validator.map_or(Ok(()), |v| v.check(input))
    }
}

fn parse_decimal(input: &str) -> Option<Decimal> {
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .ok()
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.date_naive());
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
}

/// A bare date reads as midnight, the form midnight values render in
fn parse_timestamp(input: &str) -> Option<Value> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(Value::Timestamp(ts));
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(Value::DateTime)
}

fn rejected(code: ErrorCode, input: &str, target: &str) -> ConvertError {
    ConvertError::conversion(code, input, target, format!("not a valid {target} literal"))
}
