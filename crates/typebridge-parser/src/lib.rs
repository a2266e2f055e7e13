//! Array literal codecs
//!
//! Backends ship list-typed columns as text. This crate turns those literals
//! into nested [`Value`] lists and back:
//!
//! - [`ClickHouseArrayCodec`]: bracket dialect, `[1,'a,b',[2,3],NULL]`
//! - [`PostgresArrayCodec`]: brace dialect, `{1,"a,b",{2,3},NULL}`
//!
//! Both dialects share one element scanner. It tracks quotes, bracket depth
//! and backslash escapes, and reports unbalanced input as
//! [`ConvertError::MalformedArrayLiteral`](typebridge_diagnostics::ConvertError)
//! with a byte span into the literal.

mod clickhouse;
mod decode;
mod element;
mod postgres;
mod scanner;

pub use clickhouse::ClickHouseArrayCodec;
pub use element::{ArrayElement, Element, ElementKind};
pub use postgres::PostgresArrayCodec;
pub use scanner::{Dialect, RawElement, split_elements};

use typebridge_diagnostics::Result;
use typebridge_types::Value;

/// A two-way codec for one backend's array literal syntax.
pub trait ArrayCodec: Send + Sync {
    /// Parse a literal into a list, converting elements per `element_type`.
    ///
    /// `element_type` is the type of one element (`String` for
    /// `Array(String)`, `_INT4` or `INT4` for an `int4[]` column). Nested
    /// literals are parsed recursively with the inner type of an
    /// `Array(...)` element type.
    fn parse_array(&self, literal: &str, element_type: &str) -> Result<Vec<Value>>;

    /// Render a list of values as a literal
    fn format_array(&self, items: &[Value]) -> String;

    /// Render a value that should hold a list.
    ///
    /// Lists are formatted; `Null` and invalid nullable containers render as
    /// the empty literal. Returns `None` for any other scalar, leaving its
    /// stringification to the caller.
    fn format_value(&self, value: &Value) -> Option<String> {
        match value {
            Value::Array(items) => Some(self.format_array(items)),
            v if v.is_null() => Some(self.format_array(&[])),
            _ => None,
        }
    }
}
