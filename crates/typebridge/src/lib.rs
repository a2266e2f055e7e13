//! Universal database type conversion for Rust
//!
//! Database backends name their column types differently (`INT8`, `BIGINT`,
//! `Nullable(Int64)`), express nullability differently, and ship list-typed
//! columns as nested, quoted literals. This crate reconciles them:
//! - Vendor type names resolve to a small set of semantic categories
//! - Wire strings convert to typed values and back, per value, row or result set
//! - Nullable columns convert to containers that tell NULL apart from zero
//! - Backends override or extend conversion through pluggable handlers
//!
//! # Example
//!
//! ```
//! use typebridge::{Column, UniversalConverter, Value};
//!
//! let converter = UniversalConverter::with_defaults("clickhouse");
//! let columns = [
//!     Column::new("id", "UInt64"),
//!     Column::new("tags", "Array(String)"),
//! ];
//!
//! let row = converter.convert_row(&["7", "['a','b']"], &columns)?;
//! assert_eq!(row[0], Value::UInt(7));
//! assert_eq!(row[1], Value::array([Value::text("a"), Value::text("b")]));
//! # Ok::<(), typebridge::ConvertError>(())
//! ```

// Re-export all public APIs from internal crates
pub use typebridge_convert as convert;
pub use typebridge_diagnostics as diagnostics;
pub use typebridge_parser as parser;
pub use typebridge_types as types;

// Convenience re-exports
pub use typebridge_convert::{
    ConversionStrategy, ConverterConfig, DatabaseTypeHandler, TypeDefinition, TypeRegistry,
    UniversalConverter,
};
pub use typebridge_diagnostics::{ConvertError, ErrorCode, Result};
pub use typebridge_parser::{ArrayCodec, ClickHouseArrayCodec, PostgresArrayCodec};
pub use typebridge_types::{Column, NullableValue, TypeCategory, Value};
