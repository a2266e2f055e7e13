//! Type registry and universal converter
//!
//! This crate turns the strings a database driver hands back into typed
//! [`Value`](typebridge_types::Value)s and back again:
//!
//! - [`TypeDefinition`] / [`ConversionStrategy`]: one conversion unit per semantic kind
//! - [`TypeRegistry`]: vendor alias -> definition, shared behind a read-write lock
//! - [`DatabaseTypeHandler`]: per-backend override for types the registry does not model
//! - [`UniversalConverter`]: the resolution pipeline, per value, per row and per result set
//!
//! # Example
//!
//! ```
//! use typebridge_convert::UniversalConverter;
//! use typebridge_types::{NullableValue, Value};
//!
//! let converter = UniversalConverter::with_defaults("clickhouse");
//! assert_eq!(
//!     converter.convert_from_string("", "Nullable(Int32)").unwrap(),
//!     Value::Nullable(NullableValue::Int(None))
//! );
//! ```

pub mod backends;
pub mod cast;
pub mod config;
pub mod converter;
pub mod defaults;
pub mod definition;
pub mod handler;
pub mod nullable;
pub mod registry;

pub use backends::{
    ClickHouseHandler, PostgresHandler, handler_for_backend, mysql_handler, sqlite_handler,
};
pub use config::ConverterConfig;
pub use converter::UniversalConverter;
pub use defaults::{
    default_types, postgres_array_types, register_default_types, register_postgres_types,
};
pub use definition::{ArrayDialect, ConversionStrategy, TypeDefinition, Validator};
pub use handler::{BaseTypeHandler, CustomConverter, DatabaseTypeHandler};
pub use nullable::{null_value, wrap_nullable};
pub use registry::TypeRegistry;
