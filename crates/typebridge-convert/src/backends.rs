//! Stock handlers for the supported backends

use crate::cast::{parse_i64, try_stringify};
use crate::handler::{BaseTypeHandler, DatabaseTypeHandler};
use std::sync::Arc;
use typebridge_diagnostics::{ConvertError, Result, TB0101};
use typebridge_parser::{ArrayCodec, ClickHouseArrayCodec, PostgresArrayCodec};
use typebridge_types::{Value, array_inner_type};

/// ClickHouse compound type prefixes, uppercased
const CLICKHOUSE_COMPOUND_PREFIXES: &[&str] = &[
    "ARRAY(",
    "TUPLE(",
    "MAP(",
    "NESTED(",
    "LOWCARDINALITY(",
    "NULLABLE(",
];

fn is_postgres_array(sql_type: &str) -> bool {
    sql_type.starts_with('_')
}

fn has_prefix_ignore_case(sql_type: &str, prefix: &str) -> bool {
    sql_type
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn render_list(codec: &dyn ArrayCodec, value: &Value) -> String {
    codec
        .format_value(value)
        .or_else(|| try_stringify(value))
        .unwrap_or_default()
}

/// PostgreSQL: every `_`-prefixed type is an array in the brace dialect
#[derive(Debug, Clone)]
pub struct PostgresHandler {
    base: BaseTypeHandler,
    codec: PostgresArrayCodec,
}

impl PostgresHandler {
    pub fn new() -> Self {
        Self {
            base: BaseTypeHandler::new("postgresql"),
            codec: PostgresArrayCodec::new(),
        }
    }

    /// Claim an additional type with a custom converter
    pub fn register_custom_type<F>(&mut self, sql_type: &str, converter: F)
    where
        F: Fn(&str) -> Result<Value> + Send + Sync + 'static,
    {
        self.base.register_custom_type(sql_type, converter);
    }
}

impl Default for PostgresHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseTypeHandler for PostgresHandler {
    fn can_handle(&self, sql_type: &str) -> bool {
        is_postgres_array(sql_type) || self.base.can_handle(sql_type)
    }

    fn convert_from_string(&self, value: &str, sql_type: &str) -> Result<Value> {
        if !self.base.has_custom_type(sql_type) && is_postgres_array(sql_type) {
            return self.codec.parse_array(value, sql_type).map(Value::Array);
        }
        self.base.convert_from_string(value, sql_type)
    }

    fn convert_to_string(&self, value: &Value, sql_type: &str) -> Result<String> {
        if is_postgres_array(sql_type) {
            return Ok(render_list(&self.codec, value));
        }
        self.base.convert_to_string(value, sql_type)
    }
}

/// ClickHouse: `Array(T)` in the bracket dialect, other compound types as text
#[derive(Debug, Clone)]
pub struct ClickHouseHandler {
    base: BaseTypeHandler,
    codec: ClickHouseArrayCodec,
}

impl ClickHouseHandler {
    pub fn new() -> Self {
        Self {
            base: BaseTypeHandler::new("clickhouse"),
            codec: ClickHouseArrayCodec::new(),
        }
    }

    /// Claim an additional type with a custom converter
    pub fn register_custom_type<F>(&mut self, sql_type: &str, converter: F)
    where
        F: Fn(&str) -> Result<Value> + Send + Sync + 'static,
    {
        self.base.register_custom_type(sql_type, converter);
    }
}

impl Default for ClickHouseHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseTypeHandler for ClickHouseHandler {
    fn can_handle(&self, sql_type: &str) -> bool {
        CLICKHOUSE_COMPOUND_PREFIXES
            .iter()
            .any(|prefix| has_prefix_ignore_case(sql_type, prefix))
            || self.base.can_handle(sql_type)
    }

    fn convert_from_string(&self, value: &str, sql_type: &str) -> Result<Value> {
        if self.base.has_custom_type(sql_type) {
            return self.base.convert_from_string(value, sql_type);
        }
        if let Some(inner) = array_inner_type(sql_type) {
            return self.codec.parse_array(value, inner).map(Value::Array);
        }
        if self.can_handle(sql_type) {
            // Tuples, maps and nested columns are kept in their wire form
            return Ok(Value::text(value));
        }
        self.base.convert_from_string(value, sql_type)
    }

    fn convert_to_string(&self, value: &Value, sql_type: &str) -> Result<String> {
        if array_inner_type(sql_type).is_some() {
            return Ok(render_list(&self.codec, value));
        }
        self.base.convert_to_string(value, sql_type)
    }
}

/// MySQL: `YEAR` as an integer, `SET` and `ENUM` as text
pub fn mysql_handler() -> BaseTypeHandler {
    let mut handler = BaseTypeHandler::new("mysql");
    handler.register_custom_type("YEAR", |s| {
        parse_i64(s)
            .map(Value::Int)
            .ok_or_else(|| ConvertError::conversion(TB0101, s, "YEAR", "not a valid year"))
    });
    handler.register_custom_type("SET", |s| Ok(Value::text(s)));
    handler.register_custom_type("ENUM", |s| Ok(Value::text(s)));
    handler
}

/// SQLite is type-flexible and has no custom types
pub fn sqlite_handler() -> BaseTypeHandler {
    BaseTypeHandler::new("sqlite")
}

/// Stock handler for a backend identifier, matched case-insensitively
pub fn handler_for_backend(backend: &str) -> Option<Arc<dyn DatabaseTypeHandler>> {
    let handler: Arc<dyn DatabaseTypeHandler> = match backend.to_ascii_lowercase().as_str() {
        "postgresql" | "postgres" => Arc::new(PostgresHandler::new()),
        "mysql" | "mariadb" => Arc::new(mysql_handler()),
        "clickhouse" => Arc::new(ClickHouseHandler::new()),
        "sqlite" | "sqlite3" => Arc::new(sqlite_handler()),
        _ => return None,
    };
    Some(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use typebridge_diagnostics::{TB0003, TB0201};

    #[test]
    fn test_postgres_claims_underscore_types() {
        let handler = PostgresHandler::new();
        assert!(handler.can_handle("_INT4"));
        assert!(handler.can_handle("_MY_ENUM"));
        assert!(!handler.can_handle("INT4"));
    }

    #[test]
    fn test_postgres_arrays() {
        let handler = PostgresHandler::new();
        let parsed = handler.convert_from_string("{1,2,NULL}", "_INT8").unwrap();
        assert_eq!(
            parsed,
            Value::array([Value::Int(1), Value::Int(2), Value::Null])
        );
        assert_eq!(
            handler.convert_to_string(&parsed, "_INT8").unwrap(),
            "{1,2,NULL}"
        );
        assert_eq!(
            handler
                .convert_from_string("{a,\"b c\"}", "_TEXT")
                .unwrap(),
            Value::array([Value::text("a"), Value::text("b c")])
        );
    }

    #[test]
    fn test_postgres_custom_type_wins() {
        let mut handler = PostgresHandler::new();
        handler.register_custom_type("_RAW", |s| Ok(Value::text(s)));
        assert_eq!(
            handler.convert_from_string("{1}", "_RAW").unwrap(),
            Value::text("{1}")
        );
    }

    #[test]
    fn test_clickhouse_arrays() {
        let handler = ClickHouseHandler::new();
        assert!(handler.can_handle("Array(String)"));
        assert!(handler.can_handle("MAP(STRING, INT32)"));
        assert!(!handler.can_handle("INT32"));

        let parsed = handler
            .convert_from_string("[1,2,[3,'a,b'],NULL]", "ARRAY(ARRAY(STRING))")
            .unwrap();
        assert_eq!(
            parsed,
            Value::array([
                Value::Int(1),
                Value::Int(2),
                Value::array([Value::Int(3), Value::text("a,b")]),
                Value::Null,
            ])
        );
        assert_eq!(
            handler
                .convert_to_string(&parsed, "ARRAY(ARRAY(STRING))")
                .unwrap(),
            "[1,2,[3,'a,b'],NULL]"
        );
    }

    #[test]
    fn test_clickhouse_compound_passthrough() {
        let handler = ClickHouseHandler::new();
        assert_eq!(
            handler
                .convert_from_string("(1,'a')", "TUPLE(INT32, STRING)")
                .unwrap(),
            Value::text("(1,'a')")
        );
    }

    #[test]
    fn test_clickhouse_malformed_array_is_final() {
        let err = ClickHouseHandler::new()
            .convert_from_string("[1]]", "ARRAY(INT32)")
            .unwrap_err();
        assert_eq!(err.code(), TB0201);
    }

    #[test]
    fn test_mysql_types() {
        let handler = mysql_handler();
        assert_eq!(
            handler.convert_from_string("2024", "year").unwrap(),
            Value::Int(2024)
        );
        assert_eq!(
            handler.convert_from_string("a,b", "SET").unwrap(),
            Value::text("a,b")
        );
        assert_eq!(
            handler.convert_from_string("'24", "YEAR").unwrap_err().code(),
            TB0101
        );
    }

    #[test]
    fn test_sqlite_claims_nothing() {
        let handler = sqlite_handler();
        assert!(!handler.can_handle("TEXT"));
        assert_eq!(
            handler.convert_from_string("x", "TEXT").unwrap_err().code(),
            TB0003
        );
    }

    #[test]
    fn test_handler_factory() {
        for id in ["postgresql", "Postgres", "mysql", "mariadb", "clickhouse", "sqlite3"] {
            assert!(handler_for_backend(id).is_some(), "{id}");
        }
        assert!(handler_for_backend("mongodb").is_none());
        assert!(handler_for_backend("POSTGRES").unwrap().can_handle("_TEXT"));
    }
}
