//! Backend-specific type handling
//!
//! A [`DatabaseTypeHandler`] claims vendor types the shared registry does not
//! model and converts them itself. Whatever a handler claims, its result is
//! final: a failure is reported, not retried through the registry.

use crate::cast::try_stringify;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use typebridge_diagnostics::{ConvertError, Result, TB0003, TB0100};
use typebridge_types::Value;

/// Converter for one custom vendor type
pub type CustomConverter = Arc<dyn Fn(&str) -> Result<Value> + Send + Sync>;

/// Trait for backend-specific conversion of the types a backend owns
pub trait DatabaseTypeHandler: Send + Sync {
    /// Check whether this handler owns a base type
    fn can_handle(&self, sql_type: &str) -> bool;

    /// Convert a wire string of a claimed type into a value
    fn convert_from_string(&self, value: &str, sql_type: &str) -> Result<Value>;

    /// Convert a value of a claimed type into its wire string
    fn convert_to_string(&self, value: &Value, sql_type: &str) -> Result<String>;
}

/// Handler built from a table of per-type converters.
///
/// Every backend handler starts from one of these; backends with no special
/// types use it as is.
#[derive(Clone)]
pub struct BaseTypeHandler {
    backend: String,
    custom_types: HashMap<String, CustomConverter>,
}

impl BaseTypeHandler {
    /// Create a handler with no custom types
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            custom_types: HashMap::new(),
        }
    }

    /// Backend identifier this handler belongs to
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Claim a type name (case-insensitive) with a converter
    pub fn register_custom_type<F>(&mut self, sql_type: &str, converter: F)
    where
        F: Fn(&str) -> Result<Value> + Send + Sync + 'static,
    {
        self.custom_types
            .insert(sql_type.to_uppercase(), Arc::new(converter));
    }

    /// Check whether a type name has a custom converter
    pub fn has_custom_type(&self, sql_type: &str) -> bool {
        self.custom_types.contains_key(&sql_type.to_uppercase())
    }
}

impl fmt::Debug for BaseTypeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.custom_types.keys().map(String::as_str).collect();
        types.sort_unstable();
        f.debug_struct("BaseTypeHandler")
            .field("backend", &self.backend)
            .field("custom_types", &types)
            .finish()
    }
}

impl DatabaseTypeHandler for BaseTypeHandler {
    fn can_handle(&self, sql_type: &str) -> bool {
        self.has_custom_type(sql_type)
    }

    fn convert_from_string(&self, value: &str, sql_type: &str) -> Result<Value> {
        match self.custom_types.get(&sql_type.to_uppercase()) {
            Some(converter) => converter(value),
            None => Err(ConvertError::invalid_definition(
                TB0003,
                format!("type {sql_type} not handled by {} handler", self.backend),
            )),
        }
    }

    fn convert_to_string(&self, value: &Value, sql_type: &str) -> Result<String> {
        try_stringify(value).ok_or_else(|| {
            ConvertError::conversion(
                TB0100,
                value.kind_name(),
                sql_type,
                format!("{} handler cannot render a list", self.backend),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typebridge_diagnostics::TB0101;

    fn handler() -> BaseTypeHandler {
        let mut handler = BaseTypeHandler::new("test");
        handler.register_custom_type("year", |s| {
            s.parse::<i64>()
                .map(Value::Int)
                .map_err(|e| ConvertError::conversion(TB0101, s, "YEAR", e.to_string()))
        });
        handler
    }

    #[test]
    fn test_claims_registered_types_only() {
        let handler = handler();
        assert!(handler.can_handle("YEAR"));
        assert!(handler.can_handle("Year"));
        assert!(!handler.can_handle("INT"));
    }

    #[test]
    fn test_custom_converter_runs() {
        let handler = handler();
        assert_eq!(
            handler.convert_from_string("2024", "YEAR").unwrap(),
            Value::Int(2024)
        );
        assert_eq!(
            handler.convert_from_string("soon", "YEAR").unwrap_err().code(),
            TB0101
        );
    }

    #[test]
    fn test_unclaimed_type_errors() {
        let err = handler().convert_from_string("x", "INT").unwrap_err();
        assert_eq!(err.code(), TB0003);
        assert!(err.to_string().contains("not handled by test handler"));
    }

    #[test]
    fn test_to_string() {
        let handler = handler();
        assert_eq!(
            handler.convert_to_string(&Value::Int(7), "YEAR").unwrap(),
            "7"
        );
        assert_eq!(
            handler
                .convert_to_string(&Value::array([Value::Int(1)]), "YEAR")
                .unwrap_err()
                .code(),
            TB0100
        );
    }

    #[test]
    fn test_debug_lists_types() {
        let rendered = format!("{:?}", handler());
        assert!(rendered.contains("YEAR"), "{rendered}");
    }
}
