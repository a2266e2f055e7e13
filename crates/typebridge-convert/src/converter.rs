//! The universal converter
//!
//! Resolution order for one value:
//!
//! 1. Nullable type with an empty or `NULL` input: the category's null container
//! 2. The backend handler, if it claims the base type
//! 3. The registry definition for the base type, if it has a conversion
//! 4. A generic cast by category that never fails
//!
//! Results for nullable types are wrapped in the category's container.
//! `Array(Nullable(T))` marks the elements nullable, not the list, so list
//! results are never wrapped. Failures in steps 2 and 3 are final.

use crate::backends::handler_for_backend;
use crate::cast::{parse_datetime, parse_i64, render_nullable, stringify};
use crate::config::ConverterConfig;
use crate::definition::TypeDefinition;
use crate::handler::DatabaseTypeHandler;
use crate::nullable::{null_value, wrap_nullable};
use crate::registry::TypeRegistry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use typebridge_diagnostics::{ConvertError, Result, TB0109};
use typebridge_types::{
    Column, TypeCategory, Value, base_type, is_array_wrapper, is_integer_type, is_nullable,
    parse_bool,
};

/// Converts between wire strings and [`Value`]s for one backend.
///
/// The registry is shared; the converter only reads it. A converter is
/// `Send + Sync` and can serve many threads once handlers are registered.
pub struct UniversalConverter {
    registry: Arc<TypeRegistry>,
    backend: String,
    handlers: HashMap<String, Arc<dyn DatabaseTypeHandler>>,
    config: ConverterConfig,
}

impl UniversalConverter {
    /// Create a converter with no backend handler
    pub fn new(backend: impl Into<String>, registry: Arc<TypeRegistry>) -> Self {
        let config = ConverterConfig::new(backend).with_backend_handler(false);
        Self::from_config(config, registry)
    }

    /// Create a converter over the built-in type table with the stock handler
    pub fn with_defaults(backend: impl Into<String>) -> Self {
        Self::from_config(
            ConverterConfig::new(backend),
            Arc::new(TypeRegistry::with_defaults()),
        )
    }

    /// Assemble a converter from a config
    pub fn from_config(config: ConverterConfig, registry: Arc<TypeRegistry>) -> Self {
        let mut converter = Self {
            registry,
            backend: config.backend.clone(),
            handlers: HashMap::new(),
            config,
        };

        if converter.config.install_backend_handler {
            match handler_for_backend(&converter.backend) {
                Some(handler) => {
                    let backend = converter.backend.clone();
                    converter.register_database_handler(backend, handler);
                }
                None => log::debug!("no stock handler for backend {:?}", converter.backend),
            }
        }
        converter
    }

    /// Register the handler for a backend, replacing any previous one
    pub fn register_database_handler(
        &mut self,
        backend: impl Into<String>,
        handler: Arc<dyn DatabaseTypeHandler>,
    ) {
        let backend = backend.into();
        log::debug!("registered type handler for {backend}");
        self.handlers.insert(backend, handler);
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// See [`typebridge_types::is_nullable`]
    pub fn is_nullable(&self, sql_type: &str) -> bool {
        is_nullable(sql_type)
    }

    /// See [`typebridge_types::base_type`]
    pub fn base_type(&self, sql_type: &str) -> String {
        base_type(sql_type)
    }

    /// Registry definition for a type name, without wrapper stripping
    pub fn type_definition(&self, sql_type: &str) -> Option<Arc<TypeDefinition>> {
        self.registry.get_type(sql_type)
    }

    fn handler_for(&self, base: &str) -> Option<&Arc<dyn DatabaseTypeHandler>> {
        self.handlers
            .get(&self.backend)
            .filter(|handler| handler.can_handle(base))
    }

    /// Convert a wire string of the given vendor type into a value
    pub fn convert_from_string(&self, value: &str, data_type: &str) -> Result<Value> {
        let nullable = is_nullable(data_type);
        let base = base_type(data_type);

        if nullable && (value.is_empty() || value.eq_ignore_ascii_case("NULL")) {
            return Ok(null_value(
                self.registry.type_category(&base),
                is_integer_type(&base),
            ));
        }

        let converted = self.resolve_from_string(value, &base)?;
        if nullable && !is_array_wrapper(&base) {
            self.wrap(converted, &base)
        } else {
            Ok(converted)
        }
    }

    fn resolve_from_string(&self, value: &str, base: &str) -> Result<Value> {
        if let Some(handler) = self.handler_for(base) {
            log::trace!("{base}: converting with {} handler", self.backend);
            return handler.convert_from_string(value, base);
        }

        if let Some(result) = self
            .registry
            .get_type(base)
            .and_then(|definition| definition.convert_from_string(value))
        {
            log::trace!("{base}: converting with registry definition");
            return result;
        }

        log::trace!("{base}: generic cast");
        Ok(self.generic_cast(value, base))
    }

    /// Best-effort cast by category. Anything unparseable stays text.
    fn generic_cast(&self, value: &str, base: &str) -> Value {
        let cast = match self.registry.type_category(base) {
            TypeCategory::Numeric => {
                let integer = if value.contains('.') {
                    None
                } else {
                    parse_i64(value).map(Value::Int)
                };
                integer.or_else(|| value.parse::<f64>().ok().map(Value::Float))
            }
            TypeCategory::Boolean => parse_bool(value).map(Value::Bool),
            TypeCategory::Date => parse_datetime(value),
            _ => None,
        };
        cast.unwrap_or_else(|| Value::text(value))
    }

    fn wrap(&self, value: Value, base: &str) -> Result<Value> {
        let category = self.registry.type_category(base);
        if let Some(wrapped) = wrap_nullable(&value, category, is_integer_type(base)) {
            return Ok(wrapped);
        }

        if self.config.lenient_nullable_wrap {
            log::warn!(
                "{base}: {} value has no nullable {category} container, keeping it unwrapped",
                value.kind_name()
            );
            return Ok(value);
        }
        Err(ConvertError::conversion(
            TB0109,
            stringify(&value),
            base,
            format!("{} value has no nullable {category} container", value.kind_name()),
        ))
    }

    /// Convert a value into the wire string of the given vendor type
    pub fn convert_to_string(&self, value: &Value, data_type: &str) -> Result<String> {
        match value {
            Value::Null => return Ok(String::new()),
            Value::Nullable(inner) => return Ok(render_nullable(inner)),
            _ => {}
        }

        let base = base_type(data_type);
        if let Some(handler) = self.handler_for(&base) {
            return handler.convert_to_string(value, &base);
        }

        if let Some(result) = self
            .registry
            .get_type(&base)
            .and_then(|definition| definition.convert_to_string(value))
        {
            return result;
        }

        Ok(stringify(value))
    }

    /// Convert one row position-wise.
    ///
    /// Values beyond the last column pass through as text. The first failing
    /// column aborts the row.
    pub fn convert_row<S: AsRef<str>>(
        &self,
        values: &[S],
        columns: &[Column],
    ) -> Result<Vec<Value>> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let value = value.as_ref();
                match columns.get(i) {
                    Some(column) => self
                        .convert_from_string(value, &column.data_type)
                        .map_err(|e| e.in_column(&column.name)),
                    None => Ok(Value::text(value)),
                }
            })
            .collect()
    }

    /// Convert rows of values back to strings. The first failing cell aborts.
    pub fn convert_results<R: AsRef<[Value]>>(
        &self,
        rows: &[R],
        columns: &[Column],
    ) -> Result<Vec<Vec<String>>> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                row.as_ref()
                    .iter()
                    .enumerate()
                    .map(|(j, value)| {
                        let data_type = columns.get(j).map_or("", |c| c.data_type.as_str());
                        self.convert_to_string(value, data_type)
                            .map_err(|e| e.in_cell(i, j))
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Debug for UniversalConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        handlers.sort_unstable();
        f.debug_struct("UniversalConverter")
            .field("backend", &self.backend)
            .field("handlers", &handlers)
            .field("registered_types", &self.registry.len())
            .field("config", &self.config)
            .finish()
    }
}
