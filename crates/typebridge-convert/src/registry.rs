//! Vendor type-name registry
//!
//! Maps uppercased vendor aliases to type definitions. Registration is
//! last-writer-wins per alias: re-registering one alias leaves every other
//! alias of the previous definition in place.

use crate::definition::TypeDefinition;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use typebridge_diagnostics::{ConvertError, Result, TB0001, TB0002};
use typebridge_types::TypeCategory;

/// Lookup table from vendor type name to [`TypeDefinition`].
///
/// Reads take a shared lock and never block each other. The registry is
/// meant to be filled at startup and shared read-mostly through an `Arc`.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<IndexMap<String, Arc<TypeDefinition>>>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in type table
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        crate::defaults::register_default_types(&registry);
        registry
    }

    /// Register a definition under every one of its aliases
    pub fn register_type(&self, definition: TypeDefinition) -> Result<()> {
        if definition.name.is_empty() {
            return Err(ConvertError::invalid_definition(
                TB0001,
                "type definition must have a name",
            ));
        }

        self.insert_definition(definition);
        Ok(())
    }

    /// Store a definition under its aliases without validating it
    pub(crate) fn insert_definition(&self, definition: TypeDefinition) {
        let definition = Arc::new(definition);
        let mut types = self.types.write();
        for alias in &definition.sql_types {
            types.insert(alias.to_uppercase(), Arc::clone(&definition));
        }
        log::debug!(
            "registered type {} ({} aliases, {})",
            definition.name,
            definition.sql_types.len(),
            definition.category
        );
    }

    /// Map a single alias to a definition, replacing whatever it mapped to
    pub fn override_type(&self, sql_type: &str, definition: TypeDefinition) -> Result<()> {
        if sql_type.is_empty() {
            return Err(ConvertError::invalid_definition(
                TB0002,
                "override requires a SQL type name",
            ));
        }

        let key = sql_type.to_uppercase();
        log::debug!("override {key} -> {}", definition.name);
        self.types.write().insert(key, Arc::new(definition));
        Ok(())
    }

    /// Look up a definition by exact, case-insensitive alias
    pub fn get_type(&self, sql_type: &str) -> Option<Arc<TypeDefinition>> {
        self.types.read().get(&sql_type.to_uppercase()).cloned()
    }

    /// Category of an alias, `Other` when unknown
    pub fn type_category(&self, sql_type: &str) -> TypeCategory {
        self.get_type(sql_type)
            .map_or(TypeCategory::Other, |def| def.category)
    }

    /// Remove every registration
    pub fn clear(&self) {
        self.types.write().clear();
        log::debug!("type registry cleared");
    }

    /// Snapshot of every alias mapping, in registration order
    pub fn all_types(&self) -> IndexMap<String, Arc<TypeDefinition>> {
        self.types.read().clone()
    }

    /// Number of registered aliases
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Check whether no alias is registered
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}
