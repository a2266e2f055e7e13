//! Result-set column descriptors

use serde::{Deserialize, Serialize};

/// One field of a result row: its name and the vendor type string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Column name, used in error messages
    pub name: String,
    /// Vendor type name, e.g. `Nullable(Int32)` or `VARCHAR`
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Column {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}
