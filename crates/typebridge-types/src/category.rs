//! Semantic type categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic kind of a vendor column type.
///
/// Every type definition carries exactly one category. The category picks the
/// null sentinel for nullable columns and the generic cast used when no
/// definition or backend handler claims a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    /// Integers, floats and fixed-point decimals
    Numeric,
    /// Booleans and single bits
    Boolean,
    /// Dates, timestamps and times
    Date,
    /// Character data, including UUIDs
    Text,
    /// Raw byte strings
    Binary,
    /// JSON documents
    Json,
    /// Spatial types
    Geometry,
    /// Array and list types
    Array,
    /// Anything not recognized
    #[default]
    Other,
}

impl TypeCategory {
    /// All categories in declaration order
    pub const ALL: [TypeCategory; 9] = [
        Self::Numeric,
        Self::Boolean,
        Self::Date,
        Self::Text,
        Self::Binary,
        Self::Json,
        Self::Geometry,
        Self::Array,
        Self::Other,
    ];

    /// Get the lowercase name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Text => "text",
            Self::Binary => "binary",
            Self::Json => "json",
            Self::Geometry => "geometry",
            Self::Array => "array",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
