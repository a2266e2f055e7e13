//! TypeBridge error codes following a structured numbering system
//!
//! Error code ranges:
//! - TB0001-TB0099: Definition errors (registry, handlers)
//! - TB0100-TB0199: Conversion errors (string <-> value)
//! - TB0200-TB0299: Array literal errors (brackets, quotes)
//! - TB0300-TB0399: Configuration errors

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a definition error (0001-0099)
    pub const fn is_definition_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a conversion error (0100-0199)
    pub const fn is_conversion_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is an array literal error (0200-0299)
    pub const fn is_array_literal_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a configuration error (0300-0399)
    pub const fn is_config_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TB{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Definition errors (0001-0099)
    map.insert(1, ErrorInfo::new("Invalid type definition")
        .with_help("A type definition needs a non-empty name"));
    map.insert(2, ErrorInfo::new("Invalid override parameters")
        .with_help("An override needs a non-empty type name"));
    map.insert(3, ErrorInfo::new("Type not handled by backend handler"));

    // Conversion errors (0100-0199)
    map.insert(100, ErrorInfo::new("Conversion failed"));
    map.insert(101, ErrorInfo::new("Invalid integer"));
    map.insert(102, ErrorInfo::new("Invalid unsigned integer"));
    map.insert(103, ErrorInfo::new("Invalid float"));
    map.insert(104, ErrorInfo::new("Invalid decimal"));
    map.insert(105, ErrorInfo::new("Invalid boolean"));
    map.insert(106, ErrorInfo::new("Invalid date/time"));
    map.insert(107, ErrorInfo::new("Invalid UUID"));
    map.insert(108, ErrorInfo::new("Invalid JSON"));
    map.insert(109, ErrorInfo::new("Nullable wrap failed")
        .with_help("Enable lenient_nullable_wrap to keep the unwrapped value"));

    // Array literal errors (0200-0299)
    map.insert(200, ErrorInfo::new("Missing array delimiters"));
    map.insert(201, ErrorInfo::new("Unmatched closing bracket"));
    map.insert(202, ErrorInfo::new("Unmatched opening bracket"));
    map.insert(203, ErrorInfo::new("Unterminated quoted element"));
    map.insert(204, ErrorInfo::new("Invalid array element"));

    // Configuration errors (0300-0399)
    map.insert(300, ErrorInfo::new("Invalid configuration"));

    map
});

// Definition errors
pub const TB0001: ErrorCode = ErrorCode::new(1);
pub const TB0002: ErrorCode = ErrorCode::new(2);
pub const TB0003: ErrorCode = ErrorCode::new(3);

// Conversion errors
pub const TB0100: ErrorCode = ErrorCode::new(100);
pub const TB0101: ErrorCode = ErrorCode::new(101);
pub const TB0102: ErrorCode = ErrorCode::new(102);
pub const TB0103: ErrorCode = ErrorCode::new(103);
pub const TB0104: ErrorCode = ErrorCode::new(104);
pub const TB0105: ErrorCode = ErrorCode::new(105);
pub const TB0106: ErrorCode = ErrorCode::new(106);
pub const TB0107: ErrorCode = ErrorCode::new(107);
pub const TB0108: ErrorCode = ErrorCode::new(108);
pub const TB0109: ErrorCode = ErrorCode::new(109);

// Array literal errors
pub const TB0200: ErrorCode = ErrorCode::new(200);
pub const TB0201: ErrorCode = ErrorCode::new(201);
pub const TB0202: ErrorCode = ErrorCode::new(202);
pub const TB0203: ErrorCode = ErrorCode::new(203);
pub const TB0204: ErrorCode = ErrorCode::new(204);

// Configuration errors
pub const TB0300: ErrorCode = ErrorCode::new(300);
