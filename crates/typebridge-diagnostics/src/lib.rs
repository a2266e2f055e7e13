//! TypeBridge diagnostics and error handling
//!
//! This crate provides the error infrastructure shared by every TypeBridge layer:
//! structured error codes, the conversion error enum, and byte spans pointing
//! into malformed array literals.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for TypeBridge operations
pub type Result<T> = std::result::Result<T, ConvertError>;
