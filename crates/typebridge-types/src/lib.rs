//! TypeBridge type system
//!
//! This crate defines the pieces every conversion layer agrees on:
//! - Semantic type categories (numeric, boolean, date, text, ...)
//! - The runtime `Value` model, including nullable containers
//! - Result-set column descriptors
//! - Vendor type-name helpers (nullability, wrapper stripping, alias tables)
//! - Scalar literal helpers shared by the codecs and the generic casts

pub mod category;
pub mod column;
pub mod literal;
pub mod type_name;
pub mod value;

pub use category::*;
pub use column::*;
pub use literal::*;
pub use type_name::*;
pub use value::*;
