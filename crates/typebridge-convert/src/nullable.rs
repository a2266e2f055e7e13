//! Nullable containers per category
//!
//! | Category           | Container                                     |
//! |--------------------|-----------------------------------------------|
//! | Numeric, integer   | `NullableValue::Int`, `Float` past `i64` range |
//! | Numeric, otherwise | `NullableValue::Float`                        |
//! | Boolean            | `NullableValue::Bool`                         |
//! | Date               | `NullableValue::Time`                         |
//! | everything else    | `NullableValue::Text`                         |

use crate::cast::{to_bool, to_f64, to_i64, to_time, try_stringify};
use typebridge_types::{NullableValue, TypeCategory, Value};

/// The invalid container for a category
pub fn null_value(category: TypeCategory, integer: bool) -> Value {
    let inner = match category {
        TypeCategory::Numeric if integer => NullableValue::Int(None),
        TypeCategory::Numeric => NullableValue::Float(None),
        TypeCategory::Boolean => NullableValue::Bool(None),
        TypeCategory::Date => NullableValue::Time(None),
        _ => NullableValue::Text(None),
    };
    Value::Nullable(inner)
}

/// Cast a value into the valid container for a category.
///
/// Absent values become the invalid container. `None` means the value has
/// no form in that container; the caller decides whether that is an error.
pub fn wrap_nullable(value: &Value, category: TypeCategory, integer: bool) -> Option<Value> {
    if value.is_null() {
        return Some(null_value(category, integer));
    }

    let inner = match category {
        TypeCategory::Numeric if integer => match to_i64(value) {
            Ok(i) => NullableValue::Int(Some(i)),
            Err(_) => NullableValue::Float(Some(to_f64(value).ok()?)),
        },
        TypeCategory::Numeric => NullableValue::Float(Some(to_f64(value).ok()?)),
        TypeCategory::Boolean => NullableValue::Bool(Some(to_bool(value).ok()?)),
        TypeCategory::Date => NullableValue::Time(Some(to_time(value).ok()?)),
        _ => NullableValue::Text(Some(try_stringify(value)?)),
    };
    Some(Value::Nullable(inner))
}
