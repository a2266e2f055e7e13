//! Vendor type-name helpers
//!
//! Type names arrive as free-form strings (`Nullable(Int32)`, `bigint unsigned`,
//! `_INT4`, `Array(String)`). The helpers here answer the questions the
//! converter asks about such a string before any value is touched.

/// ClickHouse nullable wrapper prefix (uppercased)
pub const NULLABLE_WRAPPER: &str = "NULLABLE(";

/// ClickHouse low-cardinality wrapper prefix (uppercased)
pub const LOW_CARDINALITY_WRAPPER: &str = "LOWCARDINALITY(";

const ARRAY_WRAPPER: &str = "ARRAY(";

/// Signed integer aliases
pub const SIGNED_INTEGER_TYPE_NAMES: &[&str] = &[
    "INT", "INTEGER", "BIGINT", "SMALLINT", "TINYINT", "MEDIUMINT", "INT2", "INT4", "INT8",
    "INT16", "INT32", "INT64",
];

/// Unsigned integer aliases
pub const UNSIGNED_INTEGER_TYPE_NAMES: &[&str] = &[
    "UINT",
    "UINT8",
    "UINT16",
    "UINT32",
    "UINT64",
    "TINYINT UNSIGNED",
    "SMALLINT UNSIGNED",
    "MEDIUMINT UNSIGNED",
    "BIGINT UNSIGNED",
];

/// Binary floating point aliases
pub const FLOAT_TYPE_NAMES: &[&str] = &[
    "REAL",
    "FLOAT",
    "DOUBLE",
    "DOUBLE PRECISION",
    "NUMBER",
    "FLOAT4",
    "FLOAT8",
    "FLOAT32",
    "FLOAT64",
];

/// Fixed-point aliases
pub const DECIMAL_TYPE_NAMES: &[&str] = &["DECIMAL", "NUMERIC", "MONEY", "SMALLMONEY"];

/// Boolean aliases
pub const BOOLEAN_TYPE_NAMES: &[&str] = &["BOOLEAN", "BOOL", "BIT"];

/// Check whether a type string denotes a nullable column.
///
/// A type is nullable if it uses the `NULLABLE(<inner>)` wrapper, or if it
/// contains the token `NULL` without containing `NOT NULL`. The second rule is
/// a heuristic over the type string: any name mentioning `NULL` counts.
pub fn is_nullable(sql_type: &str) -> bool {
    let upper = sql_type.to_uppercase();

    if upper.starts_with(NULLABLE_WRAPPER) {
        return true;
    }

    upper.contains("NULL") && !upper.contains("NOT NULL")
}

/// Strip one level of `NULLABLE(...)` or `LOWCARDINALITY(...)`.
///
/// The unwrapped inner type is returned uppercased. Input that matches neither
/// wrapper is returned unchanged. Only one wrapper is removed per call, so
/// `Nullable(LowCardinality(String))` yields `LOWCARDINALITY(STRING)`.
pub fn base_type(sql_type: &str) -> String {
    let upper = sql_type.to_uppercase();

    for wrapper in [NULLABLE_WRAPPER, LOW_CARDINALITY_WRAPPER] {
        if let Some(inner) = upper.strip_prefix(wrapper) {
            return inner.strip_suffix(')').unwrap_or(inner).to_string();
        }
    }

    sql_type.to_string()
}

/// Check whether a type name is one of the known integer aliases.
///
/// Matching is exact on the uppercased name, so `POINT` or `MYINTX` are never
/// classified as integers.
pub fn is_integer_type(sql_type: &str) -> bool {
    let upper = sql_type.trim().to_uppercase();
    contains_name(SIGNED_INTEGER_TYPE_NAMES, &upper)
        || contains_name(UNSIGNED_INTEGER_TYPE_NAMES, &upper)
}

/// Check whether a type name is one of the unsigned integer aliases
pub fn is_unsigned_integer_type(sql_type: &str) -> bool {
    contains_name(UNSIGNED_INTEGER_TYPE_NAMES, &sql_type.trim().to_uppercase())
}

/// Check whether a type name is a binary floating point alias
pub fn is_float_type(sql_type: &str) -> bool {
    contains_name(FLOAT_TYPE_NAMES, &sql_type.trim().to_uppercase())
}

/// Check whether a type name is a fixed-point alias
pub fn is_decimal_type(sql_type: &str) -> bool {
    contains_name(DECIMAL_TYPE_NAMES, &sql_type.trim().to_uppercase())
}

/// Check whether a type name is a boolean alias
pub fn is_boolean_type(sql_type: &str) -> bool {
    contains_name(BOOLEAN_TYPE_NAMES, &sql_type.trim().to_uppercase())
}

/// Extract `T` from `Array(T)`, matching the wrapper case-insensitively.
///
/// The inner type keeps its original spelling.
pub fn array_inner_type(sql_type: &str) -> Option<&str> {
    let trimmed = sql_type.trim();
    let prefix = trimmed.get(..ARRAY_WRAPPER.len())?;
    if !prefix.eq_ignore_ascii_case(ARRAY_WRAPPER) {
        return None;
    }
    trimmed[ARRAY_WRAPPER.len()..].strip_suffix(')').map(str::trim)
}

/// Check whether a type name is an `Array(...)` wrapper
pub fn is_array_wrapper(sql_type: &str) -> bool {
    array_inner_type(sql_type).is_some()
}

/// The name part of a parameterized type: `Decimal(10, 2)` -> `Decimal`
pub fn type_name_head(sql_type: &str) -> &str {
    let trimmed = sql_type.trim();
    match trimmed.find('(') {
        Some(idx) => trimmed[..idx].trim_end(),
        None => trimmed,
    }
}

fn contains_name(names: &[&str], upper: &str) -> bool {
    names.iter().any(|name| *name == upper)
}
