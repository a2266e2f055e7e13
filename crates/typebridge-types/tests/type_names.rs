//! Tests for vendor type-name classification
//!
//! Covers the questions asked of a type string before conversion:
//! - Nullability (wrapper syntax and NULL token heuristic)
//! - Base type extraction (single-level wrapper stripping)
//! - Integer alias classification
//! - Array wrapper detection

use pretty_assertions::assert_eq;
use rstest::rstest;
use typebridge_types::*;

#[rstest]
#[case("Nullable(Int32)", true)]
#[case("nullable(String)", true)]
#[case("Nullable(LowCardinality(String))", true)]
#[case("TEXT NULL", true)]
#[case("TEXT NOT NULL", false)]
#[case("LowCardinality(String)", false)]
#[case("INTEGER", false)]
#[case("", false)]
fn test_is_nullable(#[case] sql_type: &str, #[case] expected: bool) {
    assert_eq!(is_nullable(sql_type), expected, "is_nullable({sql_type:?})");
}

#[rstest]
#[case("Nullable(Int32)", "INT32")]
#[case("LowCardinality(String)", "STRING")]
#[case("Nullable(LowCardinality(String))", "LOWCARDINALITY(STRING)")]
#[case("LowCardinality(Nullable(String))", "NULLABLE(STRING)")]
#[case("Nullable(Array(Int32))", "ARRAY(INT32)")]
#[case("Decimal(10, 2)", "Decimal(10, 2)")]
#[case("int4", "int4")]
fn test_base_type(#[case] sql_type: &str, #[case] expected: &str) {
    assert_eq!(base_type(sql_type), expected);
}

#[rstest]
#[case("INT", true)]
#[case("int8", true)]
#[case("UInt16", true)]
#[case("MEDIUMINT UNSIGNED", true)]
#[case("Int128", false)]
#[case("INTERVAL", false)]
#[case("POINT", false)]
#[case("Float64", false)]
fn test_is_integer_type(#[case] sql_type: &str, #[case] expected: bool) {
    assert_eq!(is_integer_type(sql_type), expected, "is_integer_type({sql_type:?})");
}

#[test]
fn test_every_integer_alias_matches_case_insensitively() {
    for name in SIGNED_INTEGER_TYPE_NAMES
        .iter()
        .chain(UNSIGNED_INTEGER_TYPE_NAMES)
    {
        assert!(is_integer_type(&name.to_lowercase()), "{name} lowercase");
    }
}

#[test]
fn test_unsigned_subset() {
    assert!(is_unsigned_integer_type("uint64"));
    assert!(!is_unsigned_integer_type("INT64"));
}

#[test]
fn test_nested_array_inner_types() {
    let outer = "Array(Array(Nullable(String)))";
    let inner = array_inner_type(outer).unwrap();
    assert_eq!(inner, "Array(Nullable(String))");
    assert!(is_array_wrapper(inner));
    assert_eq!(array_inner_type(inner), Some("Nullable(String)"));
}

#[test]
fn test_column_serializes_type_field() {
    let column = Column::new("id", "UInt64");
    let json = serde_json::to_value(&column).unwrap();
    assert_eq!(json, serde_json::json!({"name": "id", "type": "UInt64"}));
}
