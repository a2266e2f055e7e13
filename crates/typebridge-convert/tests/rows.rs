//! Row and result-set conversion through the full pipeline

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::sync::Arc;
use typebridge_convert::{
    BaseTypeHandler, ConverterConfig, TypeRegistry, UniversalConverter, default_types,
    postgres_array_types, register_postgres_types,
};
use typebridge_diagnostics::{ConvertError, TB0101, TB0105, TB0203};
use typebridge_types::{Column, NullableValue, SIGNED_INTEGER_TYPE_NAMES, Value};

/// Every alias of the built-in and PostgreSQL array definitions
fn registered_aliases() -> Vec<String> {
    default_types()
        .into_iter()
        .chain(postgres_array_types())
        .flat_map(|definition| definition.sql_types)
        .collect()
}

fn columns(pairs: &[(&str, &str)]) -> Vec<Column> {
    pairs.iter()
        .map(|(name, data_type)| Column::new(*name, *data_type))
        .collect()
}

#[test]
fn test_row_converts_position_wise() {
    let converter = UniversalConverter::with_defaults("mysql");
    let cols = columns(&[
        ("id", "BIGINT"),
        ("active", "BOOL"),
        ("year", "YEAR"),
        ("note", "Nullable(VARCHAR)"),
    ]);

    let row = converter
        .convert_row(&["7", "1", "2024", "NULL", "extra"], &cols)
        .unwrap();

    assert_eq!(
        row,
        vec![
            Value::Int(7),
            Value::Bool(true),
            Value::Int(2024),
            Value::Nullable(NullableValue::Text(None)),
            Value::text("extra"),
        ]
    );
}

#[test]
fn test_row_aborts_on_first_bad_column() {
    let converter = UniversalConverter::with_defaults("postgresql");
    let cols = columns(&[("A", "int"), ("B", "bool")]);

    let err = converter
        .convert_row(&["notanint", "true"], &cols)
        .unwrap_err();

    assert_eq!(err.column_name(), Some("A"));
    assert_eq!(err.code(), TB0101);
    assert!(err.to_string().starts_with("column A: "), "{err}");
}

#[test]
fn test_row_reports_later_column() {
    let converter = UniversalConverter::with_defaults("postgresql");
    let cols = columns(&[("A", "int"), ("B", "bool")]);

    let err = converter.convert_row(&["1", "perhaps"], &cols).unwrap_err();

    assert_eq!(err.column_name(), Some("B"));
    assert_eq!(err.code(), TB0105);
}

#[test]
fn test_row_with_malformed_array_names_column() {
    let converter = UniversalConverter::with_defaults("clickhouse");
    let cols = columns(&[("tags", "Array(String)")]);

    let err = converter.convert_row(&["['a,b]"], &cols).unwrap_err();

    assert_eq!(err.column_name(), Some("tags"));
    assert_eq!(err.code(), TB0203);
    assert!(err.is_malformed_array_literal());
}

#[test]
fn test_results_round_trip() {
    let converter = UniversalConverter::with_defaults("postgresql");
    let cols = columns(&[("id", "INT4"), ("tags", "_TEXT"), ("seen", "TIMESTAMP")]);
    let wire = vec![
        vec!["1", "{a,\"b c\"}", "2024-03-15 10:30:00"],
        vec!["2", "{}", "2024-03-16 00:00:00"],
    ];

    let typed: Vec<Vec<Value>> = wire
        .iter()
        .map(|row| converter.convert_row(row.as_slice(), &cols).unwrap())
        .collect();
    let back = converter.convert_results(typed.as_slice(), &cols).unwrap();

    assert_eq!(
        back,
        vec![
            vec!["1", "{a,\"b c\"}", "2024-03-15T10:30:00"],
            vec!["2", "{}", "2024-03-16"],
        ]
    );
}

#[test]
fn test_results_cell_context() {
    let mut converter = UniversalConverter::with_defaults("sqlite");
    let mut handler = BaseTypeHandler::new("sqlite");
    handler.register_custom_type("POINT", |s| Ok(Value::text(s)));
    converter.register_database_handler("sqlite", Arc::new(handler));

    let cols = columns(&[("id", "INTEGER"), ("where", "POINT")]);
    let rows = vec![
        vec![Value::Int(1), Value::text("(0,0)")],
        vec![Value::Int(2), Value::array([Value::Int(1)])],
    ];

    let err = converter.convert_results(rows.as_slice(), &cols).unwrap_err();

    assert!(matches!(err, ConvertError::Cell { row: 1, column: 1, .. }), "{err}");
    assert!(err.to_string().starts_with("row 1, column 1: "), "{err}");
}

#[test]
fn test_results_without_column_use_generic_stringify() {
    let converter = UniversalConverter::with_defaults("mysql");
    let rows = vec![vec![Value::Int(1), Value::Float(2.5), Value::Null]];

    let back = converter.convert_results(rows.as_slice(), &[]).unwrap();

    assert_eq!(back, vec![vec!["1", "2.5", ""]]);
}

#[rstest]
#[case("_INT4", "{1,NULL}", Value::array([Value::Int(1), Value::Null]))]
#[case("_FLOAT8", "{1.5}", Value::array([Value::Float(1.5)]))]
#[case("_BOOL", "{t,f}", Value::array([Value::Bool(true), Value::Bool(false)]))]
#[case(
    "_UUID",
    "{6f1c2a9e-8d3b-4c1a-9f2e-1a2b3c4d5e6f}",
    Value::array([Value::text("6f1c2a9e-8d3b-4c1a-9f2e-1a2b3c4d5e6f")])
)]
fn test_postgres_registry_arrays_without_handler(
    #[case] data_type: &str,
    #[case] literal: &str,
    #[case] expected: Value,
) {
    let registry = TypeRegistry::with_defaults();
    register_postgres_types(&registry);
    let converter = UniversalConverter::new("postgresql", Arc::new(registry));

    assert_eq!(converter.convert_from_string(literal, data_type).unwrap(), expected);
    assert_eq!(
        converter.convert_to_string(&expected, data_type).unwrap(),
        literal
    );
}

#[test]
fn test_config_assembled_converter() {
    let config = ConverterConfig::from_json(
        r#"{"backend":"clickhouse","install_backend_handler":false}"#,
    )
    .unwrap();
    let converter =
        UniversalConverter::from_config(config, Arc::new(TypeRegistry::with_defaults()));

    // Without the ClickHouse handler an array column has no definition and
    // falls back to text.
    assert_eq!(
        converter.convert_from_string("[1,2]", "Array(Int32)").unwrap(),
        Value::text("[1,2]")
    );
}

proptest! {
    #[test]
    fn test_null_round_trip_for_every_alias(
        alias in prop::sample::select(registered_aliases()),
        null in prop::sample::select(vec!["", "NULL", "null"]),
        backend in prop::sample::select(vec!["postgresql", "mysql", "clickhouse", "sqlite"]),
    ) {
        let registry = TypeRegistry::with_defaults();
        register_postgres_types(&registry);
        let converter =
            UniversalConverter::from_config(ConverterConfig::new(backend), Arc::new(registry));
        let data_type = format!("Nullable({alias})");

        let value = converter.convert_from_string(null, &data_type).unwrap();
        prop_assert!(value.is_null(), "{data_type}: {value:?}");
        prop_assert_eq!(converter.convert_to_string(&value, &data_type).unwrap(), "");
    }

    #[test]
    fn test_nullable_integers_round_trip(
        alias in prop::sample::select(SIGNED_INTEGER_TYPE_NAMES),
        n in any::<i64>(),
    ) {
        let converter = UniversalConverter::with_defaults("mysql");
        let data_type = format!("Nullable({alias})");

        let value = converter.convert_from_string(&n.to_string(), &data_type).unwrap();
        prop_assert_eq!(&value, &Value::Nullable(NullableValue::Int(Some(n))));
        prop_assert_eq!(converter.convert_to_string(&value, &data_type).unwrap(), n.to_string());
    }
}
