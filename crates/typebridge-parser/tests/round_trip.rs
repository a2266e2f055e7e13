//! Property tests: formatting a list and parsing it back with the same
//! element type reproduces the values.

use proptest::prelude::*;
use typebridge_parser::{ArrayCodec, ClickHouseArrayCodec, PostgresArrayCodec};
use typebridge_types::Value;

fn nullable_int() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => any::<i64>().prop_map(Value::Int),
        1 => Just(Value::Null),
    ]
}

fn nullable_text() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => any::<String>().prop_map(Value::Text),
        1 => Just(Value::Null),
    ]
}

fn finite_float() -> impl Strategy<Value = Value> {
    any::<f64>()
        .prop_filter("finite", |f| f.is_finite())
        .prop_map(Value::Float)
}

/// Mixed trees as a `Array(...(String))` column carries them: quoted text,
/// bare numbers, NULLs and nested lists.
fn untyped_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Int),
        finite_float(),
        any::<String>().prop_map(Value::Text),
        Just(Value::Null),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Value::Array)
    })
}

proptest! {
    #[test]
    fn clickhouse_int_lists_round_trip(items in prop::collection::vec(nullable_int(), 0..12)) {
        let codec = ClickHouseArrayCodec::new();
        let literal = codec.format_array(&items);
        prop_assert_eq!(codec.parse_array(&literal, "Nullable(Int64)").unwrap(), items);
    }

    #[test]
    fn clickhouse_text_lists_round_trip(items in prop::collection::vec(nullable_text(), 0..12)) {
        let codec = ClickHouseArrayCodec::new();
        let literal = codec.format_array(&items);
        prop_assert_eq!(codec.parse_array(&literal, "Nullable(String)").unwrap(), items);
    }

    #[test]
    fn clickhouse_float_lists_round_trip(items in prop::collection::vec(finite_float(), 0..12)) {
        let codec = ClickHouseArrayCodec::new();
        let literal = codec.format_array(&items);
        prop_assert_eq!(codec.parse_array(&literal, "Float64").unwrap(), items);
    }

    #[test]
    fn clickhouse_nested_trees_round_trip(items in prop::collection::vec(untyped_tree(), 0..6)) {
        let codec = ClickHouseArrayCodec::new();
        let literal = codec.format_array(&items);
        let parsed = codec.parse_array(&literal, "String").unwrap();
        prop_assert_eq!(&parsed, &items);
        prop_assert_eq!(codec.format_array(&parsed), literal);
    }

    #[test]
    fn postgres_int_lists_round_trip(items in prop::collection::vec(nullable_int(), 0..12)) {
        let codec = PostgresArrayCodec::new();
        let literal = codec.format_array(&items);
        prop_assert_eq!(codec.parse_array(&literal, "_INT8").unwrap(), items);
    }

    #[test]
    fn postgres_text_lists_round_trip(items in prop::collection::vec(nullable_text(), 0..12)) {
        let codec = PostgresArrayCodec::new();
        let literal = codec.format_array(&items);
        prop_assert_eq!(codec.parse_array(&literal, "_TEXT").unwrap(), items);
    }

    #[test]
    fn postgres_bool_grids_round_trip(
        grid in prop::collection::vec(prop::collection::vec(any::<bool>(), 1..4), 1..4)
    ) {
        let codec = PostgresArrayCodec::new();
        let items: Vec<Value> = grid
            .iter()
            .map(|row| Value::array(row.iter().copied().map(Value::Bool)))
            .collect();
        let literal = codec.format_array(&items);
        prop_assert_eq!(codec.parse_array(&literal, "_BOOL").unwrap(), items);
    }
}
