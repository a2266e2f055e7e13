//! Built-in type table
//!
//! The definitions every converter starts from, plus the PostgreSQL array
//! definitions a PostgreSQL backend layers on top at construction time.

use crate::definition::{ArrayDialect, ConversionStrategy, TypeDefinition, Validator};
use crate::registry::TypeRegistry;
use typebridge_types::{
    BOOLEAN_TYPE_NAMES, DECIMAL_TYPE_NAMES, FLOAT_TYPE_NAMES, SIGNED_INTEGER_TYPE_NAMES,
    TypeCategory, UNSIGNED_INTEGER_TYPE_NAMES,
};

/// The built-in definitions, one per semantic kind
pub fn default_types() -> Vec<TypeDefinition> {
    vec![
        TypeDefinition::new("Integer", TypeCategory::Numeric)
            .with_sql_types(SIGNED_INTEGER_TYPE_NAMES.iter().copied())
            .with_strategy(ConversionStrategy::Integer),
        TypeDefinition::new("UnsignedInteger", TypeCategory::Numeric)
            .with_sql_types(UNSIGNED_INTEGER_TYPE_NAMES.iter().copied())
            .with_strategy(ConversionStrategy::UnsignedInteger),
        TypeDefinition::new("Float", TypeCategory::Numeric)
            .with_sql_types(FLOAT_TYPE_NAMES.iter().copied())
            .with_strategy(ConversionStrategy::Float),
        TypeDefinition::new("Decimal", TypeCategory::Numeric)
            .with_sql_types(DECIMAL_TYPE_NAMES.iter().copied())
            .with_strategy(ConversionStrategy::Decimal),
        TypeDefinition::new("Boolean", TypeCategory::Boolean)
            .with_sql_types(BOOLEAN_TYPE_NAMES.iter().copied())
            .with_strategy(ConversionStrategy::Boolean)
            .with_validator(Validator::Boolean),
        TypeDefinition::new("Date", TypeCategory::Date)
            .with_sql_types(["DATE"])
            .with_strategy(ConversionStrategy::Date),
        TypeDefinition::new("DateTime", TypeCategory::Date)
            .with_sql_types([
                "DATETIME",
                "TIMESTAMP",
                "TIMESTAMP WITH TIME ZONE",
                "TIMESTAMP WITHOUT TIME ZONE",
                "DATETIME2",
                "SMALLDATETIME",
                "TIMETZ",
                "TIMESTAMPTZ",
            ])
            .with_strategy(ConversionStrategy::DateTime),
        TypeDefinition::new("Text", TypeCategory::Text)
            .with_sql_types([
                "TEXT",
                "STRING",
                "VARCHAR",
                "CHAR",
                "NCHAR",
                "NVARCHAR",
                "NTEXT",
                "TINYTEXT",
                "MEDIUMTEXT",
                "LONGTEXT",
                "CLOB",
            ])
            .with_strategy(ConversionStrategy::Text),
        TypeDefinition::new("UUID", TypeCategory::Text)
            .with_sql_types(["UUID", "UNIQUEIDENTIFIER", "GUID"])
            .with_strategy(ConversionStrategy::Uuid)
            .with_validator(Validator::Uuid),
        TypeDefinition::new("Binary", TypeCategory::Binary)
            .with_sql_types([
                "BLOB",
                "BYTEA",
                "VARBINARY",
                "BINARY",
                "IMAGE",
                "TINYBLOB",
                "MEDIUMBLOB",
                "LONGBLOB",
            ])
            .with_strategy(ConversionStrategy::Binary),
        TypeDefinition::new("JSON", TypeCategory::Json)
            .with_sql_types(["JSON", "JSONB"])
            .with_strategy(ConversionStrategy::Json)
            .with_validator(Validator::Json),
        TypeDefinition::new("Geometry", TypeCategory::Geometry)
            .with_sql_types([
                "GEOMETRY",
                "GEOGRAPHY",
                "POINT",
                "LINESTRING",
                "POLYGON",
                "MULTIPOINT",
                "MULTILINESTRING",
                "MULTIPOLYGON",
            ])
            .with_strategy(ConversionStrategy::Geometry),
    ]
}

/// PostgreSQL array definitions, decoded with the brace dialect
pub fn postgres_array_types() -> Vec<TypeDefinition> {
    let array = |name: &str, aliases: &[&str], element_type: &str| {
        TypeDefinition::new(name, TypeCategory::Array)
            .with_sql_types(aliases.iter().copied())
            .with_strategy(ConversionStrategy::array(ArrayDialect::Brace, element_type))
    };

    vec![
        array("PostgresIntArray", &["_INT2", "_INT4", "_INT8"], "_INT4"),
        array(
            "PostgresFloatArray",
            &["_FLOAT4", "_FLOAT8", "_NUMERIC", "_DECIMAL"],
            "_FLOAT8",
        ),
        array("PostgresTextArray", &["_TEXT", "_VARCHAR", "_CHAR"], "_TEXT"),
        array("PostgresBoolArray", &["_BOOL"], "_BOOL"),
        array("PostgresUUIDArray", &["_UUID"], "_UUID"),
        array(
            "PostgresDateTimeArray",
            &["_DATE", "_TIMESTAMP", "_TIMESTAMPTZ", "_TIME", "_TIMETZ"],
            "_TIMESTAMP",
        ),
        array("PostgresJSONArray", &["_JSON", "_JSONB"], "_JSON"),
    ]
}

/// Register the built-in type table
pub fn register_default_types(registry: &TypeRegistry) {
    for definition in default_types() {
        registry.insert_definition(definition);
    }
}

/// Register the PostgreSQL array definitions
pub fn register_postgres_types(registry: &TypeRegistry) {
    for definition in postgres_array_types() {
        registry.insert_definition(definition);
    }
}
