//! Source type to storage type mapping used by migration scripts.

/// Map a declared source type to its SQL column type.
///
/// Case-insensitive, a trailing `?` is ignored, and anything unrecognised
/// maps to `TEXT`.
pub fn sql_type(source_type: &str) -> &'static str {
    match source_type
        .trim()
        .trim_end_matches('?')
        .to_ascii_lowercase()
        .as_str()
    {
        "int" | "int32" => "INTEGER",
        "long" | "int64" => "BIGINT",
        "string" => "TEXT",
        "datetime" => "TIMESTAMP",
        "bool" | "boolean" => "BOOLEAN",
        "decimal" => "NUMERIC",
        "double" => "DOUBLE PRECISION",
        "float" | "single" => "REAL",
        "guid" => "UUID",
        _ => "TEXT",
    }
}
