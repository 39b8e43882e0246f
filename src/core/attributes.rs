use crate::adapters::csv_repo::CSV_COLUMNS;
use crate::domain::model::Passenger;
use crate::utils::error::Result;
use serde_json::{Map, Value};

/// JSON keys in the same order as the source columns.
const JSON_KEYS: [&str; 12] = [
    "passengerId",
    "survived",
    "pClass",
    "name",
    "sex",
    "age",
    "sibSp",
    "parch",
    "ticket",
    "fare",
    "cabin",
    "embarked",
];

/// Resolves a requested attribute name (column name or JSON key, any case) to its JSON key.
pub fn resolve_attribute(name: &str) -> Option<&'static str> {
    let name = name.trim();
    CSV_COLUMNS
        .iter()
        .zip(JSON_KEYS)
        .find(|(column, key)| column.eq_ignore_ascii_case(name) || key.eq_ignore_ascii_case(name))
        .map(|(_, key)| key)
}

/// Keeps only the requested attributes of `passenger`, keyed by their JSON names.
///
/// Unknown names are ignored. A requested optional attribute that is absent
/// comes back as `null`.
pub fn project_attributes(passenger: &Passenger, attributes: &[String]) -> Result<Map<String, Value>> {
    let full = match serde_json::to_value(passenger)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut projected = Map::new();
    for key in attributes.iter().filter_map(|name| resolve_attribute(name)) {
        let value = full.get(key).cloned().unwrap_or(Value::Null);
        projected.insert(key.to_string(), value);
    }
    Ok(projected)
}
