//! Threat record shape and batch validation.

use serde_json::{Map, Value};

use crate::domain::DataError;

/// One unit of threat-intelligence data. Opaque apart from `id`.
pub type Record = Map<String, Value>;

/// Keys every record must carry.
pub const REQUIRED_KEYS: &[&str] = &["id"];

/// A validation failure together with the log line describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub error: DataError,
    pub detail: String,
}

impl Rejection {
    fn new(error: DataError, detail: String) -> Self {
        Self { error, detail }
    }
}

/// Validate raw batches and concatenate them in the given order.
///
/// Every batch must be a JSON array before any record is inspected. Records are then
/// checked in concatenated order and the first violation aborts the whole result.
pub fn validate_batches(batches: &[Value]) -> Result<Vec<Record>, Rejection> {
    if batches.iter().any(|batch| !batch.is_array()) {
        let types = batches.iter().map(type_name).collect::<Vec<_>>().join(" or ");
        return Err(Rejection::new(
            DataError::UnexpectedDataType,
            format!("Invalid data type received: {types}."),
        ));
    }

    let total = batches.iter().filter_map(Value::as_array).map(Vec::len).sum();
    let mut valid = Vec::with_capacity(total);
    for entry in batches.iter().filter_map(Value::as_array).flatten() {
        valid.push(validate_record(entry)?);
    }
    Ok(valid)
}

/// Check one entry: object first, then `id` type, then required key presence.
pub fn validate_record(entry: &Value) -> Result<Record, Rejection> {
    let Some(record) = entry.as_object() else {
        return Err(Rejection::new(
            DataError::UnexpectedDataType,
            format!("Unexpected data type in entry: {entry}"),
        ));
    };

    if record.get("id").is_some_and(|id| !is_valid_id(id)) {
        return Err(Rejection::new(
            DataError::CorruptData,
            format!("Corrupt data in entry: {entry}. 'id' key has invalid type."),
        ));
    }

    if REQUIRED_KEYS.iter().any(|key| !record.contains_key(*key)) {
        return Err(Rejection::new(
            DataError::MissingRequiredKeys,
            format!("Missing required data keys in entry: {entry}."),
        ));
    }

    Ok(record.clone())
}

/// Strings and integers of any width; floats, booleans and null are not identifiers.
fn is_valid_id(id: &Value) -> bool {
    match id {
        Value::String(_) => true,
        Value::Number(n) => !n.to_string().contains(['.', 'e', 'E']),
        _ => false,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
