// src/feed.rs
// Loads the initial records of a view from a JSON file. Either a bare array
// of objects or an object with a `records` array.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{Result, RowdeckError};
use crate::listview::{FieldValue, Record, RowSource};

pub const DEFAULT_ID_FIELD: &str = "id";

pub fn load_feed(path: &Path, id_field: &str) -> Result<RowSource> {
    info!("Loading records from {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    parse_feed(&raw, id_field)
}

pub fn parse_feed(raw: &str, id_field: &str) -> Result<RowSource> {
    let value: Value = serde_json::from_str(raw)?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("records") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(RowdeckError::MalformedFeed(
                    "expected a 'records' array".to_string(),
                ))
            }
        },
        _ => {
            return Err(RowdeckError::MalformedFeed(
                "expected an array of records".to_string(),
            ))
        }
    };

    let records = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(map) => record_from(index, map, id_field),
            _ => Err(RowdeckError::MalformedFeed(format!("entry {} is not an object", index))),
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("Parsed {} records", records.len());
    RowSource::new(records)
}

fn record_from(index: usize, mut map: Map<String, Value>, id_field: &str) -> Result<Record> {
    let id = match map.remove(id_field) {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Err(RowdeckError::MissingRecordId {
                index,
                field: id_field.to_string(),
            })
        }
    };
    let mut record = Record::new(id);
    for (field, value) in map {
        let value = match value {
            Value::Null => continue,
            Value::Bool(b) => FieldValue::Bool(b),
            // With arbitrary_precision the number keeps its source lexeme.
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Decimal {
                    value: n.as_f64().unwrap_or(0.0),
                    text: n.to_string(),
                },
            },
            Value::String(s) => FieldValue::Text(s),
            Value::Array(_) | Value::Object(_) => {
                return Err(RowdeckError::UnsupportedFieldValue { index, field })
            }
        };
        record.set(&field, value);
    }
    Ok(record)
}
