// src/listview/record.rs

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::errors::{Result, RowdeckError};

/// Stable identity of a record: the id of the source row it was loaded from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    /// A fractional number as it was written in the feed, e.g. `1500.00`.
    /// Displays and searches as `text`, sorts and sums as `value`.
    Decimal { value: f64, text: String },
}

impl FieldValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Integer(i) => Cow::Owned(i.to_string()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Decimal { text, .. } => Cow::Borrowed(text.as_str()),
        }
    }

    /// Numeric view of the value. Anything that does not parse, and any
    /// non-finite number, counts as 0.
    pub fn as_number(&self) -> f64 {
        let n = match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => parse_leading_number(s),
            FieldValue::Bool(_) => 0.0,
            FieldValue::Decimal { value, .. } => *value,
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

// Rows rendered by the backend carry numbers as attribute text ("1699999999",
// "2500000.00", sometimes with a unit suffix). Take the longest numeric prefix.
fn parse_leading_number(s: &str) -> f64 {
    let s = s.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
            }
            '-' | '+' if i == 0 => {}
            _ => break,
        }
    }
    if !seen_digit {
        return 0.0;
    }
    s[..end].parse::<f64>().unwrap_or(0.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text of a field, empty when the field is absent.
    pub fn text(&self, field: &str) -> Cow<'_, str> {
        self.fields
            .get(field)
            .map(FieldValue::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Numeric value of a field, 0 when absent or unparseable.
    pub fn number(&self, field: &str) -> f64 {
        self.fields.get(field).map(FieldValue::as_number).unwrap_or(0.0)
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The full, unfiltered set of records behind one list view.
#[derive(Clone, Debug, Default)]
pub struct RowSource {
    records: Vec<Record>,
}

impl RowSource {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(RowdeckError::DuplicateRecordId(record.id().to_string()));
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: &RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Removes exactly the record with `id`. `Vec::remove` shifts the tail,
    /// so the relative order of the remaining records is unchanged.
    pub(crate) fn remove(&mut self, id: &RecordId) -> Option<Record> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_coerce_to_zero_when_unparseable() {
        assert_eq!(FieldValue::from("abc").as_number(), 0.0);
        assert_eq!(FieldValue::from("").as_number(), 0.0);
        assert_eq!(FieldValue::from("42").as_number(), 42.0);
        assert_eq!(FieldValue::from(" 2500000.50 ").as_number(), 2500000.5);
        assert_eq!(FieldValue::from("12 plots").as_number(), 12.0);
        assert_eq!(FieldValue::from(f64::NAN).as_number(), 0.0);
        assert_eq!(FieldValue::from(true).as_number(), 0.0);
    }

    #[test]
    fn missing_fields_read_as_empty_or_zero() {
        let record = Record::new("1").with("name", "Asha");
        assert_eq!(record.text("email"), "");
        assert_eq!(record.number("date"), 0.0);
        assert_eq!(record.text("name"), "Asha");
    }

    #[test]
    fn row_source_rejects_duplicate_ids() {
        let err = RowSource::new(vec![Record::new("a"), Record::new("b"), Record::new("a")]).unwrap_err();
        assert!(matches!(err, RowdeckError::DuplicateRecordId(id) if id == "a"));
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut source = RowSource::new(vec![
            Record::new("a"),
            Record::new("b"),
            Record::new("c"),
            Record::new("d"),
        ])
        .unwrap();
        let removed = source.remove(&RecordId::from("b")).unwrap();
        assert_eq!(removed.id().as_str(), "b");
        let ids: Vec<&str> = source.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
        assert!(source.remove(&RecordId::from("b")).is_none());
    }
}
