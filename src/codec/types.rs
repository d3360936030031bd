//! # Record and Table Types
//!
//! A `Record` is an ordered mapping from column name to string value.
//! A `Table` is an ordered sequence of records plus the explicit column
//! list that governs serialization order.
//!
//! Column order is carried explicitly on the table rather than inferred
//! from the first record at serialize time, so an empty table and a
//! populated table serialize against the same schema.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The fixed column set used when the backing file declares none.
pub const DEFAULT_COLUMNS: [&str; 3] = ["name", "roll", "marks"];

/// One student's data as an ordered column-name → value mapping.
///
/// Values are kept exactly as stored (strings, no typing); insertion
/// order is preserved and drives JSON key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record(Vec<(String, String)>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a column/value pair, preserving insertion order.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.push((column.into(), value.into()));
    }

    /// Look up a value by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate column/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Number of columns in this record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, value) in &self.0 {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((column, value)) = access.next_entry::<String, String>()? {
                    pairs.push((column, value));
                }
                Ok(Record(pairs))
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// An ordered sequence of records sharing one column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Create an empty table with the given column order.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Create a table from a column list and pre-built records.
    pub fn from_parts(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// The column names in serialization order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Append a record at the end of the table.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Number of records (the header is not a record).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds zero records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Table {
    /// An empty table over the fixed `name`, `roll`, `marks` columns.
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_insertion_order() {
        let mut record = Record::new();
        record.push("name", "Alice");
        record.push("roll", "1");
        record.push("marks", "90");

        let columns: Vec<&str> = record.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["name", "roll", "marks"]);
    }

    #[test]
    fn test_record_get() {
        let mut record = Record::new();
        record.push("name", "Alice");
        assert_eq!(record.get("name"), Some("Alice"));
        assert_eq!(record.get("marks"), None);
    }

    #[test]
    fn test_record_json_object_keys_in_order() {
        let mut record = Record::new();
        record.push("name", "Alice");
        record.push("roll", "1");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Alice","roll":"1"}"#);
    }

    #[test]
    fn test_record_json_round_trip() {
        let mut record = Record::new();
        record.push("name", "Bob");
        record.push("roll", "2");
        record.push("marks", "80");

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_default_table_columns() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.columns(), &["name", "roll", "marks"]);
    }
}
