//! Nested input record model
//!
//! A [`Record`] is the typed form of one JSON-like input item. Path
//! resolution pattern-matches over this union instead of relying on
//! duck-typed lookups with empty-mapping defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Leaf value of a record tree
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// JSON `null`
    Null,
    /// Boolean
    Bool(bool),
    /// Integer or floating point number
    Number(Number),
    /// Text
    Text(String),
}

/// Tree of named fields
///
/// # Examples
///
/// ```
/// use sheetforge::domain::record::Record;
/// use serde_json::json;
///
/// let record = Record::from(json!({"user": {"name": "Ada"}}));
/// assert!(record.is_container());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Record {
    /// No value at this position
    #[default]
    Absent,
    /// Leaf value
    Scalar(Scalar),
    /// Named fields
    Container(BTreeMap<String, Record>),
    /// Ordered items
    Sequence(Vec<Record>),
}

impl Record {
    /// Look up a named child; `None` for missing keys and non-containers
    pub fn field(&self, key: &str) -> Option<&Record> {
        match self {
            Record::Container(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Look up a sequence item; `None` out of range and for non-sequences
    pub fn item(&self, index: usize) -> Option<&Record> {
        match self {
            Record::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Whether this node holds named fields
    pub fn is_container(&self) -> bool {
        matches!(self, Record::Container(_))
    }

    /// Render the subtree as compact JSON text
    pub fn to_json_string(&self) -> String {
        Value::from(self.clone()).to_string()
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Record::Scalar(Scalar::Null),
            Value::Bool(b) => Record::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Record::Scalar(Scalar::Number(n)),
            Value::String(s) => Record::Scalar(Scalar::Text(s)),
            Value::Array(items) => Record::Sequence(items.into_iter().map(Record::from).collect()),
            Value::Object(map) => Record::Container(
                map.into_iter()
                    .map(|(key, value)| (key, Record::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        match record {
            Record::Absent | Record::Scalar(Scalar::Null) => Value::Null,
            Record::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Record::Scalar(Scalar::Number(n)) => Value::Number(n),
            Record::Scalar(Scalar::Text(s)) => Value::String(s),
            Record::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Record::Container(fields) => {
                let mut map = Map::new();
                for (key, value) in fields {
                    map.insert(key, Value::from(value));
                }
                Value::Object(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object() {
        let record = Record::from(json!({"a": {"b": 1}, "tags": ["x"]}));

        let inner = record.field("a").unwrap();
        assert!(inner.is_container());
        assert_eq!(
            inner.field("b"),
            Some(&Record::Scalar(Scalar::Number(1.into())))
        );
        assert_eq!(
            record.field("tags").and_then(|t| t.item(0)),
            Some(&Record::Scalar(Scalar::Text("x".to_string())))
        );
    }

    #[test]
    fn test_field_on_scalar_is_none() {
        let record = Record::from(json!("plain"));
        assert!(record.field("anything").is_none());
        assert!(record.item(0).is_none());
    }

    #[test]
    fn test_json_rendering() {
        let record = Record::from(json!({"b": [1, 2], "a": null}));
        assert_eq!(record.to_json_string(), r#"{"a":null,"b":[1,2]}"#);
    }

    #[test]
    fn test_deserialize_from_json_array() {
        let records: Vec<Record> = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].field("id").is_some());
    }
}
