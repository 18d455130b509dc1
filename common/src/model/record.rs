use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format;

/// Foreign key tying an action record to its investigation's file number.
pub const INVESTIGATION_KEY: &str = "investigation";

/// Server-assigned identifier of a record, numeric or string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
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

/// A schema-less REST record: whatever object the server returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn id(&self) -> Option<RecordId> {
        self.0.get("id").and_then(RecordId::from_value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value as form text; empty for missing keys.
    pub fn text(&self, key: &str) -> String {
        self.0.get(key).map(format::plain).unwrap_or_default()
    }

    pub fn added_on(&self) -> Option<&str> {
        self.0.get("added_on").and_then(Value::as_str)
    }

    pub fn updated_on(&self) -> Option<&str> {
        self.0.get("updated_on").and_then(Value::as_str)
    }

    pub fn added_by(&self) -> Option<String> {
        self.0
            .get("added_by")
            .filter(|v| !v.is_null())
            .map(format::plain)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let numeric: Record = serde_json::from_value(json!({"id": 7})).unwrap();
        let textual: Record = serde_json::from_value(json!({"id": "a-7"})).unwrap();
        let missing: Record = serde_json::from_value(json!({"amount": 1})).unwrap();
        assert_eq!(numeric.id(), Some(RecordId::new("7")));
        assert_eq!(textual.id(), Some(RecordId::new("a-7")));
        assert_eq!(missing.id(), None);
    }

    #[test]
    fn audit_accessors() {
        let record: Record = serde_json::from_value(json!({
            "id": 1,
            "added_by": 12,
            "added_on": "2025-01-02T10:00:00Z",
            "updated_on": null
        }))
        .unwrap();
        assert_eq!(record.added_by().as_deref(), Some("12"));
        assert_eq!(record.added_on(), Some("2025-01-02T10:00:00Z"));
        assert_eq!(record.updated_on(), None);
    }
}
