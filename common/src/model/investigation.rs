use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::format;

/// Parent case record, keyed by its file number.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Investigation {
    #[serde(deserialize_with = "text")]
    pub file_number: String,
    #[serde(deserialize_with = "optional_text")]
    pub source: Option<String>,
    pub date_of_receipt: Option<String>,
    pub date_of_initiation: Option<String>,
    /// Free text or an officer's primary key, depending on the server.
    #[serde(deserialize_with = "optional_text")]
    pub assigned_officer: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub nature_of_offence: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub period_involved: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub remarks: Option<String>,
    #[serde(deserialize_with = "rows")]
    pub taxpayers: Vec<Taxpayer>,
    pub added_by: Option<Value>,
    pub added_on: Option<String>,
    pub updated_on: Option<String>,
}

impl Investigation {
    /// Name of the first taxpayer, the label investigations are known by.
    pub fn lead_taxpayer(&self) -> Option<&str> {
        self.taxpayers
            .first()
            .map(|t| t.trade_name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&t.name))
    }

    /// Case-insensitive match on file number, GSTIN or taxpayer name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.file_number.to_lowercase().contains(&query)
            || self.taxpayers.iter().any(|t| {
                t.gstin.to_lowercase().contains(&query)
                    || t.name.to_lowercase().contains(&query)
                    || t
                        .trade_name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&query))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxpayer {
    #[serde(deserialize_with = "text")]
    pub gstin: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "optional_text")]
    pub trade_name: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub mobile: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub division_name: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub range_name: Option<String>,
}

// Descriptive columns may arrive as null or as a number (an officer key, say). Any
// scalar is kept as its display text so one odd row never blanks a listing.

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(|value| format::plain(&value))
        .unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(|value| !value.is_null())
        .map(|value| format::plain(&value)))
}

fn rows<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Taxpayer>, D::Error> {
    Ok(Option::<Vec<Taxpayer>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A division and the ranges under it, as served by `investigation/divisions/`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Division {
    pub name: String,
    pub ranges: Vec<Range>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_detail_with_sparse_taxpayer() {
        let investigation: Investigation = serde_json::from_value(json!({
            "file_number": "ABC123",
            "taxpayers": [{"gstin": "22AAAAA0000A1Z5", "name": "Test Co"}]
        }))
        .unwrap();
        assert_eq!(investigation.file_number, "ABC123");
        assert_eq!(investigation.taxpayers[0].name, "Test Co");
        assert_eq!(investigation.lead_taxpayer(), Some("Test Co"));
        assert_eq!(investigation.source, None);
    }

    #[test]
    fn officer_given_as_a_key_still_decodes() {
        let investigation: Investigation = serde_json::from_value(json!({
            "file_number": "ABC123",
            "assigned_officer": 12,
            "remarks": null,
            "taxpayers": [{"gstin": "22AAAAA0000A1Z5", "name": "Test Co"}]
        }))
        .unwrap();
        assert_eq!(investigation.assigned_officer.as_deref(), Some("12"));
        assert_eq!(investigation.remarks, None);
    }

    #[test]
    fn null_taxpayer_columns_decode_as_blank() {
        let investigations: Vec<Investigation> = serde_json::from_value(json!([
            {"file_number": "ABC123", "taxpayers": [{"gstin": null, "name": null, "trade_name": "Test Co"}]},
            {"file_number": "XYZ789", "taxpayers": null}
        ]))
        .unwrap();
        let taxpayer = &investigations[0].taxpayers[0];
        assert_eq!(taxpayer.gstin, "");
        assert_eq!(taxpayer.name, "");
        assert_eq!(investigations[0].lead_taxpayer(), Some("Test Co"));
        assert!(investigations[0].matches("test"));
        assert!(investigations[1].taxpayers.is_empty());
    }

    #[test]
    fn filter_matches_file_number_and_taxpayers() {
        let investigation = Investigation {
            file_number: "INV/2025/07".to_string(),
            taxpayers: vec![Taxpayer {
                gstin: "22AAAAA0000A1Z5".to_string(),
                name: "Test Co".to_string(),
                trade_name: Some("Testing Traders".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(investigation.matches("2025"));
        assert!(investigation.matches("traders"));
        assert!(investigation.matches("22aaaaa"));
        assert!(investigation.matches("  "));
        assert!(!investigation.matches("acme"));
        assert_eq!(investigation.lead_taxpayer(), Some("Testing Traders"));
    }
}
