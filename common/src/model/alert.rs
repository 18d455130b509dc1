use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An entry of `investigation/alerts/`: a reminder raised by the server, such as an
/// SCN reply date falling due.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    pub id: Option<Value>,
    pub title: String,
    pub message: Option<String>,
    pub due_date: Option<String>,
    pub file_number: Option<String>,
}
