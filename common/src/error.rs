//! Normalized errors for calls against the investigation REST API.
//!
//! Every failure a screen can see is folded into [`ApiError`]. The server speaks a
//! handful of body shapes (`{"message": ..}`, `{"detail": ..}`, field-keyed validation
//! maps, plain text); [`ApiError::from_response`] picks the most useful human-readable
//! line out of whichever one arrives so screens can show it verbatim.

use serde_json::Value;
use thiserror::Error;

/// Message used when a failure carries nothing readable.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, aborted).
    #[error("network error: {0}")]
    Network(String),

    /// The server rejected the session token.
    #[error("session expired")]
    Unauthorized,

    /// Any other non-2xx response.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = extract_message(body).unwrap_or_else(|| fallback_message(status));
        ApiError::Server { status, message }
    }

    /// The text shown to the user in banners and toasts.
    pub fn message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Decode(_) => GENERIC_MESSAGE.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

fn fallback_message(status: u16) -> String {
    match status {
        400 => "The request was rejected by the server.".to_string(),
        403 => "You do not have permission to perform this action.".to_string(),
        404 => "The requested record was not found.".to_string(),
        500..=599 => "The server failed to process the request.".to_string(),
        _ => GENERIC_MESSAGE.to_string(),
    }
}

/// Pulls a readable message out of a response body.
///
/// Preference order: `message`, `detail`, `error`, `non_field_errors`, then the first
/// field error of a validation map (rendered as `field: problem`). A non-JSON body is
/// used as-is unless it looks like an HTML error page.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) if trimmed.starts_with('<') => return None,
        Err(_) => return Some(trimmed.to_string()),
    };

    match &value {
        Value::Object(map) => {
            for key in ["message", "detail", "error", "non_field_errors"] {
                if let Some(text) = map.get(key).and_then(first_text) {
                    return Some(text);
                }
            }
            map.iter().find_map(|(field, problem)| {
                first_text(problem).map(|text| format!("{}: {}", field, text))
            })
        }
        other => first_text(other),
    }
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => items.iter().find_map(first_text),
        Value::Object(map) => map.values().find_map(first_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_field() {
        let err = ApiError::from_response(400, r#"{"message":"File number already exists"}"#);
        assert_eq!(err.message(), "File number already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn reads_detail_field() {
        let err = ApiError::from_response(404, r#"{"detail":"Not found."}"#);
        assert_eq!(err.message(), "Not found.");
    }

    #[test]
    fn flattens_field_validation_errors() {
        let err = ApiError::from_response(400, r#"{"gstin":["Ensure this field has no more than 15 characters."]}"#);
        assert_eq!(
            err.message(),
            "gstin: Ensure this field has no more than 15 characters."
        );
    }

    #[test]
    fn non_field_errors_win_over_fields() {
        let err = ApiError::from_response(
            400,
            r#"{"amount":["A valid number is required."],"non_field_errors":["Investigation is closed."]}"#,
        );
        assert_eq!(err.message(), "Investigation is closed.");
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        let err = ApiError::from_response(502, "upstream unavailable");
        assert_eq!(err.message(), "upstream unavailable");
    }

    #[test]
    fn html_or_empty_body_falls_back_to_generic_text() {
        let html = ApiError::from_response(500, "<html><body>Server Error</body></html>");
        assert_eq!(html.message(), "The server failed to process the request.");

        let empty = ApiError::from_response(418, "");
        assert_eq!(empty.message(), GENERIC_MESSAGE);
    }

    #[test]
    fn unauthorized_is_distinct() {
        let err = ApiError::from_response(401, r#"{"detail":"Invalid token."}"#);
        assert!(err.is_unauthorized());
    }
}
