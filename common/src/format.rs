//! Display formatting for values coming back from the API.
//!
//! Amounts are shown in rupees with Indian digit grouping (`₹12,34,567`), dates as
//! `dd/mm/yyyy`. Anything that cannot be parsed is shown exactly as the server sent it.

use chrono::{DateTime, NaiveDate};
use num_format::{CustomFormat, Grouping, ToFormattedString};
use serde_json::Value;

use crate::schema::{FieldSpec, InputKind};

/// Placeholder for empty values in cards and detail grids.
pub const EMPTY: &str = "—";

fn indian_grouping() -> CustomFormat {
    CustomFormat::builder()
        .grouping(Grouping::Indian)
        .separator(",")
        .build()
        .unwrap_or_default()
}

/// Formats a JSON number or numeric string as rupees. Paise are shown only when
/// non-zero.
pub fn currency(value: &Value) -> Option<String> {
    let amount = as_f64(value)?;
    let negative = amount < 0.0;
    let total_paise = (amount.abs() * 100.0).round() as u64;
    let rupees = total_paise / 100;
    let paise = total_paise % 100;

    let mut out = String::new();
    if negative && total_paise > 0 {
        out.push('-');
    }
    out.push('₹');
    out.push_str(&rupees.to_formatted_string(&indian_grouping()));
    if paise > 0 {
        out.push_str(&format!(".{:02}", paise));
    }
    Some(out)
}

/// Formats `yyyy-mm-dd` as `dd/mm/yyyy`, and RFC 3339 timestamps as
/// `dd/mm/yyyy HH:MM`.
pub fn date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day.format("%d/%m/%Y").to_string());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.format("%d/%m/%Y %H:%M").to_string())
}

/// Renders a record value for read-only display according to its field spec.
pub fn display(field: &FieldSpec, value: Option<&Value>) -> String {
    let value = match value {
        None | Some(Value::Null) => return EMPTY.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => return EMPTY.to_string(),
        Some(v) => v,
    };

    let formatted = match field.input {
        InputKind::Amount => currency(value),
        InputKind::Date => value.as_str().and_then(date),
        InputKind::Select(options) => {
            let raw = plain(value);
            options
                .iter()
                .find(|option| option.value == raw)
                .map(|option| option.label.to_string())
        }
        _ => None,
    };
    formatted.unwrap_or_else(|| plain(value))
}

/// Renders any JSON scalar the way a form input would hold it.
pub fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn currency_uses_indian_grouping() {
        assert_eq!(currency(&json!(5000)).as_deref(), Some("₹5,000"));
        assert_eq!(currency(&json!(1234567)).as_deref(), Some("₹12,34,567"));
        assert_eq!(currency(&json!(999)).as_deref(), Some("₹999"));
    }

    #[test]
    fn currency_accepts_decimal_strings() {
        assert_eq!(currency(&json!("5000.00")).as_deref(), Some("₹5,000"));
        assert_eq!(currency(&json!("100000.5")).as_deref(), Some("₹1,00,000.50"));
        assert_eq!(currency(&json!(-250)).as_deref(), Some("-₹250"));
        assert_eq!(currency(&json!("n/a")), None);
    }

    #[test]
    fn dates_are_day_first() {
        assert_eq!(date("2025-01-01").as_deref(), Some("01/01/2025"));
        assert_eq!(
            date("2025-03-09T14:05:00+05:30").as_deref(),
            Some("09/03/2025 14:05")
        );
        assert_eq!(date("sometime"), None);
    }

    #[test]
    fn plain_drops_trailing_zero_fraction() {
        assert_eq!(plain(&json!(5000.0)), "5000");
        assert_eq!(plain(&json!(12.5)), "12.5");
        assert_eq!(plain(&json!("x")), "x");
        assert_eq!(plain(&Value::Null), "");
    }
}
