//! Editable form state derived from a schema.
//!
//! A [`DraftRow`] holds every scalar field as the text its input shows, plus the
//! nested rows of each sub-list. Rows opened from a server record remember the values
//! they were opened with, so an untouched field goes back to the server exactly as it
//! came (a `"5000.00"` decimal string stays a string, a `null` stays `null`). Only
//! fields the user changed are converted from text according to their input kind.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::format;
use crate::model::record::Record;
use crate::schema::{EntitySchema, FieldSpec, InputKind, SubListSpec};

/// Address of a nested row: each step names a sub-list and the row index within it.
pub type RowPath = Vec<(&'static str, usize)>;

/// Address of one input: the row it lives in and its field key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub row: RowPath,
    pub key: &'static str,
}

impl FieldPath {
    pub fn top(key: &'static str) -> Self {
        Self {
            row: Vec::new(),
            key,
        }
    }

    pub fn nested(row: RowPath, key: &'static str) -> Self {
        Self { row, key }
    }
}

impl fmt::Display for FieldPath {
    /// Dotted form used as the HTML `name`/`id` of the input: `statements.0.documents.1.pages`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (list, index) in &self.row {
            write!(f, "{}.{}.", list, index)?;
        }
        f.write_str(self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Missing,
    TooLong(u32),
    NotANumber,
    InvalidDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: FieldPath,
    pub label: &'static str,
    pub problem: Problem,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            Problem::Missing => write!(f, "{} is required.", self.label),
            Problem::TooLong(max) => {
                write!(f, "{} must be at most {} characters.", self.label, max)
            }
            Problem::NotANumber => write!(f, "{} must be a number.", self.label),
            Problem::InvalidDate => write!(f, "{} must be a valid date.", self.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DraftRow {
    /// Server id of a nested row that already exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    values: BTreeMap<&'static str, String>,
    lists: BTreeMap<&'static str, Vec<DraftRow>>,
    #[serde(skip)]
    origin: Map<String, Value>,
}

impl DraftRow {
    pub fn blank(fields: &'static [FieldSpec], lists: &'static [SubListSpec]) -> Self {
        Self {
            id: None,
            values: fields.iter().map(|f| (f.key, String::new())).collect(),
            lists: lists.iter().map(|l| (l.key, Vec::new())).collect(),
            origin: Map::new(),
        }
    }

    pub fn from_map(
        fields: &'static [FieldSpec],
        lists: &'static [SubListSpec],
        source: &Map<String, Value>,
    ) -> Self {
        let values = fields
            .iter()
            .map(|f| (f.key, source.get(f.key).map(format::plain).unwrap_or_default()))
            .collect();
        let lists = lists
            .iter()
            .map(|list| {
                let rows = source
                    .get(list.key)
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_object)
                            .map(|item| DraftRow::from_map(list.fields, list.children, item))
                            .collect()
                    })
                    .unwrap_or_default();
                (list.key, rows)
            })
            .collect();
        let origin = fields
            .iter()
            .filter_map(|f| source.get(f.key).map(|v| (f.key.to_string(), v.clone())))
            .collect();
        Self {
            id: source.get("id").filter(|v| !v.is_null()).cloned(),
            values,
            lists,
            origin,
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &'static str, value: String) {
        self.values.insert(key, value);
    }

    pub fn rows(&self, list: &str) -> &[DraftRow] {
        self.lists.get(list).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row(&self, path: &[(&'static str, usize)]) -> Option<&DraftRow> {
        match path.split_first() {
            None => Some(self),
            Some(((list, index), rest)) => self.lists.get(list)?.get(*index)?.row(rest),
        }
    }

    pub fn row_mut(&mut self, path: &[(&'static str, usize)]) -> Option<&mut DraftRow> {
        match path.split_first() {
            None => Some(self),
            Some(((list, index), rest)) => self.lists.get_mut(list)?.get_mut(*index)?.row_mut(rest),
        }
    }

    /// Converts the row to the JSON object sent to the server.
    pub fn payload(&self, fields: &[FieldSpec], lists: &[SubListSpec]) -> Map<String, Value> {
        let mut out = Map::new();
        if let Some(id) = &self.id {
            out.insert("id".to_string(), id.clone());
        }
        for field in fields {
            let text = self.get(field.key);
            let value = match self.origin.get(field.key) {
                Some(original) if format::plain(original) == text => original.clone(),
                _ => convert(field, text),
            };
            out.insert(field.key.to_string(), value);
        }
        for list in lists {
            let rows = self
                .rows(list.key)
                .iter()
                .map(|row| Value::Object(row.payload(list.fields, list.children)))
                .collect();
            out.insert(list.key.to_string(), Value::Array(rows));
        }
        out
    }

    fn collect_issues(
        &self,
        fields: &[FieldSpec],
        lists: &[SubListSpec],
        at: &RowPath,
        issues: &mut Vec<FieldIssue>,
    ) {
        for field in fields {
            if let Some(problem) = check(field, self.get(field.key)) {
                issues.push(FieldIssue {
                    path: FieldPath::nested(at.clone(), field.key),
                    label: field.label,
                    problem,
                });
            }
        }
        for list in lists {
            for (index, row) in self.rows(list.key).iter().enumerate() {
                let mut nested = at.clone();
                nested.push((list.key, index));
                row.collect_issues(list.fields, list.children, &nested, issues);
            }
        }
    }

    pub fn issues(&self, fields: &[FieldSpec], lists: &[SubListSpec]) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        self.collect_issues(fields, lists, &Vec::new(), &mut issues);
        issues
    }
}

/// Form state of one record of an [`EntitySchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    schema: &'static EntitySchema,
    root: DraftRow,
    baseline: String,
}

impl FormDraft {
    pub fn blank(schema: &'static EntitySchema) -> Self {
        Self::with_root(schema, DraftRow::blank(schema.fields, schema.sub_lists))
    }

    /// Pre-fills the draft from a record fetched for editing.
    pub fn from_record(schema: &'static EntitySchema, record: &Record) -> Self {
        Self::with_root(
            schema,
            DraftRow::from_map(schema.fields, schema.sub_lists, &record.0),
        )
    }

    fn with_root(schema: &'static EntitySchema, root: DraftRow) -> Self {
        let baseline = fingerprint(&root);
        Self {
            schema,
            root,
            baseline,
        }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn root(&self) -> &DraftRow {
        &self.root
    }

    pub fn value(&self, path: &FieldPath) -> &str {
        self.root.row(&path.row).map(|row| row.get(path.key)).unwrap_or("")
    }

    pub fn set(&mut self, path: &FieldPath, value: String) {
        if let Some(row) = self.root.row_mut(&path.row) {
            row.set(path.key, value);
        }
    }

    /// Appends a blank row to `list` under the row at `parent`.
    pub fn add_row(&mut self, parent: &RowPath, list: &'static str) {
        let Some(spec) = self.schema.sub_list(parent, list) else {
            return;
        };
        if let Some(row) = self.root.row_mut(parent) {
            row.lists
                .entry(spec.key)
                .or_default()
                .push(DraftRow::blank(spec.fields, spec.children));
        }
    }

    pub fn remove_row(&mut self, parent: &RowPath, list: &'static str, index: usize) {
        if let Some(rows) = self.root.row_mut(parent).and_then(|row| row.lists.get_mut(list)) {
            if index < rows.len() {
                rows.remove(index);
            }
        }
    }

    pub fn issues(&self) -> Vec<FieldIssue> {
        self.root.issues(self.schema.fields, self.schema.sub_lists)
    }

    /// Body for POST/PUT. Server-owned keys are never included at the top level.
    pub fn payload(&self) -> Map<String, Value> {
        let mut body = self.root.payload(self.schema.fields, self.schema.sub_lists);
        body.remove("id");
        body
    }

    pub fn is_dirty(&self) -> bool {
        fingerprint(&self.root) != self.baseline
    }

}

fn fingerprint(row: &DraftRow) -> String {
    serde_json::to_string(row).unwrap_or_default()
}

/// Converts the text of an edited input into its JSON value.
pub fn convert(field: &FieldSpec, text: &str) -> Value {
    let trimmed = text.trim();
    match field.input {
        InputKind::Number | InputKind::Amount => {
            if trimmed.is_empty() {
                Value::Null
            } else if let Ok(n) = trimmed.parse::<i64>() {
                Value::Number(n.into())
            } else {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(trimmed.to_string()))
            }
        }
        InputKind::Date if trimmed.is_empty() => Value::Null,
        InputKind::Date => Value::String(trimmed.to_string()),
        _ => Value::String(text.to_string()),
    }
}

/// Mirrors the browser's constraint validation for one input.
///
/// Number and date inputs sanitize whitespace to an empty value, so only they treat a
/// blank-looking entry as missing; text inputs accept whitespace like `required` does.
pub fn check(field: &FieldSpec, text: &str) -> Option<Problem> {
    let trimmed = text.trim();
    let blank = match field.input {
        InputKind::Number | InputKind::Amount | InputKind::Date => trimmed.is_empty(),
        _ => text.is_empty(),
    };
    if blank {
        return field.required.then_some(Problem::Missing);
    }
    if let Some(max) = field.max_length {
        if text.chars().count() > max as usize {
            return Some(Problem::TooLong(max));
        }
    }
    match field.input {
        InputKind::Number | InputKind::Amount if trimmed.parse::<f64>().is_err() => {
            Some(Problem::NotANumber)
        }
        InputKind::Date if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() => {
            Some(Problem::InvalidDate)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::entities::{ADVISORY, SUMMONS};
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn blank_draft_reports_every_required_field() {
        let draft = FormDraft::blank(&ADVISORY);
        let missing: Vec<_> = draft.issues().into_iter().map(|i| i.path.key).collect();
        assert_eq!(missing, vec!["advisory_issued_date", "amount"]);
    }

    #[test]
    fn edited_values_are_typed_by_input_kind() {
        let mut draft = FormDraft::blank(&ADVISORY);
        draft.set(&FieldPath::top("advisory_issued_date"), "2025-01-01".into());
        draft.set(&FieldPath::top("amount"), "5000".into());
        let body = draft.payload();
        assert_eq!(body["advisory_issued_date"], json!("2025-01-01"));
        assert_eq!(body["amount"], json!(5000));
        assert_eq!(body["paid_date"], Value::Null);
        assert_eq!(body["remarks"], json!(""));
        assert!(draft.issues().is_empty());
    }

    #[test]
    fn unchanged_edit_reproduces_the_record() {
        let original = record(json!({
            "id": 9,
            "investigation": "ABC123",
            "advisory_issued_date": "2025-01-01",
            "amount": "5000.00",
            "paid_date": null,
            "remarks": "",
            "added_on": "2025-01-02T10:00:00Z"
        }));
        let draft = FormDraft::from_record(&ADVISORY, &original);
        assert!(!draft.is_dirty());
        let body = draft.payload();
        for field in ADVISORY.fields {
            assert_eq!(body.get(field.key), original.get(field.key), "{}", field.key);
        }
        assert!(!body.contains_key("id"));
        assert!(!body.contains_key("added_on"));
    }

    #[test]
    fn nested_rows_round_trip_and_keep_ids() {
        let original = record(json!({
            "id": 3,
            "summons_date": "2025-02-01",
            "person_summoned": "R. Kumar",
            "appearance_date": "2025-02-10",
            "purpose": "Statement",
            "statements": [{
                "id": 31,
                "statement_date": "2025-02-10",
                "recorded_by": "SIO",
                "summary": "Admitted liability",
                "documents": [{"id": 311, "document_name": "Ledger", "pages": 12}]
            }]
        }));
        let draft = FormDraft::from_record(&SUMMONS, &original);
        let body = draft.payload();
        assert_eq!(body.get("statements"), original.get("statements"));
        assert_eq!(
            draft.value(&FieldPath::nested(vec![("statements", 0), ("documents", 0)], "pages")),
            "12"
        );
    }

    #[test]
    fn rows_can_be_added_edited_and_removed() {
        let mut draft = FormDraft::blank(&SUMMONS);
        draft.add_row(&vec![], "statements");
        draft.add_row(&vec![("statements", 0)], "documents");
        draft.add_row(&vec![("statements", 0)], "documents");
        assert!(draft.is_dirty());

        let doc = FieldPath::nested(vec![("statements", 0), ("documents", 1)], "document_name");
        draft.set(&doc, "Invoices".into());
        draft.remove_row(&vec![("statements", 0)], "documents", 0);

        let rows = draft.root().row(&[("statements", 0)]).unwrap().rows("documents");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("document_name"), "Invoices");

        let issues = draft.issues();
        let paths: Vec<String> = issues.iter().map(|i| i.path.to_string()).collect();
        assert!(paths.contains(&"statements.0.statement_date".to_string()));
        assert!(!paths.contains(&"statements.0.documents.0.document_name".to_string()));
    }

    #[test]
    fn unknown_list_is_ignored() {
        let mut draft = FormDraft::blank(&ADVISORY);
        draft.add_row(&vec![], "officers");
        assert!(!draft.is_dirty());
    }

    #[test]
    fn constraint_checks() {
        let field = FieldSpec::text("pan", "PAN").max(10);
        assert_eq!(check(&field, "ABCDE1234FX"), Some(Problem::TooLong(10)));
        assert_eq!(check(&field, ""), None);
        let amount = FieldSpec::amount("amount", "Amount").required();
        assert_eq!(check(&amount, "  "), Some(Problem::Missing));
        let name = FieldSpec::text("name", "Name").required();
        assert_eq!(check(&name, ""), Some(Problem::Missing));
        assert_eq!(check(&name, "  "), None);
        assert_eq!(check(&amount, "12a"), Some(Problem::NotANumber));
        let date = FieldSpec::date("d", "Date");
        assert_eq!(check(&date, "01/01/2025"), Some(Problem::InvalidDate));
        assert_eq!(check(&date, "2025-01-01"), None);
    }

    #[test]
    fn issue_messages_read_naturally() {
        let issue = FieldIssue {
            path: FieldPath::top("amount"),
            label: "Amount",
            problem: Problem::Missing,
        };
        assert_eq!(issue.to_string(), "Amount is required.");
    }
}
