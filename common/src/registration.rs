//! State of the investigation registration form.
//!
//! Three tabs, one record. Each section keeps its own [`DraftRow`]; submission joins
//! them into a single investigation payload with one embedded taxpayer.

use serde_json::{Map, Value};

use crate::draft::{DraftRow, FieldIssue};
use crate::error::ApiError;
use crate::model::investigation::Division;
use crate::schema::registration::{
    DIVISION_KEY, INVESTIGATION_FIELDS, JURISDICTION_FIELDS, RANGE_KEY, TAXPAYER_FIELDS,
};
use crate::schema::FieldSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Investigation,
    Taxpayer,
    Jurisdiction,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Investigation, Section::Taxpayer, Section::Jurisdiction];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Investigation => "Investigation",
            Section::Taxpayer => "Taxpayer",
            Section::Jurisdiction => "Jurisdiction",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Section::Investigation => INVESTIGATION_FIELDS,
            Section::Taxpayer => TAXPAYER_FIELDS,
            Section::Jurisdiction => JURISDICTION_FIELDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Editing,
    Submitting,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub active: Section,
    investigation: DraftRow,
    taxpayer: DraftRow,
    jurisdiction: DraftRow,
    issues: Vec<(Section, FieldIssue)>,
    status: Status,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            active: Section::Investigation,
            investigation: DraftRow::blank(INVESTIGATION_FIELDS, &[]),
            taxpayer: DraftRow::blank(TAXPAYER_FIELDS, &[]),
            jurisdiction: DraftRow::blank(JURISDICTION_FIELDS, &[]),
            issues: Vec::new(),
            status: Status::Editing,
        }
    }
}

impl Registration {
    fn section(&self, section: Section) -> &DraftRow {
        match section {
            Section::Investigation => &self.investigation,
            Section::Taxpayer => &self.taxpayer,
            Section::Jurisdiction => &self.jurisdiction,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut DraftRow {
        match section {
            Section::Investigation => &mut self.investigation,
            Section::Taxpayer => &mut self.taxpayer,
            Section::Jurisdiction => &mut self.jurisdiction,
        }
    }

    pub fn value(&self, section: Section, key: &str) -> &str {
        self.section(section).get(key)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == Status::Submitting
    }

    pub fn issues_in(&self, section: Section) -> impl Iterator<Item = &FieldIssue> {
        self.issues
            .iter()
            .filter(move |(s, _)| *s == section)
            .map(|(_, issue)| issue)
    }

    /// Field-level change handler. Picking a new division clears the range, which
    /// belongs to the previous division.
    pub fn set(&mut self, section: Section, key: &'static str, value: String) {
        if section == Section::Jurisdiction && key == DIVISION_KEY && self.jurisdiction.get(DIVISION_KEY) != value {
            self.jurisdiction.set(RANGE_KEY, String::new());
        }
        self.section_mut(section).set(key, value);
        self.issues.retain(|(s, issue)| !(*s == section && issue.path.key == key));
        if matches!(self.status, Status::Succeeded(_)) {
            self.status = Status::Editing;
        }
    }

    /// Range is chosen only once a division is.
    pub fn range_enabled(&self) -> bool {
        !self.jurisdiction.get(DIVISION_KEY).trim().is_empty()
    }

    /// Range names offered for the currently selected division.
    pub fn range_options<'a>(&self, divisions: &'a [Division]) -> Vec<&'a str> {
        let division = self.jurisdiction.get(DIVISION_KEY);
        divisions
            .iter()
            .find(|d| d.name == division)
            .map(|d| d.ranges.iter().map(|r| r.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Validates all sections and, when clean, marks the form as submitting and returns
    /// the combined payload. On problems the first offending tab is made active.
    pub fn begin_submit(&mut self) -> Option<Value> {
        if self.is_submitting() {
            return None;
        }
        self.issues = Section::ALL
            .iter()
            .flat_map(|&section| {
                self.section(section)
                    .issues(section.fields(), &[])
                    .into_iter()
                    .map(move |issue| (section, issue))
            })
            .collect();
        if let Some((section, _)) = self.issues.first() {
            self.active = *section;
            return None;
        }

        self.status = Status::Submitting;
        Some(self.payload())
    }

    pub fn payload(&self) -> Value {
        let mut body = self.investigation.payload(INVESTIGATION_FIELDS, &[]);
        let mut taxpayer: Map<String, Value> = self.taxpayer.payload(TAXPAYER_FIELDS, &[]);
        taxpayer.extend(self.jurisdiction.payload(JURISDICTION_FIELDS, &[]));
        body.insert("taxpayers".to_string(), Value::Array(vec![Value::Object(taxpayer)]));
        Value::Object(body)
    }

    /// Outcome of the POST. Success clears every section; failure keeps them.
    pub fn finish(&mut self, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                let file_number = self.investigation.get("file_number").to_string();
                *self = Registration::default();
                self.status =
                    Status::Succeeded(format!("Investigation {} registered.", file_number));
            }
            Err(err) => self.status = Status::Failed(err.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::investigation::Range;
    use serde_json::json;

    fn filled() -> Registration {
        let mut form = Registration::default();
        form.set(Section::Investigation, "file_number", "ABC123".into());
        form.set(Section::Investigation, "source", "intelligence".into());
        form.set(Section::Investigation, "date_of_receipt", "2025-01-01".into());
        form.set(Section::Investigation, "nature_of_offence", "Fake invoicing".into());
        form.set(Section::Taxpayer, "gstin", "22AAAAA0000A1Z5".into());
        form.set(Section::Taxpayer, "name", "Test Co".into());
        form.set(Section::Jurisdiction, "division_name", "North".into());
        form.set(Section::Jurisdiction, "range_name", "Range I".into());
        form
    }

    #[test]
    fn combines_sections_into_one_payload() {
        let mut form = filled();
        let body = form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert_eq!(body["file_number"], json!("ABC123"));
        assert_eq!(body["date_of_initiation"], Value::Null);
        assert_eq!(body["taxpayers"][0]["gstin"], json!("22AAAAA0000A1Z5"));
        assert_eq!(body["taxpayers"][0]["range_name"], json!("Range I"));
        assert_eq!(body["taxpayers"].as_array().unwrap().len(), 1);
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn missing_field_selects_its_tab() {
        let mut form = filled();
        form.set(Section::Taxpayer, "gstin", String::new());
        form.active = Section::Jurisdiction;
        assert!(form.begin_submit().is_none());
        assert_eq!(form.active, Section::Taxpayer);
        assert_eq!(form.issues_in(Section::Taxpayer).count(), 1);
        assert_eq!(form.status(), &Status::Editing);
    }

    #[test]
    fn changing_division_clears_range() {
        let mut form = filled();
        form.set(Section::Jurisdiction, "division_name", "North".into());
        assert_eq!(form.value(Section::Jurisdiction, "range_name"), "Range I");
        form.set(Section::Jurisdiction, "division_name", "South".into());
        assert_eq!(form.value(Section::Jurisdiction, "range_name"), "");
        form.set(Section::Jurisdiction, "division_name", String::new());
        assert!(!form.range_enabled());
    }

    #[test]
    fn range_options_follow_division() {
        let divisions = vec![
            Division {
                name: "North".into(),
                ranges: vec![Range { name: "Range I".into() }, Range { name: "Range II".into() }],
            },
            Division {
                name: "South".into(),
                ranges: vec![Range { name: "Range III".into() }],
            },
        ];
        let mut form = Registration::default();
        assert!(form.range_options(&divisions).is_empty());
        form.set(Section::Jurisdiction, "division_name", "North".into());
        assert_eq!(form.range_options(&divisions), vec!["Range I", "Range II"]);
    }

    #[test]
    fn success_resets_and_failure_preserves() {
        let mut form = filled();
        form.begin_submit();
        form.finish(Err(ApiError::from_response(
            400,
            r#"{"file_number":["investigation with this file number already exists."]}"#,
        )));
        assert_eq!(
            form.status(),
            &Status::Failed("file_number: investigation with this file number already exists.".into())
        );
        assert_eq!(form.value(Section::Taxpayer, "name"), "Test Co");

        form.begin_submit();
        form.finish(Ok(()));
        assert_eq!(form.status(), &Status::Succeeded("Investigation ABC123 registered.".into()));
        assert_eq!(form.value(Section::Investigation, "file_number"), "");
        assert_eq!(form.value(Section::Jurisdiction, "division_name"), "");
        assert_eq!(form.active, Section::Investigation);
    }
}
