//! State machine behind the generic CRUD panel.
//!
//! The panel owns everything a record tab shows: the current view (list, detail,
//! add form, edit form), the delete-confirmation overlay, the fetched rows, the open
//! draft and the single in-flight mutation. It performs no I/O. Each call to
//! [`Panel::handle`] mutates the state and returns the [`Effect`]s its host must carry
//! out; the host feeds the outcome of each effect back in as another [`PanelEvent`].
//!
//! Rules the machine keeps:
//! - every successful mutation re-fetches what it touched, nothing is patched locally
//!   except removing a deleted row while its list reloads;
//! - a draft with validation issues never produces a request;
//! - at most one mutation is pending, further submits are ignored until it settles;
//! - responses for a record that is no longer on screen are dropped.

use serde_json::{Map, Value};

use crate::draft::{FieldIssue, FieldPath, FormDraft, RowPath};
use crate::error::ApiError;
use crate::model::record::{Record, RecordId, INVESTIGATION_KEY};
use crate::paths;
use crate::schema::EntitySchema;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    Detail(RecordId),
    AddForm,
    EditForm(RecordId),
}

/// A pending request to remove one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirm {
    pub id: RecordId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update(RecordId),
    Delete(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: String) -> Self {
        Self {
            level: NoticeLevel::Success,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            level: NoticeLevel::Error,
            message,
        }
    }
}

/// Work the host performs on the panel's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// GET the list; answer with [`PanelEvent::ListLoaded`].
    FetchList { path: String },
    /// GET one record; answer with [`PanelEvent::DetailLoaded`].
    FetchDetail { id: RecordId, path: String },
    /// POST; answer with [`PanelEvent::Saved`].
    Create { path: String, body: Value },
    /// PUT; answer with [`PanelEvent::Saved`].
    Update { path: String, body: Value },
    /// DELETE; answer with [`PanelEvent::Deleted`].
    Delete { id: RecordId, path: String },
    /// Show a transient notification.
    Notify(Notice),
    /// The session was rejected; the host signs the user out.
    SessionExpired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// Mount or manual refresh.
    Open,
    ListLoaded(Result<Vec<Record>, ApiError>),
    DetailLoaded(RecordId, Result<Record, ApiError>),
    Select(RecordId),
    StartAdd,
    StartEdit,
    Edit(FieldPath, String),
    AddRow(RowPath, &'static str),
    RemoveRow(RowPath, &'static str, usize),
    Submit,
    Saved(Result<Value, ApiError>),
    Back,
    RequestDelete(RecordId),
    CancelDelete,
    ConfirmDelete,
    Deleted(RecordId, Result<(), ApiError>),
}

/// Rows of the list view together with their fetch status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub rows: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub record: Option<Record>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Panel {
    schema: &'static EntitySchema,
    file_number: String,
    view: View,
    history: Vec<View>,
    confirm: Option<DeleteConfirm>,
    listing: Listing,
    detail: DetailState,
    draft: Option<FormDraft>,
    issues: Vec<FieldIssue>,
    pending: Option<Mutation>,
    list_stale: bool,
}

impl Panel {
    pub fn new(schema: &'static EntitySchema, file_number: impl Into<String>) -> Self {
        Self {
            schema,
            file_number: file_number.into(),
            view: View::List,
            history: Vec::new(),
            confirm: None,
            listing: Listing::default(),
            detail: DetailState::default(),
            draft: None,
            issues: Vec::new(),
            pending: None,
            list_stale: false,
        }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn file_number(&self) -> &str {
        &self.file_number
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn confirm(&self) -> Option<&DeleteConfirm> {
        self.confirm.as_ref()
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        self.draft.as_ref()
    }

    /// Validation problems found by the last rejected submit.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn pending(&self) -> Option<&Mutation> {
        self.pending.as_ref()
    }

    /// Submit and delete controls are disabled while this is true.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Editing starts only once the detail fetch has settled, so a save's refetch is
    /// never pre-empted by the record it replaced.
    pub fn can_edit(&self) -> bool {
        matches!(self.view, View::Detail(_))
            && self.detail.record.is_some()
            && !self.detail.loading
            && self.pending.is_none()
    }

    fn list_path(&self) -> String {
        paths::for_investigation(self.schema.resource, &self.file_number)
    }

    fn item_path(&self, id: &RecordId) -> String {
        paths::item(self.schema.resource, id.as_str())
    }

    fn fetch_list(&mut self) -> Effect {
        self.listing.loading = true;
        self.listing.error = None;
        self.list_stale = false;
        Effect::FetchList {
            path: self.list_path(),
        }
    }

    fn fetch_detail(&mut self, id: RecordId) -> Effect {
        self.detail.loading = true;
        self.detail.error = None;
        let path = self.item_path(&id);
        Effect::FetchDetail { id, path }
    }

    fn go(&mut self, next: View) {
        let previous = std::mem::replace(&mut self.view, next);
        self.history.push(previous);
    }

    fn shown_id(&self) -> Option<&RecordId> {
        match &self.view {
            View::Detail(id) | View::EditForm(id) => Some(id),
            _ => None,
        }
    }

    fn failure(&self, err: &ApiError, effects: &mut Vec<Effect>) -> String {
        if err.is_unauthorized() {
            effects.push(Effect::SessionExpired);
        }
        err.message()
    }

    /// Label shown in the delete confirmation for a row.
    pub fn label_for(&self, record: &Record) -> String {
        let title = record.text(self.schema.card.title_key);
        if title.trim().is_empty() {
            match record.id() {
                Some(id) => format!("{} #{}", self.schema.singular, id),
                None => self.schema.singular.to_string(),
            }
        } else {
            title
        }
    }

    pub fn handle(&mut self, event: PanelEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            PanelEvent::Open => {
                effects.push(self.fetch_list());
                if let Some(id) = self.shown_id().cloned() {
                    effects.push(self.fetch_detail(id));
                }
            }
            PanelEvent::ListLoaded(result) => {
                self.listing.loading = false;
                match result {
                    Ok(rows) => {
                        self.listing.rows = rows;
                        self.listing.error = None;
                    }
                    Err(err) => self.listing.error = Some(self.failure(&err, &mut effects)),
                }
            }
            PanelEvent::DetailLoaded(id, result) => {
                if self.shown_id() != Some(&id) {
                    return effects;
                }
                self.detail.loading = false;
                match result {
                    Ok(record) => {
                        self.detail.record = Some(record);
                        self.detail.error = None;
                    }
                    Err(err) => self.detail.error = Some(self.failure(&err, &mut effects)),
                }
            }
            PanelEvent::Select(id) => {
                if self.view == View::List {
                    self.detail = DetailState {
                        record: self
                            .listing
                            .rows
                            .iter()
                            .find(|row| row.id().as_ref() == Some(&id))
                            .cloned(),
                        ..DetailState::default()
                    };
                    self.go(View::Detail(id.clone()));
                    effects.push(self.fetch_detail(id));
                }
            }
            PanelEvent::StartAdd => {
                if self.view == View::List {
                    self.draft = Some(FormDraft::blank(self.schema));
                    self.issues.clear();
                    self.go(View::AddForm);
                }
            }
            PanelEvent::StartEdit => {
                if !self.can_edit() {
                    return effects;
                }
                if let View::Detail(id) = &self.view {
                    if let Some(record) = &self.detail.record {
                        let id = id.clone();
                        self.draft = Some(FormDraft::from_record(self.schema, record));
                        self.issues.clear();
                        self.go(View::EditForm(id));
                    }
                }
            }
            PanelEvent::Edit(path, value) => {
                if let Some(draft) = &mut self.draft {
                    draft.set(&path, value);
                    self.issues.retain(|issue| issue.path != path);
                }
            }
            PanelEvent::AddRow(parent, list) => {
                if let Some(draft) = &mut self.draft {
                    draft.add_row(&parent, list);
                }
            }
            PanelEvent::RemoveRow(parent, list, index) => {
                if let Some(draft) = &mut self.draft {
                    draft.remove_row(&parent, list, index);
                    self.issues.clear();
                }
            }
            PanelEvent::Submit => self.submit(&mut effects),
            PanelEvent::Saved(result) => self.saved(result, &mut effects),
            PanelEvent::Back => {
                if self.pending.is_none() {
                    self.back(&mut effects);
                }
            }
            PanelEvent::RequestDelete(id) => {
                if self.pending.is_none() {
                    let label = self
                        .listing
                        .rows
                        .iter()
                        .chain(self.detail.record.iter())
                        .find(|row| row.id().as_ref() == Some(&id))
                        .map(|row| self.label_for(row))
                        .unwrap_or_else(|| format!("{} #{}", self.schema.singular, id));
                    self.confirm = Some(DeleteConfirm { id, label });
                }
            }
            PanelEvent::CancelDelete => {
                if self.pending.is_none() {
                    self.confirm = None;
                }
            }
            PanelEvent::ConfirmDelete => {
                if self.pending.is_none() {
                    if let Some(confirm) = &self.confirm {
                        let id = confirm.id.clone();
                        self.pending = Some(Mutation::Delete(id.clone()));
                        effects.push(Effect::Delete {
                            path: self.item_path(&id),
                            id,
                        });
                    }
                }
            }
            PanelEvent::Deleted(id, result) => self.deleted(id, result, &mut effects),
        }
        effects
    }

    fn submit(&mut self, effects: &mut Vec<Effect>) {
        if self.pending.is_some() {
            return;
        }
        let Some(draft) = &self.draft else {
            return;
        };
        let issues = draft.issues();
        if !issues.is_empty() {
            self.issues = issues;
            return;
        }
        self.issues.clear();

        let mut body: Map<String, Value> = draft.payload();
        body.insert(
            INVESTIGATION_KEY.to_string(),
            Value::String(self.file_number.clone()),
        );
        let body = Value::Object(body);

        match &self.view {
            View::AddForm => {
                self.pending = Some(Mutation::Create);
                effects.push(Effect::Create {
                    path: paths::collection(self.schema.resource),
                    body,
                });
            }
            View::EditForm(id) => {
                let id = id.clone();
                self.pending = Some(Mutation::Update(id.clone()));
                effects.push(Effect::Update {
                    path: self.item_path(&id),
                    body,
                });
            }
            _ => {}
        }
    }

    fn saved(&mut self, result: Result<Value, ApiError>, effects: &mut Vec<Effect>) {
        let Some(mutation) = self.pending.take() else {
            return;
        };
        if let Err(err) = result {
            let message = self.failure(&err, effects);
            effects.push(Effect::Notify(Notice::error(format!(
                "Could not save {}: {}",
                self.schema.singular.to_lowercase(),
                message
            ))));
            return;
        }

        match mutation {
            Mutation::Create => {
                self.draft = None;
                self.view = View::List;
                self.history.clear();
                effects.push(self.fetch_list());
                effects.push(Effect::Notify(Notice::success(format!(
                    "{} added.",
                    self.schema.singular
                ))));
            }
            Mutation::Update(id) => {
                self.draft = None;
                self.detail.record = None;
                self.view = View::Detail(id.clone());
                self.history = vec![View::List];
                self.list_stale = true;
                effects.push(self.fetch_detail(id));
                effects.push(Effect::Notify(Notice::success(format!(
                    "{} updated.",
                    self.schema.singular
                ))));
            }
            Mutation::Delete(_) => {}
        }
    }

    fn back(&mut self, effects: &mut Vec<Effect>) {
        if self.view == View::List {
            return;
        }
        self.draft = None;
        self.issues.clear();
        self.view = self.history.pop().unwrap_or(View::List);
        match self.view.clone() {
            View::List if self.list_stale => effects.push(self.fetch_list()),
            View::Detail(id) if self.detail.record.is_none() => {
                effects.push(self.fetch_detail(id))
            }
            _ => {}
        }
    }

    fn deleted(&mut self, id: RecordId, result: Result<(), ApiError>, effects: &mut Vec<Effect>) {
        if self.pending != Some(Mutation::Delete(id.clone())) {
            return;
        }
        self.pending = None;
        self.confirm = None;
        match result {
            Ok(()) => {
                self.listing.rows.retain(|row| row.id().as_ref() != Some(&id));
                if self.shown_id() == Some(&id) {
                    self.view = View::List;
                    self.history.clear();
                    self.detail = DetailState::default();
                    self.draft = None;
                }
                effects.push(self.fetch_list());
                effects.push(Effect::Notify(Notice::success(format!(
                    "{} deleted.",
                    self.schema.singular
                ))));
            }
            Err(err) => {
                let message = self.failure(&err, effects);
                effects.push(Effect::Notify(Notice::error(format!(
                    "Could not delete {}: {}",
                    self.schema.singular.to_lowercase(),
                    message
                ))));
            }
        }
    }
}
