//! Panel behaviour against a scripted in-memory backend.

use std::collections::{BTreeMap, VecDeque};

use serde_json::{json, Map, Value};

use super::*;
use crate::format;
use crate::schema::entities::{ADVISORY, INSPECTION};
use crate::schema::{action_schemas, FieldSpec, InputKind};

const FILE: &str = "ABC123";

/// Answers panel effects the way the REST API would, for a single resource.
struct FakeServer {
    resource: &'static str,
    rows: BTreeMap<u64, Map<String, Value>>,
    next_id: u64,
    requests: Vec<String>,
    notices: Vec<Notice>,
    session_expired: bool,
    fail_next_save: Option<(u16, &'static str)>,
    reject_all_with: Option<u16>,
}

impl FakeServer {
    fn new(resource: &'static str) -> Self {
        Self {
            resource,
            rows: BTreeMap::new(),
            next_id: 1,
            requests: Vec::new(),
            notices: Vec::new(),
            session_expired: false,
            fail_next_save: None,
            reject_all_with: None,
        }
    }

    fn seed(&mut self, mut row: Value) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        let map = row.as_object_mut().unwrap();
        map.insert("id".into(), json!(id));
        map.entry("investigation").or_insert(json!(FILE));
        map.insert("added_on".into(), json!("2025-01-02T10:00:00Z"));
        self.rows.insert(id, map.clone());
        RecordId::new(id.to_string())
    }

    fn posts(&self) -> usize {
        self.requests.iter().filter(|r| r.starts_with("POST")).count()
    }

    fn id_from(path: &str) -> Option<u64> {
        path.trim_end_matches('/').rsplit('/').next()?.parse().ok()
    }

    fn not_found() -> ApiError {
        ApiError::from_response(404, r#"{"detail":"Not found."}"#)
    }

    fn answer(&mut self, effect: Effect) -> Option<PanelEvent> {
        if let Some(status) = self.reject_all_with {
            return match effect {
                Effect::FetchList { .. } => Some(PanelEvent::ListLoaded(Err(
                    ApiError::from_response(status, ""),
                ))),
                Effect::Notify(notice) => {
                    self.notices.push(notice);
                    None
                }
                Effect::SessionExpired => {
                    self.session_expired = true;
                    None
                }
                _ => None,
            };
        }

        match effect {
            Effect::FetchList { path } => {
                self.requests.push(format!("GET {}", path));
                assert_eq!(
                    path,
                    format!("investigation/{}/investigation/{}/", self.resource, FILE)
                );
                let rows = self
                    .rows
                    .values()
                    .filter(|row| row.get("investigation") == Some(&json!(FILE)))
                    .cloned()
                    .map(Record::from)
                    .collect();
                Some(PanelEvent::ListLoaded(Ok(rows)))
            }
            Effect::FetchDetail { id, path } => {
                self.requests.push(format!("GET {}", path));
                let result = Self::id_from(&path)
                    .and_then(|key| self.rows.get(&key))
                    .cloned()
                    .map(Record::from)
                    .ok_or_else(Self::not_found);
                Some(PanelEvent::DetailLoaded(id, result))
            }
            Effect::Create { path, body } => {
                self.requests.push(format!("POST {}", path));
                assert_eq!(path, format!("investigation/{}/", self.resource));
                if let Some((status, body)) = self.fail_next_save.take() {
                    return Some(PanelEvent::Saved(Err(ApiError::from_response(status, body))));
                }
                let id = self.seed(body);
                let row = self.rows[&id.as_str().parse::<u64>().unwrap()].clone();
                Some(PanelEvent::Saved(Ok(Value::Object(row))))
            }
            Effect::Update { path, body } => {
                self.requests.push(format!("PUT {}", path));
                if let Some((status, body)) = self.fail_next_save.take() {
                    return Some(PanelEvent::Saved(Err(ApiError::from_response(status, body))));
                }
                let Some(row) = Self::id_from(&path).and_then(|key| self.rows.get_mut(&key)) else {
                    return Some(PanelEvent::Saved(Err(Self::not_found())));
                };
                for (key, value) in body.as_object().unwrap() {
                    row.insert(key.clone(), value.clone());
                }
                row.insert("updated_on".into(), json!("2025-01-03T09:00:00Z"));
                Some(PanelEvent::Saved(Ok(Value::Object(row.clone()))))
            }
            Effect::Delete { id, path } => {
                self.requests.push(format!("DELETE {}", path));
                let removed = Self::id_from(&path).and_then(|key| self.rows.remove(&key));
                let result = removed.map(|_| ()).ok_or_else(Self::not_found);
                Some(PanelEvent::Deleted(id, result))
            }
            Effect::Notify(notice) => {
                self.notices.push(notice);
                None
            }
            Effect::SessionExpired => {
                self.session_expired = true;
                None
            }
        }
    }
}

/// Feeds `event` to the panel and answers every resulting effect until it settles.
fn drive(panel: &mut Panel, server: &mut FakeServer, event: PanelEvent) {
    let mut queue = VecDeque::from([event]);
    while let Some(event) = queue.pop_front() {
        for effect in panel.handle(event) {
            if let Some(next) = server.answer(effect) {
                queue.push_back(next);
            }
        }
    }
}

fn sample(field: &FieldSpec) -> String {
    match field.input {
        InputKind::Number | InputKind::Amount => "10".into(),
        InputKind::Date => "2025-01-01".into(),
        InputKind::Email => "officer@example.in".into(),
        InputKind::Select(options) => options[0].value.into(),
        _ => "x".into(),
    }
}

fn open(schema: &'static EntitySchema, server: &mut FakeServer) -> Panel {
    let mut panel = Panel::new(schema, FILE);
    drive(&mut panel, server, PanelEvent::Open);
    panel
}

fn fill_required(panel: &mut Panel, server: &mut FakeServer, skip: Option<&str>) {
    for field in panel.schema().fields.iter().filter(|f| f.required) {
        if Some(field.key) != skip {
            drive(panel, server, PanelEvent::Edit(FieldPath::top(field.key), sample(field)));
        }
    }
}

fn advisory(date: &str, amount: i64) -> Value {
    json!({"advisory_issued_date": date, "amount": amount, "paid_date": null, "remarks": ""})
}

#[test]
fn open_lists_only_this_investigation() {
    let mut server = FakeServer::new("advisories");
    server.seed(advisory("2025-01-01", 100));
    server.seed(json!({"advisory_issued_date": "2025-01-05", "amount": 5, "investigation": "OTHER"}));

    let panel = open(&ADVISORY, &mut server);

    assert_eq!(panel.view(), &View::List);
    assert_eq!(panel.listing().rows.len(), 1);
    assert!(!panel.listing().loading);
    assert_eq!(panel.listing().error, None);
}

#[test]
fn any_missing_required_field_blocks_the_post() {
    for &schema in action_schemas() {
        for required in schema.fields.iter().filter(|f| f.required) {
            let mut server = FakeServer::new(schema.resource);
            let mut panel = open(schema, &mut server);
            drive(&mut panel, &mut server, PanelEvent::StartAdd);
            fill_required(&mut panel, &mut server, Some(required.key));
            drive(&mut panel, &mut server, PanelEvent::Submit);

            assert_eq!(server.posts(), 0, "{}.{} posted", schema.slug, required.key);
            assert_eq!(panel.view(), &View::AddForm);
            assert!(panel.issues().iter().any(|i| i.path.key == required.key));
        }

        let mut server = FakeServer::new(schema.resource);
        let mut panel = open(schema, &mut server);
        drive(&mut panel, &mut server, PanelEvent::StartAdd);
        fill_required(&mut panel, &mut server, None);
        drive(&mut panel, &mut server, PanelEvent::Submit);
        assert_eq!(server.posts(), 1, "{} complete draft did not post", schema.slug);
    }
}

#[test]
fn missing_field_in_nested_row_blocks_the_post() {
    let mut server = FakeServer::new("inspections");
    let mut panel = open(&INSPECTION, &mut server);
    drive(&mut panel, &mut server, PanelEvent::StartAdd);
    fill_required(&mut panel, &mut server, None);
    drive(&mut panel, &mut server, PanelEvent::AddRow(vec![], "officers"));
    drive(&mut panel, &mut server, PanelEvent::Submit);
    assert_eq!(server.posts(), 0);

    let name = FieldPath::nested(vec![("officers", 0)], "name");
    drive(&mut panel, &mut server, PanelEvent::Edit(name, "A. Rao".into()));
    drive(&mut panel, &mut server, PanelEvent::Submit);
    assert_eq!(server.posts(), 1);
    let stored = server.rows.values().next().unwrap();
    assert_eq!(stored["officers"], json!([{"name": "A. Rao", "designation": ""}]));
}

#[test]
fn added_advisory_appears_formatted_in_the_refetched_list() {
    let mut server = FakeServer::new("advisories");
    let mut panel = open(&ADVISORY, &mut server);
    assert!(panel.listing().rows.is_empty());

    drive(&mut panel, &mut server, PanelEvent::StartAdd);
    drive(&mut panel, &mut server, PanelEvent::Edit(FieldPath::top("advisory_issued_date"), "2025-01-01".into()));
    drive(&mut panel, &mut server, PanelEvent::Edit(FieldPath::top("amount"), "5000".into()));
    drive(&mut panel, &mut server, PanelEvent::Submit);

    let stored = server.rows.values().next().unwrap();
    assert_eq!(stored["investigation"], json!(FILE));
    assert_eq!(stored["amount"], json!(5000));

    assert_eq!(panel.view(), &View::List);
    assert!(panel.draft().is_none());
    assert_eq!(server.requests.last().unwrap(), "GET investigation/advisories/investigation/ABC123/");

    let rows = &panel.listing().rows;
    assert_eq!(rows.len(), 1);
    let amount = ADVISORY.field("amount").unwrap();
    let date = ADVISORY.field("advisory_issued_date").unwrap();
    assert_eq!(format::display(amount, rows[0].get("amount")), "₹5,000");
    assert_eq!(format::display(date, rows[0].get("advisory_issued_date")), "01/01/2025");
    assert_eq!(server.notices.last().unwrap().level, NoticeLevel::Success);
}

#[test]
fn update_returns_to_refetched_detail() {
    let mut server = FakeServer::new("advisories");
    let id = server.seed(advisory("2025-01-01", 5000));
    let mut panel = open(&ADVISORY, &mut server);

    drive(&mut panel, &mut server, PanelEvent::Select(id.clone()));
    assert_eq!(panel.view(), &View::Detail(id.clone()));
    drive(&mut panel, &mut server, PanelEvent::StartEdit);
    assert_eq!(panel.view(), &View::EditForm(id.clone()));
    assert_eq!(panel.draft().unwrap().value(&FieldPath::top("amount")), "5000");

    drive(&mut panel, &mut server, PanelEvent::Edit(FieldPath::top("amount"), "7500".into()));
    drive(&mut panel, &mut server, PanelEvent::Submit);

    assert_eq!(panel.view(), &View::Detail(id.clone()));
    let shown = panel.detail().record.as_ref().unwrap();
    assert_eq!(shown.get("amount"), Some(&json!(7500)));
    assert_eq!(shown.updated_on(), Some("2025-01-03T09:00:00Z"));
    assert_eq!(server.requests.last().unwrap(), &format!("GET investigation/advisories/{}/", id));

    // Going back to the list reloads it since a row changed underneath.
    let before = server.requests.len();
    drive(&mut panel, &mut server, PanelEvent::Back);
    assert_eq!(panel.view(), &View::List);
    assert_eq!(server.requests.len(), before + 1);
    assert_eq!(panel.listing().rows[0].get("amount"), Some(&json!(7500)));
}

#[test]
fn edit_waits_for_the_refetch_after_an_update() {
    let mut server = FakeServer::new("advisories");
    let id = server.seed(advisory("2025-01-01", 5000));
    let mut panel = open(&ADVISORY, &mut server);
    drive(&mut panel, &mut server, PanelEvent::Select(id.clone()));
    drive(&mut panel, &mut server, PanelEvent::StartEdit);
    drive(&mut panel, &mut server, PanelEvent::Edit(FieldPath::top("amount"), "7500".into()));

    // Answer the PUT but hold back the detail refetch it triggers.
    let mut held = Vec::new();
    for effect in panel.handle(PanelEvent::Submit) {
        if let Some(saved) = server.answer(effect) {
            held.extend(panel.handle(saved));
        }
    }
    assert!(held.iter().any(|e| matches!(e, Effect::FetchDetail { .. })));
    assert_eq!(panel.view(), &View::Detail(id.clone()));
    assert!(panel.detail().record.is_none());
    assert!(!panel.can_edit());

    assert!(panel.handle(PanelEvent::StartEdit).is_empty());
    assert_eq!(panel.view(), &View::Detail(id.clone()));
    assert!(panel.draft().is_none());

    for effect in held {
        if let Some(event) = server.answer(effect) {
            drive(&mut panel, &mut server, event);
        }
    }
    assert!(panel.can_edit());
    drive(&mut panel, &mut server, PanelEvent::StartEdit);
    assert_eq!(panel.draft().unwrap().value(&FieldPath::top("amount")), "7500");
}

#[test]
fn unchanged_edit_leaves_the_server_record_identical() {
    let mut server = FakeServer::new("advisories");
    let id = server.seed(json!({
        "advisory_issued_date": "2025-01-01",
        "amount": "5000.00",
        "paid_date": null,
        "remarks": "Paid under DRC-03"
    }));
    let key = id.as_str().parse::<u64>().unwrap();
    let mut before = server.rows[&key].clone();

    let mut panel = open(&ADVISORY, &mut server);
    drive(&mut panel, &mut server, PanelEvent::Select(id.clone()));
    drive(&mut panel, &mut server, PanelEvent::StartEdit);
    assert!(!panel.draft().unwrap().is_dirty());
    drive(&mut panel, &mut server, PanelEvent::Submit);

    let mut after = server.rows[&key].clone();
    after.remove("updated_on");
    before.remove("updated_on");
    assert_eq!(after, before);
}

#[test]
fn cancelling_delete_changes_nothing() {
    let mut server = FakeServer::new("advisories");
    let first = server.seed(advisory("2025-01-01", 1));
    server.seed(advisory("2025-01-02", 2));
    let mut panel = open(&ADVISORY, &mut server);
    drive(&mut panel, &mut server, PanelEvent::Select(first.clone()));

    drive(&mut panel, &mut server, PanelEvent::RequestDelete(first.clone()));
    assert_eq!(panel.confirm().map(|c| &c.id), Some(&first));
    drive(&mut panel, &mut server, PanelEvent::CancelDelete);

    assert!(panel.confirm().is_none());
    assert_eq!(panel.view(), &View::Detail(first));
    assert_eq!(panel.listing().rows.len(), 2);
    assert_eq!(server.rows.len(), 2);
    assert!(!server.requests.iter().any(|r| r.starts_with("DELETE")));
}

#[test]
fn confirming_delete_removes_exactly_the_target() {
    let mut server = FakeServer::new("advisories");
    let first = server.seed(advisory("2025-01-01", 1));
    let second = server.seed(advisory("2025-01-02", 2));
    let mut panel = open(&ADVISORY, &mut server);

    drive(&mut panel, &mut server, PanelEvent::RequestDelete(second.clone()));
    drive(&mut panel, &mut server, PanelEvent::ConfirmDelete);

    assert!(panel.confirm().is_none());
    assert_eq!(panel.view(), &View::List);
    let ids: Vec<_> = panel.listing().rows.iter().filter_map(Record::id).collect();
    assert_eq!(ids, vec![first]);
}

#[test]
fn deleting_the_viewed_record_returns_to_the_list() {
    let mut server = FakeServer::new("advisories");
    let first = server.seed(advisory("2025-01-01", 1));
    server.seed(advisory("2025-01-02", 2));
    let mut panel = open(&ADVISORY, &mut server);
    drive(&mut panel, &mut server, PanelEvent::Select(first.clone()));

    drive(&mut panel, &mut server, PanelEvent::RequestDelete(first.clone()));
    drive(&mut panel, &mut server, PanelEvent::ConfirmDelete);

    assert_eq!(panel.view(), &View::List);
    assert!(panel.detail().record.is_none());
    assert_eq!(panel.listing().rows.len(), 1);
    drive(&mut panel, &mut server, PanelEvent::Back);
    assert_eq!(panel.view(), &View::List);
}

#[test]
fn failed_delete_closes_modal_and_keeps_list() {
    let mut server = FakeServer::new("advisories");
    server.seed(advisory("2025-01-01", 1));
    let mut panel = open(&ADVISORY, &mut server);
    let ghost = RecordId::new("999");

    drive(&mut panel, &mut server, PanelEvent::RequestDelete(ghost));
    drive(&mut panel, &mut server, PanelEvent::ConfirmDelete);

    assert!(panel.confirm().is_none());
    assert!(!panel.is_busy());
    assert_eq!(panel.listing().rows.len(), 1);
    let notice = server.notices.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Could not delete advisory: Not found.");
}

#[test]
fn failed_save_keeps_the_form_and_its_data() {
    let mut server = FakeServer::new("advisories");
    server.fail_next_save = Some((400, r#"{"amount":["Ensure that there are no more than 12 digits in total."]}"#));
    let mut panel = open(&ADVISORY, &mut server);
    drive(&mut panel, &mut server, PanelEvent::StartAdd);
    fill_required(&mut panel, &mut server, None);
    drive(&mut panel, &mut server, PanelEvent::Submit);

    assert_eq!(panel.view(), &View::AddForm);
    assert!(!panel.is_busy());
    assert_eq!(panel.draft().unwrap().value(&FieldPath::top("amount")), "10");
    assert_eq!(
        server.notices.last().unwrap().message,
        "Could not save advisory: amount: Ensure that there are no more than 12 digits in total."
    );

    drive(&mut panel, &mut server, PanelEvent::Submit);
    assert_eq!(panel.view(), &View::List);
    assert_eq!(panel.listing().rows.len(), 1);
}

#[test]
fn second_submit_while_pending_is_ignored() {
    let mut server = FakeServer::new("advisories");
    let mut panel = open(&ADVISORY, &mut server);
    drive(&mut panel, &mut server, PanelEvent::StartAdd);
    fill_required(&mut panel, &mut server, None);

    let first = panel.handle(PanelEvent::Submit);
    assert!(matches!(first.as_slice(), [Effect::Create { .. }]));
    assert!(panel.is_busy());
    assert!(panel.handle(PanelEvent::Submit).is_empty());
    assert!(panel.handle(PanelEvent::Back).is_empty());
    assert_eq!(panel.view(), &View::AddForm);
}

#[test]
fn back_discards_the_edit() {
    let mut server = FakeServer::new("advisories");
    let id = server.seed(advisory("2025-01-01", 5000));
    let mut panel = open(&ADVISORY, &mut server);
    drive(&mut panel, &mut server, PanelEvent::Select(id.clone()));
    drive(&mut panel, &mut server, PanelEvent::StartEdit);
    drive(&mut panel, &mut server, PanelEvent::Edit(FieldPath::top("amount"), "1".into()));

    let requests = server.requests.len();
    drive(&mut panel, &mut server, PanelEvent::Back);

    assert_eq!(panel.view(), &View::Detail(id));
    assert!(panel.draft().is_none());
    assert_eq!(server.requests.len(), requests);
    assert_eq!(server.rows.values().next().unwrap()["amount"], json!(5000));

    drive(&mut panel, &mut server, PanelEvent::Back);
    assert_eq!(panel.view(), &View::List);
}

#[test]
fn late_detail_for_another_record_is_dropped() {
    let mut server = FakeServer::new("advisories");
    let first = server.seed(advisory("2025-01-01", 1));
    let second = server.seed(advisory("2025-01-02", 2));
    let mut panel = open(&ADVISORY, &mut server);

    panel.handle(PanelEvent::Select(first.clone()));
    panel.handle(PanelEvent::Back);
    panel.handle(PanelEvent::Select(second.clone()));

    let stale: Record = Record::from(server.rows[&1].clone());
    panel.handle(PanelEvent::DetailLoaded(first, Ok(stale)));
    let shown = panel.detail().record.as_ref().and_then(Record::id);
    assert_eq!(shown, Some(second));
}

#[test]
fn fetch_failures_surface_as_banner() {
    let mut server = FakeServer::new("advisories");
    server.reject_all_with = Some(500);
    let panel = open(&ADVISORY, &mut server);
    assert_eq!(
        panel.listing().error.as_deref(),
        Some("The server failed to process the request.")
    );
    assert!(!server.session_expired);
}

#[test]
fn unauthorized_fetch_expires_the_session() {
    let mut server = FakeServer::new("advisories");
    server.reject_all_with = Some(401);
    let panel = open(&ADVISORY, &mut server);
    assert!(server.session_expired);
    assert!(panel.listing().error.is_some());
}
