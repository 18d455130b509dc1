//! View rendering for the CRUD panel.
//!
//! One of three screens is shown at a time, chosen by the panel's current view:
//! the card list, the read-only detail of one record, or the add/edit form. The delete
//! confirmation sheet is mounted on top of whichever screen is active.

use serde_json::Value;
use yew::html::Scope;
use yew::prelude::*;

use common::crud::{Mutation, Panel, PanelEvent, View};
use common::draft::{DraftRow, FieldIssue, FieldPath, RowPath};
use common::format;
use common::model::record::{Record, RecordId};
use common::schema::{FieldSpec, SubListSpec};

use crate::components::fields::schema_field;
use crate::layout::detail_grid::{grid_item, DetailGrid};
use crate::overlays::confirm_sheet::ConfirmSheet;

use super::messages::Msg;
use super::state::CrudPanel;

fn send(event: PanelEvent) -> Msg {
    Msg::Panel(event)
}

pub fn view(component: &CrudPanel, ctx: &Context<CrudPanel>) -> Html {
    let panel = &component.panel;
    let link = ctx.link();

    let body = match panel.view() {
        View::List => list_view(panel, link),
        View::Detail(id) => detail_view(panel, id, link),
        View::AddForm | View::EditForm(_) => form_view(panel, link),
    };

    let confirm = panel.confirm();
    let message = confirm
        .map(|c| format!("\"{}\" will be permanently deleted. This cannot be undone.", c.label))
        .unwrap_or_default();

    html! {
        <div class="crud-panel">
            { body }
            <ConfirmSheet
                open={confirm.is_some()}
                title={format!("Delete {}?", panel.schema().singular.to_lowercase())}
                {message}
                busy={matches!(panel.pending(), Some(Mutation::Delete(_)))}
                on_confirm={link.callback(|_| send(PanelEvent::ConfirmDelete))}
                on_cancel={link.callback(|_| send(PanelEvent::CancelDelete))}
            />
        </div>
    }
}

fn list_view(panel: &Panel, link: &Scope<CrudPanel>) -> Html {
    let schema = panel.schema();
    let listing = panel.listing();

    html! {
        <>
            <div class="panel-header">
                <h3>{ schema.title }</h3>
                <span class="badge">{ listing.rows.len() }</span>
                <span class="spacer" />
                <button class="icon-btn" title="Refresh" disabled={listing.loading}
                    onclick={link.callback(|_| send(PanelEvent::Open))}>
                    <i class="material-icons">{ "refresh" }</i>
                </button>
                <button class="btn btn-primary" onclick={link.callback(|_| send(PanelEvent::StartAdd))}>
                    { format!("Add {}", schema.singular.to_lowercase()) }
                </button>
            </div>
            if let Some(error) = &listing.error {
                <div class="banner banner-error">{ error.clone() }</div>
            }
            if listing.loading && listing.rows.is_empty() {
                <div class="loading">{ "Loading…" }</div>
            } else if listing.rows.is_empty() && listing.error.is_none() {
                <div class="empty">{ format!("No {} recorded yet.", schema.title.to_lowercase()) }</div>
            }
            <div class="card-list">
                { for listing.rows.iter().map(|row| card(panel, row, link)) }
            </div>
        </>
    }
}

fn card(panel: &Panel, record: &Record, link: &Scope<CrudPanel>) -> Html {
    let schema = panel.schema();
    let Some(id) = record.id() else {
        return html! {};
    };
    let title = panel.label_for(record);
    let date = schema
        .card
        .date_key
        .and_then(|key| record.get(key))
        .and_then(Value::as_str)
        .and_then(format::date);
    let amount = schema
        .card
        .amount_key
        .and_then(|key| record.get(key))
        .and_then(format::currency);

    let on_select = {
        let id = id.clone();
        link.callback(move |_| send(PanelEvent::Select(id.clone())))
    };
    let on_delete = {
        let id = id.clone();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            send(PanelEvent::RequestDelete(id.clone()))
        })
    };

    html! {
        <div class="record-card" key={id.to_string()} onclick={on_select}>
            <div class="card-main">
                <div class="card-title">{ title }</div>
                if let Some(date) = date {
                    <div class="card-date">{ date }</div>
                }
            </div>
            if let Some(amount) = amount {
                <div class="card-amount">{ amount }</div>
            }
            <button class="icon-btn" title={format!("Delete {}", schema.singular.to_lowercase())}
                disabled={panel.is_busy()} onclick={on_delete}>
                <i class="material-icons">{ "delete" }</i>
            </button>
        </div>
    }
}

fn detail_view(panel: &Panel, id: &RecordId, link: &Scope<CrudPanel>) -> Html {
    let schema = panel.schema();
    let detail = panel.detail();
    let busy = panel.is_busy();
    let on_delete = {
        let id = id.clone();
        link.callback(move |_| send(PanelEvent::RequestDelete(id.clone())))
    };

    html! {
        <>
            <div class="panel-header">
                <button class="btn btn-text" onclick={link.callback(|_| send(PanelEvent::Back))}>
                    <i class="material-icons">{ "arrow_back" }</i>{ "Back" }
                </button>
                <h3>{ schema.singular }</h3>
                <span class="spacer" />
                <button class="btn" disabled={!panel.can_edit()}
                    onclick={link.callback(|_| send(PanelEvent::StartEdit))}>{ "Edit" }</button>
                <button class="btn btn-danger" disabled={busy} onclick={on_delete}>{ "Delete" }</button>
            </div>
            if let Some(error) = &detail.error {
                <div class="banner banner-error">{ error.clone() }</div>
            }
            if let Some(record) = &detail.record {
                <DetailGrid columns={2}>
                    { for schema.fields.iter().map(|field| grid_item(field.label, format::display(field, record.get(field.key)))) }
                </DetailGrid>
                { for schema.sub_lists.iter().map(|list| sub_list_detail(list, record.get(list.key))) }
                { audit_line(record) }
            } else if detail.loading {
                <div class="loading">{ "Loading…" }</div>
            }
        </>
    }
}

fn sub_list_detail(list: &'static SubListSpec, value: Option<&Value>) -> Html {
    let rows = value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
    html! {
        <section class="sub-list">
            <h4>{ list.label }</h4>
            if rows.is_empty() {
                <div class="empty">{ "None recorded." }</div>
            }
            { for rows.iter().enumerate().map(|(index, row)| html! {
                <div class="sub-row">
                    <div class="sub-row-title">{ format!("{} {}", list.item_label, index + 1) }</div>
                    <DetailGrid columns={3}>
                        { for list.fields.iter().map(|field| grid_item(field.label, format::display(field, row.get(field.key)))) }
                    </DetailGrid>
                    { for list.children.iter().map(|child| sub_list_detail(child, row.get(child.key))) }
                </div>
            }) }
        </section>
    }
}

fn audit_line(record: &Record) -> Html {
    let mut parts = Vec::new();
    if let Some(by) = record.added_by() {
        parts.push(format!("Added by {}", by));
    }
    if let Some(on) = record.added_on().and_then(format::date) {
        parts.push(format!("Added {}", on));
    }
    if let Some(on) = record.updated_on().and_then(format::date) {
        parts.push(format!("Last updated {}", on));
    }
    if parts.is_empty() {
        return html! {};
    }
    html! { <div class="audit-line">{ parts.join(" · ") }</div> }
}

fn form_view(panel: &Panel, link: &Scope<CrudPanel>) -> Html {
    let Some(draft) = panel.draft() else {
        return html! {};
    };
    let schema = panel.schema();
    let busy = panel.is_busy();
    let editing = matches!(panel.view(), View::EditForm(_));
    let singular = schema.singular.to_lowercase();
    let heading = if editing {
        format!("Edit {}", singular)
    } else {
        format!("Add {}", singular)
    };
    let submit_label = match (busy, editing) {
        (true, _) => "Saving…".to_string(),
        (false, true) => "Save changes".to_string(),
        (false, false) => heading.clone(),
    };
    let issues = panel.issues();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        send(PanelEvent::Submit)
    });

    html! {
        <form class="record-form" {onsubmit}>
            <div class="panel-header">
                <button type="button" class="btn btn-text" disabled={busy}
                    onclick={link.callback(|_| send(PanelEvent::Back))}>
                    <i class="material-icons">{ "arrow_back" }</i>{ "Back" }
                </button>
                <h3>{ heading }</h3>
                if draft.is_dirty() {
                    <span class="dirty-dot" title="Unsaved changes" />
                }
            </div>
            if !issues.is_empty() {
                <div class="banner banner-error">
                    { format!("{} field(s) need attention.", issues.len()) }
                </div>
            }
            { row_editor(link, draft.root(), schema.fields, schema.sub_lists, Vec::new(), issues, busy) }
            <div class="form-actions">
                <button type="button" class="btn btn-text" disabled={busy}
                    onclick={link.callback(|_| send(PanelEvent::Back))}>{ "Cancel" }</button>
                <button type="submit" class="btn btn-primary" disabled={busy}>{ submit_label }</button>
            </div>
        </form>
    }
}

fn row_editor(
    link: &Scope<CrudPanel>,
    row: &DraftRow,
    fields: &'static [FieldSpec],
    lists: &'static [SubListSpec],
    at: RowPath,
    issues: &[FieldIssue],
    busy: bool,
) -> Html {
    html! {
        <>
            <div class="form-grid">
                { for fields.iter().map(|field| {
                    let path = FieldPath::nested(at.clone(), field.key);
                    let issue = issues.iter().find(|issue| issue.path == path);
                    let name = path.to_string();
                    let on_change = link.callback(move |value: String| send(PanelEvent::Edit(path.clone(), value)));
                    schema_field(field, name, row.get(field.key), issue, busy, on_change)
                }) }
            </div>
            { for lists.iter().map(|list| list_editor(link, row, list, &at, issues, busy)) }
        </>
    }
}

fn list_editor(
    link: &Scope<CrudPanel>,
    parent: &DraftRow,
    list: &'static SubListSpec,
    at: &RowPath,
    issues: &[FieldIssue],
    busy: bool,
) -> Html {
    let key = list.key;
    let on_add = {
        let at = at.clone();
        link.callback(move |_| send(PanelEvent::AddRow(at.clone(), key)))
    };

    html! {
        <fieldset class="sub-list-editor">
            <legend>{ list.label }</legend>
            { for parent.rows(key).iter().enumerate().map(|(index, row)| {
                let mut child_at = at.clone();
                child_at.push((key, index));
                let on_remove = {
                    let at = at.clone();
                    link.callback(move |_| send(PanelEvent::RemoveRow(at.clone(), key, index)))
                };
                html! {
                    <div class="sub-row">
                        <div class="sub-row-header">
                            <span>{ format!("{} {}", list.item_label, index + 1) }</span>
                            <button type="button" class="icon-btn" disabled={busy} onclick={on_remove}
                                title={format!("Remove {}", list.item_label.to_lowercase())}>
                                <i class="material-icons">{ "close" }</i>
                            </button>
                        </div>
                        { row_editor(link, row, list.fields, list.children, child_at, issues, busy) }
                    </div>
                }
            }) }
            <button type="button" class="btn btn-text" disabled={busy} onclick={on_add}>
                { format!("+ Add {}", list.item_label.to_lowercase()) }
            </button>
        </fieldset>
    }
}
