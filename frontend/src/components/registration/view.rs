use yew::html::Scope;
use yew::prelude::*;

use common::registration::{Section, Status};
use common::schema::registration::{DIVISION_KEY, RANGE_KEY};
use common::schema::FieldSpec;

use crate::components::fields::{schema_field, Choice, FieldProps, SelectInput};

use super::messages::Msg;
use super::state::RegistrationForm;

pub fn view(component: &RegistrationForm, ctx: &Context<RegistrationForm>) -> Html {
    let link = ctx.link();
    let form = &component.form;
    let busy = form.is_submitting();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <form class="registration-form" {onsubmit}>
            <div class="tab-bar">
                { for Section::ALL.iter().map(|&section| tab(component, section, link)) }
                if component.is_dirty() {
                    <span class="dirty-dot" title="Unsaved changes" />
                }
            </div>
            { status_banner(form.status()) }
            <div class="form-grid">
                { for form.active.fields().iter().map(|field| field_for(component, form.active, field, link)) }
            </div>
            if form.active == Section::Jurisdiction {
                if let Some(error) = &component.divisions_error {
                    <div class="hint">{ format!("Division list unavailable ({}); enter names manually.", error) }</div>
                }
            }
            <div class="form-actions">
                { nav_button(form.active, -1, "Previous", link) }
                { nav_button(form.active, 1, "Next", link) }
                <span class="spacer" />
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    { if busy { "Registering…" } else { "Register investigation" } }
                </button>
            </div>
        </form>
    }
}

fn tab(component: &RegistrationForm, section: Section, link: &Scope<RegistrationForm>) -> Html {
    let issues = component.form.issues_in(section).count();
    let class = classes!(
        "tab",
        (component.form.active == section).then_some("active"),
        (issues > 0).then_some("has-error")
    );
    html! {
        <button type="button" {class} onclick={link.callback(move |_| Msg::SetTab(section))}>
            { section.title() }
            if issues > 0 {
                <span class="badge badge-error">{ issues }</span>
            }
        </button>
    }
}

fn nav_button(active: Section, step: isize, label: &'static str, link: &Scope<RegistrationForm>) -> Html {
    let position = Section::ALL.iter().position(|s| *s == active).unwrap_or(0) as isize;
    let Some(&target) = usize::try_from(position + step).ok().and_then(|i| Section::ALL.get(i)) else {
        return html! {};
    };
    html! {
        <button type="button" class="btn btn-text" onclick={link.callback(move |_| Msg::SetTab(target))}>
            { label }
        </button>
    }
}

fn status_banner(status: &Status) -> Html {
    match status {
        Status::Succeeded(message) => html! { <div class="banner banner-success">{ message.clone() }</div> },
        Status::Failed(message) => html! { <div class="banner banner-error">{ message.clone() }</div> },
        Status::Editing | Status::Submitting => html! {},
    }
}

fn field_for(
    component: &RegistrationForm,
    section: Section,
    field: &'static FieldSpec,
    link: &Scope<RegistrationForm>,
) -> Html {
    let form = &component.form;
    let busy = form.is_submitting();
    let issue = form.issues_in(section).find(|issue| issue.path.key == field.key);
    let key = field.key;
    let on_change = link.callback(move |value: String| Msg::Set(section, key, value));
    let value = form.value(section, key);

    if section != Section::Jurisdiction || !component.has_division_tree() {
        return schema_field(field, key.to_string(), value, issue, busy, on_change);
    }

    let (choices, disabled, placeholder): (Vec<Choice>, bool, &'static str) = match key {
        DIVISION_KEY => (
            component
                .divisions
                .iter()
                .map(|d| Choice {
                    value: d.name.clone().into(),
                    label: d.name.clone().into(),
                })
                .collect(),
            busy,
            "Select division…",
        ),
        RANGE_KEY => (
            form.range_options(&component.divisions)
                .into_iter()
                .map(|name| Choice {
                    value: name.to_string().into(),
                    label: name.to_string().into(),
                })
                .collect(),
            busy || !form.range_enabled(),
            if form.range_enabled() {
                "Select range…"
            } else {
                "Select a division first"
            },
        ),
        _ => return schema_field(field, key.to_string(), value, issue, busy, on_change),
    };

    let field = FieldProps {
        name: key.into(),
        label: field.label.into(),
        value: AttrValue::from(value.to_string()),
        on_change,
        required: field.required,
        max_length: field.max_length,
        disabled,
        error: issue.map(|issue| AttrValue::from(issue.to_string())),
    };
    html! { <SelectInput {field} {choices} placeholder={placeholder} /> }
}
