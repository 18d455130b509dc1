//! Elm-style update for the CRUD panel component.
//!
//! Every message is handed to the panel state machine; the effects it returns are
//! executed here. HTTP effects run on `spawn_local` and report back with the matching
//! [`PanelEvent`], so an outcome always flows through the state machine before it
//! reaches the screen.

use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::crud::{Effect, PanelEvent};
use common::model::record::Record;

use crate::helpers::{set_window_dirty_flag, show_toast};

use super::messages::Msg;
use super::state::CrudPanel;

pub fn update(component: &mut CrudPanel, ctx: &Context<CrudPanel>, msg: Msg) -> bool {
    match msg {
        Msg::Panel(event) => {
            let effects = component.panel.handle(event);
            for effect in effects {
                perform(ctx, effect);
            }
            set_window_dirty_flag(component.panel.draft().is_some_and(|draft| draft.is_dirty()));
            true
        }
    }
}

fn perform(ctx: &Context<CrudPanel>, effect: Effect) {
    let client = ctx.props().client.clone();
    let link = ctx.link().clone();
    match effect {
        Effect::FetchList { path } => spawn_local(async move {
            let result = client.get::<Vec<Record>>(&path).await;
            link.send_message(Msg::Panel(PanelEvent::ListLoaded(result)));
        }),
        Effect::FetchDetail { id, path } => spawn_local(async move {
            let result = client.get::<Record>(&path).await;
            link.send_message(Msg::Panel(PanelEvent::DetailLoaded(id, result)));
        }),
        Effect::Create { path, body } => spawn_local(async move {
            let result = client.post::<Value, _>(&path, &body).await;
            link.send_message(Msg::Panel(PanelEvent::Saved(result)));
        }),
        Effect::Update { path, body } => spawn_local(async move {
            let result = client.put::<Value, _>(&path, &body).await;
            link.send_message(Msg::Panel(PanelEvent::Saved(result)));
        }),
        Effect::Delete { id, path } => spawn_local(async move {
            let result = client.delete(&path).await;
            link.send_message(Msg::Panel(PanelEvent::Deleted(id, result)));
        }),
        Effect::Notify(notice) => show_toast(&notice.message, notice.level),
        Effect::SessionExpired => ctx.props().on_unauthorized.emit(()),
    }
}
