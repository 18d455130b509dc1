use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::crud::NoticeLevel;
use common::paths;
use common::registration::Status;

use crate::helpers::{set_window_dirty_flag, show_toast};

use super::messages::Msg;
use super::state::RegistrationForm;

pub fn update(component: &mut RegistrationForm, ctx: &Context<RegistrationForm>, msg: Msg) -> bool {
    match msg {
        Msg::SetTab(section) => {
            if component.form.active == section {
                return false;
            }
            component.form.active = section;
        }
        Msg::Set(section, key, value) => {
            component.form.set(section, key, value);
            set_window_dirty_flag(component.is_dirty());
        }
        Msg::Submit => {
            let Some(body) = component.form.begin_submit() else {
                return true;
            };
            let client = ctx.props().client.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = client
                    .post::<Value, _>(&paths::collection(paths::INVESTIGATIONS), &body)
                    .await
                    .map(|_| ());
                link.send_message(Msg::Finished(result));
            });
        }
        Msg::Finished(result) => {
            if result.as_ref().is_err_and(|err| err.is_unauthorized()) {
                ctx.props().on_unauthorized.emit(());
            }
            component.form.finish(result);
            match component.form.status() {
                Status::Succeeded(message) => {
                    show_toast(message, NoticeLevel::Success);
                    ctx.props().on_registered.emit(());
                }
                Status::Failed(message) => {
                    show_toast(&format!("Could not register investigation: {}", message), NoticeLevel::Error)
                }
                Status::Editing | Status::Submitting => {}
            }
            set_window_dirty_flag(component.is_dirty());
        }
        Msg::DivisionsLoaded(result) => match result {
            Ok(divisions) => component.divisions = divisions,
            Err(err) => {
                gloo_console::warn!(format!("division list unavailable: {}", err));
                component.divisions_error = Some(err.message());
            }
        },
    }
    true
}
