use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::model::session::{LoginRequest, LoginResponse, Session};

use crate::api::ApiClient;
use crate::components::fields::{FieldProps, TextInput};

#[derive(Properties, PartialEq, Clone)]
pub struct LoginProps {
    pub client: ApiClient,
    pub on_login: Callback<Session>,
}

pub enum Msg {
    SetUsername(String),
    SetPassword(String),
    Submit,
    Done(Result<LoginResponse, ApiError>),
}

pub struct LoginPage {
    username: String,
    password: String,
    submitting: bool,
    error: Option<String>,
}

impl Component for LoginPage {
    type Message = Msg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            submitting: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetUsername(value) => self.username = value,
            Msg::SetPassword(value) => self.password = value,
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                if self.username.trim().is_empty() || self.password.is_empty() {
                    self.error = Some("Enter your username and password.".to_string());
                    return true;
                }
                self.submitting = true;
                self.error = None;
                let client = ctx.props().client.clone();
                let link = ctx.link().clone();
                let request = LoginRequest {
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                };
                spawn_local(async move {
                    let path = client.config().login_path.clone();
                    let result = client.post::<LoginResponse, _>(&path, &request).await;
                    link.send_message(Msg::Done(result));
                });
            }
            Msg::Done(result) => {
                self.submitting = false;
                match result {
                    Ok(response) => {
                        self.password.clear();
                        ctx.props().on_login.emit(Session {
                            username: self.username.trim().to_string(),
                            token: response.token,
                        });
                    }
                    Err(ApiError::Unauthorized) => {
                        self.error = Some("Invalid username or password.".to_string())
                    }
                    Err(err) => self.error = Some(err.message()),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let username = FieldProps {
            name: "username".into(),
            label: "Username".into(),
            value: self.username.clone().into(),
            on_change: link.callback(Msg::SetUsername),
            required: true,
            max_length: None,
            disabled: self.submitting,
            error: None,
        };

        html! {
            <div class="login-page">
                <form class="login-card" {onsubmit}>
                    <h2>{ ctx.props().client.config().app_title.clone() }</h2>
                    if let Some(error) = &self.error {
                        <div class="banner banner-error">{ error.clone() }</div>
                    }
                    <TextInput ..username />
                    <div class="form-field">
                        <label for="password">{ "Password" }<span class="required-mark">{ " *" }</span></label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            required=true
                            autocomplete="current-password"
                            value={self.password.clone()}
                            disabled={self.submitting}
                            oninput={link.callback(|e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                Msg::SetPassword(input.value())
                            })}
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled={self.submitting}>
                        { if self.submitting { "Signing in…" } else { "Sign in" } }
                    </button>
                </form>
            </div>
        }
    }
}
