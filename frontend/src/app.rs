use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use common::config::AppConfig;
use common::crud::NoticeLevel;
use common::model::session::Session;

use crate::api::ApiClient;
use crate::helpers::{set_window_dirty_flag, show_toast};
use crate::layout::Chrome;
use crate::routes::{switch, Route, Shell};
use crate::session;

/// Served by the host next to the bundle.
const CONFIG_URL: &str = "/app-config";

pub enum Msg {
    ConfigLoaded(AppConfig),
    SignedIn(Session),
    SignOut,
    SessionExpired,
}

/// Application root: loads runtime configuration, owns the session and hands both
/// down to the routed pages.
pub struct App {
    config: Option<AppConfig>,
    session: Option<Session>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            let config = match Request::get(CONFIG_URL).send().await {
                Ok(resp) if resp.ok() => resp.json::<AppConfig>().await.unwrap_or_else(|err| {
                    gloo_console::warn!(format!("unreadable {}: {}", CONFIG_URL, err));
                    AppConfig::default()
                }),
                Ok(resp) => {
                    gloo_console::warn!(format!("{} answered {}", CONFIG_URL, resp.status()));
                    AppConfig::default()
                }
                Err(err) => {
                    gloo_console::warn!(format!("{} unreachable: {}", CONFIG_URL, err));
                    AppConfig::default()
                }
            };
            link.send_message(Msg::ConfigLoaded(config));
        });

        Self {
            config: None,
            session: session::load(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigLoaded(config) => {
                if let Some(window) = web_sys::window() {
                    if let Some(document) = window.document() {
                        document.set_title(&config.app_title);
                    }
                }
                self.config = Some(config);
            }
            Msg::SignedIn(session) => {
                session::save(&session);
                show_toast(&format!("Signed in as {}.", session.username), NoticeLevel::Success);
                self.session = Some(session);
            }
            Msg::SignOut => {
                self.end_session();
                show_toast("Signed out.", NoticeLevel::Success);
            }
            Msg::SessionExpired => {
                if self.session.is_none() {
                    return false;
                }
                self.end_session();
                show_toast("Your session has expired. Please sign in again.", NoticeLevel::Error);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(config) = &self.config else {
            return html! { <div class="app-loading">{ "Loading…" }</div> };
        };

        let link = ctx.link();
        let shell = Shell {
            client: ApiClient::new(
                config.clone(),
                self.session.as_ref().map(|s| s.token.clone()),
            ),
            session: self.session.clone(),
            on_login: link.callback(Msg::SignedIn),
            on_logout: link.callback(|_| Msg::SignOut),
            on_expired: link.callback(|_| Msg::SessionExpired),
        };
        let on_logout = shell.on_logout.clone();

        html! {
            <BrowserRouter>
                <Chrome
                    title={config.app_title.clone()}
                    session={self.session.clone()}
                    {on_logout}
                >
                    <Switch<Route> render={move |route| switch(route, &shell)} />
                </Chrome>
            </BrowserRouter>
        }
    }
}

impl App {
    fn end_session(&mut self) {
        session::clear();
        set_window_dirty_flag(false);
        self.session = None;
    }
}
