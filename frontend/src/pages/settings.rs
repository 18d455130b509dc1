use yew::prelude::*;

use common::model::session::Session;

use crate::api::ApiClient;
use crate::layout::detail_grid::{grid_item, DetailGrid};

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsProps {
    pub client: ApiClient,
    pub session: Option<Session>,
    pub on_logout: Callback<()>,
}

/// Account and connection details, and the sign-out action.
pub struct SettingsPage;

impl Component for SettingsPage {
    type Message = ();
    type Properties = SettingsProps;

    fn create(_ctx: &Context<Self>) -> Self {
        SettingsPage
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let config = props.client.config();
        let username = props
            .session
            .as_ref()
            .map(|s| s.username.clone())
            .unwrap_or_default();

        html! {
            <div class="settings-page">
                <h2>{ "Settings" }</h2>
                <section class="card">
                    <DetailGrid columns={2}>
                        { grid_item("Signed in as", username) }
                        { grid_item("API base", config.api_base.clone()) }
                        { grid_item("Login endpoint", config.url(&config.login_path)) }
                        { grid_item("Authorization scheme", config.auth_scheme.clone()) }
                    </DetailGrid>
                </section>
                <button class="btn btn-danger" onclick={props.on_logout.reform(|_: MouseEvent| ())}>
                    { "Sign out" }
                </button>
            </div>
        }
    }
}
