//! Page chrome: top navigation bar and sidebar around the routed content.
//!
//! Signed-out users see only the routed content (the login page).

use yew::prelude::*;
use yew_router::prelude::*;

use common::model::session::Session;

use crate::routes::Route;

pub mod detail_grid;

#[derive(Properties, PartialEq)]
pub struct ChromeProps {
    pub title: AttrValue,
    pub session: Option<Session>,
    pub on_logout: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

pub struct Chrome;

impl Component for Chrome {
    type Message = ();
    type Properties = ChromeProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Chrome
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let Some(session) = &props.session else {
            return html! { <main class="page page-bare">{ props.children.clone() }</main> };
        };
        let on_logout = props.on_logout.reform(|_: MouseEvent| ());

        html! {
            <div class="app-shell">
                <header class="navbar">
                    <Link<Route> to={Route::Home} classes="navbar-title">{ props.title.clone() }</Link<Route>>
                    <span class="navbar-spacer" />
                    <span class="navbar-user">{ session.username.clone() }</span>
                    <button class="btn btn-text" onclick={on_logout}>{ "Sign out" }</button>
                </header>
                <div class="app-body">
                    <nav class="sidebar">
                        { nav_link(Route::Home, "home", "Dashboard") }
                        { nav_link(Route::Investigations, "folder", "Investigations") }
                        { nav_link(Route::Alerts, "notifications", "Alerts") }
                        { nav_link(Route::Settings, "settings", "Settings") }
                    </nav>
                    <main class="page">{ props.children.clone() }</main>
                </div>
            </div>
        }
    }
}

fn nav_link(to: Route, icon: &'static str, label: &'static str) -> Html {
    html! {
        <Link<Route> {to} classes="sidebar-link">
            <i class="material-icons">{ icon }</i>
            <span>{ label }</span>
        </Link<Route>>
    }
}
