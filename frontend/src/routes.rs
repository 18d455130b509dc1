//! URL routes and the authentication gate in front of them.

use yew::prelude::*;
use yew_router::prelude::*;

use common::model::session::Session;

use crate::api::ApiClient;
use crate::pages::alerts::AlertsPage;
use crate::pages::home::HomePage;
use crate::pages::investigation_detail::InvestigationDetailPage;
use crate::pages::investigations::InvestigationsPage;
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::settings::SettingsPage;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/investigation")]
    Investigations,
    #[at("/investigation/:file_number")]
    InvestigationDetail { file_number: String },
    #[at("/alerts")]
    Alerts,
    #[at("/settings")]
    Settings,
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// What the gate does with a route for the current session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Render,
    RedirectLogin,
    RedirectHome,
}

pub fn route_access(route: &Route, signed_in: bool) -> Access {
    match route {
        Route::NotFound => Access::Render,
        Route::Login if signed_in => Access::RedirectHome,
        Route::Login => Access::Render,
        _ if signed_in => Access::Render,
        _ => Access::RedirectLogin,
    }
}

/// Everything a page needs from the application root, passed down explicitly.
#[derive(Clone, PartialEq)]
pub struct Shell {
    pub client: ApiClient,
    pub session: Option<Session>,
    pub on_login: Callback<Session>,
    pub on_logout: Callback<()>,
    pub on_expired: Callback<()>,
}

pub fn switch(route: Route, shell: &Shell) -> Html {
    match route_access(&route, shell.session.is_some()) {
        Access::RedirectLogin => html! { <Redirect<Route> to={Route::Login} /> },
        Access::RedirectHome => html! { <Redirect<Route> to={Route::Home} /> },
        Access::Render => render(route, shell),
    }
}

fn render(route: Route, shell: &Shell) -> Html {
    let client = shell.client.clone();
    let on_unauthorized = shell.on_expired.clone();
    match route {
        Route::Home => html! { <HomePage {client} {on_unauthorized} /> },
        Route::Investigations => html! { <InvestigationsPage {client} {on_unauthorized} /> },
        Route::InvestigationDetail { file_number } => html! {
            <InvestigationDetailPage
                key={file_number.clone()}
                file_number={AttrValue::from(file_number.clone())}
                {client}
                {on_unauthorized}
            />
        },
        Route::Alerts => html! { <AlertsPage {client} {on_unauthorized} /> },
        Route::Settings => html! {
            <SettingsPage
                {client}
                session={shell.session.clone()}
                on_logout={shell.on_logout.clone()}
            />
        },
        Route::Login => html! { <LoginPage {client} on_login={shell.on_login.clone()} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_users_only_reach_login() {
        let detail = Route::InvestigationDetail {
            file_number: "ABC123".into(),
        };
        for route in [Route::Home, Route::Investigations, detail, Route::Alerts, Route::Settings] {
            assert_eq!(route_access(&route, false), Access::RedirectLogin, "{:?}", route);
        }
        assert_eq!(route_access(&Route::Login, false), Access::Render);
    }

    #[test]
    fn signed_in_users_skip_login() {
        assert_eq!(route_access(&Route::Login, true), Access::RedirectHome);
        assert_eq!(route_access(&Route::Investigations, true), Access::Render);
    }

    #[test]
    fn unknown_paths_render_not_found_either_way() {
        assert_eq!(route_access(&Route::NotFound, false), Access::Render);
        assert_eq!(route_access(&Route::NotFound, true), Access::Render);
        assert_eq!(
            Route::recognize("/no/such/page").or_else(Route::not_found_route),
            Some(Route::NotFound)
        );
    }

    #[test]
    fn detail_route_carries_file_number() {
        assert_eq!(
            Route::recognize("/investigation/ABC123"),
            Some(Route::InvestigationDetail {
                file_number: "ABC123".into()
            })
        );
        assert_eq!(Route::recognize("/investigation"), Some(Route::Investigations));
    }
}
