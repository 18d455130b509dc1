//! Dashboard: investigation count, most recently registered cases and the number of
//! open alerts.

use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use common::error::ApiError;
use common::format;
use common::model::alert::Alert;
use common::model::investigation::Investigation;
use common::paths;

use crate::api::ApiClient;
use crate::routes::Route;

use super::{load_status, Load};

const RECENT: usize = 5;

#[derive(Properties, PartialEq, Clone)]
pub struct HomeProps {
    pub client: ApiClient,
    pub on_unauthorized: Callback<()>,
}

pub enum Msg {
    Investigations(Result<Vec<Investigation>, ApiError>),
    Alerts(Result<Vec<Alert>, ApiError>),
}

pub struct HomePage {
    investigations: Load<Vec<Investigation>>,
    alerts: Load<Vec<Alert>>,
}

impl Component for HomePage {
    type Message = Msg;
    type Properties = HomeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let investigations = client.get(&paths::collection(paths::INVESTIGATIONS)).await;
            link.send_message(Msg::Investigations(investigations));
            let alerts = client.get(&paths::collection(paths::ALERTS)).await;
            link.send_message(Msg::Alerts(alerts));
        });
        Self {
            investigations: Load::Loading,
            alerts: Load::Loading,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let on_unauthorized = &ctx.props().on_unauthorized;
        match msg {
            Msg::Investigations(result) => {
                self.investigations = Load::settle(
                    result.map(|mut list| {
                        list.sort_by(|a, b| b.added_on.cmp(&a.added_on));
                        list
                    }),
                    on_unauthorized,
                )
            }
            Msg::Alerts(result) => self.alerts = Load::settle(result, on_unauthorized),
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let total = match &self.investigations {
            Load::Ready(list) => list.len().to_string(),
            _ => format::EMPTY.to_string(),
        };
        let alerts = match &self.alerts {
            Load::Ready(list) => list.len().to_string(),
            _ => format::EMPTY.to_string(),
        };

        html! {
            <div class="home-page">
                <h2>{ "Dashboard" }</h2>
                <div class="stat-row">
                    <Link<Route> to={Route::Investigations} classes="stat-card">
                        <div class="stat-value">{ total }</div>
                        <div class="stat-label">{ "Investigations" }</div>
                    </Link<Route>>
                    <Link<Route> to={Route::Alerts} classes="stat-card">
                        <div class="stat-value">{ alerts }</div>
                        <div class="stat-label">{ "Open alerts" }</div>
                    </Link<Route>>
                </div>
                <h3>{ "Recently registered" }</h3>
                { load_status(&self.investigations) }
                if let Load::Ready(list) = &self.investigations {
                    if list.is_empty() {
                        <div class="empty">{ "No investigations registered yet." }</div>
                    }
                    <ul class="recent-list">
                        { for list.iter().take(RECENT).map(recent_item) }
                    </ul>
                }
            </div>
        }
    }
}

fn recent_item(investigation: &Investigation) -> Html {
    let to = Route::InvestigationDetail {
        file_number: investigation.file_number.clone(),
    };
    let received = investigation
        .date_of_receipt
        .as_deref()
        .and_then(format::date)
        .unwrap_or_else(|| format::EMPTY.to_string());
    html! {
        <li key={investigation.file_number.clone()}>
            <Link<Route> {to}>{ investigation.file_number.clone() }</Link<Route>>
            <span class="muted">{ investigation.lead_taxpayer().unwrap_or(format::EMPTY).to_string() }</span>
            <span class="muted">{ received }</span>
        </li>
    }
}
