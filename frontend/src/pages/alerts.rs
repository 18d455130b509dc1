use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use common::error::ApiError;
use common::format;
use common::model::alert::Alert;
use common::paths;

use crate::api::ApiClient;
use crate::routes::Route;

use super::{load_status, Load};

#[derive(Properties, PartialEq, Clone)]
pub struct AlertsProps {
    pub client: ApiClient,
    pub on_unauthorized: Callback<()>,
}

pub enum Msg {
    Loaded(Result<Vec<Alert>, ApiError>),
}

/// Due-date reminders raised by the server for pending actions.
pub struct AlertsPage {
    alerts: Load<Vec<Alert>>,
}

impl Component for AlertsPage {
    type Message = Msg;
    type Properties = AlertsProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = client.get(&paths::collection(paths::ALERTS)).await;
            link.send_message(Msg::Loaded(result));
        });
        Self {
            alerts: Load::Loading,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                self.alerts = Load::settle(
                    result.map(|mut alerts| {
                        alerts.sort_by(|a, b| a.due_date.cmp(&b.due_date));
                        alerts
                    }),
                    &ctx.props().on_unauthorized,
                )
            }
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="alerts-page">
                <h2>{ "Alerts" }</h2>
                { load_status(&self.alerts) }
                if let Load::Ready(alerts) = &self.alerts {
                    if alerts.is_empty() {
                        <div class="empty">{ "No alerts." }</div>
                    }
                    <div class="card-list">
                        { for alerts.iter().map(alert_card) }
                    </div>
                }
            </div>
        }
    }
}

fn alert_card(alert: &Alert) -> Html {
    let due = alert.due_date.as_deref().and_then(format::date);
    html! {
        <div class="record-card alert-card">
            <div class="card-main">
                <div class="card-title">{ alert.title.clone() }</div>
                if let Some(message) = &alert.message {
                    <div class="card-text">{ message.clone() }</div>
                }
                if let Some(file_number) = &alert.file_number {
                    <Link<Route> to={Route::InvestigationDetail { file_number: file_number.clone() }}>
                        { file_number.clone() }
                    </Link<Route>>
                }
            </div>
            if let Some(due) = due {
                <div class="card-date">{ format!("Due {}", due) }</div>
            }
        </div>
    }
}
