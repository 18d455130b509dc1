//! Investigation register: filterable list of all cases plus the registration form.

use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use common::error::ApiError;
use common::format;
use common::model::investigation::Investigation;
use common::paths;

use crate::api::ApiClient;
use crate::components::registration::RegistrationForm;
use crate::routes::Route;

use super::{load_status, Load};

#[derive(Properties, PartialEq, Clone)]
pub struct InvestigationsProps {
    pub client: ApiClient,
    pub on_unauthorized: Callback<()>,
}

pub enum Msg {
    Fetch,
    Loaded(Result<Vec<Investigation>, ApiError>),
    Filter(String),
    ToggleForm,
}

pub struct InvestigationsPage {
    investigations: Load<Vec<Investigation>>,
    filter: String,
    show_form: bool,
}

impl Component for InvestigationsPage {
    type Message = Msg;
    type Properties = InvestigationsProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Fetch);
        Self {
            investigations: Load::Loading,
            filter: String::new(),
            show_form: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetch => {
                let client = ctx.props().client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = client.get(&paths::collection(paths::INVESTIGATIONS)).await;
                    link.send_message(Msg::Loaded(result));
                });
                if !matches!(self.investigations, Load::Ready(_)) {
                    self.investigations = Load::Loading;
                }
            }
            Msg::Loaded(result) => {
                self.investigations = Load::settle(result, &ctx.props().on_unauthorized);
            }
            Msg::Filter(query) => self.filter = query,
            Msg::ToggleForm => self.show_form = !self.show_form,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let on_filter = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Filter(input.value())
        });

        html! {
            <div class="investigations-page">
                <div class="panel-header">
                    <h2>{ "Investigations" }</h2>
                    <span class="spacer" />
                    <button class="btn btn-primary" onclick={link.callback(|_| Msg::ToggleForm)}>
                        { if self.show_form { "Close form" } else { "Register investigation" } }
                    </button>
                </div>
                if self.show_form {
                    <RegistrationForm
                        client={props.client.clone()}
                        on_registered={link.callback(|_| Msg::Fetch)}
                        on_unauthorized={props.on_unauthorized.clone()}
                    />
                }
                <input
                    class="filter-box"
                    type="search"
                    placeholder="Filter by file number, GSTIN or name"
                    value={self.filter.clone()}
                    oninput={on_filter}
                />
                { load_status(&self.investigations) }
                if let Load::Ready(list) = &self.investigations {
                    { self.table(list) }
                }
            </div>
        }
    }
}

impl InvestigationsPage {
    fn table(&self, list: &[Investigation]) -> Html {
        let rows: Vec<&Investigation> = list.iter().filter(|i| i.matches(&self.filter)).collect();
        if rows.is_empty() {
            let message = if list.is_empty() {
                "No investigations registered yet."
            } else {
                "No investigation matches the filter."
            };
            return html! { <div class="empty">{ message }</div> };
        }
        html! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{ "File number" }</th>
                        <th>{ "Taxpayer" }</th>
                        <th>{ "GSTIN" }</th>
                        <th>{ "Received" }</th>
                        <th>{ "Officer" }</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.into_iter().map(row) }
                </tbody>
            </table>
        }
    }
}

fn row(investigation: &Investigation) -> Html {
    let gstin = investigation
        .taxpayers
        .first()
        .map(|t| t.gstin.clone())
        .unwrap_or_else(|| format::EMPTY.to_string());
    let received = investigation
        .date_of_receipt
        .as_deref()
        .and_then(format::date)
        .unwrap_or_else(|| format::EMPTY.to_string());
    html! {
        <tr key={investigation.file_number.clone()}>
            <td>
                <Link<Route> to={Route::InvestigationDetail { file_number: investigation.file_number.clone() }}>
                    { investigation.file_number.clone() }
                </Link<Route>>
            </td>
            <td>{ investigation.lead_taxpayer().unwrap_or(format::EMPTY).to_string() }</td>
            <td>{ gstin }</td>
            <td>{ received }</td>
            <td>{ investigation.assigned_officer.clone().unwrap_or_else(|| format::EMPTY.to_string()) }</td>
        </tr>
    }
}
