//! One investigation: header details, its taxpayers and a tab per action type, each
//! tab being a CRUD panel scoped to this file number.

use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::format;
use common::model::investigation::{Investigation, Taxpayer};
use common::model::record::Record;
use common::paths;
use common::schema::registration::INVESTIGATION_FIELDS;
use common::schema::{action_schemas, by_slug, EntitySchema};

use crate::api::ApiClient;
use crate::components::crud_panel::CrudPanel;
use crate::layout::detail_grid::{grid_item, DetailGrid};

use super::{load_status, Load};

#[derive(Properties, PartialEq, Clone)]
pub struct InvestigationDetailProps {
    pub file_number: AttrValue,
    pub client: ApiClient,
    pub on_unauthorized: Callback<()>,
}

pub enum Msg {
    Loaded(Result<Record, ApiError>),
    SelectTab(&'static str),
}

pub struct InvestigationDetailPage {
    record: Load<(Record, Investigation)>,
    active: &'static EntitySchema,
}

impl Component for InvestigationDetailPage {
    type Message = Msg;
    type Properties = InvestigationDetailProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let path = paths::item(paths::INVESTIGATIONS, &ctx.props().file_number);
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = client.get::<Record>(&path).await;
            link.send_message(Msg::Loaded(result));
        });
        Self {
            record: Load::Loading,
            active: action_schemas()[0],
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                let result = result.and_then(|record| {
                    let investigation =
                        serde_json::from_value::<Investigation>(Value::Object(record.0.clone()))?;
                    Ok((record, investigation))
                });
                self.record = Load::settle(result, &ctx.props().on_unauthorized);
            }
            Msg::SelectTab(slug) => match by_slug(slug) {
                Some(schema) if schema.slug != self.active.slug => self.active = schema,
                _ => return false,
            },
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();

        html! {
            <div class="investigation-detail">
                <h2>{ format!("Investigation {}", props.file_number) }</h2>
                { load_status(&self.record) }
                if let Load::Ready((record, investigation)) = &self.record {
                    <section class="card">
                        <DetailGrid columns={3}>
                            { for INVESTIGATION_FIELDS.iter().map(|field| grid_item(field.label, format::display(field, record.get(field.key)))) }
                        </DetailGrid>
                    </section>
                    { taxpayer_table(&investigation.taxpayers) }
                }
                <div class="tab-bar action-tabs">
                    { for action_schemas().iter().map(|schema| {
                        let slug = schema.slug;
                        let class = classes!("tab", (slug == self.active.slug).then_some("active"));
                        html! {
                            <button type="button" {class} onclick={link.callback(move |_| Msg::SelectTab(slug))}>
                                { schema.title }
                            </button>
                        }
                    }) }
                </div>
                <CrudPanel
                    schema={self.active}
                    file_number={props.file_number.clone()}
                    client={props.client.clone()}
                    on_unauthorized={props.on_unauthorized.clone()}
                />
            </div>
        }
    }
}

fn taxpayer_table(taxpayers: &[Taxpayer]) -> Html {
    let text = |value: &Option<String>| {
        value
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| format::EMPTY.to_string())
    };
    html! {
        <section class="card">
            <h3>{ "Taxpayers" }</h3>
            if taxpayers.is_empty() {
                <div class="empty">{ "No taxpayer recorded." }</div>
            } else {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{ "GSTIN" }</th>
                            <th>{ "Legal name" }</th>
                            <th>{ "Trade name" }</th>
                            <th>{ "Division" }</th>
                            <th>{ "Range" }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for taxpayers.iter().map(|t| html! {
                            <tr key={t.gstin.clone()}>
                                <td>{ t.gstin.clone() }</td>
                                <td>{ t.name.clone() }</td>
                                <td>{ text(&t.trade_name) }</td>
                                <td>{ text(&t.division_name) }</td>
                                <td>{ text(&t.range_name) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }
        </section>
    }
}
