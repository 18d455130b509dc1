//! Generic CRUD panel: the record tab shown for each action type of an investigation.
//!
//! The panel's behavior lives in [`common::crud::Panel`]; this component renders that
//! state and performs the effects it asks for. Modules:
//! - `props`: schema, owning file number, API client, session-expiry callback.
//! - `state`: the component struct wrapping the panel.
//! - `update`: feeds events to the panel and executes the resulting effects.
//! - `view`: list cards, detail grid, add/edit forms and the delete confirmation.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::CrudPanelProps;
pub use state::CrudPanel;

use common::crud::PanelEvent;

impl Component for CrudPanel {
    type Message = Msg;
    type Properties = CrudPanelProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Panel(PanelEvent::Open));
        CrudPanel::new(ctx.props())
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.schema.slug != old_props.schema.slug || props.file_number != old_props.file_number {
            *self = CrudPanel::new(props);
            ctx.link().send_message(Msg::Panel(PanelEvent::Open));
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        crate::helpers::set_window_dirty_flag(false);
    }
}
