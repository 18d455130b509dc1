//! Investigation registration form: three tabs (investigation, taxpayer,
//! jurisdiction) submitted as one record.
//!
//! Form state and validation live in [`common::registration::Registration`]. This
//! component loads the division/range tree for the cascading selects, renders the
//! active tab and posts the combined payload.

use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::RegistrationProps;
pub use state::RegistrationForm;

use common::model::investigation::Division;
use common::paths;

impl Component for RegistrationForm {
    type Message = Msg;
    type Properties = RegistrationProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = client
                .get::<Vec<Division>>(&paths::collection(paths::DIVISIONS))
                .await;
            link.send_message(Msg::DivisionsLoaded(result));
        });
        RegistrationForm::new()
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
