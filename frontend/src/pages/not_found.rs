use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

pub struct NotFoundPage;

impl Component for NotFoundPage {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        NotFoundPage
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="not-found">
                <h2>{ "Page not found" }</h2>
                <p>{ "The page you asked for does not exist." }</p>
                <Link<Route> to={Route::Home}>{ "Back to the dashboard" }</Link<Route>>
            </div>
        }
    }
}
