use crate::app::App;

mod api;
mod app;
mod components;
mod helpers;
mod layout;
mod overlays;
mod pages;
mod routes;
mod session;

fn main() {
    yew::Renderer::<App>::new().render();
}
