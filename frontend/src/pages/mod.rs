pub mod alerts;
pub mod home;
pub mod investigation_detail;
pub mod investigations;
pub mod login;
pub mod not_found;
pub mod settings;

use common::error::ApiError;
use yew::prelude::*;

/// Fetch status of the data a page shows.
pub enum Load<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Load<T> {
    /// Settles a fetch; a rejected session is reported through `on_unauthorized`.
    pub fn settle(result: Result<T, ApiError>, on_unauthorized: &Callback<()>) -> Self {
        match result {
            Ok(value) => Load::Ready(value),
            Err(err) => {
                if err.is_unauthorized() {
                    on_unauthorized.emit(());
                }
                Load::Failed(err.message())
            }
        }
    }
}

/// Loading line or error banner for a page whose data is not ready.
pub fn load_status<T>(load: &Load<T>) -> Html {
    match load {
        Load::Loading => html! { <div class="loading">{ "Loading…" }</div> },
        Load::Failed(message) => html! { <div class="banner banner-error">{ message.clone() }</div> },
        Load::Ready(_) => html! {},
    }
}
