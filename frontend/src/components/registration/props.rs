use yew::prelude::*;

use crate::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct RegistrationProps {
    pub client: ApiClient,
    /// Called after the server accepted a new investigation.
    pub on_registered: Callback<()>,
    pub on_unauthorized: Callback<()>,
}
