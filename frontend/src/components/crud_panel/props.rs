use yew::prelude::*;

use common::schema::EntitySchema;

use crate::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct CrudPanelProps {
    /// Record type shown by this panel.
    pub schema: &'static EntitySchema,
    /// Investigation the records belong to; also sent as their foreign key.
    pub file_number: AttrValue,
    pub client: ApiClient,
    /// Invoked when the API rejects the session.
    pub on_unauthorized: Callback<()>,
}
