use common::crud::Panel;

use super::props::CrudPanelProps;

pub struct CrudPanel {
    pub panel: Panel,
}

impl CrudPanel {
    pub fn new(props: &CrudPanelProps) -> Self {
        Self {
            panel: Panel::new(props.schema, props.file_number.to_string()),
        }
    }
}
