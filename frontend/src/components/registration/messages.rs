use common::error::ApiError;
use common::model::investigation::Division;
use common::registration::Section;

pub enum Msg {
    SetTab(Section),
    Set(Section, &'static str, String),
    Submit,
    Finished(Result<(), ApiError>),
    DivisionsLoaded(Result<Vec<Division>, ApiError>),
}
