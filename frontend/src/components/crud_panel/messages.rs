use common::crud::PanelEvent;

pub enum Msg {
    /// Forwarded to the panel state machine.
    Panel(PanelEvent),
}
