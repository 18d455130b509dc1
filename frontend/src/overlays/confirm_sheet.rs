//! Modal confirmation sheet that slides down from the top of the viewport.
//!
//! Visibility is driven by the `open` prop. The sheet is always mounted; opening adds
//! the `show` class a tick after render so the CSS transition runs, closing removes it.

use gloo_timers::callback::Timeout;
use uuid::Uuid;
use web_sys::HtmlElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmSheetProps {
    pub open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::Static("Delete"))]
    pub confirm_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

pub struct ConfirmSheet {
    id: String,
    node_ref: NodeRef,
}

impl Component for ConfirmSheet {
    type Message = ();
    type Properties = ConfirmSheetProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
            node_ref: NodeRef::default(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());
        let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());

        html! {
            <>
                if props.open {
                    <div class="sheet-backdrop" onclick={on_cancel.clone()} />
                }
                <div class="top-sheet" id={self.id.clone()} ref={self.node_ref.clone()}
                    role="dialog" aria-modal="true" aria-hidden={(!props.open).to_string()}>
                    <h3>{ props.title.clone() }</h3>
                    <p>{ props.message.clone() }</p>
                    <div class="sheet-actions">
                        <button type="button" class="btn btn-text" onclick={on_cancel}
                            disabled={props.busy}>{ "Cancel" }</button>
                        <button type="button" class="btn btn-danger" onclick={on_confirm}
                            disabled={props.busy}>
                            { if props.busy { "Deleting…".into() } else { props.confirm_label.clone() } }
                        </button>
                    </div>
                </div>
            </>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if ctx.props().open {
            open_sheet(&self.node_ref);
        } else {
            close_sheet(&self.node_ref);
        }
    }
}

fn open_sheet(sheet_ref: &NodeRef) {
    if let Some(sheet) = sheet_ref.cast::<HtmlElement>() {
        if sheet.class_list().contains("show") {
            return;
        }
        Timeout::new(50, move || {
            let _ = sheet.class_list().add_1("show");
        })
        .forget();
    }
}

fn close_sheet(sheet_ref: &NodeRef) {
    if let Some(sheet) = sheet_ref.cast::<HtmlElement>() {
        let _ = sheet.class_list().remove_1("show");
    }
}
