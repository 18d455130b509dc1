use yew::{html, Children, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct DetailGridProps {
    #[prop_or(2)]
    pub columns: usize,
    pub children: Children,
}

/// Label/value grid used by the detail views.
pub struct DetailGrid;

impl Component for DetailGrid {
    type Message = ();
    type Properties = DetailGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        DetailGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat({}, minmax(0, 1fr));
             gap: 12px 24px;",
            props.columns.max(1)
        );

        html! {
            <div class="detail-grid" {style}>
                { for props.children.iter() }
            </div>
        }
    }
}

/// One cell of a [`DetailGrid`].
pub fn grid_item(label: &str, value: String) -> Html {
    html! {
        <div class="detail-item">
            <div class="detail-label">{ label.to_string() }</div>
            <div class="detail-value">{ value }</div>
        </div>
    }
}
