//! Labelled form inputs.
//!
//! Each primitive renders a label, the native control and, when given, an error line
//! underneath. Values travel as strings; conversion to JSON happens in the draft.
//! Native `required` and `maxlength` attributes are set so the browser flags problems
//! before the draft validation runs.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use common::draft::FieldIssue;
use common::schema::{FieldSpec, InputKind};

/// Properties shared by every field primitive.
#[derive(Properties, PartialEq, Clone)]
pub struct FieldProps {
    /// HTML `name` and `id` of the control.
    pub name: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub max_length: Option<u32>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[derive(Clone, PartialEq)]
pub struct Choice {
    pub value: AttrValue,
    pub label: AttrValue,
}

#[derive(Properties, PartialEq, Clone)]
pub struct SelectProps {
    pub field: FieldProps,
    pub choices: Vec<Choice>,
    #[prop_or(AttrValue::Static("Select…"))]
    pub placeholder: AttrValue,
}

fn wrap(props: &FieldProps, control: Html) -> Html {
    let class = classes!("form-field", props.error.is_some().then_some("has-error"));
    html! {
        <div {class}>
            <label for={props.name.clone()}>
                { props.label.clone() }
                if props.required {
                    <span class="required-mark">{ " *" }</span>
                }
            </label>
            { control }
            if let Some(error) = &props.error {
                <div class="field-error">{ error.clone() }</div>
            }
        </div>
    }
}

fn input_callback(on_change: &Callback<String>) -> Callback<InputEvent> {
    let on_change = on_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_change.emit(input.value());
    })
}

fn native_input(props: &FieldProps, input_type: &'static str, step: Option<&'static str>) -> Html {
    let control = html! {
        <input
            type={input_type}
            id={props.name.clone()}
            name={props.name.clone()}
            value={props.value.clone()}
            required={props.required}
            maxlength={props.max_length.map(|m| m.to_string())}
            {step}
            disabled={props.disabled}
            oninput={input_callback(&props.on_change)}
        />
    };
    wrap(props, control)
}

macro_rules! field_component {
    ($name:ident, $input_type:expr, $step:expr) => {
        pub struct $name;

        impl Component for $name {
            type Message = ();
            type Properties = FieldProps;

            fn create(_ctx: &Context<Self>) -> Self {
                $name
            }

            fn view(&self, ctx: &Context<Self>) -> Html {
                native_input(ctx.props(), $input_type, $step)
            }
        }
    };
}

field_component!(TextInput, "text", None);
field_component!(EmailInput, "email", None);
field_component!(NumberInput, "number", Some("1"));
field_component!(AmountInput, "number", Some("0.01"));
field_component!(DateInput, "date", None);

pub struct TextAreaInput;

impl Component for TextAreaInput {
    type Message = ();
    type Properties = FieldProps;

    fn create(_ctx: &Context<Self>) -> Self {
        TextAreaInput
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_change = props.on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(area.value());
        });
        let control = html! {
            <textarea
                id={props.name.clone()}
                name={props.name.clone()}
                rows="3"
                value={props.value.clone()}
                required={props.required}
                maxlength={props.max_length.map(|m| m.to_string())}
                disabled={props.disabled}
                {oninput}
            />
        };
        wrap(props, control)
    }
}

pub struct SelectInput;

impl Component for SelectInput {
    type Message = ();
    type Properties = SelectProps;

    fn create(_ctx: &Context<Self>) -> Self {
        SelectInput
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let field = &props.field;
        let on_change = field.on_change.clone();
        let onchange = Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        });
        let control = html! {
            <select
                id={field.name.clone()}
                name={field.name.clone()}
                required={field.required}
                disabled={field.disabled}
                {onchange}
            >
                <option value="" selected={field.value.is_empty()}>{ props.placeholder.clone() }</option>
                { for props.choices.iter().map(|choice| html! {
                    <option value={choice.value.clone()} selected={choice.value == field.value}>
                        { choice.label.clone() }
                    </option>
                }) }
            </select>
        };
        wrap(field, control)
    }
}

/// Builds the primitive matching a schema field.
pub fn schema_field(
    spec: &'static FieldSpec,
    name: String,
    value: &str,
    issue: Option<&FieldIssue>,
    disabled: bool,
    on_change: Callback<String>,
) -> Html {
    let field = FieldProps {
        name: name.into(),
        label: spec.label.into(),
        value: AttrValue::from(value.to_string()),
        on_change,
        required: spec.required,
        max_length: spec.max_length,
        disabled,
        error: issue.map(|issue| AttrValue::from(issue.to_string())),
    };
    match spec.input {
        InputKind::Text => html! { <TextInput ..field /> },
        InputKind::Email => html! { <EmailInput ..field /> },
        InputKind::Number => html! { <NumberInput ..field /> },
        InputKind::Amount => html! { <AmountInput ..field /> },
        InputKind::Date => html! { <DateInput ..field /> },
        InputKind::TextArea => html! { <TextAreaInput ..field /> },
        InputKind::Select(options) => {
            let choices = options
                .iter()
                .map(|o| Choice {
                    value: o.value.into(),
                    label: o.label.into(),
                })
                .collect::<Vec<_>>();
            html! { <SelectInput {field} {choices} /> }
        }
    }
}
