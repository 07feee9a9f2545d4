//! Form inputs that display their field error
//!
//! Focusing an input reports its field name so the page can clear that
//! one error.

use yew::prelude::*;

const INPUT_CLASS: &str = "w-full px-2.5 py-1.5 text-sm border rounded-md shadow-sm \
    focus:outline-none focus:ring-2 focus:ring-indigo-500 focus:border-indigo-500 \
    bg-white text-gray-900 disabled:bg-gray-100 disabled:cursor-not-allowed";

fn border(error: Option<&AttrValue>) -> &'static str {
    if error.is_some() {
        "border-red-500"
    } else {
        "border-gray-300"
    }
}

fn focus_callback(on_focus: &Callback<AttrValue>, name: &AttrValue) -> Callback<FocusEvent> {
    let on_focus = on_focus.clone();
    let name = name.clone();
    Callback::from(move |_: FocusEvent| on_focus.emit(name.clone()))
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    /// Wire name of the field, used to look up and clear its error
    pub name: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub on_focus: Callback<AttrValue>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div class="mb-3">
            <label class="block text-sm font-medium text-gray-700 mb-1" for={props.name.clone()}>
                {&props.label}
            </label>
            <input
                id={props.name.clone()}
                name={props.name.clone()}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                {oninput}
                onfocus={focus_callback(&props.on_focus, &props.name)}
                class={classes!(INPUT_CLASS, border(props.error.as_ref()))}
            />
            if let Some(error) = &props.error {
                <p class="mt-1 text-xs text-red-600">{error}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    pub name: AttrValue,
    pub value: AttrValue,
    /// `(value, label)` pairs
    pub options: Vec<(AttrValue, AttrValue)>,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub on_focus: Callback<AttrValue>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <div class="mb-3">
            <label class="block text-sm font-medium text-gray-700 mb-1" for={props.name.clone()}>
                {&props.label}
            </label>
            <select
                id={props.name.clone()}
                name={props.name.clone()}
                {onchange}
                onfocus={focus_callback(&props.on_focus, &props.name)}
                class={classes!(INPUT_CLASS, border(props.error.as_ref()))}
            >
                if let Some(placeholder) = &props.placeholder {
                    <option value="" selected={props.value.is_empty()}>{placeholder}</option>
                }
                {props.options.iter().map(|(value, label)| {
                    html! {
                        <option value={value.clone()} selected={value == &props.value}>
                            {label}
                        </option>
                    }
                }).collect::<Html>()}
            </select>
            if let Some(error) = &props.error {
                <p class="mt-1 text-xs text-red-600">{error}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusToggleProps {
    pub checked: bool,
    /// Receives the requested new state
    pub on_toggle: Callback<bool>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(StatusToggle)]
pub fn status_toggle(props: &StatusToggleProps) -> Html {
    let onclick = {
        let on_toggle = props.on_toggle.clone();
        let checked = props.checked;
        Callback::from(move |_: MouseEvent| on_toggle.emit(!checked))
    };

    html! {
        <button
            type="button"
            {onclick}
            disabled={props.disabled}
            class={classes!(
                "relative", "inline-flex", "h-6", "w-11", "items-center", "rounded-full",
                "transition-colors", "disabled:opacity-50",
                if props.checked { "bg-indigo-600" } else { "bg-gray-200" }
            )}
        >
            <span
                class={classes!(
                    "inline-block", "h-4", "w-4", "rounded-full", "bg-white",
                    "transition-transform",
                    if props.checked { "translate-x-6" } else { "translate-x-1" }
                )}
            />
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusSelectProps {
    pub value: AttrValue,
    pub options: &'static [&'static str],
    pub on_change: Callback<String>,
    #[prop_or(false)]
    pub disabled: bool,
}

/// Inline lifecycle status picker for table rows
#[function_component(StatusSelect)]
pub fn status_select(props: &StatusSelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        let current = props.value.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            if value != current.as_str() {
                on_change.emit(value);
            }
        })
    };

    html! {
        <select
            {onchange}
            disabled={props.disabled}
            class="px-2 py-1 text-xs border border-gray-300 rounded-md bg-white"
        >
            {props.options.iter().map(|option| {
                html! {
                    <option value={*option} selected={*option == props.value.as_str()}>
                        {*option}
                    </option>
                }
            }).collect::<Html>()}
        </select>
    }
}
