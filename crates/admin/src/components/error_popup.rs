//! Modal popups for failures and notices

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorPopupProps {
    pub message: Option<AttrValue>,
    pub on_close: Callback<()>,
}

/// Modal error dialog; clicking the backdrop also closes it
#[function_component(ErrorPopup)]
pub fn error_popup(props: &ErrorPopupProps) -> Html {
    let Some(message) = props.message.clone() else {
        return Html::default();
    };

    let on_backdrop = props.on_close.reform(|_: MouseEvent| ());
    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50" onclick={on_backdrop}>
            <div class="bg-white rounded-lg shadow-xl w-full max-w-sm p-6" onclick={stop}>
                <h2 class="text-lg font-semibold text-red-600 mb-2">{"Error"}</h2>
                <p class="text-sm text-gray-700 mb-4">{message}</p>
                <div class="flex justify-end">
                    <button
                        class="px-4 py-2 text-sm bg-indigo-600 text-white rounded-md hover:bg-indigo-700"
                        onclick={on_close}
                    >
                        {"Close"}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub message: Option<AttrValue>,
}

/// Inline informational banner
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div class="mb-4 px-3 py-2 rounded-md bg-blue-50 text-blue-800 text-sm">{message}</div>
        },
        None => Html::default(),
    }
}
