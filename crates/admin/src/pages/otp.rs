//! Second-factor verification after a challenged login

use super::{AuthCard, PRIMARY_BUTTON, clear_on_focus, field_error, show_failure};
use crate::components::{ErrorPopup, Notice, TextField};
use crate::context::{sync_session, use_api, use_session};
use crate::routes::Route;
use ticketcore_core::FieldErrors;
use ticketcore_core::validation::validators;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(OtpPage)]
pub fn otp_page() -> Html {
    let api = use_api();
    let session = use_session();
    let navigator = use_navigator();

    let otp = use_state(String::new);
    let fields = use_state(FieldErrors::new);
    let popup = use_state(|| Option::<AttrValue>::None);
    let notice = use_state(|| Option::<AttrValue>::None);
    let busy = use_state(|| false);

    let on_otp = {
        let otp = otp.clone();
        Callback::from(move |value: String| otp.set(value))
    };

    let onsubmit = {
        let api = api.clone();
        let otp = otp.clone();
        let fields = fields.clone();
        let popup = popup.clone();
        let busy = busy.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut errors = FieldErrors::new();
            validators::required(&mut errors, "otp", &otp);
            if !errors.is_empty() {
                fields.set(errors);
                return;
            }

            let api = api.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let code = (*otp).clone();
            let fields = fields.clone();
            let popup = popup.clone();
            let busy = busy.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.verify_otp(code.trim()).await {
                    Ok(_) => {
                        sync_session(&api, &session);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(error) => show_failure(&error, &fields, &popup),
                }
                busy.set(false);
            });
        })
    };

    let on_resend = {
        let popup = popup.clone();
        let notice = notice.clone();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            let popup = popup.clone();
            let notice = notice.clone();
            let busy = busy.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.resend_otp().await {
                    Ok(message) => notice.set(Some(message.into())),
                    Err(error) => popup.set(Some(error.user_message().into())),
                }
                busy.set(false);
            });
        })
    };

    let on_close = {
        let popup = popup.clone();
        Callback::from(move |()| popup.set(None))
    };

    html! {
        <AuthCard title="Verify your login" subtitle="Enter the one-time code we sent you">
            <Notice message={(*notice).clone()} />
            <form {onsubmit} novalidate={true}>
                <TextField
                    label="One-time code"
                    name="otp"
                    value={(*otp).clone()}
                    error={field_error(&fields, "otp")}
                    on_change={on_otp}
                    on_focus={clear_on_focus(&fields)}
                />
                <button type="submit" class={PRIMARY_BUTTON} disabled={*busy}>{"Verify"}</button>
            </form>
            <button
                type="button"
                class="mt-3 w-full text-sm text-indigo-600 hover:underline disabled:opacity-50"
                onclick={on_resend}
                disabled={*busy}
            >
                {"Resend code"}
            </button>
            <ErrorPopup message={(*popup).clone()} {on_close} />
        </AuthCard>
    }
}
