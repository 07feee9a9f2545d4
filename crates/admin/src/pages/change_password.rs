//! Forced password change after login

use super::{AuthCard, PRIMARY_BUTTON, clear_on_focus, field_error, show_failure};
use crate::components::{ErrorPopup, TextField};
use crate::context::{sync_session, use_api, use_session};
use crate::routes::Route;
use ticketcore_client::PasswordPair;
use ticketcore_core::{FieldErrors, Validate};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(ChangePasswordPage)]
pub fn change_password_page() -> Html {
    let api = use_api();
    let session = use_session();
    let navigator = use_navigator();

    let passwords = use_state(PasswordPair::default);
    let fields = use_state(FieldErrors::new);
    let popup = use_state(|| Option::<AttrValue>::None);
    let busy = use_state(|| false);

    let on_new = {
        let passwords = passwords.clone();
        Callback::from(move |new_password: String| {
            passwords.set(PasswordPair {
                new_password,
                ..(*passwords).clone()
            });
        })
    };
    let on_confirm = {
        let passwords = passwords.clone();
        Callback::from(move |confirm_password: String| {
            passwords.set(PasswordPair {
                confirm_password,
                ..(*passwords).clone()
            });
        })
    };

    let onsubmit = {
        let passwords = passwords.clone();
        let fields = fields.clone();
        let popup = popup.clone();
        let busy = busy.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let errors = passwords.validate();
            if !errors.is_empty() {
                fields.set(errors);
                return;
            }

            let api = api.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let pair = (*passwords).clone();
            let fields = fields.clone();
            let popup = popup.clone();
            let busy = busy.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.change_password(&pair).await {
                    Ok(_) => {
                        // the pending session is gone; sign in with the new password
                        sync_session(&api, &session);
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Login);
                        }
                    }
                    Err(error) => show_failure(&error, &fields, &popup),
                }
                busy.set(false);
            });
        })
    };

    let on_close = {
        let popup = popup.clone();
        Callback::from(move |()| popup.set(None))
    };
    let on_focus = clear_on_focus(&fields);

    html! {
        <AuthCard title="Change your password" subtitle="A new password is required before continuing">
            <form {onsubmit} novalidate={true}>
                <TextField
                    label="New password"
                    name="newPassword"
                    input_type="password"
                    value={passwords.new_password.clone()}
                    error={field_error(&fields, "newPassword")}
                    on_change={on_new}
                    on_focus={on_focus.clone()}
                />
                <TextField
                    label="Confirm password"
                    name="confirmPassword"
                    input_type="password"
                    value={passwords.confirm_password.clone()}
                    error={field_error(&fields, "confirmPassword")}
                    on_change={on_confirm}
                    {on_focus}
                />
                <button type="submit" class={PRIMARY_BUTTON} disabled={*busy}>{"Update password"}</button>
            </form>
            <ErrorPopup message={(*popup).clone()} {on_close} />
        </AuthCard>
    }
}
