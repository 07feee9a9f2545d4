//! Password recovery: email, emailed OTP, then a new password

use super::{AuthCard, PRIMARY_BUTTON, clear_on_focus, field_error, show_failure};
use crate::components::{ErrorPopup, Notice, TextField};
use crate::context::use_api;
use crate::routes::Route;
use ticketcore_client::PasswordPair;
use ticketcore_core::validation::validators;
use ticketcore_core::{FieldErrors, Validate};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Step {
    Email,
    Otp { email: String },
    Reset { reset_token: String },
}

#[function_component(ForgotPasswordPage)]
pub fn forgot_password_page() -> Html {
    let api = use_api();
    let navigator = use_navigator();
    // set when login bounced the user here
    let bounced = use_location()
        .and_then(|location| location.state::<String>())
        .map(|message| AttrValue::from((*message).clone()));

    let step = use_state(|| Step::Email);
    let email = use_state(String::new);
    let otp = use_state(String::new);
    let passwords = use_state(PasswordPair::default);
    let fields = use_state(FieldErrors::new);
    let popup = use_state(|| Option::<AttrValue>::None);
    let notice = use_state(move || bounced);
    let busy = use_state(|| false);

    let onsubmit = {
        let api = api.clone();
        let step = step.clone();
        let email = email.clone();
        let otp = otp.clone();
        let passwords = passwords.clone();
        let fields = fields.clone();
        let popup = popup.clone();
        let notice = notice.clone();
        let busy = busy.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut errors = FieldErrors::new();
            match &*step {
                Step::Email => validators::required(&mut errors, "email", &email),
                Step::Otp { .. } => validators::required(&mut errors, "otp", &otp),
                Step::Reset { .. } => errors = passwords.validate(),
            }
            if !errors.is_empty() {
                fields.set(errors);
                return;
            }

            let api = api.clone();
            let navigator = navigator.clone();
            let current = (*step).clone();
            let step = step.clone();
            let address = email.trim().to_string();
            let code = otp.trim().to_string();
            let pair = (*passwords).clone();
            let fields = fields.clone();
            let popup = popup.clone();
            let notice = notice.clone();
            let busy = busy.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match current {
                    Step::Email => match api.forgot_password(&address).await {
                        Ok(message) => {
                            notice.set(Some(message.into()));
                            step.set(Step::Otp { email: address });
                        }
                        Err(error) => show_failure(&error, &fields, &popup),
                    },
                    Step::Otp { email } => match api.verify_reset_otp(&email, &code).await {
                        Ok(reset_token) => {
                            notice.set(None);
                            step.set(Step::Reset { reset_token });
                        }
                        Err(error) => show_failure(&error, &fields, &popup),
                    },
                    Step::Reset { reset_token } => {
                        match api.reset_password(&reset_token, &pair).await {
                            Ok(_) => {
                                if let Some(navigator) = navigator {
                                    navigator.push(&Route::Login);
                                }
                            }
                            Err(error) => show_failure(&error, &fields, &popup),
                        }
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_resend = {
        let step = step.clone();
        let popup = popup.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            let Step::Otp { email } = (*step).clone() else {
                return;
            };
            let api = api.clone();
            let popup = popup.clone();
            let notice = notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.resend_reset_otp(&email).await {
                    Ok(message) => notice.set(Some(message.into())),
                    Err(error) => popup.set(Some(error.user_message().into())),
                }
            });
        })
    };

    let on_close = {
        let popup = popup.clone();
        Callback::from(move |()| popup.set(None))
    };
    let on_focus = clear_on_focus(&fields);

    let body = match &*step {
        Step::Email => {
            let value = (*email).clone();
            let on_change = {
                let email = email.clone();
                Callback::from(move |value: String| email.set(value))
            };
            html! {
                <TextField
                    label="Email"
                    name="email"
                    input_type="email"
                    {value}
                    error={field_error(&fields, "email")}
                    {on_change}
                    {on_focus}
                />
            }
        }
        Step::Otp { .. } => {
            let value = (*otp).clone();
            let on_change = {
                let otp = otp.clone();
                Callback::from(move |value: String| otp.set(value))
            };
            html! {
                <>
                    <TextField
                        label="Verification code"
                        name="otp"
                        {value}
                        error={field_error(&fields, "otp")}
                        {on_change}
                        {on_focus}
                    />
                    <button
                        type="button"
                        class="mb-4 text-sm text-indigo-600 hover:underline"
                        onclick={on_resend}
                    >
                        {"Resend code"}
                    </button>
                </>
            }
        }
        Step::Reset { .. } => {
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
            html! {
                <>
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
                </>
            }
        }
    };

    let action = match &*step {
        Step::Email => "Send code",
        Step::Otp { .. } => "Verify code",
        Step::Reset { .. } => "Reset password",
    };

    html! {
        <AuthCard title="Reset your password">
            <Notice message={(*notice).clone()} />
            <form {onsubmit} novalidate={true}>
                {body}
                <button type="submit" class={PRIMARY_BUTTON} disabled={*busy}>{action}</button>
            </form>
            <div class="mt-4 text-center">
                <Link<Route> to={Route::Login} classes="text-sm text-indigo-600 hover:underline">
                    {"Back to sign in"}
                </Link<Route>>
            </div>
            <ErrorPopup message={(*popup).clone()} {on_close} />
        </AuthCard>
    }
}
