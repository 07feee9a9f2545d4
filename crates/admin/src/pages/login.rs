//! Email and password login

use super::{AuthCard, PRIMARY_BUTTON, clear_on_focus, field_error, show_failure};
use crate::components::{ErrorPopup, TextField};
use crate::context::{sync_session, use_api, use_session};
use crate::routes::Route;
use ticketcore_client::{Credentials, LoginOutcome};
use ticketcore_core::{FieldErrors, Validate};
use yew::prelude::*;
use yew_router::prelude::*;

const fn next_route(outcome: &LoginOutcome) -> Route {
    match outcome {
        LoginOutcome::Authenticated(_) => Route::Dashboard,
        LoginOutcome::TwoFactorRequired(_) => Route::OtpVerification,
        LoginOutcome::PasswordChangeRequired(_) => Route::ChangePassword,
        LoginOutcome::PasswordResetRequired { .. } => Route::ForgotPassword,
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let api = use_api();
    let session = use_session();
    let navigator = use_navigator();

    let credentials = use_state(Credentials::default);
    let fields = use_state(FieldErrors::new);
    let popup = use_state(|| Option::<AttrValue>::None);
    let submitting = use_state(|| false);

    let on_email = {
        let credentials = credentials.clone();
        Callback::from(move |email: String| {
            credentials.set(Credentials {
                email,
                ..(*credentials).clone()
            });
        })
    };
    let on_password = {
        let credentials = credentials.clone();
        Callback::from(move |password: String| {
            credentials.set(Credentials {
                password,
                ..(*credentials).clone()
            });
        })
    };

    let onsubmit = {
        let credentials = credentials.clone();
        let fields = fields.clone();
        let popup = popup.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let errors = credentials.validate();
            if !errors.is_empty() {
                fields.set(errors);
                return;
            }

            let api = api.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let credentials = (*credentials).clone();
            let fields = fields.clone();
            let popup = popup.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.login(&credentials).await {
                    Ok(outcome) => {
                        sync_session(&api, &session);
                        let route = next_route(&outcome);
                        if let Some(navigator) = navigator {
                            match outcome {
                                LoginOutcome::PasswordResetRequired { message } => {
                                    navigator.push_with_state(&route, message);
                                }
                                _ => navigator.push(&route),
                            }
                        }
                    }
                    Err(error) => show_failure(&error, &fields, &popup),
                }
                submitting.set(false);
            });
        })
    };

    let on_close = {
        let popup = popup.clone();
        Callback::from(move |()| popup.set(None))
    };
    let on_focus = clear_on_focus(&fields);

    html! {
        <AuthCard title="Sign in" subtitle="Ticketcore admin dashboard">
            <form {onsubmit} novalidate={true}>
                <TextField
                    label="Email"
                    name="email"
                    input_type="email"
                    value={credentials.email.clone()}
                    error={field_error(&fields, "email")}
                    on_change={on_email}
                    on_focus={on_focus.clone()}
                />
                <TextField
                    label="Password"
                    name="password"
                    input_type="password"
                    value={credentials.password.clone()}
                    error={field_error(&fields, "password")}
                    on_change={on_password}
                    {on_focus}
                />
                <div class="flex justify-end mb-4">
                    <Link<Route> to={Route::ForgotPassword} classes="text-sm text-indigo-600 hover:underline">
                        {"Forgot password?"}
                    </Link<Route>>
                </div>
                <button type="submit" class={PRIMARY_BUTTON} disabled={*submitting}>
                    { if *submitting { "Signing in..." } else { "Sign in" } }
                </button>
            </form>
            <ErrorPopup message={(*popup).clone()} {on_close} />
        </AuthCard>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ticketcore_core::{Session, TokenExpiry};
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_outcomes_route_to_their_screens() {
        let session = Session::authenticated(TokenExpiry {
            access_token_expiry: Utc::now(),
            refresh_token_expiry: Utc::now(),
        });
        assert_eq!(
            next_route(&LoginOutcome::Authenticated(session.clone())),
            Route::Dashboard
        );
        assert_eq!(
            next_route(&LoginOutcome::TwoFactorRequired(session)),
            Route::OtpVerification
        );
        assert_eq!(
            next_route(&LoginOutcome::PasswordResetRequired {
                message: "reset".into()
            }),
            Route::ForgotPassword
        );
    }
}
