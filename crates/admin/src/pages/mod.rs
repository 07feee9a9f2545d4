pub mod change_password;
pub mod entity;
pub mod forgot_password;
pub mod home;
pub mod login;
pub mod otp;

pub use change_password::ChangePasswordPage;
pub use entity::EntityPage;
pub use forgot_password::ForgotPasswordPage;
pub use home::{DashboardHome, LocationsHome, NotFoundPage};
pub use login::LoginPage;
pub use otp::OtpPage;

use ticketcore_client::ClientError;
use ticketcore_core::FieldErrors;
use yew::prelude::*;

/// Route a failed auth call to the form's field errors or its popup
pub(crate) fn show_failure(
    error: &ClientError,
    fields: &UseStateHandle<FieldErrors>,
    popup: &UseStateHandle<Option<AttrValue>>,
) {
    match error.field_errors() {
        Some(errors) => fields.set(errors.clone()),
        None => popup.set(Some(error.user_message().into())),
    }
}

/// Callback clearing one field's error when its input gains focus
pub(crate) fn clear_on_focus(fields: &UseStateHandle<FieldErrors>) -> Callback<AttrValue> {
    let fields = fields.clone();
    Callback::from(move |name: AttrValue| {
        if fields.contains(&name) {
            let mut next = (*fields).clone();
            next.clear_field(&name);
            fields.set(next);
        }
    })
}

pub(crate) fn field_error(fields: &FieldErrors, name: &str) -> Option<AttrValue> {
    fields.get(name).map(|message| AttrValue::from(message.to_string()))
}

#[derive(Properties, PartialEq)]
pub(crate) struct AuthCardProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub subtitle: Option<AttrValue>,
    pub children: Children,
}

/// Centered card used by the login and recovery screens
#[function_component(AuthCard)]
pub(crate) fn auth_card(props: &AuthCardProps) -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100 px-4">
            <div class="w-full max-w-md bg-white rounded-lg shadow p-8">
                <h1 class="text-2xl font-semibold text-gray-900 mb-1">{&props.title}</h1>
                if let Some(subtitle) = &props.subtitle {
                    <p class="text-sm text-gray-500 mb-6">{subtitle}</p>
                }
                {props.children.clone()}
            </div>
        </div>
    }
}

pub(crate) const PRIMARY_BUTTON: &str = "w-full py-2 px-4 bg-indigo-600 text-white text-sm font-medium \
    rounded-md hover:bg-indigo-700 disabled:opacity-50 disabled:cursor-not-allowed";
