//! Landing and fallback pages

use crate::context::use_session;
use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(DashboardHome)]
pub fn dashboard_home() -> Html {
    let session = use_session();
    let greeting = session
        .profile
        .as_ref()
        .map(|profile| format!("Signed in as {}", profile.display_name()));

    html! {
        <div>
            <h2 class="text-2xl font-semibold text-gray-900">{"Welcome to Dashboard"}</h2>
            if let Some(greeting) = greeting {
                <p class="mt-2 text-sm text-gray-600">{greeting}</p>
            }
        </div>
    }
}

#[function_component(LocationsHome)]
pub fn locations_home() -> Html {
    html! {
        <div>
            <h2 class="text-2xl font-semibold text-gray-900">{"Welcome to Locations"}</h2>
            <div class="mt-4 flex gap-3">
                <Link<Route> to={Route::Countries} classes="text-indigo-600 hover:underline">{"Countries"}</Link<Route>>
                <Link<Route> to={Route::Regions} classes="text-indigo-600 hover:underline">{"Regions"}</Link<Route>>
                <Link<Route> to={Route::Cities} classes="text-indigo-600 hover:underline">{"Cities"}</Link<Route>>
            </div>
        </div>
    }
}

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-100">
            <h1 class="text-4xl font-bold text-gray-800 mb-2">{"404"}</h1>
            <p class="text-gray-600 mb-4">{"Page not found"}</p>
            <Link<Route> to={Route::Login} classes="text-indigo-600 hover:underline">{"Go to sign in"}</Link<Route>>
        </div>
    }
}
