//! Dashboard frame: sidebar navigation and header

use crate::context::{sync_session, use_api, use_session};
use crate::routes::Route;
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

const NAV: &[(&str, Route)] = &[
    ("Dashboard", Route::Dashboard),
    ("Organizers", Route::Organizers),
    ("Artists", Route::Artists),
    ("Events", Route::Events),
    ("Shows", Route::Shows),
    ("Ticket Categories", Route::TicketCategories),
];

const LOCATION_NAV: &[(&str, Route)] = &[
    ("Countries", Route::Countries),
    ("Regions", Route::Regions),
    ("Cities", Route::Cities),
];

const VENUE_NAV: &[(&str, Route)] = &[
    ("Venues", Route::Venues),
    ("Facilities", Route::Facilities),
];

fn nav_link(label: &'static str, route: &Route, current: Option<&Route>) -> Html {
    let active = current == Some(route);
    html! {
        <Link<Route>
            to={route.clone()}
            classes={classes!(
                "block", "px-4", "py-2", "rounded-md", "text-sm",
                if active { "bg-indigo-600 text-white" } else { "text-gray-300 hover:bg-gray-700" }
            )}
        >
            {label}
        </Link<Route>>
    }
}

fn nav_group(title: &'static str, entries: &[(&'static str, Route)], current: Option<&Route>) -> Html {
    html! {
        <div class="mt-4">
            <p class="px-4 text-xs uppercase tracking-wide text-gray-500 mb-1">{title}</p>
            {entries.iter().map(|(label, route)| nav_link(*label, route, current)).collect::<Html>()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardLayoutProps {
    pub children: Children,
}

#[function_component(DashboardLayout)]
pub fn dashboard_layout(props: &DashboardLayoutProps) -> Html {
    let api = use_api();
    let session = use_session();
    let navigator = use_navigator();
    let current = use_route::<Route>();

    let on_logout = {
        let api = api.clone();
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(error) = api.logout().await {
                    warn!(%error, "logout request failed");
                }
                sync_session(&api, &session);
                if let Some(navigator) = navigator {
                    navigator.replace(&Route::Login);
                }
            });
        })
    };

    let user = session
        .profile
        .as_ref()
        .map(ticketcore_core::UserProfile::display_name)
        .unwrap_or_default();

    html! {
        <div class="min-h-screen flex bg-gray-100">
            <aside class="w-60 bg-gray-800 py-6 flex-shrink-0">
                <h1 class="px-4 text-lg font-bold text-white mb-6">{"Ticketcore Admin"}</h1>
                <nav>
                    {NAV.iter().map(|(label, route)| nav_link(*label, route, current.as_ref())).collect::<Html>()}
                    {nav_group("Locations", LOCATION_NAV, current.as_ref())}
                    {nav_group("Venues", VENUE_NAV, current.as_ref())}
                </nav>
            </aside>
            <div class="flex-1 flex flex-col">
                <header class="bg-white shadow px-6 py-3 flex items-center justify-end gap-4">
                    <span class="text-sm text-gray-700">{user}</span>
                    <button
                        class="px-3 py-1.5 text-sm border border-gray-300 rounded-md hover:bg-gray-50"
                        onclick={on_logout}
                    >
                        {"Logout"}
                    </button>
                </header>
                <main class="flex-1 p-6">
                    {props.children.clone()}
                </main>
            </div>
        </div>
    }
}
