//! Application root

use crate::components::LoadingSpinner;
use crate::context::{ApiHandle, SessionProvider, use_session};
use crate::routes::{Route, switch};
use crate::settings;
use ticketcore_client::{AuthGateway, ClientError};
use ticketcore_core::{BootPhase, DashboardSettings, SessionStore};
use tracing::{error, info};
use yew::prelude::*;
use yew_router::prelude::*;

fn connect(settings: &DashboardSettings) -> Result<ApiHandle, ClientError> {
    let origin = settings::page_origin().unwrap_or_default();
    let gateway = AuthGateway::from_settings(settings, &origin, SessionStore::new())?;
    info!(api_root = gateway.api_root(), "dashboard gateway ready");
    Ok(ApiHandle::new(gateway))
}

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_memo((), |_| settings::load());
    let api = {
        let settings = settings.clone();
        use_memo((), move |_| connect(&settings).map_err(|e| e.to_string()))
    };

    match &*api {
        Ok(api) => html! {
            <SessionProvider
                api={api.clone()}
                check_interval_ms={settings.session_check_interval_ms}
            >
                <Shell basename={settings.router_basename.clone()} />
            </SessionProvider>
        },
        Err(message) => {
            error!(%message, "dashboard gateway could not be configured");
            html! {
                <div class="min-h-screen flex items-center justify-center bg-gray-100">
                    <div class="bg-white shadow rounded-lg p-6 max-w-md">
                        <h1 class="text-lg font-semibold text-red-600 mb-2">{"Configuration error"}</h1>
                        <p class="text-sm text-gray-700">{message}</p>
                    </div>
                </div>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
struct ShellProps {
    basename: AttrValue,
}

/// Holds the router back until the boot refresh settles
#[function_component(Shell)]
fn shell(props: &ShellProps) -> Html {
    let session = use_session();

    if session.phase == BootPhase::Booting {
        return html! {
            <div class="flex flex-col items-center justify-center min-h-screen">
                <LoadingSpinner text={"Checking session..."} />
            </div>
        };
    }

    html! {
        <BrowserRouter basename={props.basename.clone()}>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}
