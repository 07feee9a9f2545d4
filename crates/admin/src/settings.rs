//! Dashboard settings baked into the bundle

use ticketcore_core::DashboardSettings;
use tracing::warn;

const BUNDLED: &str = include_str!("../dashboard.toml");

/// Parse the bundled settings, falling back to defaults when they are
/// unusable
pub fn load() -> DashboardSettings {
    DashboardSettings::from_toml(BUNDLED).unwrap_or_else(|error| {
        warn!(%error, "bundled dashboard settings rejected; using defaults");
        DashboardSettings::default()
    })
}

/// Origin of the page serving the dashboard, e.g. `https://admin.example`
pub fn page_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_bundled_settings_parse() {
        let settings = DashboardSettings::from_toml(BUNDLED).unwrap();
        assert_eq!(settings.client_source, "WEB");
        assert_eq!(settings.router_basename, "/adminpannel");
        assert!(settings.api_base_url.is_some());
    }
}
