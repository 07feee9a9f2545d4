//! Route table

use crate::components::DashboardLayout;
use crate::guard::RouteGuard;
use crate::listing::{
    Artists, Cities, Countries, Events, Facilities, Organizers, Regions, Shows, TicketCategories,
    Venues,
};
use crate::pages::{
    ChangePasswordPage, DashboardHome, EntityPage, ForgotPasswordPage, LocationsHome, LoginPage,
    NotFoundPage, OtpPage,
};
use ticketcore_core::access::{Destination, RouteKind};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/forgot-password")]
    ForgotPassword,
    #[at("/otpverification")]
    OtpVerification,
    #[at("/change-password")]
    ChangePassword,
    #[at("/dashboard")]
    Dashboard,
    #[at("/dashboard/location")]
    Locations,
    #[at("/dashboard/location/countries")]
    Countries,
    #[at("/dashboard/location/regions")]
    Regions,
    #[at("/dashboard/location/cities")]
    Cities,
    #[at("/dashboard/organizers")]
    Organizers,
    #[at("/dashboard/artist")]
    Artists,
    #[at("/dashboard/venue")]
    Venues,
    #[at("/dashboard/venue/facilities")]
    Facilities,
    #[at("/dashboard/events")]
    Events,
    #[at("/dashboard/shows")]
    Shows,
    #[at("/dashboard/ticket-category")]
    TicketCategories,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub const fn kind(&self) -> RouteKind {
        match self {
            Self::Root | Self::Login | Self::ForgotPassword | Self::NotFound => RouteKind::Open,
            Self::OtpVerification => RouteKind::Challenge,
            Self::ChangePassword => RouteKind::PasswordChange,
            _ => RouteKind::Protected,
        }
    }
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Login => Self::Login,
            Destination::OtpVerification => Self::OtpVerification,
            Destination::ChangePassword => Self::ChangePassword,
            Destination::Dashboard => Self::Dashboard,
        }
    }
}

pub fn switch(route: Route) -> Html {
    let kind = route.kind();
    let page = match route {
        Route::Root => html! { <Redirect<Route> to={Route::Login} /> },
        Route::Login => html! { <LoginPage /> },
        Route::ForgotPassword => html! { <ForgotPasswordPage /> },
        Route::OtpVerification => html! { <OtpPage /> },
        Route::ChangePassword => html! { <ChangePasswordPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
        Route::Dashboard => html! { <DashboardHome /> },
        Route::Locations => html! { <LocationsHome /> },
        Route::Countries => html! { <EntityPage<Countries> /> },
        Route::Regions => html! { <EntityPage<Regions> /> },
        Route::Cities => html! { <EntityPage<Cities> /> },
        Route::Organizers => html! { <EntityPage<Organizers> /> },
        Route::Artists => html! { <EntityPage<Artists> /> },
        Route::Venues => html! { <EntityPage<Venues> /> },
        Route::Facilities => html! { <EntityPage<Facilities> /> },
        Route::Events => html! { <EntityPage<Events> /> },
        Route::Shows => html! { <EntityPage<Shows> /> },
        Route::TicketCategories => html! { <EntityPage<TicketCategories> /> },
    };

    let page = if kind == RouteKind::Protected {
        html! { <DashboardLayout>{page}</DashboardLayout> }
    } else {
        page
    };

    html! { <RouteGuard {kind}>{page}</RouteGuard> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_route_kinds() {
        assert_eq!(Route::Login.kind(), RouteKind::Open);
        assert_eq!(Route::OtpVerification.kind(), RouteKind::Challenge);
        assert_eq!(Route::ChangePassword.kind(), RouteKind::PasswordChange);
        assert_eq!(Route::Countries.kind(), RouteKind::Protected);
        assert_eq!(Route::TicketCategories.kind(), RouteKind::Protected);
    }

    #[wasm_bindgen_test]
    fn test_paths_match_dashboard_layout() {
        assert_eq!(Route::Facilities.to_path(), "/dashboard/venue/facilities");
        assert_eq!(
            Route::recognize("/dashboard/location/cities"),
            Some(Route::Cities)
        );
        assert_eq!(Route::recognize("/nowhere"), Some(Route::NotFound));
    }
}
