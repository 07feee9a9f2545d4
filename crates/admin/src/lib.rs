//! Ticketcore admin dashboard
//!
//! A Yew single-page app over [`ticketcore_client::AuthGateway`]. The app
//! restores the session once on boot, guards every route on the session's
//! pending context and keeps one state slice per entity page.

pub mod app;
pub mod components;
pub mod context;
pub mod forms;
pub mod guard;
pub mod listing;
pub mod pages;
pub mod routes;
pub mod settings;
pub mod slice;

pub use app::App;
