pub mod error_popup;
pub mod fields;
pub mod layout;
pub mod spinner;

pub use error_popup::{ErrorPopup, Notice};
pub use fields::{SelectField, StatusSelect, StatusToggle, TextField};
pub use layout::DashboardLayout;
pub use spinner::LoadingSpinner;
