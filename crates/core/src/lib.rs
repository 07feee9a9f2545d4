//! Ticketcore admin domain types
//!
//! Everything here is transport-agnostic so it can be exercised natively;
//! the HTTP gateway lives in `ticketcore-client`.

pub mod access;
pub mod bootstrap;
pub mod entities;
pub mod error;
pub mod field_errors;
pub mod profile;
pub mod session;
pub mod settings;
pub mod slice;
pub mod validation;

pub use access::{Destination, RouteDecision, RouteKind};
pub use bootstrap::{BootOutcome, BootPhase, SessionBootstrap, SessionRefresher};
pub use entities::{Entity, Listing, Page, PageInfo};
pub use error::{CoreError, CoreResult};
pub use field_errors::FieldErrors;
pub use profile::{ProfileUpdate, UserProfile};
pub use session::{PendingContext, Session, SessionStore, TokenExpiry};
pub use settings::DashboardSettings;
pub use slice::{EntitySlice, SliceAction};
pub use validation::Validate;
