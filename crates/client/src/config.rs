//! Gateway constants and endpoint paths

pub use ticketcore_core::settings::{DEFAULT_API_PREFIX, DEFAULT_CLIENT_SOURCE};

/// Header identifying the calling frontend to the backend
pub const CLIENT_SOURCE_HEADER: &str = "X-Client-Source";

/// Auth endpoints, relative to the API prefix
pub mod paths {
    pub const LOGIN: &str = "/auth/login";
    pub const VERIFY_OTP: &str = "/auth/verify-otp";
    pub const RESEND_OTP: &str = "/auth/resend-otp";
    pub const CHANGE_PASSWORD: &str = "/auth/change-password";
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
    pub const VERIFY_RESET_OTP: &str = "/auth/verify-reset-otp";
    pub const RESET_PASSWORD: &str = "/auth/reset-password";
    pub const RESEND_RESET_OTP: &str = "/auth/resend-password-reset-otp";
    pub const LOGOUT: &str = "/auth/logout";
    pub const REFRESH: &str = "/auth/refreshToken";
    pub const PROFILE: &str = "/users/me/profile";
}
