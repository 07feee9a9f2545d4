//! Login, two-factor and password flows
//!
//! None of these requests trigger a token refresh: they either create the
//! session or run without one.

use crate::config::paths;
use crate::error::ClientError;
use crate::gateway::{ApiRequest, AuthGateway};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use ticketcore_core::validation::validators;
use ticketcore_core::{FieldErrors, PendingContext, Session, TokenExpiry, Validate};
use tracing::{info, warn};

/// Embedded login status sending the user to password recovery
pub const PASSWORD_RESET_REQUIRED: u16 = 409;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for Credentials {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "email", &self.email);
        validators::required(&mut errors, "password", &self.password);
        errors
    }
}

/// New password with its confirmation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPair {
    pub new_password: String,
    pub confirm_password: String,
}

impl Validate for PasswordPair {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "newPassword", &self.new_password);
        validators::required(&mut errors, "confirmPassword", &self.confirm_password);
        if errors.is_empty() && self.new_password != self.confirm_password {
            errors.set("confirmPassword", "passwords do not match");
        }
        errors
    }
}

/// Where a login attempt leaves the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(Session),
    /// An OTP was sent; verify it with [`AuthGateway::verify_otp`]
    TwoFactorRequired(Session),
    /// The account must set a new password first
    PasswordChangeRequired(Session),
    /// The backend refused the login until the password is reset
    PasswordResetRequired { message: String },
}

impl LoginOutcome {
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session)
            | Self::TwoFactorRequired(session)
            | Self::PasswordChangeRequired(session) => Some(session),
            Self::PasswordResetRequired { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    #[serde(flatten)]
    expiry: TokenExpiry,
    #[serde(default)]
    temp_token: Option<String>,
    #[serde(default)]
    pwd_change_token: Option<String>,
}

impl LoginData {
    fn into_session(self) -> Session {
        match (self.temp_token, self.pwd_change_token) {
            (Some(temp), _) if !temp.is_empty() => {
                Session::challenged(self.expiry, PendingContext::TwoFactor, temp)
            }
            (_, Some(token)) if !token.is_empty() => {
                Session::challenged(self.expiry, PendingContext::PasswordChange, token)
            }
            _ => Session::authenticated(self.expiry),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpRequest<'a> {
    temp_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    otp: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    pwd_change_token: &'a str,
    #[serde(flatten)]
    passwords: &'a PasswordPair,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    otp: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    reset_token: &'a str,
    #[serde(flatten)]
    passwords: &'a PasswordPair,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetTokenData {
    reset_token: String,
}

impl AuthGateway {
    /// Log in with email and password
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ClientError> {
        let request = ApiRequest::post(paths::LOGIN)
            .json(credentials)?
            .without_refresh();

        let envelope = match self.send::<LoginData>(request).await {
            Ok(envelope) => envelope,
            Err(error) if error.status() == Some(PASSWORD_RESET_REQUIRED) => {
                info!("login refused until the password is reset");
                return Ok(LoginOutcome::PasswordResetRequired {
                    message: error.user_message(),
                });
            }
            Err(error) => {
                warn!(%error, "login failed");
                return Err(error);
            }
        };

        let session = envelope.into_data()?.into_session();
        self.session().establish(session.clone());

        let outcome = match session.pending {
            PendingContext::None => LoginOutcome::Authenticated(session),
            PendingContext::TwoFactor => LoginOutcome::TwoFactorRequired(session),
            PendingContext::PasswordChange => LoginOutcome::PasswordChangeRequired(session),
        };
        info!(pending = ?outcome.session().map(|s| s.pending), "login succeeded");
        Ok(outcome)
    }

    fn pending_token(&self, pending: PendingContext) -> Result<String, ClientError> {
        self.session()
            .current()
            .and_then(|session| session.challenge_token(pending).map(str::to_string))
            .ok_or_else(|| ClientError::InvalidState(format!("no {pending:?} challenge pending")))
    }

    /// Complete a two-factor login with the emailed OTP
    pub async fn verify_otp(&self, otp: &str) -> Result<Session, ClientError> {
        let temp_token = self.pending_token(PendingContext::TwoFactor)?;
        let request = ApiRequest::post(paths::VERIFY_OTP)
            .json(&OtpRequest {
                temp_token: &temp_token,
                otp: Some(otp),
            })?
            .without_refresh();

        let expiry = self.send::<TokenExpiry>(request).await?.into_data()?;
        let session = Session::authenticated(expiry);
        self.session().establish(session.clone());
        info!("two-factor verification succeeded");
        Ok(session)
    }

    /// Ask for a fresh two-factor OTP; returns the backend message
    pub async fn resend_otp(&self) -> Result<String, ClientError> {
        let temp_token = self.pending_token(PendingContext::TwoFactor)?;
        let request = ApiRequest::post(paths::RESEND_OTP)
            .json(&OtpRequest {
                temp_token: &temp_token,
                otp: None,
            })?
            .without_refresh();
        Ok(self.send::<IgnoredAny>(request).await?.message)
    }

    /// Set a new password when login demanded it.
    ///
    /// The pending session is cleared on success; the user logs in again
    /// with the new password.
    pub async fn change_password(&self, passwords: &PasswordPair) -> Result<String, ClientError> {
        let token = self.pending_token(PendingContext::PasswordChange)?;
        let request = ApiRequest::post(paths::CHANGE_PASSWORD)
            .json(&ChangePasswordRequest {
                pwd_change_token: &token,
                passwords,
            })?
            .without_refresh();

        let envelope = self.send::<IgnoredAny>(request).await?;
        self.session().clear();
        Ok(envelope.message)
    }

    /// Start password recovery by emailing a reset OTP
    pub async fn forgot_password(&self, email: &str) -> Result<String, ClientError> {
        self.email_request(paths::FORGOT_PASSWORD, email, None).await
    }

    pub async fn resend_reset_otp(&self, email: &str) -> Result<String, ClientError> {
        self.email_request(paths::RESEND_RESET_OTP, email, None).await
    }

    /// Exchange the reset OTP for a reset token
    pub async fn verify_reset_otp(&self, email: &str, otp: &str) -> Result<String, ClientError> {
        let request = ApiRequest::post(paths::VERIFY_RESET_OTP)
            .json(&EmailRequest {
                email,
                otp: Some(otp),
            })?
            .without_refresh();
        let data = self.send::<ResetTokenData>(request).await?.into_data()?;
        Ok(data.reset_token)
    }

    pub async fn reset_password(
        &self,
        reset_token: &str,
        passwords: &PasswordPair,
    ) -> Result<String, ClientError> {
        let request = ApiRequest::post(paths::RESET_PASSWORD)
            .json(&ResetPasswordRequest {
                reset_token,
                passwords,
            })?
            .without_refresh();
        Ok(self.send::<IgnoredAny>(request).await?.message)
    }

    async fn email_request(
        &self,
        path: &str,
        email: &str,
        otp: Option<&str>,
    ) -> Result<String, ClientError> {
        let request = ApiRequest::post(path)
            .json(&EmailRequest { email, otp })?
            .without_refresh();
        Ok(self.send::<IgnoredAny>(request).await?.message)
    }

    /// Log out. The local session is cleared even when the call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let request = ApiRequest::post(paths::LOGOUT).without_refresh();
        let result = self.send::<IgnoredAny>(request).await;
        self.session().clear();

        match result {
            Ok(_) => {
                info!("logged out");
                Ok(())
            }
            Err(error) => {
                warn!(%error, "logout call failed; local session cleared anyway");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let errors = Credentials::default().validate();
        assert_eq!(errors.get("email"), Some(validators::REQUIRED));
        assert_eq!(errors.get("password"), Some(validators::REQUIRED));

        let credentials = Credentials {
            email: "ops@ticketcore.dev".into(),
            password: "secret".into(),
        };
        assert!(credentials.is_valid());
    }

    #[test]
    fn test_password_pair_must_match() {
        let pair = PasswordPair {
            new_password: "hunter22".into(),
            confirm_password: "hunter23".into(),
        };
        assert_eq!(
            pair.validate().get("confirmPassword"),
            Some("passwords do not match")
        );
    }

    #[test]
    fn test_login_data_picks_pending_context() {
        let two_factor: LoginData = serde_json::from_str(
            r#"{"accessTokenExpiry":"2026-10-16T10:15:00Z","refreshTokenExpiry":"2026-10-23T10:00:00Z","tempToken":"tmp-1"}"#,
        )
        .unwrap();
        let session = two_factor.into_session();
        assert_eq!(session.pending, PendingContext::TwoFactor);
        assert_eq!(session.temp_token.as_deref(), Some("tmp-1"));

        let plain: LoginData = serde_json::from_str(
            r#"{"accessTokenExpiry":"2026-10-16T10:15:00Z","refreshTokenExpiry":"2026-10-23T10:00:00Z","tempToken":null}"#,
        )
        .unwrap();
        assert!(plain.into_session().is_fully_authenticated());
    }

    #[test]
    fn test_change_password_body_is_flat() {
        let passwords = PasswordPair {
            new_password: "a".into(),
            confirm_password: "a".into(),
        };
        let body = serde_json::to_value(ChangePasswordRequest {
            pwd_change_token: "pwd-1",
            passwords: &passwords,
        })
        .unwrap();
        assert_eq!(body["pwdChangeToken"], "pwd-1");
        assert_eq!(body["newPassword"], "a");
    }
}
