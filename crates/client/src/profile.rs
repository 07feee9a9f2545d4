//! Signed-in user's profile endpoints

use crate::config::paths;
use crate::error::ClientError;
use crate::gateway::{ApiRequest, AuthGateway};
use ticketcore_core::{ProfileUpdate, UserProfile};

impl AuthGateway {
    /// Fetch the current user's profile
    pub async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        self.send(ApiRequest::get(paths::PROFILE))
            .await?
            .into_data()
    }

    /// Update the editable profile fields; returns the stored profile
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError> {
        let request = ApiRequest::put(paths::PROFILE).json(update)?;
        self.send(request).await?.into_data()
    }
}
