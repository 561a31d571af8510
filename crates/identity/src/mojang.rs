//! Mojang Profile API Implementation
//!
//! Username lookups call `{profiles}/users/profiles/minecraft/{name}`, UUID
//! lookups call `{session}/session/minecraft/profile/{uuid}`. Both answer
//! 200 with a profile body, or 204/404 when the account does not exist.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::{IdentityConfig, IdentityError, IdentityService, PlayerProfile};

const MAX_USERNAME_LENGTH: usize = 16;

/// Profile body shared by both endpoints. `id` is 32 hex digits without
/// hyphens, which `Uuid` parses directly.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: Uuid,
    name: String,
}

/// Mojang identity service implementation
pub struct MojangClient {
    client: Client,
    profiles_base_url: String,
    session_base_url: String,
}

impl MojangClient {
    /// Create a new Mojang client; the timeout applies to connect and to the
    /// whole request
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdentityError::Configuration(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            profiles_base_url: config.profiles_base_url.trim_end_matches('/').to_string(),
            session_base_url: config.session_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_profile(&self, url: &str) -> Result<Option<PlayerProfile>, IdentityError> {
        tracing::debug!(url = %url, "Sending Mojang profile request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| IdentityError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(IdentityError::Response(
                "Mojang API rate limit exceeded".to_string(),
            ));
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(IdentityError::Response(format!(
                "Mojang API returned {}: {}",
                status, body
            )));
        }

        let profile: ProfileResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Response(format!("Failed to parse profile: {}", e)))?;

        Ok(Some(PlayerProfile {
            id: profile.id,
            name: profile.name,
        }))
    }
}

/// Whether a name could belong to a Minecraft account at all
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LENGTH
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait::async_trait]
impl IdentityService for MojangClient {
    async fn uuid_for_username(&self, username: &str) -> Result<Option<Uuid>, IdentityError> {
        if !is_valid_username(username) {
            tracing::debug!(username = %username, "Skipping lookup for impossible username");
            return Ok(None);
        }

        let url = format!(
            "{}/users/profiles/minecraft/{}",
            self.profiles_base_url, username
        );
        Ok(self.fetch_profile(&url).await?.map(|profile| profile.id))
    }

    async fn username_for_uuid(&self, uuid: Uuid) -> Result<Option<String>, IdentityError> {
        let url = format!(
            "{}/session/minecraft/profile/{}",
            self.session_base_url,
            uuid.simple()
        );
        Ok(self.fetch_profile(&url).await?.map(|profile| profile.name))
    }
}
