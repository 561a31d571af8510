//! FluffyTeams Identity Service
//!
//! Resolves player names and UUIDs for players who may never have joined
//! this server:
//! - Mojang profile API integration for production
//! - Mock identity service for testing and development
//! - Configurable endpoints and request timeout

pub mod mock;
pub mod mojang;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_PROFILES_URL: &str = "https://api.mojang.com";
pub const DEFAULT_SESSION_URL: &str = "https://sessionserver.mojang.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity configuration error: {0}")]
    Configuration(String),

    #[error("Identity request error: {0}")]
    Request(String),

    #[error("Identity response error: {0}")]
    Response(String),
}

/// Public profile of a player account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: Uuid,
    pub name: String,
}

/// Identity service configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Identity provider (mojang, mock)
    pub provider: String,
    /// Base URL of the username -> profile endpoint
    pub profiles_base_url: String,
    /// Base URL of the UUID -> profile endpoint
    pub session_base_url: String,
    /// Connect and read timeout for each lookup
    pub timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            provider: "mojang".to_string(),
            profiles_base_url: DEFAULT_PROFILES_URL.to_string(),
            session_base_url: DEFAULT_SESSION_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl IdentityConfig {
    /// Create identity config from environment variables
    pub fn from_env() -> Result<Self, IdentityError> {
        let provider = std::env::var("IDENTITY_PROVIDER").unwrap_or_else(|_| "mojang".to_string());

        let profiles_base_url = std::env::var("IDENTITY_PROFILES_URL")
            .unwrap_or_else(|_| DEFAULT_PROFILES_URL.to_string());
        let session_base_url = std::env::var("IDENTITY_SESSION_URL")
            .unwrap_or_else(|_| DEFAULT_SESSION_URL.to_string());

        let timeout_secs = match std::env::var("IDENTITY_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                IdentityError::Configuration(format!(
                    "IDENTITY_TIMEOUT_SECS has an invalid value '{}': {}",
                    raw, e
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        if timeout_secs == 0 {
            return Err(IdentityError::Configuration(
                "IDENTITY_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            provider,
            profiles_base_url,
            session_base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Identity lookup trait for different providers.
///
/// `Ok(None)` means the provider answered and the account does not exist;
/// `Err` means the provider could not be asked.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve the account UUID for a username
    async fn uuid_for_username(&self, username: &str) -> Result<Option<Uuid>, IdentityError>;

    /// Resolve the current username for an account UUID
    async fn username_for_uuid(&self, uuid: Uuid) -> Result<Option<String>, IdentityError>;
}

/// Factory for creating IdentityService implementations
pub struct IdentityServiceFactory;

impl IdentityServiceFactory {
    pub fn create(config: IdentityConfig) -> Result<Box<dyn IdentityService>, IdentityError> {
        match config.provider.as_str() {
            "mojang" => {
                tracing::info!("Creating Mojang identity service");
                Ok(Box::new(mojang::MojangClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock identity service");
                Ok(Box::new(mock::MockIdentityService::new()))
            }
            provider => Err(IdentityError::Configuration(format!(
                "Unknown identity provider: {}. Supported providers: mojang, mock",
                provider
            ))),
        }
    }
}
