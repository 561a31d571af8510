//! FluffyTeams Permissions Mirror
//!
//! Mirrors team membership into the server's permissions plugin so teams can
//! be used as permission groups:
//! - LuckPerms integration through console commands for production
//! - Disabled service when no mirror is wanted
//! - Mock service recording group changes for testing

pub mod luckperms;
pub mod mock;

use std::sync::Arc;

use fluffyteams_host::GameServer;
use thiserror::Error;
use uuid::Uuid;

/// Plugin name the host reports for LuckPerms
pub const LUCKPERMS_PLUGIN: &str = "LuckPerms";

#[derive(Error, Debug)]
pub enum PermissionsError {
    #[error("Permissions configuration error: {0}")]
    Configuration(String),

    #[error("Permissions command rejected: {0}")]
    Command(String),
}

/// Permissions mirror configuration
#[derive(Debug, Clone)]
pub struct PermissionsConfig {
    /// Permissions provider (luckperms, none)
    pub provider: String,
}

impl PermissionsConfig {
    /// Create permissions config from environment variables
    pub fn from_env() -> Self {
        let provider =
            std::env::var("PERMISSIONS_PROVIDER").unwrap_or_else(|_| "luckperms".to_string());

        Self { provider }
    }
}

/// Permissions mirror trait for different permission plugins
#[async_trait::async_trait]
pub trait PermissionsService: Send + Sync {
    /// Whether group changes currently reach a permissions plugin
    fn is_active(&self) -> bool;

    /// Make `group` a parent group of the player
    async fn add_parent(&self, player: Uuid, group: &str) -> Result<(), PermissionsError>;

    /// Drop `group` from the player's parent groups
    async fn remove_parent(&self, player: Uuid, group: &str) -> Result<(), PermissionsError>;

    /// The player's primary group, if a permissions plugin knows the player
    async fn primary_group(&self, player: Uuid) -> Option<String>;
}

/// Service used when mirroring is switched off
#[derive(Debug, Clone, Default)]
pub struct DisabledPermissionsService;

#[async_trait::async_trait]
impl PermissionsService for DisabledPermissionsService {
    fn is_active(&self) -> bool {
        false
    }

    async fn add_parent(&self, _player: Uuid, _group: &str) -> Result<(), PermissionsError> {
        Ok(())
    }

    async fn remove_parent(&self, _player: Uuid, _group: &str) -> Result<(), PermissionsError> {
        Ok(())
    }

    async fn primary_group(&self, _player: Uuid) -> Option<String> {
        None
    }
}

/// Factory for creating PermissionsService implementations
pub struct PermissionsServiceFactory;

impl PermissionsServiceFactory {
    pub fn create(
        config: PermissionsConfig,
        server: Arc<dyn GameServer>,
    ) -> Result<Box<dyn PermissionsService>, PermissionsError> {
        match config.provider.as_str() {
            "luckperms" => {
                tracing::info!("Creating LuckPerms permissions mirror");
                let service = luckperms::LuckPermsService::new(server);
                if !service.is_active() {
                    tracing::warn!(
                        "LuckPerms not found, group mirroring and log-in detection stay idle until it is enabled"
                    );
                }
                Ok(Box::new(service))
            }
            "none" => {
                tracing::info!("Permissions mirror disabled");
                Ok(Box::new(DisabledPermissionsService))
            }
            provider => Err(PermissionsError::Configuration(format!(
                "Unknown permissions provider: {}. Supported providers: luckperms, none",
                provider
            ))),
        }
    }
}
