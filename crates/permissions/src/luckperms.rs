//! LuckPerms Implementation
//!
//! Group changes are issued as `lp user <uuid> parent add|remove <group>`
//! console commands, so they work whether or not the player is online.
//! The plugin may be enabled after FluffyTeams, so every call re-checks it.

use std::sync::Arc;

use fluffyteams_host::GameServer;
use uuid::Uuid;

use crate::{PermissionsError, PermissionsService, LUCKPERMS_PLUGIN};

pub struct LuckPermsService {
    server: Arc<dyn GameServer>,
}

impl LuckPermsService {
    pub fn new(server: Arc<dyn GameServer>) -> Self {
        Self { server }
    }

    fn run(&self, command: String) -> Result<(), PermissionsError> {
        if !self.is_active() {
            return Ok(());
        }

        tracing::debug!(command = %command, "Dispatching LuckPerms command");
        if self.server.dispatch_console_command(&command) {
            Ok(())
        } else {
            Err(PermissionsError::Command(command))
        }
    }
}

/// Console command that adds or removes a parent group
pub fn parent_command(player: Uuid, action: &str, group: &str) -> String {
    format!("lp user {} parent {} {}", player, action, group)
}

#[async_trait::async_trait]
impl PermissionsService for LuckPermsService {
    fn is_active(&self) -> bool {
        self.server.is_plugin_enabled(LUCKPERMS_PLUGIN)
    }

    async fn add_parent(&self, player: Uuid, group: &str) -> Result<(), PermissionsError> {
        self.run(parent_command(player, "add", group))
    }

    async fn remove_parent(&self, player: Uuid, group: &str) -> Result<(), PermissionsError> {
        self.run(parent_command(player, "remove", group))
    }

    async fn primary_group(&self, player: Uuid) -> Option<String> {
        if !self.is_active() {
            return None;
        }
        self.server.primary_group(player)
    }
}
