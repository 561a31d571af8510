//! Player event listeners
//!
//! The host forwards log-ins and respawns here. Neither listener ever fails
//! the event: errors are logged and the player is left alone.

use std::sync::Arc;

use fluffyteams_host::{Location, PlayerRef};

use crate::controller::TeamController;
use crate::domain::entities::Team;

/// A player respawn as reported by the host
#[derive(Debug, Clone, PartialEq)]
pub struct RespawnEvent {
    pub player: PlayerRef,
    pub is_bed_spawn: bool,
    pub is_anchor_spawn: bool,
}

impl RespawnEvent {
    /// Respawn with no bed or respawn anchor involved
    pub fn world_spawn(player: PlayerRef) -> Self {
        Self {
            player,
            is_bed_spawn: false,
            is_anchor_spawn: false,
        }
    }
}

pub struct TeamListeners {
    controller: Arc<TeamController>,
    override_bed_respawn_location: bool,
}

impl TeamListeners {
    pub fn new(controller: Arc<TeamController>, override_bed_respawn_location: bool) -> Self {
        Self {
            controller,
            override_bed_respawn_location,
        }
    }

    /// Join a team named after the player's primary permission group.
    ///
    /// Returns the team the player was added to, if any.
    pub async fn on_player_login(&self, player: &PlayerRef) -> Option<Team> {
        let permissions = self.controller.permissions();
        if !permissions.is_active() {
            return None;
        }

        let group = permissions.primary_group(player.uuid).await?;

        let team = match self.controller.get_team(&group).await {
            Ok(Some(team)) => team,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(
                    player = %player.name,
                    group = %group,
                    error = %e,
                    "Failed to look up team for primary group"
                );
                return None;
            }
        };

        match self.controller.get_member(player.uuid).await {
            Ok(None) => {}
            Ok(Some(_)) => return None,
            Err(e) => {
                tracing::error!(player = %player.name, error = %e, "Failed to look up membership");
                return None;
            }
        }

        match self.controller.add_member(&team.name, player).await {
            Ok(_) => {
                tracing::info!(
                    player = %player.name,
                    team = %team.name,
                    "Added player to team on login"
                );
                Some(team)
            }
            Err(e) => {
                tracing::warn!(
                    player = %player.name,
                    team = %team.name,
                    error = %e,
                    "Failed to add player to team on login"
                );
                None
            }
        }
    }

    /// Respawn location for the player, `None` to keep the server's choice
    pub async fn on_player_respawn(&self, event: &RespawnEvent) -> Option<Location> {
        let uses_bed = event.is_bed_spawn || event.is_anchor_spawn;
        if uses_bed && !self.override_bed_respawn_location {
            return None;
        }

        let team = match self.controller.get_member_team(event.player.uuid).await {
            Ok(team) => team?,
            Err(e) => {
                tracing::error!(
                    player = %event.player.name,
                    error = %e,
                    "Failed to look up team on respawn"
                );
                return None;
            }
        };

        match self.controller.get_spawn_location(&team.name).await {
            Ok(location) => location,
            Err(e) => {
                tracing::error!(
                    player = %event.player.name,
                    team = %team.name,
                    error = %e,
                    "Failed to look up team spawn on respawn"
                );
                None
            }
        }
    }
}
