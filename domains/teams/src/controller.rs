//! Team controller
//!
//! All team operations go through [`TeamController`]. It owns the business
//! rules (one team per player, reserved names, per-server spawns), keeps the
//! permissions plugin in step with membership changes and resolves players
//! that are not online through the identity service.
//!
//! Identity lookups and permission mirroring are best-effort: failures are
//! logged and the database stays authoritative.

use std::sync::Arc;

use fluffyteams_common::{Error, RepositoryError, Result};
use fluffyteams_host::{GameServer, Location, PlayerRef};
use fluffyteams_identity::IdentityService;
use fluffyteams_permissions::PermissionsService;
use uuid::Uuid;

use crate::domain::chat::strip_color_codes;
use crate::domain::entities::{Member, PlayerInfo, Spawn, Team, UNKNOWN_PLAYER, WILDCARD};
use crate::repository::{
    delete_members_for_team_tx, delete_spawns_for_team_tx, delete_team_tx, TeamsRepositories,
};

/// Result of adding a player who may not be online
#[derive(Debug, Clone, PartialEq)]
pub enum OfflineAddOutcome {
    /// Added; `has_connected_before` is false for players this server never saw
    Added {
        member: Member,
        has_connected_before: bool,
    },
    /// No account with that name exists
    UnknownAccount,
}

pub struct TeamController {
    repos: TeamsRepositories,
    server: Arc<dyn GameServer>,
    identity: Arc<dyn IdentityService>,
    permissions: Arc<dyn PermissionsService>,
    server_name: String,
}

impl TeamController {
    pub fn new(
        repos: TeamsRepositories,
        server: Arc<dyn GameServer>,
        identity: Arc<dyn IdentityService>,
        permissions: Arc<dyn PermissionsService>,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            server,
            identity,
            permissions,
            server_name: server_name.into(),
        }
    }

    pub fn server(&self) -> &Arc<dyn GameServer> {
        &self.server
    }

    pub fn permissions(&self) -> &Arc<dyn PermissionsService> {
        &self.permissions
    }

    /// Name of this server in the spawn table
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub async fn get_team(&self, name: &str) -> Result<Option<Team>> {
        self.repos.teams.get_by_name(name).await
    }

    async fn require_team(&self, name: &str) -> Result<Team> {
        self.get_team(name)
            .await?
            .ok_or_else(|| Error::invalid_argument(format!("Team {} not found", name)))
    }

    pub async fn get_member(&self, player_uuid: Uuid) -> Result<Option<Member>> {
        self.repos.members.get_by_player(player_uuid).await
    }

    /// Team the player belongs to, if any
    pub async fn get_member_team(&self, player_uuid: Uuid) -> Result<Option<Team>> {
        match self.get_member(player_uuid).await? {
            Some(member) => self.repos.teams.get_by_id(member.team_id).await,
            None => Ok(None),
        }
    }

    /// Spawn of a team on this server
    pub async fn get_spawn(&self, team_name: &str) -> Result<Option<Spawn>> {
        let team = self.require_team(team_name).await?;
        self.repos.spawns.get(team.id, &self.server_name).await
    }

    pub async fn get_spawn_location(&self, team_name: &str) -> Result<Option<Location>> {
        Ok(self.get_spawn(team_name).await?.map(|spawn| spawn.location()))
    }

    /// Create a team. `&` colour codes in the display name are translated.
    pub async fn create(&self, name: &str, display_name: &str) -> Result<Team> {
        let team = Team::new(name, display_name)?;

        if self.get_team(name).await?.is_some() {
            return Err(Error::invalid_argument(format!(
                "Team {} already exists",
                name
            )));
        }

        let created = self.repos.teams.create(&team).await.map_err(|e| match e {
            RepositoryError::AlreadyExists => {
                Error::invalid_argument(format!("Team {} already exists", name))
            }
            other => other.into(),
        })?;

        tracing::info!(
            team = %created.name,
            display_name = %strip_color_codes(&created.display_name),
            "Team created"
        );
        Ok(created)
    }

    /// Delete a team together with its members and spawns.
    ///
    /// Members leave the team's permission group once the deletion is
    /// committed, so a failed delete leaves the mirror untouched.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let team = self.require_team(name).await?;
        let members = self.repos.members.list_by_team(team.id).await?;

        let mut transaction = self.repos.begin().await?;
        let spawns = delete_spawns_for_team_tx(&mut transaction, team.id).await?;
        let removed = delete_members_for_team_tx(&mut transaction, team.id).await?;
        delete_team_tx(&mut transaction, team.id).await?;
        transaction.commit().await?;

        for member in &members {
            self.mirror_remove(member.player_uuid, &team.name).await;
        }

        tracing::info!(
            team = %team.name,
            members = removed,
            spawns = spawns,
            "Team deleted"
        );
        Ok(())
    }

    /// Add an online player to a team
    pub async fn add_member(&self, team_name: &str, player: &PlayerRef) -> Result<Member> {
        let team = self.require_team(team_name).await?;
        self.insert_member(&team, player.uuid, &player.name).await
    }

    /// Add a player by name whether or not they are online.
    ///
    /// Online players are used as-is; anyone else is resolved through the
    /// identity service.
    pub async fn add_offline_member(
        &self,
        team_name: &str,
        username: &str,
    ) -> Result<OfflineAddOutcome> {
        let team = self.require_team(team_name).await?;

        if let Some(player) = self.server.online_player(username) {
            let member = self.insert_member(&team, player.uuid, &player.name).await?;
            return Ok(OfflineAddOutcome::Added {
                member,
                has_connected_before: true,
            });
        }

        let Some(player_uuid) = self.resolve_uuid(username).await else {
            return Ok(OfflineAddOutcome::UnknownAccount);
        };

        let has_connected_before = self.server.offline_player(player_uuid).has_played_before;
        let member = self.insert_member(&team, player_uuid, username).await?;
        Ok(OfflineAddOutcome::Added {
            member,
            has_connected_before,
        })
    }

    async fn insert_member(
        &self,
        team: &Team,
        player_uuid: Uuid,
        player_name: &str,
    ) -> Result<Member> {
        if self.get_member(player_uuid).await?.is_some() {
            return Err(Error::invalid_argument(format!(
                "Player {} is already in a team",
                player_name
            )));
        }

        let member = self
            .repos
            .members
            .create(&Member::new(team.id, player_uuid))
            .await?;

        self.mirror_add(player_uuid, &team.name).await;
        tracing::info!(
            team = %team.name,
            player = %player_name,
            player_uuid = %player_uuid,
            "Member added"
        );
        Ok(member)
    }

    /// Remove an online player from their team, returning the team they left
    pub async fn remove_member(&self, player: &PlayerRef) -> Result<Team> {
        let not_in_team =
            || Error::invalid_argument(format!("Player {} not found in any team", player.name));

        let member = self.get_member(player.uuid).await?.ok_or_else(not_in_team)?;
        self.delete_member(&member, &player.name).await
    }

    /// Remove a player by name whether or not they are online.
    ///
    /// Returns `Ok(None)` when the name cannot be resolved or the player is
    /// not in a team.
    pub async fn remove_offline_member(&self, username: &str) -> Result<Option<Team>> {
        let player_uuid = match self.server.online_player(username) {
            Some(player) => Some(player.uuid),
            None => match self.resolve_uuid(username).await {
                Some(uuid) => Some(uuid),
                None => self
                    .server
                    .offline_player_by_name(username)
                    .filter(|player| player.has_played_before)
                    .map(|player| player.uuid),
            },
        };

        let Some(player_uuid) = player_uuid else {
            return Ok(None);
        };
        let Some(member) = self.get_member(player_uuid).await? else {
            return Ok(None);
        };

        self.delete_member(&member, username).await.map(Some)
    }

    async fn delete_member(&self, member: &Member, player_name: &str) -> Result<Team> {
        let team = self
            .repos
            .teams
            .get_by_id(member.team_id)
            .await?
            .ok_or_else(|| {
                Error::Internal(format!(
                    "Member {} references missing team {}",
                    member.id, member.team_id
                ))
            })?;

        self.repos.members.delete(member.id).await?;
        self.mirror_remove(member.player_uuid, &team.name).await;

        tracing::info!(
            team = %team.name,
            player = %player_name,
            player_uuid = %member.player_uuid,
            "Member removed"
        );
        Ok(team)
    }

    pub async fn list(&self) -> Result<Vec<Team>> {
        self.repos.teams.list().await
    }

    /// Members of a team with their best known username
    pub async fn list_members(&self, team_name: &str) -> Result<Vec<PlayerInfo>> {
        let team = self.require_team(team_name).await?;
        let members = self.repos.members.list_by_team(team.id).await?;

        let mut players = Vec::with_capacity(members.len());
        for member in members {
            let record = self.server.offline_player(member.player_uuid);
            let username = match record.name {
                Some(name) => name,
                None => self
                    .resolve_username(member.player_uuid)
                    .await
                    .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
            };

            players.push(PlayerInfo {
                uuid: member.player_uuid,
                username,
                has_connected_before: record.has_played_before,
                online: self.server.is_online(member.player_uuid),
            });
        }

        Ok(players)
    }

    /// Teleport the online members of a team (or of every team for `*`) to
    /// their spawn on this server. Returns the number of players moved.
    ///
    /// With `*`, teams without a spawn here are skipped.
    pub async fn spawn(&self, team_name: &str) -> Result<usize> {
        if team_name == WILDCARD {
            let mut teleported = 0;
            for team in self.list().await? {
                match self.repos.spawns.get(team.id, &self.server_name).await? {
                    Some(spawn) => teleported += self.teleport_team(&team, &spawn).await?,
                    None => {
                        tracing::warn!(
                            team = %team.name,
                            server = %self.server_name,
                            "No spawn set, skipping team"
                        )
                    }
                }
            }
            return Ok(teleported);
        }

        let team = self.require_team(team_name).await?;
        let spawn = self
            .repos
            .spawns
            .get(team.id, &self.server_name)
            .await?
            .ok_or_else(|| {
                Error::invalid_argument(format!("Team {} has no spawn on this server", team.name))
            })?;

        self.teleport_team(&team, &spawn).await
    }

    async fn teleport_team(&self, team: &Team, spawn: &Spawn) -> Result<usize> {
        let location = spawn.location();
        let mut teleported = 0;

        for member in self.repos.members.list_by_team(team.id).await? {
            if !self.server.is_online(member.player_uuid) {
                continue;
            }
            match self.server.teleport(member.player_uuid, &location) {
                Ok(()) => teleported += 1,
                Err(e) => tracing::warn!(
                    team = %team.name,
                    player_uuid = %member.player_uuid,
                    error = %e,
                    "Failed to teleport member to team spawn"
                ),
            }
        }

        tracing::info!(team = %team.name, location = %location, teleported, "Team sent to spawn");
        Ok(teleported)
    }

    /// Set the spawn of a team (or of every team for `*`) on this server.
    /// Returns the number of teams updated.
    pub async fn set_spawn(&self, team_name: &str, location: &Location) -> Result<usize> {
        if !self.server.world_exists(&location.world) {
            return Err(Error::invalid_argument(format!(
                "World {} not found",
                location.world
            )));
        }

        let teams = if team_name == WILDCARD {
            self.list().await?
        } else {
            vec![self.require_team(team_name).await?]
        };

        for team in &teams {
            self.save_spawn(team, location).await?;
        }
        Ok(teams.len())
    }

    async fn save_spawn(&self, team: &Team, location: &Location) -> Result<Spawn> {
        let saved = match self.repos.spawns.get(team.id, &self.server_name).await? {
            Some(mut spawn) => {
                spawn.move_to(location);
                self.repos.spawns.update(&spawn).await?
            }
            None => {
                self.repos
                    .spawns
                    .create(&Spawn::new(team.id, &self.server_name, location))
                    .await?
            }
        };

        tracing::info!(
            team = %team.name,
            server = %self.server_name,
            location = %location,
            "Spawn set"
        );
        Ok(saved)
    }

    async fn resolve_uuid(&self, username: &str) -> Option<Uuid> {
        match self.identity.uuid_for_username(username).await {
            Ok(uuid) => uuid,
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Identity lookup failed");
                None
            }
        }
    }

    async fn resolve_username(&self, player_uuid: Uuid) -> Option<String> {
        match self.identity.username_for_uuid(player_uuid).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(player_uuid = %player_uuid, error = %e, "Identity lookup failed");
                None
            }
        }
    }

    async fn mirror_add(&self, player_uuid: Uuid, team_name: &str) {
        if let Err(e) = self.permissions.add_parent(player_uuid, team_name).await {
            tracing::warn!(
                player_uuid = %player_uuid,
                team = %team_name,
                error = %e,
                "Failed to add permission group"
            );
        }
    }

    async fn mirror_remove(&self, player_uuid: Uuid, team_name: &str) {
        if let Err(e) = self.permissions.remove_parent(player_uuid, team_name).await {
            tracing::warn!(
                player_uuid = %player_uuid,
                team = %team_name,
                error = %e,
                "Failed to remove permission group"
            );
        }
    }
}
