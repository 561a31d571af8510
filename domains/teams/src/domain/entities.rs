//! Domain entities for the Teams domain
//!
//! Rows are keyed by database-assigned integer ids. Entities built with
//! `new` carry id `0` until the repository hands back the inserted row.

use fluffyteams_common::{Error, RepositoryError, Result};
use fluffyteams_host::Location;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chat::translate_color_codes;
use super::validation::validate_team_name;

/// Team argument that addresses every team at once
pub const WILDCARD: &str = "*";

/// Name shown for members whose username cannot be resolved
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

pub const MAX_TEAM_NAME_LENGTH: usize = 32;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
    /// Display name with `&` colour codes already translated
    pub display_name: String,
}

impl Team {
    /// Create a new team with validation.
    ///
    /// `&` colour codes in the display name are translated to section-sign
    /// codes before they are stored.
    pub fn new(name: &str, display_name: &str) -> Result<Self> {
        let team = Team {
            id: 0,
            name: name.to_string(),
            display_name: translate_color_codes('&', display_name),
        };
        team.validate()?;
        Ok(team)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name == WILDCARD {
            return Err(Error::invalid_argument(
                "The team name * is reserved for all teams",
            ));
        }

        if !validate_team_name(&self.name) {
            return Err(Error::invalid_argument(format!(
                "Invalid team name: {}. Use 1-{} letters, digits, '_' or '-'",
                self.name, MAX_TEAM_NAME_LENGTH
            )));
        }

        let display_length = self.display_name.chars().count();
        if display_length == 0 || display_length > MAX_DISPLAY_NAME_LENGTH {
            return Err(Error::invalid_argument(format!(
                "Display name must be 1-{} characters",
                MAX_DISPLAY_NAME_LENGTH
            )));
        }

        Ok(())
    }
}

impl std::fmt::Display for Team {
    #[mutants::skip] // Only used in log output
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Membership of one player in one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub team_id: i64,
    pub player_uuid: Uuid,
}

impl Member {
    pub fn new(team_id: i64, player_uuid: Uuid) -> Self {
        Member {
            id: 0,
            team_id,
            player_uuid,
        }
    }
}

/// Stored shape of a member; the UUID is kept as text on every backend
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MemberRow {
    pub id: i64,
    pub team_id: i64,
    pub player_uuid: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = RepositoryError;

    fn try_from(row: MemberRow) -> std::result::Result<Self, Self::Error> {
        let player_uuid = Uuid::parse_str(&row.player_uuid).map_err(|e| {
            RepositoryError::InvalidData(format!(
                "Member {} has malformed player UUID '{}': {}",
                row.id, row.player_uuid, e
            ))
        })?;

        Ok(Member {
            id: row.id,
            team_id: row.team_id,
            player_uuid,
        })
    }
}

/// Spawn point of a team on one server of the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub id: i64,
    pub team_id: i64,
    pub server: String,
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Spawn {
    pub fn new(team_id: i64, server: &str, location: &Location) -> Self {
        let mut spawn = Spawn {
            id: 0,
            team_id,
            server: server.to_string(),
            world: String::new(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            yaw: 0.0,
            pitch: 0.0,
        };
        spawn.move_to(location);
        spawn
    }

    /// Overwrite the stored position, keeping id, team and server
    pub fn move_to(&mut self, location: &Location) {
        self.world = location.world.clone();
        self.x = location.x;
        self.y = location.y;
        self.z = location.z;
        self.yaw = location.yaw;
        self.pitch = location.pitch;
    }

    pub fn location(&self) -> Location {
        Location::new(
            self.world.clone(),
            self.x,
            self.y,
            self.z,
            self.yaw,
            self.pitch,
        )
    }
}

/// Stored shape of a spawn; angles are widened to double precision
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SpawnRow {
    pub id: i64,
    pub team_id: i64,
    pub server: String,
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
}

impl From<SpawnRow> for Spawn {
    fn from(row: SpawnRow) -> Self {
        Spawn {
            id: row.id,
            team_id: row.team_id,
            server: row.server,
            world: row.world,
            x: row.x,
            y: row.y,
            z: row.z,
            yaw: row.yaw as f32,
            pitch: row.pitch as f32,
        }
    }
}

/// A team member as shown by the member listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub uuid: Uuid,
    /// Resolved username, [`UNKNOWN_PLAYER`] when no source knows the player
    pub username: String,
    pub has_connected_before: bool,
    pub online: bool,
}
