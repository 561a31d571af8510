//! Host game-server interface
//!
//! The plugin never talks to the game engine directly. Everything it needs
//! from the server it is loaded into (player lookup, worlds, teleports,
//! console commands, permission checks) goes through the [`GameServer`]
//! trait, which the embedding server implements.
//!
//! A recording in-memory implementation lives in [`mock`] behind the
//! `test-support` feature.

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("World {0} is not loaded")]
    WorldNotLoaded(String),

    #[error("Player {0} is not online")]
    PlayerOffline(Uuid),

    #[error("Host error: {0}")]
    Other(String),
}

/// An online player
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub uuid: Uuid,
    pub name: String,
}

impl PlayerRef {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
        }
    }
}

/// What the server remembers about a player that may not be online
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfflinePlayer {
    pub uuid: Uuid,
    /// Last known name, `None` if the player never joined this server
    pub name: Option<String>,
    pub has_played_before: bool,
}

impl OfflinePlayer {
    /// A player this server has never seen
    pub fn unknown(uuid: Uuid) -> Self {
        Self {
            uuid,
            name: None,
            has_played_before: false,
        }
    }
}

/// A position in a named world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw,
            pitch,
        }
    }

    pub fn block_x(&self) -> i64 {
        self.x.floor() as i64
    }

    pub fn block_y(&self) -> i64 {
        self.y.floor() as i64
    }

    pub fn block_z(&self) -> i64 {
        self.z.floor() as i64
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.2}, {:.2}, {:.2}, yaw {:.1}, pitch {:.1})",
            self.world, self.x, self.y, self.z, self.yaw, self.pitch
        )
    }
}

/// Services the embedding game server provides to the plugin.
///
/// Implementations are called from async tasks and must not block for long;
/// every method maps to an in-process lookup on a real server.
pub trait GameServer: Send + Sync {
    /// Find an online player by name, ignoring case
    fn online_player(&self, name: &str) -> Option<PlayerRef>;

    fn online_players(&self) -> Vec<PlayerRef>;

    fn is_online(&self, uuid: Uuid) -> bool;

    /// Server-side record for a UUID; unknown players yield
    /// [`OfflinePlayer::unknown`]
    fn offline_player(&self, uuid: Uuid) -> OfflinePlayer;

    /// Look up a player who has joined this server before by last known name
    fn offline_player_by_name(&self, name: &str) -> Option<OfflinePlayer>;

    fn player_location(&self, uuid: Uuid) -> Option<Location>;

    fn worlds(&self) -> Vec<String>;

    fn world_exists(&self, name: &str) -> bool {
        self.worlds().iter().any(|world| world == name)
    }

    fn teleport(&self, uuid: Uuid, location: &Location) -> Result<(), HostError>;

    /// Run a command as the server console. Returns whether a command
    /// handler accepted it.
    fn dispatch_console_command(&self, command: &str) -> bool;

    fn is_plugin_enabled(&self, name: &str) -> bool;

    fn has_permission(&self, uuid: Uuid, node: &str) -> bool;

    /// Primary group of a player according to the loaded permissions plugin,
    /// `None` when no permissions plugin is available
    fn primary_group(&self, uuid: Uuid) -> Option<String>;
}
