//! Mock Game Server Implementation
//!
//! In-memory host used by unit and integration tests. Records every
//! teleport and console command so tests can assert on side effects.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::{GameServer, HostError, Location, OfflinePlayer, PlayerRef};

#[derive(Debug, Default)]
struct ServerState {
    online: HashMap<Uuid, (PlayerRef, Location)>,
    known: HashMap<Uuid, OfflinePlayer>,
    worlds: Vec<String>,
    plugins: HashSet<String>,
    permissions: HashMap<Uuid, HashSet<String>>,
    primary_groups: HashMap<Uuid, String>,
    teleports: Vec<(Uuid, Location)>,
    console_commands: Vec<String>,
}

/// Mock game server for testing
#[derive(Debug, Clone, Default)]
pub struct MockGameServer {
    state: Arc<Mutex<ServerState>>,
}

impl MockGameServer {
    /// Create a server with a single `world`
    pub fn new() -> Self {
        let server = Self::default();
        server.add_world("world");
        server
    }

    pub fn add_world(&self, name: &str) {
        self.state.lock().unwrap().worlds.push(name.to_string());
    }

    pub fn enable_plugin(&self, name: &str) {
        self.state.lock().unwrap().plugins.insert(name.to_string());
    }

    /// Connect a new player standing at the origin of `world`
    pub fn join(&self, name: &str) -> PlayerRef {
        self.join_with_uuid(Uuid::new_v4(), name)
    }

    pub fn join_with_uuid(&self, uuid: Uuid, name: &str) -> PlayerRef {
        let player = PlayerRef::new(uuid, name);
        let mut state = self.state.lock().unwrap();
        state.online.insert(
            uuid,
            (player.clone(), Location::new("world", 0.0, 64.0, 0.0, 0.0, 0.0)),
        );
        state.known.insert(
            uuid,
            OfflinePlayer {
                uuid,
                name: Some(name.to_string()),
                has_played_before: true,
            },
        );
        player
    }

    /// Disconnect a player; the server keeps remembering them
    pub fn quit(&self, uuid: Uuid) {
        self.state.lock().unwrap().online.remove(&uuid);
    }

    pub fn move_player(&self, uuid: Uuid, location: Location) {
        if let Some(entry) = self.state.lock().unwrap().online.get_mut(&uuid) {
            entry.1 = location;
        }
    }

    pub fn grant_permission(&self, uuid: Uuid, node: &str) {
        self.state
            .lock()
            .unwrap()
            .permissions
            .entry(uuid)
            .or_default()
            .insert(node.to_string());
    }

    pub fn set_primary_group(&self, uuid: Uuid, group: &str) {
        self.state
            .lock()
            .unwrap()
            .primary_groups
            .insert(uuid, group.to_string());
    }

    /// Every teleport performed so far, in order
    pub fn teleports(&self) -> Vec<(Uuid, Location)> {
        self.state.lock().unwrap().teleports.clone()
    }

    /// Every console command dispatched so far, in order
    pub fn console_commands(&self) -> Vec<String> {
        self.state.lock().unwrap().console_commands.clone()
    }
}

impl GameServer for MockGameServer {
    fn online_player(&self, name: &str) -> Option<PlayerRef> {
        self.state
            .lock()
            .unwrap()
            .online
            .values()
            .map(|(player, _)| player)
            .find(|player| player.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn online_players(&self) -> Vec<PlayerRef> {
        let mut players: Vec<PlayerRef> = self
            .state
            .lock()
            .unwrap()
            .online
            .values()
            .map(|(player, _)| player.clone())
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    fn is_online(&self, uuid: Uuid) -> bool {
        self.state.lock().unwrap().online.contains_key(&uuid)
    }

    fn offline_player(&self, uuid: Uuid) -> OfflinePlayer {
        self.state
            .lock()
            .unwrap()
            .known
            .get(&uuid)
            .cloned()
            .unwrap_or_else(|| OfflinePlayer::unknown(uuid))
    }

    fn offline_player_by_name(&self, name: &str) -> Option<OfflinePlayer> {
        self.state
            .lock()
            .unwrap()
            .known
            .values()
            .find(|player| {
                player
                    .name
                    .as_deref()
                    .is_some_and(|known| known.eq_ignore_ascii_case(name))
            })
            .cloned()
    }

    fn player_location(&self, uuid: Uuid) -> Option<Location> {
        self.state
            .lock()
            .unwrap()
            .online
            .get(&uuid)
            .map(|(_, location)| location.clone())
    }

    fn worlds(&self) -> Vec<String> {
        self.state.lock().unwrap().worlds.clone()
    }

    fn teleport(&self, uuid: Uuid, location: &Location) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        if !state.worlds.contains(&location.world) {
            return Err(HostError::WorldNotLoaded(location.world.clone()));
        }
        let Some(entry) = state.online.get_mut(&uuid) else {
            return Err(HostError::PlayerOffline(uuid));
        };
        entry.1 = location.clone();
        state.teleports.push((uuid, location.clone()));
        Ok(())
    }

    fn dispatch_console_command(&self, command: &str) -> bool {
        tracing::info!(command = %command, "Mock server: console command");
        self.state
            .lock()
            .unwrap()
            .console_commands
            .push(command.to_string());
        true
    }

    fn is_plugin_enabled(&self, name: &str) -> bool {
        self.state.lock().unwrap().plugins.contains(name)
    }

    fn has_permission(&self, uuid: Uuid, node: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .permissions
            .get(&uuid)
            .is_some_and(|nodes| nodes.contains(node))
    }

    fn primary_group(&self, uuid: Uuid) -> Option<String> {
        self.state.lock().unwrap().primary_groups.get(&uuid).cloned()
    }
}
