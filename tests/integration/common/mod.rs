//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - A plugin instance over a fresh in-memory SQLite database
//! - The mock game server, identity service and permissions plugin behind it
//! - Command helpers for console and player senders

use std::sync::Arc;

use anyhow::Result;
use fluffyteams_app::FluffyTeams;
use fluffyteams_common::Config;
use fluffyteams_host::mock::MockGameServer;
use fluffyteams_host::{GameServer, PlayerRef};
use fluffyteams_identity::mock::MockIdentityService;
use fluffyteams_permissions::luckperms::LuckPermsService;
use fluffyteams_permissions::{PermissionsService, LUCKPERMS_PLUGIN};
use fluffyteams_teams::commands::ADMIN_PERMISSION;
use fluffyteams_teams::{Reply, Sender, TeamController};

pub const TEST_SERVER_NAME: &str = "test-server";

/// Configuration for an isolated in-memory database.
///
/// Each SQLite in-memory database belongs to one connection, so the pool
/// is capped at a single connection.
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        database_username: None,
        database_password: None,
        database_max_connections: 1,
        server_name: TEST_SERVER_NAME.to_string(),
        override_bed_respawn_location: false,
        rust_log: "fluffyteams=debug".to_string(),
    }
}

/// Split a command line into arguments
pub fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Test plugin with handles on every mock it talks to
#[allow(dead_code)]
pub struct TestApp {
    pub plugin: FluffyTeams,
    pub server: MockGameServer,
    pub identity: MockIdentityService,
}

#[allow(dead_code)]
impl TestApp {
    /// Plugin on a server with LuckPerms installed
    pub async fn new() -> Result<Self> {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: Config) -> Result<Self> {
        let server = MockGameServer::new();
        server.enable_plugin(LUCKPERMS_PLUGIN);
        let permissions: Arc<dyn PermissionsService> =
            Arc::new(LuckPermsService::new(Arc::new(server.clone())));
        Self::build(server, config, permissions).await
    }

    /// Plugin with a custom permissions service
    pub async fn with_permissions(permissions: Arc<dyn PermissionsService>) -> Result<Self> {
        Self::build(MockGameServer::new(), test_config(), permissions).await
    }

    async fn build(
        server: MockGameServer,
        config: Config,
        permissions: Arc<dyn PermissionsService>,
    ) -> Result<Self> {
        let identity = MockIdentityService::new();
        let host: Arc<dyn GameServer> = Arc::new(server.clone());
        let plugin =
            FluffyTeams::with_services(host, config, Arc::new(identity.clone()), permissions)
                .await?;

        Ok(Self {
            plugin,
            server,
            identity,
        })
    }

    pub fn controller(&self) -> &TeamController {
        self.plugin.controller()
    }

    /// Run `/fluffyteams <line>` from the console
    pub async fn console(&self, line: &str) -> Reply {
        self.plugin.on_command(&Sender::Console, &args(line)).await
    }

    /// Run `/fluffyteams <line>` as an online player
    pub async fn as_player(&self, player: &PlayerRef, line: &str) -> Reply {
        self.plugin
            .on_command(&Sender::Player(player.clone()), &args(line))
            .await
    }

    /// Connect a player holding the admin permission
    pub fn join_admin(&self, name: &str) -> PlayerRef {
        let player = self.server.join(name);
        self.server.grant_permission(player.uuid, ADMIN_PERMISSION);
        player
    }

    /// Create a team through the controller
    pub async fn create_team(&self, name: &str) -> Result<()> {
        self.controller().create(name, &format!("&a{}", name)).await?;
        Ok(())
    }
}

/// Assertion helpers for replies
#[allow(dead_code)]
pub mod assertions {
    use fluffyteams_teams::Reply;

    /// Assert the reply is exactly one line
    pub fn assert_single_line(reply: &Reply, expected: &str) {
        assert_eq!(reply, &vec![expected.to_string()], "unexpected reply");
    }

    /// Assert the reply is an error line containing `fragment`
    pub fn assert_error(reply: &Reply, fragment: &str) {
        assert_eq!(reply.len(), 1, "expected a single error line, got {:?}", reply);
        assert!(
            reply[0].starts_with("\u{a7}4Error: ") && reply[0].contains(fragment),
            "expected error containing {:?}, got {:?}",
            fragment,
            reply[0]
        );
    }
}
