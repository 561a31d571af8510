//! FluffyTeams plugin composition root
//!
//! Wires configuration, the database, the identity and permissions services
//! and the teams domain into a plugin the host server drives through
//! [`FluffyTeams`].

use std::path::Path;
use std::sync::Arc;

use fluffyteams_common::{Config, Database};
use fluffyteams_host::{GameServer, Location, PlayerRef};
use fluffyteams_identity::{IdentityConfig, IdentityService, IdentityServiceFactory};
use fluffyteams_permissions::{PermissionsConfig, PermissionsService, PermissionsServiceFactory};
use fluffyteams_teams::{
    create_schema, Reply, RespawnEvent, Sender, Team, TeamController, TeamListeners,
    TeamsCommand, TeamsRepositories,
};

/// A running plugin instance
pub struct FluffyTeams {
    config: Config,
    db: Database,
    controller: Arc<TeamController>,
    command: TeamsCommand,
    listeners: TeamListeners,
}

impl FluffyTeams {
    /// Load configuration from the plugin data folder and enable the plugin.
    ///
    /// The folder is created if it does not exist yet.
    pub async fn load(server: Arc<dyn GameServer>, data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let config = Config::load(data_dir)?;
        tracing::info!(?config, "Configuration loaded");

        Self::enable(server, config).await
    }

    /// Enable the plugin with services chosen by environment configuration
    pub async fn enable(server: Arc<dyn GameServer>, config: Config) -> anyhow::Result<Self> {
        let identity = IdentityServiceFactory::create(IdentityConfig::from_env()?)?;
        let permissions =
            PermissionsServiceFactory::create(PermissionsConfig::from_env(), server.clone())?;

        Self::with_services(server, config, Arc::from(identity), Arc::from(permissions)).await
    }

    /// Enable the plugin with explicit identity and permissions services
    pub async fn with_services(
        server: Arc<dyn GameServer>,
        config: Config,
        identity: Arc<dyn IdentityService>,
        permissions: Arc<dyn PermissionsService>,
    ) -> anyhow::Result<Self> {
        let db = Database::connect(&config.connection_url()?, config.database_max_connections)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to database: {}", e);
                anyhow::anyhow!("Database connection failed: {}", e)
            })?;

        create_schema(&db).await?;

        let controller = Arc::new(TeamController::new(
            TeamsRepositories::new(db.pool().clone()),
            server,
            identity,
            permissions,
            config.server_name.clone(),
        ));
        let command = TeamsCommand::new(controller.clone());
        let listeners =
            TeamListeners::new(controller.clone(), config.override_bed_respawn_location);

        tracing::info!(server = %config.server_name, "FluffyTeams enabled");

        Ok(Self {
            config,
            db,
            controller,
            command,
            listeners,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn controller(&self) -> &Arc<TeamController> {
        &self.controller
    }

    /// Handle `/fluffyteams <args...>`
    pub async fn on_command(&self, sender: &Sender, args: &[String]) -> Reply {
        self.command.execute(sender, args).await
    }

    pub async fn on_tab_complete(&self, sender: &Sender, args: &[String]) -> Vec<String> {
        self.command.complete(sender, args).await
    }

    pub async fn on_player_login(&self, player: &PlayerRef) -> Option<Team> {
        self.listeners.on_player_login(player).await
    }

    pub async fn on_player_respawn(&self, event: &RespawnEvent) -> Option<Location> {
        self.listeners.on_player_respawn(event).await
    }

    /// Close the database pool
    pub async fn disable(self) {
        self.db.close().await;
        tracing::info!("FluffyTeams disabled");
    }
}
