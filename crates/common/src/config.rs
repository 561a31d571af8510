//! Configuration management following 12-factor app principles
//!
//! Settings come from environment variables. Before reading them the plugin
//! loads `fluffyteams.env` from its data folder (and a `.env` in the working
//! directory), so server owners can keep the settings next to the database.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the settings file looked up in the plugin data folder
pub const CONFIG_FILE_NAME: &str = "fluffyteams.env";

/// Server name used when `SERVER_NAME` is not set
pub const DEFAULT_SERVER_NAME: &str = "default";

/// Tracing filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "fluffyteams=info";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (SQLite file by default)
    pub database_url: String,

    /// Optional credentials for remote databases
    pub database_username: Option<String>,
    pub database_password: Option<String>,

    pub database_max_connections: u32,

    /// Name of this server instance. Team spawns are stored per server name
    /// so a network of servers can share one database.
    pub server_name: String,

    /// Send players to their team spawn even when they have a bed or anchor
    pub override_bed_respawn_location: bool,

    /// Runtime configuration
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("database_username", &self.database_username)
            .field(
                "database_password",
                &self.database_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("database_max_connections", &self.database_max_connections)
            .field("server_name", &self.server_name)
            .field(
                "override_bed_respawn_location",
                &self.override_bed_respawn_location,
            )
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    /// Load configuration for a plugin whose data folder is `data_dir`
    pub fn load(data_dir: &Path) -> Result<Self> {
        dotenvy::from_path(data_dir.join(CONFIG_FILE_NAME)).ok();
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_env(data_dir)
    }

    /// Read configuration from environment variables only
    pub fn from_env(data_dir: &Path) -> Result<Self> {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| default_database_url(data_dir)),
            database_username: non_empty_var("DATABASE_USERNAME"),
            database_password: non_empty_var("DATABASE_PASSWORD"),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,

            server_name: non_empty_var("SERVER_NAME")
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            override_bed_respawn_location: parse_var("OVERRIDE_BED_RESPAWN_LOCATION", false)?,

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        };

        if config.database_max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(config)
    }

    /// Connection URL with the configured credentials applied.
    ///
    /// Credentials already present in `DATABASE_URL` win over the separate
    /// username/password settings.
    pub fn connection_url(&self) -> Result<String> {
        let Some(username) = &self.database_username else {
            return Ok(self.database_url.clone());
        };

        let mut url = url::Url::parse(&self.database_url)
            .with_context(|| format!("DATABASE_URL is not a valid URL: {}", self.database_url))?;

        if url.username().is_empty() {
            url.set_username(username)
                .map_err(|_| anyhow::anyhow!("DATABASE_URL cannot carry a username"))?;
            url.set_password(self.database_password.as_deref())
                .map_err(|_| anyhow::anyhow!("DATABASE_URL cannot carry a password"))?;
        }

        Ok(url.to_string())
    }
}

/// Default SQLite database inside the plugin data folder
pub fn default_database_url(data_dir: &Path) -> String {
    let path: PathBuf = data_dir.join("database.db");
    format!("sqlite://{}?mode=rwc", path.display())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", name, raw, e)),
        _ => Ok(default),
    }
}
