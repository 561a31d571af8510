// FluffyTeams - Operator Console
//
// Runs the `/fluffyteams` subcommands from a terminal against the configured
// database, without a game server. Usage: `console [data_dir]`.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fluffyteams_app::FluffyTeams;
use fluffyteams_common::config::DEFAULT_LOG_FILTER;
use fluffyteams_common::Config;
use fluffyteams_host::{GameServer, HostError, Location, OfflinePlayer, PlayerRef};
use fluffyteams_teams::domain::chat::strip_color_codes;
use fluffyteams_teams::Sender;
use uuid::Uuid;

const DEFAULT_DATA_DIR: &str = "plugins/FluffyTeams";

/// Host with no players online. Worlds come from `CONSOLE_WORLDS`
/// (comma separated, default `world`).
struct HeadlessServer {
    worlds: BTreeSet<String>,
}

impl HeadlessServer {
    fn from_env() -> Self {
        let worlds = std::env::var("CONSOLE_WORLDS")
            .unwrap_or_else(|_| "world".to_string())
            .split(',')
            .map(str::trim)
            .filter(|world| !world.is_empty())
            .map(str::to_string)
            .collect();
        Self { worlds }
    }
}

impl GameServer for HeadlessServer {
    fn online_player(&self, _name: &str) -> Option<PlayerRef> {
        None
    }

    fn online_players(&self) -> Vec<PlayerRef> {
        Vec::new()
    }

    fn is_online(&self, _uuid: Uuid) -> bool {
        false
    }

    fn offline_player(&self, uuid: Uuid) -> OfflinePlayer {
        OfflinePlayer::unknown(uuid)
    }

    fn offline_player_by_name(&self, _name: &str) -> Option<OfflinePlayer> {
        None
    }

    fn player_location(&self, _uuid: Uuid) -> Option<Location> {
        None
    }

    fn worlds(&self) -> Vec<String> {
        self.worlds.iter().cloned().collect()
    }

    fn teleport(&self, uuid: Uuid, _location: &Location) -> Result<(), HostError> {
        Err(HostError::PlayerOffline(uuid))
    }

    fn dispatch_console_command(&self, command: &str) -> bool {
        info!(command = %command, "Console command skipped, no server attached");
        false
    }

    fn is_plugin_enabled(&self, _name: &str) -> bool {
        false
    }

    fn has_permission(&self, _uuid: Uuid, _node: &str) -> bool {
        false
    }

    fn primary_group(&self, _uuid: Uuid) -> Option<String> {
        None
    }
}

/// Split an input line into command arguments, dropping a leading
/// `fluffyteams` or `/fluffyteams`
fn parse_line(line: &str) -> Vec<String> {
    let mut args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if matches!(args.first().map(String::as_str), Some("fluffyteams" | "/fluffyteams")) {
        args.remove(0);
    }
    args
}

/// Tracing filter from the configured `RUST_LOG`, falling back to the default
/// when the directive does not parse
fn log_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_new(&config.rust_log).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid RUST_LOG '{}': {}", config.rust_log, e);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    tokio::fs::create_dir_all(&data_dir).await?;
    let config = Config::load(&data_dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .with_writer(std::io::stderr)
        .init();

    info!(data_dir = %data_dir.display(), ?config, "Starting FluffyTeams console");

    let server: Arc<dyn GameServer> = Arc::new(HeadlessServer::from_env());
    let plugin = FluffyTeams::enable(server, config).await.map_err(|e| {
        error!("Failed to enable FluffyTeams: {}", e);
        e
    })?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let args = parse_line(&line);
                if matches!(args.first().map(String::as_str), Some("exit" | "quit")) {
                    break;
                }
                if line.trim().is_empty() {
                    continue;
                }
                for reply in plugin.on_command(&Sender::Console, &args).await {
                    println!("{}", strip_color_codes(&reply));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    plugin.disable().await;
    Ok(())
}
