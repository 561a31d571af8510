//! Table definitions for the Teams domain
//!
//! Tables are created on plugin enable if they are missing. The statements
//! are plain DDL so the same layout works on SQLite and PostgreSQL; only the
//! auto-increment key differs between backends.

use fluffyteams_common::{Database, DatabaseBackend};

pub const TEAMS_TABLE: &str = "fluffy_teams";
pub const MEMBERS_TABLE: &str = "fluffy_members";
pub const SPAWNS_TABLE: &str = "fluffy_spawns";

/// DDL statements in dependency order
pub fn schema_statements(backend: DatabaseBackend) -> Vec<String> {
    let primary_key = backend.primary_key_column();

    vec![
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {TEAMS_TABLE} (
                id {primary_key},
                name VARCHAR(32) NOT NULL UNIQUE,
                display_name VARCHAR(255) NOT NULL
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {MEMBERS_TABLE} (
                id {primary_key},
                team_id BIGINT NOT NULL REFERENCES {TEAMS_TABLE} (id),
                player_uuid VARCHAR(36) NOT NULL
            )
            "#
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{MEMBERS_TABLE}_player_uuid ON {MEMBERS_TABLE} (player_uuid)"
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {SPAWNS_TABLE} (
                id {primary_key},
                team_id BIGINT NOT NULL REFERENCES {TEAMS_TABLE} (id),
                server VARCHAR(64) NOT NULL,
                world VARCHAR(255) NOT NULL,
                x DOUBLE PRECISION NOT NULL,
                y DOUBLE PRECISION NOT NULL,
                z DOUBLE PRECISION NOT NULL,
                yaw DOUBLE PRECISION NOT NULL,
                pitch DOUBLE PRECISION NOT NULL
            )
            "#
        ),
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_{SPAWNS_TABLE}_team_server ON {SPAWNS_TABLE} (team_id, server)"
        ),
    ]
}

/// Create any missing tables and indexes
pub async fn create_schema(db: &Database) -> Result<(), sqlx::Error> {
    for statement in schema_statements(db.backend()) {
        sqlx::query(&statement).execute(db.pool()).await?;
    }

    tracing::info!(backend = %db.backend(), "Database schema ready");
    Ok(())
}
