//! Spawn repository

use crate::domain::entities::{Spawn, SpawnRow};
use crate::repository::teams::map_unique_violation;
use fluffyteams_common::{RepositoryError, Result};
use sqlx::AnyPool;

#[derive(Clone)]
pub struct SpawnRepository {
    pool: AnyPool,
}

impl SpawnRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Spawn of a team on the given server
    pub async fn get(&self, team_id: i64, server: &str) -> Result<Option<Spawn>> {
        let row = sqlx::query_as::<_, SpawnRow>(
            r#"
            SELECT id, team_id, server, world, x, y, z, yaw, pitch
            FROM fluffy_spawns
            WHERE team_id = $1 AND server = $2
            "#,
        )
        .bind(team_id)
        .bind(server)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Spawn::from))
    }

    /// Insert a spawn, returning it with its assigned id
    pub async fn create(&self, spawn: &Spawn) -> std::result::Result<Spawn, RepositoryError> {
        let row = sqlx::query_as::<_, SpawnRow>(
            r#"
            INSERT INTO fluffy_spawns (team_id, server, world, x, y, z, yaw, pitch)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, team_id, server, world, x, y, z, yaw, pitch
            "#,
        )
        .bind(spawn.team_id)
        .bind(&spawn.server)
        .bind(&spawn.world)
        .bind(spawn.x)
        .bind(spawn.y)
        .bind(spawn.z)
        .bind(f64::from(spawn.yaw))
        .bind(f64::from(spawn.pitch))
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(Spawn::from(row))
    }

    /// Move an existing spawn
    pub async fn update(&self, spawn: &Spawn) -> std::result::Result<Spawn, RepositoryError> {
        let row = sqlx::query_as::<_, SpawnRow>(
            r#"
            UPDATE fluffy_spawns
            SET world = $2, x = $3, y = $4, z = $5, yaw = $6, pitch = $7
            WHERE id = $1
            RETURNING id, team_id, server, world, x, y, z, yaw, pitch
            "#,
        )
        .bind(spawn.id)
        .bind(&spawn.world)
        .bind(spawn.x)
        .bind(spawn.y)
        .bind(spawn.z)
        .bind(f64::from(spawn.yaw))
        .bind(f64::from(spawn.pitch))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Spawn::from).ok_or(RepositoryError::NotFound)
    }
}
