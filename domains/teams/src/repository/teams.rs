//! Team repository

use crate::domain::entities::Team;
use fluffyteams_common::{RepositoryError, Result};
use sqlx::AnyPool;

#[derive(Clone)]
pub struct TeamRepository {
    pool: AnyPool,
}

impl TeamRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Find team by its unique name
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, display_name
            FROM fluffy_teams
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// Find team by ID
    pub async fn get_by_id(&self, team_id: i64) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, display_name
            FROM fluffy_teams
            WHERE id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// All teams ordered by name
    pub async fn list(&self) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, display_name
            FROM fluffy_teams
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    /// Insert a team, returning it with its assigned id
    pub async fn create(&self, team: &Team) -> std::result::Result<Team, RepositoryError> {
        let created = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO fluffy_teams (name, display_name)
            VALUES ($1, $2)
            RETURNING id, name, display_name
            "#,
        )
        .bind(&team.name)
        .bind(&team.display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(created)
    }
}

/// Turn a unique-constraint failure into `AlreadyExists`
pub(crate) fn map_unique_violation(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            RepositoryError::AlreadyExists
        }
        other => RepositoryError::Connection(other),
    }
}
