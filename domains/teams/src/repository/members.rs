//! Member repository

use crate::domain::entities::{Member, MemberRow};
use fluffyteams_common::{RepositoryError, Result};
use sqlx::AnyPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MemberRepository {
    pool: AnyPool,
}

impl MemberRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Find the membership of a player, if any
    pub async fn get_by_player(&self, player_uuid: Uuid) -> Result<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, team_id, player_uuid
            FROM fluffy_members
            WHERE player_uuid = $1
            "#,
        )
        .bind(player_uuid.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Member::try_from).transpose()?)
    }

    /// Members of a team in the order they joined
    pub async fn list_by_team(&self, team_id: i64) -> Result<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, team_id, player_uuid
            FROM fluffy_members
            WHERE team_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        let members = rows
            .into_iter()
            .map(Member::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(members)
    }

    /// Insert a membership. Callers check that the player has no team yet.
    pub async fn create(&self, member: &Member) -> std::result::Result<Member, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO fluffy_members (team_id, player_uuid)
            VALUES ($1, $2)
            RETURNING id, team_id, player_uuid
            "#,
        )
        .bind(member.team_id)
        .bind(member.player_uuid.to_string())
        .fetch_one(&self.pool)
        .await?;

        Member::try_from(row)
    }

    /// Delete a membership by id
    pub async fn delete(&self, member_id: i64) -> std::result::Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM fluffy_members WHERE id = $1")
            .bind(member_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
