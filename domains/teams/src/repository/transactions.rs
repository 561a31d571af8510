//! Transactional free functions for the Teams domain (Zero2Prod pattern)

use fluffyteams_common::RepositoryError;
use sqlx::{Any, Transaction};

/// Delete every spawn of a team within an existing transaction.
///
/// Returns the number of deleted spawns.
pub async fn delete_spawns_for_team_tx(
    transaction: &mut Transaction<'_, Any>,
    team_id: i64,
) -> std::result::Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM fluffy_spawns WHERE team_id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;
    Ok(result.rows_affected())
}

/// Delete every membership of a team within an existing transaction.
///
/// Returns the number of deleted memberships.
pub async fn delete_members_for_team_tx(
    transaction: &mut Transaction<'_, Any>,
    team_id: i64,
) -> std::result::Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM fluffy_members WHERE team_id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;
    Ok(result.rows_affected())
}

/// Delete a team row within an existing transaction.
///
/// Members and spawns must be gone first. Returns `RepositoryError::NotFound`
/// if no team has the given id.
pub async fn delete_team_tx(
    transaction: &mut Transaction<'_, Any>,
    team_id: i64,
) -> std::result::Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM fluffy_teams WHERE id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
