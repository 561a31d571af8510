//! Repository implementations for the Teams domain

pub mod members;
pub mod schema;
pub mod spawns;
pub mod teams;
pub mod transactions;

use sqlx::{Any, AnyPool, Transaction};

pub use members::MemberRepository;
pub use schema::create_schema;
pub use spawns::SpawnRepository;
pub use teams::TeamRepository;
pub use transactions::{delete_members_for_team_tx, delete_spawns_for_team_tx, delete_team_tx};

/// Combined repository access for the Teams domain
#[derive(Clone)]
pub struct TeamsRepositories {
    pool: AnyPool,
    pub teams: TeamRepository,
    pub members: MemberRepository,
    pub spawns: SpawnRepository,
}

impl TeamsRepositories {
    pub fn new(pool: AnyPool) -> Self {
        Self {
            teams: TeamRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            spawns: SpawnRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Any>, sqlx::Error> {
        self.pool.begin().await
    }
}
