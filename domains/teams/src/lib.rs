//! Teams domain: teams, members, spawns, the `/fluffyteams` command and the
//! player event listeners

pub mod commands;
pub mod controller;
pub mod domain;
pub mod listeners;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

// Re-export repository types
pub use repository::{
    create_schema, delete_members_for_team_tx, delete_spawns_for_team_tx, delete_team_tx,
    MemberRepository, SpawnRepository, TeamRepository, TeamsRepositories,
};

pub use commands::{Reply, Sender, TeamsCommand};
pub use controller::{OfflineAddOutcome, TeamController};
pub use listeners::{RespawnEvent, TeamListeners};
