//! Subcommand registrations for `/fluffyteams`

use super::handlers::{members, spawns, teams};
use super::SubCommand;

/// Team management subcommands
fn team_routes() -> Vec<Box<dyn SubCommand>> {
    vec![
        Box::new(teams::CreateCommand),
        Box::new(teams::DeleteCommand),
    ]
}

/// Membership subcommands
fn member_routes() -> Vec<Box<dyn SubCommand>> {
    vec![
        Box::new(members::AddCommand),
        Box::new(members::RemoveCommand),
        Box::new(teams::ListCommand),
    ]
}

/// Spawn subcommands
fn spawn_routes() -> Vec<Box<dyn SubCommand>> {
    vec![Box::new(spawns::SpawnCommand), Box::new(spawns::SetSpawnCommand)]
}

/// All subcommands in help order
pub fn routes() -> Vec<Box<dyn SubCommand>> {
    let mut routes = team_routes();
    routes.extend(member_routes());
    routes.extend(spawn_routes());
    routes
}
