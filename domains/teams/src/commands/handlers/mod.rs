//! Subcommand handlers

pub mod members;
pub mod spawns;
pub mod teams;

use fluffyteams_common::Result;

use crate::controller::TeamController;

/// Names of all teams, optionally followed by the `*` wildcard
pub(crate) async fn team_names(
    controller: &TeamController,
    with_wildcard: bool,
) -> Result<Vec<String>> {
    let mut names: Vec<String> = controller
        .list()
        .await?
        .into_iter()
        .map(|team| team.name)
        .collect();
    if with_wildcard {
        names.push(crate::domain::entities::WILDCARD.to_string());
    }
    Ok(names)
}

/// Names of the players currently online
pub(crate) fn online_player_names(controller: &TeamController) -> Vec<String> {
    controller
        .server()
        .online_players()
        .into_iter()
        .map(|player| player.name)
        .collect()
}
