//! Membership subcommands: add, remove
//!
//! Both accept any player name. Online players are handled directly; other
//! names are resolved through the identity service.

use fluffyteams_common::Result;

use super::{online_player_names, team_names};
use crate::commands::{
    failure, filter_prefix, notice, success, usage_line, Reply, Sender, SubCommand,
};
use crate::controller::{OfflineAddOutcome, TeamController};

/// `add <team> <player>`
pub struct AddCommand;

#[async_trait::async_trait]
impl SubCommand for AddCommand {
    fn name(&self) -> &'static str {
        "add"
    }

    fn usage(&self) -> &'static str {
        "<team> <player>"
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![(
            "add <team> <player>",
            "Add a player to a team (works with offline players)",
        )]
    }

    async fn execute(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Reply> {
        let [team_name, player_name, ..] = args else {
            return Ok(vec![usage_line(self)]);
        };

        if let Some(player) = controller.server().online_player(player_name) {
            controller.add_member(team_name, &player).await?;
            return Ok(vec![success(format!(
                "Player {} added to team {}!",
                player.name, team_name
            ))]);
        }

        match controller.add_offline_member(team_name, player_name).await? {
            OfflineAddOutcome::Added {
                has_connected_before,
                ..
            } => {
                let mut reply = vec![success(format!(
                    "Player {} added to team {}!",
                    player_name, team_name
                ))];
                if !has_connected_before {
                    reply.push(notice(
                        "(Mojang-validated player who has never connected to this server)",
                    ));
                }
                Ok(reply)
            }
            OfflineAddOutcome::UnknownAccount => Ok(vec![
                failure(format!(
                    "Couldn't find a valid Minecraft account with name: {}",
                    player_name
                )),
                failure("The player name must be a valid Minecraft account registered with Mojang."),
            ]),
        }
    }

    async fn complete(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Vec<String>> {
        match args {
            [typed] => Ok(filter_prefix(team_names(controller, false).await?, typed)),
            [_, typed] => Ok(filter_prefix(online_player_names(controller), typed)),
            _ => Ok(Vec::new()),
        }
    }
}

/// `remove <player>`
pub struct RemoveCommand;

#[async_trait::async_trait]
impl SubCommand for RemoveCommand {
    fn name(&self) -> &'static str {
        "remove"
    }

    fn usage(&self) -> &'static str {
        "<player>"
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![(
            "remove <player>",
            "Remove a player from their team (works with offline players)",
        )]
    }

    async fn execute(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Reply> {
        let Some(player_name) = args.first() else {
            return Ok(vec![usage_line(self)]);
        };

        if let Some(player) = controller.server().online_player(player_name) {
            controller.remove_member(&player).await?;
            return Ok(vec![success(format!(
                "Player {} removed from team!",
                player.name
            ))]);
        }

        match controller.remove_offline_member(player_name).await? {
            Some(_) => Ok(vec![
                success(format!("Player {} removed from team!", player_name)),
                notice("(Player is currently offline)"),
            ]),
            None => Ok(vec![
                failure(format!(
                    "Couldn't find a valid player with name: {}",
                    player_name
                )),
                failure("Make sure the player exists and is in a team."),
            ]),
        }
    }

    async fn complete(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Vec<String>> {
        match args {
            [typed] => Ok(filter_prefix(online_player_names(controller), typed)),
            _ => Ok(Vec::new()),
        }
    }
}
