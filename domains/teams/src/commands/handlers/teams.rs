//! Team management subcommands: create, delete, list

use fluffyteams_common::Result;

use super::team_names;
use crate::commands::{filter_prefix, notice, success, usage_line, Reply, Sender, SubCommand};
use crate::controller::TeamController;

/// `create <name> <display_name>`
///
/// Everything after the name is taken as the display name, so display names
/// may contain spaces.
pub struct CreateCommand;

#[async_trait::async_trait]
impl SubCommand for CreateCommand {
    fn name(&self) -> &'static str {
        "create"
    }

    fn usage(&self) -> &'static str {
        "<name> <display_name>"
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![("create <name> <display_name>", "Create a team")]
    }

    async fn execute(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Reply> {
        let [name, display_name @ ..] = args else {
            return Ok(vec![usage_line(self)]);
        };
        if display_name.is_empty() {
            return Ok(vec![usage_line(self)]);
        }

        controller.create(name, &display_name.join(" ")).await?;
        Ok(vec![success("Team created!")])
    }
}

/// `delete <name>`
pub struct DeleteCommand;

#[async_trait::async_trait]
impl SubCommand for DeleteCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn usage(&self) -> &'static str {
        "<name>"
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![("delete <name>", "Delete a team")]
    }

    async fn execute(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Reply> {
        let Some(name) = args.first() else {
            return Ok(vec![usage_line(self)]);
        };

        controller.delete(name).await?;
        Ok(vec![success("Team deleted!")])
    }

    async fn complete(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Vec<String>> {
        match args {
            [typed] => Ok(filter_prefix(team_names(controller, false).await?, typed)),
            _ => Ok(Vec::new()),
        }
    }
}

/// `list` and `list <team>`
pub struct ListCommand;

#[async_trait::async_trait]
impl SubCommand for ListCommand {
    fn name(&self) -> &'static str {
        "list"
    }

    fn usage(&self) -> &'static str {
        "[team]"
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("list", "List all teams"),
            ("list <team>", "List all members of a team"),
        ]
    }

    async fn execute(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Reply> {
        let Some(team_name) = args.first() else {
            let mut reply = vec![notice("Teams:")];
            reply.extend(controller.list().await?.into_iter().map(|team| {
                format!(
                    "\u{a7}f- {} \u{a7}r\u{a7}f({}\u{a7}r\u{a7}f)",
                    team.name, team.display_name
                )
            }));
            return Ok(reply);
        };

        let members = controller.list_members(team_name).await?;
        let mut reply = vec![notice(format!("Members of {}:", team_name))];
        reply.extend(members.into_iter().map(|player| {
            let status = if player.has_connected_before {
                ""
            } else {
                " \u{a7}7(never connected)"
            };
            format!("\u{a7}f- {}{}", player.username, status)
        }));
        Ok(reply)
    }

    async fn complete(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Vec<String>> {
        match args {
            [typed] => Ok(filter_prefix(team_names(controller, false).await?, typed)),
            _ => Ok(Vec::new()),
        }
    }
}
