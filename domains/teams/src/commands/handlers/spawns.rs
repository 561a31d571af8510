//! Spawn subcommands: spawn, setspawn

use fluffyteams_common::Result;
use fluffyteams_host::Location;

use super::team_names;
use crate::commands::{failure, filter_prefix, success, usage_line, Reply, Sender, SubCommand};
use crate::controller::TeamController;

/// `spawn <team|*>`
pub struct SpawnCommand;

#[async_trait::async_trait]
impl SubCommand for SpawnCommand {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn usage(&self) -> &'static str {
        "<team>"
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![(
            "spawn <team>",
            "Teleport team to their spawn (* for all teams)",
        )]
    }

    async fn execute(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Reply> {
        let Some(team_name) = args.first() else {
            return Ok(vec![usage_line(self)]);
        };

        controller.spawn(team_name).await?;
        Ok(vec![success("Team teleported to spawn!")])
    }

    async fn complete(
        &self,
        controller: &TeamController,
        _sender: &Sender,
        args: &[String],
    ) -> Result<Vec<String>> {
        match args {
            [typed] => Ok(filter_prefix(team_names(controller, true).await?, typed)),
            _ => Ok(Vec::new()),
        }
    }
}

/// `setspawn <team|*> [world x y z yaw pitch]`
///
/// Without coordinates the player's own position is used.
pub struct SetSpawnCommand;

/// Why explicit setspawn coordinates were refused
#[derive(Debug, PartialEq)]
enum LocationArgsError {
    UnknownWorld,
    BadNumber,
}

/// Parse `world x y z yaw pitch`
fn parse_location(
    controller: &TeamController,
    args: &[String],
) -> std::result::Result<Location, LocationArgsError> {
    let [world, x, y, z, yaw, pitch, ..] = args else {
        return Err(LocationArgsError::BadNumber);
    };

    if !controller.server().world_exists(world) {
        return Err(LocationArgsError::UnknownWorld);
    }

    // Coordinates and angles must be finite
    let number = |value: &String| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(LocationArgsError::BadNumber)
    };
    let angle = |value: &String| {
        value
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(LocationArgsError::BadNumber)
    };

    Ok(Location::new(
        world.clone(),
        number(x)?,
        number(y)?,
        number(z)?,
        angle(yaw)?,
        angle(pitch)?,
    ))
}

#[async_trait::async_trait]
impl SubCommand for SetSpawnCommand {
    fn name(&self) -> &'static str {
        "setspawn"
    }

    fn usage(&self) -> &'static str {
        "<team> [world] [x] [y] [z] [yaw] [pitch]"
    }

    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![(
            "setspawn <team> [world] [x] [y] [z] [yaw] [pitch]",
            "Set a team spawn for the current world (* for all teams)",
        )]
    }

    async fn execute(
        &self,
        controller: &TeamController,
        sender: &Sender,
        args: &[String],
    ) -> Result<Reply> {
        let Some((team_name, coordinates)) = args.split_first() else {
            return Ok(vec![usage_line(self)]);
        };

        let location = match coordinates.len() {
            0 => {
                let position = sender
                    .player()
                    .and_then(|player| controller.server().player_location(player.uuid));
                match position {
                    Some(location) => location,
                    None => {
                        return Ok(vec![failure(
                            "You must be a player to use this command without coordinates.",
                        )])
                    }
                }
            }
            1..=5 => return Ok(vec![failure("Invalid arguments.")]),
            _ => match parse_location(controller, coordinates) {
                Ok(location) => location,
                Err(LocationArgsError::UnknownWorld) => {
                    return Ok(vec![failure("World not found.")])
                }
                Err(LocationArgsError::BadNumber) => {
                    return Ok(vec![failure("Invalid coordinates format.")])
                }
            },
        };

        controller.set_spawn(team_name, &location).await?;
        Ok(vec![success("Spawn set!")])
    }

    async fn complete(
        &self,
        controller: &TeamController,
        sender: &Sender,
        args: &[String],
    ) -> Result<Vec<String>> {
        match args.len() {
            1 => Ok(filter_prefix(team_names(controller, true).await?, &args[0])),
            2 => Ok(filter_prefix(controller.server().worlds(), &args[1])),
            3..=7 => {
                let Some(location) = sender
                    .player()
                    .and_then(|player| controller.server().player_location(player.uuid))
                else {
                    return Ok(Vec::new());
                };
                let suggestion = match args.len() {
                    3 => location.block_x(),
                    4 => location.block_y(),
                    5 => location.block_z(),
                    6 => location.yaw as i64,
                    _ => location.pitch as i64,
                };
                Ok(vec![suggestion.to_string()])
            }
            _ => Ok(Vec::new()),
        }
    }
}

