//! The `/fluffyteams` command
//!
//! Contains the sender model, the subcommand trait, the dispatcher that
//! checks permissions and routes arguments, and reply formatting.

pub mod handlers;
pub mod routes;

use std::sync::Arc;

use fluffyteams_common::Result;
use fluffyteams_host::PlayerRef;

use crate::controller::TeamController;

pub use routes::routes;

pub const COMMAND_NAME: &str = "fluffyteams";

/// Permission node required for every subcommand
pub const ADMIN_PERMISSION: &str = "fluffyteams.admin";

pub const NO_PERMISSION_MESSAGE: &str = "\u{a7}cYou don't have permission to use this command.";

/// Chat lines sent back to the command sender
pub type Reply = Vec<String>;

/// Who issued a command
#[derive(Debug, Clone, PartialEq)]
pub enum Sender {
    Console,
    Player(PlayerRef),
}

impl Sender {
    pub fn player(&self) -> Option<&PlayerRef> {
        match self {
            Sender::Console => None,
            Sender::Player(player) => Some(player),
        }
    }

    /// The console holds every permission
    pub fn has_permission(&self, controller: &TeamController, node: &str) -> bool {
        match self {
            Sender::Console => true,
            Sender::Player(player) => controller.server().has_permission(player.uuid, node),
        }
    }
}

/// A `/fluffyteams` subcommand.
///
/// `args` never include the subcommand name itself.
#[async_trait::async_trait]
pub trait SubCommand: Send + Sync {
    fn name(&self) -> &'static str;

    /// Argument synopsis, e.g. `<team> <player>`
    fn usage(&self) -> &'static str;

    /// Help lines as `(synopsis, description)` pairs
    fn help(&self) -> Vec<(&'static str, &'static str)>;

    async fn execute(
        &self,
        controller: &TeamController,
        sender: &Sender,
        args: &[String],
    ) -> Result<Reply>;

    async fn complete(
        &self,
        _controller: &TeamController,
        _sender: &Sender,
        _args: &[String],
    ) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

pub fn success(message: impl AsRef<str>) -> String {
    format!("\u{a7}a{}", message.as_ref())
}

pub fn failure(message: impl AsRef<str>) -> String {
    format!("\u{a7}c{}", message.as_ref())
}

pub fn notice(message: impl AsRef<str>) -> String {
    format!("\u{a7}e{}", message.as_ref())
}

pub fn error_line(message: impl AsRef<str>) -> String {
    format!("\u{a7}4Error: {}", message.as_ref())
}

/// Usage reply for a subcommand
pub fn usage_line(command: &dyn SubCommand) -> String {
    failure(format!(
        "Usage: /{} {} {}",
        COMMAND_NAME,
        command.name(),
        command.usage()
    ))
}

/// Keep the candidates starting with `typed`
pub fn filter_prefix<I>(candidates: I, typed: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .filter(|candidate| candidate.starts_with(typed))
        .collect()
}

/// Dispatcher for `/fluffyteams`
pub struct TeamsCommand {
    controller: Arc<TeamController>,
    subcommands: Vec<Box<dyn SubCommand>>,
}

impl TeamsCommand {
    pub fn new(controller: Arc<TeamController>) -> Self {
        Self {
            controller,
            subcommands: routes(),
        }
    }

    fn find(&self, name: &str) -> Option<&dyn SubCommand> {
        self.subcommands
            .iter()
            .find(|command| command.name() == name)
            .map(|command| command.as_ref())
    }

    /// Run a command and return the lines to send back.
    ///
    /// No arguments, `help` and unknown subcommands all print the help.
    pub async fn execute(&self, sender: &Sender, args: &[String]) -> Reply {
        if !sender.has_permission(&self.controller, ADMIN_PERMISSION) {
            return vec![NO_PERMISSION_MESSAGE.to_string()];
        }

        let Some((name, rest)) = args.split_first() else {
            return self.help();
        };

        let Some(command) = self.find(&name.to_lowercase()) else {
            return self.help();
        };

        match command.execute(&self.controller, sender, rest).await {
            Ok(reply) => reply,
            Err(e) => {
                if e.is_user_facing() {
                    tracing::warn!(command = command.name(), error = %e, "Command rejected");
                }
                vec![error_line(e.sender_message())]
            }
        }
    }

    /// Completions for the argument currently being typed (the last one)
    pub async fn complete(&self, sender: &Sender, args: &[String]) -> Vec<String> {
        if !sender.has_permission(&self.controller, ADMIN_PERMISSION) {
            return Vec::new();
        }

        match args {
            [] => Vec::new(),
            [typed] => {
                let typed = typed.to_lowercase();
                let names = std::iter::once("help")
                    .chain(self.subcommands.iter().map(|command| command.name()))
                    .map(str::to_string);
                filter_prefix(names, &typed)
            }
            [name, rest @ ..] => {
                let Some(command) = self.find(&name.to_lowercase()) else {
                    return Vec::new();
                };
                match command.complete(&self.controller, sender, rest).await {
                    Ok(completions) => completions,
                    Err(e) => {
                        tracing::warn!(
                            command = command.name(),
                            error = %e,
                            "Tab completion failed"
                        );
                        Vec::new()
                    }
                }
            }
        }
    }

    pub fn help(&self) -> Reply {
        std::iter::once(("help", "Show this help message"))
            .chain(self.subcommands.iter().flat_map(|command| command.help()))
            .map(|(synopsis, description)| {
                format!(
                    "\u{a7}e/{} {} \u{a7}7- \u{a7}f{}",
                    COMMAND_NAME, synopsis, description
                )
            })
            .collect()
    }
}
