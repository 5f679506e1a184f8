use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::session::Session;

/// Listed by the registry itself, which knows every command.
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "/help"
    }

    fn aliases(&self) -> &[&str] {
        &["/h", "/?"]
    }

    fn description(&self) -> &str {
        "show available commands"
    }

    async fn execute(&self, _args: &str, _session: &Session) -> CommandResult {
        CommandResult::Handled
    }
}
