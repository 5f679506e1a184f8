use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::render::render_session;
use crate::session::Session;

pub struct ResultsCommand;

#[async_trait]
impl Command for ResultsCommand {
    fn name(&self) -> &str {
        "/results"
    }

    fn aliases(&self) -> &[&str] {
        &["/r"]
    }

    fn description(&self) -> &str {
        "show the current results again"
    }

    async fn execute(&self, _args: &str, session: &Session) -> CommandResult {
        print!("{}", render_session(session));
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::two_results;

    #[tokio::test]
    async fn returns_handled() {
        assert_eq!(
            ResultsCommand.execute("", &two_results()).await,
            CommandResult::Handled
        );
        assert_eq!(
            ResultsCommand.execute("", &Session::new()).await,
            CommandResult::Handled
        );
    }
}
