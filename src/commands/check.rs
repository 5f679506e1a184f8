use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::session::Session;

pub struct CheckCommand;

#[async_trait]
impl Command for CheckCommand {
    fn name(&self) -> &str {
        "/check"
    }

    fn aliases(&self) -> &[&str] {
        &["/c"]
    }

    fn usage(&self) -> &str {
        "<n>"
    }

    fn description(&self) -> &str {
        "check result n for gluten"
    }

    async fn execute(&self, args: &str, session: &Session) -> CommandResult {
        let count = session.results().len();
        if count == 0 {
            println!("  nothing to check. search or /scan first");
            return CommandResult::Handled;
        }

        match args.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => CommandResult::Check(n - 1),
            _ => {
                println!("  usage: /check <n> where n is 1..={count}");
                CommandResult::Handled
            }
        }
    }
}
