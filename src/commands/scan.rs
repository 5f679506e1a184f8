use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::session::Session;

pub struct ScanCommand;

#[async_trait]
impl Command for ScanCommand {
    fn name(&self) -> &str {
        "/scan"
    }

    fn aliases(&self) -> &[&str] {
        &["/s"]
    }

    fn description(&self) -> &str {
        "scan a barcode (type /cancel to stop)"
    }

    async fn execute(&self, _args: &str, _session: &Session) -> CommandResult {
        CommandResult::Scan
    }
}
