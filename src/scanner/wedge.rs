use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, Lines};
use tracing::debug;

use super::{BarcodeSource, Scan};

/// Typed at the scan prompt to give up.
pub const CANCEL: &str = "/cancel";

/// A keyboard-wedge reader: it "types" each decoded code followed by Enter.
///
/// Borrows a line stream so the REPL can hand over its own stdin for the
/// duration of one scan. Works just as well with piped input.
pub struct WedgeScanner<'a, R> {
    lines: &'a mut Lines<R>,
}

impl<'a, R> WedgeScanner<'a, R> {
    pub fn new(lines: &'a mut Lines<R>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl<'a, R> BarcodeSource for WedgeScanner<'a, R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn acquire(&mut self) -> Result<Scan> {
        while let Some(line) = self.lines.next_line().await? {
            let code = line.trim();
            if code == CANCEL {
                return Ok(Scan::Cancelled);
            }
            if is_misread(code) {
                debug!(raw = ?line, "skipping misread");
                continue;
            }
            return Ok(Scan::Decoded(code.to_string()));
        }
        // EOF
        Ok(Scan::Cancelled)
    }
}

/// Blank reads and stray control bytes are noise, not codes.
fn is_misread(code: &str) -> bool {
    code.is_empty() || code.chars().any(char::is_control)
}
