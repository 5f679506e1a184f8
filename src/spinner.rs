//! A "Searching..." indicator for one-shot lookups.

use std::io::Write;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Dot counts cycled after the label.
const MAX_DOTS: usize = 3;

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(250);

/// Renders `label`, `label.`, `label..`, `label...` and repeats.
fn frame(label: &str, tick: usize) -> String {
    format!("{label}{}", ".".repeat(tick % (MAX_DOTS + 1)))
}

/// A loading indicator that runs in a background task.
///
/// Writes to stderr so it never mixes with results on stdout.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

impl Spinner {
    /// Start animating `label` (e.g. `"Searching"`).
    pub fn start(label: &str) -> Self {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let label = label.to_string();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(INTERVAL);
            let mut tick = 0;
            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = cancel_rx.changed() => break,
                }
                // \x1b[2K clears the line, \r returns to its start
                eprint!("\x1b[2K\r{}", frame(&label, tick));
                let _ = std::io::stderr().flush();
                tick += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop and clear the line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cycle_dots() {
        assert_eq!(frame("Searching", 0), "Searching");
        assert_eq!(frame("Searching", 1), "Searching.");
        assert_eq!(frame("Searching", 3), "Searching...");
        assert_eq!(frame("Searching", 4), "Searching");
    }

    #[tokio::test]
    async fn spinner_starts_and_stops_without_panic() {
        let spinner = Spinner::start("Searching");
        tokio::time::sleep(Duration::from_millis(300)).await;
        spinner.stop().await;
    }

    #[tokio::test]
    async fn spinner_immediate_stop() {
        Spinner::start("quick").stop().await;
    }
}
