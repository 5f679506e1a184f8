//! Runs lookups in the background, one at a time.
//!
//! Starting a lookup aborts the one in flight. Completions come back over a
//! channel tagged with their [`Ticket`]; [`Session::complete`] drops any that
//! arrive late.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::lookup::LookupClient;
use crate::product::{ProductQuery, SearchResultSet};
use crate::session::{Session, Ticket};

/// A finished lookup.
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub results: SearchResultSet,
}

pub struct Dispatcher {
    client: Arc<LookupClient>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    inflight: Option<JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(client: Arc<LookupClient>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            tx,
            rx,
            inflight: None,
        }
    }

    /// Begin `query` in `session` and run it in the background.
    pub fn start(&mut self, session: &mut Session, query: ProductQuery) -> Ticket {
        if let Some(handle) = self.inflight.take()
            && !handle.is_finished()
        {
            debug!("aborting superseded lookup");
            handle.abort();
        }

        let ticket = session.begin(&query);
        debug!(%query, ?ticket, "starting lookup");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.inflight = Some(tokio::spawn(async move {
            let results = client.lookup(&query).await;
            // Receiver gone means the app is shutting down.
            let _ = tx.send(Completion { ticket, results });
        }));
        ticket
    }

    /// Wait for the next finished lookup.
    pub async fn next(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    /// Wait for the next completion and apply it. Returns whether the
    /// session changed.
    pub async fn settle(&mut self, session: &mut Session) -> bool {
        match self.next().await {
            Some(Completion { ticket, results }) => {
                let applied = session.complete(ticket, results);
                if !applied {
                    debug!(?ticket, "dropped stale lookup result");
                }
                applied
            }
            None => false,
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}
