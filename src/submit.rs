//! The query submitter.
//!
//! Every issued query is tagged with a strictly increasing generation. When a
//! response arrives it is applied only if no newer query has been issued in
//! the meantime, so the panel always reflects the most recently *issued*
//! query rather than whichever response happened to complete last.
//!
//! Two paths share that rule:
//! - [`QuerySubmitter::submit`] awaits the fetch inline (one-shot mode)
//! - [`QuerySubmitter::spawn`] runs the fetch on a tokio task and reports a
//!   [`Completion`] over a channel (interactive mode)
//!
//! A failed fetch produces [`Outcome::Alert`] and leaves the panel exactly as
//! it was. There is no automatic retry.

use crate::api::NewsService;
use crate::error::NewsResult;
use crate::models::{Article, Query};
use crate::render::render;
use crate::view::ResultsView;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Generic user-facing message for any failed fetch.
pub const FETCH_ALERT: &str = "Failed to fetch news. Please try again.";

/// Identity of one issued query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket {
    pub generation: u64,
}

/// A finished fetch, tagged with the ticket it was issued under.
#[derive(Debug)]
pub struct Completion {
    pub ticket: QueryTicket,
    pub result: NewsResult<Vec<Article>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The panel now shows this many article blocks (zero means the placeholder).
    Rendered { count: usize },
    /// The fetch failed; the panel is unchanged and the user should be alerted.
    Alert(String),
    /// A newer query was issued before this one completed; nothing changed.
    Stale,
}

pub struct QuerySubmitter<S> {
    service: Arc<S>,
    issued: u64,
}

impl<S> QuerySubmitter<S>
where
    S: NewsService + Send + Sync + 'static,
{
    pub fn new(service: Arc<S>) -> Self {
        Self { service, issued: 0 }
    }

    /// Tag a new query. Any completion from an earlier ticket becomes stale.
    pub fn issue(&mut self) -> QueryTicket {
        self.issued += 1;
        QueryTicket {
            generation: self.issued,
        }
    }

    /// Issue `query`, wait for the service, and apply the result to `view`.
    ///
    /// # Arguments
    ///
    /// * `query` - The topic and source filter to post
    /// * `view` - The results panel the response is applied to
    ///
    /// # Returns
    ///
    /// The [`Outcome`] of applying the response. A failed fetch yields
    /// [`Outcome::Alert`] and leaves `view` untouched.
    #[instrument(level = "info", skip_all, fields(topic = %query.topic, sources = %query.sources))]
    pub async fn submit(&mut self, query: Query, view: &mut ResultsView) -> Outcome {
        let ticket = self.issue();
        let result = self.service.fetch_news(&query).await;
        self.apply(Completion { ticket, result }, view)
    }

    /// Issue `query` and fetch it in the background; the completion is sent on `tx`.
    pub fn spawn(&mut self, query: Query, tx: mpsc::Sender<Completion>) -> QueryTicket {
        let ticket = self.issue();
        let service = Arc::clone(&self.service);
        debug!(generation = ticket.generation, topic = %query.topic, "Spawning query");
        tokio::spawn(async move {
            let result = service.fetch_news(&query).await;
            if tx.send(Completion { ticket, result }).await.is_err() {
                debug!(generation = ticket.generation, "Session closed before completion");
            }
        });
        ticket
    }

    /// Apply a completion to `view` under the last-issued-wins rule.
    ///
    /// # Arguments
    ///
    /// * `completion` - A finished fetch and the ticket it was issued under
    /// * `view` - The results panel to update
    ///
    /// # Returns
    ///
    /// [`Outcome::Stale`] if a newer query has been issued since, otherwise
    /// the rendered count or the alert to show.
    pub fn apply(&self, completion: Completion, view: &mut ResultsView) -> Outcome {
        let Completion { ticket, result } = completion;
        if ticket.generation < self.issued {
            info!(
                generation = ticket.generation,
                latest = self.issued,
                ok = result.is_ok(),
                "Discarding stale response"
            );
            return Outcome::Stale;
        }

        match result {
            Ok(articles) => {
                let count = articles.len();
                view.show(render(&articles));
                info!(generation = ticket.generation, count, "Rendered results");
                Outcome::Rendered { count }
            }
            Err(e) => {
                warn!(
                    generation = ticket.generation,
                    error = %e,
                    "Fetch failed; keeping prior results"
                );
                Outcome::Alert(FETCH_ALERT.to_string())
            }
        }
    }
}
