//! Per-query resolution state machine.
//!
//! ```text
//! Static ──begin/restart──▶ Fetching ──commit──▶ Remote | StaticFallback | Error
//!    ▲                                                       │
//!    └──────────────────────── restart ──────────────────────┘
//! ```
//!
//! Every `restart` bumps a generation counter kept inside the watched state.
//! A commit carries the generation it was started under and is dropped when
//! the counter has moved on, so a slow response for a superseded key can
//! never overwrite the state of the current one.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Where the visible data came from, and whether a fetch is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Seeded from the static snapshot, no fetch started yet.
    Static,
    Fetching,
    /// Remote content was adopted.
    Remote,
    /// The remote store had nothing; the static data for the key is shown.
    StaticFallback,
    /// The fetch failed; the last good data stays.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: T,
    pub phase: Phase,
    pub error: Option<String>,
    /// Slug or category the state belongs to, for keyed queries.
    pub key: Option<String>,
    generation: u64,
}

impl<T> QueryState<T> {
    fn seed(data: T, key: Option<String>) -> Self {
        Self {
            data,
            phase: Phase::Static,
            error: None,
            key,
            generation: 0,
        }
    }

    /// True until the first fetch for the current key settles.
    pub fn loading(&self) -> bool {
        matches!(self.phase, Phase::Static | Phase::Fetching)
    }

    pub fn is_remote(&self) -> bool {
        self.phase == Phase::Remote
    }
}

/// How a fetch settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Remote(T),
    /// Nothing there (`null` or `[]`): show the static data for the current
    /// key, which may itself be empty or absent.
    Fallback(T),
    Failed(String),
}

/// Proof of which generation a fetch was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Observable state of one query.
pub struct Query<T> {
    tx: Arc<watch::Sender<QueryState<T>>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> Query<T> {
    pub fn new(data: T) -> Self {
        Self::keyed(data, None)
    }

    pub fn keyed(data: T, key: Option<String>) -> Self {
        let (tx, _rx) = watch::channel(QueryState::seed(data, key));
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState<T> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.tx.subscribe()
    }

    /// Start a fetch for the current key, keeping the visible data.
    pub fn begin(&self) -> Ticket {
        let mut ticket = Ticket(0);
        self.tx.send_modify(|state| {
            state.phase = Phase::Fetching;
            ticket = Ticket(state.generation);
        });
        ticket
    }

    /// Switch to a new key: reseed with its static data and supersede any
    /// fetch still in flight.
    pub fn restart(&self, data: T, key: Option<String>) -> Ticket {
        let mut ticket = Ticket(0);
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.data = data;
            state.phase = Phase::Fetching;
            state.error = None;
            state.key = key;
            ticket = Ticket(state.generation);
        });
        ticket
    }

    /// Apply a settled fetch. Returns false when the ticket is stale and the
    /// outcome was discarded.
    pub fn commit(&self, ticket: Ticket, outcome: Outcome<T>) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != ticket.0 {
                debug!(
                    ticket = ticket.0,
                    current = state.generation,
                    "discarding stale fetch result"
                );
                return false;
            }
            match outcome {
                Outcome::Remote(data) => {
                    state.data = data;
                    state.phase = Phase::Remote;
                    state.error = None;
                }
                Outcome::Fallback(data) => {
                    state.data = data;
                    state.phase = Phase::StaticFallback;
                    state.error = None;
                }
                Outcome::Failed(message) => {
                    state.phase = Phase::Error;
                    state.error = Some(message);
                }
            }
            true
        })
    }

    /// Wait until no fetch is outstanding and return that state. A query
    /// that was never started is returned as is.
    pub async fn settled(&self) -> QueryState<T> {
        let mut rx = self.tx.subscribe();
        match rx.wait_for(|state| state.phase != Phase::Fetching).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_state_is_loading() {
        let query = Query::new(vec![1, 2]);
        let state = query.state();
        assert_eq!(state.phase, Phase::Static);
        assert!(state.loading());
        assert_eq!(state.data, vec![1, 2]);
        assert!(state.error.is_none());
    }

    #[test]
    fn remote_replaces_data() {
        let query = Query::new(vec![1, 2]);
        let ticket = query.begin();
        assert!(query.commit(ticket, Outcome::Remote(vec![9])));
        let state = query.state();
        assert_eq!(state.data, vec![9]);
        assert_eq!(state.phase, Phase::Remote);
        assert!(!state.loading());
    }

    #[test]
    fn fallback_restores_static_after_remote() {
        let query = Query::new(vec![1, 2]);
        let ticket = query.begin();
        query.commit(ticket, Outcome::Remote(vec![9]));
        let ticket = query.begin();
        query.commit(ticket, Outcome::Fallback(vec![1, 2]));
        let state = query.state();
        assert_eq!(state.data, vec![1, 2]);
        assert_eq!(state.phase, Phase::StaticFallback);
    }

    #[tokio::test]
    async fn settled_returns_unstarted_query() {
        let query = Query::new(3);
        let state = query.settled().await;
        assert_eq!(state.phase, Phase::Static);
        assert_eq!(state.data, 3);
    }

    #[test]
    fn failure_keeps_last_good_data() {
        let query = Query::new(vec![1]);
        let ticket = query.begin();
        query.commit(ticket, Outcome::Remote(vec![7]));
        let ticket = query.begin();
        query.commit(ticket, Outcome::Failed("timeout".into()));
        let state = query.state();
        assert_eq!(state.data, vec![7]);
        assert_eq!(state.phase, Phase::Error);
        assert_eq!(state.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let query = Query::keyed(None, Some("a".to_string()));
        let stale = query.begin();
        let current = query.restart(None, Some("b".to_string()));

        assert!(query.commit(current, Outcome::Remote(Some("b"))));
        assert!(!query.commit(stale, Outcome::Remote(Some("a"))));

        let state = query.state();
        assert_eq!(state.data, Some("b"));
        assert_eq!(state.key.as_deref(), Some("b"));
    }

    #[test]
    fn restart_clears_error() {
        let query = Query::new(0);
        let ticket = query.begin();
        query.commit(ticket, Outcome::Failed("boom".into()));
        query.restart(1, None);
        let state = query.state();
        assert!(state.error.is_none());
        assert_eq!(state.phase, Phase::Fetching);
        assert_eq!(state.data, 1);
    }

    #[tokio::test]
    async fn subscribers_see_commit() {
        let query = Query::new(0);
        let mut rx = query.subscribe();
        let ticket = query.begin();
        rx.borrow_and_update();

        query.commit(ticket, Outcome::Remote(5));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().data, 5);
        assert_eq!(query.settled().await.phase, Phase::Remote);
    }
}
