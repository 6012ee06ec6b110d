use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{query, traits::CatalogService, types::result_set::ResultSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching { query: String },
    Results(ResultSet),
    /// The catalog answered, but with nothing.
    Empty,
    /// The request itself failed. Views show this like [`SearchState::Empty`]
    /// but may offer a retry.
    Failed(String),
}

impl SearchState {
    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            SearchState::Results(results) => Some(results),
            _ => None,
        }
    }
}

/// Runs searches and publishes [`SearchState`].
///
/// Every submission takes a ticket. Only the holder of the newest ticket may
/// publish its outcome, so a slow response to an older search never replaces
/// the results of a newer one.
pub struct SearchController<C> {
    catalog: Arc<C>,
    state:   Arc<watch::Sender<SearchState>>,
    latest:  Arc<AtomicU64>,
}

impl<C> Clone for SearchController<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            state:   Arc::clone(&self.state),
            latest:  Arc::clone(&self.latest),
        }
    }
}

impl<C: CatalogService> SearchController<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            catalog,
            state: Arc::new(state),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Search and wait for the outcome. Returns what this search produced,
    /// which is only published if no newer search started meanwhile.
    pub async fn search(&self, input: &str) -> SearchState {
        let (ticket, query) = self.begin(input);
        self.finish(ticket, &query).await
    }

    /// Enter [`SearchState::Searching`] right away and run the request in the
    /// background.
    pub fn submit(&self, input: &str) -> JoinHandle<SearchState> {
        let (ticket, query) = self.begin(input);
        let this = self.clone();
        tokio::spawn(async move { this.finish(ticket, &query).await })
    }

    fn begin(&self, input: &str) -> (u64, String) {
        let query = query::build(input);
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchState::Searching {
                query: query.clone(),
            };
        });
        debug!(ticket, %query, "search started");
        (ticket, query)
    }

    async fn finish(&self, ticket: u64, query: &str) -> SearchState {
        let outcome = match self.catalog.search(query).await {
            Ok(results) if results.is_empty() => SearchState::Empty,
            Ok(results) => SearchState::Results(results),
            Err(e) => {
                warn!(ticket, %query, error = %e, "search failed");
                SearchState::Failed(e.to_string())
            }
        };
        let published = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *state = outcome.clone();
            true
        });
        if !published {
            debug!(ticket, "dropping outcome of superseded search");
        }
        outcome
    }
}
