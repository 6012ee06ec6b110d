use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    traits::CatalogService,
    types::{book::BookRecord, key::BookKey},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(BookRecord),
    NotFound,
    Failed(String),
}

/// Loads and publishes the record behind one [`BookKey`].
pub struct DetailController<C> {
    catalog: Arc<C>,
    key:     BookKey,
    state:   Arc<watch::Sender<DetailState>>,
}

impl<C> Clone for DetailController<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            key:     self.key.clone(),
            state:   Arc::clone(&self.state),
        }
    }
}

impl<C: CatalogService> DetailController<C> {
    pub fn new(catalog: Arc<C>, key: BookKey) -> Self {
        let (state, _) = watch::channel(DetailState::Loading);
        Self {
            catalog,
            key,
            state: Arc::new(state),
        }
    }

    pub fn key(&self) -> &BookKey {
        &self.key
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    pub async fn load(&self) -> DetailState {
        self.state.send_replace(DetailState::Loading);
        let outcome = match self.catalog.lookup(self.key.as_str()).await {
            Ok(record) if record.is_not_found() => {
                debug!(key = %self.key, "no such book");
                DetailState::NotFound
            }
            Ok(record) => DetailState::Loaded(record),
            Err(e) => {
                warn!(key = %self.key, error = %e, "lookup failed");
                DetailState::Failed(e.to_string())
            }
        };
        self.state.send_replace(outcome.clone());
        outcome
    }

    pub fn spawn_load(&self) -> JoinHandle<DetailState> {
        let this = self.clone();
        tokio::spawn(async move { this.load().await })
    }
}
