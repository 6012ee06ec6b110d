use std::{fmt::Display, sync::Arc};

use anyhow::Result;
use bookfinder::{
    client::CatalogClient,
    config::Config,
    controller::{DetailController, SearchController, SearchState},
    display::{DisplayTerminal, UNTITLED},
    error::NavigationError,
    types::{book::BookRecord, key::BookKey},
};

/// Everything the commands of one CLI invocation or repl share.
pub struct Session {
    pub config: Config,
    catalog:    Arc<CatalogClient>,
    search:     SearchController<CatalogClient>,
}

struct PickOption {
    position: usize,
    label:    String,
}

impl Display for PickOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.position, self.label)
    }
}

impl Session {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = Arc::new(CatalogClient::new(config.catalog.clone())?);
        let search = SearchController::new(Arc::clone(&catalog));
        Ok(Self {
            config,
            catalog,
            search,
        })
    }

    /// Short summary of the current result list for the repl prompt.
    pub fn status(&self) -> String {
        match self.search.state() {
            SearchState::Results(results) => format!("{} results", results.len()),
            SearchState::Empty | SearchState::Failed(_) => "no results".into(),
            SearchState::Idle | SearchState::Searching { .. } => String::new(),
        }
    }

    pub async fn search(&self, input: &str) -> Result<()> {
        let view = self.search.subscribe();
        let pending = self.search.submit(input);
        eprintln!("{}", self.search.state().fmt_to_string(&self.config)?);
        pending.await?;
        let state = view.borrow().clone();
        println!("{}", state.fmt_to_string(&self.config)?);
        Ok(())
    }

    pub async fn show(&self, key: BookKey) -> Result<()> {
        let detail = DetailController::new(Arc::clone(&self.catalog), key);
        let state = detail.spawn_load().await?;
        println!("{}", state.fmt_to_string(&self.config)?);
        Ok(())
    }

    pub async fn open(&self, position: usize) -> Result<()> {
        let state = self.search.state();
        let results = state.results().ok_or(NavigationError::IndexOutOfRange {
            index: position,
            len:   0,
        })?;
        let key = BookKey::select(results, position)?;
        self.show(key).await
    }

    pub async fn pick(&self) -> Result<()> {
        let state = self.search.state();
        let records: &[BookRecord] = match state.results() {
            Some(results) => &results.0,
            None => anyhow::bail!("Nothing to pick from, search first"),
        };
        let options = records
            .iter()
            .enumerate()
            .map(|(index, record)| PickOption {
                position: index + 1,
                label:    record.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            })
            .collect::<Vec<PickOption>>();
        let choice = inquire::Select::new("Which book?", options).prompt_skippable()?;
        match choice {
            Some(choice) => self.open(choice.position).await,
            None => Ok(()),
        }
    }
}
