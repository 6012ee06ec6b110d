use std::time::Instant;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use crate::{
    config::CatalogConfig,
    error::CatalogError,
    openlib_schema::search::SearchResponse,
    traits::CatalogService,
    types::{
        book::BookRecord,
        cover::{cover_url, CoverSize},
        result_set::ResultSet,
    },
};

const SEARCH_PATH: &str = "search.json";

/// HTTP client for the OpenLibrary catalog.
///
/// Build one at startup and share it; cloning is cheap and clones reuse the
/// same connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http:   reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(CatalogError::Client)?;
        Ok(Self::with_http_client(http, config))
    }

    /// Use an already configured [`reqwest::Client`].
    pub fn with_http_client(http: reqwest::Client, config: CatalogConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn cover_url(&self, record: &BookRecord, size: CoverSize) -> Option<String> {
        cover_url(&self.config.cover_base_url, record.cover_id.as_deref(), size)
    }

    fn search_url(&self) -> Result<Url, CatalogError> {
        let mut base = self.config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?.join(SEARCH_PATH)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "GET");
        let started = Instant::now();
        let network_error = |source| CatalogError::Network {
            url: url.to_string(),
            source,
        };
        let resp = self.http.get(url.clone()).send().await.map_err(network_error)?;
        let status = resp.status();
        debug!(%url, %status, elapsed_ms = started.elapsed().as_millis() as u64, "response");
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = resp.text().await.map_err(network_error)?;
        trace!(%url, %body, "response body");
        let de = &mut serde_json::Deserializer::from_str(&body);
        Ok(serde_path_to_error::deserialize(de)?)
    }

    async fn fetch_records(&self, url: Url) -> Result<Vec<BookRecord>, CatalogError> {
        let resp: SearchResponse = self.get_json(url).await?;
        if let Some(num_found) = resp.num_found {
            debug!(num_found, "search matched");
        }
        Ok(resp.into_records())
    }
}

impl CatalogService for CatalogClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<ResultSet, CatalogError> {
        let mut url = self.search_url()?;
        // `query` already carries `&page=..&limit=..`, so it goes in verbatim.
        url.set_query(Some(&format!("q={query}")));
        let records = self.fetch_records(url).await?;
        debug!(count = records.len(), "decoded search results");
        Ok(ResultSet(records))
    }

    /// The catalog has no lookup-by-key on the search endpoint, so this
    /// searches for the key and prefers the record that actually carries it.
    #[instrument(skip(self))]
    async fn lookup(&self, key: &str) -> Result<BookRecord, CatalogError> {
        let mut url = self.search_url()?;
        url.query_pairs_mut().append_pair("q", key);
        let mut records = self.fetch_records(url).await?;
        let position = records
            .iter()
            .position(|x| x.key.as_deref() == Some(key))
            .unwrap_or(0);
        if position >= records.len() {
            debug!("no record for key");
            return Ok(BookRecord::not_found());
        }
        Ok(records.swap_remove(position))
    }
}
