use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {url} failed: {source}")]
    Network {
        url:    String,
        #[source]
        source: reqwest::Error,
    },
    #[error("catalog answered {status} for {url}")]
    Status { url: String, status: StatusCode },
    #[error("couldn't decode catalog response: {0}")]
    Decode(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error("invalid catalog url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("couldn't build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl CatalogError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CatalogError::Network { source, .. } if source.is_timeout())
    }
}

/// Rejected attempts to open a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("selected book has no catalog key")]
    MissingKey,
    #[error("no result number {index}, the current list has {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}
