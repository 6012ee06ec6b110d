use std::future::Future;

use crate::{
    error::CatalogError,
    types::{book::BookRecord, result_set::ResultSet},
};

/// The catalog operations controllers depend on.
///
/// [`crate::client::CatalogClient`] talks HTTP; tests swap in fakes that
/// decide when and with what each call completes.
pub trait CatalogService: Send + Sync + 'static {
    /// Run a search; `query` is the output of [`crate::query::build`].
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<ResultSet, CatalogError>> + Send;

    /// Fetch a single book by key, or [`BookRecord::not_found`] if the catalog
    /// has no match.
    fn lookup(&self, key: &str) -> impl Future<Output = Result<BookRecord, CatalogError>> + Send;
}
