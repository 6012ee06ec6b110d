use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{book::BookRecord, result_set::ResultSet};
use crate::error::NavigationError;

/// Catalog key of a book the user selected, e.g. `/works/OL12345W`.
///
/// Only constructible through validation, so a detail view never sees an
/// absent or blank key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookKey(String);

impl BookKey {
    pub fn parse(key: &str) -> Result<Self, NavigationError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(NavigationError::MissingKey);
        }
        Ok(Self(key.to_string()))
    }

    /// Pick the 1-based `position`th entry of `results`.
    pub fn select(results: &ResultSet, position: usize) -> Result<Self, NavigationError> {
        let record = position
            .checked_sub(1)
            .and_then(|index| results.get(index))
            .ok_or(NavigationError::IndexOutOfRange {
                index: position,
                len:   results.len(),
            })?;
        Self::try_from(record)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&BookRecord> for BookKey {
    type Error = NavigationError;

    fn try_from(record: &BookRecord) -> Result<Self, Self::Error> {
        match &record.key {
            Some(key) => Self::parse(key),
            None => Err(NavigationError::MissingKey),
        }
    }
}

impl TryFrom<String> for BookKey {
    type Error = NavigationError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        Self::parse(&key)
    }
}

impl From<BookKey> for String {
    fn from(key: BookKey) -> Self {
        key.0
    }
}

impl Display for BookKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
