use serde::{Deserialize, Serialize};

/// Title carried by the record [`BookRecord::not_found`] returns.
pub const NOT_FOUND_TITLE: &str = "No book found";

/// A single catalog entry as decoded from a search response.
///
/// Every field is optional, the upstream service may omit any of them.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub key:           Option<String>,
    pub title:         Option<String>,
    pub authors:       Vec<String>,
    pub cover_id:      Option<String>,
    pub page_count:    Option<u32>,
    pub publishers:    Vec<String>,
    pub publish_dates: Vec<String>,
}

impl BookRecord {
    /// Placeholder returned by a lookup that matched nothing.
    pub fn not_found() -> Self {
        Self {
            title: Some(NOT_FOUND_TITLE.to_string()),
            ..Self::default()
        }
    }

    /// A real record always has a key; the placeholder never does.
    pub fn is_not_found(&self) -> bool {
        self.key.is_none()
            && self.title.as_deref() == Some(NOT_FOUND_TITLE)
            && self.authors.is_empty()
            && self.cover_id.is_none()
            && self.page_count.is_none()
            && self.publishers.is_empty()
            && self.publish_dates.is_empty()
    }

    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    pub fn first_publisher(&self) -> Option<&str> {
        self.publishers.first().map(String::as_str)
    }

    pub fn first_publish_date(&self) -> Option<&str> {
        self.publish_dates.first().map(String::as_str)
    }
}
