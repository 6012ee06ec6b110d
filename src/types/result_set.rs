use serde::{Deserialize, Serialize};

use super::book::BookRecord;

/// Records in the relevance order the catalog returned them. Duplicates are
/// kept as-is.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet(pub Vec<BookRecord>);

impl ResultSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&BookRecord> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&BookRecord> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.0.iter()
    }
}

impl From<Vec<BookRecord>> for ResultSet {
    fn from(records: Vec<BookRecord>) -> Self {
        Self(records)
    }
}

impl IntoIterator for ResultSet {
    type Item = BookRecord;
    type IntoIter = std::vec::IntoIter<BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a BookRecord;
    type IntoIter = std::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
