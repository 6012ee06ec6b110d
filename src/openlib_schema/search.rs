use serde::{Deserialize, Serialize};

use crate::types::book::BookRecord;

/// Body of `GET /search.json`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "numFound")]
    pub num_found: Option<u64>,
    pub docs:      Option<Vec<Doc>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub key:                    Option<String>,
    pub title:                  Option<String>,
    pub author_name:            Option<Vec<String>>,
    pub cover_i:                Option<NumberOrString>,
    pub number_of_pages_median: Option<NumberOrString>,
    pub publisher_facet:        Option<Vec<String>>,
    pub publish_date:           Option<Vec<String>>,
}

/// Some numeric fields come back as JSON numbers from one mirror and as
/// strings from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrString {
    pub fn to_text(&self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Text(s) => s.trim().to_string(),
        }
    }

    pub fn to_u32(&self) -> Option<u32> {
        match self {
            NumberOrString::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|x| *x >= 0.0).map(|x| x.round() as u64))
                .and_then(|x| u32::try_from(x).ok()),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl SearchResponse {
    pub fn into_records(self) -> Vec<BookRecord> {
        self.docs
            .unwrap_or_default()
            .into_iter()
            .map(BookRecord::from)
            .collect()
    }
}

impl From<Doc> for BookRecord {
    fn from(doc: Doc) -> Self {
        BookRecord {
            key:           doc.key,
            title:         doc.title,
            authors:       doc.author_name.unwrap_or_default(),
            cover_id:      doc
                .cover_i
                .map(|x| x.to_text())
                .filter(|x| !x.is_empty()),
            page_count:    doc.number_of_pages_median.and_then(|x| x.to_u32()),
            publishers:    doc.publisher_facet.unwrap_or_default(),
            publish_dates: doc.publish_date.unwrap_or_default(),
        }
    }
}
