use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverSize {
    /// Thumbnail used in result lists.
    Small,
    Medium,
    /// Used on the detail view.
    Large,
}

impl CoverSize {
    pub fn suffix(&self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

impl Display for CoverSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// `<base>/<cover_id>-<size>.jpg`, or `None` when there's nothing to fetch and
/// a placeholder should be shown instead.
pub fn cover_url(base: &str, cover_id: Option<&str>, size: CoverSize) -> Option<String> {
    let cover_id = cover_id.map(str::trim).filter(|x| !x.is_empty())?;
    let base = base.trim_end_matches('/');
    Some(format!("{base}/{cover_id}-{size}.jpg"))
}
