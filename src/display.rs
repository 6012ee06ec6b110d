use std::fmt::Write;

use anyhow::Result;

use crate::{
    config::Config,
    controller::{DetailState, SearchState},
    types::{
        book::{BookRecord, NOT_FOUND_TITLE},
        cover::{cover_url, CoverSize},
        result_set::ResultSet,
    },
};

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const UNKNOWN: &str = "Unknown";
pub const NO_COVER: &str = "[no cover]";
pub const NO_RESULTS: &str = "No results";
pub const NO_BOOK_FOUND: &str = NOT_FOUND_TITLE;

pub trait DisplayTerminal {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()>;

    fn fmt_to_string(&self, config: &Config) -> Result<String> {
        let mut s = String::new();
        DisplayTerminal::fmt(self, &mut s, config)?;
        Ok(s)
    }
}

/// A record as it appears in a numbered result list.
pub struct ListItem<'a> {
    pub position: usize,
    pub record:   &'a BookRecord,
}

fn cover(f: &mut String, record: &BookRecord, size: CoverSize, config: &Config) -> Result<()> {
    match cover_url(
        &config.catalog.cover_base_url,
        record.cover_id.as_deref(),
        size,
    ) {
        Some(url) => write!(f, "{}", config.output_cover.format_str(url))?,
        None => write!(f, "{}", config.output_placeholder.format_str(NO_COVER))?,
    }
    Ok(())
}

impl DisplayTerminal for ListItem<'_> {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        let record = self.record;
        write!(
            f,
            "{} {}",
            config.output_index.format_str(self.position),
            config
                .output_title
                .format_str(record.title.as_deref().unwrap_or(UNTITLED)),
        )?;
        if let Some(key) = &record.key {
            write!(f, " {}", config.output_key.format_str(key))?;
        }
        write!(f, "\n    ")?;
        if record.authors.is_empty() {
            write!(f, "{}", config.output_author.format_str(UNKNOWN_AUTHOR))?;
        } else {
            write!(f, "{}", config.output_author.format_vec(&record.authors))?;
        }
        if let Some(pages) = record.page_count {
            write!(f, " {}", config.output_page_count.format_str(pages))?;
        }
        write!(f, "\n    ")?;
        cover(f, record, CoverSize::Small, config)
    }
}

impl DisplayTerminal for ResultSet {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        for (index, record) in self.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let item = ListItem {
                position: index + 1,
                record,
            };
            DisplayTerminal::fmt(&item, f, config)?;
        }
        Ok(())
    }
}

/// The detail view.
impl DisplayTerminal for BookRecord {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        if self.is_not_found() {
            write!(f, "{}", config.output_placeholder.format_str(NO_BOOK_FOUND))?;
            return Ok(());
        }
        writeln!(
            f,
            "{}",
            config
                .output_title
                .format_str(self.title.as_deref().unwrap_or(UNTITLED))
        )?;
        if self.authors.is_empty() {
            writeln!(f, "{}", config.output_author.format_str(UNKNOWN_AUTHOR))?;
        } else {
            writeln!(f, "{}", config.output_author.format_vec(&self.authors))?;
        }
        writeln!(
            f,
            "{}",
            config
                .output_publish_date
                .format_str(self.first_publish_date().unwrap_or(UNKNOWN))
        )?;
        writeln!(
            f,
            "{}",
            config
                .output_publisher
                .format_str(self.first_publisher().unwrap_or(UNKNOWN))
        )?;
        let pages = self
            .page_count
            .map(|x| x.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        writeln!(f, "{}", config.output_page_count.format_str(pages))?;
        cover(f, self, CoverSize::Large, config)?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            config
                .output_key
                .format_str(self.key.as_deref().unwrap_or(UNKNOWN))
        )?;
        Ok(())
    }
}

impl DisplayTerminal for SearchState {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        match self {
            SearchState::Idle => write!(
                f,
                "{}",
                config.output_placeholder.format_str("Search for a title or author")
            )?,
            SearchState::Searching { query } => write!(
                f,
                "{}",
                config
                    .output_placeholder
                    .format_str(format!("Searching for {query}"))
            )?,
            SearchState::Results(results) => DisplayTerminal::fmt(results, f, config)?,
            SearchState::Empty => {
                write!(f, "{}", config.output_placeholder.format_str(NO_RESULTS))?
            }
            SearchState::Failed(_) => write!(
                f,
                "{}",
                config
                    .output_placeholder
                    .format_str(format!("{NO_RESULTS}, try searching again"))
            )?,
        }
        Ok(())
    }
}

impl DisplayTerminal for DetailState {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        match self {
            DetailState::Loading => {
                write!(f, "{}", config.output_placeholder.format_str("Loading"))?
            }
            DetailState::Loaded(record) => DisplayTerminal::fmt(record, f, config)?,
            DetailState::NotFound | DetailState::Failed(_) => {
                write!(f, "{}", config.output_placeholder.format_str(NO_BOOK_FOUND))?
            }
        }
        Ok(())
    }
}
