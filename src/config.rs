use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::default_colors::*;

pub const ENV_PREFIX: &str = "BOOKFINDER_";
pub const DEFAULT_CONFIG_LOCATION: &str = "~/.config/bookfinder/config.toml";
pub const DEFAULT_HISTORY_LOCATION: &str = "~/.local/share/bookfinder/history.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub bold:   bool,
    pub italic: bool,
    pub color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub separator:         String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_separator:   StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format_str(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let content = content.to_string().style(&self.style_content);
        if self.description.is_empty() {
            return format!("{prefix}{content}{suffix}");
        }
        let description = self.description.style(&self.style_description);
        format!("{prefix}{description} {content}{suffix}")
    }

    pub fn format_vec(&self, content: &[impl ToString]) -> String {
        let separator = self.separator.style(&self.style_separator);
        let joined = content
            .iter()
            .map(|x| x.to_string().style(&self.style_content))
            .collect::<Vec<String>>()
            .join(&separator);
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        if self.description.is_empty() {
            return format!("{prefix}{joined}{suffix}");
        }
        let description = self.description.style(&self.style_description);
        format!("{prefix}{description} {joined}{suffix}")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            separator:         ", ".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_separator:   StyleConfig::default(),
            style_content:     StyleConfig::default(),
        }
    }
}

/// Where and how the catalog is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url:       String,
    pub cover_base_url: String,
    pub timeout_secs:   u64,
    pub user_agent:     String,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url:       "https://openlibrary.org".into(),
            cover_base_url: "https://covers.openlibrary.org/b/id".into(),
            timeout_secs:   10,
            user_agent:     concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub config_location:     PathBuf,
    pub history_location:    PathBuf,
    pub log_filter:          String,
    pub catalog:             CatalogConfig,
    pub output_index:        OutputConfig,
    pub output_title:        OutputConfig,
    pub output_author:       OutputConfig,
    pub output_page_count:   OutputConfig,
    pub output_publish_date: OutputConfig,
    pub output_publisher:    OutputConfig,
    pub output_cover:        OutputConfig,
    pub output_key:          OutputConfig,
    pub output_placeholder:  OutputConfig,
    pub output_error:        OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    /// Defaults, then the user's config file, then `config.toml` in the
    /// working directory, then `BOOKFINDER_*` environment variables.
    pub fn figment() -> Figment {
        let location = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(env())
            .extract_inner::<PathBuf>("config_location")
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_LOCATION));
        let location = expand(&location);

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(location))
            .merge(Toml::file("config.toml"))
            .merge(env())
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    pub fn read_config() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn history_location(&self) -> PathBuf {
        expand(&self.history_location)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn env() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_location:     PathBuf::from(DEFAULT_CONFIG_LOCATION),
            history_location:    PathBuf::from(DEFAULT_HISTORY_LOCATION),
            log_filter:          "warn".into(),
            catalog:             CatalogConfig::default(),
            output_index:        OutputConfig {
                suffix: ".".into(),
                style_content: StyleConfig {
                    color: COLOR_INDEX,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_title:        OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_TITLE,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:       OutputConfig {
                description: "Written by:".into(),
                separator: " and ".into(),
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_page_count:   OutputConfig {
                description: "Page count:".into(),
                prefix: "[".into(),
                suffix: "]".into(),
                style_content: StyleConfig {
                    color: COLOR_PAGE_COUNT,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_publish_date: OutputConfig {
                description: "Published:".into(),
                style_content: StyleConfig {
                    color: COLOR_PUBLISH_DATE,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_publisher:    OutputConfig {
                description: "Publisher:".into(),
                style_content: StyleConfig {
                    color: COLOR_PUBLISHER,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_cover:        OutputConfig {
                description: "Cover:".into(),
                style_content: StyleConfig {
                    color: COLOR_COVER,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_key:          OutputConfig {
                prefix: "(".into(),
                suffix: ")".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_placeholder:  OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    italic: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:        OutputConfig {
                description: "Error:".into(),
                style_content: StyleConfig {
                    color: COLOR_ERROR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}
