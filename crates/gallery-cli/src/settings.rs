//! Settings file for the terminal front end.
//!
//! Loaded once at startup from `--config PATH` or the platform config
//! directory. A missing or unreadable file means defaults.

use std::path::{Path, PathBuf};

use gallery_client::ClientConfig;
use gallery_core::{DEFAULT_ROWS_PER_PAGE, PageState};
use serde::{Deserialize, Serialize};

/// Front-end settings.
///
/// ```toml
/// [client]
/// base_url = "https://api.artic.edu/api/v1/artworks"
///
/// [table]
/// rows_per_page = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Collection endpoint settings.
    pub client: ClientConfig,

    /// Table display settings.
    pub table: TableSettings,
}

/// Table display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Initial page size; must be one of the paginator options.
    pub rows_per_page: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::config_path()),
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "No settings file, using defaults");
                return Self::default();
            }
        };
        Self::parse(&content).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "Ignoring unreadable settings file");
            Self::default()
        })
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("edu", "ArtworkTable", "artwork-table")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Page state the table starts on.
    ///
    /// An invalid configured page size falls back to the default.
    pub fn initial_page_state(&self) -> PageState {
        PageState::with_rows(self.table.rows_per_page).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Invalid rows_per_page in settings, using default");
            PageState::default()
        })
    }
}
