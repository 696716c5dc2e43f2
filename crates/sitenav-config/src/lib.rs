//! Site navigation configuration
//!
//! Loads settings from `sitenav.toml`. Every section is optional and falls
//! back to the defaults that match the stock site markup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sitenav_core::{Catalog, RouterSettings, SearchSettings};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Startup page
    pub router: RouterSettings,
    /// Dropdown behaviour and styling
    pub search: SearchSettings,
    /// Where the widget finds its elements in the page
    pub dom: DomBindings,
    /// Searchable pages; defaults to the built-in site catalog
    pub catalog: Catalog,
}

/// Selectors, element ids and class names used to bind to the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomBindings {
    pub section_selector: String,
    pub nav_selector: String,
    pub input_id: String,
    pub results_id: String,
    pub active_class: String,
}

impl Default for DomBindings {
    fn default() -> Self {
        Self {
            section_selector: ".page-section".to_string(),
            nav_selector: ".panel-option a".to_string(),
            input_id: "input".to_string(),
            results_id: "searchResults".to_string(),
            active_class: "active".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path`, or fall back to defaults when the file is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_default()
    }
}
