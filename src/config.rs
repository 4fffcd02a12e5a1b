//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a plica.toml, and if present we load settings
//! from there. This provides the re-initialisation debounce delay and the
//! fold-state directory.

use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// User preferences loaded from plica.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Debounce delay, in milliseconds, between a relevant document change
    /// and the re-initialisation pass it schedules.
    pub debounce_ms: u64,
    #[facet(default = ".plica".to_string())]
    /// Directory holding the persisted fold state, one file per document.
    pub state_dir: String,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Config {
    #[must_use]
    /// Load configuration from plica.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("plica.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }
}
