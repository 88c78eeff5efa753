//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a focusmap.toml, and if present we load settings from there.
//! Any key left out falls back to its default; a file that cannot be read or parsed is
//! ignored with a warning.

use crate::error::{Error, Result};
use crate::filter::BlockFilter;
use crate::outline::OutlineOptions;
use crate::palette::Palette;
use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "focusmap.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// Reader preferences loaded from focusmap.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 2000)]
    /// Character budget of each outline excerpt.
    pub excerpt_budget: usize,
    #[facet(default = 5)]
    /// Headings processed per outline scheduling turn.
    pub chunk_size: usize,
    #[facet(default = "Root".to_string())]
    /// Outline root label used when the document has no title.
    pub root_label: String,
    #[facet(default = 768)]
    /// Viewport width (px) at or below which the outline flows left to right.
    pub narrow_width: u32,
    #[facet(default = 50.0)]
    /// Scroll distance (px) before the focus block is re-picked after free scrolling.
    pub settle_distance: f64,
    #[facet(default = 500)]
    /// Window (ms) in which a second activation confirms an outline node.
    pub confirm_window_ms: u64,
    #[facet(default = false)]
    /// Whether headings are focusable blocks.
    pub include_headings: bool,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excerpt_budget: 2000,
            chunk_size: 5,
            root_label: "Root".to_string(),
            narrow_width: 768,
            settle_distance: 50.0,
            confirm_window_ms: 500,
            include_headings: false,
            file_extensions: vec!["md".to_string()],
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from focusmap.toml if present and valid.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring {CONFIG_FILE}");
                Self::default()
            }
        }
    }

    /// Load and validate configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or holds unusable values.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = facet_toml::from_str::<Self>(&contents)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the core cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first bad key.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be at least 1".into()));
        }
        if self.excerpt_budget == 0 {
            return Err(Error::InvalidConfig(
                "excerpt_budget must be at least 1".into(),
            ));
        }
        if !self.settle_distance.is_finite() || self.settle_distance < 0.0 {
            return Err(Error::InvalidConfig(
                "settle_distance must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    /// Outline builder options derived from this configuration.
    pub fn outline_options(&self) -> OutlineOptions {
        OutlineOptions {
            excerpt_budget: self.excerpt_budget,
            default_root_label: self.root_label.clone(),
            palette: Palette::default(),
        }
    }

    #[must_use]
    /// Focus block predicate derived from this configuration.
    pub fn block_filter(&self) -> BlockFilter {
        BlockFilter::new(self.include_headings)
    }

    #[must_use]
    /// Double-activation window.
    pub fn confirm_window(&self) -> Duration {
        Duration::from_millis(self.confirm_window_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
