// ABOUTME: Document configuration for the rendered color report
// ABOUTME: Loaded from TOML, every field optional with report defaults

use serde::{Deserialize, Serialize};
use std::path::Path;
use swatchbook_logging::debug;

use crate::error::ConfigError;

/// Settings for the color system document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Heading text at the top of the document
    pub title: String,
    /// Text drawn in the foreground color on each preview swatch
    pub sample_text: String,
    pub font_family: String,
    /// Width of the root frame in pixels
    pub page_width: f32,
    /// Edge length of each color swatch in pixels
    pub swatch_size: f32,
    /// Include pairs with a missing side, graded as `-`
    pub show_ungraded: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Colors".to_string(),
            sample_text: "Aa".to_string(),
            font_family: "Inter".to_string(),
            page_width: 1024.0,
            swatch_size: 40.0,
            show_ungraded: true,
        }
    }
}

impl DocumentConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DocumentConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), "Loaded document config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.page_width.is_finite() && self.page_width > 0.0) {
            return Err(ConfigError::Invalid {
                field: "page_width",
                reason: format!("must be a positive number, got {}", self.page_width),
            });
        }
        if !(self.swatch_size.is_finite() && self.swatch_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "swatch_size",
                reason: format!("must be a positive number, got {}", self.swatch_size),
            });
        }
        if self.sample_text.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "sample_text",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
