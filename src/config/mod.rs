//! Chart style configuration
//!
//! Only presentation is configurable. Thresholds, the connection tolerance and
//! gridline steps are fixed in [`crate::report`].
//!
//! # Example
//!
//! ```toml
//! width = 1600
//! height = 900
//! bar-fill = "#4c72b0"
//! title = "nightly build"
//! ```
//!
//! Accessors apply defaults, so callers use `config.width()` instead of
//! `config.width.unwrap_or(1000)`.

mod path;

pub use path::{CONFIG_PATH_ENV, get_config_path, is_config_path_explicit, set_config_path};

use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChartConfig {
    /// Image width in pixels
    pub width: Option<u32>,
    /// Image height in pixels
    pub height: Option<u32>,
    pub bar_fill: Option<String>,
    pub bar_edge: Option<String>,
    pub bar_opacity: Option<f64>,
    pub grid_color: Option<String>,
    pub connector_color: Option<String>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub title: Option<String>,
}

impl ChartConfig {
    pub fn width(&self) -> u32 {
        self.width.unwrap_or(1000)
    }

    pub fn height(&self) -> u32 {
        self.height.unwrap_or(800)
    }

    pub fn bar_fill(&self) -> &str {
        self.bar_fill.as_deref().unwrap_or("red")
    }

    pub fn bar_edge(&self) -> &str {
        self.bar_edge.as_deref().unwrap_or("darkblue")
    }

    pub fn bar_opacity(&self) -> f64 {
        self.bar_opacity.unwrap_or(0.8).clamp(0.0, 1.0)
    }

    pub fn grid_color(&self) -> &str {
        self.grid_color.as_deref().unwrap_or("green")
    }

    pub fn connector_color(&self) -> &str {
        self.connector_color.as_deref().unwrap_or("silver")
    }

    pub fn font_size(&self) -> u32 {
        self.font_size.unwrap_or(8)
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or("sans-serif")
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a config file.
    ///
    /// A missing file yields defaults unless `explicit` is set; a file that
    /// exists but does not parse is always an error.
    pub fn load_from(path: &Path, explicit: bool) -> anyhow::Result<Self> {
        if !path.exists() {
            if explicit {
                bail!("Config file not found: {}", path.display());
            }
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Load the chart config from the resolved location (see [`get_config_path`]).
pub fn load_config() -> anyhow::Result<ChartConfig> {
    match get_config_path() {
        Some(path) => ChartConfig::load_from(&path, is_config_path_explicit()),
        None => Ok(ChartConfig::default()),
    }
}
