//! Tunable parameters for palette extraction and the color grid.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```
//! use chromabin::config::Config;
//! use chromabin::buckets::YAxis;
//!
//! let config = Config::from_json_str(r#"{ "grid": { "axis": "saturation" } }"#)?;
//! assert_eq!(config.grid.axis, YAxis::Saturation);
//! assert_eq!(config.palette.k, 5);
//! # Ok::<(), chromabin::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buckets::YAxis;
use crate::error::{Error, Result};
use crate::kmeans::DEFAULT_K;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub palette: PaletteConfig,
    pub grid: GridConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Number of palette colors. Values below 1 are raised to 1.
    pub k: usize,
    /// Fixed seed for centroid initialization; random when absent.
    pub seed: Option<u64>,
    /// Cluster in CIE Lab instead of RGB.
    pub perceptual: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            seed: None,
            perceptual: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub hue_bins: usize,
    pub y_bins: usize,
    pub axis: YAxis,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hue_bins: 12,
            y_bins: 6,
            axis: YAxis::Lightness,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl PaletteConfig {
    /// `k`, raised to at least 1.
    pub fn k(&self) -> usize {
        self.k.max(1)
    }
}
