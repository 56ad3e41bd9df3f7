//! # chromabin
//!
//! Color palettes from images, and hue × lightness grids from color catalogs.
//!
//! Two independent pipelines:
//!
//! - image → [`sampler`] → samples → [`kmeans`] → palette (ordered [`Rgb`] list)
//! - named colors → [`hsl`] → [`buckets::aggregate`] → sparse bucket grid
//!
//! Neither pipeline fails on bad input: an undecodable image gives an empty
//! palette, out-of-range bin indices are clamped, and gray colors have hue 0.
//!
//! ```
//! use chromabin::{NamedColor, buckets::{aggregate, YAxis}};
//!
//! let colors = [NamedColor::new("Red", "#FF0000"), NamedColor::new("Navy", "000080")];
//! let grid = aggregate(&colors, 6, 4, YAxis::Lightness);
//! assert_eq!(grid.len(), 2);
//! ```

use image::DynamicImage;

pub mod buckets;
pub mod color;
pub mod config;
pub mod error;
pub mod hex;
pub mod hsl;
pub mod kmeans;
pub mod sampler;
pub mod wasm;

pub use color::{NamedColor, Vendor};
pub use error::{Error, Result};

use config::PaletteConfig;

/// 8-bit sRGB color.
pub type Rgb = palette::Srgb<u8>;

/// Cluster already-sampled pixels according to `config`.
pub fn palette_from_samples(samples: &[Rgb], config: &PaletteConfig) -> Vec<Rgb> {
    let k = config.k();
    match (config.perceptual, config.seed) {
        (true, seed) => kmeans::cluster_lab(samples, k, seed.unwrap_or_else(rand::random)),
        (false, Some(seed)) => kmeans::cluster_seeded(samples, k, seed),
        (false, None) => kmeans::cluster_random(samples, k),
    }
}

/// Sample `img` and cluster the samples into a palette.
pub fn extract_palette(img: &DynamicImage, config: &PaletteConfig) -> Vec<Rgb> {
    palette_from_samples(&sampler::sample(img), config)
}

/// Decode an encoded image and return its palette as `RRGGBB` strings.
///
/// Undecodable input gives an empty palette.
pub fn extract_palette_bytes(input: &[u8], n_colors: usize) -> Vec<String> {
    let config = PaletteConfig {
        k: n_colors,
        ..PaletteConfig::default()
    };
    palette_from_samples(&sampler::sample_bytes(input), &config)
        .into_iter()
        .map(hex::format)
        .collect()
}
