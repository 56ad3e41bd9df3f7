use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chromabin::buckets::{self, YAxis};
use chromabin::config::Config;
use chromabin::hex::{self, Favorites};
use chromabin::{NamedColor, sampler};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde_json::json;

/// Extract image palettes and bucket color catalogs.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON config file; command-line flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a k-color palette for each input image
    Palette {
        /// One or more input image paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Number of palette colors
        #[arg(short = 'k', long)]
        n_colors: Option<usize>,

        /// Seed for centroid initialization (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Cluster in CIE Lab instead of RGB
        #[arg(long)]
        perceptual: bool,
    },

    /// Bucket a JSON array of {name, hex, vendor?} colors into a hue grid
    Grid {
        /// Path to the JSON color list
        input: PathBuf,

        #[arg(long)]
        hue_bins: Option<usize>,

        #[arg(long)]
        y_bins: Option<usize>,

        /// Vertical axis of the grid
        #[arg(long, value_enum)]
        axis: Option<Axis>,

        /// Drop repeated hex values before bucketing
        #[arg(long)]
        dedup: bool,

        /// Comma-separated list of favorite hex colors
        #[arg(short = 'f', long)]
        favorites: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Axis {
    Lightness,
    Saturation,
}

impl From<Axis> for YAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Lightness => YAxis::Lightness,
            Axis::Saturation => YAxis::Saturation,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path).context("loading config")?,
        None => Config::default(),
    };

    match args.command {
        Command::Palette {
            inputs,
            n_colors,
            seed,
            perceptual,
        } => {
            if let Some(k) = n_colors {
                config.palette.k = k;
            }
            if seed.is_some() {
                config.palette.seed = seed;
            }
            config.palette.perceptual |= perceptual;

            for input in &inputs {
                let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
                let samples = sampler::sample_bytes(&bytes);
                let palette = chromabin::palette_from_samples(&samples, &config.palette);
                if palette.is_empty() {
                    println!("{}: no palette available", input.display());
                    continue;
                }
                let hexes: Vec<String> = palette.into_iter().map(hex::format).collect();
                println!("{}: {}", input.display(), hexes.join(" "));
            }
        }

        Command::Grid {
            input,
            hue_bins,
            y_bins,
            axis,
            dedup,
            favorites,
        } => {
            if let Some(n) = hue_bins {
                config.grid.hue_bins = n;
            }
            if let Some(n) = y_bins {
                config.grid.y_bins = n;
            }
            if let Some(axis) = axis {
                config.grid.axis = axis.into();
            }

            let text = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let mut colors: Vec<NamedColor> =
                serde_json::from_str(&text).context("parsing color list")?;
            if dedup {
                let before = colors.len();
                colors = buckets::dedup_by_hex(&colors);
                info!("dedup removed {} repeated colors", before - colors.len());
            }

            let favorites: Favorites = favorites
                .as_deref()
                .map(|s| s.split(',').map(str::trim).collect())
                .unwrap_or_default();

            let grid = buckets::aggregate(
                &colors,
                config.grid.hue_bins,
                config.grid.y_bins,
                config.grid.axis,
            );

            let cells: Vec<_> = grid
                .iter()
                .map(|(key, data)| {
                    json!({
                        "hue": key.hue,
                        "y": key.y,
                        "count": data.count,
                        "representative": data.representative,
                        "favorite": grid.is_favorite_bucket(*key, &favorites),
                    })
                })
                .collect();
            let range = grid.y_range();
            let out = json!({
                "hue_bins": grid.hue_bins(),
                "y_bins": grid.y_bins(),
                "axis": grid.axis(),
                "y_min": range.start(),
                "y_max": range.end(),
                "buckets": cells,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
