//! Hue × lightness (or saturation) grid of named colors.
//!
//! Every call to [`aggregate`] rebuilds the grid from scratch. Buckets are
//! sparse: only cells that received at least one color exist. The first color
//! to land in a cell, in input order, is that cell's representative.

use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::NamedColor;
use crate::hex::{self, Favorites, HexError};
use crate::hsl;

/// Which HSL component the grid's vertical axis shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    #[default]
    Lightness,
    Saturation,
}

/// Cell coordinates. Ordered by hue, then y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub hue: usize,
    pub y: usize,
}

impl BucketKey {
    pub fn new(hue: usize, y: usize) -> Self {
        Self { hue, y }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketData {
    pub count: usize,
    pub representative: Option<NamedColor>,
}

/// `floor(value * bins)`, clamped to `0..bins`. `bins` must be non-zero.
pub fn bin_index(value: f32, bins: usize) -> usize {
    let raw = (value * bins as f32).floor().max(0.0) as usize;
    raw.min(bins - 1)
}

/// Bin for a hue in degrees. A hue of exactly 360 lands in the last bin.
pub fn hue_index(hue: f32, bins: usize) -> usize {
    bin_index(hue / 360.0, bins)
}

/// Result of [`aggregate`].
#[derive(Clone, Debug, PartialEq)]
pub struct BucketGrid {
    buckets: BTreeMap<BucketKey, BucketData>,
    hue_bins: usize,
    y_bins: usize,
    axis: YAxis,
    y_min: usize,
    y_max: usize,
}

impl BucketGrid {
    fn empty(hue_bins: usize, y_bins: usize, axis: YAxis) -> Self {
        Self {
            buckets: BTreeMap::new(),
            hue_bins: hue_bins.max(1),
            y_bins: y_bins.max(1),
            axis,
            y_min: 0,
            y_max: 0,
        }
    }

    /// The cell a hex color falls into under this grid's parameters.
    fn key_for(&self, hex: &str) -> Result<BucketKey, HexError> {
        let hsl = hsl::rgb_to_hsl(hex::parse(hex)?);
        let y = match self.axis {
            YAxis::Lightness => hsl.lightness,
            YAxis::Saturation => hsl.saturation,
        };
        Ok(BucketKey {
            hue: hue_index(hsl.hue, self.hue_bins),
            y: bin_index(y, self.y_bins),
        })
    }

    /// Where `hex` would be placed, or `None` if it is not a valid color.
    ///
    /// The cell need not be populated.
    pub fn locate(&self, hex: &str) -> Option<BucketKey> {
        self.key_for(hex).ok()
    }

    pub fn get(&self, key: BucketKey) -> Option<&BucketData> {
        self.buckets.get(&key)
    }

    /// Non-empty buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &BucketData)> {
        self.buckets.iter()
    }

    /// Non-empty buckets of one row, in hue order.
    pub fn row(&self, y: usize) -> impl Iterator<Item = (&BucketKey, &BucketData)> {
        self.buckets.iter().filter(move |(key, _)| key.y == y)
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of colors placed.
    pub fn total(&self) -> usize {
        self.buckets.values().map(|b| b.count).sum()
    }

    /// Rows that contain at least one color; `0..=0` for an empty grid.
    pub fn y_range(&self) -> RangeInclusive<usize> {
        self.y_min..=self.y_max
    }

    pub fn hue_bins(&self) -> usize {
        self.hue_bins
    }

    pub fn y_bins(&self) -> usize {
        self.y_bins
    }

    pub fn axis(&self) -> YAxis {
        self.axis
    }

    /// Whether the representative of `key` is among `favorites`.
    pub fn is_favorite_bucket(&self, key: BucketKey, favorites: &Favorites) -> bool {
        self.get(key)
            .and_then(|b| b.representative.as_ref())
            .is_some_and(|c| favorites.is_favorite(&c.hex))
    }
}

/// Place every color into a `hue_bins` × `y_bins` grid.
///
/// Bin counts of zero are treated as one. Colors whose hex does not parse
/// are skipped, so [`BucketGrid::total`] can be less than `colors.len()`.
pub fn aggregate(colors: &[NamedColor], hue_bins: usize, y_bins: usize, axis: YAxis) -> BucketGrid {
    let mut grid = BucketGrid::empty(hue_bins, y_bins, axis);
    let mut y_bounds: Option<(usize, usize)> = None;
    let mut skipped = 0usize;

    for color in colors {
        let key = match grid.key_for(&color.hex) {
            Ok(key) => key,
            Err(e) => {
                debug!("skipping {:?}: {e}", color.name);
                skipped += 1;
                continue;
            }
        };

        let bucket = grid.buckets.entry(key).or_default();
        bucket.count += 1;
        if bucket.representative.is_none() {
            bucket.representative = Some(color.clone());
        }

        y_bounds = Some(match y_bounds {
            None => (key.y, key.y),
            Some((lo, hi)) => (lo.min(key.y), hi.max(key.y)),
        });
    }

    if let Some((lo, hi)) = y_bounds {
        grid.y_min = lo;
        grid.y_max = hi;
    }

    debug!(
        "bucketed {} colors into {} of {}x{} cells ({:?}, rows {}..={}, {} skipped)",
        colors.len() - skipped,
        grid.len(),
        grid.hue_bins,
        grid.y_bins,
        axis,
        grid.y_min,
        grid.y_max,
        skipped
    );
    grid
}

/// Drop colors whose normalized hex has already been seen, keeping the first.
pub fn dedup_by_hex(colors: &[NamedColor]) -> Vec<NamedColor> {
    let mut seen = HashSet::new();
    colors
        .iter()
        .filter(|c| seen.insert(c.key()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, hex: &str) -> NamedColor {
        NamedColor::new(name, hex)
    }

    fn two_groups() -> Vec<NamedColor> {
        // roses: hue 0, lightness above 0.5; teals: hue 180, below 0.5
        vec![
            named("rose 1", "FF8080"),
            named("teal 1", "006060"),
            named("rose 2", "FF9090"),
            named("rose 3", "FA8080"),
            named("teal 2", "005050"),
            named("teal 3", "004040"),
            named("rose 4", "#ff7f7f"),
            named("teal 4", "107070"),
            named("rose 5", "E06060"),
            named("teal 5", "003030"),
        ]
    }

    #[test]
    fn hue_bins_clamp_at_both_ends() {
        assert_eq!(hue_index(0.0, 6), 0);
        assert_eq!(hue_index(359.999, 6), 5);
        assert_eq!(hue_index(360.0, 6), 5);
        assert_eq!(hue_index(-1.0, 6), 0);
        assert_eq!(hue_index(59.99, 6), 0);
        assert_eq!(hue_index(90.0, 6), 1);
    }

    #[test]
    fn y_bins_clamp_at_one() {
        assert_eq!(bin_index(1.0, 4), 3);
        assert_eq!(bin_index(0.0, 4), 0);
        assert_eq!(bin_index(0.5, 4), 2);
        assert_eq!(bin_index(f32::NAN, 4), 0);
    }

    #[test]
    fn two_groups_fill_two_buckets() {
        let grid = aggregate(&two_groups(), 2, 2, YAxis::Lightness);
        assert_eq!(grid.len(), 2);

        let rose = grid.get(BucketKey::new(0, 1)).unwrap();
        assert_eq!(rose.count, 5);
        assert_eq!(rose.representative.as_ref().unwrap().name, "rose 1");

        let teal = grid.get(BucketKey::new(1, 0)).unwrap();
        assert_eq!(teal.count, 5);
        assert_eq!(teal.representative.as_ref().unwrap().name, "teal 1");

        assert_eq!(grid.y_range(), 0..=1);
        assert_eq!(grid.total(), 10);
    }

    #[test]
    fn representative_follows_input_order() {
        let mut colors = two_groups();
        colors.reverse();
        let grid = aggregate(&colors, 2, 2, YAxis::Lightness);
        let rose = grid.get(BucketKey::new(0, 1)).unwrap();
        assert_eq!(rose.representative.as_ref().unwrap().name, "rose 5");
    }

    #[test]
    fn empty_input_has_zero_range() {
        let grid = aggregate(&[], 12, 6, YAxis::Saturation);
        assert!(grid.is_empty());
        assert_eq!(grid.y_range(), 0..=0);
    }

    #[test]
    fn y_range_tracks_occupied_rows_only() {
        let colors = [named("mid", "808080"), named("light", "E0E0E0")];
        // lightness 0.502 -> row 2, 0.878 -> row 3
        let grid = aggregate(&colors, 4, 4, YAxis::Lightness);
        assert_eq!(grid.y_range(), 2..=3);
    }

    #[test]
    fn saturation_axis() {
        let colors = [named("gray", "777777"), named("red", "FF0000")];
        let grid = aggregate(&colors, 6, 5, YAxis::Saturation);
        assert_eq!(grid.get(BucketKey::new(0, 0)).unwrap().count, 1);
        assert_eq!(grid.get(BucketKey::new(0, 4)).unwrap().count, 1);
        assert_eq!(grid.y_range(), 0..=4);
        assert_eq!(grid.axis(), YAxis::Saturation);
    }

    #[test]
    fn malformed_hex_is_skipped() {
        let colors = [named("bad", "#12345"), named("worse", "GGGGGG"), named("ok", "00FF00")];
        let grid = aggregate(&colors, 3, 3, YAxis::Lightness);
        assert_eq!(grid.total(), 1);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn zero_bins_act_as_one() {
        let grid = aggregate(&two_groups(), 0, 0, YAxis::Lightness);
        assert_eq!(grid.hue_bins(), 1);
        assert_eq!(grid.y_bins(), 1);
        assert_eq!(grid.get(BucketKey::new(0, 0)).unwrap().count, 10);
    }

    #[test]
    fn aggregation_is_pure() {
        let colors = two_groups();
        assert_eq!(
            aggregate(&colors, 12, 6, YAxis::Lightness),
            aggregate(&colors, 12, 6, YAxis::Lightness)
        );
    }

    #[test]
    fn locate_and_rows() {
        let grid = aggregate(&two_groups(), 2, 2, YAxis::Lightness);
        assert_eq!(grid.locate("#ff8080"), Some(BucketKey::new(0, 1)));
        assert_eq!(grid.locate("00FFFF"), Some(BucketKey::new(1, 1)));
        assert_eq!(grid.locate("nope"), None);

        let row: Vec<_> = grid.row(0).map(|(k, _)| *k).collect();
        assert_eq!(row, vec![BucketKey::new(1, 0)]);
    }

    #[test]
    fn favorites_are_checked_against_representatives() {
        let grid = aggregate(&two_groups(), 2, 2, YAxis::Lightness);
        let favorites: Favorites = ["#FF8080"].into_iter().collect();
        assert!(grid.is_favorite_bucket(BucketKey::new(0, 1), &favorites));
        assert!(!grid.is_favorite_bucket(BucketKey::new(1, 0), &favorites));
        assert!(!grid.is_favorite_bucket(BucketKey::new(1, 1), &favorites));
    }

    #[test]
    fn dedup_keeps_first_spelling() {
        let colors = [
            named("a", "#aabbcc"),
            named("b", "AABBCC"),
            named("c", "112233"),
            named("d", " aabbcc "),
        ];
        let unique = dedup_by_hex(&colors);
        let names: Vec<_> = unique.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn axis_deserializes_lowercase() {
        let axis: YAxis = serde_json::from_str("\"saturation\"").unwrap();
        assert_eq!(axis, YAxis::Saturation);
    }
}
