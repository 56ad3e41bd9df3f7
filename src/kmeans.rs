//! k-means palette extraction.
//!
//! [`cluster`] is the plain RGB variant: random initial centroids drawn from
//! the samples, a fixed number of passes, integer-truncated means. Empty
//! clusters keep their previous centroid. [`cluster_lab`] is the perceptual
//! variant, delegating to `kmeans_colors` in CIE Lab.

use kmeans_colors::get_kmeans;
use log::{debug, trace};
use palette::{IntoColor, Lab, Srgb};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::Rgb;

/// Palette size used when the caller has no preference.
pub const DEFAULT_K: usize = 5;

/// Number of assignment/update passes [`cluster`] performs.
pub const ITERATIONS: usize = 10;

/// Source of initial centroid positions.
///
/// `pick(len)` returns an index in `0..len`; `len` is never zero. Every
/// [`rand::Rng`] is a `CentroidSeed`, and [`FixedSeed`] replays a scripted
/// sequence for reproducible runs.
pub trait CentroidSeed {
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> CentroidSeed for R {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Indices are reduced modulo the sample count, so any list is valid.
#[derive(Clone, Debug, Default)]
pub struct FixedSeed {
    indices: Vec<usize>,
    next: usize,
}

impl FixedSeed {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            next: 0,
        }
    }
}

impl CentroidSeed for FixedSeed {
    fn pick(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let idx = self.indices[self.next % self.indices.len()];
        self.next += 1;
        idx % len
    }
}

/// Running sums for one centroid during a single pass.
#[derive(Clone, Copy, Debug, Default)]
struct Accumulator {
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
}

impl Accumulator {
    fn add(&mut self, c: Rgb) {
        self.red += c.red as u64;
        self.green += c.green as u64;
        self.blue += c.blue as u64;
        self.count += 1;
    }

    /// Truncated mean, or `None` if nothing was assigned.
    fn mean(&self) -> Option<Rgb> {
        if self.count == 0 {
            return None;
        }
        // each mean is bounded by the largest input channel, so fits in u8
        Some(Srgb::new(
            (self.red / self.count) as u8,
            (self.green / self.count) as u8,
            (self.blue / self.count) as u8,
        ))
    }
}

fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Index of the closest centroid; the first one wins on ties.
fn nearest(centroids: &[Rgb], c: Rgb) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (idx, &centroid) in centroids.iter().enumerate() {
        let d = distance_sq(c, centroid);
        if d < best_dist {
            best_dist = d;
            best = idx;
        }
    }
    best
}

/// Cluster `samples` into `k` colors.
///
/// Returns exactly `k` centroids in creation order, or nothing if `samples`
/// is empty. Identical centroids are possible and are not merged. `k` must be
/// at least 1; `k == 0` yields an empty palette.
pub fn cluster<S: CentroidSeed + ?Sized>(samples: &[Rgb], k: usize, seed: &mut S) -> Vec<Rgb> {
    if samples.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut centroids: Vec<Rgb> = (0..k).map(|_| samples[seed.pick(samples.len())]).collect();

    for pass in 0..ITERATIONS {
        let mut sums = vec![Accumulator::default(); k];
        for &c in samples {
            sums[nearest(&centroids, c)].add(c);
        }

        let mut moved = 0;
        for (centroid, acc) in centroids.iter_mut().zip(&sums) {
            if let Some(mean) = acc.mean() {
                if mean != *centroid {
                    moved += 1;
                }
                *centroid = mean;
            }
        }
        trace!("k-means pass {pass}: {moved} of {k} centroids moved");
    }

    debug!("clustered {} samples into {} colors", samples.len(), k);
    centroids
}

/// [`cluster`] with a reproducible seed.
pub fn cluster_seeded(samples: &[Rgb], k: usize, seed: u64) -> Vec<Rgb> {
    cluster(samples, k, &mut StdRng::seed_from_u64(seed))
}

/// [`cluster`] seeded from the thread-local generator.
pub fn cluster_random(samples: &[Rgb], k: usize) -> Vec<Rgb> {
    cluster(samples, k, &mut rand::rng())
}

/// Perceptual palette: k-means in CIE Lab via `kmeans_colors`.
///
/// Unlike [`cluster`] this may converge early and does not guarantee the
/// creation-order semantics; it is meant for display palettes where Lab
/// distance gives visibly better separation. `kmeans_colors` returns fewer
/// centroids than asked when the samples hold fewer distinct colors; the
/// last centroid is then repeated so the palette still has `k` entries.
pub fn cluster_lab(samples: &[Rgb], k: usize, seed: u64) -> Vec<Rgb> {
    if samples.is_empty() || k == 0 {
        return Vec::new();
    }

    let lab: Vec<Lab> = samples
        .iter()
        .map(|&c| c.into_linear::<f32>().into_color())
        .collect();

    let kmeans = get_kmeans(k, 20, 1e-4, false, &lab, seed);
    debug!(
        "lab k-means: {} samples, {} centroids, score {}",
        lab.len(),
        kmeans.centroids.len(),
        kmeans.score
    );

    let mut palette: Vec<Rgb> = kmeans
        .centroids
        .iter()
        .map(|&lab| {
            let rgb_f32: Srgb<f32> = Srgb::from_linear(lab.into_color());
            rgb_f32.into_format::<u8>()
        })
        .collect();

    // samples is non-empty, so kmeans_colors yields at least one centroid
    if let Some(&last) = palette.last() {
        palette.resize(k, last);
    }
    palette
}
