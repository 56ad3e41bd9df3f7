//! Reduce an image to a bounded, strided set of RGB samples.
//!
//! The image is first shrunk (nearest-neighbour, aspect preserved) so that
//! neither side exceeds [`MAX_SIDE`], then walked row by row with a stride of
//! `max(1, min(width, height) / STRIDE_DIVISOR)` on both axes. Alpha is
//! dropped. A single 200×200 working image therefore yields at most
//! 40×40 samples, whatever the source resolution.

use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage, imageops::FilterType};
use log::{debug, warn};
use palette::Srgb;

use crate::Rgb;

/// Longest side, in pixels, of the working image.
pub const MAX_SIDE: u32 = 200;

/// The shorter side of the working image is divided by this to get the stride.
pub const STRIDE_DIVISOR: u32 = 40;

/// Sample a decoded image.
pub fn sample(img: &DynamicImage) -> Vec<Rgb> {
    let (orig_w, orig_h) = img.dimensions();
    if orig_w == 0 || orig_h == 0 {
        return Vec::new();
    }

    let (w, h) = fit_within(orig_w, orig_h, MAX_SIDE);
    let working = if (w, h) == (orig_w, orig_h) {
        img.to_rgba8()
    } else {
        image::imageops::resize(img, w, h, FilterType::Nearest)
    };

    let step = stride(w, h) as usize;
    let cols = w.div_ceil(step as u32) as usize;
    let rows = h.div_ceil(step as u32) as usize;
    let mut samples = Vec::with_capacity(cols * rows);
    for y in (0..h).step_by(step) {
        for x in (0..w).step_by(step) {
            let px = working.get_pixel(x, y);
            samples.push(Srgb::new(px[0], px[1], px[2]));
        }
    }

    debug!(
        "sampled {} pixels from {}x{} (working {}x{}, step {})",
        samples.len(),
        orig_w,
        orig_h,
        w,
        h,
        step
    );
    samples
}

/// Decode an encoded image (PNG, JPEG, ...) and sample it.
///
/// Undecodable input yields no samples rather than an error.
pub fn sample_bytes(input: &[u8]) -> Vec<Rgb> {
    match image::load_from_memory(input) {
        Ok(img) => sample(&img),
        Err(e) => {
            warn!("unable to decode image: {e}");
            Vec::new()
        }
    }
}

/// Sample a raw, already decoded pixel buffer.
///
/// The layout is inferred from the length: 4 bytes per pixel is RGBA8,
/// 3 bytes per pixel is RGB8. Anything else, including dimensions whose byte
/// count does not fit in `usize`, yields no samples.
pub fn sample_raw(width: u32, height: u32, data: &[u8]) -> Vec<Rgb> {
    let pixels = (width as usize).checked_mul(height as usize);
    let matches = |bytes_per_pixel: usize| {
        pixels.and_then(|p| p.checked_mul(bytes_per_pixel)) == Some(data.len())
    };
    let img = if matches(4) {
        RgbaImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageRgba8)
    } else if matches(3) {
        RgbImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageRgb8)
    } else {
        None
    };

    match img {
        Some(img) => sample(&img),
        None => {
            warn!(
                "pixel buffer of {} bytes does not match {}x{} RGB or RGBA",
                data.len(),
                width,
                height
            );
            Vec::new()
        }
    }
}

/// Dimensions scaled down (never up) so that both sides are at most `max_side`.
fn fit_within(w: u32, h: u32, max_side: u32) -> (u32, u32) {
    if w <= max_side && h <= max_side {
        return (w, h);
    }
    let ratio = max_side as f32 / w.max(h) as f32;
    let scale = |side: u32| ((side as f32 * ratio).round().max(1.0) as u32).min(max_side);
    (scale(w), scale(h))
}

fn stride(w: u32, h: u32) -> u32 {
    (w.min(h) / STRIDE_DIVISOR).max(1)
}
