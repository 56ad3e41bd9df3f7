//! RGB → HSL conversion.
//!
//! Hue is in degrees in `[0, 360)`, saturation and lightness in `[0, 1]`.
//! Achromatic colors (all channels equal) map to hue 0 and saturation 0.

use crate::Rgb;

/// Hue-saturation-lightness triple derived from an [`Rgb`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Degrees in `[0, 360)`.
    pub hue: f32,
    /// `[0, 1]`
    pub saturation: f32,
    /// `[0, 1]`
    pub lightness: f32,
}

/// Convert an sRGB color with 8-bit channels to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.red as f32 / 255.0;
    let g = rgb.green as f32 / 255.0;
    let b = rgb.blue as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl { hue: 0.0, saturation: 0.0, lightness };
    }

    // `%` truncates toward zero, so a red-dominant color with g < b lands
    // negative here and is wrapped below.
    let sector = if max == r {
        ((g - b) / delta) % 6.0
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let mut hue = sector * 60.0;
    if hue < 0.0 {
        hue += 360.0;
    }

    let saturation = (delta / (1.0 - (2.0 * lightness - 1.0).abs())).min(1.0);

    Hsl { hue, saturation, lightness }
}
