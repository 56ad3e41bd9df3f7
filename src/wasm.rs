//! JavaScript bindings.
//!
//! Palettes come back as arrays of `RRGGBB` strings. `bucketColors` takes an
//! array of `{ name, hex, brand?, code? }` objects and returns
//! `{ buckets: [{ hue, y, count, name, hex }], yMin, yMax }`.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::buckets::{self, YAxis};
use crate::config::PaletteConfig;
use crate::{NamedColor, hex, sampler};

fn palette_array(samples: &[crate::Rgb], n_colors: usize) -> Array {
    let config = PaletteConfig {
        k: n_colors,
        ..PaletteConfig::default()
    };
    let out = Array::new();
    for c in crate::palette_from_samples(samples, &config) {
        out.push(&JsValue::from_str(&hex::format(c)));
    }
    out
}

/// Palette of an encoded image (PNG, JPEG, ...). Empty if it cannot be decoded.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette(input: Vec<u8>, n_colors: usize) -> Array {
    palette_array(&sampler::sample_bytes(&input), n_colors)
}

/// Palette of raw RGBA (or RGB) pixels, e.g. `ImageData.data` from a canvas.
#[wasm_bindgen(js_name = extractPaletteRgba)]
pub fn extract_palette_rgba(data: Vec<u8>, width: u32, height: u32, n_colors: usize) -> Array {
    palette_array(&sampler::sample_raw(width, height, &data), n_colors)
}

#[wasm_bindgen(js_name = normalizeHex)]
pub fn normalize_hex(hex: &str) -> String {
    hex::normalize(hex).to_string()
}

fn string_field(obj: &JsValue, key: &str) -> Result<Option<String>, JsValue> {
    Ok(Reflect::get(obj, &JsValue::from_str(key))?.as_string())
}

fn named_color(obj: &JsValue) -> Result<NamedColor, JsValue> {
    let name = string_field(obj, "name")?;
    let hex = string_field(obj, "hex")?;
    let (Some(name), Some(hex)) = (name, hex) else {
        return Err(JsValue::from_str("Color entries need string `name` and `hex` fields"));
    };
    let color = NamedColor::new(name, hex);
    Ok(match (string_field(obj, "brand")?, string_field(obj, "code")?) {
        (Some(brand), Some(code)) => color.with_vendor(brand, code),
        _ => color,
    })
}

#[wasm_bindgen(js_name = bucketColors)]
pub fn bucket_colors(
    colors: Array,
    hue_bins: usize,
    y_bins: usize,
    saturation: bool,
) -> Result<Object, JsValue> {
    let colors = colors
        .iter()
        .map(|val| named_color(&val))
        .collect::<Result<Vec<_>, _>>()?;
    let axis = if saturation {
        YAxis::Saturation
    } else {
        YAxis::Lightness
    };
    let grid = buckets::aggregate(&colors, hue_bins, y_bins, axis);

    let buckets_js = Array::new();
    for (key, data) in grid.iter() {
        let entry = Object::new();
        Reflect::set(&entry, &"hue".into(), &JsValue::from_f64(key.hue as f64))?;
        Reflect::set(&entry, &"y".into(), &JsValue::from_f64(key.y as f64))?;
        Reflect::set(&entry, &"count".into(), &JsValue::from_f64(data.count as f64))?;
        if let Some(rep) = &data.representative {
            Reflect::set(&entry, &"name".into(), &JsValue::from_str(&rep.name))?;
            Reflect::set(&entry, &"hex".into(), &JsValue::from_str(&rep.hex))?;
        }
        buckets_js.push(&entry);
    }

    let range = grid.y_range();
    let result = Object::new();
    Reflect::set(&result, &"buckets".into(), &buckets_js)?;
    Reflect::set(&result, &"yMin".into(), &JsValue::from_f64(*range.start() as f64))?;
    Reflect::set(&result, &"yMax".into(), &JsValue::from_f64(*range.end() as f64))?;
    Ok(result)
}
