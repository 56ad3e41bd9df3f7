//! Catalog colors: a display name, a hex value and an optional vendor tag.

use serde::{Deserialize, Serialize};

use crate::hex::{self, HexError, NormalizedHex};
use crate::hsl::{self, Hsl};
use crate::Rgb;

/// Brand and product code of a catalog color. Display only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vendor {
    pub brand: String,
    pub code: String,
}

/// A color as supplied by a catalog: a display name plus its hex value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Vendor>,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            vendor: None,
        }
    }

    pub fn with_vendor(mut self, brand: impl Into<String>, code: impl Into<String>) -> Self {
        self.vendor = Some(Vendor {
            brand: brand.into(),
            code: code.into(),
        });
        self
    }

    pub fn key(&self) -> NormalizedHex {
        hex::normalize(&self.hex)
    }

    pub fn rgb(&self) -> Result<Rgb, HexError> {
        hex::parse(&self.hex)
    }

    pub fn hsl(&self) -> Result<Hsl, HexError> {
        self.rgb().map(hsl::rgb_to_hsl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_vendor() {
        let color: NamedColor =
            serde_json::from_str(r##"{"name":"Ocean","hex":"#0077be"}"##).unwrap();
        assert_eq!(color, NamedColor::new("Ocean", "#0077be"));
        assert_eq!(color.key().as_str(), "0077BE");
    }

    #[test]
    fn vendor_round_trips_through_json() {
        let color = NamedColor::new("Sailor Blue", "1F3A5F").with_vendor("Acme", "SB-12");
        let json = serde_json::to_string(&color).unwrap();
        assert!(json.contains("\"brand\":\"Acme\""), "{json}");
        let back: NamedColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }

    #[test]
    fn hsl_uses_hex_value() {
        let hsl = NamedColor::new("Lime", "00FF00").hsl().unwrap();
        assert_eq!(hsl.hue, 120.0);
        assert!(NamedColor::new("Broken", "nope").hsl().is_err());
    }
}
