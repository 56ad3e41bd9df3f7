//! Hex color strings: canonical keys, parsing, formatting and the favorites
//! predicate.

use std::collections::HashSet;
use std::fmt;

use palette::Srgb;
use thiserror::Error;

use crate::Rgb;

/// Canonical form of a hex color: trimmed, upper-cased, without a leading `#`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedHex(String);

impl NormalizedHex {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedHex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a hex string for identity comparison.
///
/// Never fails. Strings that are not six hex digits normalize just the same;
/// they only fail later, when parsed.
pub fn normalize(hex: &str) -> NormalizedHex {
    let upper = hex.trim().to_uppercase();
    let stripped = upper.strip_prefix('#').unwrap_or(&upper);
    NormalizedHex(stripped.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("hex color must have 6 digits, got {0}")]
    Length(usize),
    #[error("invalid hex digits in {0:?}")]
    Digit(String),
}

/// Parse `RRGGBB` (optionally `#`-prefixed, any case, surrounding whitespace
/// allowed) into an 8-bit sRGB color.
pub fn parse(hex: &str) -> Result<Rgb, HexError> {
    let key = normalize(hex);
    let s = key.as_str();
    if s.chars().count() != 6 {
        return Err(HexError::Length(s.chars().count()));
    }
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::Digit(s.to_owned()));
    }
    let channel = |range: core::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| HexError::Digit(s.to_owned()))
    };
    Ok(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format as upper-case `RRGGBB` without a `#`.
pub fn format(rgb: Rgb) -> String {
    format!("{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
}

/// A set of favorite colors keyed by [`NormalizedHex`].
///
/// Persistence is someone else's job; this only answers membership.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Favorites {
    keys: HashSet<NormalizedHex>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hex: &str) -> bool {
        self.keys.insert(normalize(hex))
    }

    pub fn remove(&mut self, hex: &str) -> bool {
        self.keys.remove(&normalize(hex))
    }

    pub fn is_favorite(&self, hex: &str) -> bool {
        self.keys.contains(&normalize(hex))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Favorites {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(|s| normalize(s.as_ref())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ignores_case_prefix_and_whitespace() {
        let a = normalize("#ffAA00");
        assert_eq!(a, normalize("FFAA00"));
        assert_eq!(a, normalize(" ffaa00 "));
        assert_eq!(a.as_str(), "FFAA00");
    }

    #[test]
    fn normalize_strips_only_one_hash() {
        assert_eq!(normalize("##abc").as_str(), "#ABC");
    }

    #[test]
    fn normalize_keeps_malformed_input() {
        assert_eq!(normalize(" zz12 ").as_str(), "ZZ12");
        assert_eq!(normalize("").as_str(), "");
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(parse("#ff8000"), Ok(Srgb::new(255, 128, 0)));
        assert_eq!(parse("  0a0B0c"), Ok(Srgb::new(10, 11, 12)));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(parse("#fff"), Err(HexError::Length(3)));
        assert_eq!(parse("12345g"), Err(HexError::Digit("12345G".into())));
        assert_eq!(parse("+1234a"), Err(HexError::Digit("+1234A".into())));
        assert!(matches!(parse("ééé"), Err(HexError::Length(3))));
    }

    #[test]
    fn format_is_upper_case_without_prefix() {
        assert_eq!(format(Srgb::new(255, 10, 0)), "FF0A00");
    }

    #[test]
    fn favorites_match_any_spelling() {
        let favorites: Favorites = ["#aabbcc", "112233"].into_iter().collect();
        assert_eq!(favorites.len(), 2);
        assert!(favorites.is_favorite("AABBCC"));
        assert!(favorites.is_favorite(" #112233"));
        assert!(!favorites.is_favorite("445566"));
    }

    #[test]
    fn favorites_insert_and_remove() {
        let mut favorites = Favorites::new();
        assert!(favorites.insert("#abcdef"));
        assert!(!favorites.insert("ABCDEF"));
        assert!(favorites.remove(" abcdef"));
        assert!(favorites.is_empty());
    }
}
