// ABOUTME: Clamped sRGB color type with WCAG luminance and contrast math
// ABOUTME: Raw host RGB triples are converted into Color at the resolution boundary

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raw RGB(A) triple as the host delivers it, channels nominally in [0, 1].
///
/// Values are not validated; conversion into [`Color`] clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Alpha is carried through from the host but ignored by contrast math
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }
}

/// Opaque color with every channel clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Rgb")]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

/// Error returned when a hex color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("invalid hex color length {len} in '{input}' (expected 3 or 6 digits)")]
    InvalidLength { input: String, len: usize },

    #[error("invalid hex digit in '{input}'")]
    InvalidDigit { input: String },
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a color, clamping each channel into [0, 1]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Create a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`
    pub fn from_hex(input: &str) -> Result<Self, ParseColorError> {
        let digits = input.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            len => {
                return Err(ParseColorError::InvalidLength {
                    input: input.to_string(),
                    len,
                });
            }
        };

        let channel = |range: std::ops::Range<usize>| {
            expanded
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ParseColorError::InvalidDigit {
                    input: input.to_string(),
                })
        };

        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Channels quantized to 8 bits (`round(c * 255)`)
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
        ]
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// sRGB transfer function, gamma-encoded channel to linear light
    pub fn to_linear(channel: f64) -> f64 {
        if channel <= 0.03928 {
            channel / 12.92
        } else {
            ((channel + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Relative luminance per WCAG 2.x
    pub fn luminance(&self) -> f64 {
        0.2126 * Self::to_linear(self.r)
            + 0.7152 * Self::to_linear(self.g)
            + 0.0722 * Self::to_linear(self.b)
    }

    /// WCAG contrast ratio, in [1, 21]. Symmetric in its arguments.
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let l1 = self.luminance();
        let l2 = other.luminance();
        let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::new(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        Rgb::new(color.r, color.g, color.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

fn clamp_channel(value: f64) -> f64 {
    // NaN compares false against both bounds; treat it as black
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn channel_to_u8(channel: f64) -> u8 {
    // Channel is already clamped, so the product is within 0..=255
    (channel * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_channels_are_clamped() {
        let color = Color::new(-0.5, 1.5, 0.25);
        assert_eq!(color.r(), 0.0);
        assert_eq!(color.g(), 1.0);
        assert_eq!(color.b(), 0.25);

        let nan = Color::new(f64::NAN, 0.0, 0.0);
        assert_eq!(nan.r(), 0.0);
    }

    #[test]
    fn test_to_hex_rounds_and_pads() {
        assert_eq!(Color::BLACK.to_hex(), "#000000");
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
        assert_eq!(Color::new(1.0, 0.0, 0.0).to_hex(), "#ff0000");
        // 0.02 * 255 = 5.1 rounds to 5
        assert_eq!(Color::new(0.02, 0.02, 0.02).to_hex(), "#050505");
        // 0.5 * 255 = 127.5 rounds half away from zero
        assert_eq!(Color::new(0.5, 0.5, 0.5).to_hex(), "#808080");
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("000000").unwrap(), Color::BLACK);
        assert_eq!(Color::from_hex("#f00").unwrap().to_hex(), "#ff0000");
        assert!(matches!(
            Color::from_hex("#12345"),
            Err(ParseColorError::InvalidLength { len: 5, .. })
        ));
        assert!(matches!(
            Color::from_hex("#gg0000"),
            Err(ParseColorError::InvalidDigit { .. })
        ));
    }

    #[test]
    fn test_linearization_threshold() {
        assert_eq!(Color::to_linear(0.0), 0.0);
        assert!((Color::to_linear(0.03928) - 0.03928 / 12.92).abs() < 1e-12);
        assert!((Color::to_linear(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(Color::BLACK.luminance(), 0.0);
        assert!((Color::WHITE.luminance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_black_white_contrast_is_21() {
        let ratio = Color::BLACK.contrast_ratio(&Color::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_known_gray_contrast() {
        // #767676 on white is the classic 4.54:1 boundary gray
        let gray = Color::from_hex("#767676").unwrap();
        let ratio = gray.contrast_ratio(&Color::WHITE);
        assert!((ratio - 4.54).abs() < 0.01, "ratio was {ratio}");
    }

    #[test]
    fn test_deserialize_clamps_out_of_range() {
        let color: Color = serde_json::from_str(r#"{"r": 2.0, "g": -1.0, "b": 0.5}"#).unwrap();
        assert_eq!(color, Color::new(1.0, 0.0, 0.5));
    }

    fn channel() -> impl Strategy<Value = f64> {
        0.0f64..=1.0
    }

    proptest! {
        #[test]
        fn prop_hex_round_trip_is_idempotent(r in channel(), g in channel(), b in channel()) {
            let hex = Color::new(r, g, b).to_hex();
            let reparsed = Color::from_hex(&hex).unwrap();
            prop_assert_eq!(reparsed.to_hex(), hex);
        }

        #[test]
        fn prop_contrast_is_symmetric(
            a in (channel(), channel(), channel()),
            b in (channel(), channel(), channel()),
        ) {
            let a = Color::new(a.0, a.1, a.2);
            let b = Color::new(b.0, b.1, b.2);
            prop_assert_eq!(a.contrast_ratio(&b), b.contrast_ratio(&a));
        }

        #[test]
        fn prop_self_contrast_is_one(r in channel(), g in channel(), b in channel()) {
            let color = Color::new(r, g, b);
            prop_assert!((color.contrast_ratio(&color) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn prop_contrast_within_wcag_range(
            a in (channel(), channel(), channel()),
            b in (channel(), channel(), channel()),
        ) {
            let ratio = Color::new(a.0, a.1, a.2).contrast_ratio(&Color::new(b.0, b.1, b.2));
            prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio));
        }

        #[test]
        fn prop_any_input_is_clamped(r in any::<f64>(), g in any::<f64>(), b in any::<f64>()) {
            let color = Color::new(r, g, b);
            for c in [color.r(), color.g(), color.b()] {
                prop_assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}
