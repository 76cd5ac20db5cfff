use std::str::FromStr;

use anyhow::{bail, Result};
use palette::convert::FromColorUnclamped;
use palette::{IntoColor, Lab, Srgb};

/// Slack allowed on a linear-to-sRGB channel before it counts as out of
/// gamut. Anything inside still rounds to a valid byte.
const GAMUT_EPSILON: f32 = 1e-3;

pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
pub const WHITE: Color = Color {
    r: 255,
    g: 255,
    b: 255,
};

/// Core color type used by the generator.
/// Wraps sRGB u8 components; the CIELAB triple and luminance are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `#FF8800` or `ff8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            bail!("invalid hex color: expected 6 hex digits, got {hex:?}");
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to CIELAB (D65 white point).
    ///
    /// sRGB bytes are linearized with the standard sRGB curve, mapped to XYZ
    /// and then to L*a*b*. The linear segment of the Lab transform keeps this
    /// finite for black.
    pub fn to_lab(self) -> Lab {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Create from CIELAB, clamping each channel into [0, 255].
    pub fn from_lab(lab: Lab) -> Self {
        Self::from_srgb_f32_clamped(Srgb::from_color_unclamped(lab))
    }

    /// Create from CIELAB, or `None` if the point lies outside the sRGB gamut.
    pub fn try_from_lab(lab: Lab) -> Option<Self> {
        let srgb: Srgb<f32> = Srgb::from_color_unclamped(lab);
        channels_in_gamut(&srgb).then(|| Self::from_srgb_f32_clamped(srgb))
    }

    /// Clamp an Srgb<f32> to [0, 1] and convert to Color.
    fn from_srgb_f32_clamped(srgb: Srgb<f32>) -> Self {
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b }
    }

    /// WCAG 2.0 relative luminance.
    ///
    /// Linearizes each sRGB channel, then computes the weighted sum.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG 2.0 contrast ratio between two colors.
    ///
    /// Returns a value in [1, 21]. Higher means more contrast.
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Euclidean distance between two colors in CIELAB (CIE76 ΔE).
    pub fn distance(c1: &Color, c2: &Color) -> f32 {
        lab_distance(c1.to_lab(), c2.to_lab())
    }
}

/// Euclidean distance between two CIELAB points.
pub fn lab_distance(lab1: Lab, lab2: Lab) -> f32 {
    ((lab1.l - lab2.l).powi(2) + (lab1.a - lab2.a).powi(2) + (lab1.b - lab2.b).powi(2)).sqrt()
}

/// Whether a CIELAB point maps back into 24-bit sRGB without clamping.
///
/// Non-finite input is never in gamut.
pub fn is_in_gamut(lab: Lab) -> bool {
    channels_in_gamut(&Srgb::from_color_unclamped(lab))
}

/// Map a CIELAB point to the nearest representable color by channel clamping.
pub fn clamp_to_gamut(lab: Lab) -> Color {
    Color::from_lab(lab)
}

fn channels_in_gamut(srgb: &Srgb<f32>) -> bool {
    [srgb.red, srgb.green, srgb.blue]
        .iter()
        .all(|c| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(c))
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
