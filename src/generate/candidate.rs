//! Candidate sampling in CIELAB.
//!
//! Hue comes from a golden-ratio sequence indexed by slot and attempt, so any
//! prefix of a palette is already spread around the wheel. Lightness and
//! chroma are drawn per policy.

use palette::convert::FromColorUnclamped;
use palette::{Lab, Lch};
use rand::Rng;

use crate::generate::policy::Policy;

/// Fractional part of the golden ratio.
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

/// Lightness window for text and spread palettes.
pub const LIGHTNESS_RANGE: (f32, f32) = (20.0, 90.0);
/// Chroma window before the lightness-dependent cap.
pub const CHROMA_RANGE: (f32, f32) = (30.0, 128.0);

/// Widths of the dark and light bands text palettes are pulled into.
const EXTREME_BAND: f32 = 20.0;
/// Probability a text-palette candidate is drawn from an extreme band.
const EXTREME_BIAS: f64 = 0.6;
/// Fraction of the lower chroma range skipped for contrast palettes.
const CHROMA_BIAS: f32 = 0.25;
/// Half-width of the random jitter inside a luminance band, as a fraction
/// of the band width.
const BAND_JITTER: f32 = 0.1;
/// `(1.0 + 0.05) / (0.0 + 0.05)`: the contrast of white on black.
const MAX_CONTRAST: f32 = 21.0;

/// Hue in degrees for the `index`-th element of the golden-ratio sequence.
pub fn golden_hue(index: u64) -> f32 {
    let turn = (index as f64 * GOLDEN_RATIO_CONJUGATE).fract();
    (turn * 360.0) as f32
}

/// CIE L* for a relative luminance (CIE Y normalised to the white point).
pub fn lightness_for_luminance(y: f32) -> f32 {
    let y = y.clamp(0.0, 1.0);
    if y > 216.0 / 24389.0 {
        116.0 * y.cbrt() - 16.0
    } else {
        y * 24389.0 / 27.0
    }
}

/// Upper chroma for a given lightness: full range around L* 55, tapering
/// to zero at the ends of the lightness axis.
pub fn chroma_cap(lightness: f32) -> f32 {
    let (_, max) = CHROMA_RANGE;
    (max * (1.0 - (lightness - 55.0).abs() / 45.0)).clamp(0.0, max)
}

/// One slot of a stratified luminance ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub index: usize,
    pub of: usize,
}

/// Produces candidates for a single slot.
#[derive(Debug, Clone)]
pub struct Sampler {
    pub policy: Policy,
    /// Size of the batch the slot belongs to.
    pub count: usize,
    pub slot: usize,
    /// Seed-derived offset into the golden-ratio sequence.
    pub hue_base: u64,
    /// Luminance band for contrast palettes. Dropped after half the budget,
    /// kept throughout when the budget is zero.
    pub band: Option<Band>,
    pub budget: usize,
}

impl Sampler {
    /// Golden-ratio index of candidate `attempt`. First attempts of
    /// consecutive slots are consecutive in the sequence.
    pub fn hue_index(&self, attempt: usize) -> u64 {
        self.hue_base
            .wrapping_add((attempt as u64).wrapping_mul(self.count as u64))
            .wrapping_add(self.slot as u64)
    }

    /// Draw candidate `attempt`. The result may be out of gamut.
    pub fn candidate<R: Rng>(&self, attempt: usize, rng: &mut R) -> Lab {
        let hue = golden_hue(self.hue_index(attempt));
        let lightness = self.lightness(attempt, rng);
        let cap = chroma_cap(lightness);
        let floor = CHROMA_RANGE.0.min(cap);
        let chroma = match self.policy {
            Policy::PairwiseContrast => {
                rng.gen_range(floor + (cap - floor) * CHROMA_BIAS..=cap)
            }
            _ => rng.gen_range(floor..=cap),
        };
        let lch: Lch = Lch::new(lightness, chroma, hue);
        Lab::from_color_unclamped(lch)
    }

    fn lightness<R: Rng>(&self, attempt: usize, rng: &mut R) -> f32 {
        let (low, high) = LIGHTNESS_RANGE;
        match self.policy {
            Policy::PairwiseContrast => {
                // Sampling is uniform in log(Y + 0.05), the axis contrast
                // ratios are measured on; this favours darker colors.
                let span = MAX_CONTRAST.ln();
                let log_ratio = match self.band {
                    Some(band) if self.budget == 0 || attempt * 2 < self.budget => {
                        let width = span / band.of as f32;
                        let jitter = rng.gen_range(-BAND_JITTER..=BAND_JITTER);
                        (band.index as f32 + 0.5 + jitter) * width
                    }
                    _ => rng.gen_range(0.0..=span),
                };
                lightness_for_luminance(0.05 * log_ratio.exp() - 0.05)
            }
            Policy::TextLegibility => {
                if rng.gen_bool(EXTREME_BIAS) {
                    if rng.gen_bool(0.5) {
                        rng.gen_range(low..=low + EXTREME_BAND)
                    } else {
                        rng.gen_range(high - EXTREME_BAND..=high)
                    }
                } else {
                    rng.gen_range(low..=high)
                }
            }
            Policy::PerceptualSpread { .. } => rng.gen_range(low..=high),
        }
    }
}
