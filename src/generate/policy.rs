//! Distinctness policy, chosen once per request from the palette size.

use crate::color::Color;
use crate::generate::PaletteEntry;

/// Largest palette judged on pairwise contrast between its own colors.
pub const PAIRWISE_MAX_COUNT: usize = 5;
/// Largest palette judged on text legibility.
pub const TEXT_MAX_COUNT: usize = 10;

pub const PAIRWISE_MIN_CONTRAST: f32 = 1.5;
/// ΔE kept between backgrounds of a pairwise-contrast palette, so two
/// colors that differ only in lightness are still told apart by hue.
pub const PAIRWISE_MIN_DISTANCE: f32 = 30.0;
pub const TEXT_MIN_CONTRAST: f32 = 4.5;
/// ΔE kept between backgrounds of a text-legibility palette.
pub const TEXT_MIN_DISTANCE: f32 = 20.0;
/// Spread threshold for the smallest spread palette; shrinks by one per extra color.
pub const SPREAD_MAX_DISTANCE: f32 = 30.0;
pub const SPREAD_MIN_DISTANCE: f32 = 10.0;

/// How many in-gamut candidates a spread slot compares before picking one.
const SPREAD_POOL: usize = 8;

/// The objective a palette of a given size is optimised for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Every pair of backgrounds differs in luminance by at least
    /// [`PAIRWISE_MIN_CONTRAST`] and sits [`PAIRWISE_MIN_DISTANCE`] apart.
    PairwiseContrast,
    /// Every background carries its foreground at [`TEXT_MIN_CONTRAST`] or
    /// better and stays [`TEXT_MIN_DISTANCE`] away from its peers.
    TextLegibility,
    /// Backgrounds are pushed apart in CIELAB; `min_distance` is the ΔE a
    /// candidate must clear to be accepted without degradation.
    PerceptualSpread { min_distance: f32 },
}

impl Policy {
    /// Select the policy for a palette of `count` colors.
    pub fn for_count(count: usize) -> Self {
        if count <= PAIRWISE_MAX_COUNT {
            Self::PairwiseContrast
        } else if count <= TEXT_MAX_COUNT {
            Self::TextLegibility
        } else {
            let extra = (count - TEXT_MAX_COUNT) as f32;
            Self::PerceptualSpread {
                min_distance: (SPREAD_MAX_DISTANCE - extra).max(SPREAD_MIN_DISTANCE),
            }
        }
    }

    /// Score `candidate` against every color it has to stay clear of.
    ///
    /// The score is normalised by the policy threshold: `>= 1.0` means the
    /// candidate is acceptable, and larger is better. With no peers the
    /// score is unbounded for the peer-relative objectives.
    pub fn score(&self, candidate: &Color, peers: &[Color]) -> f32 {
        match *self {
            Self::PairwiseContrast => {
                let contrast =
                    min_over(peers, |p| Color::contrast_ratio(candidate, p)) / PAIRWISE_MIN_CONTRAST;
                let spread = min_over(peers, |p| Color::distance(candidate, p)) / PAIRWISE_MIN_DISTANCE;
                contrast.min(spread)
            }
            Self::TextLegibility => {
                let text = PaletteEntry::new(*candidate).contrast() / TEXT_MIN_CONTRAST;
                let spread = min_over(peers, |p| Color::distance(candidate, p)) / TEXT_MIN_DISTANCE;
                text.min(spread)
            }
            Self::PerceptualSpread { min_distance } => {
                min_over(peers, |p| Color::distance(candidate, p)) / min_distance
            }
        }
    }

    /// Number of in-gamut candidates compared before the best of them is
    /// accepted. Only the spread objective maximises; the others take the
    /// first candidate that clears the threshold.
    pub fn pool_size(&self) -> usize {
        match self {
            Self::PerceptualSpread { .. } => SPREAD_POOL,
            _ => 1,
        }
    }
}

fn min_over(peers: &[Color], metric: impl Fn(&Color) -> f32) -> f32 {
    peers.iter().map(metric).fold(f32::INFINITY, f32::min)
}
