//! Palette generation: distinct backgrounds, each paired with a legible
//! black or white foreground.

pub mod candidate;
pub mod policy;

use anyhow::{bail, Result};
use palette::Lab;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::color::{clamp_to_gamut, Color, BLACK, WHITE};
use candidate::{Band, Sampler};
use policy::Policy;

/// Per-slot retry budget, as a multiple of the palette size.
pub const DEFAULT_RETRY_FACTOR: usize = 20;
/// Extra draws allowed once the budget is spent without a single usable
/// candidate. After these, draws are clamped into gamut; a clamp that
/// repeats a peer is skipped for up to the same number of draws again.
pub const FALLBACK_ATTEMPTS: usize = 256;

/// A background with the foreground chosen for it.
///
/// The foreground is fixed at construction: whichever of black or white
/// contrasts more with the background, black on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    background: Color,
    foreground: Color,
}

impl PaletteEntry {
    pub fn new(background: Color) -> Self {
        let on_black = Color::contrast_ratio(&background, &BLACK);
        let on_white = Color::contrast_ratio(&background, &WHITE);
        let foreground = if on_white > on_black { WHITE } else { BLACK };
        Self {
            background,
            foreground,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Contrast ratio between the foreground and the background.
    pub fn contrast(&self) -> f32 {
        Color::contrast_ratio(&self.background, &self.foreground)
    }
}

/// Tunables threaded through every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Per-slot candidate budget is `retry_factor * count`. Zero accepts
    /// the first usable candidate of every slot.
    pub retry_factor: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            retry_factor: DEFAULT_RETRY_FACTOR,
        }
    }
}

impl GeneratorConfig {
    fn budget(&self, count: usize) -> usize {
        self.retry_factor.saturating_mul(count)
    }
}

/// Output of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub policy: Policy,
    pub entries: Vec<PaletteEntry>,
    /// Slots filled with the best candidate seen rather than one that met
    /// the policy threshold.
    pub degraded: Vec<usize>,
}

impl Generation {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    pub fn backgrounds(&self) -> Vec<Color> {
        self.entries.iter().map(PaletteEntry::background).collect()
    }
}

/// Generate `count` entries that stay clear of each other and of `avoid`,
/// with the default retry budget.
pub fn generate_palette(count: usize, avoid: &[Color], seed: u64) -> Result<Vec<PaletteEntry>> {
    Ok(generate_palette_with(count, avoid, seed, GeneratorConfig::default())?.entries)
}

/// Generate `count` entries with an explicit configuration.
///
/// Fails only on `count == 0`. Otherwise exactly `count` entries come back;
/// slots where the policy threshold could not be met within the budget are
/// listed in [`Generation::degraded`].
pub fn generate_palette_with(
    count: usize,
    avoid: &[Color],
    seed: u64,
    config: GeneratorConfig,
) -> Result<Generation> {
    if count == 0 {
        bail!("palette size must be at least 1");
    }

    let policy = Policy::for_count(count);
    let budget = config.budget(count);
    let mut rng = StdRng::seed_from_u64(seed);
    let hue_base = u64::from(rng.gen::<u32>());
    let mut bands: Vec<usize> = (0..count).collect();
    bands.shuffle(&mut rng);

    let mut peers = avoid.to_vec();
    let mut entries = Vec::with_capacity(count);
    let mut degraded = Vec::new();

    for (slot, &band) in bands.iter().enumerate() {
        let sampler = Sampler {
            policy,
            count,
            slot,
            hue_base,
            band: matches!(policy, Policy::PairwiseContrast).then_some(Band {
                index: band,
                of: count,
            }),
            budget,
        };
        let fill = fill_slot(&sampler, &peers, &mut rng);
        if !fill.met {
            degraded.push(slot);
        }
        peers.push(fill.color);
        entries.push(PaletteEntry::new(fill.color));
    }

    info!(
        ?policy,
        count,
        seed,
        degraded = degraded.len(),
        "generated palette"
    );
    if !degraded.is_empty() {
        warn!(
            "only {} of {count} colors met the {policy:?} threshold; the rest are best effort",
            count - degraded.len()
        );
    }

    Ok(Generation {
        policy,
        entries,
        degraded,
    })
}

/// Replace the entry at `slot` of `batch` with the default retry budget.
pub fn regenerate_one(
    batch: &[Color],
    slot: usize,
    avoid: &[Color],
    seed: u64,
) -> Result<PaletteEntry> {
    Ok(regenerate_one_with(batch, slot, avoid, seed, GeneratorConfig::default())?.0)
}

/// Replace the entry at `slot` of `batch`.
///
/// Every other background in `batch` joins `avoid` for this slot. The
/// policy is the one a batch of this size was generated with. The flag is
/// `true` when the replacement met the policy threshold.
pub fn regenerate_one_with(
    batch: &[Color],
    slot: usize,
    avoid: &[Color],
    seed: u64,
    config: GeneratorConfig,
) -> Result<(PaletteEntry, bool)> {
    if slot >= batch.len() {
        bail!(
            "slot {slot} out of range for a batch of {} colors",
            batch.len()
        );
    }

    let count = batch.len();
    let policy = Policy::for_count(count);
    let mut rng = StdRng::seed_from_u64(seed);
    let hue_base = u64::from(rng.gen::<u32>());

    let mut peers = avoid.to_vec();
    peers.extend(
        batch
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != slot)
            .map(|(_, c)| *c),
    );

    let sampler = Sampler {
        policy,
        count,
        slot,
        hue_base,
        band: None,
        budget: config.budget(count),
    };
    let fill = fill_slot(&sampler, &peers, &mut rng);
    if !fill.met {
        warn!(slot, color = %fill.color, "regenerated color is best effort");
    }
    Ok((PaletteEntry::new(fill.color), fill.met))
}

struct SlotFill {
    color: Color,
    met: bool,
}

/// Run the acceptance loop for one slot.
///
/// Candidates that are out of gamut or repeat a peer are discarded. The
/// first candidate (or, for pooled policies, the best of a pool) whose
/// score reaches 1.0 is accepted. Once the budget is spent the best
/// candidate seen so far is taken; ties keep the earlier candidate.
fn fill_slot(sampler: &Sampler, peers: &[Color], rng: &mut StdRng) -> SlotFill {
    let policy = sampler.policy;
    let mut best: Option<(Color, f32)> = None;
    let mut pool_best: Option<(Color, f32)> = None;
    let mut pooled = 0;
    let mut attempt = 0;

    loop {
        if attempt >= sampler.budget {
            if let Some((color, score)) = best {
                debug!(slot = sampler.slot, %color, score, attempt, "budget spent");
                return SlotFill {
                    color,
                    met: score >= 1.0,
                };
            }
        }

        let lab = sampler.candidate(attempt, rng);
        attempt += 1;

        let fallback_from = sampler.budget.saturating_add(FALLBACK_ATTEMPTS);
        if attempt > fallback_from {
            let last = attempt > fallback_from.saturating_add(FALLBACK_ATTEMPTS);
            if let Some(color) = clamped_fallback(lab, peers, last) {
                debug!(slot = sampler.slot, %color, attempt, "clamped into gamut");
                return SlotFill { color, met: false };
            }
            continue;
        }

        let Some(color) = Color::try_from_lab(lab) else {
            continue;
        };
        if peers.contains(&color) {
            continue;
        }

        let score = policy.score(&color, peers);
        keep_better(&mut best, color, score);
        keep_better(&mut pool_best, color, score);
        pooled += 1;

        if pooled == policy.pool_size() {
            if let Some((color, score)) = pool_best.take() {
                if score >= 1.0 {
                    debug!(slot = sampler.slot, %color, score, attempt, "accepted");
                    return SlotFill { color, met: true };
                }
            }
            pooled = 0;
        }
    }
}

/// Clamp a last-resort draw into gamut. A clamp that repeats a peer is
/// refused unless this is the `last` draw the slot gets.
fn clamped_fallback(lab: Lab, peers: &[Color], last: bool) -> Option<Color> {
    let color = clamp_to_gamut(lab);
    (last || !peers.contains(&color)).then_some(color)
}

/// Replace `best` only on a strictly higher score, so the earliest of
/// equally scored candidates wins.
fn keep_better(best: &mut Option<(Color, f32)>, color: Color, score: f32) {
    if best.map_or(true, |(_, s)| score > s) {
        *best = Some((color, score));
    }
}
