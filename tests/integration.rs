use std::collections::HashSet;
use std::path::PathBuf;

use workspace_palette::color::{Color, BLACK, WHITE};
use workspace_palette::generate::policy::{
    Policy, PAIRWISE_MIN_CONTRAST, PAIRWISE_MIN_DISTANCE, TEXT_MIN_CONTRAST,
};
use workspace_palette::generate::{
    generate_palette, generate_palette_with, regenerate_one, GeneratorConfig, PaletteEntry,
};
use workspace_palette::preview::listing;
use workspace_palette::{color_distance, contrast_ratio};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn snapshot_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

fn backgrounds(entries: &[PaletteEntry]) -> Vec<Color> {
    entries.iter().map(PaletteEntry::background).collect()
}

/// Serialize a palette the way the CLI prints it, without escapes.
fn render(count: usize, seed: u64) -> String {
    let entries = generate_palette(count, &[], seed).unwrap();
    listing(&entries, false).join("\n") + "\n"
}

// ---------------------------------------------------------------------------
// Snapshot tests
// ---------------------------------------------------------------------------

/// Generate or verify a snapshot for a given palette request.
fn snapshot_test(count: usize, seed: u64) {
    let output = render(count, seed);

    let snap_dir = snapshot_dir();
    std::fs::create_dir_all(&snap_dir).unwrap();
    let snap_path = snap_dir.join(format!("palette_{count}_seed_{seed}.snap"));

    if std::env::var("UPDATE_SNAPSHOTS").is_ok() || !snap_path.exists() {
        std::fs::write(&snap_path, &output).unwrap();
        return;
    }

    let expected = std::fs::read_to_string(&snap_path).unwrap();
    assert_eq!(
        output, expected,
        "snapshot mismatch for {count} colors, seed {seed}. Run with UPDATE_SNAPSHOTS=1 to update."
    );
}

#[test]
fn snapshot_small_palette() {
    snapshot_test(4, 42);
}

#[test]
fn snapshot_medium_palette() {
    snapshot_test(8, 42);
}

#[test]
fn snapshot_large_palette() {
    snapshot_test(24, 42);
}

// ---------------------------------------------------------------------------
// Generation properties
// ---------------------------------------------------------------------------

#[test]
fn returns_exactly_the_requested_count() {
    for count in [1, 2, 5, 6, 10, 11, 20, 40] {
        let entries = generate_palette(count, &[], 1).unwrap();
        assert_eq!(entries.len(), count, "wrong length for {count}");
    }
}

#[test]
fn foregrounds_are_black_or_white() {
    for entry in generate_palette(30, &[], 5).unwrap() {
        let fg = entry.foreground();
        assert!(fg == BLACK || fg == WHITE, "unexpected foreground {fg}");
    }
}

#[test]
fn backgrounds_are_unique() {
    for count in [5, 10, 40] {
        let bgs = backgrounds(&generate_palette(count, &[], 8).unwrap());
        let unique: HashSet<_> = bgs.iter().collect();
        assert_eq!(unique.len(), count, "duplicate background in {bgs:?}");
    }
}

#[test]
fn small_palettes_keep_contrast_and_distance() {
    for count in 2..=5 {
        for seed in 0..20 {
            let bgs = backgrounds(&generate_palette(count, &[], seed).unwrap());
            for (i, a) in bgs.iter().enumerate() {
                for b in &bgs[i + 1..] {
                    let ratio = Color::contrast_ratio(a, b);
                    assert!(
                        ratio >= PAIRWISE_MIN_CONTRAST,
                        "{count} colors, seed {seed}: {a} vs {b} only {ratio:.2}:1"
                    );
                    let d = Color::distance(a, b);
                    assert!(
                        d >= PAIRWISE_MIN_DISTANCE,
                        "{count} colors, seed {seed}: {a} vs {b} only {d:.1} apart"
                    );
                }
            }
        }
    }
}

#[test]
fn zero_budget_small_palette_stays_close_to_threshold() {
    // Without retries a slot may be best effort; the band layout still
    // keeps pairs near the threshold.
    let config = GeneratorConfig { retry_factor: 0 };
    let generation = generate_palette_with(5, &[], 3, config).unwrap();
    assert_eq!(generation.entries.len(), 5);
    let bgs = generation.backgrounds();
    for (i, a) in bgs.iter().enumerate() {
        for b in &bgs[i + 1..] {
            let ratio = Color::contrast_ratio(a, b);
            assert!(ratio >= 1.4, "{a} vs {b} only {ratio:.2}:1");
        }
    }
}

#[test]
fn medium_palettes_are_legible() {
    for seed in 0..10 {
        let entries = generate_palette(8, &[], seed).unwrap();
        for entry in &entries {
            assert!(
                entry.contrast() >= TEXT_MIN_CONTRAST,
                "seed {seed}: {} on {} only {:.2}:1",
                entry.foreground(),
                entry.background(),
                entry.contrast()
            );
        }
    }
}

#[test]
fn large_palettes_report_their_spread() {
    let generation = generate_palette_with(20, &[], 4, GeneratorConfig::default()).unwrap();
    let Policy::PerceptualSpread { min_distance } = generation.policy else {
        panic!("20 colors should use the spread policy");
    };
    let bgs = generation.backgrounds();
    for (i, a) in bgs.iter().enumerate() {
        for (j, b) in bgs.iter().enumerate().skip(i + 1) {
            let d = Color::distance(a, b);
            if !generation.degraded.contains(&j) {
                assert!(
                    d >= min_distance,
                    "slot {j} met the threshold but sits {d:.1} from slot {i}"
                );
            }
        }
    }
}

#[test]
fn avoid_set_is_respected() {
    let red = Color::new(255, 0, 0);
    for seed in 0..10 {
        let bgs = backgrounds(&generate_palette(5, &[red], seed).unwrap());
        assert!(!bgs.contains(&red), "seed {seed} returned an avoided color");
    }
}

#[test]
fn same_seed_same_palette() {
    let avoid = [Color::new(10, 120, 200)];
    for count in [3, 7, 15] {
        let a = generate_palette(count, &avoid, 99).unwrap();
        let b = generate_palette(count, &avoid, 99).unwrap();
        assert_eq!(a, b, "{count} colors not deterministic");
    }
}

#[test]
fn different_seed_different_palette() {
    for count in [3, 7, 15] {
        let a = generate_palette(count, &[], 1).unwrap();
        let b = generate_palette(count, &[], 2).unwrap();
        assert_ne!(a, b, "{count} colors identical across seeds");
    }
}

// ---------------------------------------------------------------------------
// Regeneration
// ---------------------------------------------------------------------------

#[test]
fn regenerate_single_color_moves_away() {
    let old = Color::new(29, 120, 35);
    let entry = regenerate_one(&[old], 0, &[old], 7).unwrap();
    assert_ne!(entry.background(), old);
}

#[test]
fn regenerate_avoids_the_rest_of_the_batch() {
    for count in [4, 8, 16] {
        let batch = backgrounds(&generate_palette(count, &[], 21).unwrap());
        for slot in 0..count {
            let entry = regenerate_one(&batch, slot, &[], 1000 + slot as u64).unwrap();
            for (i, other) in batch.iter().enumerate() {
                if i != slot {
                    assert_ne!(
                        entry.background(),
                        *other,
                        "slot {slot} of {count} reintroduced {other}"
                    );
                }
            }
        }
    }
}

#[test]
fn regenerate_with_new_seed_changes_the_color() {
    let batch = backgrounds(&generate_palette(6, &[], 3).unwrap());
    let a = regenerate_one(&batch, 2, &[], 1).unwrap();
    let b = regenerate_one(&batch, 2, &[], 2).unwrap();
    assert_ne!(a, b);
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[test]
fn metrics_are_reflexive_and_symmetric() {
    let samples = [
        Color::new(29, 120, 35),
        Color::new(255, 0, 0),
        Color::new(12, 34, 56),
        BLACK,
        WHITE,
    ];
    for a in samples {
        assert_eq!(color_distance(a, a), 0.0);
        assert_eq!(contrast_ratio(a, a), 1.0);
        for b in samples {
            assert_eq!(color_distance(a, b), color_distance(b, a));
            assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
            assert!(contrast_ratio(a, b) >= 1.0);
        }
    }
}

#[test]
fn foreground_for_extremes() {
    assert_eq!(PaletteEntry::new(BLACK).foreground(), WHITE);
    assert_eq!(PaletteEntry::new(WHITE).foreground(), BLACK);
}

#[test]
fn zero_count_is_a_contract_violation() {
    assert!(generate_palette(0, &[], 0).is_err());
}
