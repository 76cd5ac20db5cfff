//! Perceptually distinct color palettes for tinting workspaces.
//!
//! [`color`] holds the CIELAB and WCAG metrics; [`generate`] builds palettes
//! of backgrounds that stay apart from each other and from colors already
//! in use, each paired with a black or white foreground.

pub mod color;
pub mod generate;
pub mod preview;

pub use color::Color;
pub use generate::{
    generate_palette, generate_palette_with, regenerate_one, regenerate_one_with, Generation,
    GeneratorConfig, PaletteEntry,
};

/// CIELAB ΔE between two colors, for side-by-side comparisons.
pub fn color_distance(a: Color, b: Color) -> f32 {
    Color::distance(&a, &b)
}

/// WCAG contrast ratio between two colors, for side-by-side comparisons.
pub fn contrast_ratio(a: Color, b: Color) -> f32 {
    Color::contrast_ratio(&a, &b)
}
