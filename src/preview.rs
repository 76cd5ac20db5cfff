use crossterm::style::{Color as TermColor, Stylize};

use crate::color::Color;
use crate::generate::PaletteEntry;

fn to_term(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// A true-color swatch: `label` in the entry's foreground on its background.
pub fn swatch(entry: &PaletteEntry, label: &str) -> String {
    format!("  {label}  ")
        .with(to_term(entry.foreground()))
        .on(to_term(entry.background()))
        .to_string()
}

/// One listing line per entry, numbered from 1 like `Color 01`.
///
/// With `colored` off the swatch is replaced by the bare name so the
/// output stays plain text.
pub fn listing(entries: &[PaletteEntry], colored: bool) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let name = format!("Color {:02}", i + 1);
            let label = if colored {
                swatch(entry, &name)
            } else {
                name
            };
            format!(
                "{label} {} {} {:.2}:1",
                entry.background(),
                entry.foreground(),
                entry.contrast()
            )
        })
        .collect()
}
