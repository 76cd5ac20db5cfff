mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Args, Command, Common};
use workspace_palette::generate::{generate_palette_with, regenerate_one_with, GeneratorConfig};
use workspace_palette::preview;
use workspace_palette::{color_distance, contrast_ratio, PaletteEntry};

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Generate { count, common } => {
            let generation =
                generate_palette_with(count, &common.avoid, common.seed, config(&common))?;
            for line in preview::listing(&generation.entries, common.preview) {
                println!("{line}");
            }
        }
        Command::Regenerate {
            batch,
            slot,
            common,
        } => {
            let (entry, _) =
                regenerate_one_with(&batch, slot, &common.avoid, common.seed, config(&common))?;
            if common.preview {
                let current = PaletteEntry::new(batch[slot]);
                println!(
                    "Current:   {} {}",
                    preview::swatch(&current, "COLOR PREVIEW"),
                    current.background()
                );
                println!(
                    "Suggested: {} {}",
                    preview::swatch(&entry, "COLOR PREVIEW"),
                    entry.background()
                );
            } else {
                println!("{} {}", entry.background(), entry.foreground());
            }
        }
        Command::Compare { first, second } => {
            println!("distance {:.2}", color_distance(first, second));
            println!("contrast {:.2}:1", contrast_ratio(first, second));
        }
    }

    Ok(())
}

fn config(common: &Common) -> GeneratorConfig {
    GeneratorConfig {
        retry_factor: common.retry_factor,
    }
}
