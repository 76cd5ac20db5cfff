use clap::{Args as ClapArgs, Parser, Subcommand};

use workspace_palette::color::Color;
use workspace_palette::generate::DEFAULT_RETRY_FACTOR;

/// Generate perceptually distinct workspace colors.
#[derive(Parser, Debug)]
#[command(name = "workspace-palette", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log generation summaries
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log every accepted candidate
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a fresh palette
    Generate {
        /// Number of colors
        #[arg(short = 'n', long, default_value_t = 40)]
        count: usize,

        #[command(flatten)]
        common: Common,
    },
    /// Replace one color of an existing palette
    Regenerate {
        /// Current backgrounds, in order
        #[arg(required = true)]
        batch: Vec<Color>,

        /// Zero-based index of the color to replace
        #[arg(short, long)]
        slot: usize,

        #[command(flatten)]
        common: Common,
    },
    /// Print distance and contrast between two colors
    Compare { first: Color, second: Color },
}

#[derive(ClapArgs, Debug)]
pub struct Common {
    /// Variation seed; change it to get a different valid palette
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Colors already in use (repeatable)
    #[arg(short, long)]
    pub avoid: Vec<Color>,

    /// Per-slot candidate budget, as a multiple of the palette size
    #[arg(long, default_value_t = DEFAULT_RETRY_FACTOR)]
    pub retry_factor: usize,

    /// Print colored swatches
    #[arg(long)]
    pub preview: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_avoid_list() {
        let args = Args::try_parse_from([
            "workspace-palette",
            "generate",
            "-n",
            "5",
            "--avoid",
            "#ff0000",
            "--avoid",
            "00ff00",
            "--seed",
            "3",
        ])
        .unwrap();
        match args.command {
            Command::Generate { count, common } => {
                assert_eq!(count, 5);
                assert_eq!(common.seed, 3);
                assert_eq!(
                    common.avoid,
                    vec![Color::new(255, 0, 0), Color::new(0, 255, 0)]
                );
                assert_eq!(common.retry_factor, DEFAULT_RETRY_FACTOR);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Args::try_parse_from(["workspace-palette", "compare", "#12345", "#000000"]).is_err());
    }

    #[test]
    fn regenerate_requires_a_batch() {
        assert!(Args::try_parse_from(["workspace-palette", "regenerate", "--slot", "0"]).is_err());
    }
}
