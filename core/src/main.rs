//! Command-line front end for quick segmentation checks.
//!
//! `syllabe segment beaucoup chocolat` prints one segmentation per word;
//! `syllabe classify "Le chat dort."` classifies every unique word of the
//! given fragments.

use anyhow::Result;
use clap::{Parser, Subcommand};
use libsyllabe_core::{Classification, Classifier, Config, Syllabifier};

#[derive(Parser)]
#[command(name = "syllabe", about = "French syllabification engine", version)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split each word into syllables.
    Segment {
        /// Words to segment.
        words: Vec<String>,
    },
    /// Classify every unique word of the given text fragments.
    Classify {
        /// Text fragments (quoted sentences or bare words).
        fragments: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_toml(path).map_err(|e| anyhow::anyhow!("{e}"))?,
        None => Config::default(),
    };

    match cli.command {
        Command::Segment { words } => {
            let syllabifier = Syllabifier::new(&config);
            for word in &words {
                println!("{word}: {}", syllabifier.syllabify(word));
            }
        }
        Command::Classify { fragments } => {
            let classifier = Classifier::new(&config);
            let summary = classifier.classify_batch(&fragments);
            for entry in &summary.unique_words {
                let tag = match entry.classification {
                    Classification::Monosyllable => "mono",
                    Classification::Multisyllable => "multi",
                };
                println!("{} [{}]: {}", entry.word.surface(), tag, entry.sequence);
            }
        }
    }

    Ok(())
}
