//! Command line options.

use crate::import::LoadOptions;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Flashcard trainer for word/translation decks", long_about = None)]
pub struct Config {
    /// Path to the deck file, one `term,translation` pair per line.
    #[arg(default_value = "dict.csv")]
    pub deck: PathBuf,

    /// Field separator used in the deck file.
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Seed for shuffling, for reproducible card order.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show the first round in file order instead of shuffling it.
    #[arg(long)]
    pub in_order: bool,
}

impl Config {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    let value = if value == "\\t" { "\t" } else { value };
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("delimiter must be a single ASCII character, got '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["card-trainer"]);

        assert_eq!(config.deck, PathBuf::from("dict.csv"));
        assert_eq!(config.delimiter, b',');
        assert_eq!(config.seed, None);
        assert!(!config.in_order);
    }

    #[test]
    fn test_all_options() {
        let config = Config::parse_from([
            "card-trainer",
            "words.tsv",
            "--delimiter",
            "\\t",
            "--seed",
            "5",
            "--in-order",
        ]);

        assert_eq!(config.deck, PathBuf::from("words.tsv"));
        assert_eq!(config.load_options().delimiter, b'\t');
        assert_eq!(config.seed, Some(5));
        assert!(config.in_order);
    }

    #[test]
    fn test_rejects_multi_char_delimiter() {
        let result = Config::try_parse_from(["card-trainer", "--delimiter", ";;"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = Config::parse_from(["card-trainer", "--seed", "9"]);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();

        assert_eq!(a, b);
    }
}
