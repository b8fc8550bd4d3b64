//! libsyllabe-core
//!
//! Rule-based French syllabification and lexical classification, the pure
//! half of the libsyllabe engine. Everything in this crate is a stateless,
//! total computation: no persistence, no locks, safe to call concurrently.
//!
//! Public API:
//! - `normalize_key` / `Word` - normalization keys and surface forms
//! - `Syllabifier` / `SyllableSequence` - rule-based segmentation
//! - `classify` / `Classifier` / `BatchSummary` - lexical classification
//! - `Config` - tunable thresholds, TOML-backed
//!
//! Record-backed resolution (global corrections, learner records, the review
//! state machine) lives in the companion `libsyllabe-revision` crate.

use serde::{Deserialize, Serialize};

pub mod normalizer;
pub use normalizer::{normalize_key, Word};

pub mod rules;

pub mod syllabifier;
pub use syllabifier::{SyllableSequence, Syllabifier};

pub mod classifier;
pub use classifier::{classify, BatchSummary, Classification, ClassifiedWord, Classifier};

/// Engine thresholds.
///
/// The letter tables (exceptions, clusters, hiatus pairs) are static and not
/// configurable; these knobs only tune how conservative the splitter and the
/// batch resolver are.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Words of at most this many characters are never split.
    pub short_word_max_len: usize,

    /// Words with fewer vowels than this are never split.
    pub min_vowels_to_split: usize,

    /// Merge 1-letter syllables into a neighbor after scanning.
    pub merge_single_letter_syllables: bool,

    /// Minimum number of resolved words a batch must reach before the
    /// resolver stops pulling extra record stages and falls back to the
    /// algorithm for the remainder.
    pub min_resolved_batch: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            short_word_max_len: 4,
            min_vowels_to_split: 2,
            merge_single_letter_syllables: true,
            min_resolved_batch: 10,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
