//! Monosyllable/multisyllable classification and batch processing.
//!
//! `classify` is a trivial projection of the syllable count. The interesting
//! part is `classify_batch`: it turns raw text fragments into a deduplicated
//! set of classified words, applying the tokenization rules learners' texts
//! need (punctuation trimming, elision stripping).

use serde::{Deserialize, Serialize};

use crate::normalizer::Word;
use crate::rules::ELISION_PREFIXES;
use crate::syllabifier::{SyllableSequence, Syllabifier};
use crate::Config;

/// Lexical class of a word, derived from its segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Monosyllable,
    Multisyllable,
}

/// Derive the classification from a segmentation. Total, O(1).
pub fn classify(sequence: &SyllableSequence) -> Classification {
    if sequence.is_monosyllable() {
        Classification::Monosyllable
    } else {
        Classification::Multisyllable
    }
}

/// One unique word out of a batch, with its segmentation and class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedWord {
    pub word: Word,
    pub sequence: SyllableSequence,
    pub classification: Classification,
}

/// Result of classifying a batch of text fragments.
///
/// `unique_words` keeps first-occurrence order; the *set* of words (by
/// normalization key) does not depend on fragment order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub unique_words: Vec<ClassifiedWord>,
}

impl BatchSummary {
    pub fn monosyllables(&self) -> impl Iterator<Item = &ClassifiedWord> {
        self.unique_words
            .iter()
            .filter(|w| w.classification == Classification::Monosyllable)
    }

    pub fn multisyllables(&self) -> impl Iterator<Item = &ClassifiedWord> {
        self.unique_words
            .iter()
            .filter(|w| w.classification == Classification::Multisyllable)
    }
}

/// Batch classifier wrapping a [`Syllabifier`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    syllabifier: Syllabifier,
}

impl Classifier {
    pub fn new(config: &Config) -> Self {
        Self {
            syllabifier: Syllabifier::new(config),
        }
    }

    /// Classify one word.
    pub fn classify_word(&self, surface: &str) -> ClassifiedWord {
        let sequence = self.syllabifier.syllabify(surface);
        ClassifiedWord {
            word: Word::new(surface),
            classification: classify(&sequence),
            sequence,
        }
    }

    /// Tokenize, deduplicate and classify a batch of text fragments.
    ///
    /// Tokens are split on whitespace, trimmed of leading/trailing
    /// punctuation, and stripped of elided prefixes ("l'école" contributes
    /// "école"). Duplicates are collapsed by normalization key; the first
    /// surface form seen wins.
    pub fn classify_batch<S: AsRef<str>>(&self, fragments: &[S]) -> BatchSummary {
        let mut seen: ahash::AHashSet<String> = ahash::AHashSet::new();
        let mut unique_words = Vec::new();

        for fragment in fragments {
            for token in fragment.as_ref().split_whitespace() {
                let Some(surface) = clean_token(token) else {
                    continue;
                };
                let word = Word::new(&surface);
                if word.key().is_empty() || !seen.insert(word.key().to_string()) {
                    continue;
                }
                let sequence = self.syllabifier.syllabify(&surface);
                unique_words.push(ClassifiedWord {
                    word,
                    classification: classify(&sequence),
                    sequence,
                });
            }
        }

        tracing::debug!(
            fragments = fragments.len(),
            unique_words = unique_words.len(),
            "classified batch"
        );
        BatchSummary { unique_words }
    }
}

/// Trim surrounding punctuation and strip an elided prefix, keeping the stem.
/// Returns `None` when nothing word-like remains.
fn clean_token(token: &str) -> Option<String> {
    // Typographic apostrophes count as apostrophes.
    let token = token.replace('\u{2019}', "'");
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
    let trimmed = trimmed.trim_matches('\'');
    if trimmed.is_empty() {
        return None;
    }

    if let Some((prefix, stem)) = trimmed.split_once('\'') {
        if ELISION_PREFIXES.contains(prefix.to_lowercase().as_str()) && !stem.is_empty() {
            return Some(stem.to_string());
        }
    }
    Some(trimmed.to_string())
}
