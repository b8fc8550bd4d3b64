//! Scoring of a learner's manual segmentation attempt.
//!
//! The learner places cut points between characters; we rebuild the syllable
//! sequence they implied and compare it against the canonical one. The
//! comparison is all-or-nothing and case-insensitive: same number of
//! syllables, same content, in order.

use libsyllabe_core::SyllableSequence;

use crate::error::{EngineError, Result};

/// Outcome of validating one attempt. Both sequences are returned so the
/// caller can show the learner where their cuts differed.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub user_sequence: SyllableSequence,
    pub canonical_sequence: SyllableSequence,
}

/// Rebuild the learner's sequence from cut positions and compare it to
/// `canonical`.
///
/// Cut positions are character indices strictly between `0` and the word's
/// character count; they are sorted and deduplicated before slicing, and a
/// final boundary at the end of the word is implicit. A submission with no
/// cuts at all is invalid input, not an incorrect answer.
pub fn validate(
    word: &str,
    cuts: &[usize],
    canonical: &SyllableSequence,
) -> Result<Verdict> {
    if word.is_empty() {
        return Err(EngineError::InvalidInput("empty word".into()));
    }
    if cuts.is_empty() {
        return Err(EngineError::InvalidInput(
            "at least one cut position is required".into(),
        ));
    }

    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();

    let mut positions: Vec<usize> = cuts.to_vec();
    positions.sort_unstable();
    positions.dedup();
    if positions.first() == Some(&0) || positions.last().is_some_and(|p| *p >= len) {
        return Err(EngineError::InvalidInput(format!(
            "cut positions must lie strictly between 0 and {len}"
        )));
    }

    let mut parts: Vec<String> = Vec::with_capacity(positions.len() + 1);
    let mut start = 0usize;
    for cut in positions.iter().chain(std::iter::once(&len)) {
        parts.push(chars[start..*cut].iter().collect());
        start = *cut;
    }

    let user_sequence = SyllableSequence::new(parts)
        .ok_or_else(|| EngineError::InvalidInput("degenerate cut positions".into()))?;

    Ok(Verdict {
        correct: user_sequence.eq_ignore_case(canonical),
        user_sequence,
        canonical_sequence: canonical.clone(),
    })
}
