//! Canonical-answer resolution.
//!
//! Merges three ranked sources of truth into one answer per word:
//! admin-validated global correction, then the learner's own records, then
//! the rule engine. The algorithm is always available, so resolution never
//! fails; store trouble degrades to the next source and is only logged.

use ahash::AHashMap;

use libsyllabe_core::{classify, Classification, Config, SyllableSequence, Syllabifier, Word};

use crate::error::Result;
use crate::store::{ClassificationRecord, CorrectionStore, Source};

/// Which learner (and optionally which texts) a resolution is scoped to.
/// Without a scope only global corrections and the algorithm apply.
#[derive(Debug, Clone)]
pub struct Scope {
    pub learner: String,
    /// When non-empty, stage two only considers records from these texts.
    pub texts: Vec<String>,
}

impl Scope {
    pub fn learner<S: Into<String>>(learner: S) -> Self {
        Self {
            learner: learner.into(),
            texts: Vec::new(),
        }
    }

    pub fn with_texts<S: Into<String>>(mut self, texts: Vec<S>) -> Self {
        self.texts = texts.into_iter().map(Into::into).collect();
        self
    }
}

/// The canonical answer for one word, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub word: Word,
    pub sequence: SyllableSequence,
    pub classification: Classification,
    pub source: Source,
}

/// Merge logic over a [`CorrectionStore`] and a [`Syllabifier`].
#[derive(Debug, Clone)]
pub struct Resolver {
    store: CorrectionStore,
    syllabifier: Syllabifier,
    min_resolved_batch: usize,
}

impl Resolver {
    pub fn new(store: CorrectionStore, config: &Config) -> Self {
        Self {
            store,
            syllabifier: Syllabifier::new(config),
            min_resolved_batch: config.min_resolved_batch,
        }
    }

    pub fn store(&self) -> &CorrectionStore {
        &self.store
    }

    /// Resolve one word. Priority: global correction, then the newest of the
    /// learner's own records in scope, then the algorithm.
    pub fn resolve(&self, surface: &str, scope: Option<&Scope>) -> Resolution {
        let word = Word::new(surface);

        if let Some(resolution) = self.try_global(&word) {
            return resolution;
        }

        if let Some(scope) = scope {
            if let Some(resolution) = self.try_learner_records(&word, scope, true) {
                return resolution;
            }
        }

        self.algorithmic(word)
    }

    /// Resolve a batch of words with the staged fallback pipeline:
    /// 1. global corrections;
    /// 2. the learner's records from the scoped texts;
    /// 3. only if fewer than `min_resolved_batch` words are covered so far,
    ///    any remaining unvalidated records of the learner;
    /// 4. the algorithm for every still-missing word.
    ///
    /// Output is one resolution per input word, in input order.
    pub fn resolve_batch<S: AsRef<str>>(
        &self,
        surfaces: &[S],
        scope: Option<&Scope>,
    ) -> Vec<Resolution> {
        let words: Vec<Word> = surfaces.iter().map(|s| Word::new(s.as_ref())).collect();
        let mut resolved: AHashMap<String, Resolution> = AHashMap::new();

        for word in &words {
            if resolved.contains_key(word.key()) {
                continue;
            }
            if let Some(resolution) = self.try_global(word) {
                resolved.insert(word.key().to_string(), resolution);
            }
        }

        if let Some(scope) = scope {
            for word in &words {
                if resolved.contains_key(word.key()) {
                    continue;
                }
                if let Some(resolution) = self.try_learner_records(word, scope, true) {
                    resolved.insert(word.key().to_string(), resolution);
                }
            }

            // Completeness over purity: a too-small exercise pulls in the
            // learner's records from any text before giving up on records.
            if resolved.len() < self.min_resolved_batch {
                for word in &words {
                    if resolved.contains_key(word.key()) {
                        continue;
                    }
                    if let Some(resolution) = self.try_learner_records(word, scope, false) {
                        resolved.insert(word.key().to_string(), resolution);
                    }
                }
            }
        }

        words
            .into_iter()
            .map(|word| match resolved.get(word.key()) {
                // The answer is shared per key; the surface form stays the
                // caller's.
                Some(resolution) => Resolution {
                    sequence: resolution.sequence.clone(),
                    classification: resolution.classification,
                    source: resolution.source,
                    word,
                },
                None => self.algorithmic(word),
            })
            .collect()
    }

    /// Insert a learner-submission record after a completed classification
    /// exercise. Records are append-only; the newest wins at resolution.
    pub fn record_exercise_result(
        &self,
        surface: &str,
        classification: Classification,
        sequence: Option<SyllableSequence>,
        learner: &str,
        text: Option<&str>,
    ) -> Result<()> {
        self.store.insert_record(ClassificationRecord {
            word: Word::new(surface),
            classification,
            sequence,
            source: Source::LearnerSubmission,
            learner: Some(learner.to_string()),
            text: text.map(str::to_string),
            validated: false,
        })
    }

    /// Score a learner's cut positions against the canonical segmentation.
    pub fn check_segmentation(
        &self,
        surface: &str,
        cuts: &[usize],
        scope: Option<&Scope>,
    ) -> Result<crate::validator::Verdict> {
        let canonical = self.resolve(surface, scope);
        crate::validator::validate(surface, cuts, &canonical.sequence)
    }

    fn try_global(&self, word: &Word) -> Option<Resolution> {
        match self.store.global(word.key()) {
            Ok(Some(global)) => {
                // Fire-and-forget usage counter; a lost increment is fine.
                if let Err(e) = self.store.bump_usage(word.key()) {
                    tracing::warn!(word = word.key(), error = %e, "usage counter increment lost");
                }
                Some(Resolution {
                    word: word.clone(),
                    sequence: global.sequence,
                    classification: global.classification,
                    source: Source::AdminValidated,
                })
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(
                    word = word.key(),
                    error = %e,
                    "global correction store unavailable, falling back"
                );
                None
            }
        }
    }

    /// Newest matching record of the learner. With `scoped_texts` set, only
    /// records from the scope's texts count (when the scope names any).
    fn try_learner_records(
        &self,
        word: &Word,
        scope: &Scope,
        scoped_texts: bool,
    ) -> Option<Resolution> {
        let records = match self.store.records_for_learner(&scope.learner) {
            Ok(records) => records,
            Err(e) => {
                tracing::debug!(
                    learner = %scope.learner,
                    error = %e,
                    "record store unavailable, falling back"
                );
                return None;
            }
        };

        let record = records.into_iter().rev().find(|r| {
            !r.validated
                && r.word.key() == word.key()
                && (!scoped_texts
                    || scope.texts.is_empty()
                    || r.text.as_deref().is_some_and(|t| scope.texts.iter().any(|s| s == t)))
        })?;

        let sequence = record
            .sequence
            .unwrap_or_else(|| self.syllabifier.syllabify(word.surface()));
        Some(Resolution {
            word: word.clone(),
            sequence,
            classification: record.classification,
            source: Source::LearnerSubmission,
        })
    }

    fn algorithmic(&self, word: Word) -> Resolution {
        let sequence = self.syllabifier.syllabify(word.surface());
        Resolution {
            classification: classify(&sequence),
            word,
            sequence,
            source: Source::Algorithm,
        }
    }
}
