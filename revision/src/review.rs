//! Review lifecycle for learner-reported segmentation disagreements.
//!
//! A mismatch report opens a `Pending` request carrying both sequences.
//! Reviewers move it to one of three terminal states; `reopen` brings a
//! terminal request back to `Pending`. Accepting a request promotes the
//! canonical sequence (or a reviewer override) to a global correction, which
//! from then on wins every resolution for that word.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use libsyllabe_core::{classify, SyllableSequence, Word};

use crate::error::{EngineError, Result};
use crate::store::{CorrectionStore, GlobalCorrection};

/// Bucket tag for words a learner still has to re-segment.
pub const RESEGMENTATION_BUCKET: &str = "resegmentation";

/// Lifecycle state of a correction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    Pending,
    Accepted,
    Rejected,
    AcceptedBoth,
}

impl ReviewStatus {
    pub fn is_terminal(self) -> bool {
        self != ReviewStatus::Pending
    }
}

/// A learner-submitted disagreement, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    pub id: u64,
    pub word: Word,
    pub learner_sequence: SyllableSequence,
    pub canonical_sequence: SyllableSequence,
    pub requester: String,
    pub status: ReviewStatus,
    /// Reviewer comment set on decision, cleared on reopen.
    pub comment: Option<String>,
}

/// A fresh mismatch report from the validator.
#[derive(Debug, Clone)]
pub struct MismatchReport {
    pub word: Word,
    pub learner_sequence: SyllableSequence,
    pub canonical_sequence: SyllableSequence,
    pub requester: String,
}

/// Reviewer decision for a pending request.
#[derive(Debug, Clone)]
pub enum ReviewOutcome {
    /// Promote the canonical sequence (or the supplied override) to a global
    /// correction.
    Accept {
        override_sequence: Option<SyllableSequence>,
    },
    /// Keep the canonical answer unchanged.
    Reject,
    /// Record both sequences as pedagogically valid alternatives.
    AcceptBoth,
}

/// Work-queue collaborator: terminal review transitions clear the word from
/// the requester's resegmentation bucket so it re-enters their normal queue.
pub trait WorkBucket {
    fn remove_word(&self, learner: &str, bucket: &str, word: &str);
}

/// No-op bucket for callers that track work queues elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBucket;

impl WorkBucket for NullBucket {
    fn remove_word(&self, _learner: &str, _bucket: &str, _word: &str) {}
}

/// Thread-safe in-memory bucket, used by tests and small deployments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBucket {
    inner: Arc<RwLock<HashSet<(String, String, String)>>>,
}

impl InMemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_word(&self, learner: &str, bucket: &str, word: &str) {
        if let Ok(mut set) = self.inner.write() {
            set.insert((learner.to_string(), bucket.to_string(), word.to_string()));
        }
    }

    pub fn contains(&self, learner: &str, bucket: &str, word: &str) -> bool {
        self.inner
            .read()
            .map(|set| {
                set.contains(&(learner.to_string(), bucket.to_string(), word.to_string()))
            })
            .unwrap_or(false)
    }
}

impl WorkBucket for InMemoryBucket {
    fn remove_word(&self, learner: &str, bucket: &str, word: &str) {
        if let Ok(mut set) = self.inner.write() {
            set.remove(&(learner.to_string(), bucket.to_string(), word.to_string()));
        }
    }
}

/// The review state machine over a [`CorrectionStore`] and a [`WorkBucket`].
#[derive(Debug, Clone)]
pub struct ReviewDesk<B: WorkBucket> {
    store: CorrectionStore,
    buckets: B,
}

impl<B: WorkBucket> ReviewDesk<B> {
    pub fn new(store: CorrectionStore, buckets: B) -> Self {
        Self { store, buckets }
    }

    pub fn store(&self) -> &CorrectionStore {
        &self.store
    }

    /// File a mismatch report as a new `Pending` request.
    ///
    /// At most one pending request may exist per (word, requester) pair;
    /// a second submission is a `Conflict`. The check is lookup-then-insert,
    /// so two racing submissions may both pass; duplicate pending rows are an
    /// accepted degraded outcome since either acceptance is equivalent.
    pub fn submit(&self, report: MismatchReport) -> Result<CorrectionRequest> {
        if report.requester.is_empty() {
            return Err(EngineError::InvalidInput("empty requester".into()));
        }
        if self
            .store
            .has_pending(report.word.key(), &report.requester)?
        {
            return Err(EngineError::Conflict {
                word: report.word.surface().to_string(),
                requester: report.requester,
            });
        }
        let request = self.store.insert_request(
            report.word,
            report.learner_sequence,
            report.canonical_sequence,
            report.requester,
        )?;
        tracing::debug!(id = request.id, word = request.word.key(), "correction request filed");
        Ok(request)
    }

    /// Decide a pending request. Deciding a request that is not pending is
    /// invalid input; an unknown id is `NotFound`.
    pub fn decide(
        &self,
        id: u64,
        outcome: ReviewOutcome,
        comment: Option<String>,
    ) -> Result<CorrectionRequest> {
        let mut request = self.store.request(id)?.ok_or(EngineError::NotFound(id))?;
        if request.status != ReviewStatus::Pending {
            return Err(EngineError::InvalidInput(format!(
                "request {id} is not pending"
            )));
        }

        match outcome {
            ReviewOutcome::Accept { override_sequence } => {
                let sequence =
                    override_sequence.unwrap_or_else(|| request.canonical_sequence.clone());
                self.store.put_global(GlobalCorrection {
                    word: request.word.clone(),
                    classification: classify(&sequence),
                    sequence,
                    usage: 0,
                })?;
                request.status = ReviewStatus::Accepted;
            }
            ReviewOutcome::Reject => {
                request.status = ReviewStatus::Rejected;
            }
            ReviewOutcome::AcceptBoth => {
                self.store.push_alternatives(
                    request.word.key(),
                    vec![
                        request.learner_sequence.clone(),
                        request.canonical_sequence.clone(),
                    ],
                )?;
                request.status = ReviewStatus::AcceptedBoth;
            }
        }

        request.comment = comment;
        self.store.update_request(&request)?;

        // Every terminal disposition frees the word for reprocessing.
        self.buckets.remove_word(
            &request.requester,
            RESEGMENTATION_BUCKET,
            request.word.surface(),
        );
        tracing::debug!(id, status = ?request.status, "correction request decided");
        Ok(request)
    }

    /// Return a terminal request to `Pending` for re-review. No bucket side
    /// effect; the disposition comment is cleared.
    pub fn reopen(&self, id: u64) -> Result<CorrectionRequest> {
        let mut request = self.store.request(id)?.ok_or(EngineError::NotFound(id))?;
        if !request.status.is_terminal() {
            return Err(EngineError::InvalidInput(format!(
                "request {id} is already pending"
            )));
        }
        request.status = ReviewStatus::Pending;
        request.comment = None;
        self.store.update_request(&request)?;
        Ok(request)
    }
}
