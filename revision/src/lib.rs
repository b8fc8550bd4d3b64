//! libsyllabe-revision
//!
//! The record-backed half of the libsyllabe engine: correction store,
//! canonical-answer resolution, attempt validation and the review state
//! machine for learner-reported disagreements.
//!
//! Public API:
//! - `CorrectionStore` - in-memory or redb-backed record storage
//! - `Resolver` / `Resolution` / `Scope` - ranked-source merge logic
//! - `validate` / `Verdict` - scoring of manual segmentation attempts
//! - `ReviewDesk` / `ReviewOutcome` - the pending -> terminal -> reopened
//!   lifecycle of correction requests
//! - `EngineError` - the InvalidInput / NotFound / Conflict / Store taxonomy
//!
//! The pure segmentation and classification algorithms live in
//! `libsyllabe-core`; this crate composes them with persisted records.

pub mod error;
pub use error::EngineError;

pub mod store;
pub use store::{
    ClassificationRecord, CorrectionStore, GlobalCorrection, InMemoryStore, RedbStore, Source,
};

pub mod resolver;
pub use resolver::{Resolution, Resolver, Scope};

pub mod validator;
pub use validator::{validate, Verdict};

pub mod review;
pub use review::{
    CorrectionRequest, InMemoryBucket, MismatchReport, NullBucket, ReviewDesk, ReviewOutcome,
    ReviewStatus, WorkBucket, RESEGMENTATION_BUCKET,
};
