//! Correction store: records, global corrections and review requests.
//!
//! Two backends behind one enum, selected at construction:
//! - `InMemory` (default): thread-safe maps, used by tests and by callers
//!   that persist elsewhere.
//! - `Redb`: persistent, transaction-backed storage for standalone
//!   deployments. Writes go through a write transaction; reads through read
//!   transactions. Payloads are bincode-encoded.
//!
//! The store owns persistence only. Merge priority, validation and the
//! review lifecycle live in `resolver`, `validator` and `review`.

use std::sync::{Arc, RwLock};

use ahash::AHashMap;
use redb::ReadableTable;
use serde::{Deserialize, Serialize};

use libsyllabe_core::{Classification, SyllableSequence, Word};

use crate::error::{EngineError, Result};
use crate::review::{CorrectionRequest, ReviewStatus};

/// Where an answer came from, in ascending priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Algorithm,
    LearnerSubmission,
    AdminValidated,
}

/// A classification produced for one learner on one text. Records are never
/// mutated in place; newer records supersede older ones at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub word: Word,
    pub classification: Classification,
    /// Segmentation attached to the record, when one was produced.
    pub sequence: Option<SyllableSequence>,
    pub source: Source,
    /// Originating learner; `None` for pure algorithm output.
    pub learner: Option<String>,
    /// Originating text identifier, when tied to one.
    pub text: Option<String>,
    pub validated: bool,
}

/// The authoritative answer for a word once an admin accepted a correction.
/// Never deleted, only overwritten by a newer accepted correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalCorrection {
    pub word: Word,
    pub sequence: SyllableSequence,
    pub classification: Classification,
    /// Served-count. Incremented best-effort; drift under concurrent reads
    /// is tolerated.
    pub usage: u64,
}

#[derive(Debug, Default)]
struct StoreInner {
    globals: AHashMap<String, GlobalCorrection>,
    records: Vec<ClassificationRecord>,
    requests: AHashMap<u64, CorrectionRequest>,
    alternatives: AHashMap<String, Vec<SyllableSequence>>,
    next_request_id: u64,
}

/// Thread-safe in-memory backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&StoreInner) -> T) -> Result<T> {
        let guard = self
            .inner
            .read()
            .map_err(|_| EngineError::Store("store lock poisoned".into()))?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut StoreInner) -> T) -> Result<T> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| EngineError::Store("store lock poisoned".into()))?;
        Ok(f(&mut guard))
    }
}

#[cfg(test)]
impl InMemoryStore {
    /// Poison the inner lock so every later access returns a `Store` error.
    pub(crate) fn poison(&self) {
        let inner = Arc::clone(&self.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.write().unwrap();
            panic!("poisoning store lock");
        })
        .join();
    }
}

/// Backend switch, in the spirit of a user dictionary with in-memory and
/// persistent variants.
#[derive(Debug, Clone)]
pub enum CorrectionStore {
    InMemory(InMemoryStore),
    Redb(RedbStore),
}

impl Default for CorrectionStore {
    fn default() -> Self {
        Self::new_in_memory()
    }
}

impl CorrectionStore {
    pub fn new_in_memory() -> Self {
        CorrectionStore::InMemory(InMemoryStore::new())
    }

    /// Open or create a persistent store at `path`.
    pub fn new_redb<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Ok(CorrectionStore::Redb(RedbStore::new(path)?))
    }

    /// Fetch the global correction for a normalization key.
    pub fn global(&self, key: &str) -> Result<Option<GlobalCorrection>> {
        match self {
            CorrectionStore::InMemory(m) => m.read(|s| s.globals.get(key).cloned()),
            CorrectionStore::Redb(r) => r.global(key),
        }
    }

    /// Insert or overwrite the global correction for its word.
    pub fn put_global(&self, correction: GlobalCorrection) -> Result<()> {
        match self {
            CorrectionStore::InMemory(m) => m.write(|s| {
                s.globals
                    .insert(correction.word.key().to_string(), correction);
            }),
            CorrectionStore::Redb(r) => r.put_global(&correction),
        }
    }

    /// Increment the usage counter of a global correction. Lost updates
    /// under concurrency are acceptable; a missing key is a no-op.
    pub fn bump_usage(&self, key: &str) -> Result<()> {
        match self {
            CorrectionStore::InMemory(m) => m.write(|s| {
                if let Some(g) = s.globals.get_mut(key) {
                    g.usage = g.usage.saturating_add(1);
                }
            }),
            CorrectionStore::Redb(r) => r.bump_usage(key),
        }
    }

    pub fn insert_record(&self, record: ClassificationRecord) -> Result<()> {
        match self {
            CorrectionStore::InMemory(m) => m.write(|s| s.records.push(record)),
            CorrectionStore::Redb(r) => r.insert_record(&record),
        }
    }

    /// All records for a learner, oldest first.
    pub fn records_for_learner(&self, learner: &str) -> Result<Vec<ClassificationRecord>> {
        match self {
            CorrectionStore::InMemory(m) => m.read(|s| {
                s.records
                    .iter()
                    .filter(|r| r.learner.as_deref() == Some(learner))
                    .cloned()
                    .collect()
            }),
            CorrectionStore::Redb(r) => r.records_for_learner(learner),
        }
    }

    /// Create a new pending request, assigning it the next id.
    pub fn insert_request(
        &self,
        word: Word,
        learner_sequence: SyllableSequence,
        canonical_sequence: SyllableSequence,
        requester: String,
    ) -> Result<CorrectionRequest> {
        let build = |id: u64| CorrectionRequest {
            id,
            word,
            learner_sequence,
            canonical_sequence,
            requester,
            status: ReviewStatus::Pending,
            comment: None,
        };
        match self {
            CorrectionStore::InMemory(m) => m.write(move |s| {
                s.next_request_id += 1;
                let req = build(s.next_request_id);
                s.requests.insert(req.id, req.clone());
                req
            }),
            CorrectionStore::Redb(r) => r.insert_request(build),
        }
    }

    pub fn request(&self, id: u64) -> Result<Option<CorrectionRequest>> {
        match self {
            CorrectionStore::InMemory(m) => m.read(|s| s.requests.get(&id).cloned()),
            CorrectionStore::Redb(r) => r.request(id),
        }
    }

    /// Overwrite a request after a state transition.
    pub fn update_request(&self, request: &CorrectionRequest) -> Result<()> {
        match self {
            CorrectionStore::InMemory(m) => {
                let request = request.clone();
                m.write(move |s| {
                    s.requests.insert(request.id, request);
                })
            }
            CorrectionStore::Redb(r) => r.update_request(request),
        }
    }

    /// Whether a pending request already exists for (word key, requester).
    pub fn has_pending(&self, key: &str, requester: &str) -> Result<bool> {
        match self {
            CorrectionStore::InMemory(m) => m.read(|s| {
                s.requests.values().any(|r| {
                    r.status == ReviewStatus::Pending
                        && r.word.key() == key
                        && r.requester == requester
                })
            }),
            CorrectionStore::Redb(r) => r.has_pending(key, requester),
        }
    }

    /// Record accepted alternative segmentations for a word (informational).
    pub fn push_alternatives(&self, key: &str, alts: Vec<SyllableSequence>) -> Result<()> {
        match self {
            CorrectionStore::InMemory(m) => m.write(|s| {
                let entry = s.alternatives.entry(key.to_string()).or_default();
                for alt in alts {
                    if !entry.contains(&alt) {
                        entry.push(alt);
                    }
                }
            }),
            CorrectionStore::Redb(r) => r.push_alternatives(key, alts),
        }
    }

    pub fn alternatives(&self, key: &str) -> Result<Vec<SyllableSequence>> {
        match self {
            CorrectionStore::InMemory(m) => {
                m.read(|s| s.alternatives.get(key).cloned().unwrap_or_default())
            }
            CorrectionStore::Redb(r) => r.alternatives(key),
        }
    }

    /// Snapshot of every global correction (tests, exports).
    pub fn globals_snapshot(&self) -> Result<Vec<GlobalCorrection>> {
        match self {
            CorrectionStore::InMemory(m) => m.read(|s| s.globals.values().cloned().collect()),
            CorrectionStore::Redb(r) => r.globals_snapshot(),
        }
    }
}

/// Persistent backend.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<redb::Database>,
    path: std::path::PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").field("path", &self.path).finish()
    }
}

const GLOBALS: redb::TableDefinition<&str, &[u8]> =
    redb::TableDefinition::new("global_corrections");
const RECORDS: redb::TableDefinition<u64, &[u8]> =
    redb::TableDefinition::new("classification_records");
const REQUESTS: redb::TableDefinition<u64, &[u8]> =
    redb::TableDefinition::new("correction_requests");
const ALTERNATIVES: redb::TableDefinition<&str, &[u8]> =
    redb::TableDefinition::new("accepted_alternatives");
const META: redb::TableDefinition<&str, u64> = redb::TableDefinition::new("meta");

const NEXT_REQUEST_ID: &str = "next_request_id";
const NEXT_RECORD_ID: &str = "next_record_id";

fn store_err(e: impl std::fmt::Display) -> EngineError {
    EngineError::Store(e.to_string())
}

impl RedbStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let db = redb::Database::create(path.as_ref()).map_err(store_err)?;
        Ok(Self {
            db: Arc::new(db),
            path: path.as_ref().to_path_buf(),
        })
    }

    fn global(&self, key: &str) -> Result<Option<GlobalCorrection>> {
        self.get_bytes(GLOBALS, key)?
            .map(|bytes| bincode::deserialize(&bytes).map_err(store_err))
            .transpose()
    }

    fn put_global(&self, correction: &GlobalCorrection) -> Result<()> {
        let bytes = bincode::serialize(correction).map_err(store_err)?;
        self.put_bytes(GLOBALS, correction.word.key(), &bytes)
    }

    fn bump_usage(&self, key: &str) -> Result<()> {
        let Some(mut correction) = self.global(key)? else {
            return Ok(());
        };
        correction.usage = correction.usage.saturating_add(1);
        self.put_global(&correction)
    }

    fn insert_record(&self, record: &ClassificationRecord) -> Result<()> {
        let bytes = bincode::serialize(record).map_err(store_err)?;
        let txn = self.db.begin_write().map_err(store_err)?;
        {
            let mut meta = txn.open_table(META).map_err(store_err)?;
            let id = meta
                .get(NEXT_RECORD_ID)
                .map_err(store_err)?
                .map(|v| v.value())
                .unwrap_or(0)
                + 1;
            meta.insert(NEXT_RECORD_ID, id).map_err(store_err)?;
            let mut table = txn.open_table(RECORDS).map_err(store_err)?;
            table.insert(id, bytes.as_slice()).map_err(store_err)?;
        }
        txn.commit().map_err(store_err)
    }

    fn records_for_learner(&self, learner: &str) -> Result<Vec<ClassificationRecord>> {
        let txn = self.db.begin_read().map_err(store_err)?;
        let table = match txn.open_table(RECORDS) {
            Ok(t) => t,
            // Table not created yet: no records.
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(store_err(e)),
        };
        let mut out = Vec::new();
        for item in table.iter().map_err(store_err)? {
            let (_, v) = item.map_err(store_err)?;
            let record: ClassificationRecord =
                bincode::deserialize(v.value()).map_err(store_err)?;
            if record.learner.as_deref() == Some(learner) {
                out.push(record);
            }
        }
        Ok(out)
    }

    fn insert_request(
        &self,
        build: impl FnOnce(u64) -> CorrectionRequest,
    ) -> Result<CorrectionRequest> {
        let txn = self.db.begin_write().map_err(store_err)?;
        let request;
        {
            let mut meta = txn.open_table(META).map_err(store_err)?;
            let id = meta
                .get(NEXT_REQUEST_ID)
                .map_err(store_err)?
                .map(|v| v.value())
                .unwrap_or(0)
                + 1;
            meta.insert(NEXT_REQUEST_ID, id).map_err(store_err)?;
            request = build(id);
            let bytes = bincode::serialize(&request).map_err(store_err)?;
            let mut table = txn.open_table(REQUESTS).map_err(store_err)?;
            table.insert(id, bytes.as_slice()).map_err(store_err)?;
        }
        txn.commit().map_err(store_err)?;
        Ok(request)
    }

    fn request(&self, id: u64) -> Result<Option<CorrectionRequest>> {
        let txn = self.db.begin_read().map_err(store_err)?;
        let table = match txn.open_table(REQUESTS) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(store_err(e)),
        };
        table
            .get(id)
            .map_err(store_err)?
            .map(|v| bincode::deserialize(v.value()).map_err(store_err))
            .transpose()
    }

    fn update_request(&self, request: &CorrectionRequest) -> Result<()> {
        let bytes = bincode::serialize(request).map_err(store_err)?;
        let txn = self.db.begin_write().map_err(store_err)?;
        {
            let mut table = txn.open_table(REQUESTS).map_err(store_err)?;
            table
                .insert(request.id, bytes.as_slice())
                .map_err(store_err)?;
        }
        txn.commit().map_err(store_err)
    }

    fn has_pending(&self, key: &str, requester: &str) -> Result<bool> {
        let txn = self.db.begin_read().map_err(store_err)?;
        let table = match txn.open_table(REQUESTS) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(false),
            Err(e) => return Err(store_err(e)),
        };
        for item in table.iter().map_err(store_err)? {
            let (_, v) = item.map_err(store_err)?;
            let request: CorrectionRequest =
                bincode::deserialize(v.value()).map_err(store_err)?;
            if request.status == ReviewStatus::Pending
                && request.word.key() == key
                && request.requester == requester
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn push_alternatives(&self, key: &str, alts: Vec<SyllableSequence>) -> Result<()> {
        let mut existing = self.alternatives(key)?;
        for alt in alts {
            if !existing.contains(&alt) {
                existing.push(alt);
            }
        }
        let bytes = bincode::serialize(&existing).map_err(store_err)?;
        self.put_bytes(ALTERNATIVES, key, &bytes)
    }

    fn alternatives(&self, key: &str) -> Result<Vec<SyllableSequence>> {
        Ok(self
            .get_bytes(ALTERNATIVES, key)?
            .map(|bytes| bincode::deserialize(&bytes).map_err(store_err))
            .transpose()?
            .unwrap_or_default())
    }

    fn globals_snapshot(&self) -> Result<Vec<GlobalCorrection>> {
        let txn = self.db.begin_read().map_err(store_err)?;
        let table = match txn.open_table(GLOBALS) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(store_err(e)),
        };
        let mut out = Vec::new();
        for item in table.iter().map_err(store_err)? {
            let (_, v) = item.map_err(store_err)?;
            out.push(bincode::deserialize(v.value()).map_err(store_err)?);
        }
        Ok(out)
    }

    fn get_bytes(
        &self,
        table_def: redb::TableDefinition<&str, &[u8]>,
        key: &str,
    ) -> Result<Option<Vec<u8>>> {
        let txn = self.db.begin_read().map_err(store_err)?;
        let table = match txn.open_table(table_def) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(store_err(e)),
        };
        Ok(table
            .get(key)
            .map_err(store_err)?
            .map(|v| v.value().to_vec()))
    }

    fn put_bytes(
        &self,
        table_def: redb::TableDefinition<&str, &[u8]>,
        key: &str,
        bytes: &[u8],
    ) -> Result<()> {
        let txn = self.db.begin_write().map_err(store_err)?;
        {
            let mut table = txn.open_table(table_def).map_err(store_err)?;
            table.insert(key, bytes).map_err(store_err)?;
        }
        txn.commit().map_err(store_err)
    }
}
