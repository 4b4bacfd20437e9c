//! Mistake Deduction Engine
//!
//! Platform-agnostic scoring and decision logic for the mistake deduction
//! dashboard. Raw mistake counts and amounts become discrete scores, scores
//! become candidate deductions, and a per-record policy picks the final figure.
//! This crate has no UI or platform-specific dependencies.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod currency;
pub mod decision;
pub mod deduction;
pub mod export;
pub mod numbers;
pub mod record;
pub mod score;
pub mod snapshot;
pub mod store;
pub mod summary;

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

// Re-export commonly used types
pub use aggregate::{Weighting, average_score, weighted_score};
pub use config::{ConfigError, Preset, ScoringConfig};
pub use currency::{format_rupiah, format_thousands, parse_currency};
pub use decision::{DecisionPolicy, resolve_final_amount};
pub use deduction::{DeductionCandidates, DeductionStrategy};
pub use export::{Cell, ExportError, ExportReport, Sheet, Workbook, export_file_name, sheet_to_csv};
pub use record::{FieldParseError, RecordField, StaffRecord};
pub use score::{ScoreBands, ScoreTone, score_from_mistake_amount, score_from_mistake_count};
pub use snapshot::{SnapshotEnvelope, SnapshotError, decode_snapshot, encode_snapshot};
pub use store::{RecordCollection, RecordStore};
pub use summary::{Summary, summarize};

/// Trait for abstracting where the record collection is persisted.
/// Platform-specific implementations should provide this
pub trait SnapshotStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the whole collection, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be written.
    fn save(&self, collection: &RecordCollection) -> Result<(), Self::Error>;

    /// Load the stored collection, or `None` when nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> Result<Option<RecordCollection>, Self::Error>;

    /// Remove the stored collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be cleared.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Process-local storage; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    /// Storage pre-filled with raw text, as if an earlier session wrote it.
    #[must_use]
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(text.into()))),
        }
    }

    /// The raw stored text, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SnapshotStorage for MemoryStorage {
    type Error = Infallible;

    fn save(&self, collection: &RecordCollection) -> Result<(), Self::Error> {
        match encode_snapshot(collection) {
            Ok(text) => *self.slot.borrow_mut() = Some(text),
            Err(err) => log::warn!("memory snapshot not written: {err}"),
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<RecordCollection>, Self::Error> {
        let Some(text) = self.raw() else {
            return Ok(None);
        };
        Ok(match decode_snapshot(&text) {
            Ok(collection) => Some(collection),
            Err(err) => {
                log::warn!("discarding stored snapshot: {err}");
                None
            }
        })
    }

    fn clear(&self) -> Result<(), Self::Error> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// One dashboard session: the record store plus its persistence collaborator.
///
/// Every mutation writes the collection through to storage. Write failures are
/// logged and otherwise ignored; the in-memory store stays authoritative.
#[derive(Debug, Clone)]
pub struct Dashboard<S>
where
    S: SnapshotStorage,
{
    store: RecordStore,
    storage: S,
}

impl<S> Dashboard<S>
where
    S: SnapshotStorage,
{
    /// Open a session, loading whatever `storage` holds.
    ///
    /// Absent or unreadable data yields an empty store.
    pub fn open(storage: S, config: ScoringConfig) -> Self {
        let mut store = RecordStore::new(config);
        match storage.load() {
            Ok(Some(collection)) => {
                store.load_snapshot(collection);
                log::debug!("loaded {} stored records", store.len());
            }
            Ok(None) => log::debug!("no stored records; starting empty"),
            Err(err) => log::warn!("failed to load stored records: {err}"),
        }
        Self { store, storage }
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub fn records(&self) -> &[StaffRecord] {
        self.store.records()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn create(&mut self) -> u64 {
        let id = self.store.create();
        self.persist();
        id
    }

    pub fn update(&mut self, id: u64, field: RecordField, raw: &str) -> bool {
        let changed = self.store.update(id, field, raw);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let removed = self.store.delete(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Commit `name` to record `id`, then append a fresh row.
    ///
    /// Returns the new row's id, or `None` when the name is blank or `id` is
    /// unknown; nothing is written in that case.
    pub fn commit_name_and_add(&mut self, id: u64, name: &str) -> Option<u64> {
        if name.trim().is_empty() || !self.store.update(id, RecordField::Name, name) {
            return None;
        }
        Some(self.create())
    }

    /// Drop every record and clear storage.
    pub fn reset(&mut self) {
        self.store.reset();
        if let Err(err) = self.storage.clear() {
            log::warn!("failed to clear stored records: {err}");
        }
    }

    pub fn reconfigure(&mut self, config: ScoringConfig) {
        self.store.reconfigure(config);
        self.persist();
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        summarize(self.store.records())
    }

    #[must_use]
    pub fn workbook(&self) -> Workbook {
        Workbook::from_records(self.store.records())
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(self.store.snapshot()) {
            log::warn!("failed to save records: {err}");
        }
    }
}
