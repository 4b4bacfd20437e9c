//! Ordered staff record collection and its lifecycle operations.
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::record::{RecordField, StaffRecord};

/// All records plus the id counter: the unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCollection {
    #[serde(default)]
    pub records: Vec<StaffRecord>,
    #[serde(default = "RecordCollection::first_id")]
    pub next_id: u64,
}

impl RecordCollection {
    const fn first_id() -> u64 {
        1
    }

    /// Wrap records whose counter was never stored, deriving it from the ids.
    #[must_use]
    pub fn from_records(records: Vec<StaffRecord>) -> Self {
        let next_id = Self::next_id_after(&records);
        Self { records, next_id }
    }

    /// `max(id) + 1`, or 1 for an empty list.
    #[must_use]
    pub fn next_id_after(records: &[StaffRecord]) -> u64 {
        records
            .iter()
            .map(|record| record.id)
            .max()
            .map_or(Self::first_id(), |max| max.saturating_add(1))
    }
}

impl Default for RecordCollection {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: Self::first_id(),
        }
    }
}

/// In-memory record store owned by one dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    collection: RecordCollection,
    config: ScoringConfig,
}

impl RecordStore {
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            collection: RecordCollection::default(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    #[must_use]
    pub fn records(&self) -> &[StaffRecord] {
        &self.collection.records
    }

    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.collection.next_id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&StaffRecord> {
        self.collection.records.iter().find(|record| record.id == id)
    }

    /// Current state as a persistable collection.
    #[must_use]
    pub fn snapshot(&self) -> &RecordCollection {
        &self.collection
    }

    /// Append a zeroed record and return its id.
    pub fn create(&mut self) -> u64 {
        let id = self.collection.next_id;
        self.collection.next_id = id.saturating_add(1);
        self.collection
            .records
            .push(StaffRecord::new(id, &self.config));
        id
    }

    /// Set `field` on record `id` from raw input and recompute its derived fields.
    ///
    /// Returns `false` without touching anything when `id` is unknown.
    pub fn update(&mut self, id: u64, field: RecordField, raw: &str) -> bool {
        let config = &self.config;
        let Some(record) = self
            .collection
            .records
            .iter_mut()
            .find(|record| record.id == id)
        else {
            log::debug!("ignoring update of {field} for unknown record {id}");
            return false;
        };
        record.apply(field, raw, config);
        record.recompute(config);
        true
    }

    /// Remove record `id`; the id counter is left alone.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.collection.records.len();
        self.collection.records.retain(|record| record.id != id);
        let removed = self.collection.records.len() != before;
        if !removed {
            log::debug!("ignoring delete of unknown record {id}");
        }
        removed
    }

    /// Replace all state with `collection`.
    ///
    /// The id counter is rebuilt from the ids present and every record is
    /// rescored under the active configuration, so stale derived fields in a
    /// snapshot never survive a load.
    pub fn load_snapshot(&mut self, collection: RecordCollection) {
        let mut records = collection.records;
        for record in &mut records {
            record.recompute(&self.config);
        }
        self.collection = RecordCollection::from_records(records);
    }

    /// Drop every record and restart ids at 1.
    pub fn reset(&mut self) {
        self.collection = RecordCollection::default();
    }

    /// Switch to `config` and rescore every record under it.
    pub fn reconfigure(&mut self, config: ScoringConfig) {
        self.config = config;
        for record in &mut self.collection.records {
            record.recompute(&self.config);
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
