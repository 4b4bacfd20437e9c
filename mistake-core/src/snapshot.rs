//! Versioned, checksummed persistence format for record collections.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::hash::Hasher;
use thiserror::Error;
use twox_hash::XxHash64;

use crate::constants::{SNAPSHOT_HASH_SEED, SNAPSHOT_VERSION};
use crate::record::StaffRecord;
use crate::store::RecordCollection;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot checksum mismatch (stored {stored:016x}, computed {computed:016x})")]
    ChecksumMismatch { stored: u64, computed: u64 },
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("stored data is not a record snapshot")]
    UnrecognizedShape,
}

/// What actually lands in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    pub version: u32,
    pub checksum: u64,
    pub collection: RecordCollection,
}

impl SnapshotEnvelope {
    /// Wrap `collection`, stamping the current version and its checksum.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be serialized.
    pub fn seal(collection: RecordCollection) -> Result<Self, SnapshotError> {
        let checksum = collection_checksum(&collection)?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            checksum,
            collection,
        })
    }

    /// Verify version and checksum, yielding the collection.
    ///
    /// # Errors
    ///
    /// Returns an error for a newer version or a checksum mismatch.
    pub fn open(self) -> Result<RecordCollection, SnapshotError> {
        if self.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        let computed = collection_checksum(&self.collection)?;
        if computed != self.checksum {
            return Err(SnapshotError::ChecksumMismatch {
                stored: self.checksum,
                computed,
            });
        }
        Ok(self.collection)
    }
}

/// XxHash64 over the canonical JSON form of `collection`.
///
/// # Errors
///
/// Returns an error if the collection cannot be serialized.
pub fn collection_checksum(collection: &RecordCollection) -> Result<u64, SnapshotError> {
    let canonical = serde_json::to_vec(collection)?;
    let mut hasher = XxHash64::with_seed(SNAPSHOT_HASH_SEED);
    hasher.write(&canonical);
    Ok(hasher.finish())
}

/// Serialize `collection` into the stored envelope format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_snapshot(collection: &RecordCollection) -> Result<String, SnapshotError> {
    let envelope = SnapshotEnvelope::seal(collection.clone())?;
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode stored text into a collection.
///
/// Accepts the sealed envelope, a bare collection object, or the bare array
/// of records written by the first dashboard build.
///
/// # Errors
///
/// Returns an error when the text is not one of those shapes or fails
/// envelope verification.
pub fn decode_snapshot(text: &str) -> Result<RecordCollection, SnapshotError> {
    let value: Value = serde_json::from_str(text)?;
    if value.get("checksum").is_some() {
        let envelope: SnapshotEnvelope = serde_json::from_value(value)?;
        return envelope.open();
    }
    if value.get("records").is_some() {
        return Ok(serde_json::from_value(value)?);
    }
    if value.is_array() {
        let records: Vec<StaffRecord> = serde_json::from_value(value)?;
        return Ok(RecordCollection::from_records(records));
    }
    Err(SnapshotError::UnrecognizedShape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordField;
    use crate::store::RecordStore;

    fn sample_collection() -> RecordCollection {
        let mut store = RecordStore::default();
        let id = store.create();
        store.update(id, RecordField::Name, "Ayu");
        store.update(id, RecordField::MistakeCount, "6");
        store.create();
        store.snapshot().clone()
    }

    #[test]
    fn sealed_snapshot_decodes_to_same_collection() {
        let collection = sample_collection();
        let text = encode_snapshot(&collection).unwrap();
        assert_eq!(decode_snapshot(&text).unwrap(), collection);
    }

    #[test]
    fn tampered_snapshot_is_rejected() {
        let text = encode_snapshot(&sample_collection()).unwrap();
        let tampered = text.replace("\"Ayu\"", "\"Eve\"");
        assert!(matches!(
            decode_snapshot(&tampered),
            Err(SnapshotError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let mut envelope = SnapshotEnvelope::seal(sample_collection()).unwrap();
        envelope.version = SNAPSHOT_VERSION + 1;
        let text = serde_json::to_string(&envelope).unwrap();
        assert!(matches!(
            decode_snapshot(&text),
            Err(SnapshotError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn legacy_array_derives_next_id() {
        let text = r#"[{"id":2,"name":"A","mistakeTxn":1,"mistakeAmount":0},
                       {"id":5,"name":"B","mistakeTxn":0,"mistakeAmount":0}]"#;
        let collection = decode_snapshot(text).unwrap();
        assert_eq!(collection.records.len(), 2);
        assert_eq!(collection.next_id, 6);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(
            decode_snapshot("{\"foo\":1}"),
            Err(SnapshotError::UnrecognizedShape)
        ));
        assert!(matches!(
            decode_snapshot("not json"),
            Err(SnapshotError::Json(_))
        ));
        assert!(decode_snapshot("42").is_err());
    }
}
