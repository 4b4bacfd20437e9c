//! `localStorage` persistence for the record collection and UI preferences.
use mistake_core::constants::{PRESET_STORAGE_KEY, STORAGE_KEY};
use mistake_core::{Preset, RecordCollection, SnapshotStorage, decode_snapshot, encode_snapshot};
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::dom;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("localStorage {op} failed: {message}")]
    Operation { op: &'static str, message: String },
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] mistake_core::SnapshotError),
}

impl StorageError {
    fn op(op: &'static str, err: &JsValue) -> Self {
        Self::Operation {
            op,
            message: dom::js_error_message(err),
        }
    }
}

/// Record collection stored under a single `localStorage` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserStorage {
    key: String,
}

impl BrowserStorage {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn handle() -> Result<web_sys::Storage, StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            dom::local_storage()
                .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Err(StorageError::Unavailable(
                "not running in a browser".to_string(),
            ))
        }
    }
}

impl Default for BrowserStorage {
    fn default() -> Self {
        Self::new(STORAGE_KEY)
    }
}

impl SnapshotStorage for BrowserStorage {
    type Error = StorageError;

    fn save(&self, collection: &RecordCollection) -> Result<(), Self::Error> {
        let text = encode_snapshot(collection)?;
        Self::handle()?
            .set_item(&self.key, &text)
            .map_err(|err| StorageError::op("write", &err))
    }

    fn load(&self) -> Result<Option<RecordCollection>, Self::Error> {
        let raw = Self::handle()?
            .get_item(&self.key)
            .map_err(|err| StorageError::op("read", &err))?;
        let Some(text) = raw else {
            return Ok(None);
        };
        match decode_snapshot(&text) {
            Ok(collection) => Ok(Some(collection)),
            Err(err) => {
                let message = format!("ignoring stored records: {err}");
                log::warn!("{message}");
                dom::console_error(&message);
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), Self::Error> {
        Self::handle()?
            .remove_item(&self.key)
            .map_err(|err| StorageError::op("remove", &err))
    }
}

/// The preset chosen in an earlier session, or the default.
#[must_use]
pub fn saved_preset() -> Preset {
    #[cfg(target_arch = "wasm32")]
    {
        dom::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(PRESET_STORAGE_KEY).ok().flatten())
            .and_then(|label| Preset::parse(&label))
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Preset::default()
    }
}

/// Remember `preset` for future sessions.
pub fn save_preset(preset: Preset) {
    #[cfg(target_arch = "wasm32")]
    {
        let result = dom::local_storage()
            .and_then(|storage| storage.set_item(PRESET_STORAGE_KEY, preset.key()));
        if let Err(err) = result {
            log::warn!(
                "failed to persist preset {preset}: {}",
                dom::js_error_message(&err)
            );
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (PRESET_STORAGE_KEY, preset);
    }
}
