//! JSON adapter over the storage medium.
//!
//! # Responsibility
//! - Serialize values to JSON text on save, parse and type them on load.
//! - Turn every failure into an explicit outcome instead of an error return.
//!
//! # Invariants
//! - `save`/`load` never panic and never return `Err`; callers choose whether
//!   to look at the outcome.
//! - Every failed outcome is logged with the key and a reason, never with the
//!   payload itself.
//! - A payload that does not decode into the requested type is reported as
//!   `DecodeFailed`, never handed back as wrongly-shaped data.

use crate::store::kv_store::KeyValueStore;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Result of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Value could not be encoded (or raw text was not JSON).
    EncodeFailed(String),
    /// Storage medium rejected the write.
    StoreFailed(String),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Result of a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    /// Nothing stored under the key (first run).
    Missing,
    /// Stored text is not JSON or does not match the requested shape.
    DecodeFailed(String),
    /// Storage medium could not be read.
    StoreFailed(String),
}

impl<T> LoadOutcome<T> {
    /// Collapses every non-`Loaded` outcome to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Missing | Self::DecodeFailed(_) | Self::StoreFailed(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadOutcome<U> {
        match self {
            Self::Loaded(value) => LoadOutcome::Loaded(f(value)),
            Self::Missing => LoadOutcome::Missing,
            Self::DecodeFailed(reason) => LoadOutcome::DecodeFailed(reason),
            Self::StoreFailed(reason) => LoadOutcome::StoreFailed(reason),
        }
    }
}

/// Typed JSON access to a shared storage medium.
#[derive(Clone)]
pub struct SliceStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SliceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Underlying medium, shared with writer queues.
    pub fn medium(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.kv)
    }

    /// Encodes `value` and writes it under `key`, replacing any prior value.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> SaveOutcome {
        match serde_json::to_string(value) {
            Ok(text) => self.write_text(key, &text),
            Err(err) => {
                error!(
                    "event=slice_save module=store status=error key={key} error_code=encode_failed error={err}"
                );
                SaveOutcome::EncodeFailed(err.to_string())
            }
        }
    }

    /// Writes caller-provided JSON text. Text that does not parse is refused.
    pub fn save_raw(&self, key: &str, json: &str) -> SaveOutcome {
        if let Err(err) = serde_json::from_str::<serde_json::Value>(json) {
            warn!(
                "event=slice_save module=store status=error key={key} error_code=not_json error={err}"
            );
            return SaveOutcome::EncodeFailed(err.to_string());
        }
        self.write_text(key, json)
    }

    /// Fire-and-forget save: failures are logged and otherwise ignored.
    pub fn save_quietly<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let _ = self.save(key, value);
    }

    /// Reads and decodes the value stored under `key`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> LoadOutcome<T> {
        match self.load_raw(key) {
            LoadOutcome::Loaded(text) => decode(key, &text),
            LoadOutcome::Missing => LoadOutcome::Missing,
            LoadOutcome::DecodeFailed(reason) => LoadOutcome::DecodeFailed(reason),
            LoadOutcome::StoreFailed(reason) => LoadOutcome::StoreFailed(reason),
        }
    }

    /// Reads the stored text without decoding it.
    pub fn load_raw(&self, key: &str) -> LoadOutcome<String> {
        match self.kv.get(key) {
            Ok(Some(text)) => {
                debug!(
                    "event=slice_load module=store status=ok key={key} bytes={}",
                    text.len()
                );
                LoadOutcome::Loaded(text)
            }
            Ok(None) => {
                debug!("event=slice_load module=store status=missing key={key}");
                LoadOutcome::Missing
            }
            Err(err) => {
                error!(
                    "event=slice_load module=store status=error key={key} error_code=store_failed error={err}"
                );
                LoadOutcome::StoreFailed(err.to_string())
            }
        }
    }

    /// Original contract: any trouble reads as "nothing stored".
    pub fn load_or_none<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.load(key).into_option()
    }

    fn write_text(&self, key: &str, text: &str) -> SaveOutcome {
        match self.kv.set(key, text) {
            Ok(()) => {
                debug!(
                    "event=slice_save module=store status=ok key={key} bytes={}",
                    text.len()
                );
                SaveOutcome::Saved
            }
            Err(err) => {
                error!(
                    "event=slice_save module=store status=error key={key} error_code=store_failed error={err}"
                );
                SaveOutcome::StoreFailed(err.to_string())
            }
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, text: &str) -> LoadOutcome<T> {
    match serde_json::from_str::<T>(text) {
        Ok(value) => LoadOutcome::Loaded(value),
        Err(err) => {
            warn!(
                "event=slice_load module=store status=error key={key} error_code=decode_failed error={err}"
            );
            LoadOutcome::DecodeFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadOutcome, SaveOutcome, SliceStore};
    use crate::store::kv_store::{KeyValueStore, MemoryKvStore};
    use std::sync::Arc;

    fn memory_store() -> (Arc<MemoryKvStore>, SliceStore) {
        let kv = Arc::new(MemoryKvStore::new());
        let store = SliceStore::new(kv.clone());
        (kv, store)
    }

    #[test]
    fn save_then_load_returns_equal_value() {
        let (_, store) = memory_store();
        let value = vec!["arroz".to_string(), "feijão".to_string()];

        assert_eq!(store.save("itens", &value), SaveOutcome::Saved);
        assert_eq!(store.load::<Vec<String>>("itens"), LoadOutcome::Loaded(value));
    }

    #[test]
    fn load_of_unwritten_key_is_missing() {
        let (_, store) = memory_store();
        assert!(store.load::<Vec<String>>("apostas").is_missing());
        assert_eq!(store.load_or_none::<Vec<String>>("apostas"), None);
    }

    #[test]
    fn wrong_shape_is_decode_failure_not_data() {
        let (kv, store) = memory_store();
        kv.set("tarefas", r#"{"not":"a list"}"#).unwrap();

        let outcome = store.load::<Vec<String>>("tarefas");
        assert!(matches!(outcome, LoadOutcome::DecodeFailed(_)));
        assert_eq!(store.load_or_none::<Vec<String>>("tarefas"), None);
    }

    #[test]
    fn failing_medium_is_reported_without_panicking() {
        let (kv, store) = memory_store();
        kv.set_unavailable(true);

        assert!(matches!(
            store.save("k", &[1, 2, 3]),
            SaveOutcome::StoreFailed(_)
        ));
        store.save_quietly("k", &[1, 2, 3]);
        assert!(matches!(
            store.load::<Vec<i32>>("k"),
            LoadOutcome::StoreFailed(_)
        ));
    }

    #[test]
    fn save_raw_refuses_non_json_text() {
        let (kv, store) = memory_store();

        assert!(matches!(
            store.save_raw("k", "{broken"),
            SaveOutcome::EncodeFailed(_)
        ));
        assert_eq!(kv.get("k").unwrap(), None);
        assert!(store.save_raw("k", "[]").is_saved());
    }
}
