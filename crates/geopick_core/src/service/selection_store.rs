//! Current selection mirrored to durable key/value storage.
//!
//! # Responsibility
//! - Hold at most one selected record in memory.
//! - Restore it once at startup and persist it on every replacement.
//!
//! # Invariants
//! - The selection is replaced wholesale, never partially mutated.
//! - A missing, unreadable or undecodable snapshot yields an empty selection.
//! - There is no clear operation.

use crate::model::record::Record;
use crate::repo::kv_store::{KeyValueStore, RepoError, RepoResult};
use log::{info, warn};

/// Storage key holding the JSON snapshot of the selected record.
pub const SELECTION_KEY: &str = "selected_user";

/// In-memory selection backed by an injected store.
pub struct SelectionStore<S: KeyValueStore> {
    storage: S,
    current: Option<Record>,
}

impl<S: KeyValueStore> SelectionStore<S> {
    /// Restores the persisted selection from `storage`.
    ///
    /// Never fails: read and decode problems are logged and fall back to an
    /// empty selection.
    pub fn load(storage: S) -> Self {
        let current = match storage.load(SELECTION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Record>(&raw) {
                Ok(record) => {
                    info!(
                        "event=selection_load module=selection status=ok restored=true record_id={}",
                        record.id
                    );
                    Some(record)
                }
                Err(err) => {
                    warn!(
                        "event=selection_load module=selection status=fallback error_code=selection_decode_failed error={}",
                        err
                    );
                    None
                }
            },
            Ok(None) => {
                info!("event=selection_load module=selection status=ok restored=false");
                None
            }
            Err(err) => {
                warn!(
                    "event=selection_load module=selection status=fallback error_code=selection_read_failed error={}",
                    err
                );
                None
            }
        };

        Self { storage, current }
    }

    /// Returns the selected record, if any.
    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    /// Replaces the selection and writes it through to storage.
    ///
    /// The in-memory value is replaced even when the write fails; the error
    /// is returned so the caller can report it.
    pub fn set(&mut self, record: Record) -> RepoResult<()> {
        let encoded = serde_json::to_string(&record);
        let record_id = record.id;
        self.current = Some(record);

        let result = encoded
            .map_err(RepoError::from)
            .and_then(|raw| self.storage.save(SELECTION_KEY, &raw));
        match &result {
            Ok(()) => info!(
                "event=selection_save module=selection status=ok record_id={}",
                record_id
            ),
            Err(err) => warn!(
                "event=selection_save module=selection status=error record_id={} error={}",
                record_id, err
            ),
        }
        result
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionStore, SELECTION_KEY};
    use crate::model::record::Record;
    use crate::repo::kv_store::{KeyValueStore, MemoryKeyValueStore};

    #[test]
    fn empty_storage_loads_empty_selection() {
        let storage = MemoryKeyValueStore::new();
        let store = SelectionStore::load(&storage);
        assert!(store.current().is_none());
    }

    #[test]
    fn set_then_fresh_load_round_trips() {
        let storage = MemoryKeyValueStore::new();
        let record = Record::new(1, "Leanne Graham", "-37.3159", "81.1496");

        let mut store = SelectionStore::load(&storage);
        store.set(record.clone()).unwrap();
        assert_eq!(store.current(), Some(&record));

        let reloaded = SelectionStore::load(&storage);
        assert_eq!(reloaded.current(), Some(&record));
    }

    #[test]
    fn set_keeps_unknown_geo_fields_in_snapshot() {
        let storage = MemoryKeyValueStore::new();
        let record: Record = serde_json::from_str(
            r#"{"id":1,"name":"x","address":{"geo":{"lat":"1","lng":"2","alt":"9"}}}"#,
        )
        .unwrap();

        let mut store = SelectionStore::load(&storage);
        store.set(record.clone()).unwrap();

        let raw = storage.load(SELECTION_KEY).unwrap().unwrap();
        let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved["address"]["geo"]["alt"], "9");
        assert_eq!(SelectionStore::load(&storage).current(), Some(&record));
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_empty() {
        let storage = MemoryKeyValueStore::new();
        storage.save(SELECTION_KEY, "{not json").unwrap();

        let store = SelectionStore::load(&storage);
        assert!(store.current().is_none());
    }

    #[test]
    fn snapshot_missing_geo_falls_back_to_empty() {
        let storage = MemoryKeyValueStore::new();
        storage
            .save(SELECTION_KEY, r#"{"id":1,"name":"x","address":{}}"#)
            .unwrap();

        let store = SelectionStore::load(&storage);
        assert!(store.current().is_none());
    }
}
