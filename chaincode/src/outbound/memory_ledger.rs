//! In-memory world state.
//!
//! Stands in for the hosting runtime's world state when the contracts run
//! outside a peer: the `regnet-invoke` binary and the test suites both drive
//! the contracts through it. State can be exported to and restored from a
//! [`LedgerSnapshot`].

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use composite_key::CompositeKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{LedgerStore, LedgerStoreError};

/// Snapshot format version written by [`InMemoryLedgerStore::snapshot`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// One key and its JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Encoded composite key.
    pub key: CompositeKey,
    /// Stored record.
    pub value: Value,
}

/// Serialisable copy of the whole world state, ordered by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Format version.
    pub version: u32,
    /// Stored entries.
    pub entries: Vec<SnapshotEntry>,
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            entries: Vec::new(),
        }
    }
}

/// [`LedgerStore`] backed by an ordered map guarded by a mutex.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: Mutex<BTreeMap<CompositeKey, Vec<u8>>>,
}

impl InMemoryLedgerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerStoreError::Corrupted`] when the snapshot version is
    /// unsupported or a value cannot be re-encoded.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, LedgerStoreError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(LedgerStoreError::corrupted(
                "snapshot",
                format!(
                    "unsupported snapshot version {}; expected {SNAPSHOT_VERSION}",
                    snapshot.version
                ),
            ));
        }
        let mut state = BTreeMap::new();
        for entry in snapshot.entries {
            let bytes = serde_json::to_vec(&entry.value).map_err(|err| {
                LedgerStoreError::corrupted(entry.key.to_string(), err.to_string())
            })?;
            state.insert(entry.key, bytes);
        }
        Ok(Self {
            state: Mutex::new(state),
        })
    }

    /// Export the current state.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerStoreError::Corrupted`] when a stored value is not
    /// JSON, or [`LedgerStoreError::Connection`] if the state lock is
    /// poisoned.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerStoreError> {
        let state = self.lock()?;
        let entries = state
            .iter()
            .map(|(key, bytes)| {
                serde_json::from_slice(bytes)
                    .map(|value| SnapshotEntry {
                        key: key.clone(),
                        value,
                    })
                    .map_err(|err| LedgerStoreError::corrupted(key.to_string(), err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            entries,
        })
    }

    /// Number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerStoreError::Connection`] if the state lock is poisoned.
    pub fn len(&self) -> Result<usize, LedgerStoreError> {
        Ok(self.lock()?.len())
    }

    /// Whether the store holds no keys.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerStoreError::Connection`] if the state lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, LedgerStoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<CompositeKey, Vec<u8>>>, LedgerStoreError> {
        self.state
            .lock()
            .map_err(|_| LedgerStoreError::connection("in-memory ledger lock poisoned"))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>, LedgerStoreError> {
        let value = self.lock()?.get(key).cloned();
        debug!(key = %key, found = value.is_some(), "get_state");
        Ok(value)
    }

    async fn put_state(&self, key: &CompositeKey, value: Vec<u8>) -> Result<(), LedgerStoreError> {
        debug!(key = %key, bytes = value.len(), "put_state");
        self.lock()?.insert(key.clone(), value);
        Ok(())
    }

    async fn delete_state(&self, key: &CompositeKey) -> Result<(), LedgerStoreError> {
        let removed = self.lock()?.remove(key).is_some();
        debug!(key = %key, removed, "delete_state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn key() -> CompositeKey {
        CompositeKey::new("org.test.user", ["U1"]).expect("valid key")
    }

    #[rstest]
    #[tokio::test]
    async fn reads_back_written_state(key: CompositeKey) {
        let store = InMemoryLedgerStore::new();
        assert_eq!(store.get_state(&key).await.expect("get"), None);

        store
            .put_state(&key, b"{\"a\":1}".to_vec())
            .await
            .expect("put");
        assert_eq!(
            store.get_state(&key).await.expect("get"),
            Some(b"{\"a\":1}".to_vec())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_idempotent(key: CompositeKey) {
        let store = InMemoryLedgerStore::new();
        store.put_state(&key, b"{}".to_vec()).await.expect("put");
        store.delete_state(&key).await.expect("first delete");
        store.delete_state(&key).await.expect("second delete");
        assert!(store.is_empty().expect("lock"));
    }

    #[rstest]
    #[tokio::test]
    async fn snapshot_restores_state(key: CompositeKey) {
        let store = InMemoryLedgerStore::new();
        store
            .put_state(&key, br#"{"userId":"U1"}"#.to_vec())
            .await
            .expect("put");

        let snapshot = store.snapshot().expect("snapshot");
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.entries[0].value, json!({"userId": "U1"}));

        let restored = InMemoryLedgerStore::from_snapshot(snapshot).expect("restore");
        let bytes = restored
            .get_state(&key)
            .await
            .expect("get")
            .expect("restored value");
        let value: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value, json!({"userId": "U1"}));
    }

    #[rstest]
    #[tokio::test]
    async fn snapshot_rejects_non_json_values(key: CompositeKey) {
        let store = InMemoryLedgerStore::new();
        store.put_state(&key, vec![0xff, 0x00]).await.expect("put");
        let err = store.snapshot().expect_err("non-json value");
        assert!(matches!(err, LedgerStoreError::Corrupted { .. }));
    }

    #[rstest]
    fn rejects_unknown_snapshot_version() {
        let snapshot = LedgerSnapshot {
            version: 7,
            entries: Vec::new(),
        };
        let err = InMemoryLedgerStore::from_snapshot(snapshot).expect_err("bad version");
        assert!(err.to_string().contains("unsupported snapshot version 7"));
    }
}
