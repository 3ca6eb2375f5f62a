//! Typed record access over the ledger store port.

use std::fmt::Display;
use std::sync::Arc;

use composite_key::CompositeKey;
use tracing::debug;

use super::ports::{LedgerStore, LedgerStoreError};
use super::{ContractError, LedgerRecord};

/// Reads and writes [`LedgerRecord`]s under composite keys.
pub(crate) struct RecordLedger<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for RecordLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ?Sized> RecordLedger<S> {
    pub(crate) fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> RecordLedger<S>
where
    S: LedgerStore + ?Sized,
{
    /// Load and decode the record under `key`, if present.
    pub(crate) async fn find<R: LedgerRecord>(
        &self,
        key: &CompositeKey,
    ) -> Result<Option<R>, ContractError> {
        let bytes = self.store.get_state(key).await.map_err(map_ledger_error)?;
        bytes.as_deref().map(R::decode).transpose()
    }

    /// Load the record under `key`, failing when it is absent.
    pub(crate) async fn require<R: LedgerRecord>(
        &self,
        key: &CompositeKey,
        id: impl Display + Send,
    ) -> Result<R, ContractError> {
        self.find(key)
            .await?
            .ok_or_else(|| ContractError::record_not_found(R::KIND, id.to_string()))
    }

    /// Whether any value is stored under `key`.
    pub(crate) async fn contains(&self, key: &CompositeKey) -> Result<bool, ContractError> {
        let bytes = self.store.get_state(key).await.map_err(map_ledger_error)?;
        Ok(bytes.is_some())
    }

    pub(crate) async fn save<R: LedgerRecord>(
        &self,
        key: &CompositeKey,
        record: &R,
    ) -> Result<(), ContractError> {
        let bytes = record.encode()?;
        debug!(key = %key, kind = %R::KIND, bytes = bytes.len(), "writing record");
        self.store
            .put_state(key, bytes)
            .await
            .map_err(map_ledger_error)
    }

    pub(crate) async fn remove(&self, key: &CompositeKey) -> Result<(), ContractError> {
        self.store.delete_state(key).await.map_err(map_ledger_error)
    }
}

fn map_ledger_error(error: LedgerStoreError) -> ContractError {
    match error {
        LedgerStoreError::Connection { message } => {
            ContractError::ledger(format!("ledger unavailable: {message}"))
        }
        LedgerStoreError::Query { message } => {
            ContractError::ledger(format!("ledger query failed: {message}"))
        }
        LedgerStoreError::Corrupted { key, message } => {
            ContractError::ledger(format!("ledger state at {key} is corrupted: {message}"))
        }
    }
}
