//! Driven port for the ledger's world-state key-value API.
//!
//! The hosting runtime owns storage, ordering and endorsement. Contracts only
//! see keyed reads and writes scoped to the current invocation.

use async_trait::async_trait;
use composite_key::CompositeKey;
use thiserror::Error;

/// Errors raised by ledger store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerStoreError {
    /// The ledger could not be reached.
    #[error("ledger connection failed: {message}")]
    Connection {
        /// Adapter message.
        message: String,
    },
    /// A read or write was rejected.
    #[error("ledger query failed: {message}")]
    Query {
        /// Adapter message.
        message: String,
    },
    /// Stored state could not be read back.
    #[error("ledger state at {key} is corrupted: {message}")]
    Corrupted {
        /// Rendered key of the unreadable entry.
        key: String,
        /// Parser message.
        message: String,
    },
}

impl LedgerStoreError {
    /// Construct [`Self::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct [`Self::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct [`Self::Corrupted`].
    pub fn corrupted(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupted {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Keyed access to world state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>, LedgerStoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn put_state(&self, key: &CompositeKey, value: Vec<u8>) -> Result<(), LedgerStoreError>;

    /// Remove the value stored under `key`. Absent keys are not an error.
    async fn delete_state(&self, key: &CompositeKey) -> Result<(), LedgerStoreError>;
}
