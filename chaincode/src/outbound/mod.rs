//! Outbound adapters implementing the driven ports.
//!
//! - **memory_ledger**: in-process world state for local runs and tests
//! - **snapshot_file**: JSON snapshots of that state on disk
//! - **access_control**: MSP-based role checks
//!
//! Adapters translate between port types and their backing representation.
//! They contain no contract rules.

pub mod access_control;
pub mod memory_ledger;
pub mod snapshot_file;

pub use access_control::{DEFAULT_REGISTRAR_MSP, MspAccessControl};
pub use memory_ledger::{InMemoryLedgerStore, LedgerSnapshot, SNAPSHOT_VERSION, SnapshotEntry};
pub use snapshot_file::{SnapshotFileError, load_snapshot, save_snapshot};
