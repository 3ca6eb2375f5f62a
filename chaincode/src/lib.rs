//! Property registration network chaincode.
//!
//! The crate is organised as a hexagon: `domain` holds records, transition
//! rules, and the contract services; `domain::ports` declares the ledger and
//! access-control boundaries; `outbound` provides adapters for those ports;
//! `inbound` turns named invocations into service calls.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod state_builders;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ChaincodeConfig, ChaincodeSettings, ConfigError};
pub use inbound::{ChaincodeRouter, Invocation};
pub use state_builders::{build_ports, build_router};
