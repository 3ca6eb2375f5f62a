//! Inbound adapter: named contract invocations.
//!
//! The hosting runtime hands the chaincode a contract name, a function name,
//! positional string arguments, and the caller's identity. This module checks
//! the caller's role, parses the arguments, and dispatches to the driving
//! ports. Results come back as JSON values.

mod arguments;
mod invocation;
mod router;
pub mod state;

pub use invocation::{ContractNames, Invocation};
pub use router::ChaincodeRouter;
pub use state::ChaincodePorts;
