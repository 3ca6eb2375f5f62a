//! Port bundle shared by the invocation router.

use std::sync::Arc;

use crate::domain::ports::{AccessControl, RegistrarContract, UserContract};

/// Parameter object bundling the port implementations the router needs.
#[derive(Clone)]
pub struct ChaincodePorts {
    /// Participant operations.
    pub user_contract: Arc<dyn UserContract>,
    /// Registrar operations.
    pub registrar_contract: Arc<dyn RegistrarContract>,
    /// Role checks.
    pub access_control: Arc<dyn AccessControl>,
}
