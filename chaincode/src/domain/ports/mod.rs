//! Domain ports and supporting types for the hexagonal boundary.

mod access_control;
mod ledger_store;
mod registrar_contract;
mod user_contract;

#[cfg(test)]
pub use access_control::MockAccessControl;
pub use access_control::{AccessControl, CallerIdentity, Role};
#[cfg(test)]
pub use ledger_store::MockLedgerStore;
pub use ledger_store::{LedgerStore, LedgerStoreError};
#[cfg(test)]
pub use registrar_contract::MockRegistrarContract;
pub use registrar_contract::RegistrarContract;
#[cfg(test)]
pub use user_contract::MockUserContract;
pub use user_contract::{
    NewUserRequest, PropertyPurchaseRequest, PropertyRegistrationRequest, PropertyUpdateRequest,
    RechargeRequest, UserContract,
};
