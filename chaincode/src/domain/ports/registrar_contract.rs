//! Driving port for registrar operations.
//!
//! Callers must hold the registrar role; the invocation boundary enforces it
//! before any method here runs.

use async_trait::async_trait;

use crate::domain::{ContractError, Property, PropertyId, User, UserId};

/// Operations reserved for registrars.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrarContract: Send + Sync {
    /// Promote a pending account request into a user with no coins.
    async fn approve_new_user(&self, user_id: &UserId) -> Result<User, ContractError>;

    /// Promote a pending property registration into a property.
    async fn approve_property_registration(
        &self,
        property_id: &PropertyId,
    ) -> Result<Property, ContractError>;

    /// Read an approved account.
    async fn view_user(&self, user_id: &UserId) -> Result<User, ContractError>;

    /// Read an approved property.
    async fn view_property(&self, property_id: &PropertyId) -> Result<Property, ContractError>;
}
