//! Registrar contract service.
//!
//! Approval promotes a pending request into its approved namespace. The
//! approved key is checked first so a repeated approval can never reset a
//! user's balance or hand a property back to a previous owner.

use std::sync::Arc;

use async_trait::async_trait;
use composite_key::CompositeKey;
use tracing::info;

use super::ledger::RecordLedger;
use crate::domain::ports::{LedgerStore, RegistrarContract};
use crate::domain::{
    ContractError, ContractPolicy, Namespaces, Property, PropertyId, PropertyRequest, RecordKind,
    RequestRetention, User, UserId, UserRequest,
};

/// Registrar-facing contract service.
pub struct RegistrarContractService<S: ?Sized> {
    ledger: RecordLedger<S>,
    namespaces: Arc<Namespaces>,
    policy: ContractPolicy,
}

impl<S: ?Sized> Clone for RegistrarContractService<S> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            namespaces: Arc::clone(&self.namespaces),
            policy: self.policy,
        }
    }
}

impl<S: ?Sized> RegistrarContractService<S> {
    /// Create a service writing through `store`.
    pub fn new(store: Arc<S>, namespaces: Arc<Namespaces>, policy: ContractPolicy) -> Self {
        Self {
            ledger: RecordLedger::new(store),
            namespaces,
            policy,
        }
    }
}

impl<S> RegistrarContractService<S>
where
    S: LedgerStore + ?Sized,
{
    async fn retire_request(&self, key: &CompositeKey) -> Result<(), ContractError> {
        match self.policy.request_retention {
            RequestRetention::Retain => Ok(()),
            RequestRetention::Delete => self.ledger.remove(key).await,
        }
    }
}

#[async_trait]
impl<S> RegistrarContract for RegistrarContractService<S>
where
    S: LedgerStore + ?Sized,
{
    async fn approve_new_user(&self, user_id: &UserId) -> Result<User, ContractError> {
        let request_key = self.namespaces.user_request_key(user_id)?;
        let request: UserRequest = self.ledger.require(&request_key, user_id).await?;

        let user_key = self.namespaces.user_key(user_id)?;
        if self.ledger.contains(&user_key).await? {
            return Err(ContractError::already_approved(
                RecordKind::User,
                user_id.as_str(),
            ));
        }

        let user = User::approve(request);
        self.ledger.save(&user_key, &user).await?;
        self.retire_request(&request_key).await?;
        info!(user_id = %user.user_id, coin_balance = user.coin_balance, "user approved");
        Ok(user)
    }

    async fn approve_property_registration(
        &self,
        property_id: &PropertyId,
    ) -> Result<Property, ContractError> {
        let request_key = self.namespaces.property_request_key(property_id)?;
        let request: PropertyRequest = self.ledger.require(&request_key, property_id).await?;

        let property_key = self.namespaces.property_key(property_id)?;
        if self.ledger.contains(&property_key).await? {
            return Err(ContractError::already_approved(
                RecordKind::Property,
                property_id.as_str(),
            ));
        }

        let property = Property::approve(request);
        self.ledger.save(&property_key, &property).await?;
        self.retire_request(&request_key).await?;
        info!(
            property_id = %property.property_id,
            owner = %property.owner_key,
            status = %property.status,
            "property approved"
        );
        Ok(property)
    }

    async fn view_user(&self, user_id: &UserId) -> Result<User, ContractError> {
        let key = self.namespaces.user_key(user_id)?;
        self.ledger.require(&key, user_id).await
    }

    async fn view_property(&self, property_id: &PropertyId) -> Result<Property, ContractError> {
        let key = self.namespaces.property_key(property_id)?;
        self.ledger.require(&key, property_id).await
    }
}

#[cfg(test)]
#[path = "registrar_service_tests.rs"]
mod tests;
