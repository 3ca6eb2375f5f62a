//! Participant contract service.
//!
//! Implements [`UserContract`] over the ledger store port. Every operation is
//! a single read-validate-write pass; nothing is written until every check
//! has passed, so a failed call leaves the ledger untouched.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use super::ledger::RecordLedger;
use crate::domain::ports::{
    LedgerStore, NewUserRequest, PropertyPurchaseRequest, PropertyRegistrationRequest,
    PropertyUpdateRequest, RechargeRequest, UserContract,
};
use crate::domain::{
    ContractError, ContractPolicy, Namespaces, Property, PropertyId, PropertyRequest,
    PropertyStatus, RecordKind, TransactionCode, User, UserId, UserRequest,
};

/// Participant-facing contract service.
pub struct UserContractService<S: ?Sized> {
    ledger: RecordLedger<S>,
    namespaces: Arc<Namespaces>,
    policy: ContractPolicy,
    clock: Arc<dyn Clock>,
}

impl<S: ?Sized> Clone for UserContractService<S> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            namespaces: Arc::clone(&self.namespaces),
            policy: self.policy,
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: ?Sized> UserContractService<S> {
    /// Create a service writing through `store`.
    pub fn new(
        store: Arc<S>,
        namespaces: Arc<Namespaces>,
        policy: ContractPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger: RecordLedger::new(store),
            namespaces,
            policy,
            clock,
        }
    }
}

#[async_trait]
impl<S> UserContract for UserContractService<S>
where
    S: LedgerStore + ?Sized,
{
    async fn request_new_user(
        &self,
        request: NewUserRequest,
    ) -> Result<UserRequest, ContractError> {
        let key = self.namespaces.user_request_key(&request.user_id)?;
        if self.ledger.contains(&key).await? {
            return Err(ContractError::duplicate_request(
                RecordKind::UserRequest,
                request.user_id.as_str(),
            ));
        }

        let user_key = self.namespaces.user_key(&request.user_id)?;
        if self.ledger.contains(&user_key).await? {
            return Err(ContractError::already_approved(
                RecordKind::User,
                request.user_id.as_str(),
            ));
        }

        let NewUserRequest {
            user_id,
            name,
            email,
            phone,
            national_id,
        } = request;
        let record = UserRequest {
            user_id,
            name,
            email,
            phone,
            national_id,
            created_at: self.clock.utc(),
        };
        self.ledger.save(&key, &record).await?;
        info!(user_id = %record.user_id, "user request recorded");
        Ok(record)
    }

    async fn recharge_account(&self, request: RechargeRequest) -> Result<User, ContractError> {
        let code: TransactionCode = request.transaction_code.parse()?;
        let key = self.namespaces.user_key(&request.user_id)?;
        let mut user: User = self.ledger.require(&key, &request.user_id).await?;

        user.credit(code)?;
        self.ledger.save(&key, &user).await?;
        info!(
            user_id = %user.user_id,
            transaction_code = %code,
            coin_balance = user.coin_balance,
            "account recharged"
        );
        Ok(user)
    }

    async fn property_registration_request(
        &self,
        request: PropertyRegistrationRequest,
    ) -> Result<PropertyRequest, ContractError> {
        let status: PropertyStatus = request.status.parse()?;
        let key = self.namespaces.property_request_key(&request.property_id)?;
        if self.ledger.contains(&key).await? {
            return Err(ContractError::duplicate_request(
                RecordKind::PropertyRequest,
                request.property_id.as_str(),
            ));
        }
        let property_key = self.namespaces.property_key(&request.property_id)?;
        if self.ledger.contains(&property_key).await? {
            return Err(ContractError::already_approved(
                RecordKind::Property,
                request.property_id.as_str(),
            ));
        }

        let owner = self.namespaces.owner(
            self.policy.owner_keying,
            request.owner_name,
            request.national_id,
        )?;
        let record = PropertyRequest::new(
            request.property_id,
            owner,
            request.price,
            status,
            self.clock.utc(),
        );
        self.ledger.save(&key, &record).await?;
        info!(
            property_id = %record.property_id,
            owner = %record.owner_key,
            status = %record.status,
            "property registration requested"
        );
        Ok(record)
    }

    async fn update_property(
        &self,
        request: PropertyUpdateRequest,
    ) -> Result<Property, ContractError> {
        let status: PropertyStatus = request.status.parse()?;
        let key = self.namespaces.property_key(&request.property_id)?;
        let mut property: Property = self.ledger.require(&key, &request.property_id).await?;

        let owner = self.namespaces.owner(
            self.policy.owner_keying,
            request.owner_name,
            request.national_id,
        )?;
        if let Err(err) = property.update_by(owner, status) {
            warn!(property_id = %property.property_id, error = %err, "property update rejected");
            return Err(err);
        }
        self.ledger.save(&key, &property).await?;
        info!(
            property_id = %property.property_id,
            status = %property.status,
            "property updated"
        );
        Ok(property)
    }

    async fn purchase_property(
        &self,
        request: PropertyPurchaseRequest,
    ) -> Result<Property, ContractError> {
        let key = self.namespaces.property_key(&request.property_id)?;
        let mut property: Property = self.ledger.require(&key, &request.property_id).await?;

        let buyer = self.namespaces.owner(
            self.policy.owner_keying,
            request.buyer_name,
            request.buyer_national_id,
        )?;
        if let Err(err) = property.purchase_by(buyer) {
            warn!(property_id = %property.property_id, error = %err, "property purchase rejected");
            return Err(err);
        }
        self.ledger.save(&key, &property).await?;
        info!(
            property_id = %property.property_id,
            owner = %property.owner_key,
            status = %property.status,
            "property purchased"
        );
        Ok(property)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, ContractError> {
        let key = self.namespaces.user_key(user_id)?;
        self.ledger.require(&key, user_id).await
    }

    async fn view_property(&self, property_id: &PropertyId) -> Result<Property, ContractError> {
        let key = self.namespaces.property_key(property_id)?;
        self.ledger.require(&key, property_id).await
    }
}

#[cfg(test)]
#[path = "user_contract_service_tests.rs"]
mod tests;
