//! Driving port for participant-facing operations.
//!
//! Inbound adapters parse invocation arguments into these request types and
//! call the port; the contract service owns every ledger read and write.

use async_trait::async_trait;

use crate::domain::{
    ContractError, EmailAddress, NationalId, PersonName, PhoneNumber, Property, PropertyId,
    PropertyRequest, User, UserId, UserRequest,
};

/// Input for `requestNewUser`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRequest {
    /// Requested account identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: PersonName,
    /// Contact e-mail.
    pub email: EmailAddress,
    /// Contact phone.
    pub phone: PhoneNumber,
    /// Government identity number.
    pub national_id: NationalId,
}

/// Input for `rechargeAccount`.
///
/// `transaction_code` stays raw so the service can reject unknown codes
/// before touching the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RechargeRequest {
    /// Account to credit.
    pub user_id: UserId,
    /// Caller-supplied name.
    pub name: PersonName,
    /// Caller-supplied national ID.
    pub national_id: NationalId,
    /// Recharge code, e.g. `upg500`.
    pub transaction_code: String,
}

/// Input for `propertyRegistrationRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRegistrationRequest {
    /// Parcel identifier.
    pub property_id: PropertyId,
    /// Requester's display name.
    pub owner_name: PersonName,
    /// Requester's national ID.
    pub national_id: NationalId,
    /// Registered price.
    pub price: u64,
    /// Requested status, `registered` or `onSale`.
    pub status: String,
}

/// Input for `updateProperty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyUpdateRequest {
    /// Parcel identifier.
    pub property_id: PropertyId,
    /// Caller's display name.
    pub owner_name: PersonName,
    /// Caller's national ID.
    pub national_id: NationalId,
    /// New status, `registered` or `onSale`.
    pub status: String,
}

/// Input for `purchaseProperty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPurchaseRequest {
    /// Parcel identifier.
    pub property_id: PropertyId,
    /// Buyer's display name.
    pub buyer_name: PersonName,
    /// Buyer's national ID.
    pub buyer_national_id: NationalId,
}

/// Operations open to any authenticated participant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserContract: Send + Sync {
    /// Record a pending account request.
    async fn request_new_user(&self, request: NewUserRequest)
    -> Result<UserRequest, ContractError>;

    /// Credit an approved account.
    async fn recharge_account(&self, request: RechargeRequest) -> Result<User, ContractError>;

    /// Record a pending property registration owned by the requester.
    async fn property_registration_request(
        &self,
        request: PropertyRegistrationRequest,
    ) -> Result<PropertyRequest, ContractError>;

    /// Change a property's status on behalf of its owner.
    async fn update_property(
        &self,
        request: PropertyUpdateRequest,
    ) -> Result<Property, ContractError>;

    /// Transfer an on-sale property to the buyer.
    async fn purchase_property(
        &self,
        request: PropertyPurchaseRequest,
    ) -> Result<Property, ContractError>;

    /// Read an approved account.
    async fn get_user(&self, user_id: &UserId) -> Result<User, ContractError>;

    /// Read an approved property.
    async fn view_property(&self, property_id: &PropertyId) -> Result<Property, ContractError>;
}
