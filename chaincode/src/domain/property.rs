//! Property records and their transitions.
//!
//! A property moves through three transitions once approved: an owner may
//! change its status, and a buyer may take it over while it is on sale.
//! Ownership is tracked by [`Owner::key`], a composite key in the
//! property-owner namespace; the owner's name and national ID travel with it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use composite_key::CompositeKey;
use serde::{Deserialize, Serialize};

use super::{ContractError, LedgerRecord, NationalId, PersonName, PropertyId, RecordKind};

/// Sale status of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyStatus {
    /// Held by the owner and not for sale.
    Registered,
    /// Listed for purchase.
    OnSale,
}

impl PropertyStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::OnSale => "onSale",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = ContractError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "registered" => Ok(Self::Registered),
            "onSale" => Ok(Self::OnSale),
            other => Err(ContractError::invalid_status(other)),
        }
    }
}

/// Identity of whoever controls a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Owner key in the property-owner namespace.
    pub key: CompositeKey,
    /// Owner's display name.
    pub name: PersonName,
    /// Owner's national ID.
    pub national_id: NationalId,
}

/// Pending property registration awaiting registrar approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyRequest {
    /// Parcel identifier.
    pub property_id: PropertyId,
    /// Owner key of the requester.
    #[serde(alias = "owner")]
    pub owner_key: CompositeKey,
    /// Asking or registered price.
    pub price: u64,
    /// Requested status.
    pub status: PropertyStatus,
    /// Requester's display name.
    #[serde(alias = "name")]
    pub owner_name: PersonName,
    /// Requester's national ID.
    #[serde(alias = "aadhar")]
    pub owner_national_id: NationalId,
    /// Time the request was submitted.
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl PropertyRequest {
    /// Build a request owned by `owner`.
    #[must_use]
    pub fn new(
        property_id: PropertyId,
        owner: Owner,
        price: u64,
        status: PropertyStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            property_id,
            owner_key: owner.key,
            price,
            status,
            owner_name: owner.name,
            owner_national_id: owner.national_id,
            created_at,
        }
    }
}

impl LedgerRecord for PropertyRequest {
    const KIND: RecordKind = RecordKind::PropertyRequest;
}

/// Approved property.
///
/// ## Invariants
/// - `owner_key` identifies the current owner; it only changes on purchase.
/// - `price`, `created_at` and `property_id` never change after approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Property {
    /// Parcel identifier.
    pub property_id: PropertyId,
    /// Owner key of the current owner.
    #[serde(alias = "owner")]
    pub owner_key: CompositeKey,
    /// Registered price.
    pub price: u64,
    /// Current sale status.
    pub status: PropertyStatus,
    /// Current owner's display name.
    #[serde(alias = "name")]
    pub owner_name: PersonName,
    /// Current owner's national ID.
    #[serde(alias = "aadhar")]
    pub owner_national_id: NationalId,
    /// Time the originating request was submitted.
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Promote a registration request, carrying every field over.
    #[must_use]
    pub fn approve(request: PropertyRequest) -> Self {
        let PropertyRequest {
            property_id,
            owner_key,
            price,
            status,
            owner_name,
            owner_national_id,
            created_at,
        } = request;
        Self {
            property_id,
            owner_key,
            price,
            status,
            owner_name,
            owner_national_id,
            created_at,
        }
    }

    /// Change the status on behalf of the current owner.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotAuthorized`] when `owner` does not hold
    /// the property; the record is left unchanged.
    pub fn update_by(&mut self, owner: Owner, status: PropertyStatus) -> Result<(), ContractError> {
        if owner.key != self.owner_key {
            return Err(ContractError::not_authorized(
                self.property_id.as_str(),
                &owner.key,
            ));
        }
        self.status = status;
        self.owner_name = owner.name;
        self.owner_national_id = owner.national_id;
        Ok(())
    }

    /// Transfer the property to `buyer`.
    ///
    /// The status returns to [`PropertyStatus::Registered`].
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotForSale`] unless the property is on sale.
    pub fn purchase_by(&mut self, buyer: Owner) -> Result<(), ContractError> {
        if self.status != PropertyStatus::OnSale {
            return Err(ContractError::not_for_sale(self.property_id.as_str()));
        }
        self.owner_key = buyer.key;
        self.owner_name = buyer.name;
        self.owner_national_id = buyer.national_id;
        self.status = PropertyStatus::Registered;
        Ok(())
    }
}

impl LedgerRecord for Property {
    const KIND: RecordKind = RecordKind::Property;
}
