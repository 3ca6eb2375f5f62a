//! Test utilities for the chaincode crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    NewUserRequest, PropertyPurchaseRequest, PropertyRegistrationRequest, PropertyUpdateRequest,
    RechargeRequest,
};
use crate::domain::{EmailAddress, NationalId, PersonName, PhoneNumber, PropertyId, UserId};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock(pub DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Instant every fixture clock reports: 2026-02-24T10:30:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 2, 24, 10, 30, 0).single() {
        Some(now) => now,
        None => panic!("fixture timestamp must be unambiguous"),
    }
}

/// Clock frozen at [`fixed_now`].
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock(fixed_now()))
}

fn field<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("fixture field must be valid: {err}"),
    }
}

/// Validated user identifier.
pub fn user_id(raw: &str) -> UserId {
    field(UserId::new(raw))
}

/// Validated property identifier.
pub fn property_id(raw: &str) -> PropertyId {
    field(PropertyId::new(raw))
}

/// Validated person name.
pub fn person_name(raw: &str) -> PersonName {
    field(PersonName::new(raw))
}

/// Validated national ID.
pub fn national_id(raw: &str) -> NationalId {
    field(NationalId::new(raw))
}

/// `requestNewUser` input.
pub fn new_user(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    national: &str,
) -> NewUserRequest {
    NewUserRequest {
        user_id: user_id(id),
        name: person_name(name),
        email: field(EmailAddress::new(email)),
        phone: field(PhoneNumber::new(phone)),
        national_id: national_id(national),
    }
}

/// `rechargeAccount` input.
pub fn recharge(id: &str, name: &str, national: &str, code: &str) -> RechargeRequest {
    RechargeRequest {
        user_id: user_id(id),
        name: person_name(name),
        national_id: national_id(national),
        transaction_code: code.to_owned(),
    }
}

/// `propertyRegistrationRequest` input.
pub fn registration(
    id: &str,
    owner: &str,
    national: &str,
    price: u64,
    status: &str,
) -> PropertyRegistrationRequest {
    PropertyRegistrationRequest {
        property_id: property_id(id),
        owner_name: person_name(owner),
        national_id: national_id(national),
        price,
        status: status.to_owned(),
    }
}

/// `updateProperty` input.
pub fn update(id: &str, owner: &str, national: &str, status: &str) -> PropertyUpdateRequest {
    PropertyUpdateRequest {
        property_id: property_id(id),
        owner_name: person_name(owner),
        national_id: national_id(national),
        status: status.to_owned(),
    }
}

/// `purchaseProperty` input.
pub fn purchase(id: &str, buyer: &str, national: &str) -> PropertyPurchaseRequest {
    PropertyPurchaseRequest {
        property_id: property_id(id),
        buyer_name: person_name(buyer),
        buyer_national_id: national_id(national),
    }
}
