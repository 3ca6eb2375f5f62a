//! Domain records, transition rules, and contract services.
//!
//! Purpose: model the user and property records stored on the ledger, the
//! keys they live under, and the transitions the contracts accept. Types are
//! validated on construction and on decode so malformed payloads never reach
//! a service.
//!
//! Public surface:
//! - `ContractError` / `ErrorCode`: failures surfaced to callers.
//! - `Namespaces`: composite-key naming for every record kind.
//! - `UserRequest`, `User`, `PropertyRequest`, `Property`: ledger records.
//! - `UserContractService`, `RegistrarContractService`: driving-port
//!   implementations.

pub mod error;
pub mod fields;
mod ledger;
pub mod namespace;
pub mod policy;
pub mod ports;
pub mod property;
pub mod recharge;
pub mod record;
mod registrar_service;
pub mod user;
mod user_contract_service;

pub use self::error::{ContractError, ErrorCode, ErrorPayload};
pub use self::fields::{
    EmailAddress, FieldValidationError, NationalId, PersonName, PhoneNumber, PropertyId, UserId,
};
pub use self::namespace::{DEFAULT_ORG, NamespaceError, Namespaces};
pub use self::policy::{ContractPolicy, OwnerKeying, PolicyParseError, RequestRetention};
pub use self::property::{Owner, Property, PropertyRequest, PropertyStatus};
pub use self::recharge::TransactionCode;
pub use self::record::{LedgerRecord, RecordKind};
pub use self::registrar_service::RegistrarContractService;
pub use self::user::{User, UserRequest};
pub use self::user_contract_service::UserContractService;
