//! Contract-level error types.
//!
//! These errors are transport agnostic. The invocation router renders them as
//! `{code, message}` payloads; the codes are stable across releases.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FieldValidationError, RecordKind};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required record is absent.
    RecordNotFound,
    /// A pending request already exists under the key.
    DuplicateRequest,
    /// The approved record already exists.
    AlreadyApproved,
    /// The caller does not own the property.
    NotAuthorized,
    /// The property is not on sale.
    NotForSale,
    /// The status is not one of the accepted values.
    InvalidStatus,
    /// The recharge code is not recognised.
    UnknownTransactionCode,
    /// The recharge would overflow the coin balance.
    BalanceOverflow,
    /// An invocation argument is missing or malformed.
    InvalidArgument,
    /// A stored payload failed schema validation.
    DecodeError,
    /// A record could not be serialised.
    EncodeError,
    /// The caller carries no identity.
    Unauthenticated,
    /// The caller lacks the registrar role.
    RegistrarRoleRequired,
    /// No contract is registered under the requested name.
    UnknownContract,
    /// The contract has no function with the requested name.
    UnknownFunction,
    /// The ledger store failed.
    Ledger,
}

/// Failures raised by the contracts and the invocation router.
///
/// # Examples
/// ```
/// use regnet::domain::{ContractError, ErrorCode, RecordKind};
///
/// let err = ContractError::record_not_found(RecordKind::User, "U1");
/// assert_eq!(err.code(), ErrorCode::RecordNotFound);
/// assert_eq!(err.to_string(), "user U1 does not exist");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// A required record is absent.
    #[error("{kind} {id} does not exist")]
    RecordNotFound {
        /// Kind of record that was looked up.
        kind: RecordKind,
        /// Identifier that was looked up.
        id: String,
    },
    /// A pending request already exists.
    #[error("{kind} {id} already exists")]
    DuplicateRequest {
        /// Kind of request.
        kind: RecordKind,
        /// Identifier of the request.
        id: String,
    },
    /// Approval would overwrite an approved record.
    #[error("{kind} {id} has already been approved")]
    AlreadyApproved {
        /// Kind of approved record.
        kind: RecordKind,
        /// Identifier of the record.
        id: String,
    },
    /// The computed owner key does not match the stored owner.
    #[error("{owner} is not the owner of property {property_id}")]
    NotAuthorized {
        /// Property being changed.
        property_id: String,
        /// Caller's owner key, rendered for humans.
        owner: String,
    },
    /// Purchase of a property that is not on sale.
    #[error("property {property_id} is not for sale")]
    NotForSale {
        /// Property being purchased.
        property_id: String,
    },
    /// Status outside `registered` and `onSale`.
    #[error("invalid property status '{value}'; expected 'registered' or 'onSale'")]
    InvalidStatus {
        /// Rejected value.
        value: String,
    },
    /// Recharge code outside the accepted set.
    #[error("unknown transaction code '{code}'")]
    UnknownTransactionCode {
        /// Rejected code.
        code: String,
    },
    /// Recharge would overflow the coin balance.
    #[error("coin balance of user {user_id} would overflow")]
    BalanceOverflow {
        /// User being recharged.
        user_id: String,
    },
    /// Missing or malformed invocation argument.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Argument name.
        name: String,
        /// What was wrong with it.
        message: String,
    },
    /// Stored payload failed schema validation.
    #[error("stored {kind} record is malformed: {message}")]
    DecodeError {
        /// Kind of record being decoded.
        kind: RecordKind,
        /// Parser message.
        message: String,
    },
    /// Record could not be serialised.
    #[error("failed to encode {kind} record: {message}")]
    EncodeError {
        /// Kind of record being encoded.
        kind: RecordKind,
        /// Serialiser message.
        message: String,
    },
    /// The caller carries no identity.
    #[error("caller identity is missing")]
    Unauthenticated,
    /// The caller lacks the registrar role.
    #[error("caller {caller} does not hold the registrar role")]
    RegistrarRoleRequired {
        /// Caller's MSP identifier.
        caller: String,
    },
    /// No contract is registered under the name.
    #[error("unknown contract '{contract}'")]
    UnknownContract {
        /// Requested contract name.
        contract: String,
    },
    /// The contract has no such function.
    #[error("contract '{contract}' has no function '{function}'")]
    UnknownFunction {
        /// Contract that was addressed.
        contract: String,
        /// Requested function name.
        function: String,
    },
    /// The ledger store failed.
    #[error("ledger failure: {message}")]
    Ledger {
        /// Adapter message.
        message: String,
    },
}

/// JSON payload returned to callers when an invocation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Stable failure category.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl ContractError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::RecordNotFound { .. } => ErrorCode::RecordNotFound,
            Self::DuplicateRequest { .. } => ErrorCode::DuplicateRequest,
            Self::AlreadyApproved { .. } => ErrorCode::AlreadyApproved,
            Self::NotAuthorized { .. } => ErrorCode::NotAuthorized,
            Self::NotForSale { .. } => ErrorCode::NotForSale,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::UnknownTransactionCode { .. } => ErrorCode::UnknownTransactionCode,
            Self::BalanceOverflow { .. } => ErrorCode::BalanceOverflow,
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::DecodeError { .. } => ErrorCode::DecodeError,
            Self::EncodeError { .. } => ErrorCode::EncodeError,
            Self::Unauthenticated => ErrorCode::Unauthenticated,
            Self::RegistrarRoleRequired { .. } => ErrorCode::RegistrarRoleRequired,
            Self::UnknownContract { .. } => ErrorCode::UnknownContract,
            Self::UnknownFunction { .. } => ErrorCode::UnknownFunction,
            Self::Ledger { .. } => ErrorCode::Ledger,
        }
    }

    /// Render the error as a `{code, message}` payload.
    #[must_use]
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code(),
            message: self.to_string(),
        }
    }

    /// Convenience constructor for [`ContractError::RecordNotFound`].
    pub fn record_not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Convenience constructor for [`ContractError::DuplicateRequest`].
    pub fn duplicate_request(kind: RecordKind, id: impl Into<String>) -> Self {
        Self::DuplicateRequest {
            kind,
            id: id.into(),
        }
    }

    /// Convenience constructor for [`ContractError::AlreadyApproved`].
    pub fn already_approved(kind: RecordKind, id: impl Into<String>) -> Self {
        Self::AlreadyApproved {
            kind,
            id: id.into(),
        }
    }

    /// Convenience constructor for [`ContractError::NotAuthorized`].
    pub fn not_authorized(property_id: impl Into<String>, owner: impl Display) -> Self {
        Self::NotAuthorized {
            property_id: property_id.into(),
            owner: owner.to_string(),
        }
    }

    /// Convenience constructor for [`ContractError::NotForSale`].
    pub fn not_for_sale(property_id: impl Into<String>) -> Self {
        Self::NotForSale {
            property_id: property_id.into(),
        }
    }

    /// Convenience constructor for [`ContractError::InvalidStatus`].
    pub fn invalid_status(value: impl Into<String>) -> Self {
        Self::InvalidStatus {
            value: value.into(),
        }
    }

    /// Convenience constructor for [`ContractError::UnknownTransactionCode`].
    pub fn unknown_transaction_code(code: impl Into<String>) -> Self {
        Self::UnknownTransactionCode { code: code.into() }
    }

    /// Convenience constructor for [`ContractError::BalanceOverflow`].
    pub fn balance_overflow(user_id: impl Into<String>) -> Self {
        Self::BalanceOverflow {
            user_id: user_id.into(),
        }
    }

    /// Convenience constructor for [`ContractError::InvalidArgument`].
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ContractError::DecodeError`].
    pub fn decode_error(kind: RecordKind, message: impl Display) -> Self {
        Self::DecodeError {
            kind,
            message: message.to_string(),
        }
    }

    /// Convenience constructor for [`ContractError::EncodeError`].
    pub fn encode_error(kind: RecordKind, message: impl Display) -> Self {
        Self::EncodeError {
            kind,
            message: message.to_string(),
        }
    }

    /// Convenience constructor for [`ContractError::RegistrarRoleRequired`].
    pub fn registrar_role_required(caller: impl Into<String>) -> Self {
        Self::RegistrarRoleRequired {
            caller: caller.into(),
        }
    }

    /// Convenience constructor for [`ContractError::UnknownContract`].
    pub fn unknown_contract(contract: impl Into<String>) -> Self {
        Self::UnknownContract {
            contract: contract.into(),
        }
    }

    /// Convenience constructor for [`ContractError::UnknownFunction`].
    pub fn unknown_function(contract: impl Into<String>, function: impl Into<String>) -> Self {
        Self::UnknownFunction {
            contract: contract.into(),
            function: function.into(),
        }
    }

    /// Convenience constructor for [`ContractError::Ledger`].
    pub fn ledger(message: impl Into<String>) -> Self {
        Self::Ledger {
            message: message.into(),
        }
    }
}

impl From<FieldValidationError> for ContractError {
    fn from(value: FieldValidationError) -> Self {
        Self::invalid_argument(value.field(), value.to_string())
    }
}
