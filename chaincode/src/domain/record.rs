//! JSON encoding for records stored on the ledger.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ContractError;

/// Kind of record held under a composite key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    /// Pending account request.
    UserRequest,
    /// Approved account.
    User,
    /// Pending property registration.
    PropertyRequest,
    /// Approved property.
    Property,
}

impl RecordKind {
    /// Stable camelCase name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserRequest => "userRequest",
            Self::User => "user",
            Self::PropertyRequest => "propertyRequest",
            Self::Property => "property",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that can be written to and read from the ledger.
///
/// Decoding runs the same validation as construction: unknown fields,
/// missing fields, and invalid values are all rejected.
pub trait LedgerRecord: Serialize + DeserializeOwned + Send + Sync {
    /// Kind reported in errors.
    const KIND: RecordKind;

    /// Serialise the record as UTF-8 JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::EncodeError`] when serialisation fails.
    fn encode(&self) -> Result<Vec<u8>, ContractError> {
        serde_json::to_vec(self).map_err(|err| ContractError::encode_error(Self::KIND, err))
    }

    /// Parse and validate a stored payload.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::DecodeError`] when the payload does not match
    /// the record schema.
    fn decode(bytes: &[u8]) -> Result<Self, ContractError> {
        serde_json::from_slice(bytes).map_err(|err| ContractError::decode_error(Self::KIND, err))
    }
}
