//! Validated text fields shared by user and property records.
//!
//! Every field that can end up inside a composite key, or that a registrar
//! relies on when approving a request, is wrapped in a newtype. Values are
//! checked on construction and when records are decoded from the ledger.

use std::fmt;

use composite_key::{DELIMITER, RANGE_SENTINEL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised by the text field newtypes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValidationError {
    /// Value was empty or whitespace only.
    #[error("{field} must not be empty")]
    Empty {
        /// Field name as it appears in JSON.
        field: &'static str,
    },
    /// Value contained a character reserved by the key encoding.
    #[error("{field} contains reserved character U+{code:04X}")]
    ReservedCharacter {
        /// Field name as it appears in JSON.
        field: &'static str,
        /// Offending code point.
        code: u32,
    },
    /// Value failed a field-specific format rule.
    #[error("{field} is malformed: {reason}")]
    Malformed {
        /// Field name as it appears in JSON.
        field: &'static str,
        /// Rule that was violated.
        reason: &'static str,
    },
}

impl FieldValidationError {
    /// JSON name of the field that failed validation.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::ReservedCharacter { field, .. }
            | Self::Malformed { field, .. } => field,
        }
    }
}

fn validate_text(field: &'static str, value: &str) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        return Err(FieldValidationError::Empty { field });
    }
    if let Some(ch) = value
        .chars()
        .find(|ch| *ch == DELIMITER || *ch == RANGE_SENTINEL)
    {
        return Err(FieldValidationError::ReservedCharacter {
            field,
            code: u32::from(ch),
        });
    }
    Ok(())
}

fn no_extra_rules(_: &str) -> Result<(), &'static str> {
    Ok(())
}

fn email_rules(value: &str) -> Result<(), &'static str> {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        (_, _, Some(_)) => Err("must contain exactly one '@'"),
        (_, None, _) => Err("must contain '@'"),
        _ => Err("local and domain parts must not be empty"),
    }
}

macro_rules! define_text_field {
    ($(#[$meta:meta])* $name:ident, $field:literal, $rules:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// JSON field name used in validation errors.
            pub const FIELD: &'static str = $field;

            /// Validate and construct the field from borrowed input.
            ///
            /// # Errors
            ///
            /// Returns [`FieldValidationError`] when the value is blank,
            /// holds a reserved character, or breaks the field's format rule.
            pub fn new(value: impl AsRef<str>) -> Result<Self, FieldValidationError> {
                Self::from_owned(value.as_ref().to_owned())
            }

            fn from_owned(value: String) -> Result<Self, FieldValidationError> {
                validate_text($field, &value)?;
                $rules(&value).map_err(|reason| FieldValidationError::Malformed {
                    field: $field,
                    reason,
                })?;
                Ok(Self(value))
            }

            /// Borrow the validated value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }
    };
}

define_text_field!(
    /// Identifier chosen by a participant for their account.
    UserId,
    "userId",
    no_extra_rules
);
define_text_field!(
    /// Identifier of a land or building parcel.
    PropertyId,
    "propertyId",
    no_extra_rules
);
define_text_field!(
    /// Display name of a participant or property owner.
    PersonName,
    "name",
    no_extra_rules
);
define_text_field!(
    /// Government-issued identity number.
    NationalId,
    "nationalId",
    no_extra_rules
);
define_text_field!(
    /// Contact e-mail address.
    EmailAddress,
    "email",
    email_rules
);
define_text_field!(
    /// Contact phone number.
    PhoneNumber,
    "phone",
    no_extra_rules
);
