//! Deployment policies that tune contract behaviour.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Raised when a policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {policy} '{value}'; expected one of: {expected}")]
pub struct PolicyParseError {
    policy: &'static str,
    value: String,
    expected: &'static str,
}

/// How owner keys are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OwnerKeying {
    /// Key owners by display name.
    #[default]
    DisplayName,
    /// Key owners by national ID, so namesakes stay distinct.
    NationalId,
}

impl OwnerKeying {
    /// Configuration name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DisplayName => "display-name",
            Self::NationalId => "national-id",
        }
    }
}

impl fmt::Display for OwnerKeying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerKeying {
    type Err = PolicyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "display-name" => Ok(Self::DisplayName),
            "national-id" => Ok(Self::NationalId),
            other => Err(PolicyParseError {
                policy: "owner keying",
                value: other.to_owned(),
                expected: "display-name, national-id",
            }),
        }
    }
}

/// What happens to a request once it has been approved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestRetention {
    /// Keep the request as an audit trail.
    #[default]
    Retain,
    /// Remove the request in the approving invocation.
    Delete,
}

impl RequestRetention {
    /// Configuration name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for RequestRetention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestRetention {
    type Err = PolicyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "retain" => Ok(Self::Retain),
            "delete" => Ok(Self::Delete),
            other => Err(PolicyParseError {
                policy: "request retention",
                value: other.to_owned(),
                expected: "retain, delete",
            }),
        }
    }
}

/// Policies applied by both contracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContractPolicy {
    /// Owner key derivation.
    pub owner_keying: OwnerKeying,
    /// Request handling after approval.
    pub request_retention: RequestRetention,
}
