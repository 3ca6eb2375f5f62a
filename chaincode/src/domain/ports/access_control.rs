//! Driven port deciding which roles a caller holds.

use std::fmt;

/// Identity attached to an invocation by the hosting runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Membership service provider the caller's certificate belongs to.
    pub msp_id: String,
}

impl CallerIdentity {
    /// Identity for the given MSP.
    pub fn new(msp_id: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
        }
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msp_id)
    }
}

/// Roles recognised by the contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Any authenticated participant.
    Participant,
    /// Approves user and property requests.
    Registrar,
}

/// Role membership check.
#[cfg_attr(test, mockall::automock)]
pub trait AccessControl: Send + Sync {
    /// Whether `caller` holds `role`.
    fn has_role(&self, caller: &CallerIdentity, role: Role) -> bool;
}
