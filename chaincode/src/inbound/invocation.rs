//! Invocation envelope and contract naming.

use crate::domain::ports::CallerIdentity;

/// One call into the chaincode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Fully qualified contract name, e.g. `<org>.user-contract`.
    pub contract: String,
    /// camelCase function name.
    pub function: String,
    /// Positional arguments.
    pub args: Vec<String>,
    /// Caller identity; `None` when the runtime supplied none.
    pub caller: Option<CallerIdentity>,
}

impl Invocation {
    /// Build an invocation made by `caller`.
    pub fn new<I, S>(
        contract: impl Into<String>,
        function: impl Into<String>,
        args: I,
        caller: CallerIdentity,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contract: contract.into(),
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
            caller: Some(caller),
        }
    }

    /// Drop the caller identity.
    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.caller = None;
        self
    }
}

/// Names under which the two contracts are registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractNames {
    user: String,
    registrar: String,
}

impl ContractNames {
    /// Contract names for an organisation prefix.
    pub fn for_org(org: &str) -> Self {
        Self {
            user: format!("{org}.user-contract"),
            registrar: format!("{org}.registrar-contract"),
        }
    }

    /// Participant contract name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Registrar contract name.
    pub fn registrar(&self) -> &str {
        &self.registrar
    }
}
