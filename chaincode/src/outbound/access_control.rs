//! MSP-based role checks.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::ports::{AccessControl, CallerIdentity, Role};

/// MSP ID granted the registrar role when none is configured.
pub const DEFAULT_REGISTRAR_MSP: &str = "registrarMSP";

/// [`AccessControl`] adapter keyed on the caller's MSP ID.
///
/// Any caller with a non-empty MSP ID is a participant. Registrars are the
/// callers whose MSP ID is in the configured set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MspAccessControl {
    registrar_msps: BTreeSet<String>,
}

impl MspAccessControl {
    /// Grant the registrar role to the given MSP IDs.
    pub fn new<I, S>(registrar_msps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            registrar_msps: registrar_msps.into_iter().map(Into::into).collect(),
        }
    }

    /// MSP IDs holding the registrar role.
    pub fn registrar_msps(&self) -> impl Iterator<Item = &str> {
        self.registrar_msps.iter().map(String::as_str)
    }
}

impl Default for MspAccessControl {
    fn default() -> Self {
        Self::new([DEFAULT_REGISTRAR_MSP])
    }
}

impl AccessControl for MspAccessControl {
    fn has_role(&self, caller: &CallerIdentity, role: Role) -> bool {
        if caller.msp_id.trim().is_empty() {
            return false;
        }
        let granted = match role {
            Role::Participant => true,
            Role::Registrar => self.registrar_msps.contains(&caller.msp_id),
        };
        debug!(msp_id = %caller.msp_id, ?role, granted, "role check");
        granted
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("registrarMSP", Role::Registrar, true)]
    #[case("registrarMSP", Role::Participant, true)]
    #[case("usersMSP", Role::Participant, true)]
    #[case("usersMSP", Role::Registrar, false)]
    #[case("", Role::Participant, false)]
    #[case("  ", Role::Registrar, false)]
    fn default_roles(#[case] msp_id: &str, #[case] role: Role, #[case] expected: bool) {
        let control = MspAccessControl::default();
        assert_eq!(control.has_role(&CallerIdentity::new(msp_id), role), expected);
    }

    #[rstest]
    fn configured_registrars_replace_the_default() {
        let control = MspAccessControl::new(["landOfficeMSP"]);
        assert!(control.has_role(&CallerIdentity::new("landOfficeMSP"), Role::Registrar));
        assert!(!control.has_role(&CallerIdentity::new("registrarMSP"), Role::Registrar));
        assert_eq!(control.registrar_msps().collect::<Vec<_>>(), vec!["landOfficeMSP"]);
    }
}
