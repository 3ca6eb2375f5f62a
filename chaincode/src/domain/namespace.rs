//! Composite-key namespaces for every record kind.
//!
//! All namespaces hang off one organisation prefix, so two deployments with
//! different prefixes never read each other's records. Request namespaces and
//! approved namespaces are distinct, which lets a pending and an approved
//! record share an identifier.

use composite_key::{CompositeKey, CompositeKeyError};
use thiserror::Error;

use super::{ContractError, NationalId, Owner, OwnerKeying, PersonName, PropertyId, UserId};

/// Organisation prefix used when none is configured.
pub const DEFAULT_ORG: &str = "org.property-registration-network.regnet";

/// Errors raised when an organisation prefix cannot host the namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    /// The prefix was empty or whitespace only.
    #[error("organisation prefix must not be empty")]
    EmptyOrg,
    /// The prefix cannot be used inside a composite key.
    #[error("organisation prefix '{org}' is not a valid key namespace: {source}")]
    InvalidOrg {
        /// Rejected prefix.
        org: String,
        /// Key validation failure.
        #[source]
        source: CompositeKeyError,
    },
}

/// Namespaces derived from one organisation prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    org: String,
    user_request: String,
    user: String,
    property_request: String,
    property: String,
    property_owner: String,
}

impl Namespaces {
    /// Derive the namespaces for `org`.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError`] when `org` is blank or holds a character
    /// reserved by the key encoding.
    ///
    /// # Examples
    /// ```
    /// use regnet::domain::{DEFAULT_ORG, Namespaces};
    ///
    /// let namespaces = Namespaces::for_org(DEFAULT_ORG).expect("valid org");
    /// assert_eq!(
    ///     namespaces.user(),
    ///     "org.property-registration-network.regnet.user"
    /// );
    /// ```
    pub fn for_org(org: impl Into<String>) -> Result<Self, NamespaceError> {
        let org = org.into();
        if org.trim().is_empty() {
            return Err(NamespaceError::EmptyOrg);
        }
        CompositeKey::new(&org, std::iter::empty::<&str>()).map_err(|source| {
            NamespaceError::InvalidOrg {
                org: org.clone(),
                source,
            }
        })?;
        Ok(Self::derive(org))
    }

    fn derive(org: String) -> Self {
        Self {
            user_request: format!("{org}.user-request"),
            user: format!("{org}.user"),
            property_request: format!("{org}.property-request"),
            property: format!("{org}.property"),
            property_owner: format!("{org}.property-owner"),
            org,
        }
    }

    /// Organisation prefix.
    #[must_use]
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Namespace of pending account requests.
    #[must_use]
    pub fn user_request(&self) -> &str {
        &self.user_request
    }

    /// Namespace of approved accounts.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Namespace of pending property registrations.
    #[must_use]
    pub fn property_request(&self) -> &str {
        &self.property_request
    }

    /// Namespace of approved properties.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Namespace of owner keys.
    #[must_use]
    pub fn property_owner(&self) -> &str {
        &self.property_owner
    }

    /// Key of a pending account request.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidArgument`] if the key cannot be built.
    pub fn user_request_key(&self, user_id: &UserId) -> Result<CompositeKey, ContractError> {
        build(&self.user_request, [user_id.as_str()])
    }

    /// Key of an approved account.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidArgument`] if the key cannot be built.
    pub fn user_key(&self, user_id: &UserId) -> Result<CompositeKey, ContractError> {
        build(&self.user, [user_id.as_str()])
    }

    /// Key of a pending property registration.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidArgument`] if the key cannot be built.
    pub fn property_request_key(
        &self,
        property_id: &PropertyId,
    ) -> Result<CompositeKey, ContractError> {
        build(&self.property_request, [property_id.as_str()])
    }

    /// Key of an approved property.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidArgument`] if the key cannot be built.
    pub fn property_key(&self, property_id: &PropertyId) -> Result<CompositeKey, ContractError> {
        build(&self.property, [property_id.as_str()])
    }

    /// Resolve the owner identity for a name and national ID.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidArgument`] if the key cannot be built.
    pub fn owner(
        &self,
        keying: OwnerKeying,
        name: PersonName,
        national_id: NationalId,
    ) -> Result<Owner, ContractError> {
        let segment = match keying {
            OwnerKeying::DisplayName => name.as_str(),
            OwnerKeying::NationalId => national_id.as_str(),
        };
        let key = build(&self.property_owner, [segment])?;
        Ok(Owner {
            key,
            name,
            national_id,
        })
    }
}

/// Namespaces under [`DEFAULT_ORG`].
impl Default for Namespaces {
    fn default() -> Self {
        Self::derive(DEFAULT_ORG.to_owned())
    }
}

fn build<const N: usize>(
    namespace: &str,
    segments: [&str; N],
) -> Result<CompositeKey, ContractError> {
    CompositeKey::new(namespace, segments)
        .map_err(|err| ContractError::invalid_argument("key", err.to_string()))
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn namespaces() -> Namespaces {
        Namespaces::for_org(DEFAULT_ORG).expect("default org")
    }

    fn name(raw: &str) -> PersonName {
        PersonName::new(raw).expect("name")
    }

    fn national_id(raw: &str) -> NationalId {
        NationalId::new(raw).expect("national id")
    }

    #[rstest]
    fn derives_all_namespaces(namespaces: Namespaces) {
        assert_eq!(namespaces.org(), DEFAULT_ORG);
        assert_eq!(
            namespaces.user_request(),
            "org.property-registration-network.regnet.user-request"
        );
        assert_eq!(
            namespaces.property_request(),
            "org.property-registration-network.regnet.property-request"
        );
        assert_eq!(
            namespaces.property(),
            "org.property-registration-network.regnet.property"
        );
        assert_eq!(
            namespaces.property_owner(),
            "org.property-registration-network.regnet.property-owner"
        );
    }

    #[rstest]
    fn default_matches_default_org(namespaces: Namespaces) {
        assert_eq!(Namespaces::default(), namespaces);
    }

    #[rstest]
    fn request_and_approved_keys_are_disjoint(namespaces: Namespaces) {
        let user_id = UserId::new("U1").expect("user id");
        let request = namespaces.user_request_key(&user_id).expect("request key");
        let approved = namespaces.user_key(&user_id).expect("user key");
        assert_ne!(request, approved);
        assert_eq!(request.segments().collect::<Vec<_>>(), vec!["U1"]);

        let property_id = PropertyId::new("P1").expect("property id");
        assert_ne!(
            namespaces
                .property_request_key(&property_id)
                .expect("request key"),
            namespaces.property_key(&property_id).expect("property key")
        );
    }

    #[rstest]
    fn keys_are_deterministic(namespaces: Namespaces) {
        let property_id = PropertyId::new("P1").expect("property id");
        assert_eq!(
            namespaces.property_key(&property_id).expect("first"),
            namespaces.property_key(&property_id).expect("second")
        );
    }

    #[rstest]
    #[case(OwnerKeying::DisplayName, "Bob")]
    #[case(OwnerKeying::NationalId, "N2")]
    fn owner_key_follows_keying_policy(
        namespaces: Namespaces,
        #[case] keying: OwnerKeying,
        #[case] segment: &str,
    ) {
        let owner = namespaces
            .owner(keying, name("Bob"), national_id("N2"))
            .expect("owner");
        assert!(owner.key.is_in_namespace(namespaces.property_owner()));
        assert_eq!(owner.key.segments().collect::<Vec<_>>(), vec![segment]);
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn rejects_blank_org(#[case] org: &str) {
        assert_eq!(Namespaces::for_org(org), Err(NamespaceError::EmptyOrg));
    }

    #[rstest]
    fn rejects_org_with_reserved_character() {
        let err = Namespaces::for_org("org\u{0}x").expect_err("reserved character");
        assert!(matches!(err, NamespaceError::InvalidOrg { .. }));
    }
}
