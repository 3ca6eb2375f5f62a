//! Composite ledger keys.
//!
//! A composite key addresses a ledger record by a namespace (the object type)
//! and an ordered list of identifier segments. The encoding follows the
//! ledger's own convention: the key starts with `U+0000`, and every component
//! is terminated by `U+0000`:
//!
//! ```text
//! \u{0}namespace\u{0}segment-1\u{0}segment-2\u{0}
//! ```
//!
//! Because no component may contain the delimiter, the encoding is injective:
//! two keys are equal exactly when their namespaces and segments are equal.
//!
//! # Example
//!
//! ```
//! use composite_key::CompositeKey;
//!
//! let key = CompositeKey::new("org.example.user", ["U1"]).expect("valid key");
//! assert_eq!(key.namespace(), "org.example.user");
//! assert_eq!(key.segments().collect::<Vec<_>>(), vec!["U1"]);
//! assert_eq!(key.as_str(), "\u{0}org.example.user\u{0}U1\u{0}");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delimiter placed before the namespace and after every component.
pub const DELIMITER: char = '\u{0}';

/// Highest Unicode scalar value; the ledger reserves it for range queries.
pub const RANGE_SENTINEL: char = char::MAX;

/// Part of a composite key that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// The namespace (object type).
    Namespace,
    /// The identifier segment at the given zero-based position.
    Segment(usize),
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace => f.write_str("namespace"),
            Self::Segment(index) => write!(f, "segment {index}"),
        }
    }
}

/// Errors raised while building or parsing a [`CompositeKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeKeyError {
    /// The namespace was empty.
    #[error("composite key namespace must not be empty")]
    EmptyNamespace,
    /// A component contained `U+0000` or `U+10FFFF`.
    #[error("{component} contains reserved character U+{code:04X}")]
    ReservedCharacter {
        /// Component holding the reserved character.
        component: Component,
        /// Code point of the reserved character.
        code: u32,
    },
    /// A raw key did not start with the delimiter.
    #[error("composite key must begin with U+0000")]
    MissingPrefix,
    /// A raw key did not end with the delimiter.
    #[error("composite key must end with U+0000")]
    MissingTerminator,
}

/// Ledger key built from a namespace and ordered identifier segments.
///
/// ## Invariants
/// - The namespace is non-empty.
/// - No component contains [`DELIMITER`] or [`RANGE_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Build a key from a namespace and its identifier segments.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeKeyError`] when the namespace is empty or any
    /// component contains a reserved character.
    pub fn new<I, S>(namespace: &str, segments: I) -> Result<Self, CompositeKeyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if namespace.is_empty() {
            return Err(CompositeKeyError::EmptyNamespace);
        }
        validate_component(Component::Namespace, namespace)?;

        let mut raw = String::with_capacity(namespace.len() + 2);
        raw.push(DELIMITER);
        raw.push_str(namespace);
        raw.push(DELIMITER);
        for (index, segment) in segments.into_iter().enumerate() {
            let text = segment.as_ref();
            validate_component(Component::Segment(index), text)?;
            raw.push_str(text);
            raw.push(DELIMITER);
        }
        Ok(Self(raw))
    }

    /// Parse a raw key previously produced by [`CompositeKey::new`].
    ///
    /// # Errors
    ///
    /// Returns [`CompositeKeyError`] when the delimiters are missing, the
    /// namespace is empty, or a component holds [`RANGE_SENTINEL`].
    pub fn parse(raw: impl Into<String>) -> Result<Self, CompositeKeyError> {
        let encoded = raw.into();
        let body = encoded
            .strip_prefix(DELIMITER)
            .ok_or(CompositeKeyError::MissingPrefix)?
            .strip_suffix(DELIMITER)
            .ok_or(CompositeKeyError::MissingTerminator)?;

        let mut components = body.split(DELIMITER);
        let namespace = components.next().unwrap_or_default();
        if namespace.is_empty() {
            return Err(CompositeKeyError::EmptyNamespace);
        }
        validate_component(Component::Namespace, namespace)?;
        for (index, segment) in components.enumerate() {
            validate_component(Component::Segment(index), segment)?;
        }
        Ok(Self(encoded))
    }

    /// Namespace (object type) of the key.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.components().next().unwrap_or_default()
    }

    /// Identifier segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.components().skip(1)
    }

    /// Whether the key lives in the given namespace.
    #[must_use]
    pub fn is_in_namespace(&self, namespace: &str) -> bool {
        self.namespace() == namespace
    }

    /// Raw encoded key as stored in the ledger.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn components(&self) -> std::str::Split<'_, char> {
        let body = self
            .0
            .strip_prefix(DELIMITER)
            .and_then(|rest| rest.strip_suffix(DELIMITER))
            .unwrap_or_default();
        body.split(DELIMITER)
    }
}

fn validate_component(component: Component, value: &str) -> Result<(), CompositeKeyError> {
    match value
        .chars()
        .find(|ch| *ch == DELIMITER || *ch == RANGE_SENTINEL)
    {
        Some(ch) => Err(CompositeKeyError::ReservedCharacter {
            component,
            code: u32::from(ch),
        }),
        None => Ok(()),
    }
}

impl AsRef<str> for CompositeKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Human-readable rendering for logs: `namespace:segment-1:segment-2`.
impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())?;
        for segment in self.segments() {
            write!(f, ":{segment}")?;
        }
        Ok(())
    }
}

impl From<CompositeKey> for String {
    fn from(value: CompositeKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for CompositeKey {
    type Error = CompositeKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Unit coverage for composite key encoding and parsing.

    use super::*;
    use rstest::rstest;

    const USER_NS: &str = "org.property-registration-network.regnet.user";
    const REQUEST_NS: &str = "org.property-registration-network.regnet.user-request";

    fn key(namespace: &str, segments: &[&str]) -> CompositeKey {
        CompositeKey::new(namespace, segments).expect("valid composite key")
    }

    #[rstest]
    fn encodes_with_leading_and_trailing_delimiters() {
        let built = key("ns", &["a", "b"]);
        assert_eq!(built.as_str(), "\u{0}ns\u{0}a\u{0}b\u{0}");
    }

    #[rstest]
    fn identical_inputs_give_identical_keys() {
        assert_eq!(key(USER_NS, &["U1"]), key(USER_NS, &["U1"]));
    }

    #[rstest]
    #[case(USER_NS, REQUEST_NS)]
    #[case("a", "a.b")]
    #[case("ab", "a")]
    fn distinct_namespaces_never_collide(#[case] first: &str, #[case] second: &str) {
        assert_ne!(key(first, &["U1"]), key(second, &["U1"]));
    }

    #[rstest]
    fn segment_boundaries_are_preserved() {
        assert_ne!(key("ns", &["ab", "c"]), key("ns", &["a", "bc"]));
        assert_ne!(key("ns", &["a"]), key("ns", &["a", ""]));
    }

    #[rstest]
    fn exposes_namespace_and_segments() {
        let built = key(USER_NS, &["U1", "Alice"]);
        assert_eq!(built.namespace(), USER_NS);
        assert_eq!(built.segments().collect::<Vec<_>>(), vec!["U1", "Alice"]);
        assert!(built.is_in_namespace(USER_NS));
        assert!(!built.is_in_namespace(REQUEST_NS));
    }

    #[rstest]
    fn key_without_segments_has_no_segments() {
        let built = CompositeKey::new("ns", std::iter::empty::<&str>()).expect("valid key");
        assert_eq!(built.as_str(), "\u{0}ns\u{0}");
        assert_eq!(built.segments().count(), 0);
    }

    #[rstest]
    fn rejects_empty_namespace() {
        assert_eq!(
            CompositeKey::new("", ["U1"]),
            Err(CompositeKeyError::EmptyNamespace)
        );
    }

    #[rstest]
    #[case("ns\u{0}", &["U1"], Component::Namespace, 0)]
    #[case("ns", &["ok", "bad\u{0}"], Component::Segment(1), 0)]
    #[case("ns", &["\u{10FFFF}"], Component::Segment(0), 0x10_FFFF)]
    fn rejects_reserved_characters(
        #[case] namespace: &str,
        #[case] segments: &[&str],
        #[case] component: Component,
        #[case] code: u32,
    ) {
        assert_eq!(
            CompositeKey::new(namespace, segments),
            Err(CompositeKeyError::ReservedCharacter { component, code })
        );
    }

    #[rstest]
    fn parse_accepts_encoded_keys() {
        let built = key(USER_NS, &["U1"]);
        let parsed = CompositeKey::parse(built.as_str()).expect("encoded key parses");
        assert_eq!(parsed, built);
    }

    #[rstest]
    #[case("ns\u{0}U1\u{0}", CompositeKeyError::MissingPrefix)]
    #[case("\u{0}ns\u{0}U1", CompositeKeyError::MissingTerminator)]
    #[case("\u{0}\u{0}U1\u{0}", CompositeKeyError::EmptyNamespace)]
    #[case("", CompositeKeyError::MissingPrefix)]
    fn parse_rejects_malformed_keys(#[case] raw: &str, #[case] expected: CompositeKeyError) {
        assert_eq!(CompositeKey::parse(raw), Err(expected));
    }

    #[rstest]
    fn serialises_as_raw_string() {
        let built = key("ns", &["U1"]);
        let json = serde_json::to_string(&built).expect("serialise key");
        assert_eq!(json, r#""\u0000ns\u0000U1\u0000""#);
        let decoded: CompositeKey = serde_json::from_str(&json).expect("deserialise key");
        assert_eq!(decoded, built);
    }

    #[rstest]
    fn deserialisation_validates_structure() {
        let result = serde_json::from_str::<CompositeKey>(r#""not-a-key""#);
        assert!(result.is_err());
    }

    #[rstest]
    fn display_is_log_friendly() {
        assert_eq!(key("ns", &["a", "b"]).to_string(), "ns:a:b");
    }
}
