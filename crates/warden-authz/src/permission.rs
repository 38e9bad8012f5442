//! The unified permission value.
//!
//! A [`Permission`] names one action on one resource. Console users write it
//! as a `verb:resource` token (`read:users`); cloud roles produce it from
//! their `resource -> [action]` map. The bare `*` token found in some fixture
//! data parses to an opaque value that only ever equals itself.

use crate::{AuthzError, AuthzResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One action on one resource.
///
/// Ordering is by resource, then action, so sorted sets group by resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission {
    resource: String,
    action: String,
}

impl Permission {
    /// The opaque token that appears on the Super Admin fixture role.
    pub const OPAQUE_ALL: &'static str = "*";

    /// Create a permission for `action` on `resource`.
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// The opaque `*` permission.
    ///
    /// Compared literally; it does not imply any other permission.
    pub fn opaque_all() -> Self {
        Self::new(Self::OPAQUE_ALL, Self::OPAQUE_ALL)
    }

    /// Parse a `verb:resource` token.
    ///
    /// # Errors
    /// - [`AuthzError::InvalidPermission`] when the colon is missing or either
    ///   side is empty.
    pub fn parse(token: &str) -> AuthzResult<Self> {
        token.parse()
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// True for the opaque `*` permission.
    pub fn is_opaque_all(&self) -> bool {
        self.resource == Self::OPAQUE_ALL && self.action == Self::OPAQUE_ALL
    }

    /// Render as a `verb:resource` token.
    pub fn as_token(&self) -> String {
        if self.is_opaque_all() {
            return Self::OPAQUE_ALL.to_string();
        }
        format!("{}:{}", self.action, self.resource)
    }

    /// Parse a list of tokens, failing on the first malformed one.
    pub fn parse_all<I, S>(tokens: I) -> AuthzResult<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.into_iter().map(|t| Self::parse(t.as_ref())).collect()
    }
}

impl FromStr for Permission {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value == Self::OPAQUE_ALL {
            return Ok(Self::opaque_all());
        }
        // Verb first; resources may themselves contain colons.
        let (action, resource) = value
            .split_once(':')
            .ok_or_else(|| AuthzError::InvalidPermission(value.to_string()))?;
        if action.is_empty() || resource.is_empty() {
            return Err(AuthzError::InvalidPermission(value.to_string()));
        }
        Ok(Self::new(resource, action))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_token())
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_token())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
