//! Session and owner identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StabilityError;

/// Identifier of the entity whose behaviour is profiled (a team, a player).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wrap an owner identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one observation unit (a match).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a session identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite `(session, owner)` key, written `"<session>_<owner>"`.
///
/// Parsing splits on the first underscore, so owner ids may themselves contain
/// underscores while session ids may not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    /// The session part.
    pub session: SessionId,
    /// The owner part.
    pub owner: OwnerId,
}

impl SessionKey {
    /// Build a key from its parts.
    #[must_use]
    pub fn new(session: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            session: SessionId::new(session),
            owner: OwnerId::new(owner),
        }
    }
}

impl FromStr for SessionKey {
    type Err = StabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('_') {
            Some((session, owner)) if !session.is_empty() && !owner.is_empty() => {
                Ok(Self::new(session, owner))
            }
            _ => Err(StabilityError::MalformedSessionKey { key: s.to_owned() }),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.session, self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_on_first_underscore() {
        let key: SessionKey = "3869685_Real_Madrid".parse().unwrap();
        assert_eq!(key.session.as_str(), "3869685");
        assert_eq!(key.owner.as_str(), "Real_Madrid");
        assert_eq!(key.to_string(), "3869685_Real_Madrid");
    }

    #[test]
    fn rejects_missing_separator() {
        let err = "3869685".parse::<SessionKey>().unwrap_err();
        assert_eq!(err, StabilityError::MalformedSessionKey { key: "3869685".into() });
    }

    #[test]
    fn rejects_empty_parts() {
        assert!("_Arsenal".parse::<SessionKey>().is_err());
        assert!("3869685_".parse::<SessionKey>().is_err());
    }
}
