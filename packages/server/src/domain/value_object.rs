//! Value objects of the Marionette domain.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

/// Display name used when a session has not reported (or reported a blank) identity
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Opaque identifier of one live connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptySessionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates fresh connection identifiers
pub struct SessionIdFactory;

impl SessionIdFactory {
    pub fn generate() -> SessionId {
        SessionId(Uuid::new_v4().to_string())
    }
}

/// Name a viewer reports for itself
///
/// Blank input collapses to [`ANONYMOUS_NAME`], so a `DisplayName` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.trim().is_empty() => Self(name.trim().to_string()),
            _ => Self::anonymous(),
        }
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// The closed set of persistent effect toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectName {
    Matrix,
    Invert,
    Glitch,
    Rotate,
    Freeze,
}

impl EffectName {
    pub const ALL: [EffectName; 5] = [
        EffectName::Matrix,
        EffectName::Invert,
        EffectName::Glitch,
        EffectName::Rotate,
        EffectName::Freeze,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectName::Matrix => "matrix",
            EffectName::Invert => "invert",
            EffectName::Glitch => "glitch",
            EffectName::Rotate => "rotate",
            EffectName::Freeze => "freeze",
        }
    }
}

impl FromStr for EffectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DomainError::UnknownEffect(s.to_string()))
    }
}

impl fmt::Display for EffectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a routed command is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    /// Every session currently in the registry
    All,
    /// Exactly one session, if it is still connected
    Session(SessionId),
}

impl TargetSelector {
    pub const ALL_KEYWORD: &'static str = "all";

    pub fn is_broadcast(&self) -> bool {
        matches!(self, TargetSelector::All)
    }
}

impl TryFrom<String> for TargetSelector {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == Self::ALL_KEYWORD {
            Ok(TargetSelector::All)
        } else {
            SessionId::new(value).map(TargetSelector::Session)
        }
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSelector::All => f.write_str(Self::ALL_KEYWORD),
            TargetSelector::Session(id) => write!(f, "{}", id),
        }
    }
}
