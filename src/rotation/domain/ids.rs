//! Identifier and validated name types for the rotation domain.

use super::RotationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for names and identifiers, matching the key-space limit.
const MAX_NAME_LENGTH: usize = 64;

/// Trims and lowercases a name, accepting only `[a-z0-9_-]`.
fn normalize_name(kind: &'static str, raw: String) -> Result<String, RotationDomainError> {
    let normalized = raw.trim().to_ascii_lowercase();

    if normalized.is_empty() {
        return Err(RotationDomainError::EmptyIdentifier { kind });
    }

    if normalized.len() > MAX_NAME_LENGTH {
        return Err(RotationDomainError::IdentifierTooLong {
            kind,
            value: raw,
            limit: MAX_NAME_LENGTH,
        });
    }

    let is_valid = normalized
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !is_valid {
        return Err(RotationDomainError::InvalidIdentifier { kind, value: raw });
    }

    Ok(normalized)
}

/// Platform user identifier.
///
/// User identifiers are opaque tokens issued by the chat platform, so case is
/// preserved and only surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::EmptyIdentifier`] when the value is
    /// empty after trimming, [`RotationDomainError::InvalidIdentifier`] when
    /// it contains whitespace, or [`RotationDomainError::IdentifierTooLong`]
    /// when it exceeds the length limit.
    pub fn new(value: impl Into<String>) -> Result<Self, RotationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RotationDomainError::EmptyIdentifier { kind: "user id" });
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(RotationDomainError::IdentifierTooLong {
                kind: "user id",
                value: raw,
                limit: MAX_NAME_LENGTH,
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(RotationDomainError::InvalidIdentifier {
                kind: "user id",
                value: raw,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rotation identifier derived from the rotation name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotationId(String);

impl RotationId {
    /// Creates a validated rotation identifier.
    ///
    /// The input is trimmed and lowercased. Only `[a-z0-9_-]` is accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`RotationDomainError`] identifier variant when validation
    /// fails.
    pub fn new(value: impl Into<String>) -> Result<Self, RotationDomainError> {
        normalize_name("rotation id", value.into()).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RotationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a skill tracked in the known-skill index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillName(String);

impl SkillName {
    /// Creates a validated skill name.
    ///
    /// # Errors
    ///
    /// Returns a [`RotationDomainError`] identifier variant when validation
    /// fails.
    pub fn new(value: impl Into<String>) -> Result<Self, RotationDomainError> {
        normalize_name("skill name", value.into()).map(Self)
    }

    /// Returns the skill name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SkillName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of an external work-item producer attached to a rotation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueSourceName(String);

impl IssueSourceName {
    /// Creates a validated issue source name.
    ///
    /// # Errors
    ///
    /// Returns a [`RotationDomainError`] identifier variant when validation
    /// fails.
    pub fn new(value: impl Into<String>) -> Result<Self, RotationDomainError> {
        normalize_name("issue source name", value.into()).map(Self)
    }

    /// Returns the source name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueSourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task identifier scoped to its owning rotation.
///
/// Rendered as `<rotation>-<number>`, e.g. `sre-oncall-3`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId {
    rotation: RotationId,
    number: u32,
}

impl TaskId {
    /// Creates a task identifier from its parts.
    #[must_use]
    pub const fn new(rotation: RotationId, number: u32) -> Self {
        Self { rotation, number }
    }

    /// Parses a task identifier in `<rotation>-<number>` form.
    ///
    /// The number is taken from the last `-` separated segment so rotation
    /// names may themselves contain dashes.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::InvalidTaskId`] when the value has no
    /// numeric suffix, the number is zero, or the rotation part is invalid.
    pub fn parse(value: &str) -> Result<Self, RotationDomainError> {
        let invalid = || RotationDomainError::InvalidTaskId(value.to_owned());
        let (rotation, number) = value.trim().rsplit_once('-').ok_or_else(invalid)?;
        let parsed_number: u32 = number.parse().map_err(|_| invalid())?;
        if parsed_number == 0 {
            return Err(invalid());
        }
        let rotation_id = RotationId::new(rotation).map_err(|_| invalid())?;
        Ok(Self::new(rotation_id, parsed_number))
    }

    /// Returns the owning rotation identifier.
    #[must_use]
    pub const fn rotation(&self) -> &RotationId {
        &self.rotation
    }

    /// Returns the rotation-scoped task number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.rotation, self.number)
    }
}
