//! Users, their skills, and their external directory profiles.

use super::{SkillLevel, SkillName, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// External profile resolved from the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Platform username, used to tag logging scopes.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
}

impl Profile {
    /// Creates a profile.
    #[must_use]
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
        }
    }
}

/// A materialized user record.
///
/// Skill levels are persisted; the directory profile is attached for the
/// lifetime of one request and never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    skills: BTreeMap<SkillName, SkillLevel>,
    profile: Option<Profile>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedUserData {
    /// Persisted platform user identifier.
    pub id: UserId,
    /// Persisted skill levels.
    #[serde(default)]
    pub skills: BTreeMap<SkillName, SkillLevel>,
}

impl User {
    /// Creates a user with no recorded skills.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self {
            id,
            skills: BTreeMap::new(),
            profile: None,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            skills: data.skills,
            profile: None,
        }
    }

    /// Returns the persisted representation, without the profile.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedUserData {
        PersistedUserData {
            id: self.id.clone(),
            skills: self.skills.clone(),
        }
    }

    /// Returns the platform user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns all recorded skill levels.
    #[must_use]
    pub const fn skills(&self) -> &BTreeMap<SkillName, SkillLevel> {
        &self.skills
    }

    /// Returns the level held in `skill`, if any.
    #[must_use]
    pub fn skill_level(&self, skill: &SkillName) -> Option<SkillLevel> {
        self.skills.get(skill).copied()
    }

    /// Records `level` for `skill`, returning the previous level.
    pub fn set_skill_level(&mut self, skill: SkillName, level: SkillLevel) -> Option<SkillLevel> {
        self.skills.insert(skill, level)
    }

    /// Returns the directory profile once the user has been expanded.
    #[must_use]
    pub const fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Returns `true` when the directory profile is attached.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.profile.is_some()
    }

    /// Attaches the directory profile.
    pub fn expand(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// Returns the username, falling back to the platform identifier.
    #[must_use]
    pub fn username(&self) -> &str {
        self.profile
            .as_ref()
            .map_or_else(|| self.id.as_str(), |profile| profile.username.as_str())
    }
}

/// A user as held by a rotation: either a bare reference or a full record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    /// Only the identifier is known.
    Reference(UserId),
    /// The user record has been loaded.
    Materialized(User),
}

impl UserRef {
    /// Returns the referenced user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        match self {
            Self::Reference(id) => id,
            Self::Materialized(user) => user.id(),
        }
    }

    /// Returns the user record when materialized.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Reference(_) => None,
            Self::Materialized(user) => Some(user),
        }
    }

    /// Returns `true` when the user record has been loaded.
    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        matches!(self, Self::Materialized(_))
    }
}

impl From<User> for UserRef {
    fn from(user: User) -> Self {
        Self::Materialized(user)
    }
}

impl From<UserId> for UserRef {
    fn from(id: UserId) -> Self {
        Self::Reference(id)
    }
}
