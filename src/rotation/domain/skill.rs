//! Skill levels and task skill requirements.

use super::{ParseSkillLevelError, SkillName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proficiency a user holds in a skill, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    /// Level 1.
    Beginner,
    /// Level 2.
    Intermediate,
    /// Level 3.
    Advanced,
    /// Level 4.
    Expert,
}

impl SkillLevel {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Returns the numeric level, 1 through 4.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::Expert => 4,
        }
    }
}

impl TryFrom<&str> for SkillLevel {
    type Error = ParseSkillLevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "1" | "beginner" => Ok(Self::Beginner),
            "2" | "intermediate" => Ok(Self::Intermediate),
            "3" | "advanced" => Ok(Self::Advanced),
            "4" | "expert" => Ok(Self::Expert),
            _ => Err(ParseSkillLevelError(value.to_owned())),
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum skill level a task asks of each assignee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillRequirement {
    /// Required skill.
    pub skill: SkillName,
    /// Lowest accepted level.
    pub min_level: SkillLevel,
}

impl SkillRequirement {
    /// Creates a requirement for `skill` at `min_level` or above.
    #[must_use]
    pub const fn new(skill: SkillName, min_level: SkillLevel) -> Self {
        Self { skill, min_level }
    }

    /// Returns `true` when `level` satisfies the requirement.
    #[must_use]
    pub fn is_met_by(&self, level: Option<SkillLevel>) -> bool {
        level.is_some_and(|held| held >= self.min_level)
    }
}

impl fmt::Display for SkillRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.skill, self.min_level)
    }
}
