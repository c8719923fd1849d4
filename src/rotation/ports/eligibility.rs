//! Eligibility port for task assignment.
//!
//! Defines the pluggable predicate that decides whether a candidate may be
//! assigned to a task, plus the rule configuration used by the default
//! implementation.

use crate::rotation::domain::{Rotation, RotationId, SkillLevel, SkillName, Task, User, UserId};
use thiserror::Error;

/// Result type for eligibility checks.
pub type EligibilityResult = Result<(), Ineligibility>;

/// Port for candidate eligibility decisions.
///
/// Implementations must be pure: they see the expanded rotation, the task,
/// and the expanded candidate, and must not perform I/O.
pub trait EligibilityPolicy: Send + Sync {
    /// Checks whether `candidate` may be assigned to `task`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Ineligibility`] found for the candidate.
    fn check(&self, rotation: &Rotation, task: &Task, candidate: &User) -> EligibilityResult;
}

/// Reason a candidate may not be assigned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Ineligibility {
    /// The candidate is not a member of the task's rotation.
    #[error("{user} is not a member of rotation {rotation}")]
    NotAMember {
        /// Rejected candidate.
        user: UserId,
        /// Rotation the task belongs to.
        rotation: RotationId,
    },

    /// The candidate lacks a required skill or holds it below the minimum.
    #[error("{user} needs {skill} at level {required} or above, has {}", .held.map_or("none", SkillLevel::as_str))]
    MissingSkill {
        /// Rejected candidate.
        user: UserId,
        /// Required skill.
        skill: SkillName,
        /// Minimum level the task asks for.
        required: SkillLevel,
        /// Level the candidate holds, if any.
        held: Option<SkillLevel>,
    },
}

impl Ineligibility {
    /// Returns the rejected candidate.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        match self {
            Self::NotAMember { user, .. } | Self::MissingSkill { user, .. } => user,
        }
    }
}

/// Rule toggles for the default eligibility policy.
///
/// # Examples
///
/// ```
/// use rota::rotation::ports::EligibilityRules;
///
/// let rules = EligibilityRules::default();
/// assert!(rules.require_membership);
///
/// let lenient = EligibilityRules::lenient();
/// assert!(!lenient.enforce_skill_requirements);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRules {
    /// Candidates must already be rotation members.
    pub require_membership: bool,
    /// Candidates must meet every skill requirement of the task.
    pub enforce_skill_requirements: bool,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            require_membership: true,
            enforce_skill_requirements: true,
        }
    }
}

impl EligibilityRules {
    /// Accepts every candidate.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            require_membership: false,
            enforce_skill_requirements: false,
        }
    }

    /// Checks skill requirements only, allowing non-members.
    #[must_use]
    pub const fn skills_only() -> Self {
        Self {
            require_membership: false,
            enforce_skill_requirements: true,
        }
    }
}
