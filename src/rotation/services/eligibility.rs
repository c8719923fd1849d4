//! Rule-based eligibility policy.

use crate::rotation::{
    domain::{Rotation, Task, User},
    ports::{EligibilityPolicy, EligibilityResult, EligibilityRules, Ineligibility},
};

/// Default [`EligibilityPolicy`] driven by [`EligibilityRules`].
///
/// Membership is checked before skills, and skill requirements in the order
/// the task lists them, so the reported reason is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedEligibility {
    rules: EligibilityRules,
}

impl RuleBasedEligibility {
    /// Creates a policy applying `rules`.
    #[must_use]
    pub const fn new(rules: EligibilityRules) -> Self {
        Self { rules }
    }

    /// Returns the applied rules.
    #[must_use]
    pub const fn rules(&self) -> EligibilityRules {
        self.rules
    }
}

impl EligibilityPolicy for RuleBasedEligibility {
    fn check(&self, rotation: &Rotation, task: &Task, candidate: &User) -> EligibilityResult {
        if self.rules.require_membership && !rotation.member_ids().contains(candidate.id()) {
            return Err(Ineligibility::NotAMember {
                user: candidate.id().clone(),
                rotation: rotation.id().clone(),
            });
        }

        if self.rules.enforce_skill_requirements {
            for requirement in task.requirements() {
                let held = candidate.skill_level(&requirement.skill);
                if !requirement.is_met_by(held) {
                    return Err(Ineligibility::MissingSkill {
                        user: candidate.id().clone(),
                        skill: requirement.skill.clone(),
                        required: requirement.min_level,
                        held,
                    });
                }
            }
        }

        Ok(())
    }
}
