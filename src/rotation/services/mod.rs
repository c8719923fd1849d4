//! Application services for rotation staffing.
//!
//! [`RotationService`] exposes one async entry point per operation. Each call
//! builds a fresh [`DomainContext`], enters a logging scope for the
//! operation, runs its preconditions, and only then touches the store.

mod assignment;
mod eligibility;
mod rotations;
mod skills;

pub use assignment::{AssignTaskOutcome, AssignTaskRequest};
pub use eligibility::RuleBasedEligibility;
pub use rotations::CreateTaskRequest;

use crate::rotation::{
    context::DomainContext,
    domain::UserId,
    ports::{EligibilityPolicy, EntityStore, UserDirectory},
};
use mockable::Clock;
use std::sync::Arc;

/// Rotation staffing orchestration service.
pub struct RotationService<S, D, C>
where
    S: EntityStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    directory: Arc<D>,
    clock: Arc<C>,
    eligibility: Arc<dyn EligibilityPolicy>,
}

impl<S, D, C> Clone for RotationService<S, D, C>
where
    S: EntityStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
            eligibility: Arc::clone(&self.eligibility),
        }
    }
}

impl<S, D, C> RotationService<S, D, C>
where
    S: EntityStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a service using [`RuleBasedEligibility`] with default rules.
    #[must_use]
    pub fn new(store: Arc<S>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            store,
            directory,
            clock,
            eligibility: Arc::new(RuleBasedEligibility::default()),
        }
    }

    /// Replaces the eligibility policy used by task assignment.
    #[must_use]
    pub fn with_eligibility(mut self, policy: Arc<dyn EligibilityPolicy>) -> Self {
        self.eligibility = policy;
        self
    }

    /// Creates the request-scoped context for `acting_user`.
    #[must_use]
    pub fn context(&self, acting_user: UserId) -> DomainContext {
        let store: Arc<dyn EntityStore> = self.store.clone();
        let directory: Arc<dyn UserDirectory> = self.directory.clone();
        DomainContext::new(acting_user, store, directory)
    }
}
