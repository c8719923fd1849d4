//! Task assignment.

use super::RotationService;
use crate::rotation::{
    context::{
        DomainContext, LogContext, Precondition, WithRotation, WithRotationExpanded,
        WithRotationNotArchived, WithUserExpanded,
    },
    domain::{RotationDomainError, TaskId, TaskState, UserId},
    error::{RotationError, RotationResult},
    ports::{EntityStore, UserDirectory},
};
use mockable::Clock;
use std::fmt;

/// Request to assign one or more users to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskRequest {
    task_id: TaskId,
    user_ids: Vec<UserId>,
    force: bool,
}

impl AssignTaskRequest {
    /// Creates a request that honours the eligibility policy.
    #[must_use]
    pub fn new(task_id: TaskId, user_ids: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            task_id,
            user_ids: user_ids.into_iter().collect(),
            force: false,
        }
    }

    /// Sets whether the eligibility policy is bypassed.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the candidate users in request order.
    #[must_use]
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Returns `true` when eligibility checks are bypassed.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.force
    }
}

/// Result of a committed assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskOutcome {
    task_id: TaskId,
    added: Vec<UserId>,
    started: bool,
    forced: bool,
}

impl AssignTaskOutcome {
    /// Returns the assigned task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the users that were not already assigned.
    #[must_use]
    pub fn added(&self) -> &[UserId] {
        &self.added
    }

    /// Returns `true` when the task moved from pending to in progress.
    #[must_use]
    pub const fn started(&self) -> bool {
        self.started
    }

    /// Returns `true` when eligibility checks were bypassed.
    #[must_use]
    pub const fn forced(&self) -> bool {
        self.forced
    }
}

impl fmt::Display for AssignTaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.added.is_empty() {
            return write!(f, "Task {} already has the requested assignees.", self.task_id);
        }
        let names: Vec<&str> = self.added.iter().map(UserId::as_str).collect();
        write!(f, "Assigned {} to task {}.", names.join(", "), self.task_id)?;
        if self.started {
            write!(f, " Task is now in progress.")?;
        }
        if self.forced {
            write!(f, " Eligibility was not checked.")?;
        }
        Ok(())
    }
}

impl<S, D, C> RotationService<S, D, C>
where
    S: EntityStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync,
{
    /// Assigns the requested users to a task.
    ///
    /// The rotation is loaded with every member expanded and must not be
    /// archived. Each candidate is expanded through the user directory and,
    /// unless the request is forced, checked against the eligibility policy.
    /// The rotation is saved once, after every check has passed.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::NoUsers`] for an empty candidate list,
    /// [`RotationError::RotationArchived`] even when forced,
    /// [`RotationError::Ineligible`] for the first candidate the policy
    /// rejects, or any resolution and persistence error.
    pub async fn assign_task(
        &self,
        acting_user: UserId,
        request: AssignTaskRequest,
    ) -> RotationResult<AssignTaskOutcome> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new()
            .with("task", request.task_id())
            .with("force", request.is_forced());
        let mut scope = context.enter_scope("assign_task", log_context).await?;
        let result = self.assign_task_scoped(&mut scope, request).await;
        scope.finish(result)
    }

    async fn assign_task_scoped(
        &self,
        ctx: &mut DomainContext,
        request: AssignTaskRequest,
    ) -> RotationResult<AssignTaskOutcome> {
        let AssignTaskRequest {
            task_id,
            user_ids,
            force,
        } = request;
        if user_ids.is_empty() {
            return Err(RotationError::NoUsers);
        }

        ctx.setup(&[
            &WithRotation::new(task_id.rotation().clone()),
            &WithRotationExpanded,
            &WithRotationNotArchived,
        ])
        .await?;
        let Some((_, state)) = ctx.resolved_rotation()?.find_task(&task_id) else {
            return Err(RotationDomainError::TaskNotFound(task_id).into());
        };

        for user_id in &user_ids {
            WithUserExpanded::new(user_id.clone()).apply(ctx).await?;
        }

        if force {
            tracing::warn!(parent: ctx.logger(), task = %task_id, "eligibility checks bypassed");
        } else {
            self.check_eligibility(ctx, &task_id, &user_ids)?;
        }

        let mut rotation = ctx.resolved_rotation()?.clone();
        let added = rotation.assign_task(&task_id, &user_ids, self.clock.as_ref())?;
        ctx.store().save_rotation(&rotation).await?;
        ctx.install_rotation(rotation);

        tracing::debug!(parent: ctx.logger(), task = %task_id, added = added.len(), "rotation saved");
        Ok(AssignTaskOutcome {
            task_id,
            added,
            started: state == TaskState::Pending,
            forced: force,
        })
    }

    fn check_eligibility(
        &self,
        ctx: &DomainContext,
        task_id: &TaskId,
        user_ids: &[UserId],
    ) -> RotationResult<()> {
        let rotation = ctx.resolved_rotation()?;
        let (task, _) = rotation
            .find_task(task_id)
            .ok_or_else(|| RotationDomainError::TaskNotFound(task_id.clone()))?;
        for user_id in user_ids {
            let candidate = ctx
                .user(user_id)
                .ok_or_else(|| RotationError::UserNotFound(user_id.clone()))?;
            self.eligibility
                .check(rotation, task, candidate)
                .map_err(|reason| RotationError::Ineligible {
                    task: task_id.clone(),
                    reason,
                })?;
        }
        Ok(())
    }
}
