//! Rotation lifecycle, membership, issue sources, and task creation.

use super::RotationService;
use crate::rotation::{
    context::{
        DomainContext, LogContext, Precondition, WithActiveRotations, WithRotation,
        WithRotationExpanded, WithRotationNotArchived, WithUser, WithValidSkillName,
    },
    domain::{
        IssueSource, IssueSourceName, Rotation, RotationDomainError, RotationId, SkillRequirement,
        Task, TaskId, UserId, UserRef,
    },
    error::{RotationError, RotationResult},
    ports::{EntityStore, UserDirectory},
};
use mockable::Clock;

/// Request to open a new pending task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    rotation: RotationId,
    summary: String,
    source: Option<IssueSourceName>,
    requirements: Vec<SkillRequirement>,
}

impl CreateTaskRequest {
    /// Creates a request with no issue source and no extra requirements.
    #[must_use]
    pub fn new(rotation: RotationId, summary: impl Into<String>) -> Self {
        Self {
            rotation,
            summary: summary.into(),
            source: None,
            requirements: Vec::new(),
        }
    }

    /// Files the task under an issue source, inheriting its requirements.
    #[must_use]
    pub fn with_source(mut self, source: IssueSourceName) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a requirement on top of any inherited ones.
    #[must_use]
    pub fn with_requirement(mut self, requirement: SkillRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Returns the owning rotation.
    #[must_use]
    pub const fn rotation(&self) -> &RotationId {
        &self.rotation
    }
}

impl<S, D, C> RotationService<S, D, C>
where
    S: EntityStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync,
{
    /// Creates an empty rotation and lists it as active.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::RotationExists`] when the identifier is
    /// already taken, including by an archived rotation.
    pub async fn create_rotation(
        &self,
        acting_user: UserId,
        id: RotationId,
    ) -> RotationResult<Rotation> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new().with("rotation", &id);
        let mut scope = context.enter_scope("create_rotation", log_context).await?;
        let result = Self::create_rotation_scoped(&mut scope, id).await;
        scope.finish(result)
    }

    async fn create_rotation_scoped(
        ctx: &mut DomainContext,
        id: RotationId,
    ) -> RotationResult<Rotation> {
        ctx.setup(&[&WithActiveRotations]).await?;
        let mut active = ctx.active_rotations().cloned().unwrap_or_default();
        if active.contains(&id) || ctx.store().load_rotation(&id).await?.is_some() {
            return Err(RotationError::RotationExists(id));
        }

        let rotation = Rotation::new(id.clone());
        ctx.store().save_rotation(&rotation).await?;
        active.add(id);
        ctx.store().save_active_rotations(&active).await?;
        ctx.install_active_rotations(active);
        ctx.install_rotation(rotation.clone());
        Ok(rotation)
    }

    /// Archives a rotation and removes it from the active index.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::RotationNotFound`] or
    /// [`RotationError::RotationArchived`] when already archived.
    pub async fn archive_rotation(
        &self,
        acting_user: UserId,
        id: RotationId,
    ) -> RotationResult<Rotation> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new().with("rotation", &id);
        let mut scope = context.enter_scope("archive_rotation", log_context).await?;
        let result = Self::archive_rotation_scoped(&mut scope, id).await;
        scope.finish(result)
    }

    async fn archive_rotation_scoped(
        ctx: &mut DomainContext,
        id: RotationId,
    ) -> RotationResult<Rotation> {
        ctx.setup(&[
            &WithRotation::new(id.clone()),
            &WithRotationNotArchived,
            &WithActiveRotations,
        ])
        .await?;

        let mut rotation = ctx.resolved_rotation()?.clone();
        rotation.archive();
        ctx.store().save_rotation(&rotation).await?;

        let mut active = ctx.active_rotations().cloned().unwrap_or_default();
        if active.remove(&id) {
            ctx.store().save_active_rotations(&active).await?;
        }
        ctx.install_active_rotations(active);
        ctx.install_rotation(rotation.clone());
        Ok(rotation)
    }

    /// Adds users to a rotation's members.
    ///
    /// Users without a stored record are created with no skills.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::NoUsers`] for an empty list or a domain
    /// error when any user is already a member. Nothing is saved on error.
    pub async fn join_rotation(
        &self,
        acting_user: UserId,
        id: RotationId,
        user_ids: Vec<UserId>,
    ) -> RotationResult<Rotation> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new()
            .with("rotation", &id)
            .with("users", user_ids.len());
        let mut scope = context.enter_scope("join_rotation", log_context).await?;
        let result = Self::join_rotation_scoped(&mut scope, id, user_ids).await;
        scope.finish(result)
    }

    async fn join_rotation_scoped(
        ctx: &mut DomainContext,
        id: RotationId,
        user_ids: Vec<UserId>,
    ) -> RotationResult<Rotation> {
        if user_ids.is_empty() {
            return Err(RotationError::NoUsers);
        }
        ctx.setup(&[&WithRotation::new(id), &WithRotationNotArchived])
            .await?;

        let mut rotation = ctx.resolved_rotation()?.clone();
        for user_id in user_ids {
            WithUser::new(user_id.clone()).apply(ctx).await?;
            let member = ctx
                .user(&user_id)
                .cloned()
                .map_or(UserRef::Reference(user_id), UserRef::Materialized);
            rotation.add_member(member)?;
        }
        ctx.store().save_rotation(&rotation).await?;
        ctx.install_rotation(rotation.clone());
        Ok(rotation)
    }

    /// Removes users from a rotation's members.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::NoUsers`] for an empty list or a domain
    /// error when any user is not a member. Nothing is saved on error.
    pub async fn leave_rotation(
        &self,
        acting_user: UserId,
        id: RotationId,
        user_ids: Vec<UserId>,
    ) -> RotationResult<Rotation> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new()
            .with("rotation", &id)
            .with("users", user_ids.len());
        let mut scope = context.enter_scope("leave_rotation", log_context).await?;
        let result = Self::leave_rotation_scoped(&mut scope, id, user_ids).await;
        scope.finish(result)
    }

    async fn leave_rotation_scoped(
        ctx: &mut DomainContext,
        id: RotationId,
        user_ids: Vec<UserId>,
    ) -> RotationResult<Rotation> {
        if user_ids.is_empty() {
            return Err(RotationError::NoUsers);
        }
        ctx.setup(&[&WithRotation::new(id), &WithRotationNotArchived])
            .await?;

        let mut rotation = ctx.resolved_rotation()?.clone();
        for user_id in &user_ids {
            rotation.remove_member(user_id)?;
        }
        ctx.store().save_rotation(&rotation).await?;
        ctx.install_rotation(rotation.clone());
        Ok(rotation)
    }

    /// Registers an issue source whose tasks inherit `source`'s requirements.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::SkillNotFound`] for a requirement naming an
    /// unknown skill, or a domain error when the source name is taken.
    pub async fn add_issue_source(
        &self,
        acting_user: UserId,
        id: RotationId,
        source: IssueSource,
    ) -> RotationResult<Rotation> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new()
            .with("rotation", &id)
            .with("source", source.name());
        let mut scope = context.enter_scope("add_issue_source", log_context).await?;
        let result = Self::add_issue_source_scoped(&mut scope, id, source).await;
        scope.finish(result)
    }

    async fn add_issue_source_scoped(
        ctx: &mut DomainContext,
        id: RotationId,
        source: IssueSource,
    ) -> RotationResult<Rotation> {
        ctx.setup(&[&WithRotation::new(id), &WithRotationNotArchived])
            .await?;
        require_known_skills(ctx, source.requirements()).await?;

        let mut rotation = ctx.resolved_rotation()?.clone();
        rotation.add_issue_source(source)?;
        ctx.store().save_rotation(&rotation).await?;
        ctx.install_rotation(rotation.clone());
        Ok(rotation)
    }

    /// Opens a pending task in a rotation.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::SkillNotFound`] for an unknown requirement
    /// skill, or a domain error for an unknown source or blank summary.
    pub async fn create_task(
        &self,
        acting_user: UserId,
        request: CreateTaskRequest,
    ) -> RotationResult<Task> {
        let mut context = self.context(acting_user);
        let mut log_context = LogContext::new().with("rotation", request.rotation());
        if let Some(source) = &request.source {
            log_context = log_context.with("source", source);
        }
        let mut scope = context.enter_scope("create_task", log_context).await?;
        let result = self.create_task_scoped(&mut scope, request).await;
        scope.finish(result)
    }

    async fn create_task_scoped(
        &self,
        ctx: &mut DomainContext,
        request: CreateTaskRequest,
    ) -> RotationResult<Task> {
        let CreateTaskRequest {
            rotation: id,
            summary,
            source,
            requirements,
        } = request;
        ctx.setup(&[&WithRotation::new(id), &WithRotationNotArchived])
            .await?;
        require_known_skills(ctx, &requirements).await?;

        let mut rotation = ctx.resolved_rotation()?.clone();
        let task_id = rotation.create_task(
            summary,
            source.as_ref(),
            requirements,
            self.clock.as_ref(),
        )?;
        let task = created_task(&rotation, &task_id)?;
        ctx.store().save_rotation(&rotation).await?;
        ctx.install_rotation(rotation);
        tracing::debug!(parent: ctx.logger(), task = %task_id, "task created");
        Ok(task)
    }

    /// Returns a rotation with every member expanded.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::RotationNotFound`] or a resolution error.
    pub async fn show_rotation(
        &self,
        acting_user: UserId,
        id: RotationId,
    ) -> RotationResult<Rotation> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new().with("rotation", &id);
        let mut scope = context.enter_scope("show_rotation", log_context).await?;
        let result = Self::show_rotation_scoped(&mut scope, id).await;
        scope.finish(result)
    }

    async fn show_rotation_scoped(
        ctx: &mut DomainContext,
        id: RotationId,
    ) -> RotationResult<Rotation> {
        ctx.setup(&[&WithRotation::new(id), &WithRotationExpanded])
            .await?;
        ctx.resolved_rotation().cloned()
    }

    /// Lists the identifiers of all active rotations in creation order.
    ///
    /// # Errors
    ///
    /// Returns a store error when the index cannot be loaded.
    pub async fn list_active_rotations(
        &self,
        acting_user: UserId,
    ) -> RotationResult<Vec<RotationId>> {
        let mut context = self.context(acting_user);
        let mut scope = context
            .enter_scope("list_active_rotations", LogContext::new())
            .await?;
        let result = Self::list_active_rotations_scoped(&mut scope).await;
        scope.finish(result)
    }

    async fn list_active_rotations_scoped(
        ctx: &mut DomainContext,
    ) -> RotationResult<Vec<RotationId>> {
        ctx.setup(&[&WithActiveRotations]).await?;
        Ok(ctx
            .active_rotations()
            .map(|index| index.iter().cloned().collect())
            .unwrap_or_default())
    }
}

async fn require_known_skills(
    ctx: &mut DomainContext,
    requirements: &[SkillRequirement],
) -> RotationResult<()> {
    for requirement in requirements {
        WithValidSkillName::new(requirement.skill.clone())
            .apply(ctx)
            .await?;
    }
    Ok(())
}

fn created_task(rotation: &Rotation, id: &TaskId) -> RotationResult<Task> {
    rotation
        .find_task(id)
        .map(|(task, _)| task.clone())
        .ok_or_else(|| RotationDomainError::TaskNotFound(id.clone()).into())
}
