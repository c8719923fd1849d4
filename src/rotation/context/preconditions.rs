//! Preconditions that populate and validate the domain context.
//!
//! Every precondition first checks whether its target is already in the
//! context and returns immediately if so. Composing the same precondition
//! from several places therefore never loads a record twice.

use super::{DomainContext, LogContext};
use crate::rotation::{
    domain::{IdIndex, RotationId, SkillName, User, UserId},
    error::{RotationError, RotationResult},
};
use async_trait::async_trait;
use std::fmt;

/// One idempotent resolution or validation step over a [`DomainContext`].
#[async_trait]
pub trait Precondition: Send + Sync + fmt::Debug {
    /// Applies the step.
    ///
    /// # Errors
    ///
    /// Returns a [`RotationError`] when the guarded invariant does not hold
    /// or a backing load fails.
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()>;
}

/// Loads the known-skill index, empty when never saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithKnownSkills;

#[async_trait]
impl Precondition for WithKnownSkills {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        if ctx.known_skills.is_some() {
            return Ok(());
        }
        let skills = ctx.store.load_known_skills().await?.unwrap_or_default();
        tracing::debug!(parent: ctx.logger(), count = skills.len(), "loaded known skills");
        ctx.known_skills = Some(skills);
        Ok(())
    }
}

/// Requires `skill` to be in the known-skill index.
#[derive(Debug, Clone)]
pub struct WithValidSkillName(SkillName);

impl WithValidSkillName {
    /// Creates the precondition for `skill`.
    #[must_use]
    pub const fn new(skill: SkillName) -> Self {
        Self(skill)
    }
}

#[async_trait]
impl Precondition for WithValidSkillName {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        WithKnownSkills.apply(ctx).await?;
        let known = ctx
            .known_skills
            .as_ref()
            .is_some_and(|skills| skills.contains(&self.0));
        if !known {
            return Err(RotationError::SkillNotFound(self.0.clone()));
        }
        Ok(())
    }
}

/// Loads the active-rotation index, empty when never saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithActiveRotations;

#[async_trait]
impl Precondition for WithActiveRotations {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        if ctx.active_rotations.is_some() {
            return Ok(());
        }
        let rotations: IdIndex<RotationId> =
            ctx.store.load_active_rotations().await?.unwrap_or_default();
        tracing::debug!(parent: ctx.logger(), count = rotations.len(), "loaded active rotations");
        ctx.active_rotations = Some(rotations);
        Ok(())
    }
}

/// Loads the rotation the request operates on.
#[derive(Debug, Clone)]
pub struct WithRotation(RotationId);

impl WithRotation {
    /// Creates the precondition for rotation `id`.
    #[must_use]
    pub const fn new(id: RotationId) -> Self {
        Self(id)
    }
}

#[async_trait]
impl Precondition for WithRotation {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        if ctx
            .rotation
            .as_ref()
            .is_some_and(|rotation| rotation.id() == &self.0)
        {
            return Ok(());
        }
        let rotation = ctx
            .store
            .load_rotation(&self.0)
            .await?
            .ok_or_else(|| RotationError::RotationNotFound(self.0.clone()))?;
        tracing::debug!(parent: ctx.logger(), rotation = %self.0, "loaded rotation");
        ctx.rotation = Some(rotation);
        Ok(())
    }
}

/// Materializes every member of the resolved rotation.
///
/// Members already materialized are kept as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithRotationExpanded;

#[async_trait]
impl Precondition for WithRotationExpanded {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        let unresolved = ctx.resolved_rotation()?.unresolved_members();
        for id in unresolved {
            WithUser::new(id.clone()).apply(ctx).await?;
            let Some(user) = ctx.users.get(&id).cloned() else {
                continue;
            };
            if let Some(rotation) = ctx.rotation.as_mut() {
                rotation.install_member(user);
            }
        }
        Ok(())
    }
}

/// Rejects requests against an archived rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithRotationNotArchived;

#[async_trait]
impl Precondition for WithRotationNotArchived {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        let rotation = ctx.resolved_rotation()?;
        if rotation.is_archived() {
            return Err(RotationError::RotationArchived(rotation.id().clone()));
        }
        Ok(())
    }
}

/// Resolves a user, loading it or starting a fresh record.
#[derive(Debug, Clone)]
pub struct WithUser(UserId);

impl WithUser {
    /// Creates the precondition for user `id`.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self(id)
    }
}

#[async_trait]
impl Precondition for WithUser {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        if ctx.users.contains_key(&self.0) {
            return Ok(());
        }
        let user = ctx.store.load_user(&self.0).await?.unwrap_or_else(|| {
            tracing::debug!(parent: ctx.logger(), user = %self.0, "starting new user record");
            User::new(self.0.clone())
        });
        ctx.users.insert(self.0.clone(), user);
        Ok(())
    }
}

/// Resolves a user and attaches its directory profile.
#[derive(Debug, Clone)]
pub struct WithUserExpanded(UserId);

impl WithUserExpanded {
    /// Creates the precondition for user `id`.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self(id)
    }
}

#[async_trait]
impl Precondition for WithUserExpanded {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        if ctx.users.get(&self.0).is_some_and(User::is_expanded) {
            return Ok(());
        }
        WithUser::new(self.0.clone()).apply(ctx).await?;
        let profile = ctx
            .directory
            .resolve_profile(&self.0)
            .await?
            .ok_or_else(|| RotationError::UserNotFound(self.0.clone()))?;
        if let Some(user) = ctx.users.get_mut(&self.0) {
            user.expand(profile);
        }
        Ok(())
    }
}

/// Resolves the acting user.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithActingUser;

#[async_trait]
impl Precondition for WithActingUser {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        let id = ctx.acting_user_id.clone();
        WithUser::new(id).apply(ctx).await
    }
}

/// Resolves the acting user and attaches its directory profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithActingUserExpanded;

#[async_trait]
impl Precondition for WithActingUserExpanded {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        let id = ctx.acting_user_id.clone();
        WithUserExpanded::new(id).apply(ctx).await
    }
}

/// Pushes a logging scope tagged with the acting user and operation name.
///
/// Prefer [`DomainContext::enter_scope`], which also pops the scope.
#[derive(Debug, Clone)]
pub struct PushLoggingScope {
    api: &'static str,
    context: LogContext,
}

impl PushLoggingScope {
    /// Creates the precondition for operation `api`.
    #[must_use]
    pub const fn new(api: &'static str, context: LogContext) -> Self {
        Self { api, context }
    }
}

#[async_trait]
impl Precondition for PushLoggingScope {
    async fn apply(&self, ctx: &mut DomainContext) -> RotationResult<()> {
        WithActingUserExpanded.apply(ctx).await?;
        let username = ctx
            .acting_user()
            .map_or_else(|| ctx.acting_user_id.as_str(), User::username)
            .to_owned();
        let span = tracing::info_span!(
            parent: ctx.logger(),
            "operation",
            api = self.api,
            acting_username = %username,
            context = %self.context,
        );
        ctx.push_logging_scope(span);
        Ok(())
    }
}
