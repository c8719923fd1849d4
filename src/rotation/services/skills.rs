//! Known skills and user qualification.

use super::RotationService;
use crate::rotation::{
    context::{DomainContext, LogContext, WithKnownSkills, WithUser, WithValidSkillName},
    domain::{SkillLevel, SkillName, User, UserId},
    error::{RotationError, RotationResult},
    ports::{EntityStore, UserDirectory},
};
use mockable::Clock;

impl<S, D, C> RotationService<S, D, C>
where
    S: EntityStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync,
{
    /// Adds `skill` to the known-skill index.
    ///
    /// Returns `false` without saving when the skill was already known.
    ///
    /// # Errors
    ///
    /// Returns a store error when the index cannot be loaded or saved.
    pub async fn add_known_skill(
        &self,
        acting_user: UserId,
        skill: SkillName,
    ) -> RotationResult<bool> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new().with("skill", &skill);
        let mut scope = context.enter_scope("add_known_skill", log_context).await?;
        let result = Self::add_known_skill_scoped(&mut scope, skill).await;
        scope.finish(result)
    }

    async fn add_known_skill_scoped(
        ctx: &mut DomainContext,
        skill: SkillName,
    ) -> RotationResult<bool> {
        ctx.setup(&[&WithKnownSkills]).await?;
        let mut known = ctx.known_skills().cloned().unwrap_or_default();
        if !known.add(skill) {
            return Ok(false);
        }
        ctx.store().save_known_skills(&known).await?;
        ctx.install_known_skills(known);
        Ok(true)
    }

    /// Records the level `user_id` holds in a known skill.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::SkillNotFound`] for an unknown skill or a
    /// store error.
    pub async fn qualify_user(
        &self,
        acting_user: UserId,
        user_id: UserId,
        skill: SkillName,
        level: SkillLevel,
    ) -> RotationResult<User> {
        let mut context = self.context(acting_user);
        let log_context = LogContext::new()
            .with("user", &user_id)
            .with("skill", &skill)
            .with("level", level);
        let mut scope = context.enter_scope("qualify_user", log_context).await?;
        let result = Self::qualify_user_scoped(&mut scope, user_id, skill, level).await;
        scope.finish(result)
    }

    async fn qualify_user_scoped(
        ctx: &mut DomainContext,
        user_id: UserId,
        skill: SkillName,
        level: SkillLevel,
    ) -> RotationResult<User> {
        ctx.setup(&[
            &WithValidSkillName::new(skill.clone()),
            &WithUser::new(user_id.clone()),
        ])
        .await?;

        let mut user = ctx
            .user(&user_id)
            .cloned()
            .ok_or(RotationError::UserNotFound(user_id))?;
        user.set_skill_level(skill, level);
        ctx.store().save_user(&user).await?;
        ctx.install_user(user.clone());
        Ok(user)
    }
}
