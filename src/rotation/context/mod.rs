//! Request-scoped domain context and its precondition pipeline.
//!
//! A [`DomainContext`] is created at the start of every operation and
//! dropped at its end. It lazily caches everything the operation needs from
//! the store and the user directory so that each record is loaded at most
//! once per request, no matter how many preconditions ask for it.

mod preconditions;
mod scope;

pub use preconditions::{
    Precondition, PushLoggingScope, WithActingUser, WithActingUserExpanded, WithActiveRotations,
    WithKnownSkills, WithRotation, WithRotationExpanded, WithRotationNotArchived, WithUser,
    WithUserExpanded, WithValidSkillName,
};
pub use scope::{LogContext, ScopedContext};

use crate::rotation::{
    domain::{IdIndex, Rotation, RotationId, SkillName, User, UserId},
    error::{RotationError, RotationResult},
    ports::{EntityStore, UserDirectory},
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::Span;
use uuid::Uuid;

/// Per-request state threaded through preconditions and operations.
///
/// Never shared between requests.
pub struct DomainContext {
    acting_user_id: UserId,
    store: Arc<dyn EntityStore>,
    directory: Arc<dyn UserDirectory>,
    users: HashMap<UserId, User>,
    known_skills: Option<IdIndex<SkillName>>,
    active_rotations: Option<IdIndex<RotationId>>,
    rotation: Option<Rotation>,
    root_span: Span,
    scopes: Vec<Span>,
}

impl fmt::Debug for DomainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainContext")
            .field("acting_user_id", &self.acting_user_id)
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .field("known_skills", &self.known_skills)
            .field("active_rotations", &self.active_rotations)
            .field("rotation", &self.rotation.as_ref().map(Rotation::id))
            .field("scope_depth", &self.scopes.len())
            .finish_non_exhaustive()
    }
}

impl DomainContext {
    /// Creates an empty context for a request made by `acting_user_id`.
    #[must_use]
    pub fn new(
        acting_user_id: UserId,
        store: Arc<dyn EntityStore>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        let root_span = tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            acting_user = %acting_user_id,
        );
        Self {
            acting_user_id,
            store,
            directory,
            users: HashMap::new(),
            known_skills: None,
            active_rotations: None,
            rotation: None,
            root_span,
            scopes: Vec::new(),
        }
    }

    /// Runs `preconditions` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first precondition that fails; later
    /// preconditions are not run.
    pub async fn setup(&mut self, preconditions: &[&dyn Precondition]) -> RotationResult<()> {
        for precondition in preconditions {
            precondition.apply(self).await?;
        }
        Ok(())
    }

    /// Returns the identifier of the user making the request.
    #[must_use]
    pub const fn acting_user_id(&self) -> &UserId {
        &self.acting_user_id
    }

    /// Returns the acting user once [`WithActingUser`] has run.
    #[must_use]
    pub fn acting_user(&self) -> Option<&User> {
        self.users.get(&self.acting_user_id)
    }

    /// Returns a user resolved during this request.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Returns the cached known-skill index, if loaded.
    #[must_use]
    pub const fn known_skills(&self) -> Option<&IdIndex<SkillName>> {
        self.known_skills.as_ref()
    }

    /// Returns the cached active-rotation index, if loaded.
    #[must_use]
    pub const fn active_rotations(&self) -> Option<&IdIndex<RotationId>> {
        self.active_rotations.as_ref()
    }

    /// Returns the rotation resolved for this request, if any.
    #[must_use]
    pub const fn rotation(&self) -> Option<&Rotation> {
        self.rotation.as_ref()
    }

    /// Returns the rotation resolved for this request.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::RotationNotResolved`] when [`WithRotation`]
    /// has not run.
    pub fn resolved_rotation(&self) -> RotationResult<&Rotation> {
        self.rotation
            .as_ref()
            .ok_or(RotationError::RotationNotResolved)
    }

    /// Returns the active logger: the innermost logging scope, or the
    /// request span when no scope has been pushed.
    #[must_use]
    pub fn logger(&self) -> &Span {
        self.scopes.last().unwrap_or(&self.root_span)
    }

    /// Returns the number of logging scopes currently pushed.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Pops the innermost logging scope, restoring its parent.
    ///
    /// Popping an empty stack is a no-op.
    pub fn pop_logging_scope(&mut self) {
        self.scopes.pop();
    }

    /// Pushes a logging scope for `api` and returns a guard that pops it
    /// when dropped.
    ///
    /// # Errors
    ///
    /// Returns the error of [`PushLoggingScope`], typically when the acting
    /// user cannot be expanded. The failure is logged before it is returned.
    pub async fn enter_scope(
        &mut self,
        api: &'static str,
        log_context: LogContext,
    ) -> RotationResult<ScopedContext<'_>> {
        if let Err(err) = PushLoggingScope::new(api, log_context).apply(self).await {
            let logger = tracing::info_span!(parent: &self.root_span, "operation", api);
            scope::log_failure(&logger, &err);
            return Err(err);
        }
        Ok(ScopedContext::new(self))
    }

    pub(crate) fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    pub(crate) fn push_logging_scope(&mut self, span: Span) {
        self.scopes.push(span);
    }

    /// Replaces the cached known-skill index after a successful save.
    pub(crate) fn install_known_skills(&mut self, index: IdIndex<SkillName>) {
        self.known_skills = Some(index);
    }

    /// Replaces the cached active-rotation index after a successful save.
    pub(crate) fn install_active_rotations(&mut self, index: IdIndex<RotationId>) {
        self.active_rotations = Some(index);
    }

    /// Replaces the cached rotation after a successful save.
    pub(crate) fn install_rotation(&mut self, rotation: Rotation) {
        self.rotation = Some(rotation);
    }

    /// Replaces a cached user after a successful save, keeping any profile
    /// already attached.
    pub(crate) fn install_user(&mut self, mut user: User) {
        if user.profile().is_none()
            && let Some(profile) = self.users.get(user.id()).and_then(User::profile)
        {
            user.expand(profile.clone());
        }
        self.users.insert(user.id().clone(), user);
    }
}
