//! Entity store port for keyed rotation, user, and index records.

use crate::rotation::domain::{IdIndex, Rotation, RotationId, SkillName, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for entity store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed load/save contract over the persistence backend.
///
/// Every `load_*` method returns `Ok(None)` when the key has never been
/// written. Absence is a normal state, not an error. Saves always overwrite
/// the whole record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Loads the known-skill index.
    async fn load_known_skills(&self) -> StoreResult<Option<IdIndex<SkillName>>>;

    /// Overwrites the known-skill index.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the backend rejects the write.
    async fn save_known_skills(&self, index: &IdIndex<SkillName>) -> StoreResult<()>;

    /// Loads the active-rotation index.
    async fn load_active_rotations(&self) -> StoreResult<Option<IdIndex<RotationId>>>;

    /// Overwrites the active-rotation index.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the backend rejects the write.
    async fn save_active_rotations(&self, index: &IdIndex<RotationId>) -> StoreResult<()>;

    /// Loads an unexpanded rotation.
    async fn load_rotation(&self, id: &RotationId) -> StoreResult<Option<Rotation>>;

    /// Overwrites a rotation record. The member map is not persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the backend rejects the write.
    async fn save_rotation(&self, rotation: &Rotation) -> StoreResult<()>;

    /// Loads a user record without its directory profile.
    async fn load_user(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Overwrites a user record. The directory profile is not persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the backend rejects the write.
    async fn save_user(&self, user: &User) -> StoreResult<()>;
}

/// Errors returned by entity store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A stored record could not be decoded.
    #[error("invalid persisted data under {key}: {reason}")]
    InvalidPersistedData {
        /// Key of the unreadable record.
        key: String,
        /// Decoding failure.
        reason: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a decoding failure for the record stored under `key`.
    pub fn invalid_persisted_data(
        key: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidPersistedData {
            key: key.into(),
            reason: Arc::new(err),
        }
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
