//! User directory port for resolving external profiles.

use crate::rotation::domain::{Profile, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Lookup contract over the chat platform's user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves the profile for `id`.
    ///
    /// Returns `None` when the directory has no such user.
    async fn resolve_profile(&self, id: &UserId) -> DirectoryResult<Option<Profile>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The directory could not be reached or answered with a failure.
    #[error("directory lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a lookup failure.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
