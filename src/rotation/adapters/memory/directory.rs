//! In-memory user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::rotation::{
    domain::{Profile, UserId},
    ports::{DirectoryError, DirectoryResult, UserDirectory},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the profile for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Lookup`] when the lock is poisoned.
    pub fn insert(&self, id: UserId, profile: Profile) -> DirectoryResult<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        profiles.insert(id, profile);
        Ok(())
    }

    /// Returns the number of lookups served so far.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve_profile(&self, id: &UserId) -> DirectoryResult<Option<Profile>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let profiles = self
            .profiles
            .read()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(profiles.get(id).cloned())
    }
}
