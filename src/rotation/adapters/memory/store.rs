//! In-memory implementation of the `EntityStore` port.
//!
//! Records are kept as JSON blobs under string keys so the adapter behaves
//! like the opaque key-value backend it stands in for: every load decodes a
//! fresh copy, and nothing but the persisted representation survives a save.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::rotation::{
    domain::{
        IdIndex, PersistedRotationData, PersistedUserData, Rotation, RotationId, SkillName, User,
        UserId,
    },
    ports::{EntityStore, StoreError, StoreResult},
};

const KNOWN_SKILLS_KEY: &str = "index/known_skills";
const ACTIVE_ROTATIONS_KEY: &str = "index/active_rotations";

fn rotation_key(id: &RotationId) -> String {
    format!("rotation/{id}")
}

fn user_key(id: &UserId) -> String {
    format!("user/{id}")
}

/// Error reported when writes have been switched off.
#[derive(Debug)]
struct WritesDisabledError {
    key: String,
}

impl fmt::Display for WritesDisabledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "writes are disabled, rejected {}", self.key)
    }
}

impl std::error::Error for WritesDisabledError {}

/// Thread-safe in-memory key-value entity store.
///
/// Counts loads and saves so tests can assert how often the backend was hit.
///
/// # Example
///
/// ```
/// use rota::rotation::adapters::memory::InMemoryEntityStore;
///
/// let store = InMemoryEntityStore::new();
/// assert_eq!(store.load_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityStore {
    records: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    loads: Arc<AtomicUsize>,
    saves: Arc<AtomicUsize>,
    reject_writes: Arc<AtomicBool>,
}

impl InMemoryEntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of load calls served so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Returns the number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Makes every subsequent save fail with a persistence error.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let records = self
            .records
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        records
            .get(key)
            .map(|bytes| {
                serde_json::from_slice(bytes)
                    .map_err(|err| StoreError::invalid_persisted_data(key, err))
            })
            .transpose()
    }

    fn save<T: Serialize>(&self, key: String, value: &T) -> StoreResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::persistence(WritesDisabledError { key }));
        }
        let bytes = serde_json::to_vec(value).map_err(StoreError::persistence)?;
        let mut records = self
            .records
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        records.insert(key, bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn load_known_skills(&self) -> StoreResult<Option<IdIndex<SkillName>>> {
        self.load(KNOWN_SKILLS_KEY)
    }

    async fn save_known_skills(&self, index: &IdIndex<SkillName>) -> StoreResult<()> {
        self.save(KNOWN_SKILLS_KEY.to_owned(), index)
    }

    async fn load_active_rotations(&self) -> StoreResult<Option<IdIndex<RotationId>>> {
        self.load(ACTIVE_ROTATIONS_KEY)
    }

    async fn save_active_rotations(&self, index: &IdIndex<RotationId>) -> StoreResult<()> {
        self.save(ACTIVE_ROTATIONS_KEY.to_owned(), index)
    }

    async fn load_rotation(&self, id: &RotationId) -> StoreResult<Option<Rotation>> {
        let data: Option<PersistedRotationData> = self.load(&rotation_key(id))?;
        Ok(data.map(Rotation::from_persisted))
    }

    async fn save_rotation(&self, rotation: &Rotation) -> StoreResult<()> {
        self.save(rotation_key(rotation.id()), &rotation.to_persisted())
    }

    async fn load_user(&self, id: &UserId) -> StoreResult<Option<User>> {
        let data: Option<PersistedUserData> = self.load(&user_key(id))?;
        Ok(data.map(User::from_persisted))
    }

    async fn save_user(&self, user: &User) -> StoreResult<()> {
        self.save(user_key(user.id()), &user.to_persisted())
    }
}
