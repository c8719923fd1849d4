//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rota::rotation::{
    adapters::memory::{InMemoryEntityStore, InMemoryUserDirectory},
    domain::{Profile, RotationId, SkillName, UserId},
    services::RotationService,
};
use rstest::fixture;

/// Service type wired to the in-memory adapters.
pub type TestService = RotationService<InMemoryEntityStore, InMemoryUserDirectory, DefaultClock>;

/// Users known to the directory in every scenario.
pub const DIRECTORY_USERS: [&str; 4] = ["admin", "alice", "bob", "carol"];

/// Service together with its adapters, kept for direct assertions.
pub struct Staffing {
    /// Service under test.
    pub service: TestService,
    /// Store backing the service.
    pub store: Arc<InMemoryEntityStore>,
}

/// Provides a service whose directory knows [`DIRECTORY_USERS`].
#[fixture]
pub fn staffing() -> Staffing {
    rota::telemetry::init_tracing_with_writer(tracing_subscriber::fmt::TestWriter::default());
    let store = Arc::new(InMemoryEntityStore::new());
    let directory = Arc::new(InMemoryUserDirectory::new());
    for name in DIRECTORY_USERS {
        directory
            .insert(user(name), Profile::new(name, name.to_uppercase()))
            .expect("seed directory");
    }
    Staffing {
        service: RotationService::new(Arc::clone(&store), directory, Arc::new(DefaultClock)),
        store,
    }
}

/// Parses a user identifier.
#[must_use]
pub fn user(value: &str) -> UserId {
    UserId::new(value).expect("valid user id")
}

/// Parses a rotation identifier.
#[must_use]
pub fn rotation(value: &str) -> RotationId {
    RotationId::new(value).expect("valid rotation id")
}

/// Parses a skill name.
#[must_use]
pub fn skill(value: &str) -> SkillName {
    SkillName::new(value).expect("valid skill name")
}
