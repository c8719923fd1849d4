//! Shared world state for task assignment BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rota::rotation::{
    adapters::memory::{InMemoryEntityStore, InMemoryUserDirectory},
    domain::{Profile, RotationId, TaskId, UserId},
    error::RotationError,
    services::{AssignTaskOutcome, RotationService},
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestRotationService =
    RotationService<InMemoryEntityStore, InMemoryUserDirectory, DefaultClock>;

/// Scenario world for task assignment behaviour tests.
pub struct AssignmentWorld {
    pub service: TestRotationService,
    pub directory: Arc<InMemoryUserDirectory>,
    pub admin: UserId,
    pub rotation: Option<RotationId>,
    pub task: Option<TaskId>,
    pub last_assignment: Option<Result<AssignTaskOutcome, RotationError>>,
}

impl AssignmentWorld {
    /// Creates a world whose directory knows only the acting admin.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let admin = UserId::new("admin").expect("valid admin id");
        directory
            .insert(admin.clone(), Profile::new("admin", "Administrator"))
            .expect("seed directory");
        let service = RotationService::new(
            Arc::new(InMemoryEntityStore::new()),
            Arc::clone(&directory),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            directory,
            admin,
            rotation: None,
            task: None,
            last_assignment: None,
        }
    }

    /// Registers `name` with the user directory and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the identifier is invalid or the directory
    /// rejects the insert.
    pub fn register_user(&self, name: &str) -> Result<UserId, eyre::Report> {
        let id = UserId::new(name)?;
        self.directory
            .insert(id.clone(), Profile::new(name, name.to_uppercase()))?;
        Ok(id)
    }

    /// Returns the rotation created by the background.
    ///
    /// # Errors
    ///
    /// Returns an error when no rotation has been created yet.
    pub fn rotation(&self) -> Result<RotationId, eyre::Report> {
        self.rotation
            .clone()
            .ok_or_else(|| eyre::eyre!("missing rotation in scenario world"))
    }

    /// Returns the task created by the background.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<TaskId, eyre::Report> {
        self.task
            .clone()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for AssignmentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AssignmentWorld {
    AssignmentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
