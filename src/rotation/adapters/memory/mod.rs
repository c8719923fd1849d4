//! In-memory adapter implementations.
//!
//! Simple, thread-safe stand-ins for the persistence backend and the user
//! directory, used by tests and by embedders that keep state in process.

mod directory;
mod store;

pub use directory::InMemoryUserDirectory;
pub use store::InMemoryEntityStore;
