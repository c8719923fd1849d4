//! Port contracts for rotation staffing.
//!
//! Ports define infrastructure-agnostic interfaces used by the domain
//! context and the rotation services.

pub mod directory;
pub mod eligibility;
pub mod store;

pub use directory::{DirectoryError, DirectoryResult, UserDirectory};
pub use eligibility::{EligibilityPolicy, EligibilityResult, EligibilityRules, Ineligibility};
pub use store::{EntityStore, StoreError, StoreResult};

#[cfg(test)]
pub use directory::MockUserDirectory;
#[cfg(test)]
pub use store::MockEntityStore;
