//! Domain model for rotation staffing.
//!
//! Rotations, their tasks and members, users with skill levels, and the
//! ordered identifier index that backs every persisted catalogue. Nothing in
//! here touches storage or the user directory.

mod error;
mod ids;
mod index;
mod rotation;
mod skill;
mod task;
mod user;

pub use error::{ParseSkillLevelError, RotationDomainError};
pub use ids::{IssueSourceName, RotationId, SkillName, TaskId, UserId};
pub use index::IdIndex;
pub use rotation::{
    IssueSource, MemberMap, PersistedRotationData, ROTATION_SCHEMA_VERSION, Rotation,
};
pub use skill::{SkillLevel, SkillRequirement};
pub use task::{PersistedTaskData, Task, TaskState};
pub use user::{PersistedUserData, Profile, User, UserRef};
