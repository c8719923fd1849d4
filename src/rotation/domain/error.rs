//! Error types for rotation domain validation and parsing.

use super::{IssueSourceName, RotationId, TaskId, UserId};
use thiserror::Error;

/// Errors returned while constructing or mutating rotation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RotationDomainError {
    /// An identifier is empty after trimming.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Kind of identifier being parsed.
        kind: &'static str,
    },

    /// An identifier contains characters outside its allowed set.
    #[error("invalid {kind} '{value}'")]
    InvalidIdentifier {
        /// Kind of identifier being parsed.
        kind: &'static str,
        /// Raw rejected input.
        value: String,
    },

    /// An identifier exceeds the storage length limit.
    #[error("{kind} exceeds {limit} character limit: {value}")]
    IdentifierTooLong {
        /// Kind of identifier being parsed.
        kind: &'static str,
        /// Raw rejected input.
        value: String,
        /// Maximum accepted length.
        limit: usize,
    },

    /// A task identifier is not in `<rotation>-<number>` form.
    #[error("invalid task identifier '{0}', expected <rotation>-<number>")]
    InvalidTaskId(String),

    /// The task summary is empty after trimming.
    #[error("task summary must not be empty")]
    EmptyTaskSummary,

    /// An issue source with the same name already exists on the rotation.
    #[error("issue source {0} already exists")]
    DuplicateIssueSource(IssueSourceName),

    /// The referenced issue source does not exist on the rotation.
    #[error("issue source {0} is not found")]
    IssueSourceNotFound(IssueSourceName),

    /// The task is not in the pending or in-progress list.
    #[error("task {0} is not found")]
    TaskNotFound(TaskId),

    /// The rotation has issued every task number it can represent.
    #[error("rotation {0} has no task numbers left")]
    TaskNumbersExhausted(RotationId),

    /// A user is already a member of the rotation.
    #[error("user {0} is already a member")]
    AlreadyMember(UserId),

    /// A user is not a member of the rotation.
    #[error("user {0} is not a member")]
    NotAMember(UserId),
}

/// Error returned while parsing skill levels from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown skill level: {0}")]
pub struct ParseSkillLevelError(pub String);
