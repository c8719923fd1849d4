//! Service-level errors for rotation operations.

use crate::rotation::{
    domain::{RotationDomainError, RotationId, SkillName, TaskId, UserId},
    ports::{DirectoryError, Ineligibility, StoreError},
};
use thiserror::Error;

/// Result type for preconditions and rotation operations.
pub type RotationResult<T> = Result<T, RotationError>;

/// Broad classification of a [`RotationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A precondition or input check rejected the request.
    Validation,
    /// An identifier did not resolve to a known entity.
    NotFound,
    /// The store or directory failed.
    Infrastructure,
}

/// Errors returned by preconditions and rotation operations.
#[derive(Debug, Error)]
pub enum RotationError {
    /// The rotation is archived and cannot be changed.
    #[error("rotation {0} is archived")]
    RotationArchived(RotationId),

    /// A rotation with this identifier already exists.
    #[error("rotation {0} already exists")]
    RotationExists(RotationId),

    /// The skill is not in the known-skill index.
    #[error("skill {0} is not found")]
    SkillNotFound(SkillName),

    /// A candidate failed the eligibility policy.
    #[error("cannot assign task {task}: {reason}")]
    Ineligible {
        /// Task being assigned.
        task: TaskId,
        /// Why the candidate was rejected.
        reason: Ineligibility,
    },

    /// An operation that needs users was given none.
    #[error("at least one user is required")]
    NoUsers,

    /// The rotation does not exist.
    #[error("rotation {0} is not found")]
    RotationNotFound(RotationId),

    /// The user directory does not know the user.
    #[error("user {0} is not found")]
    UserNotFound(UserId),

    /// A precondition that resolves the rotation was not run first.
    #[error("no rotation has been resolved for this request")]
    RotationNotResolved,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RotationDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl RotationError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RotationArchived(_)
            | Self::RotationExists(_)
            | Self::SkillNotFound(_)
            | Self::Ineligible { .. }
            | Self::NoUsers => ErrorKind::Validation,
            Self::RotationNotFound(_) | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Domain(err) => match err {
                RotationDomainError::TaskNotFound(_)
                | RotationDomainError::IssueSourceNotFound(_)
                | RotationDomainError::NotAMember(_) => ErrorKind::NotFound,
                _ => ErrorKind::Validation,
            },
            Self::RotationNotResolved | Self::Store(_) | Self::Directory(_) => {
                ErrorKind::Infrastructure
            }
        }
    }

    /// Returns `true` for errors caused by the request rather than the
    /// infrastructure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Infrastructure)
    }
}
