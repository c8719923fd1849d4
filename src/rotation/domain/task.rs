//! Rotation-scoped tasks.

use super::{IdIndex, IssueSourceName, RotationDomainError, SkillRequirement, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Which rotation list a task currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Task is waiting for its first assignment.
    Pending,
    /// Task has been assigned at least once.
    InProgress,
}

impl TaskState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
        }
    }
}

/// A unit of work within a rotation.
///
/// Serializes through [`PersistedTaskData`], so stored tasks are validated
/// on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedTaskData", into = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    summary: String,
    source: Option<IssueSourceName>,
    requirements: Vec<SkillRequirement>,
    assignees: IdIndex<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted summary.
    pub summary: String,
    /// Persisted issue source, if any.
    #[serde(default)]
    pub source: Option<IssueSourceName>,
    /// Persisted skill requirements.
    #[serde(default)]
    pub requirements: Vec<SkillRequirement>,
    /// Persisted assignees.
    #[serde(default)]
    pub assignees: IdIndex<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an unassigned task.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::EmptyTaskSummary`] when the summary is
    /// blank.
    pub fn new(
        id: TaskId,
        summary: impl Into<String>,
        source: Option<IssueSourceName>,
        requirements: Vec<SkillRequirement>,
        clock: &impl Clock,
    ) -> Result<Self, RotationDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id,
            summary: validated_summary(&summary.into())?,
            source,
            requirements,
            assignees: IdIndex::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::EmptyTaskSummary`] when the stored
    /// summary is blank.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, RotationDomainError> {
        Ok(Self {
            summary: validated_summary(&data.summary)?,
            id: data.id,
            source: data.source,
            requirements: data.requirements,
            assignees: data.assignees,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the persisted representation.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id.clone(),
            summary: self.summary.clone(),
            source: self.source.clone(),
            requirements: self.requirements.clone(),
            assignees: self.assignees.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the issue source the task came from, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&IssueSourceName> {
        self.source.as_ref()
    }

    /// Returns the skill requirements each assignee must meet.
    #[must_use]
    pub fn requirements(&self) -> &[SkillRequirement] {
        &self.requirements
    }

    /// Returns the users committed to this task.
    #[must_use]
    pub const fn assignees(&self) -> &IdIndex<UserId> {
        &self.assignees
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Adds users to the assignee set, returning those newly added.
    pub(crate) fn assign<'a>(
        &mut self,
        users: impl IntoIterator<Item = &'a UserId>,
        clock: &impl Clock,
    ) -> Vec<UserId> {
        let added: Vec<UserId> = users
            .into_iter()
            .filter(|id| self.assignees.add((*id).clone()))
            .cloned()
            .collect();
        self.updated_at = clock.utc();
        added
    }
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = RotationDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

impl From<Task> for PersistedTaskData {
    fn from(task: Task) -> Self {
        task.to_persisted()
    }
}

fn validated_summary(raw: &str) -> Result<String, RotationDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RotationDomainError::EmptyTaskSummary);
    }
    Ok(trimmed.to_owned())
}
