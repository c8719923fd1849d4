//! Rotation aggregate root.

use super::{
    IdIndex, IssueSourceName, RotationDomainError, RotationId, SkillLevel, SkillName,
    SkillRequirement, Task, TaskId, TaskState, User, UserId, UserRef,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema version stamped on every rotation written by this crate.
pub const ROTATION_SCHEMA_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Members of a rotation keyed by user identifier.
pub type MemberMap = BTreeMap<UserId, UserRef>;

/// External work-item producer feeding tasks into a rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSource {
    name: IssueSourceName,
    requirements: Vec<SkillRequirement>,
}

impl IssueSource {
    /// Creates an issue source whose tasks inherit `requirements`.
    #[must_use]
    pub const fn new(name: IssueSourceName, requirements: Vec<SkillRequirement>) -> Self {
        Self { name, requirements }
    }

    /// Returns the source name.
    #[must_use]
    pub const fn name(&self) -> &IssueSourceName {
        &self.name
    }

    /// Returns the requirements copied onto tasks from this source.
    #[must_use]
    pub fn requirements(&self) -> &[SkillRequirement] {
        &self.requirements
    }
}

/// Rotation aggregate root.
///
/// The member map always mirrors the member index: loading a rotation
/// installs a [`UserRef::Reference`] per member, and expansion replaces
/// references with materialized users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    id: RotationId,
    schema_version: String,
    archived: bool,
    issue_sources: Vec<IssueSource>,
    pending: Vec<Task>,
    in_progress: Vec<Task>,
    member_ids: IdIndex<UserId>,
    next_task_number: u32,
    members: MemberMap,
}

/// Parameter object for reconstructing a persisted rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRotationData {
    /// Persisted rotation identifier.
    pub id: RotationId,
    /// Crate version that last wrote the record.
    #[serde(default)]
    pub schema_version: String,
    /// Persisted archived flag.
    #[serde(default)]
    pub archived: bool,
    /// Persisted issue sources, in configured order.
    #[serde(default)]
    pub issue_sources: Vec<IssueSource>,
    /// Persisted pending tasks.
    #[serde(default)]
    pub pending: Vec<Task>,
    /// Persisted in-progress tasks.
    #[serde(default)]
    pub in_progress: Vec<Task>,
    /// Persisted member identifiers.
    #[serde(default)]
    pub member_ids: IdIndex<UserId>,
    /// Number given to the next created task.
    #[serde(default = "first_task_number")]
    pub next_task_number: u32,
}

const fn first_task_number() -> u32 {
    1
}

impl Rotation {
    /// Creates an empty, active rotation.
    #[must_use]
    pub fn new(id: RotationId) -> Self {
        Self {
            id,
            schema_version: ROTATION_SCHEMA_VERSION.to_owned(),
            archived: false,
            issue_sources: Vec::new(),
            pending: Vec::new(),
            in_progress: Vec::new(),
            member_ids: IdIndex::new(),
            next_task_number: first_task_number(),
            members: MemberMap::new(),
        }
    }

    /// Reconstructs an unexpanded rotation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRotationData) -> Self {
        let members = data
            .member_ids
            .iter()
            .map(|id| (id.clone(), UserRef::Reference(id.clone())))
            .collect();
        let highest = data
            .pending
            .iter()
            .chain(&data.in_progress)
            .map(|task| task.id().number())
            .max()
            .unwrap_or(0);
        Self {
            id: data.id,
            schema_version: data.schema_version,
            archived: data.archived,
            issue_sources: data.issue_sources,
            pending: data.pending,
            in_progress: data.in_progress,
            member_ids: data.member_ids,
            next_task_number: data.next_task_number.max(highest.saturating_add(1)),
            members,
        }
    }

    /// Returns the persisted representation, stamped with the current
    /// schema version. The member map is not persisted.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedRotationData {
        PersistedRotationData {
            id: self.id.clone(),
            schema_version: ROTATION_SCHEMA_VERSION.to_owned(),
            archived: self.archived,
            issue_sources: self.issue_sources.clone(),
            pending: self.pending.clone(),
            in_progress: self.in_progress.clone(),
            member_ids: self.member_ids.clone(),
            next_task_number: self.next_task_number,
        }
    }

    /// Returns the rotation identifier.
    #[must_use]
    pub const fn id(&self) -> &RotationId {
        &self.id
    }

    /// Returns the version of the crate that wrote this record.
    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Returns `true` once the rotation has been archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived
    }

    /// Marks the rotation archived.
    pub const fn archive(&mut self) {
        self.archived = true;
    }

    /// Returns the configured issue sources in order.
    #[must_use]
    pub fn issue_sources(&self) -> &[IssueSource] {
        &self.issue_sources
    }

    /// Returns tasks awaiting their first assignment.
    #[must_use]
    pub fn pending(&self) -> &[Task] {
        &self.pending
    }

    /// Returns tasks that have been assigned.
    #[must_use]
    pub fn in_progress(&self) -> &[Task] {
        &self.in_progress
    }

    /// Returns the member identifier index.
    #[must_use]
    pub const fn member_ids(&self) -> &IdIndex<UserId> {
        &self.member_ids
    }

    /// Returns the member map.
    #[must_use]
    pub const fn members(&self) -> &MemberMap {
        &self.members
    }

    /// Returns the materialized member record for `id`, if loaded.
    #[must_use]
    pub fn member(&self, id: &UserId) -> Option<&User> {
        self.members.get(id).and_then(UserRef::user)
    }

    /// Returns `true` when every member is materialized.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.members.values().all(UserRef::is_materialized)
    }

    /// Returns member identifiers that still need to be loaded.
    #[must_use]
    pub fn unresolved_members(&self) -> Vec<UserId> {
        self.members
            .values()
            .filter_map(|member| match member {
                UserRef::Reference(id) => Some(id.clone()),
                UserRef::Materialized(_) => None,
            })
            .collect()
    }

    /// Installs a materialized member.
    ///
    /// Only replaces a reference; an already materialized member is kept so
    /// expansion stays sticky for the request.
    pub fn install_member(&mut self, user: User) {
        if let Some(slot) = self.members.get_mut(user.id())
            && !slot.is_materialized()
        {
            *slot = UserRef::Materialized(user);
        }
    }

    /// Adds a member.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::AlreadyMember`] when the user is
    /// already in the member index.
    pub fn add_member(&mut self, member: UserRef) -> Result<(), RotationDomainError> {
        let id = member.id().clone();
        if !self.member_ids.add(id.clone()) {
            return Err(RotationDomainError::AlreadyMember(id));
        }
        self.members.insert(id, member);
        Ok(())
    }

    /// Removes a member.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::NotAMember`] when the user is not in
    /// the member index.
    pub fn remove_member(&mut self, id: &UserId) -> Result<(), RotationDomainError> {
        if !self.member_ids.remove(id) {
            return Err(RotationDomainError::NotAMember(id.clone()));
        }
        self.members.remove(id);
        Ok(())
    }

    /// Returns a copy whose members are replaced wholesale by `pool`.
    ///
    /// Used to build filtered views without touching the stored rotation.
    #[must_use]
    pub fn with_member_ids(&self, pool: BTreeMap<UserId, User>) -> Self {
        let mut view = self.clone();
        view.member_ids = pool.keys().cloned().collect();
        view.members = pool
            .into_iter()
            .map(|(id, user)| (id, UserRef::Materialized(user)))
            .collect();
        view
    }

    /// Collects materialized members holding `skill` at `min_level` or above.
    #[must_use]
    pub fn users_with_skill(
        &self,
        skill: &SkillName,
        min_level: SkillLevel,
    ) -> BTreeMap<UserId, User> {
        let requirement = SkillRequirement::new(skill.clone(), min_level);
        self.members
            .values()
            .filter_map(UserRef::user)
            .filter(|user| requirement.is_met_by(user.skill_level(skill)))
            .map(|user| (user.id().clone(), user.clone()))
            .collect()
    }

    /// Finds an issue source by name, returning it with its position.
    #[must_use]
    pub fn find_issue_source(&self, name: &IssueSourceName) -> Option<(&IssueSource, usize)> {
        self.issue_sources
            .iter()
            .enumerate()
            .find(|(_, source)| source.name() == name)
            .map(|(position, source)| (source, position))
    }

    /// Appends an issue source.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::DuplicateIssueSource`] when a source
    /// with the same name exists.
    pub fn add_issue_source(&mut self, source: IssueSource) -> Result<(), RotationDomainError> {
        if self.find_issue_source(source.name()).is_some() {
            return Err(RotationDomainError::DuplicateIssueSource(
                source.name().clone(),
            ));
        }
        self.issue_sources.push(source);
        Ok(())
    }

    /// Returns the pending tasks that came from `source`.
    #[must_use]
    pub fn pending_for_source(&self, source: &IssueSourceName) -> Vec<&Task> {
        self.pending
            .iter()
            .filter(|task| task.source() == Some(source))
            .collect()
    }

    /// Creates a pending task and returns its identifier.
    ///
    /// When `source` is given the task inherits that source's requirements,
    /// followed by `extra_requirements`.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::IssueSourceNotFound`] for an unknown
    /// source, [`RotationDomainError::EmptyTaskSummary`] for a blank
    /// summary, or [`RotationDomainError::TaskNumbersExhausted`] once the
    /// counter cannot advance.
    pub fn create_task(
        &mut self,
        summary: impl Into<String>,
        source: Option<&IssueSourceName>,
        extra_requirements: Vec<SkillRequirement>,
        clock: &impl Clock,
    ) -> Result<TaskId, RotationDomainError> {
        let mut requirements = match source {
            Some(name) => self
                .find_issue_source(name)
                .map(|(found, _)| found.requirements().to_vec())
                .ok_or_else(|| RotationDomainError::IssueSourceNotFound(name.clone()))?,
            None => Vec::new(),
        };
        for requirement in extra_requirements {
            if !requirements.contains(&requirement) {
                requirements.push(requirement);
            }
        }

        let following = self
            .next_task_number
            .checked_add(1)
            .ok_or_else(|| RotationDomainError::TaskNumbersExhausted(self.id.clone()))?;
        let id = TaskId::new(self.id.clone(), self.next_task_number);
        let task = Task::new(id.clone(), summary, source.cloned(), requirements, clock)?;
        self.pending.push(task);
        self.next_task_number = following;
        Ok(id)
    }

    /// Finds a task in either list.
    #[must_use]
    pub fn find_task(&self, id: &TaskId) -> Option<(&Task, TaskState)> {
        self.pending
            .iter()
            .find(|task| task.id() == id)
            .map(|task| (task, TaskState::Pending))
            .or_else(|| {
                self.in_progress
                    .iter()
                    .find(|task| task.id() == id)
                    .map(|task| (task, TaskState::InProgress))
            })
    }

    /// Adds `users` to a task's assignees.
    ///
    /// A pending task moves to the in-progress list on its first
    /// assignment. Returns the identifiers that were newly assigned.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::TaskNotFound`] when the task is in
    /// neither list.
    pub fn assign_task(
        &mut self,
        id: &TaskId,
        users: &[UserId],
        clock: &impl Clock,
    ) -> Result<Vec<UserId>, RotationDomainError> {
        if let Some(task) = self.in_progress.iter_mut().find(|task| task.id() == id) {
            return Ok(task.assign(users, clock));
        }

        let position = self
            .pending
            .iter()
            .position(|task| task.id() == id)
            .ok_or_else(|| RotationDomainError::TaskNotFound(id.clone()))?;
        let mut task = self.pending.remove(position);
        let added = task.assign(users, clock);
        self.in_progress.push(task);
        Ok(added)
    }
}
