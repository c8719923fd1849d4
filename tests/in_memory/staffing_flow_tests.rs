//! End-to-end staffing flows against the in-memory adapters.

use super::helpers::{Staffing, rotation, skill, staffing, user};
use rota::rotation::{
    domain::{IssueSource, IssueSourceName, SkillLevel, SkillRequirement, TaskState},
    error::RotationError,
    services::{AssignTaskRequest, CreateTaskRequest},
};
use rstest::rstest;

fn pagerduty() -> IssueSourceName {
    IssueSourceName::new("pagerduty").expect("valid issue source name")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn on_call_engineer_is_staffed_on_an_incident(staffing: Staffing) {
    let admin = user("admin");
    let service = &staffing.service;

    service
        .add_known_skill(admin.clone(), skill("postgres"))
        .await
        .expect("add skill");
    service
        .create_rotation(admin.clone(), rotation("dba"))
        .await
        .expect("create rotation");
    service
        .join_rotation(admin.clone(), rotation("dba"), vec![user("alice"), user("bob")])
        .await
        .expect("join");
    service
        .qualify_user(admin.clone(), user("bob"), skill("postgres"), SkillLevel::Advanced)
        .await
        .expect("qualify bob");
    service
        .add_issue_source(
            admin.clone(),
            rotation("dba"),
            IssueSource::new(
                pagerduty(),
                vec![SkillRequirement::new(skill("postgres"), SkillLevel::Intermediate)],
            ),
        )
        .await
        .expect("add source");
    let task = service
        .create_task(
            admin.clone(),
            CreateTaskRequest::new(rotation("dba"), "replica lag above 30s").with_source(pagerduty()),
        )
        .await
        .expect("create task");

    let rejected = service
        .assign_task(
            admin.clone(),
            AssignTaskRequest::new(task.id().clone(), [user("alice")]),
        )
        .await;
    assert!(matches!(rejected, Err(RotationError::Ineligible { .. })));

    let outcome = service
        .assign_task(
            admin.clone(),
            AssignTaskRequest::new(task.id().clone(), [user("bob")]),
        )
        .await
        .expect("bob is eligible");
    assert_eq!(
        outcome.to_string(),
        "Assigned bob to task dba-1. Task is now in progress."
    );

    let shown = service
        .show_rotation(admin, rotation("dba"))
        .await
        .expect("show");
    let (stored_task, state) = shown.find_task(task.id()).expect("task kept");
    assert_eq!(state, TaskState::InProgress);
    assert!(stored_task.assignees().contains(&user("bob")));
    assert!(shown.pending_for_source(&pagerduty()).is_empty());
    assert_eq!(
        shown
            .users_with_skill(&skill("postgres"), SkillLevel::Beginner)
            .len(),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn forced_assignment_skips_eligibility_but_not_archival(staffing: Staffing) {
    let admin = user("admin");
    let service = &staffing.service;
    service
        .create_rotation(admin.clone(), rotation("sre"))
        .await
        .expect("create rotation");
    let task = service
        .create_task(admin.clone(), CreateTaskRequest::new(rotation("sre"), "rotate certs"))
        .await
        .expect("create task");

    let forced = service
        .assign_task(
            admin.clone(),
            AssignTaskRequest::new(task.id().clone(), [user("carol")]).with_force(true),
        )
        .await
        .expect("forced assignment");
    assert!(forced.forced());

    service
        .archive_rotation(admin.clone(), rotation("sre"))
        .await
        .expect("archive");
    let after_archive = service
        .assign_task(
            admin,
            AssignTaskRequest::new(task.id().clone(), [user("alice")]).with_force(true),
        )
        .await;
    assert!(matches!(after_archive, Err(RotationError::RotationArchived(_))));
}
