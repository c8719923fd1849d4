//! Behaviour tests for staffing tasks with eligibility checks and force.

mod task_assignment_steps;

use rstest_bdd_macros::scenario;
use task_assignment_steps::world::{AssignmentWorld, world};

#[scenario(
    path = "tests/features/task_assignment.feature",
    name = "Assign a qualified member"
)]
#[tokio::test(flavor = "multi_thread")]
async fn assign_qualified_member(world: AssignmentWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_assignment.feature",
    name = "Reject a member missing a required skill"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_unqualified_member(world: AssignmentWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_assignment.feature",
    name = "Force an assignment past the eligibility policy"
)]
#[tokio::test(flavor = "multi_thread")]
async fn force_past_eligibility(world: AssignmentWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_assignment.feature",
    name = "Refuse forced assignment on an archived rotation"
)]
#[tokio::test(flavor = "multi_thread")]
async fn refuse_forced_assignment_when_archived(world: AssignmentWorld) {
    let _ = world;
}
