//! Then steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use rota::rotation::{
    domain::{Task, TaskState, UserId},
    error::RotationError,
};
use rstest_bdd_macros::then;

fn current_task(world: &AssignmentWorld) -> Result<(Task, TaskState), eyre::Report> {
    let task_id = world.task()?;
    let rotation = run_async(
        world
            .service
            .show_rotation(world.admin.clone(), world.rotation()?),
    )
    .map_err(|err| eyre::eyre!("show rotation failed: {err}"))?;
    rotation
        .find_task(&task_id)
        .map(|(task, state)| (task.clone(), state))
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from rotation"))
}

fn last_error(world: &AssignmentWorld) -> Result<&RotationError, eyre::Report> {
    match world.last_assignment.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(outcome)) => Err(eyre::eyre!("expected a rejection, got: {outcome}")),
        None => Err(eyre::eyre!("missing assignment result in scenario world")),
    }
}

#[then("the assignment succeeds")]
fn assignment_succeeds(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_assignment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assignment result in scenario world"))?;
    let outcome = result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected assignment failure: {err}"))?;
    eyre::ensure!(outcome.added().len() == 1, "expected one new assignee");
    Ok(())
}

#[then(r#"the task is in progress with assignee "{user}""#)]
fn task_in_progress_with(world: &AssignmentWorld, user: String) -> Result<(), eyre::Report> {
    let (task, state) = current_task(world)?;
    eyre::ensure!(
        state == TaskState::InProgress,
        "expected in_progress, found {}",
        state.as_str()
    );
    let expected = UserId::new(user)?;
    eyre::ensure!(
        task.assignees().contains(&expected),
        "{expected} is not assigned to {}",
        task.id()
    );
    Ok(())
}

#[then("the assignment is rejected as ineligible")]
fn assignment_ineligible(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, RotationError::Ineligible { .. }),
        "expected an eligibility rejection, got: {err}"
    );
    Ok(())
}

#[then("the task is still pending with no assignees")]
fn task_still_pending(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let (task, state) = current_task(world)?;
    eyre::ensure!(
        state == TaskState::Pending,
        "expected pending, found {}",
        state.as_str()
    );
    eyre::ensure!(task.assignees().is_empty(), "task unexpectedly has assignees");
    Ok(())
}

#[then("the assignment is rejected because the rotation is archived")]
fn assignment_rejected_archived(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, RotationError::RotationArchived(_)),
        "expected an archived rotation rejection, got: {err}"
    );
    Ok(())
}
