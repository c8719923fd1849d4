//! When steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use rota::rotation::services::AssignTaskRequest;
use rstest_bdd_macros::when;

fn assign(world: &mut AssignmentWorld, user: &str, force: bool) -> Result<(), eyre::Report> {
    let candidate = world.register_user(user)?;
    let request = AssignTaskRequest::new(world.task()?, [candidate]).with_force(force);
    let result = run_async(world.service.assign_task(world.admin.clone(), request));
    world.last_assignment = Some(result);
    Ok(())
}

#[when(r#""{user}" is assigned to the task"#)]
fn assign_user(world: &mut AssignmentWorld, user: String) -> Result<(), eyre::Report> {
    assign(world, &user, false)
}

#[when(r#""{user}" is force-assigned to the task"#)]
fn force_assign_user(world: &mut AssignmentWorld, user: String) -> Result<(), eyre::Report> {
    assign(world, &user, true)
}
