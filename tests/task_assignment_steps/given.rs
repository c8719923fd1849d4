//! Given steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use eyre::WrapErr;
use rota::rotation::{
    domain::{RotationId, SkillLevel, SkillName, SkillRequirement},
    services::CreateTaskRequest,
};
use rstest_bdd_macros::given;

#[given(r#"a known skill "{name}""#)]
fn known_skill(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let skill = SkillName::new(name)?;
    run_async(world.service.add_known_skill(world.admin.clone(), skill))
        .wrap_err("add known skill")?;
    Ok(())
}

#[given(r#"a rotation "{name}" with members "{first}" and "{second}""#)]
fn rotation_with_members(
    world: &mut AssignmentWorld,
    name: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let rotation = RotationId::new(name)?;
    let members = vec![world.register_user(&first)?, world.register_user(&second)?];
    run_async(
        world
            .service
            .create_rotation(world.admin.clone(), rotation.clone()),
    )
    .wrap_err("create rotation")?;
    run_async(
        world
            .service
            .join_rotation(world.admin.clone(), rotation.clone(), members),
    )
    .wrap_err("join rotation")?;
    world.rotation = Some(rotation);
    Ok(())
}

#[given(r#"user "{user}" holds "{skill}" at level "{level}""#)]
fn user_holds_skill(
    world: &mut AssignmentWorld,
    user: String,
    skill: String,
    level: String,
) -> Result<(), eyre::Report> {
    let user_id = world.register_user(&user)?;
    let skill_name = SkillName::new(skill)?;
    let skill_level = SkillLevel::try_from(level.as_str())?;
    run_async(world.service.qualify_user(
        world.admin.clone(),
        user_id,
        skill_name,
        skill_level,
    ))
    .wrap_err("qualify user")?;
    Ok(())
}

#[given(r#"a pending task "{summary}" requiring "{skill}" at level "{level}""#)]
fn pending_task_with_requirement(
    world: &mut AssignmentWorld,
    summary: String,
    skill: String,
    level: String,
) -> Result<(), eyre::Report> {
    let requirement = SkillRequirement::new(
        SkillName::new(skill)?,
        SkillLevel::try_from(level.as_str())?,
    );
    let request = CreateTaskRequest::new(world.rotation()?, summary).with_requirement(requirement);
    let task = run_async(world.service.create_task(world.admin.clone(), request))
        .wrap_err("create task")?;
    world.task = Some(task.id().clone());
    Ok(())
}

#[given("the rotation has been archived")]
fn rotation_archived(world: &mut AssignmentWorld) -> Result<(), eyre::Report> {
    run_async(
        world
            .service
            .archive_rotation(world.admin.clone(), world.rotation()?),
    )
    .wrap_err("archive rotation")?;
    Ok(())
}
