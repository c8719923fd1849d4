//! Persistence behaviour of rotation records through the in-memory store.

use super::helpers::{Staffing, rotation, skill, staffing, user};
use rota::rotation::{
    domain::{IdIndex, ROTATION_SCHEMA_VERSION, SkillLevel},
    ports::EntityStore,
    services::CreateTaskRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reloaded_rotation_holds_references_only(staffing: Staffing) {
    let admin = user("admin");
    staffing
        .service
        .create_rotation(admin.clone(), rotation("sre"))
        .await
        .expect("create");
    staffing
        .service
        .join_rotation(admin, rotation("sre"), vec![user("alice"), user("bob")])
        .await
        .expect("join");

    let stored = staffing
        .store
        .load_rotation(&rotation("sre"))
        .await
        .expect("load")
        .expect("rotation stored");

    assert_eq!(stored.schema_version(), ROTATION_SCHEMA_VERSION);
    assert_eq!(stored.members().len(), 2);
    assert!(stored.members().values().all(|member| !member.is_materialized()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_numbers_continue_after_reload(staffing: Staffing) {
    let admin = user("admin");
    staffing
        .service
        .create_rotation(admin.clone(), rotation("sre"))
        .await
        .expect("create");
    for summary in ["first", "second"] {
        staffing
            .service
            .create_task(admin.clone(), CreateTaskRequest::new(rotation("sre"), summary))
            .await
            .expect("create task");
    }

    let third = staffing
        .service
        .create_task(admin, CreateTaskRequest::new(rotation("sre"), "third"))
        .await
        .expect("create task");

    assert_eq!(third.id().number(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn known_skill_index_keeps_first_insertion_order(staffing: Staffing) {
    let admin = user("admin");
    for name in ["linux", "postgres", "linux", "kafka"] {
        staffing
            .service
            .add_known_skill(admin.clone(), skill(name))
            .await
            .expect("add skill");
    }

    let stored: IdIndex<_> = staffing
        .store
        .load_known_skills()
        .await
        .expect("load")
        .expect("index stored");

    let names: Vec<&str> = stored.iter().map(|name| name.as_str()).collect();
    assert_eq!(names, vec!["linux", "postgres", "kafka"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_skills_persist_without_profiles(staffing: Staffing) {
    let admin = user("admin");
    staffing
        .service
        .add_known_skill(admin.clone(), skill("redis"))
        .await
        .expect("add skill");
    staffing
        .service
        .qualify_user(admin, user("carol"), skill("redis"), SkillLevel::Beginner)
        .await
        .expect("qualify");

    let stored = staffing
        .store
        .load_user(&user("carol"))
        .await
        .expect("load")
        .expect("user stored");

    assert_eq!(stored.skill_level(&skill("redis")), Some(SkillLevel::Beginner));
    assert!(!stored.is_expanded());
}
