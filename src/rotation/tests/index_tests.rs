//! Unit tests for the ordered identifier index and its persistence.

use super::fixtures::{rotation_id, skill};
use crate::rotation::{
    adapters::memory::InMemoryEntityStore,
    domain::{IdIndex, SkillName},
    ports::EntityStore,
};
use rstest::rstest;

fn names(index: &IdIndex<SkillName>) -> Vec<&str> {
    index.iter().map(SkillName::as_str).collect()
}

#[test]
fn add_preserves_insertion_order_and_is_idempotent() {
    let mut index = IdIndex::new();
    assert!(index.add(skill("b")));
    assert!(index.add(skill("a")));
    assert!(!index.add(skill("b")));

    assert_eq!(names(&index), vec!["b", "a"]);
    assert_eq!(index.len(), 2);
}

#[test]
fn remove_keeps_order_of_remaining_ids() {
    let mut index: IdIndex<SkillName> = ["a", "b", "c"].into_iter().map(skill).collect();

    assert!(index.remove(&skill("b")));
    assert!(!index.remove(&skill("b")));

    assert_eq!(names(&index), vec!["a", "c"]);
    assert!(!index.contains(&skill("b")));
}

#[test]
fn deserializing_drops_duplicates_keeping_first_occurrence() {
    let index: IdIndex<SkillName> =
        serde_json::from_str(r#"["a","b","a","c"]"#).expect("index decodes");

    assert_eq!(names(&index), vec!["a", "b", "c"]);
}

#[test]
fn serializes_as_plain_list() {
    let index: IdIndex<SkillName> = ["z", "y"].into_iter().map(skill).collect();
    let json = serde_json::to_string(&index).expect("index encodes");
    assert_eq!(json, r#"["z","y"]"#);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn known_skills_survive_store_round_trip_without_duplicates() {
    let store = InMemoryEntityStore::new();
    let mut index = IdIndex::new();
    for name in ["a", "b", "a", "c"] {
        index.add(skill(name));
    }

    store.save_known_skills(&index).await.expect("save");
    let loaded = store
        .load_known_skills()
        .await
        .expect("load")
        .expect("index present");

    assert_eq!(names(&loaded), vec!["a", "b", "c"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_index_loads_as_none() {
    let store = InMemoryEntityStore::new();
    let loaded = store.load_active_rotations().await.expect("load");
    assert!(loaded.is_none());
    assert!(store.load_rotation(&rotation_id("sre")).await.expect("load").is_none());
}
