//! Command behaviour against the in-memory store.

use super::helpers::execute_line;
use super::*;
use guide_core::{GuideId, GuideStore, MemoryGuideStore};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn store() -> MemoryGuideStore {
    MemoryGuideStore::new()
}

fn add_san_cristobal(store: &mut MemoryGuideStore) {
    execute_line(
        store,
        &[
            "add-guide",
            "San Cristobal",
            "--latitude",
            "16.7371",
            "--longitude",
            "-92.6375",
        ],
    )
    .expect("add guide");
}

#[rstest]
fn add_guide_prints_the_persisted_guide(mut store: MemoryGuideStore) {
    let output = execute_line(
        &mut store,
        &[
            "add-guide",
            "San Cristobal",
            "--description",
            "Highlands of Chiapas",
            "--latitude",
            "16.7371",
            "--longitude",
            "-92.6375",
        ],
    )
    .expect("add guide");
    assert_eq!(
        output,
        json!({
            "id": 1,
            "name": "San Cristobal",
            "description": "Highlands of Chiapas",
            "coordinate": { "latitude": 16.7371, "longitude": -92.6375 },
        })
    );
}

#[rstest]
#[case::empty_name(&["add-guide", ""])]
#[case::latitude_only(&["add-guide", "Lone", "--latitude", "10"])]
#[case::out_of_range(&["add-guide", "North", "--latitude", "91", "--longitude", "0"])]
#[case::not_a_number(&["add-guide", "Nowhere", "--latitude", "abc", "--longitude", "0"])]
fn invalid_guides_are_rejected(mut store: MemoryGuideStore, #[case] args: &[&str]) {
    let err = execute_line(&mut store, args).expect_err("invalid input");
    assert!(matches!(err, CliError::Invalid(_)), "unexpected error: {err:?}");
    assert_eq!(store.count_guides().expect("count"), 0);
}

#[rstest]
fn list_guides_filters_by_prefix(mut store: MemoryGuideStore) {
    for name in ["test 1", "guide 1", "test 2"] {
        execute_line(&mut store, &["add-guide", name]).expect("add guide");
    }
    let output = execute_line(&mut store, &["list-guides", "--query", "test"]).expect("list");
    let names: Vec<_> = output
        .as_array()
        .expect("array output")
        .iter()
        .map(|guide| guide["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("test 1"), json!("test 2")]);

    let all = execute_line(&mut store, &["list-guides"]).expect("list");
    assert_eq!(all.as_array().map(Vec::len), Some(3));
}

#[rstest]
fn show_guide_includes_points_of_interest(mut store: MemoryGuideStore) {
    add_san_cristobal(&mut store);
    execute_line(
        &mut store,
        &[
            "add-poi",
            "1",
            "Cafeología",
            "--latitude",
            "16.737393",
            "--longitude",
            "-92.635857",
        ],
    )
    .expect("add poi");

    let output = execute_line(&mut store, &["show-guide", "1"]).expect("show guide");
    assert_eq!(output["guide"]["name"], json!("San Cristobal"));
    assert_eq!(output["points_of_interest"][0]["name"], json!("Cafeología"));
    assert_eq!(output["points_of_interest"][0]["guide_id"], json!(1));
}

#[rstest]
fn edit_guide_applies_only_given_fields(mut store: MemoryGuideStore) {
    add_san_cristobal(&mut store);
    execute_line(
        &mut store,
        &["edit-guide", "1", "--description", "Chiapas"],
    )
    .expect("edit description");
    let output = execute_line(&mut store, &["edit-guide", "1", "--name", "San Cris"])
        .expect("edit name");
    assert_eq!(output["name"], json!("San Cris"));
    assert_eq!(output["description"], json!("Chiapas"));
    assert_eq!(output["coordinate"]["latitude"], json!(16.7371));

    let cleared =
        execute_line(&mut store, &["edit-guide", "1", "--clear-description"]).expect("clear");
    assert_eq!(cleared["description"], json!(null));
}

#[rstest]
fn invalid_edit_leaves_the_guide_untouched(mut store: MemoryGuideStore) {
    add_san_cristobal(&mut store);
    let err = execute_line(
        &mut store,
        &["edit-guide", "1", "--name", "Renamed", "--latitude", "100", "--longitude", "0"],
    )
    .expect_err("latitude out of range");
    assert!(matches!(err, CliError::Invalid(_)));
    let stored = store
        .get_guide(GuideId::new(1))
        .expect("get")
        .expect("present");
    assert_eq!(stored.name(), "San Cristobal");
}

#[rstest]
#[case::show_guide(&["show-guide", "9"], "guide", 9)]
#[case::edit_guide(&["edit-guide", "9", "--name", "x"], "guide", 9)]
#[case::list_pois(&["list-pois", "9"], "guide", 9)]
#[case::add_poi(&["add-poi", "9", "Orphan"], "guide", 9)]
#[case::show_poi(&["show-poi", "1", "5"], "point of interest", 5)]
#[case::edit_poi(&["edit-poi", "1", "5", "--name", "x"], "point of interest", 5)]
fn missing_entities_are_reported(
    mut store: MemoryGuideStore,
    #[case] args: &[&str],
    #[case] expected_entity: &str,
    #[case] expected_id: i64,
) {
    add_san_cristobal(&mut store);
    let err = execute_line(&mut store, args).expect_err("missing entity");
    match err {
        CliError::NotFound { entity, id } => {
            assert_eq!(entity, expected_entity);
            assert_eq!(id, expected_id);
        }
        other => panic!("expected NotFound, found {other:?}"),
    }
}

#[rstest]
fn remove_reports_whether_anything_was_deleted(mut store: MemoryGuideStore) {
    add_san_cristobal(&mut store);
    execute_line(&mut store, &["add-poi", "1", "Cafeología"]).expect("add poi");

    let poi = execute_line(&mut store, &["remove-poi", "1", "1"]).expect("remove poi");
    assert_eq!(poi, json!({ "removed": true }));
    let guide = execute_line(&mut store, &["remove-guide", "1"]).expect("remove guide");
    assert_eq!(guide, json!({ "removed": true }));
    let again = execute_line(&mut store, &["remove-guide", "1"]).expect("remove again");
    assert_eq!(again, json!({ "removed": false }));

    let count = execute_line(&mut store, &["count-guides"]).expect("count");
    assert_eq!(count, json!({ "count": 0 }));
}

#[rstest]
fn edit_poi_keeps_its_guide(mut store: MemoryGuideStore) {
    add_san_cristobal(&mut store);
    execute_line(&mut store, &["add-poi", "1", "Cafeología"]).expect("add poi");
    let output = execute_line(
        &mut store,
        &["edit-poi", "1", "1", "--latitude", "16.74", "--longitude", "-92.64"],
    )
    .expect("edit poi");
    assert_eq!(output["guide_id"], json!(1));
    assert_eq!(output["coordinate"], json!({ "latitude": 16.74, "longitude": -92.64 }));
}
