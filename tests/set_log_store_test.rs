// ABOUTME: Integration tests for the append-only workout set log
// ABOUTME: Covers set numbering, ordering, lookups and rejection of mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{create_test_database, new_set};
use evergain_server::services::SetLogStore;

async fn setup() -> SetLogStore {
    let database = create_test_database().await.unwrap();
    SetLogStore::new(Arc::new(database))
}

#[tokio::test]
async fn test_set_numbers_count_per_exercise() {
    let store = setup().await;

    let first = store.append(&new_set("s1", "Bench Press", 60.0, 10)).await.unwrap();
    let squat = store.append(&new_set("s1", "Squat", 100.0, 5)).await.unwrap();
    let second = store.append(&new_set("s1", "Bench Press", 65.0, 8)).await.unwrap();

    assert_eq!(first.set_number, 1);
    assert_eq!(squat.set_number, 1);
    assert_eq!(second.set_number, 2);
}

#[tokio::test]
async fn test_set_numbers_are_scoped_to_session() {
    let store = setup().await;

    store.append(&new_set("s1", "Row", 50.0, 12)).await.unwrap();
    store.append(&new_set("s1", "Row", 50.0, 12)).await.unwrap();
    let other = store.append(&new_set("s2", "Row", 50.0, 12)).await.unwrap();

    assert_eq!(other.set_number, 1);
}

#[tokio::test]
async fn test_list_for_session_is_oldest_first() {
    let store = setup().await;

    store.append(&new_set("s1", "Bench Press", 60.0, 10)).await.unwrap();
    store.append(&new_set("s1", "Squat", 100.0, 5)).await.unwrap();
    store.append(&new_set("s1", "Bench Press", 65.0, 8)).await.unwrap();
    store.append(&new_set("other", "Deadlift", 140.0, 3)).await.unwrap();

    let sets = store.list_for_session("s1").await.unwrap();
    let names: Vec<_> = sets
        .iter()
        .map(|s| (s.exercise_name.as_str(), s.set_number))
        .collect();
    assert_eq!(
        names,
        [("Bench Press", 1), ("Squat", 1), ("Bench Press", 2)]
    );
    assert!(sets.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[tokio::test]
async fn test_unknown_session_lists_nothing() {
    let store = setup().await;
    assert!(store.list_for_session("missing").await.unwrap().is_empty());
    assert!(store.last_for("missing", "Squat").await.unwrap().is_none());
    assert_eq!(store.count_for("missing", "Squat").await.unwrap(), 0);
}

#[tokio::test]
async fn test_last_and_count_for_exercise() {
    let store = setup().await;

    store.append(&new_set("s1", "Squat", 100.0, 5)).await.unwrap();
    store.append(&new_set("s1", "Squat", 105.0, 5)).await.unwrap();
    store.append(&new_set("s1", "Lunge", 20.0, 10)).await.unwrap();

    let last = store.last_for("s1", "Squat").await.unwrap().unwrap();
    assert_eq!(last.set_number, 2);
    assert!((last.weight - 105.0).abs() < f64::EPSILON);
    assert_eq!(store.count_for("s1", "Squat").await.unwrap(), 2);
    assert_eq!(store.count_for("s1", "Lunge").await.unwrap(), 1);
}

#[tokio::test]
async fn test_optional_fields_survive_storage() {
    let store = setup().await;
    let input = evergain_server::models::NewWorkoutSet::new(
        "s1",
        "Bench Press",
        62.5,
        8,
        Some(9),
        Some("paused reps".to_owned()),
    )
    .unwrap();

    let stored = store.append(&input).await.unwrap();
    let listed = store.list_for_session("s1").await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], stored);
    assert_eq!(listed[0].rpe, Some(9));
    assert_eq!(listed[0].notes.as_deref(), Some("paused reps"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_get_distinct_numbers() {
    let store = setup().await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .append(&new_set("s1", "Bench Press", 60.0, 10))
                    .await
                    .unwrap()
                    .set_number
            })
        })
        .collect();

    let mut numbers = HashSet::new();
    for handle in handles {
        numbers.insert(handle.await.unwrap());
    }

    assert_eq!(numbers, (1..=8).collect::<HashSet<u32>>());
}

#[tokio::test]
async fn test_stored_sets_cannot_be_changed() {
    let database = create_test_database().await.unwrap();
    let store = SetLogStore::new(Arc::new(database.clone()));
    store.append(&new_set("s1", "Squat", 100.0, 5)).await.unwrap();

    let connection = database.connection().await.unwrap();
    let update = sqlx::query("UPDATE workout_sets SET weight = 1 WHERE session_id = 's1'")
        .execute(connection.pool())
        .await;
    let delete = sqlx::query("DELETE FROM workout_sets WHERE session_id = 's1'")
        .execute(connection.pool())
        .await;

    assert!(update.is_err());
    assert!(delete.is_err());
    assert_eq!(store.count_for("s1", "Squat").await.unwrap(), 1);
}
