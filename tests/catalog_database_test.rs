// ABOUTME: Unit tests for the catalog and alias SQLite managers
// ABOUTME: Covers CRUD, verbatim and canonical-only listings, and duplicate-insert no-ops
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog and Alias Store Tests
//!
//! Tests the `CatalogManager` and `AliasManager` database operations:
//! - insert, lookup by ID/external ID, verbatim name lookup, update
//! - insertion-order listings and canonical-name filtering
//! - alias uniqueness on `(raw_name, target_exercise_id)`

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use exercise_matcher::database::alias::AliasManager;
use exercise_matcher::database::catalog::CatalogManager;
use exercise_matcher::database::{ensure_schema, AliasStore, CatalogStore};
use exercise_matcher::models::{AliasRecord, AliasSource, Difficulty, ExerciseCatalogEntry};
use exercise_matcher::normalize::normalize;

async fn create_test_db() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}

fn entry(localized: &str, canonical: Option<&str>) -> ExerciseCatalogEntry {
    let now = Utc::now();
    ExerciseCatalogEntry {
        id: Uuid::new_v4().to_string(),
        external_id: None,
        localized_name: localized.to_string(),
        canonical_name: canonical.map(ToString::to_string),
        category: "compound".to_string(),
        difficulty: Difficulty::Beginner,
        primary_muscles: vec!["chest".to_string()],
        secondary_muscles: vec!["triceps".to_string()],
        required_equipment: vec!["barbell".to_string()],
        description: Some("description".to_string()),
        instructions: vec!["step one".to_string()],
        video_url: None,
        created_at: now,
        updated_at: now,
    }
}

fn alias(raw: &str, target: &str, source: AliasSource) -> AliasRecord {
    AliasRecord {
        id: Uuid::new_v4().to_string(),
        raw_name: raw.to_string(),
        normalized_key: normalize(raw),
        target_exercise_id: target.to_string(),
        language: "en".to_string(),
        source,
        created_at: Utc::now(),
    }
}

// ============================================================================
// CatalogManager
// ============================================================================

#[tokio::test]
async fn test_insert_and_find_by_id() {
    let pool = create_test_db().await;
    let catalog = CatalogManager::new(pool);

    let mut bench = entry("Bänkpress", Some("Barbell Bench Press"));
    bench.external_id = Some("EX-0001".to_string());
    catalog.insert(&bench).await.unwrap();

    let by_id = catalog.find_by_id(&bench.id).await.unwrap().unwrap();
    assert_eq!(by_id.localized_name, "Bänkpress");
    assert_eq!(by_id.primary_muscles, vec!["chest".to_string()]);
    assert_eq!(by_id.difficulty, Difficulty::Beginner);

    let by_external = catalog.find_by_id("EX-0001").await.unwrap().unwrap();
    assert_eq!(by_external.id, bench.id);

    assert!(catalog.find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_exact_name_is_verbatim() {
    let pool = create_test_db().await;
    let catalog = CatalogManager::new(pool);
    catalog
        .insert(&entry("Bänkpress", Some("Barbell Bench Press")))
        .await
        .unwrap();

    assert!(catalog
        .find_by_exact_name("Barbell Bench Press")
        .await
        .unwrap()
        .is_some());
    assert!(catalog
        .find_by_exact_name("Bänkpress")
        .await
        .unwrap()
        .is_some());
    // verbatim only; normalization is the engine's concern
    assert!(catalog
        .find_by_exact_name("barbell bench press")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_canonical_name_listing_excludes_legacy_rows() {
    let pool = create_test_db().await;
    let catalog = CatalogManager::new(pool);
    catalog
        .insert(&entry("Bänkpress", Some("Barbell Bench Press")))
        .await
        .unwrap();
    catalog.insert(&entry("Gammal övning", None)).await.unwrap();

    let with_canonical = catalog.find_all_with_canonical_name().await.unwrap();
    assert_eq!(with_canonical.len(), 1);
    assert_eq!(with_canonical[0].localized_name, "Bänkpress");

    let all = catalog.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_duplicate_localized_name_insert_is_noop() {
    let pool = create_test_db().await;
    let catalog = CatalogManager::new(pool);

    let first = entry("Bänkpress", Some("Barbell Bench Press"));
    let second = entry("Bänkpress", Some("Some Other Press"));
    catalog.insert(&first).await.unwrap();
    catalog.insert(&second).await.unwrap();

    assert_eq!(catalog.count().await.unwrap(), 1);
    let survivor = catalog.find_by_id(&first.id).await.unwrap().unwrap();
    assert_eq!(
        survivor.canonical_name.as_deref(),
        Some("Barbell Bench Press")
    );
}

#[tokio::test]
async fn test_update_entry() {
    let pool = create_test_db().await;
    let catalog = CatalogManager::new(pool);

    let mut bench = entry("Bänkpress", Some("Barbell Bench Press"));
    catalog.insert(&bench).await.unwrap();

    bench.difficulty = Difficulty::Advanced;
    bench.required_equipment = vec!["barbell".to_string(), "bench".to_string()];
    catalog.update(&bench).await.unwrap();

    let updated = catalog.find_by_id(&bench.id).await.unwrap().unwrap();
    assert_eq!(updated.difficulty, Difficulty::Advanced);
    assert_eq!(updated.required_equipment.len(), 2);

    let missing = entry("Saknas", None);
    assert!(catalog.update(&missing).await.is_err());
}

// ============================================================================
// AliasManager
// ============================================================================

#[tokio::test]
async fn test_alias_lookup_by_normalized_key() {
    let pool = create_test_db().await;
    let aliases = AliasManager::new(pool);

    aliases
        .insert_if_absent(&alias("Bench Presss", "c1", AliasSource::Fuzzy))
        .await
        .unwrap();

    let found = aliases
        .find_by_normalized_key(&normalize("Bench Presss"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.target_exercise_id, "c1");
    assert_eq!(found.source, AliasSource::Fuzzy);

    assert!(aliases
        .find_by_normalized_key("something else")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_alias_insert_is_noop() {
    let pool = create_test_db().await;
    let aliases = AliasManager::new(pool.clone());

    let record = alias("bicep curl", "c1", AliasSource::StaticTable);
    aliases.insert_if_absent(&record).await.unwrap();
    // second write with a fresh ID but the same (raw_name, target) pair
    aliases
        .insert_if_absent(&alias("bicep curl", "c1", AliasSource::Admin))
        .await
        .unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercise_aliases")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);

    // the original record survived
    let found = aliases
        .find_by_normalized_key(&normalize("bicep curl"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, record.id);
    assert_eq!(found.source, AliasSource::StaticTable);
}

#[tokio::test]
async fn test_same_raw_name_may_alias_two_entries() {
    let pool = create_test_db().await;
    let aliases = AliasManager::new(pool.clone());

    aliases
        .insert_if_absent(&alias("press", "c1", AliasSource::Fuzzy))
        .await
        .unwrap();
    aliases
        .insert_if_absent(&alias("press", "c2", AliasSource::Admin))
        .await
        .unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercise_aliases")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 2);
}

#[tokio::test]
async fn test_list_aliases_for_exercise() {
    let pool = create_test_db().await;
    let aliases = AliasManager::new(pool);

    aliases
        .insert_if_absent(&alias("bench presss", "c1", AliasSource::Fuzzy))
        .await
        .unwrap();
    aliases
        .insert_if_absent(&alias("bänkpress!", "c1", AliasSource::ExactVariant))
        .await
        .unwrap();
    aliases
        .insert_if_absent(&alias("squat", "c2", AliasSource::StaticTable))
        .await
        .unwrap();

    let for_c1 = aliases.list_for_exercise("c1").await.unwrap();
    assert_eq!(for_c1.len(), 2);
}
