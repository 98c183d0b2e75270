// ABOUTME: Store traits and SQLite schema bootstrap for catalog, alias, unmapped and equipment data
// ABOUTME: The matcher core depends only on these traits, never on a concrete backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Persistence Layer
//!
//! Trait-fronted stores for the matching engine. The SQLite implementations
//! (`CatalogManager`, `AliasManager`, `UnmappedManager`, `EquipmentManager`)
//! provide per-statement atomicity; the engine never takes locks and treats
//! concurrent duplicate writes as idempotent no-ops.

pub mod alias;
pub mod catalog;
pub mod equipment;
pub mod unmapped;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::errors::{AppError, AppResult};
use crate::models::{AliasRecord, ExerciseCatalogEntry, ExerciseMetadata, UnmappedEntry};

/// Read/write access to the canonical exercise catalog
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Find an entry by internal ID or external catalog code
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ExerciseCatalogEntry>>;

    /// Find an entry whose canonical or localized name equals `name` verbatim
    async fn find_by_exact_name(&self, name: &str) -> AppResult<Option<ExerciseCatalogEntry>>;

    /// All entries that carry a canonical English name, in insertion order
    async fn find_all_with_canonical_name(&self) -> AppResult<Vec<ExerciseCatalogEntry>>;

    /// Every entry in the catalog, in insertion order
    async fn list_all(&self) -> AppResult<Vec<ExerciseCatalogEntry>>;

    /// Insert a new entry. A concurrent duplicate insert on the same
    /// localized name is converted to a no-op by the uniqueness constraint.
    async fn insert(&self, entry: &ExerciseCatalogEntry) -> AppResult<()>;

    /// Update an existing entry in place
    async fn update(&self, entry: &ExerciseCatalogEntry) -> AppResult<()>;
}

/// Growable table of learned aliases
#[async_trait]
pub trait AliasStore: Send + Sync {
    /// Look up the oldest alias for a normalized key
    async fn find_by_normalized_key(&self, key: &str) -> AppResult<Option<AliasRecord>>;

    /// Insert an alias; no-op when the `(raw_name, target_exercise_id)` pair
    /// already exists
    async fn insert_if_absent(&self, record: &AliasRecord) -> AppResult<()>;
}

/// Review queue for names no stage could resolve
#[async_trait]
pub trait UnmappedStore: Send + Sync {
    /// Find a queue entry by its exact raw name
    async fn find_by_raw_name(&self, ai_name: &str) -> AppResult<Option<UnmappedEntry>>;

    /// Insert a new entry at count 1, or increment the existing counter,
    /// refresh `last_seen_at` and backfill previously-null metadata fields
    async fn upsert_with_increment(
        &self,
        ai_name: &str,
        suggested_match: Option<&str>,
        metadata: Option<&ExerciseMetadata>,
    ) -> AppResult<()>;

    /// Remove a resolved entry
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;

    /// All entries, most frequent first
    async fn list_all_sorted_by_count(&self) -> AppResult<Vec<UnmappedEntry>>;
}

/// Equipment availability per user, with gym-specific and aggregate scopes
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// Equipment tags available to a user. With a gym scope the result is
    /// that gym's inventory; without one, or when the gym has no rows, the
    /// aggregate across all of the user's gyms.
    async fn list_available_for_user(
        &self,
        user_id: &str,
        gym_id: Option<&str>,
    ) -> AppResult<Vec<String>>;
}

/// Create all tables and indexes used by this crate.
///
/// Idempotent; safe to call at every startup.
///
/// # Errors
///
/// Returns an error if a DDL statement fails.
pub async fn ensure_schema(pool: &SqlitePool) -> AppResult<()> {
    let statements = [
        r"
        CREATE TABLE IF NOT EXISTS exercise_catalog (
            id TEXT PRIMARY KEY,
            external_id TEXT,
            localized_name TEXT NOT NULL UNIQUE,
            canonical_name TEXT,
            category TEXT NOT NULL DEFAULT 'uncategorized',
            difficulty TEXT NOT NULL DEFAULT 'beginner',
            primary_muscles TEXT NOT NULL,
            secondary_muscles TEXT,
            required_equipment TEXT,
            description TEXT,
            instructions TEXT,
            video_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ",
        r"
        CREATE INDEX IF NOT EXISTS idx_exercise_catalog_external_id
            ON exercise_catalog(external_id)
        ",
        r"
        CREATE TABLE IF NOT EXISTS exercise_aliases (
            id TEXT PRIMARY KEY,
            raw_name TEXT NOT NULL,
            normalized_key TEXT NOT NULL,
            target_exercise_id TEXT NOT NULL,
            language TEXT NOT NULL DEFAULT 'en',
            source TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(raw_name, target_exercise_id)
        )
        ",
        r"
        CREATE INDEX IF NOT EXISTS idx_exercise_aliases_normalized_key
            ON exercise_aliases(normalized_key)
        ",
        r"
        CREATE TABLE IF NOT EXISTS unmapped_exercises (
            id TEXT PRIMARY KEY,
            ai_name TEXT NOT NULL UNIQUE,
            suggested_match TEXT,
            occurrence_count INTEGER NOT NULL DEFAULT 1,
            category TEXT,
            equipment TEXT,
            muscles TEXT,
            difficulty TEXT,
            first_seen_at TEXT NOT NULL,
            last_seen_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE IF NOT EXISTS user_equipment (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            gym_id TEXT,
            equipment_tag TEXT NOT NULL
        )
        ",
        r"
        CREATE INDEX IF NOT EXISTS idx_user_equipment_user
            ON user_equipment(user_id)
        ",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create schema: {e}")))?;
    }

    Ok(())
}
