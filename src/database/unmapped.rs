// ABOUTME: SQLite implementation of the unmapped review queue
// ABOUTME: Upsert with occurrence counting, last-seen refresh and null-only metadata backfill
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::catalog::parse_timestamp;
use super::UnmappedStore;
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseMetadata, UnmappedEntry};

/// SQLite-backed unmapped review queue
pub struct UnmappedManager {
    pool: SqlitePool,
}

impl UnmappedManager {
    /// Create a new unmapped-queue manager over the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnmappedStore for UnmappedManager {
    async fn find_by_raw_name(&self, ai_name: &str) -> AppResult<Option<UnmappedEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, ai_name, suggested_match, occurrence_count,
                   category, equipment, muscles, difficulty, first_seen_at, last_seen_at
            FROM unmapped_exercises
            WHERE ai_name = $1
            ",
        )
        .bind(ai_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up unmapped entry: {e}")))?;

        row.map(|r| row_to_unmapped(&r)).transpose()
    }

    async fn upsert_with_increment(
        &self,
        ai_name: &str,
        suggested_match: Option<&str>,
        metadata: Option<&ExerciseMetadata>,
    ) -> AppResult<()> {
        let now = Utc::now().to_rfc3339();
        let category = metadata.and_then(|m| m.category.clone());
        let equipment = metadata
            .and_then(|m| m.equipment.as_ref())
            .map(|tags| tags.join(", "));
        let muscles = metadata
            .and_then(|m| m.primary_muscles.as_ref())
            .map(|tags| tags.join(", "));
        let difficulty = metadata
            .and_then(|m| m.difficulty)
            .map(|d| d.as_str().to_string());

        // The uniqueness constraint on ai_name converts a concurrent
        // first-sighting race into an update; COALESCE keeps any field that
        // was already populated.
        sqlx::query(
            r"
            INSERT INTO unmapped_exercises (
                id, ai_name, suggested_match, occurrence_count,
                category, equipment, muscles, difficulty, first_seen_at, last_seen_at
            )
            VALUES ($1, $2, $3, 1, $4, $5, $6, $7, $8, $8)
            ON CONFLICT(ai_name) DO UPDATE SET
                occurrence_count = occurrence_count + 1,
                last_seen_at = excluded.last_seen_at,
                suggested_match = COALESCE(suggested_match, excluded.suggested_match),
                category = COALESCE(category, excluded.category),
                equipment = COALESCE(equipment, excluded.equipment),
                muscles = COALESCE(muscles, excluded.muscles),
                difficulty = COALESCE(difficulty, excluded.difficulty)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(ai_name)
        .bind(suggested_match)
        .bind(category)
        .bind(equipment)
        .bind(muscles)
        .bind(difficulty)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert unmapped entry: {e}")))?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM unmapped_exercises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete unmapped entry: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Unmapped entry {id}")));
        }
        Ok(())
    }

    async fn list_all_sorted_by_count(&self) -> AppResult<Vec<UnmappedEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, ai_name, suggested_match, occurrence_count,
                   category, equipment, muscles, difficulty, first_seen_at, last_seen_at
            FROM unmapped_exercises
            ORDER BY occurrence_count DESC, last_seen_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list unmapped entries: {e}")))?;

        rows.iter().map(row_to_unmapped).collect()
    }
}

fn row_to_unmapped(row: &SqliteRow) -> AppResult<UnmappedEntry> {
    let first_seen_str: String = row.get("first_seen_at");
    let last_seen_str: String = row.get("last_seen_at");

    Ok(UnmappedEntry {
        id: row.get("id"),
        ai_name: row.get("ai_name"),
        suggested_match: row.get("suggested_match"),
        occurrence_count: row.get("occurrence_count"),
        category: row.get("category"),
        equipment: row.get("equipment"),
        muscles: row.get("muscles"),
        difficulty: row.get("difficulty"),
        first_seen_at: parse_timestamp(&first_seen_str)?,
        last_seen_at: parse_timestamp(&last_seen_str)?,
    })
}
