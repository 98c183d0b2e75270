// ABOUTME: SQLite implementation of the persistent alias store
// ABOUTME: Duplicate (raw_name, target_exercise_id) inserts are converted to no-ops
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::catalog::parse_timestamp;
use super::AliasStore;
use crate::errors::{AppError, AppResult};
use crate::models::{AliasRecord, AliasSource};

/// SQLite-backed alias store
pub struct AliasManager {
    pool: SqlitePool,
}

impl AliasManager {
    /// Create a new alias manager over the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All aliases pointing at a catalog entry, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_exercise(&self, exercise_id: &str) -> AppResult<Vec<AliasRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, raw_name, normalized_key, target_exercise_id, language, source, created_at
            FROM exercise_aliases
            WHERE target_exercise_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list aliases: {e}")))?;

        rows.iter().map(row_to_alias).collect()
    }
}

#[async_trait]
impl AliasStore for AliasManager {
    async fn find_by_normalized_key(&self, key: &str) -> AppResult<Option<AliasRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, raw_name, normalized_key, target_exercise_id, language, source, created_at
            FROM exercise_aliases
            WHERE normalized_key = $1
            ORDER BY created_at ASC
            LIMIT 1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up alias: {e}")))?;

        row.map(|r| row_to_alias(&r)).transpose()
    }

    async fn insert_if_absent(&self, record: &AliasRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO exercise_aliases (
                id, raw_name, normalized_key, target_exercise_id, language, source, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(raw_name, target_exercise_id) DO NOTHING
            ",
        )
        .bind(&record.id)
        .bind(&record.raw_name)
        .bind(&record.normalized_key)
        .bind(&record.target_exercise_id)
        .bind(&record.language)
        .bind(record.source.as_str())
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert alias: {e}")))?;

        Ok(())
    }
}

fn row_to_alias(row: &SqliteRow) -> AppResult<AliasRecord> {
    let source_str: String = row.get("source");
    let created_at_str: String = row.get("created_at");

    Ok(AliasRecord {
        id: row.get("id"),
        raw_name: row.get("raw_name"),
        normalized_key: row.get("normalized_key"),
        target_exercise_id: row.get("target_exercise_id"),
        language: row.get("language"),
        source: AliasSource::parse(&source_str),
        created_at: parse_timestamp(&created_at_str)?,
    })
}
