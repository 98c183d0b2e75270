// ABOUTME: SQLite implementation of the exercise catalog store
// ABOUTME: JSON text columns for tag lists, RFC 3339 text timestamps, insertion-order listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::CatalogStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, ExerciseCatalogEntry};

const ENTRY_COLUMNS: &str = r"
    id, external_id, localized_name, canonical_name, category, difficulty,
    primary_muscles, secondary_muscles, required_equipment,
    description, instructions, video_url, created_at, updated_at
";

/// SQLite-backed catalog store
pub struct CatalogManager {
    pool: SqlitePool,
}

impl CatalogManager {
    /// Create a new catalog manager over the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of entries in the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM exercise_catalog")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count catalog entries: {e}")))?;
        Ok(row.get("n"))
    }
}

#[async_trait]
impl CatalogStore for CatalogManager {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ExerciseCatalogEntry>> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM exercise_catalog WHERE id = $1 OR external_id = $1"
        );
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get catalog entry: {e}")))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    async fn find_by_exact_name(&self, name: &str) -> AppResult<Option<ExerciseCatalogEntry>> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM exercise_catalog
             WHERE canonical_name = $1 OR localized_name = $1"
        );
        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find catalog entry by name: {e}")))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    async fn find_all_with_canonical_name(&self) -> AppResult<Vec<ExerciseCatalogEntry>> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM exercise_catalog
             WHERE canonical_name IS NOT NULL
             ORDER BY created_at ASC, id ASC"
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list catalog entries: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn list_all(&self) -> AppResult<Vec<ExerciseCatalogEntry>> {
        let query =
            format!("SELECT {ENTRY_COLUMNS} FROM exercise_catalog ORDER BY created_at ASC, id ASC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list catalog entries: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn insert(&self, entry: &ExerciseCatalogEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO exercise_catalog (
                id, external_id, localized_name, canonical_name, category, difficulty,
                primary_muscles, secondary_muscles, required_equipment,
                description, instructions, video_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT(localized_name) DO NOTHING
            ",
        )
        .bind(&entry.id)
        .bind(&entry.external_id)
        .bind(&entry.localized_name)
        .bind(&entry.canonical_name)
        .bind(&entry.category)
        .bind(entry.difficulty.as_str())
        .bind(serde_json::to_string(&entry.primary_muscles)?)
        .bind(serde_json::to_string(&entry.secondary_muscles)?)
        .bind(serde_json::to_string(&entry.required_equipment)?)
        .bind(&entry.description)
        .bind(serde_json::to_string(&entry.instructions)?)
        .bind(&entry.video_url)
        .bind(entry.created_at.to_rfc3339())
        .bind(entry.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert catalog entry: {e}")))?;

        Ok(())
    }

    async fn update(&self, entry: &ExerciseCatalogEntry) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE exercise_catalog SET
                external_id = $2,
                localized_name = $3,
                canonical_name = $4,
                category = $5,
                difficulty = $6,
                primary_muscles = $7,
                secondary_muscles = $8,
                required_equipment = $9,
                description = $10,
                instructions = $11,
                video_url = $12,
                updated_at = $13
            WHERE id = $1
            ",
        )
        .bind(&entry.id)
        .bind(&entry.external_id)
        .bind(&entry.localized_name)
        .bind(&entry.canonical_name)
        .bind(&entry.category)
        .bind(entry.difficulty.as_str())
        .bind(serde_json::to_string(&entry.primary_muscles)?)
        .bind(serde_json::to_string(&entry.secondary_muscles)?)
        .bind(serde_json::to_string(&entry.required_equipment)?)
        .bind(&entry.description)
        .bind(serde_json::to_string(&entry.instructions)?)
        .bind(&entry.video_url)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update catalog entry: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Catalog entry {}", entry.id)));
        }
        Ok(())
    }
}

fn row_to_entry(row: &SqliteRow) -> AppResult<ExerciseCatalogEntry> {
    let difficulty_str: String = row.get("difficulty");
    let primary_muscles_json: String = row.get("primary_muscles");
    let secondary_muscles_json: Option<String> = row.get("secondary_muscles");
    let required_equipment_json: Option<String> = row.get("required_equipment");
    let instructions_json: Option<String> = row.get("instructions");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let primary_muscles: Vec<String> = serde_json::from_str(&primary_muscles_json)?;
    let secondary_muscles: Vec<String> = secondary_muscles_json
        .map(|s| serde_json::from_str(&s))
        .transpose()?
        .unwrap_or_default();
    let required_equipment: Vec<String> = required_equipment_json
        .map(|s| serde_json::from_str(&s))
        .transpose()?
        .unwrap_or_default();
    let instructions: Vec<String> = instructions_json
        .map(|s| serde_json::from_str(&s))
        .transpose()?
        .unwrap_or_default();

    Ok(ExerciseCatalogEntry {
        id: row.get("id"),
        external_id: row.get("external_id"),
        localized_name: row.get("localized_name"),
        canonical_name: row.get("canonical_name"),
        category: row.get("category"),
        difficulty: Difficulty::parse(&difficulty_str),
        primary_muscles,
        secondary_muscles,
        required_equipment,
        description: row.get("description"),
        instructions,
        video_url: row.get("video_url"),
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
        .map(|dt| dt.with_timezone(&Utc))
}
