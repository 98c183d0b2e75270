// ABOUTME: SQLite implementation of the per-user equipment availability store
// ABOUTME: Gym-scoped inventory with aggregate fallback across all of a user's gyms
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::EquipmentStore;
use crate::errors::{AppError, AppResult};

/// SQLite-backed equipment availability store
pub struct EquipmentManager {
    pool: SqlitePool,
}

impl EquipmentManager {
    /// Create a new equipment manager over the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register an equipment tag for a user, optionally scoped to a gym
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn add_equipment(
        &self,
        user_id: &str,
        gym_id: Option<&str>,
        equipment_tag: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_equipment (id, user_id, gym_id, equipment_tag)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(gym_id)
        .bind(equipment_tag)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add equipment: {e}")))?;

        Ok(())
    }

    async fn list_aggregate(&self, user_id: &str) -> AppResult<Vec<String>> {
        let rows = sqlx::query(
            r"
            SELECT DISTINCT equipment_tag FROM user_equipment
            WHERE user_id = $1
            ORDER BY equipment_tag ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list equipment: {e}")))?;

        Ok(rows.iter().map(|r| r.get("equipment_tag")).collect())
    }
}

#[async_trait]
impl EquipmentStore for EquipmentManager {
    async fn list_available_for_user(
        &self,
        user_id: &str,
        gym_id: Option<&str>,
    ) -> AppResult<Vec<String>> {
        if let Some(gym) = gym_id {
            let rows = sqlx::query(
                r"
                SELECT DISTINCT equipment_tag FROM user_equipment
                WHERE user_id = $1 AND gym_id = $2
                ORDER BY equipment_tag ASC
                ",
            )
            .bind(user_id)
            .bind(gym)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list gym equipment: {e}")))?;

            let tags: Vec<String> = rows.iter().map(|r| r.get("equipment_tag")).collect();
            // Gym with no registered inventory falls back to the aggregate
            if !tags.is_empty() {
                return Ok(tags);
            }
        }

        self.list_aggregate(user_id).await
    }
}
