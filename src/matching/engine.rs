// ABOUTME: The cascading exercise matcher: exact, persistent alias, static alias, fuzzy, expansion
// ABOUTME: Writes learned aliases on non-exact success and queues unresolved names for review
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Matching Engine
//!
//! One match request walks the stages in order, short-circuiting on success:
//!
//! 1. exact catalog lookup (ID passthrough, then normalized-name equality)
//! 2. persistent alias store
//! 3. static alias table
//! 4. Levenshtein fuzzy search over canonical names
//! 5. auto-expansion gate
//! 6. unmapped review queue (terminal)
//!
//! Success via an alias or fuzzy path writes back to the persistent alias
//! store so repeated AI phrasing becomes an `O(1)` lookup over time. Alias
//! and queue writes are best-effort: failures are logged, never propagated,
//! and never alter the result already computed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::aliases::StaticAliasTable;
use crate::config::MatcherConfig;
use crate::database::{AliasStore, CatalogStore, UnmappedStore};
use crate::errors::{AppError, AppResult};
use crate::matching::{expansion, fuzzy};
use crate::models::{
    AliasRecord, AliasSource, ExerciseCatalogEntry, ExerciseMetadata, MatchResult,
};
use crate::normalize::normalize;

/// Cascading exercise-name resolver.
///
/// Holds its stores behind trait objects; the stores provide their own
/// per-statement atomicity, so concurrent match requests need no locks here.
pub struct ExerciseMatcher {
    catalog: Arc<dyn CatalogStore>,
    aliases: Arc<dyn AliasStore>,
    unmapped: Arc<dyn UnmappedStore>,
    static_aliases: StaticAliasTable,
    config: MatcherConfig,
}

impl ExerciseMatcher {
    /// Create a matcher over the given stores and static alias table
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        aliases: Arc<dyn AliasStore>,
        unmapped: Arc<dyn UnmappedStore>,
        static_aliases: StaticAliasTable,
        config: MatcherConfig,
    ) -> Self {
        Self {
            catalog,
            aliases,
            unmapped,
            static_aliases,
            config,
        }
    }

    /// Resolve a raw exercise name against the catalog.
    ///
    /// `matched: false` means "proceed without this exercise"; the name has
    /// been queued for human review. It is never a fatal condition.
    ///
    /// # Errors
    ///
    /// Returns an error only when a store *read* fails; best-effort writes
    /// are logged and swallowed.
    pub async fn match_exercise(
        &self,
        raw_name: &str,
        metadata: Option<&ExerciseMetadata>,
    ) -> AppResult<MatchResult> {
        let key = normalize(raw_name);
        debug!(raw_name, key, "matching exercise name");

        // Stage 1: exact catalog lookup
        if let Some((entry, verbatim)) = self.find_exact(raw_name, &key).await? {
            if !verbatim {
                // Capture formatting drift so it resolves without a scan next time
                self.save_alias(raw_name, &key, &entry.id, AliasSource::ExactVariant)
                    .await;
            }
            return Ok(MatchResult::exact(&entry));
        }

        // Stage 2: persistent alias store
        if !key.is_empty() {
            if let Some(alias) = self.aliases.find_by_normalized_key(&key).await? {
                if let Some(entry) = self.catalog.find_by_id(&alias.target_exercise_id).await? {
                    return Ok(MatchResult::alias(&entry));
                }
                warn!(
                    alias_id = %alias.id,
                    target = %alias.target_exercise_id,
                    "alias points at a missing catalog entry, continuing cascade"
                );
            }
        }

        // Stage 3: static alias table
        if let Some(canonical) = self.static_aliases.lookup(raw_name) {
            if let Some(entry) = self.find_by_canonical_name(canonical).await? {
                self.save_alias(raw_name, &key, &entry.id, AliasSource::StaticTable)
                    .await;
                return Ok(MatchResult::alias(&entry));
            }
        }

        // Stage 4: fuzzy search over canonical names
        let candidates = self.catalog.find_all_with_canonical_name().await?;
        if let Some((entry, distance)) =
            fuzzy::find_closest(raw_name, &candidates, self.config.max_fuzzy_distance)
        {
            debug!(raw_name, entry_id = %entry.id, distance, "fuzzy match accepted");
            let result = MatchResult::fuzzy(entry, distance);
            self.save_alias(raw_name, &key, &entry.id, AliasSource::Fuzzy)
                .await;
            return Ok(result);
        }

        // Stage 5: auto-expansion gate
        if let Some(reason) = expansion::rejection_reason(raw_name) {
            info!(raw_name, reason, "exercise name rejected, queuing for review");
            self.record_unmapped(raw_name, Some(reason), metadata).await;
            return Ok(MatchResult::unmatched());
        }
        if !self.config.auto_expansion {
            self.record_unmapped(raw_name, None, metadata).await;
            return Ok(MatchResult::unmatched());
        }
        self.try_create(raw_name).await
    }

    /// Exact catalog lookup: ID passthrough first, then normalized-name
    /// equality over canonical and localized names. The second element is
    /// whether the raw string was byte-identical to the stored value.
    async fn find_exact(
        &self,
        raw_name: &str,
        key: &str,
    ) -> AppResult<Option<(ExerciseCatalogEntry, bool)>> {
        let trimmed = raw_name.trim();
        if !trimmed.is_empty() {
            // Machine-generated IDs sometimes arrive passed through as "names"
            if let Some(entry) = self.catalog.find_by_id(trimmed).await? {
                return Ok(Some((entry, true)));
            }
        }
        if key.is_empty() {
            return Ok(None);
        }

        for entry in self.catalog.list_all().await? {
            if let Some(canonical) = entry.canonical_name.as_deref() {
                if normalize(canonical) == key {
                    let verbatim = raw_name == canonical;
                    return Ok(Some((entry, verbatim)));
                }
            }
            if normalize(&entry.localized_name) == key {
                let verbatim = raw_name == entry.localized_name;
                return Ok(Some((entry, verbatim)));
            }
        }
        Ok(None)
    }

    async fn find_by_canonical_name(
        &self,
        canonical: &str,
    ) -> AppResult<Option<ExerciseCatalogEntry>> {
        let key = normalize(canonical);
        let entries = self.catalog.find_all_with_canonical_name().await?;
        Ok(entries.into_iter().find(|entry| {
            entry
                .canonical_name
                .as_deref()
                .map_or(false, |name| normalize(name) == key)
        }))
    }

    /// Create a catalog entry for a name every lookup stage missed.
    ///
    /// The rejection rules have already passed; this re-checks for a verbatim
    /// duplicate before inserting, and tolerates losing an insert race.
    async fn try_create(&self, raw_name: &str) -> AppResult<MatchResult> {
        let trimmed = raw_name.trim();
        if let Some(existing) = self.catalog.find_by_exact_name(trimmed).await? {
            return Ok(MatchResult::created(&existing));
        }

        let entry = expansion::build_entry(trimmed);
        self.catalog.insert(&entry).await?;

        // A concurrent request may have created the same name first; the
        // insert is a no-op then, so read back the surviving row.
        match self.catalog.find_by_exact_name(trimmed).await? {
            Some(winner) => {
                info!(raw_name = trimmed, entry_id = %winner.id, "auto-created catalog entry");
                Ok(MatchResult::created(&winner))
            }
            None => Err(AppError::internal(format!(
                "auto-created entry for '{trimmed}' is missing after insert"
            ))),
        }
    }

    /// Best-effort alias write; a failed write must never fail the match
    async fn save_alias(&self, raw_name: &str, key: &str, target_id: &str, source: AliasSource) {
        if key.is_empty() {
            return;
        }
        let record = AliasRecord {
            id: Uuid::new_v4().to_string(),
            raw_name: raw_name.to_string(),
            normalized_key: key.to_string(),
            target_exercise_id: target_id.to_string(),
            language: "en".to_string(),
            source,
            created_at: Utc::now(),
        };
        if let Err(e) = self.aliases.insert_if_absent(&record).await {
            warn!(raw_name, target_id, error = %e, "failed to persist exercise alias");
        }
    }

    /// Best-effort review-queue write; never aborts the caller's flow
    async fn record_unmapped(
        &self,
        raw_name: &str,
        suggested_match: Option<&str>,
        metadata: Option<&ExerciseMetadata>,
    ) {
        if let Err(e) = self
            .unmapped
            .upsert_with_increment(raw_name, suggested_match, metadata)
            .await
        {
            warn!(raw_name, error = %e, "failed to record unmapped exercise name");
        }
    }

    // ========================================================================
    // Operator resolution of the review queue
    // ========================================================================

    /// Resolve an unmapped name to an existing catalog entry.
    ///
    /// Creates an admin alias and deletes the queue entry.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when either the queue entry or the catalog
    /// entry does not exist.
    pub async fn resolve_unmapped(&self, ai_name: &str, exercise_id: &str) -> AppResult<()> {
        let entry = self
            .unmapped
            .find_by_raw_name(ai_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Unmapped entry '{ai_name}'")))?;
        let exercise = self
            .catalog
            .find_by_id(exercise_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Catalog entry {exercise_id}")))?;

        let record = AliasRecord {
            id: Uuid::new_v4().to_string(),
            raw_name: ai_name.to_string(),
            normalized_key: normalize(ai_name),
            target_exercise_id: exercise.id.clone(),
            language: "en".to_string(),
            source: AliasSource::Admin,
            created_at: Utc::now(),
        };
        self.aliases.insert_if_absent(&record).await?;
        self.unmapped.delete_by_id(&entry.id).await?;
        info!(ai_name, exercise_id = %exercise.id, "unmapped name resolved to existing entry");
        Ok(())
    }

    /// Promote an unmapped name to a brand-new catalog entry and alias it.
    ///
    /// `canonical_name` overrides the stored raw name when the operator wants
    /// a cleaner English title.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the queue entry does not exist, and an
    /// invalid-input error when the chosen canonical name violates the
    /// English-only policy.
    pub async fn promote_unmapped(
        &self,
        ai_name: &str,
        canonical_name: Option<&str>,
    ) -> AppResult<ExerciseCatalogEntry> {
        let queued = self
            .unmapped
            .find_by_raw_name(ai_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Unmapped entry '{ai_name}'")))?;

        let name = canonical_name.unwrap_or(ai_name).trim();
        if normalize(name).is_empty() {
            return Err(AppError::invalid_input("canonical name must not be empty"));
        }
        if expansion::looks_swedish(name) {
            return Err(AppError::invalid_input(format!(
                "'{name}' reads as Swedish; canonical names must be English"
            )));
        }

        let entry = expansion::build_entry(name);
        self.catalog.insert(&entry).await?;
        let winner = self
            .catalog
            .find_by_exact_name(name)
            .await?
            .ok_or_else(|| AppError::internal(format!("entry for '{name}' missing after insert")))?;

        let record = AliasRecord {
            id: Uuid::new_v4().to_string(),
            raw_name: ai_name.to_string(),
            normalized_key: normalize(ai_name),
            target_exercise_id: winner.id.clone(),
            language: "en".to_string(),
            source: AliasSource::Admin,
            created_at: Utc::now(),
        };
        self.aliases.insert_if_absent(&record).await?;
        self.unmapped.delete_by_id(&queued.id).await?;
        info!(ai_name, entry_id = %winner.id, "unmapped name promoted to new catalog entry");
        Ok(winner)
    }

    /// Reject an unmapped name outright, deleting the queue entry.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the queue entry does not exist.
    pub async fn reject_unmapped(&self, ai_name: &str) -> AppResult<()> {
        let entry = self
            .unmapped
            .find_by_raw_name(ai_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Unmapped entry '{ai_name}'")))?;
        self.unmapped.delete_by_id(&entry.id).await?;
        info!(ai_name, "unmapped name rejected");
        Ok(())
    }
}
