// ABOUTME: Exercise name resolution engine for AI-generated workout programs
// ABOUTME: Maps free-form bilingual exercise names onto a canonical catalog with learned aliases
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Exercise Matcher
//!
//! Resolves free-form, bilingual (Swedish/English) exercise names, typically
//! produced by an LLM generating workout programs, onto a canonical exercise
//! catalog.
//!
//! The matcher is a cascade of strategies, each short-circuiting on success:
//! exact catalog lookup, persistent alias store, curated static alias table,
//! Levenshtein fuzzy search, and finally an auto-expansion gate that may grow
//! the catalog with legitimate new English names. Names nothing can resolve
//! land in an unmapped review queue for operators.
//!
//! Non-exact successes write back to the persistent alias store, so repeated
//! AI phrasing degrades into an `O(1)` lookup over time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use exercise_matcher::database::alias::AliasManager;
//! use exercise_matcher::database::catalog::CatalogManager;
//! use exercise_matcher::database::unmapped::UnmappedManager;
//! use exercise_matcher::errors::AppResult;
//! use exercise_matcher::{ExerciseMatcher, MatcherConfig, StaticAliasTable};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let pool = sqlx::SqlitePool::connect("sqlite:./data/exercises.db")
//!         .await
//!         .map_err(|e| exercise_matcher::errors::AppError::database(e.to_string()))?;
//!
//!     let matcher = ExerciseMatcher::new(
//!         Arc::new(CatalogManager::new(pool.clone())),
//!         Arc::new(AliasManager::new(pool.clone())),
//!         Arc::new(UnmappedManager::new(pool)),
//!         StaticAliasTable::builtin(),
//!         MatcherConfig::from_env()?,
//!     );
//!
//!     let result = matcher.match_exercise("Bänkpress", None).await?;
//!     println!("matched={} confidence={:?}", result.matched, result.confidence);
//!     Ok(())
//! }
//! ```

pub mod aliases;
pub mod config;
pub mod database;
pub mod equipment;
pub mod errors;
pub mod matching;
pub mod models;
pub mod normalize;

pub use aliases::StaticAliasTable;
pub use config::MatcherConfig;
pub use equipment::filter_by_equipment;
pub use errors::{AppError, AppResult, ErrorCode};
pub use matching::engine::ExerciseMatcher;
pub use models::{
    AliasRecord, AliasSource, Difficulty, ExerciseCatalogEntry, ExerciseMetadata, MatchConfidence,
    MatchResult, UnmappedEntry,
};
pub use normalize::normalize;
