// ABOUTME: Core data model for the exercise matching engine
// ABOUTME: Catalog entries, alias records, unmapped-queue entries and match results
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder tag used for muscles/equipment on auto-created catalog entries.
///
/// Never left null: downstream equipment filtering treats `"unknown"` as
/// always-available, a deliberate permissive default pending admin enrichment.
pub const UNKNOWN_TAG: &str = "unknown";

/// Placeholder category for auto-created catalog entries
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Difficulty level for catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Suitable for beginners with no prior experience
    #[default]
    Beginner,
    /// Requires some training history
    Intermediate,
    /// For experienced lifters
    Advanced,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            // Default to Beginner for unrecognized values
            _ => Self::Beginner,
        }
    }
}

/// A canonical exercise in the catalog.
///
/// The Swedish `localized_name` is the display name; `canonical_name` is the
/// English name all matching, aliasing and auto-expansion operate against.
/// Entries without a canonical name are invisible to fuzzy matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCatalogEntry {
    /// Stable internal identifier, immutable
    pub id: String,
    /// Optional stable catalog code (versioned exercise-bank key); null for legacy rows
    pub external_id: Option<String>,
    /// Swedish display name, unique within the catalog under normalization
    pub localized_name: String,
    /// English name used for all matching; absence hides the entry from the matcher
    pub canonical_name: Option<String>,
    /// Exercise category (e.g. compound, isolation)
    pub category: String,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Primary muscle-group tags
    pub primary_muscles: Vec<String>,
    /// Secondary muscle-group tags
    pub secondary_muscles: Vec<String>,
    /// Equipment tags required to perform the exercise; empty means bodyweight-only
    pub required_equipment: Vec<String>,
    /// Detailed description
    pub description: Option<String>,
    /// Step-by-step instructions
    pub instructions: Vec<String>,
    /// Optional instructional video URL
    pub video_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ExerciseCatalogEntry {
    /// Display name preferred for match results: canonical when present,
    /// localized otherwise
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.canonical_name.as_deref().unwrap_or(&self.localized_name)
    }
}

/// Which matching stage created an alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasSource {
    /// Exact catalog match through case/punctuation drift
    ExactVariant,
    /// Hit in the curated static alias table
    StaticTable,
    /// Levenshtein match within the distance threshold
    Fuzzy,
    /// Created by an operator resolving an unmapped entry
    Admin,
}

impl AliasSource {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExactVariant => "exact_variant",
            Self::StaticTable => "static_table",
            Self::Fuzzy => "fuzzy",
            Self::Admin => "admin",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "static_table" => Self::StaticTable,
            "fuzzy" => Self::Fuzzy,
            "admin" => Self::Admin,
            _ => Self::ExactVariant,
        }
    }
}

/// A learned mapping from a raw observed string to a catalog entry.
///
/// `(raw_name, target_exercise_id)` pairs are unique; duplicate writes are
/// no-ops. Aliases never own the entry they point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasRecord {
    /// Unique identifier
    pub id: String,
    /// The exact string as supplied by the upstream source
    pub raw_name: String,
    /// Normalized form of `raw_name`, indexed for lookup
    pub normalized_key: String,
    /// Catalog entry this alias resolves to
    pub target_exercise_id: String,
    /// Language of the raw name
    pub language: String,
    /// Which matching stage created this alias
    pub source: AliasSource,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A raw name that no matching stage could resolve, queued for human review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmappedEntry {
    /// Unique identifier
    pub id: String,
    /// Raw unresolved string, unique key
    pub ai_name: String,
    /// Optional hint: rejection reason or best-guess match
    pub suggested_match: Option<String>,
    /// How many times this name has failed to resolve
    pub occurrence_count: i64,
    /// Category hint captured from the caller, if any
    pub category: Option<String>,
    /// Equipment hint captured from the caller, if any
    pub equipment: Option<String>,
    /// Muscle hint captured from the caller, if any
    pub muscles: Option<String>,
    /// Difficulty hint captured from the caller, if any
    pub difficulty: Option<String>,
    /// First sighting timestamp
    pub first_seen_at: DateTime<Utc>,
    /// Most recent sighting timestamp
    pub last_seen_at: DateTime<Utc>,
}

/// Optional metadata a caller can attach to a match request.
///
/// Explicit nullable fields rather than an open map, so the unmapped queue's
/// "backfill only if previously null" merge contract stays precise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseMetadata {
    /// Category hint from the upstream generation
    pub category: Option<String>,
    /// Equipment tags the generation expects
    pub equipment: Option<Vec<String>>,
    /// Primary muscle hints
    pub primary_muscles: Option<Vec<String>>,
    /// Secondary muscle hints
    pub secondary_muscles: Option<Vec<String>>,
    /// Difficulty hint
    pub difficulty: Option<Difficulty>,
}

/// Which stage produced a match.
///
/// `None` is reported for the auto-expansion path: matched, but through
/// creation rather than recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    /// Catalog lookup hit (ID or normalized-name equality)
    Exact,
    /// Persistent or static alias hit
    Alias,
    /// Levenshtein match within the distance threshold
    Fuzzy,
    /// Auto-created entry, or no match at all when `matched` is false
    None,
}

impl MatchConfidence {
    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Alias => "alias",
            Self::Fuzzy => "fuzzy",
            Self::None => "none",
        }
    }
}

/// Outcome of a single match request. Transient, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether a catalog entry was found or created for the input
    pub matched: bool,
    /// ID of the resolved entry, present iff matched
    pub exercise_id: Option<String>,
    /// Name of the resolved entry, present iff matched
    pub exercise_name: Option<String>,
    /// Which stage produced the match
    pub confidence: MatchConfidence,
    /// Edit distance to the winning entry, present only for fuzzy matches
    pub distance: Option<usize>,
}

impl MatchResult {
    /// Exact catalog hit
    #[must_use]
    pub fn exact(entry: &ExerciseCatalogEntry) -> Self {
        Self::resolved(entry, MatchConfidence::Exact, None)
    }

    /// Alias hit (persistent store or static table)
    #[must_use]
    pub fn alias(entry: &ExerciseCatalogEntry) -> Self {
        Self::resolved(entry, MatchConfidence::Alias, None)
    }

    /// Fuzzy hit at the given edit distance
    #[must_use]
    pub fn fuzzy(entry: &ExerciseCatalogEntry, distance: usize) -> Self {
        Self::resolved(entry, MatchConfidence::Fuzzy, Some(distance))
    }

    /// Entry created (or defensively recovered) by the auto-expansion gate
    #[must_use]
    pub fn created(entry: &ExerciseCatalogEntry) -> Self {
        Self::resolved(entry, MatchConfidence::None, None)
    }

    /// Nothing matched; the raw name went to the review queue
    #[must_use]
    pub const fn unmatched() -> Self {
        Self {
            matched: false,
            exercise_id: None,
            exercise_name: None,
            confidence: MatchConfidence::None,
            distance: None,
        }
    }

    fn resolved(
        entry: &ExerciseCatalogEntry,
        confidence: MatchConfidence,
        distance: Option<usize>,
    ) -> Self {
        Self {
            matched: true,
            exercise_id: Some(entry.id.clone()),
            exercise_name: Some(entry.display_name().to_string()),
            confidence,
            distance,
        }
    }
}
