// ABOUTME: Auto-expansion gate deciding whether an unresolved name may grow the catalog
// ABOUTME: Rejects empty, ID-shaped and Swedish-language names under the English-only policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Auto-Expansion Gate
//!
//! Invoked only after every lookup stage has failed. A legitimate new English
//! exercise name becomes a catalog entry with placeholder metadata; everything
//! else is logged to the unmapped review queue with a human-readable reason.

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use crate::models::{Difficulty, ExerciseCatalogEntry, DEFAULT_CATEGORY, UNKNOWN_TAG};
use crate::normalize::normalize;

/// Rejection reason recorded for empty or whitespace-only names
pub const REJECT_EMPTY: &str = "Rejected: empty exercise name";
/// Rejection reason recorded for UUID-shaped or bare-hex names
pub const REJECT_ID_STRING: &str = "Rejected: Name is a UUID/ID string";
/// Rejection reason recorded for Swedish-language names
pub const REJECT_NON_ENGLISH: &str = "Rejected: non-English name (English-only policy)";

/// Swedish words without diacritics that still mark a name as non-English.
/// Diacritic-bearing words are caught by the character check.
const SWEDISH_MARKERS: &[&str] = &[
    "marklyft",
    "hantel",
    "utfall",
    "planka",
    "benpress",
    "sittande",
    "liggande",
    " rodd",
];

fn uuid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("UUID pattern is valid")
    })
}

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{20,}$").expect("hex pattern is valid"))
}

/// Check whether a name reads as Swedish rather than English
#[must_use]
pub fn looks_swedish(name: &str) -> bool {
    let lowered = name.to_lowercase();
    if lowered.chars().any(|c| matches!(c, 'å' | 'ä' | 'ö')) {
        return true;
    }
    SWEDISH_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Apply the rejection rules in order; `None` means the name may be created.
///
/// Order matters: empty guard, ID-shaped patterns, then the language policy.
/// The duplicate defensive re-check against the catalog is the engine's job
/// since it needs store access.
#[must_use]
pub fn rejection_reason(raw_name: &str) -> Option<&'static str> {
    if normalize(raw_name).is_empty() {
        return Some(REJECT_EMPTY);
    }
    let trimmed = raw_name.trim();
    if uuid_pattern().is_match(trimmed) || hex_pattern().is_match(trimmed) {
        return Some(REJECT_ID_STRING);
    }
    if looks_swedish(trimmed) {
        return Some(REJECT_NON_ENGLISH);
    }
    None
}

/// Build the placeholder catalog entry for an accepted name.
///
/// Localized and canonical names are both the raw string (English-only policy
/// holds, so there is no separate Swedish name yet); muscles and equipment get
/// the `"unknown"` placeholder pending admin enrichment.
#[must_use]
pub fn build_entry(raw_name: &str) -> ExerciseCatalogEntry {
    let now = Utc::now();
    let name = raw_name.trim().to_string();
    ExerciseCatalogEntry {
        id: Uuid::new_v4().to_string(),
        external_id: None,
        localized_name: name.clone(),
        canonical_name: Some(name),
        category: DEFAULT_CATEGORY.to_string(),
        difficulty: Difficulty::default(),
        primary_muscles: vec![UNKNOWN_TAG.to_string()],
        secondary_muscles: vec![],
        required_equipment: vec![UNKNOWN_TAG.to_string()],
        description: None,
        instructions: vec![],
        video_url: None,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_names() {
        assert_eq!(rejection_reason(""), Some(REJECT_EMPTY));
        assert_eq!(rejection_reason("   "), Some(REJECT_EMPTY));
        assert_eq!(rejection_reason("!?!"), Some(REJECT_EMPTY));
    }

    #[test]
    fn test_rejects_uuid_shaped_names() {
        assert_eq!(
            rejection_reason("550e8400-e29b-41d4-a716-446655440000"),
            Some(REJECT_ID_STRING)
        );
    }

    #[test]
    fn test_rejects_bare_hex_strings() {
        assert_eq!(
            rejection_reason("deadbeefdeadbeefdead"),
            Some(REJECT_ID_STRING)
        );
        // 19 hex chars is below the cutoff and reads as a name attempt
        assert_eq!(rejection_reason("deadbeefdeadbeefdea"), None);
    }

    #[test]
    fn test_rejects_swedish_names() {
        assert_eq!(rejection_reason("Knäböj"), Some(REJECT_NON_ENGLISH));
        assert_eq!(rejection_reason("Stående Rodd"), Some(REJECT_NON_ENGLISH));
        assert_eq!(rejection_reason("marklyft med hantel"), Some(REJECT_NON_ENGLISH));
    }

    #[test]
    fn test_accepts_english_names() {
        assert_eq!(rejection_reason("Zercher Squat"), None);
        assert_eq!(rejection_reason("Landmine Press"), None);
    }

    #[test]
    fn test_build_entry_placeholders() {
        let entry = build_entry("  Zercher Squat ");
        assert_eq!(entry.localized_name, "Zercher Squat");
        assert_eq!(entry.canonical_name.as_deref(), Some("Zercher Squat"));
        assert_eq!(entry.category, DEFAULT_CATEGORY);
        assert_eq!(entry.primary_muscles, vec![UNKNOWN_TAG.to_string()]);
        assert_eq!(entry.required_equipment, vec![UNKNOWN_TAG.to_string()]);
        assert!(!entry.id.is_empty());
    }
}
