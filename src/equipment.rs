// ABOUTME: Equipment availability filter reducing the catalog to performable exercises
// ABOUTME: Tiered tag matching with a guaranteed bodyweight fallback set
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Equipment Availability Filter
//!
//! An entry passes when every required equipment tag is satisfied by the
//! user's available tags. Each required tag gets three escalating attempts,
//! in this exact order (later tiers are deliberately more permissive
//! fallbacks):
//!
//! 1. exact normalized tag match
//! 2. substring containment, either direction
//! 3. word-level name containment, either direction
//!
//! The literal `"unknown"` tag is always satisfied (auto-created entries are
//! usable pending enrichment), and entries with no required equipment always
//! pass. When the caller supplies no equipment, or filtering would yield
//! nothing, the filter falls back to bodyweight entries that carry a
//! canonical name, so the result is never an unusable empty set as long as
//! one such entry exists.

use crate::models::{ExerciseCatalogEntry, UNKNOWN_TAG};
use crate::normalize::normalize;

/// Reduce the catalog to exercises whose required equipment is covered by
/// `available_tags`
#[must_use]
pub fn filter_by_equipment(
    catalog: &[ExerciseCatalogEntry],
    available_tags: &[String],
) -> Vec<ExerciseCatalogEntry> {
    let available: Vec<String> = available_tags
        .iter()
        .map(|tag| normalize(tag))
        .filter(|tag| !tag.is_empty())
        .collect();

    if available.is_empty() {
        return bodyweight_fallback(catalog);
    }

    let equipped: Vec<ExerciseCatalogEntry> = catalog
        .iter()
        .filter(|entry| entry_is_equipped(entry, &available))
        .cloned()
        .collect();

    if equipped.is_empty() {
        bodyweight_fallback(catalog)
    } else {
        equipped
    }
}

/// Bodyweight set: entries with no required equipment and a canonical name
#[must_use]
pub fn bodyweight_fallback(catalog: &[ExerciseCatalogEntry]) -> Vec<ExerciseCatalogEntry> {
    catalog
        .iter()
        .filter(|entry| entry.required_equipment.is_empty() && entry.canonical_name.is_some())
        .cloned()
        .collect()
}

fn entry_is_equipped(entry: &ExerciseCatalogEntry, available: &[String]) -> bool {
    entry.required_equipment.iter().all(|required| {
        let required_key = normalize(required);
        required_key.is_empty()
            || required_key == UNKNOWN_TAG
            || available.iter().any(|have| tag_matches(&required_key, have))
    })
}

/// Tiered tag comparison. Both inputs are already normalized.
fn tag_matches(required: &str, available: &str) -> bool {
    // Tier 1: exact
    if required == available {
        return true;
    }
    // Tier 2: substring containment, either direction
    if required.contains(available) || available.contains(required) {
        return true;
    }
    // Tier 3: individual name words, either direction
    required
        .split_whitespace()
        .any(|word| available.contains(word))
        || available
            .split_whitespace()
            .any(|word| required.contains(word))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::Difficulty;

    fn entry(id: &str, canonical: Option<&str>, equipment: &[&str]) -> ExerciseCatalogEntry {
        ExerciseCatalogEntry {
            id: id.to_string(),
            external_id: None,
            localized_name: format!("{id}-localized"),
            canonical_name: canonical.map(ToString::to_string),
            category: "compound".to_string(),
            difficulty: Difficulty::Beginner,
            primary_muscles: vec![],
            secondary_muscles: vec![],
            required_equipment: equipment.iter().map(ToString::to_string).collect(),
            description: None,
            instructions: vec![],
            video_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_exact_tag_match() {
        let catalog = vec![entry("c1", Some("Bench Press"), &["barbell", "bench"])];
        let result = filter_by_equipment(&catalog, &tags(&["barbell", "bench"]));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_missing_tag_excludes_entry() {
        let catalog = vec![
            entry("c1", Some("Bench Press"), &["barbell", "bench"]),
            entry("c2", Some("Push-Up"), &[]),
        ];
        let result = filter_by_equipment(&catalog, &tags(&["barbell"]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "c2");
    }

    #[test]
    fn test_substring_containment_either_direction() {
        let catalog = vec![entry("c1", Some("Leg Curl"), &["cable machine"])];
        // available tag is a substring of the required tag
        assert_eq!(filter_by_equipment(&catalog, &tags(&["cable"])).len(), 1);
        // required tag is a substring of the available tag
        let catalog = vec![entry("c2", Some("Row"), &["cable"])];
        assert_eq!(
            filter_by_equipment(&catalog, &tags(&["cable machine"])).len(),
            1
        );
    }

    #[test]
    fn test_word_level_containment() {
        let catalog = vec![entry("c1", Some("Incline Press"), &["adjustable bench"])];
        let result = filter_by_equipment(&catalog, &tags(&["flat bench"]));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_unknown_tag_always_satisfied() {
        let catalog = vec![entry("c1", Some("Zercher Squat"), &["unknown"])];
        let result = filter_by_equipment(&catalog, &tags(&["yoga mat"]));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_bodyweight_always_passes() {
        let catalog = vec![entry("c1", Some("Push-Up"), &[])];
        let result = filter_by_equipment(&catalog, &tags(&["kettlebell"]));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_empty_available_falls_back_to_bodyweight() {
        let catalog = vec![
            entry("c1", Some("Bench Press"), &["barbell", "bench"]),
            entry("c2", Some("Push-Up"), &[]),
            entry("c3", None, &[]),
        ];
        let result = filter_by_equipment(&catalog, &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "c2");
    }

    #[test]
    fn test_no_usable_entries_falls_back_to_bodyweight() {
        let catalog = vec![
            entry("c1", Some("Bench Press"), &["barbell", "bench"]),
            entry("c2", Some("Plank"), &[]),
        ];
        let result = filter_by_equipment(&catalog, &tags(&["sauna"]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "c2");
    }

    #[test]
    fn test_tags_are_normalized_before_comparison() {
        let catalog = vec![entry("c1", Some("Bench Press"), &["Bar-bell!"])];
        let result = filter_by_equipment(&catalog, &tags(&["BARBELL"]));
        assert_eq!(result.len(), 1);
    }
}
