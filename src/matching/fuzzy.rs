// ABOUTME: Levenshtein edit-distance search over the catalog's canonical English names
// ABOUTME: Full scan with a fixed distance threshold and insertion-order tie-break
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Fuzzy Matcher
//!
//! Classic dynamic-programming Levenshtein distance (substitution, insertion
//! and deletion each cost 1; no transposition discount) between the normalized
//! input and every normalized canonical name. Entries without a canonical
//! English name are invisible by policy.
//!
//! The scan is linear over the whole catalog. Catalogs are hundreds to low
//! thousands of rows, so this is a few milliseconds; a scaling limit, not a
//! bug.

use strsim::levenshtein;

use crate::models::ExerciseCatalogEntry;
use crate::normalize::normalize;

/// Maximum edit distance accepted by default
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 5;

/// Find the catalog entry whose canonical name is closest to `raw_name`.
///
/// Returns the entry with the minimum edit distance, provided that minimum is
/// `<= max_distance`. Ties keep the first entry in catalog iteration order,
/// so callers should pass a deterministically ordered slice to keep results
/// reproducible.
#[must_use]
pub fn find_closest<'a>(
    raw_name: &str,
    entries: &'a [ExerciseCatalogEntry],
    max_distance: usize,
) -> Option<(&'a ExerciseCatalogEntry, usize)> {
    let key = normalize(raw_name);
    if key.is_empty() {
        return None;
    }

    let mut best: Option<(&ExerciseCatalogEntry, usize)> = None;
    for entry in entries {
        let Some(canonical) = entry.canonical_name.as_deref() else {
            continue;
        };
        let distance = levenshtein(&key, &normalize(canonical));
        // Strictly-smaller comparison keeps the first entry on ties
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((entry, distance));
        }
    }

    best.filter(|&(_, distance)| distance <= max_distance)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::Difficulty;

    fn entry(id: &str, canonical: Option<&str>) -> ExerciseCatalogEntry {
        ExerciseCatalogEntry {
            id: id.to_string(),
            external_id: None,
            localized_name: format!("{id}-localized"),
            canonical_name: canonical.map(ToString::to_string),
            category: "compound".to_string(),
            difficulty: Difficulty::Beginner,
            primary_muscles: vec![],
            secondary_muscles: vec![],
            required_equipment: vec![],
            description: None,
            instructions: vec![],
            video_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_finds_closest_entry() {
        let entries = vec![
            entry("c1", Some("Bench Press")),
            entry("c2", Some("Leg Press")),
        ];
        let (found, distance) =
            find_closest("bench presss", &entries, DEFAULT_MAX_EDIT_DISTANCE).unwrap();
        assert_eq!(found.id, "c1");
        assert_eq!(distance, 1);
    }

    #[test]
    fn test_threshold_boundary() {
        let entries = vec![entry("c1", Some("squat"))];
        // "squatxxxxx" is exactly 5 insertions away
        assert!(find_closest("squatxxxxx", &entries, 5).is_some());
        // one more insertion pushes it past the threshold
        assert!(find_closest("squatxxxxxx", &entries, 5).is_none());
    }

    #[test]
    fn test_ties_keep_first_in_iteration_order() {
        // both candidates are distance 1 from the input
        let entries = vec![entry("c1", Some("rowx")), entry("c2", Some("rowy"))];
        let (found, distance) = find_closest("row", &entries, 5).unwrap();
        assert_eq!(found.id, "c1");
        assert_eq!(distance, 1);
    }

    #[test]
    fn test_entries_without_canonical_name_are_invisible() {
        let entries = vec![entry("c1", None), entry("c2", Some("plank"))];
        let (found, _) = find_closest("plank", &entries, 5).unwrap();
        assert_eq!(found.id, "c2");

        let only_localized = vec![entry("c1", None)];
        assert!(find_closest("c1-localized", &only_localized, 5).is_none());
    }

    #[test]
    fn test_empty_input_never_matches() {
        let entries = vec![entry("c1", Some("row"))];
        assert!(find_closest("", &entries, 5).is_none());
        assert!(find_closest("  !! ", &entries, 5).is_none());
    }

    #[test]
    fn test_comparison_is_normalized() {
        let entries = vec![entry("c1", Some("Pull-Up"))];
        let (found, distance) = find_closest("PULLUP", &entries, 5).unwrap();
        assert_eq!(found.id, "c1");
        assert_eq!(distance, 0);
    }
}
