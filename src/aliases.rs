// ABOUTME: Curated static alias table mapping known name variants to canonical exercise names
// ABOUTME: Built once at startup into a normalized reverse lookup, injected into the matcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Static Alias Table
//!
//! Hand-curated spelling and language variants for common exercises. The
//! source data maps canonical English names to lists of known variants
//! (Swedish names, plural forms, spacing drift); at build time the table is
//! inverted into `normalized_variant -> canonical_name` for `O(1)` lookup.
//!
//! No persistence: the table is rebuilt from source data at process start and
//! passed into [`crate::matching::engine::ExerciseMatcher`] by the caller.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::warn;

use crate::normalize::normalize;

/// Curated variant source data: canonical English name, known variants.
///
/// Variants cover Swedish display names and the spelling drift seen in
/// AI-generated programs.
pub const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    (
        "Barbell Bench Press",
        &["bench press", "bänkpress", "benchpress", "flat bench press"],
    ),
    (
        "Barbell Back Squat",
        &["squat", "squats", "knäböj", "back squat", "barbell squat"],
    ),
    ("Deadlift", &["marklyft", "conventional deadlift", "deadlifts"]),
    (
        "Overhead Press",
        &["military press", "axelpress", "shoulder press", "ohp"],
    ),
    ("Pull-Up", &["pullup", "pull ups", "chin up", "chins"]),
    (
        "Push-Up",
        &["pushup", "push ups", "armhävning", "armhävningar"],
    ),
    (
        "Dumbbell Biceps Curl",
        &["bicep curl", "biceps curl", "hantelcurl", "dumbbell curl"],
    ),
    (
        "Romanian Deadlift",
        &["rdl", "rumänsk marklyft", "stiff leg deadlift"],
    ),
    ("Lat Pulldown", &["latsdrag", "lat pull down", "pulldown"]),
    ("Seated Cable Row", &["sittande rodd", "cable row", "kabelrodd"]),
    (
        "Walking Lunge",
        &["utfall", "utfallssteg", "lunge", "lunges"],
    ),
    ("Plank", &["planka", "plankan", "front plank"]),
    ("Hip Thrust", &["höftlyft", "barbell hip thrust"]),
    ("Leg Press", &["benpress"]),
    (
        "Standing Calf Raise",
        &["calf raise", "calf raises", "tåhävning", "tåhävningar"],
    ),
];

/// Immutable reverse lookup from normalized variant to canonical name
#[derive(Debug, Clone, Default)]
pub struct StaticAliasTable {
    variants: HashMap<String, String>,
}

impl StaticAliasTable {
    /// Build a table from `(canonical_name, variants)` source data.
    ///
    /// Conflict policy: if two canonical names claim the same variant, the
    /// first registration wins and the collision is logged.
    #[must_use]
    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let mut variants: HashMap<String, String> = HashMap::new();
        for (canonical, names) in entries {
            for name in *names {
                let key = normalize(name);
                if key.is_empty() {
                    continue;
                }
                match variants.entry(key) {
                    Entry::Occupied(existing) => {
                        if existing.get() != canonical {
                            warn!(
                                variant = *name,
                                kept = %existing.get(),
                                ignored = *canonical,
                                "static alias variant claimed by two canonical names"
                            );
                        }
                    }
                    Entry::Vacant(slot) => {
                        slot.insert((*canonical).to_string());
                    }
                }
            }
        }
        Self { variants }
    }

    /// Build the table from the curated builtin source data
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ALIASES)
    }

    /// Look up the canonical name for a raw variant, normalizing first
    #[must_use]
    pub fn lookup(&self, raw_name: &str) -> Option<&str> {
        self.variants.get(&normalize(raw_name)).map(String::as_str)
    }

    /// Number of registered variants
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the table has no variants
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_normalizes_input() {
        let table = StaticAliasTable::builtin();
        assert_eq!(table.lookup("Bänkpress!!"), Some("Barbell Bench Press"));
        assert_eq!(table.lookup("  BENCH   PRESS "), Some("Barbell Bench Press"));
        assert_eq!(table.lookup("knäböj"), Some("Barbell Back Squat"));
    }

    #[test]
    fn test_lookup_miss() {
        let table = StaticAliasTable::builtin();
        assert_eq!(table.lookup("xyzzy curl"), None);
        assert_eq!(table.lookup(""), None);
    }

    #[test]
    fn test_first_registered_wins_on_conflict() {
        let table = StaticAliasTable::from_entries(&[
            ("Barbell Back Squat", &["squat"]),
            ("Goblet Squat", &["squat", "goblet"]),
        ]);
        assert_eq!(table.lookup("squat"), Some("Barbell Back Squat"));
        assert_eq!(table.lookup("goblet"), Some("Goblet Squat"));
    }

    #[test]
    fn test_builtin_has_no_conflicts() {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for (canonical, names) in BUILTIN_ALIASES {
            for name in *names {
                let key = normalize(name);
                if let Some(previous) = seen.insert(key, *canonical) {
                    assert_eq!(
                        previous, *canonical,
                        "variant {name} claimed by both {previous} and {canonical}"
                    );
                }
            }
        }
    }
}
