// ABOUTME: Shared name normalization for all matching stages
// ABOUTME: Lowercases, strips punctuation while keeping Swedish diacritics, collapses whitespace
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Name Normalization
//!
//! Every matching stage (catalog lookup, alias stores, fuzzy matcher,
//! equipment filter) goes through this single routine. Any divergence between
//! call sites would break alias and catalog lookups silently, so nothing else
//! in the crate lowercases or strips names on its own.

/// Canonicalize a raw exercise-name string into a matching key.
///
/// Lowercases, keeps letters (including `å`, `ä`, `ö`), digits and whitespace,
/// drops everything else, then collapses whitespace runs and trims.
/// Empty input yields an empty string; never panics. Idempotent:
/// `normalize(normalize(x)) == normalize(x)` for all `x`.
#[must_use]
pub fn normalize(raw_name: &str) -> String {
    let mut filtered = String::with_capacity(raw_name.len());
    for ch in raw_name.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            filtered.push(ch);
        } else if ch.is_whitespace() {
            filtered.push(' ');
        }
    }
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Barbell Bench-Press!"), "barbell benchpress");
        assert_eq!(normalize("Pull-Up (weighted)"), "pullup weighted");
    }

    #[test]
    fn test_preserves_swedish_diacritics() {
        assert_eq!(normalize("Bänkpress!!"), "bänkpress");
        assert_eq!(normalize("KNÄBÖJ"), "knäböj");
        assert_eq!(normalize("Stående Rodd"), "stående rodd");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  bench \t press \n "), "bench press");
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(normalize("21s Biceps Curl"), "21s biceps curl");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
        assert_eq!(normalize("!?!,."), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["Bänkpress!!", "  Bench   Press ", "pull-up", "", "é ü ñ"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
