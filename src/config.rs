// ABOUTME: Environment-based configuration for the matching engine
// ABOUTME: Reads tunable thresholds from MATCHER_* variables with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::env;

use crate::errors::{AppError, AppResult};
use crate::matching::fuzzy::DEFAULT_MAX_EDIT_DISTANCE;

/// Tunable knobs for the matching cascade.
///
/// Environment-only configuration: `from_env` reads `MATCHER_*` variables,
/// `Default` gives the shipped values.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Maximum accepted Levenshtein distance for the fuzzy stage
    pub max_fuzzy_distance: usize,
    /// Whether the auto-expansion gate may create catalog entries
    pub auto_expansion: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_fuzzy_distance: DEFAULT_MAX_EDIT_DISTANCE,
            auto_expansion: true,
        }
    }
}

impl MatcherConfig {
    /// Load configuration from the environment.
    ///
    /// Recognized variables:
    /// - `MATCHER_MAX_FUZZY_DISTANCE`: non-negative integer, default 5
    /// - `MATCHER_AUTO_EXPANSION`: `true`/`false`/`1`/`0`, default true
    ///
    /// # Errors
    ///
    /// Returns a config error when a variable is set but unparseable.
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("MATCHER_MAX_FUZZY_DISTANCE") {
            config.max_fuzzy_distance = raw.trim().parse::<usize>().map_err(|e| {
                AppError::config(format!(
                    "MATCHER_MAX_FUZZY_DISTANCE must be a non-negative integer, got '{raw}': {e}"
                ))
            })?;
        }

        if let Ok(raw) = env::var("MATCHER_AUTO_EXPANSION") {
            config.auto_expansion = match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                other => {
                    return Err(AppError::config(format!(
                        "MATCHER_AUTO_EXPANSION must be a boolean, got '{other}'"
                    )))
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = MatcherConfig::default();
        assert_eq!(config.max_fuzzy_distance, 5);
        assert!(config.auto_expansion);
    }
}
