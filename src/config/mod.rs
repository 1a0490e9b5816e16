//! Engine configuration
//!
//! Configuration is an explicit value passed into the engine per invocation —
//! never implicit global state. Concurrent engines with different
//! configurations can therefore coexist safely.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{EngineError, EngineResult};

/// Configuration for a matching pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Extra tags to strip from names before matching. Tags containing
    /// brackets or parentheses are removed as an exact unit; bare tags are
    /// removed as whole words. Matching is case-insensitive.
    #[serde(default)]
    pub ignore_tags: Vec<String>,

    /// Minimum token-sort similarity score (0-100) for a fuzzy match
    #[serde(default = "default_match_threshold")]
    pub match_threshold: u8,

    /// How many channels per duplicate group are eligible to receive streams
    #[serde(default = "default_visible_limit")]
    pub visible_limit: usize,

    /// Regional station databases to index. An empty set enables every
    /// supplied record set.
    #[serde(default)]
    pub enabled_regions: HashSet<String>,
}

fn default_match_threshold() -> u8 {
    85
}

fn default_visible_limit() -> usize {
    1
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            ignore_tags: Vec::new(),
            match_threshold: default_match_threshold(),
            visible_limit: default_visible_limit(),
            enabled_regions: HashSet::new(),
        }
    }
}

impl MatchConfig {
    /// Validate configuration at the engine boundary.
    ///
    /// Out-of-range values are rejected rather than clamped.
    pub fn validate(&self) -> EngineResult<()> {
        if self.match_threshold > 100 {
            return Err(EngineError::configuration(format!(
                "match_threshold must be between 0 and 100, got {}",
                self.match_threshold
            )));
        }
        if self.visible_limit < 1 {
            return Err(EngineError::configuration(
                "visible_limit must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = MatchConfig {
            match_threshold: 101,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_visible_limit_rejected() {
        let config = MatchConfig {
            visible_limit: 0,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: MatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.match_threshold, 85);
        assert_eq!(config.visible_limit, 1);
        assert!(config.ignore_tags.is_empty());
        assert!(config.enabled_regions.is_empty());
    }
}
