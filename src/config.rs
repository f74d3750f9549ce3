//! Match configuration: the one process-wide configurable datum (§5, §6)
//! plus the ambient knobs the embedder controls, all threaded explicitly
//! rather than held as mutable global state (§9).

use serde::Deserialize;

use crate::score::ScoreConfig;

/// Configuration for one `match` invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Attribute names dropped from both entities before emap content
    /// comparison (§6).
    pub unmatched_attributes: Vec<String>,
    /// Whether to run the optional Inference Engine stage (§4.H) after
    /// scoring. Defaults to `true`.
    pub run_inference: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            unmatched_attributes: Vec::new(),
            run_inference: true,
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn score_config(&self) -> ScoreConfig {
        ScoreConfig {
            unmatched_attributes: self.unmatched_attributes.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_fills_in_defaults() {
        let cfg = MatchConfig::from_toml_str("unmatched_attributes = [\"confidence\"]\n").unwrap();
        assert_eq!(cfg.unmatched_attributes, vec!["confidence".to_string()]);
        assert!(cfg.run_inference);
    }
}
