//! Style Engine Configuration

use serde::{Deserialize, Serialize};

use crate::StyleError;

/// Style engine configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deepest parenthesis nesting accepted in state expressions
    pub max_expression_depth: usize,

    /// Resolve through the rule index instead of scanning every rule
    pub index_rules: bool,

    /// Keep diagnostics for skipped declarations on parsed stylesheets
    pub record_diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_expression_depth: fos_state::DEFAULT_MAX_DEPTH,
            index_rules: true,
            record_diagnostics: true,
        }
    }
}

impl Config {
    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(json)?)
    }
}
