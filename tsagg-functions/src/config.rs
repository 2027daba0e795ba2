use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;

use crate::function::AggregationKind;

/// Environment variable listing enabled functions by query name
pub const ENABLED_FUNCTIONS_VAR: &str = "TSAGG_ENABLED_FUNCTIONS";

/// Configuration for the function registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionsConfig {
    /// Query names of the functions callers may resolve
    pub enabled_functions: Vec<String>,
}

impl Default for FunctionsConfig {
    fn default() -> Self {
        Self {
            enabled_functions: AggregationKind::ALL
                .iter()
                .map(|kind| kind.query_name().to_string())
                .collect(),
        }
    }
}

impl FunctionsConfig {
    /// Load configuration from environment variables and defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Override with environment variables if present
        if let Ok(enabled) = env::var(ENABLED_FUNCTIONS_VAR) {
            config.enabled_functions = parse_function_list(&enabled);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled_functions.is_empty() {
            return Err(anyhow::anyhow!("At least one function must be enabled"));
        }

        let mut seen = HashSet::new();
        for name in &self.enabled_functions {
            if AggregationKind::from_query_name(name).is_none() {
                return Err(anyhow::anyhow!("Unknown aggregation function '{}'", name));
            }
            if !seen.insert(name.as_str()) {
                return Err(anyhow::anyhow!(
                    "Aggregation function '{}' is listed more than once",
                    name
                ));
            }
        }

        Ok(())
    }

    /// Functions this configuration enables
    pub fn enabled_kinds(&self) -> Vec<AggregationKind> {
        self.enabled_functions
            .iter()
            .filter_map(|name| AggregationKind::from_query_name(name))
            .collect()
    }
}

fn parse_function_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
