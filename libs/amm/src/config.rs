//! Exchange quoting configuration
//!
//! Controls how the path finder treats the rounding slippage of pool hops.
//! Supports JSON file loading, environment variable overrides and validation.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quoting parameters for liquidity pool hops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Hops whose rounding slippage exceeds this are discarded (bips, 1000 = 10%)
    pub max_rounding_slippage_bips: i64,
    /// Measure rounding slippage when quoting trades
    pub compute_rounding_slippage: bool,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            max_rounding_slippage_bips: 1_000,
            compute_rounding_slippage: true,
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read exchange config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse exchange config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source on top of the defaults
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(max_slippage) = lookup("POOL_MAX_ROUNDING_SLIPPAGE_BIPS") {
            if let Ok(value) = max_slippage.parse::<i64>() {
                config.max_rounding_slippage_bips = value;
            }
        }

        if let Some(compute) = lookup("POOL_COMPUTE_ROUNDING_SLIPPAGE") {
            config.compute_rounding_slippage = compute.to_lowercase() == "true";
        }

        config
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(0..=10_000).contains(&self.max_rounding_slippage_bips) {
            bail!("max_rounding_slippage_bips must be within [0, 10000]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_validation() {
        let config = ExchangeConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_slippage_ceiling() {
        let config = ExchangeConfig {
            max_rounding_slippage_bips: 10_001,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExchangeConfig {
            max_rounding_slippage_bips: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange.json");

        let config = ExchangeConfig {
            max_rounding_slippage_bips: 250,
            compute_rounding_slippage: false,
        };
        config.save_to_file(&path).unwrap();

        assert_eq!(ExchangeConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_file_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange.json");
        std::fs::write(
            &path,
            r#"{"max_rounding_slippage_bips": 20000, "compute_rounding_slippage": true}"#,
        )
        .unwrap();

        assert!(ExchangeConfig::from_file(&path).is_err());
        assert!(ExchangeConfig::from_file(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_env_override() {
        let vars: HashMap<&str, &str> = [
            ("POOL_MAX_ROUNDING_SLIPPAGE_BIPS", "42"),
            ("POOL_COMPUTE_ROUNDING_SLIPPAGE", "false"),
        ]
        .into_iter()
        .collect();

        let config = ExchangeConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.max_rounding_slippage_bips, 42);
        assert!(!config.compute_rounding_slippage);
    }

    #[test]
    fn test_env_override_ignores_unparseable_values() {
        let config = ExchangeConfig::from_vars(|key| match key {
            "POOL_MAX_ROUNDING_SLIPPAGE_BIPS" => Some("lots".to_string()),
            _ => None,
        });
        assert_eq!(config, ExchangeConfig::default());
    }
}
