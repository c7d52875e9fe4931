//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll rule
//! tables from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollConfig;

/// Loads and provides access to the payroll rules.
///
/// The rules live in a single YAML file. Sections left out of the file use
/// the built-in defaults, and [`ConfigLoader::default`] needs no file at all.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Annual leave: {} days", loader.config().leave.annual_allowance);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads the rules from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The file contains invalid YAML or mistyped values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content).map_err(|e| match e {
            PayrollError::ConfigParseError { message, .. } => PayrollError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path_str, "Loaded payroll configuration");
        Ok(loader)
    }

    /// Parses the rules from YAML text.
    ///
    /// Rates outside `0..=1` and out-of-range amounts are rejected as
    /// `ConfigParseError`.
    pub fn from_yaml_str(content: &str) -> PayrollResult<Self> {
        let config: PayrollConfig =
            serde_yaml::from_str(content).map_err(|e| PayrollError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config
            .validate()
            .map_err(|message| PayrollError::ConfigParseError {
                path: "<inline>".to_string(),
                message,
            })?;
        Ok(Self { config })
    }

    /// Returns the loaded rules.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader and returns the rules.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/payroll.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_shipped_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_shipped_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config(), &PayrollConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/payroll.yaml");

        match result {
            Err(PayrollError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_yaml_reports_parse_error() {
        let result = ConfigLoader::from_yaml_str("deductions: [unclosed");
        assert!(matches!(
            result,
            Err(PayrollError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_out_of_range_rates_are_rejected() {
        let yaml = r#"
deductions:
  provident_fund_rate: "100000000000000000000"
"#;
        match ConfigLoader::from_yaml_str(yaml) {
            Err(PayrollError::ConfigParseError { message, .. }) => {
                assert!(message.contains("deductions.provident_fund_rate"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        let yaml = r#"
manager:
  per_subordinate_allowance: "50"
  bonus_multiplier: "-2"
"#;
        assert!(matches!(
            ConfigLoader::from_yaml_str(yaml),
            Err(PayrollError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_overrides_are_applied() {
        let yaml = r#"
deductions:
  provident_fund_rate: "0.10"
manager:
  per_subordinate_allowance: "75"
  bonus_multiplier: "2"
"#;
        let loader = ConfigLoader::from_yaml_str(yaml).unwrap();
        let config = loader.into_config();
        assert_eq!(config.deductions.provident_fund_rate, dec("0.10"));
        assert_eq!(config.manager.per_subordinate_allowance, dec("75"));
        assert_eq!(config.manager.bonus_multiplier, dec("2"));
        assert_eq!(config.leave.annual_allowance, 20);
    }
}
