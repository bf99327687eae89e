//! Analytics batch configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::analytics::{DEFAULT_PROBE_CONCURRENCY, DEFAULT_ROW_CAP};

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Maximum rows loaded per table
    #[serde(default = "default_row_cap")]
    pub row_cap: usize,

    /// Logical tables loaded in parallel during a probe
    #[serde(default = "default_probe_concurrency")]
    pub probe_concurrency: usize,
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.row_cap == 0 {
            return Err(ValidationError::InvalidRowCap);
        }
        if self.probe_concurrency == 0 || self.probe_concurrency > 16 {
            return Err(ValidationError::InvalidProbeConcurrency);
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            row_cap: default_row_cap(),
            probe_concurrency: default_probe_concurrency(),
        }
    }
}

fn default_row_cap() -> usize {
    DEFAULT_ROW_CAP
}

fn default_probe_concurrency() -> usize {
    DEFAULT_PROBE_CONCURRENCY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.row_cap, 100_000);
        assert_eq!(config.probe_concurrency, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let config = AnalyticsConfig {
            row_cap: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRowCap));

        let config = AnalyticsConfig {
            probe_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidProbeConcurrency));
    }
}
