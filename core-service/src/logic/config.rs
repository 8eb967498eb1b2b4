//! Configuration module

use std::path::PathBuf;

use crate::constants::{
    env_parse, env_string, DEFAULT_MACHINE_ID, DEFAULT_MACHINE_NAME, DEFAULT_TICK_INTERVAL,
    DEFAULT_TRAINING_SAMPLES,
};
use crate::logic::error::{MonitorError, MonitorResult};
use crate::logic::history::{DEFAULT_HISTORY_CAPACITY, DEFAULT_RECENT_LIMIT};
use crate::logic::model::{
    default_model_path, ForestParams, StatusResolver, ThresholdConfig, TrainingConfig,
};

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub machine_id: String,

    pub machine_name: String,

    /// Max records kept in history
    pub history_capacity: usize,

    /// `limit` used when a trend query does not give one
    pub default_history_limit: usize,

    /// Scheduler cadence; the session itself never reads this
    pub tick_interval_secs: u64,

    /// Persisted classifier location
    pub model_path: PathBuf,

    pub training: TrainingConfig,

    pub thresholds: ThresholdConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            machine_id: DEFAULT_MACHINE_ID.to_string(),
            machine_name: DEFAULT_MACHINE_NAME.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_history_limit: DEFAULT_RECENT_LIMIT,
            tick_interval_secs: DEFAULT_TICK_INTERVAL,
            model_path: default_model_path(),
            training: TrainingConfig::default(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let forest_defaults = ForestParams::default();

        let total_samples = env_parse("TRAINING_SAMPLES", DEFAULT_TRAINING_SAMPLES);

        Self {
            machine_id: env_string("MACHINE_ID", DEFAULT_MACHINE_ID),

            machine_name: env_string("MACHINE_NAME", DEFAULT_MACHINE_NAME),

            history_capacity: env_parse("HISTORY_CAPACITY", defaults.history_capacity),

            default_history_limit: env_parse(
                "HISTORY_DEFAULT_LIMIT",
                defaults.default_history_limit,
            ),

            tick_interval_secs: env_parse("TICK_INTERVAL_SECS", defaults.tick_interval_secs),

            model_path: std::env::var("MODEL_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            training: TrainingConfig {
                samples_per_regime: total_samples / 2,
                forest: ForestParams {
                    n_estimators: env_parse("FOREST_ESTIMATORS", forest_defaults.n_estimators),
                    seed: env_parse("TRAINING_SEED", forest_defaults.seed),
                    ..forest_defaults
                },
                ..defaults.training
            },

            thresholds: ThresholdConfig {
                warning_threshold: env_parse(
                    "WARNING_THRESHOLD",
                    defaults.thresholds.warning_threshold,
                ),
                critical_threshold: env_parse(
                    "CRITICAL_THRESHOLD",
                    defaults.thresholds.critical_threshold,
                ),
            },
        }
    }

    pub fn validate(&self) -> MonitorResult<()> {
        if self.history_capacity == 0 {
            return Err(MonitorError::InvalidConfig(
                "history capacity must be at least 1".to_string(),
            ));
        }
        if self.default_history_limit == 0 {
            return Err(MonitorError::InvalidConfig(
                "default history limit must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_secs == 0 {
            return Err(MonitorError::InvalidConfig(
                "tick interval must be at least 1 second".to_string(),
            ));
        }
        if self.training.forest.n_estimators == 0 {
            return Err(MonitorError::InvalidConfig(
                "forest needs at least 1 estimator".to_string(),
            ));
        }
        if self.training.samples_per_regime < 2 {
            return Err(MonitorError::InvalidConfig(
                "training needs at least 2 samples per regime".to_string(),
            ));
        }
        StatusResolver::with_thresholds(self.thresholds)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.machine_id, "MACHINE-001");
        assert_eq!(config.history_capacity, 100);
        assert_eq!(config.default_history_limit, 20);
        assert_eq!(config.training.samples_per_regime, 500);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = MonitorConfig { history_capacity: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(MonitorError::InvalidConfig(_))));

        let config = MonitorConfig { default_history_limit: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = MonitorConfig { tick_interval_secs: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let mut config = MonitorConfig::default();
        config.training.samples_per_regime = 1;
        assert!(config.validate().is_err());
    }
}
