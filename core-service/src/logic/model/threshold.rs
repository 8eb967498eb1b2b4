//! Status Thresholds
//!
//! Map failure probability (0-100) → (MachineStatus, AlertLevel).
//! Ngưỡng là data (bảng band có thứ tự), không phải if/else lồng nhau.

use serde::{Deserialize, Serialize};

use crate::logic::error::{MonitorError, MonitorResult};
use crate::logic::features::round_to;

// ============================================================================
// CONSTANTS
// ============================================================================

/// At or above this = At Risk
pub const WARNING_THRESHOLD: f64 = 30.0;

/// At or above this = Failure
pub const CRITICAL_THRESHOLD: f64 = 70.0;

// ============================================================================
// STATUS TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineStatus {
    Healthy,
    #[serde(rename = "At Risk")]
    AtRisk,
    Failure,
}

impl MachineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Healthy => "Healthy",
            MachineStatus::AtRisk => "At Risk",
            MachineStatus::Failure => "Failure",
        }
    }
}

impl std::fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Normal,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "normal",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification output exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 0.0 - 100.0, one decimal
    pub failure_probability: f64,
    pub status: MachineStatus,
    pub alert_level: AlertLevel,
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub warning_threshold: f64,
    pub critical_threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            warning_threshold: WARNING_THRESHOLD,
            critical_threshold: CRITICAL_THRESHOLD,
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// One row of the table: probabilities below `upper_bound` land here
#[derive(Debug, Clone, Copy, PartialEq)]
struct StatusBand {
    upper_bound: f64,
    status: MachineStatus,
    alert_level: AlertLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusResolver {
    bands: [StatusBand; 3],
}

impl Default for StatusResolver {
    fn default() -> Self {
        Self::from_bounds(WARNING_THRESHOLD, CRITICAL_THRESHOLD)
    }
}

impl StatusResolver {
    /// Custom thresholds; both finite and strictly increasing
    pub fn with_thresholds(config: ThresholdConfig) -> MonitorResult<Self> {
        let ThresholdConfig { warning_threshold, critical_threshold } = config;

        if !warning_threshold.is_finite() || !critical_threshold.is_finite() {
            return Err(MonitorError::InvalidConfig("thresholds must be finite".to_string()));
        }
        if warning_threshold >= critical_threshold {
            return Err(MonitorError::InvalidConfig(format!(
                "warning threshold {} must be below critical threshold {}",
                warning_threshold, critical_threshold
            )));
        }

        Ok(Self::from_bounds(warning_threshold, critical_threshold))
    }

    fn from_bounds(warning: f64, critical: f64) -> Self {
        Self {
            bands: [
                StatusBand {
                    upper_bound: warning,
                    status: MachineStatus::Healthy,
                    alert_level: AlertLevel::Normal,
                },
                StatusBand {
                    upper_bound: critical,
                    status: MachineStatus::AtRisk,
                    alert_level: AlertLevel::Warning,
                },
                StatusBand {
                    upper_bound: f64::INFINITY,
                    status: MachineStatus::Failure,
                    alert_level: AlertLevel::Critical,
                },
            ],
        }
    }

    /// Lower bound inclusive: exactly 30 → At Risk, exactly 70 → Failure.
    /// NaN and +inf fall through to the most severe band.
    pub fn resolve(&self, probability: f64) -> (MachineStatus, AlertLevel) {
        let band = self
            .bands
            .iter()
            .find(|b| probability < b.upper_bound)
            .unwrap_or(&self.bands[self.bands.len() - 1]);

        (band.status, band.alert_level)
    }

    /// Round to one decimal, then resolve on the rounded value so the exposed
    /// probability and status always agree
    pub fn evaluate(&self, probability_percent: f64) -> PredictionResult {
        let failure_probability = round_to(probability_percent.clamp(0.0, 100.0), 1);
        let (status, alert_level) = self.resolve(failure_probability);

        PredictionResult { failure_probability, status, alert_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        let r = StatusResolver::default();

        assert_eq!(r.resolve(0.0), (MachineStatus::Healthy, AlertLevel::Normal));
        assert_eq!(r.resolve(29.99), (MachineStatus::Healthy, AlertLevel::Normal));
        assert_eq!(r.resolve(50.0), (MachineStatus::AtRisk, AlertLevel::Warning));
        assert_eq!(r.resolve(69.99), (MachineStatus::AtRisk, AlertLevel::Warning));
        assert_eq!(r.resolve(100.0), (MachineStatus::Failure, AlertLevel::Critical));
    }

    #[test]
    fn test_boundaries_belong_to_higher_band() {
        let r = StatusResolver::default();

        assert_eq!(r.resolve(30.0), (MachineStatus::AtRisk, AlertLevel::Warning));
        assert_eq!(r.resolve(70.0), (MachineStatus::Failure, AlertLevel::Critical));
    }

    #[test]
    fn test_total_over_range() {
        let r = StatusResolver::default();

        // Every tenth of a percent maps to exactly one band, and repeat calls agree
        for i in 0..=1000 {
            let p = i as f64 / 10.0;
            let first = r.resolve(p);
            assert_eq!(first, r.resolve(p));

            let expected = if p < 30.0 {
                MachineStatus::Healthy
            } else if p < 70.0 {
                MachineStatus::AtRisk
            } else {
                MachineStatus::Failure
            };
            assert_eq!(first.0, expected, "p = {}", p);
        }
    }

    #[test]
    fn test_nan_is_most_severe() {
        let r = StatusResolver::default();
        assert_eq!(r.resolve(f64::NAN).1, AlertLevel::Critical);
        assert_eq!(r.resolve(f64::INFINITY).1, AlertLevel::Critical);
    }

    #[test]
    fn test_evaluate_rounds_before_resolving() {
        let r = StatusResolver::default();

        let result = r.evaluate(29.96);
        assert_eq!(result.failure_probability, 30.0);
        assert_eq!(result.status, MachineStatus::AtRisk);

        let result = r.evaluate(69.94);
        assert_eq!(result.failure_probability, 69.9);
        assert_eq!(result.alert_level, AlertLevel::Warning);
    }

    #[test]
    fn test_custom_thresholds() {
        let r = StatusResolver::with_thresholds(ThresholdConfig {
            warning_threshold: 10.0,
            critical_threshold: 50.0,
        })
        .unwrap();
        assert_eq!(r.resolve(10.0).0, MachineStatus::AtRisk);
        assert_eq!(r.resolve(49.9).0, MachineStatus::AtRisk);
        assert_eq!(r.resolve(50.0).0, MachineStatus::Failure);

        assert!(StatusResolver::with_thresholds(ThresholdConfig {
            warning_threshold: 70.0,
            critical_threshold: 30.0,
        })
        .is_err());
        assert!(StatusResolver::with_thresholds(ThresholdConfig {
            warning_threshold: f64::NAN,
            critical_threshold: 30.0,
        })
        .is_err());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&MachineStatus::AtRisk).unwrap(), "\"At Risk\"");
        assert_eq!(serde_json::to_string(&AlertLevel::Critical).unwrap(), "\"critical\"");
    }
}
