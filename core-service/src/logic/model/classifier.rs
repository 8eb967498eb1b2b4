//! Failure Classifier - StandardScaler + RandomForest
//!
//! Train một lần lúc startup, sau đó immutable (read-only inference).
//! Không có global singleton: caller giữ value và share qua Arc.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::forest::{ForestParams, RandomForest};
use super::scaler::StandardScaler;
use crate::logic::error::{MonitorError, MonitorResult};
use crate::logic::features::{LayoutInfo, SensorReading, FEATURE_COUNT};
use crate::logic::simulator::{LabeledSample, TelemetrySimulator};

// ============================================================================
// CONFIG
// ============================================================================

/// Default training set size per regime (1000 samples total)
pub const DEFAULT_SAMPLES_PER_REGIME: usize = 500;

/// Default hold-out fraction for evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub samples_per_regime: usize,
    /// 0.0 = no hold-out
    pub test_fraction: f64,
    pub forest: ForestParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            samples_per_regime: DEFAULT_SAMPLES_PER_REGIME,
            test_fraction: DEFAULT_TEST_FRACTION,
            forest: ForestParams::default(),
        }
    }
}

/// Accuracy on the training and hold-out sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub train_samples: usize,
    pub test_samples: usize,
    pub train_accuracy: f64,
    /// None when no hold-out set was used
    pub test_accuracy: Option<f64>,
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureClassifier {
    scaler: StandardScaler,
    forest: RandomForest,
    layout: LayoutInfo,
    trained_at: DateTime<Utc>,
}

impl FailureClassifier {
    /// Fit scaler + forest on the full dataset
    pub fn train(dataset: &[LabeledSample], params: &ForestParams) -> MonitorResult<Self> {
        validate_dataset(dataset)?;

        if params.n_estimators == 0 {
            return Err(MonitorError::TrainingFailure(
                "n_estimators must be at least 1".to_string(),
            ));
        }

        let raw: Vec<[f64; FEATURE_COUNT]> = dataset.iter().map(|(r, _)| r.to_features()).collect();
        let labels: Vec<u8> = dataset.iter().map(|(_, regime)| regime.label()).collect();

        let scaler = StandardScaler::fit(&raw);
        let scaled: Vec<[f64; FEATURE_COUNT]> = raw.iter().map(|f| scaler.transform(f)).collect();
        let forest = RandomForest::fit(&scaled, &labels, params);

        Ok(Self {
            scaler,
            forest,
            layout: LayoutInfo::current(),
            trained_at: Utc::now(),
        })
    }

    /// Shuffle, hold out `test_fraction`, train on the rest and score both sides
    pub fn train_with_report(
        dataset: &[LabeledSample],
        config: &TrainingConfig,
    ) -> MonitorResult<(Self, TrainingReport)> {
        if !(0.0..1.0).contains(&config.test_fraction) {
            return Err(MonitorError::TrainingFailure(format!(
                "test_fraction must be in [0, 1), got {}",
                config.test_fraction
            )));
        }

        let mut shuffled = dataset.to_vec();
        shuffled.shuffle(&mut StdRng::seed_from_u64(config.forest.seed));

        let test_len = (shuffled.len() as f64 * config.test_fraction).ceil() as usize;
        let (test, train) = shuffled.split_at(test_len.min(shuffled.len()));

        let classifier = Self::train(train, &config.forest)?;

        let report = TrainingReport {
            train_samples: train.len(),
            test_samples: test.len(),
            train_accuracy: classifier.accuracy(train),
            test_accuracy: if test.is_empty() { None } else { Some(classifier.accuracy(test)) },
        };

        log::info!(
            "Classifier trained: {} trees, train accuracy {:.3} ({} samples), test accuracy {}",
            classifier.n_estimators(),
            report.train_accuracy,
            report.train_samples,
            report
                .test_accuracy
                .map(|a| format!("{:.3} ({} samples)", a, report.test_samples))
                .unwrap_or_else(|| "n/a".to_string())
        );

        Ok((classifier, report))
    }

    /// Startup path: simulate a labeled dataset and train on it
    pub fn train_synthetic(config: &TrainingConfig) -> MonitorResult<(Self, TrainingReport)> {
        let mut simulator = TelemetrySimulator::seeded(config.forest.seed);
        let n = config.samples_per_regime;
        let dataset = simulator.generate_dataset(n, n);
        Self::train_with_report(&dataset, config)
    }

    // ========================================================================
    // INFERENCE
    // ========================================================================

    /// Probability of the failure class, in [0, 1]. Pure for a fixed state.
    pub fn predict(&self, reading: &SensorReading) -> f64 {
        let scaled = self.scaler.transform(&reading.to_features());
        let p = self.forest.predict_proba(&scaled);

        if p.is_finite() {
            p.clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// Probability scaled to 0-100
    pub fn failure_percent(&self, reading: &SensorReading) -> f64 {
        self.predict(reading) * 100.0
    }

    /// Fraction of samples whose hard label (p >= 0.5) matches the regime
    pub fn accuracy(&self, dataset: &[LabeledSample]) -> f64 {
        if dataset.is_empty() {
            return 0.0;
        }

        let correct = dataset
            .iter()
            .filter(|(reading, regime)| {
                let predicted = if self.predict(reading) >= 0.5 { 1 } else { 0 };
                predicted == regime.label()
            })
            .count();

        correct as f64 / dataset.len() as f64
    }

    // ========================================================================
    // METADATA
    // ========================================================================

    pub fn n_estimators(&self) -> usize {
        self.forest.n_estimators()
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.layout
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// Integrity check for a deserialized classifier
    pub fn validate(&self) -> MonitorResult<()> {
        if !self.layout.is_compatible() {
            let current = LayoutInfo::current();
            return Err(MonitorError::LayoutMismatch {
                expected_version: current.version,
                expected_hash: current.hash,
                actual_version: self.layout.version,
                actual_hash: self.layout.hash,
            });
        }

        let scaler_ok = self.scaler.mean.iter().all(|v| v.is_finite())
            && self.scaler.scale.iter().all(|v| v.is_finite() && *v > 0.0);

        if !scaler_ok || !self.forest.is_well_formed() {
            return Err(MonitorError::TrainingFailure("persisted model is malformed".to_string()));
        }

        Ok(())
    }
}

/// Both classes present, every sample finite
fn validate_dataset(dataset: &[LabeledSample]) -> MonitorResult<()> {
    if dataset.is_empty() {
        return Err(MonitorError::TrainingFailure("dataset is empty".to_string()));
    }

    if let Some(i) = dataset.iter().position(|(r, _)| !r.is_finite()) {
        return Err(MonitorError::TrainingFailure(format!("sample {} has a non-finite value", i)));
    }

    let failures = dataset.iter().filter(|(_, regime)| regime.label() == 1).count();
    if failures == 0 || failures == dataset.len() {
        return Err(MonitorError::TrainingFailure(
            "dataset must contain both normal and failure samples".to_string(),
        ));
    }

    Ok(())
}
