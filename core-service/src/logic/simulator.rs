//! Telemetry Simulator
//!
//! Sinh dữ liệu sensor giả lập cho 2 mục đích:
//! 1. Training: Gaussian draws cho regime normal / failure
//! 2. Live feed: uniform draws theo 3 condition (normal / warning / critical)
//!
//! Seedable để test reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::features::SensorReading;

// ============================================================================
// REGIMES (training labels)
// ============================================================================

/// Ground-truth class used only for training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Normal,
    Failure,
}

impl Regime {
    /// 0 = normal, 1 = failure
    pub fn label(&self) -> u8 {
        match self {
            Regime::Normal => 0,
            Regime::Failure => 1,
        }
    }
}

/// Labeled training sample
pub type LabeledSample = (SensorReading, Regime);

/// Per-channel Gaussian parameters (mean, std)
#[derive(Debug, Clone, Copy)]
struct RegimeProfile {
    temperature: (f64, f64),
    vibration: (f64, f64),
    pressure: (f64, f64),
}

const NORMAL_PROFILE: RegimeProfile = RegimeProfile {
    temperature: (70.0, 10.0),
    vibration: (0.2, 0.05),
    pressure: (15.0, 2.0),
};

// Low pressure = leak
const FAILURE_PROFILE: RegimeProfile = RegimeProfile {
    temperature: (90.0, 15.0),
    vibration: (0.8, 0.2),
    pressure: (8.0, 3.0),
};

impl Regime {
    fn profile(&self) -> &'static RegimeProfile {
        match self {
            Regime::Normal => &NORMAL_PROFILE,
            Regime::Failure => &FAILURE_PROFILE,
        }
    }
}

// ============================================================================
// LIVE CONDITIONS
// ============================================================================

/// Condition picked by the live feed for one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveCondition {
    Normal,
    Warning,
    Critical,
}

impl LiveCondition {
    pub const ALL: [LiveCondition; 3] = [
        LiveCondition::Normal,
        LiveCondition::Warning,
        LiveCondition::Critical,
    ];

    /// Uniform bands: (temperature, vibration, pressure)
    fn bands(&self) -> [(f64, f64); 3] {
        match self {
            LiveCondition::Normal => [(65.0, 75.0), (0.1, 0.3), (13.0, 17.0)],
            LiveCondition::Warning => [(75.0, 85.0), (0.3, 0.6), (10.0, 13.0)],
            LiveCondition::Critical => [(85.0, 95.0), (0.6, 1.0), (5.0, 10.0)],
        }
    }
}

// ============================================================================
// SIMULATOR
// ============================================================================

pub struct TelemetrySimulator {
    rng: StdRng,
}

impl TelemetrySimulator {
    /// Reproducible simulator
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Simulator seeded from OS entropy (live use)
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// One reading drawn from the regime's distribution
    pub fn generate_sample(&mut self, regime: Regime) -> SensorReading {
        let profile = regime.profile();
        SensorReading {
            temperature: self.gaussian(profile.temperature),
            vibration: self.gaussian(profile.vibration),
            pressure: self.gaussian(profile.pressure),
        }
    }

    /// Labeled training set: n_normal + n_failure draws, shuffled
    pub fn generate_dataset(&mut self, n_normal: usize, n_failure: usize) -> Vec<LabeledSample> {
        let mut dataset = Vec::with_capacity(n_normal + n_failure);

        for _ in 0..n_normal {
            dataset.push((self.generate_sample(Regime::Normal), Regime::Normal));
        }
        for _ in 0..n_failure {
            dataset.push((self.generate_sample(Regime::Failure), Regime::Failure));
        }

        dataset.shuffle(&mut self.rng);
        dataset
    }

    /// Live reading: random condition, uniform within its band, display-rounded
    pub fn live_sample(&mut self) -> SensorReading {
        let condition = LiveCondition::ALL[self.rng.gen_range(0..LiveCondition::ALL.len())];
        self.live_sample_for(condition)
    }

    /// Live reading for a fixed condition
    pub fn live_sample_for(&mut self, condition: LiveCondition) -> SensorReading {
        let [temperature, vibration, pressure] = condition.bands();
        SensorReading {
            temperature: self.rng.gen_range(temperature.0..temperature.1),
            vibration: self.rng.gen_range(vibration.0..vibration.1),
            pressure: self.rng.gen_range(pressure.0..pressure.1),
        }
        .rounded()
    }

    /// Box-Muller transform
    fn gaussian(&mut self, (mean, std): (f64, f64)) -> f64 {
        // u1 in (0, 1) so ln() stays finite
        let u1: f64 = self.rng.gen_range(f64::EPSILON..1.0);
        let u2: f64 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std * z
    }
}

impl Default for TelemetrySimulator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(values: impl Iterator<Item = f64>) -> f64 {
        let v: Vec<f64> = values.collect();
        v.iter().sum::<f64>() / v.len() as f64
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = TelemetrySimulator::seeded(7);
        let mut b = TelemetrySimulator::seeded(7);

        for _ in 0..20 {
            assert_eq!(a.generate_sample(Regime::Failure), b.generate_sample(Regime::Failure));
            assert_eq!(a.live_sample(), b.live_sample());
        }
    }

    #[test]
    fn test_regime_centers() {
        let mut sim = TelemetrySimulator::seeded(42);
        let normal: Vec<_> = (0..2000).map(|_| sim.generate_sample(Regime::Normal)).collect();
        let failure: Vec<_> = (0..2000).map(|_| sim.generate_sample(Regime::Failure)).collect();

        assert!((mean(normal.iter().map(|r| r.temperature)) - 70.0).abs() < 1.5);
        assert!((mean(normal.iter().map(|r| r.vibration)) - 0.2).abs() < 0.01);
        assert!((mean(normal.iter().map(|r| r.pressure)) - 15.0).abs() < 0.5);

        assert!((mean(failure.iter().map(|r| r.temperature)) - 90.0).abs() < 2.0);
        assert!((mean(failure.iter().map(|r| r.vibration)) - 0.8).abs() < 0.03);
        assert!((mean(failure.iter().map(|r| r.pressure)) - 8.0).abs() < 0.5);

        assert!(normal.iter().chain(failure.iter()).all(|r| r.is_finite()));
    }

    #[test]
    fn test_dataset_labels() {
        let mut sim = TelemetrySimulator::seeded(1);
        let data = sim.generate_dataset(30, 20);

        assert_eq!(data.len(), 50);
        assert_eq!(data.iter().filter(|(_, r)| *r == Regime::Normal).count(), 30);
        assert_eq!(data.iter().filter(|(_, r)| *r == Regime::Failure).count(), 20);
    }

    #[test]
    fn test_live_sample_within_bands() {
        let mut sim = TelemetrySimulator::seeded(3);
        for condition in LiveCondition::ALL {
            let [t, v, p] = condition.bands();
            for _ in 0..50 {
                let r = sim.live_sample_for(condition);
                // Rounding can land exactly on the upper edge
                assert!(r.temperature >= t.0 && r.temperature <= t.1);
                assert!(r.vibration >= v.0 && r.vibration <= v.1);
                assert!(r.pressure >= p.0 && r.pressure <= p.1);
            }
        }
    }

    #[test]
    fn test_regime_labels() {
        assert_eq!(Regime::Normal.label(), 0);
        assert_eq!(Regime::Failure.label(), 1);
    }
}
