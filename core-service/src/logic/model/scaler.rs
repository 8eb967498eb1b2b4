//! Standard Scaler - zero mean / unit variance per feature

use serde::{Deserialize, Serialize};

use crate::logic::features::FEATURE_COUNT;

/// Normalization parameters learned from training data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: [f64; FEATURE_COUNT],
    pub scale: [f64; FEATURE_COUNT],
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self {
            mean: [0.0; FEATURE_COUNT],
            scale: [1.0; FEATURE_COUNT],
        }
    }
}

impl StandardScaler {
    /// Fit mean and population std. A constant feature gets scale 1.0.
    pub fn fit(samples: &[[f64; FEATURE_COUNT]]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let n = samples.len() as f64;
        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];

        for i in 0..FEATURE_COUNT {
            mean[i] = samples.iter().map(|s| s[i]).sum::<f64>() / n;

            let variance = samples.iter()
                .map(|s| (s[i] - mean[i]).powi(2))
                .sum::<f64>() / n;
            let std = variance.sqrt();

            if std > 1e-12 && std.is_finite() {
                scale[i] = std;
            }
        }

        Self { mean, scale }
    }

    pub fn transform(&self, features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (features[i] - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform() {
        let samples = vec![[1.0, 10.0, 5.0], [3.0, 30.0, 5.0]];
        let scaler = StandardScaler::fit(&samples);

        assert_eq!(scaler.mean, [2.0, 20.0, 5.0]);
        assert_eq!(scaler.scale, [1.0, 10.0, 1.0]);

        let t = scaler.transform(&[3.0, 10.0, 5.0]);
        assert_eq!(t, [1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_empty_is_identity() {
        let scaler = StandardScaler::fit(&[]);
        assert_eq!(scaler.transform(&[4.0, 5.0, 6.0]), [4.0, 5.0, 6.0]);
    }
}
