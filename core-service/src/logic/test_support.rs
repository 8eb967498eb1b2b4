//! Shared fixtures for unit tests
//!
//! Forest được train một lần cho cả test binary.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::logic::model::{FailureClassifier, TrainingConfig};

/// Classifier trained with the default config (seed 42, 100 trees)
pub static TRAINED: Lazy<Arc<FailureClassifier>> = Lazy::new(|| {
    let (classifier, _) = FailureClassifier::train_synthetic(&TrainingConfig::default())
        .expect("training on synthetic data must succeed");
    Arc::new(classifier)
});

pub fn trained_classifier() -> Arc<FailureClassifier> {
    Arc::clone(&*TRAINED)
}
