//! Model Module - Failure Scoring Engine
//!
//! Tách logic inference khỏi data collection.
//! - `scaler` / `tree` / `forest` - thuật toán
//! - `classifier` - train + predict
//! - `threshold` - probability → status / alert level
//! - `storage` - save / load model

pub mod classifier;
pub mod forest;
pub mod scaler;
pub mod storage;
pub mod threshold;
pub mod tree;


// Re-export common types
pub use classifier::{FailureClassifier, TrainingConfig, TrainingReport};
pub use forest::ForestParams;
pub use storage::{default_model_path, load_model, load_or_train, save_model};
pub use threshold::{AlertLevel, MachineStatus, PredictionResult, StatusResolver, ThresholdConfig};
