//! Machine Monitor Core
//!
//! Failure scoring for one simulated machine: synthetic telemetry, a random
//! forest failure classifier, status thresholds and a bounded history.
//!
//! ```text
//! Simulator → SensorReading → FailureClassifier → probability
//!           → StatusResolver → (status, alert level)
//!           → HistoryStore → MachineSnapshot
//! ```

pub mod constants;
pub mod logic;

pub use logic::config::MonitorConfig;
pub use logic::error::{MonitorError, MonitorResult};
pub use logic::features::{SensorInput, SensorReading};
pub use logic::history::{HistoryRecord, HistoryStore};
pub use logic::model::{
    AlertLevel, FailureClassifier, MachineStatus, PredictionResult, StatusResolver, TrainingConfig,
};
pub use logic::monitor::{MachineSnapshot, MonitoringSession};
pub use logic::simulator::{Regime, TelemetrySimulator};
