//! Features Module - Sensor Channels & Input Validation
//!
//! Định nghĩa layout 3 channels (temperature, vibration, pressure)
//! và validate raw input trước khi đưa vào classifier.

pub mod layout;
pub mod reading;

// Re-export common types
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use reading::{round_to, SensorInput, SensorReading};
