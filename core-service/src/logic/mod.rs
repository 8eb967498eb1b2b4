//! Logic Module - Business Logic & Engines
//!
//! Chứa các engines xử lý: Simulator, Model, History, Monitor.
//!
//! ## Architecture
//! - `features/` - Sensor channel layout + input validation
//! - `simulator` - Synthetic telemetry (training + live feed)
//! - `model/` - Failure classifier, thresholds, persistence
//! - `history` - Bounded record store
//! - `monitor/` - Monitoring session (tick + queries)

pub mod config;
pub mod error;
pub mod features;
pub mod history;
pub mod model;
pub mod monitor;
pub mod simulator;

#[cfg(test)]
pub(crate) mod test_support;
