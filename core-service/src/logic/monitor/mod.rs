//! Monitor Module - orchestrates one machine's scoring cycle
//!
//! - `session.rs`: `MonitoringSession` (tick, manual_predict, queries)
//! - `snapshot.rs`: `MachineSnapshot`, `MachineIdentity`

pub mod session;
pub mod snapshot;
#[cfg(test)]
mod tests;

pub use session::{Clock, MonitoringSession};
pub use snapshot::{MachineIdentity, MachineSnapshot};
