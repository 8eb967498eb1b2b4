//! Machine Snapshot - latest history record reshaped for callers

use serde::{Deserialize, Serialize};

use crate::logic::features::SensorReading;
use crate::logic::history::HistoryRecord;
use crate::logic::model::{AlertLevel, MachineStatus};

/// Identity of the monitored machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineIdentity {
    pub machine_id: String,
    pub machine_name: String,
}

/// Current machine state. Derived from the newest HistoryRecord, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub machine_id: String,
    pub machine_name: String,
    pub current_status: MachineStatus,
    pub alert_level: AlertLevel,
    pub failure_probability: f64,
    pub sensor_readings: SensorReading,
    pub last_updated: i64,
}

impl MachineSnapshot {
    pub fn from_record(identity: &MachineIdentity, record: &HistoryRecord) -> Self {
        Self {
            machine_id: identity.machine_id.clone(),
            machine_name: identity.machine_name.clone(),
            current_status: record.result.status,
            alert_level: record.result.alert_level,
            failure_probability: record.result.failure_probability,
            sensor_readings: record.reading,
            last_updated: record.timestamp,
        }
    }
}
