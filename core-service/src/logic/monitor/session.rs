//! Monitoring Session
//!
//! Mỗi tick: reading → classifier → resolver → history → snapshot.
//! Một writer (scheduler gọi `tick`), nhiều reader đồng thời.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use super::snapshot::{MachineIdentity, MachineSnapshot};
use crate::logic::config::MonitorConfig;
use crate::logic::error::MonitorResult;
use crate::logic::features::{SensorInput, SensorReading};
use crate::logic::history::{HistoryRecord, HistoryStore};
use crate::logic::model::{FailureClassifier, PredictionResult, StatusResolver};
use crate::logic::simulator::TelemetrySimulator;

/// Seconds-since-epoch source
pub type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

fn system_clock() -> Clock {
    Box::new(|| Utc::now().timestamp())
}

// ============================================================================
// SESSION
// ============================================================================

pub struct MonitoringSession {
    identity: MachineIdentity,
    classifier: Arc<FailureClassifier>,
    resolver: StatusResolver,
    simulator: Mutex<TelemetrySimulator>,
    /// Live reading submitted by a caller, consumed by the next tick
    pending: Mutex<Option<SensorReading>>,
    /// Also the source of the latest snapshot
    history: RwLock<HistoryStore>,
    default_limit: usize,
    clock: Clock,
}

impl MonitoringSession {
    pub fn new(classifier: Arc<FailureClassifier>, config: &MonitorConfig) -> MonitorResult<Self> {
        config.validate()?;

        Ok(Self {
            identity: MachineIdentity {
                machine_id: config.machine_id.clone(),
                machine_name: config.machine_name.clone(),
            },
            classifier,
            resolver: StatusResolver::with_thresholds(config.thresholds)?,
            simulator: Mutex::new(TelemetrySimulator::from_entropy()),
            pending: Mutex::new(None),
            history: RwLock::new(HistoryStore::new(config.history_capacity)),
            default_limit: config.default_history_limit,
            clock: system_clock(),
        })
    }

    /// Replace the live-feed simulator (seeded one for tests)
    pub fn with_simulator(mut self, simulator: TelemetrySimulator) -> Self {
        self.simulator = Mutex::new(simulator);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    // ========================================================================
    // WRITER
    // ========================================================================

    /// One sampling-and-scoring cycle.
    ///
    /// The write lock is held from reading acquisition to append, so readers
    /// see either the previous state or the complete new record.
    pub fn tick(&self) -> MachineSnapshot {
        let mut history = self.history.write();

        let injected = self.pending.lock().take();
        let reading = match injected {
            Some(reading) => reading,
            None => self.simulator.lock().live_sample(),
        };

        let record = HistoryRecord {
            reading,
            result: self.predict_reading(&reading),
            timestamp: (self.clock)(),
        };
        history.append(record);

        log::debug!(
            "Tick: {:.1}°C {:.2}m/s² {:.1}psi -> {:.1}% {} ({}){}",
            reading.temperature,
            reading.vibration,
            reading.pressure,
            record.result.failure_probability,
            record.result.status,
            record.result.alert_level,
            if injected.is_some() { " [live input]" } else { "" }
        );

        MachineSnapshot::from_record(&self.identity, &record)
    }

    /// Queue a live reading for the next tick (latest submission wins)
    pub fn submit_reading(&self, input: &SensorInput) -> MonitorResult<()> {
        let reading = input.validate().map_err(|e| {
            log::debug!("Rejected live input: {}", e);
            e
        })?;

        *self.pending.lock() = Some(reading);
        Ok(())
    }

    // ========================================================================
    // READERS
    // ========================================================================

    /// One-off what-if prediction; history is not touched
    pub fn manual_predict(&self, input: &SensorInput) -> MonitorResult<PredictionResult> {
        let reading = input.validate().map_err(|e| {
            log::debug!("Rejected prediction input: {}", e);
            e
        })?;

        Ok(self.predict_reading(&reading))
    }

    /// Classify + resolve an already validated reading
    pub fn predict_reading(&self, reading: &SensorReading) -> PredictionResult {
        self.resolver.evaluate(self.classifier.failure_percent(reading))
    }

    /// Latest snapshot, None before the first tick
    pub fn current_snapshot(&self) -> Option<MachineSnapshot> {
        self.history
            .read()
            .latest()
            .map(|record| MachineSnapshot::from_record(&self.identity, record))
    }

    /// Up to `limit` most recent records, oldest first
    pub fn recent(&self, limit: usize) -> Vec<HistoryRecord> {
        self.history.read().recent(limit)
    }

    /// `recent` with the configured default limit
    pub fn recent_default(&self) -> Vec<HistoryRecord> {
        self.recent(self.default_limit)
    }

    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.read().capacity()
    }

    pub fn identity(&self) -> &MachineIdentity {
        &self.identity
    }

    pub fn classifier(&self) -> &Arc<FailureClassifier> {
        &self.classifier
    }
}
