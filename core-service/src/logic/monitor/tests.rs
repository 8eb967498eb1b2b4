//! Scenario tests for the monitoring session

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::thread;

use serde_json::json;

use super::MonitoringSession;
use crate::logic::config::MonitorConfig;
use crate::logic::error::MonitorError;
use crate::logic::features::{SensorInput, SensorReading};
use crate::logic::model::{AlertLevel, MachineStatus, StatusResolver};
use crate::logic::simulator::TelemetrySimulator;
use crate::logic::test_support::trained_classifier;

fn config(capacity: usize) -> MonitorConfig {
    MonitorConfig {
        history_capacity: capacity,
        ..Default::default()
    }
}

/// Session with a seeded live feed and a clock that advances 5s per call
fn session(capacity: usize, seed: u64) -> MonitoringSession {
    let now = Arc::new(AtomicI64::new(1_700_000_000));
    MonitoringSession::new(trained_classifier(), &config(capacity))
        .unwrap()
        .with_simulator(TelemetrySimulator::seeded(seed))
        .with_clock(Box::new(move || now.fetch_add(5, Ordering::SeqCst)))
}

#[test]
fn test_no_snapshot_before_first_tick() {
    let s = session(10, 1);
    assert!(s.current_snapshot().is_none());
    assert!(s.recent(20).is_empty());
}

#[test]
fn test_tick_publishes_snapshot() {
    let s = session(10, 1);
    let snapshot = s.tick();

    assert_eq!(snapshot.machine_id, "MACHINE-001");
    assert_eq!(snapshot.machine_name, "Production Line A");
    assert_eq!(snapshot.last_updated, 1_700_000_000);
    assert_eq!(s.current_snapshot(), Some(snapshot.clone()));

    // Idempotent read
    assert_eq!(s.current_snapshot(), s.current_snapshot());
    assert_eq!(s.history_len(), 1);

    let record = s.recent(1)[0];
    assert_eq!(record.reading, snapshot.sensor_readings);
    assert_eq!(record.result.failure_probability, snapshot.failure_probability);
}

#[test]
fn test_session_accessors() {
    let s = session(10, 1);

    assert_eq!(s.identity().machine_id, "MACHINE-001");
    assert_eq!(s.identity().machine_name, "Production Line A");
    assert_eq!(s.history_capacity(), 10);
    assert!(Arc::ptr_eq(s.classifier(), &trained_classifier()));
}

#[test]
fn test_snapshot_status_follows_probability() {
    let s = session(50, 3);
    let resolver = StatusResolver::default();

    for _ in 0..30 {
        let snapshot = s.tick();
        assert!((0.0..=100.0).contains(&snapshot.failure_probability));
        assert_eq!(
            resolver.resolve(snapshot.failure_probability),
            (snapshot.current_status, snapshot.alert_level)
        );
    }
}

#[test]
fn test_history_wraps_at_capacity() {
    let capacity = 10;
    let n = 25;
    let s = session(capacity, 7);
    let mut expected = TelemetrySimulator::seeded(7);

    let mut last_reading = None;
    for _ in 0..n {
        s.tick();
        last_reading = Some(expected.live_sample());
    }

    let records = s.recent(n);
    assert_eq!(records.len(), capacity);
    assert_eq!(records.last().map(|r| r.reading), last_reading);

    // Oldest first, oldest evicted
    let timestamps: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
    assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(timestamps[0], 1_700_000_000 + 5 * (n - capacity) as i64);
}

#[test]
fn test_recent_default_limit() {
    let s = session(100, 2);
    for _ in 0..30 {
        s.tick();
    }
    assert_eq!(s.recent_default().len(), 20);
    assert_eq!(s.recent(5).len(), 5);
    assert_eq!(s.recent(500).len(), 30);
}

#[test]
fn test_manual_predict_normal_reading() {
    let s = session(10, 1);
    let result = s.manual_predict(&SensorInput::new(72.5, 0.18, 14.8)).unwrap();

    assert!(result.failure_probability < 30.0);
    assert_eq!(result.status, MachineStatus::Healthy);
    assert_eq!(result.alert_level, AlertLevel::Normal);
}

#[test]
fn test_manual_predict_failure_reading() {
    let s = session(10, 1);
    let result = s.manual_predict(&SensorInput::new(90.0, 0.8, 8.0)).unwrap();

    assert!(result.failure_probability > 70.0);
    assert_eq!(result.status, MachineStatus::Failure);
    assert_eq!(result.alert_level, AlertLevel::Critical);
}

#[test]
fn test_manual_predict_missing_field_leaves_history_alone() {
    let s = session(10, 1);
    s.tick();
    let before = s.recent(10);

    let input = SensorInput::from_json(&json!({"temperature": 85.0, "vibration": 0.6})).unwrap();
    match s.manual_predict(&input) {
        Err(e @ MonitorError::InvalidInput { .. }) => assert!(e.is_client_error()),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }

    assert_eq!(s.recent(10), before);
    assert_eq!(s.history_len(), 1);
}

#[test]
fn test_manual_predict_does_not_record() {
    let s = session(10, 1);
    for _ in 0..5 {
        s.manual_predict(&SensorInput::new(80.0, 0.4, 12.0)).unwrap();
    }
    assert_eq!(s.history_len(), 0);
    assert!(s.current_snapshot().is_none());
}

#[test]
fn test_submitted_reading_used_by_next_tick() {
    let s = session(10, 1);
    s.submit_reading(&SensorInput::new(90.0, 0.8, 8.0)).unwrap();

    let snapshot = s.tick();
    assert_eq!(snapshot.sensor_readings, SensorReading::new(90.0, 0.8, 8.0).unwrap());
    assert_eq!(snapshot.current_status, MachineStatus::Failure);

    // Consumed: next tick goes back to the simulator
    let next = s.tick();
    assert_ne!(next.last_updated, snapshot.last_updated);
    assert_eq!(s.history_len(), 2);
}

#[test]
fn test_submit_invalid_reading_rejected() {
    let s = session(10, 1);
    let body = json!({"temperature": "n/a", "vibration": 0.2, "pressure": 15});
    let input = SensorInput::from_json(&body).unwrap();

    assert!(matches!(
        s.submit_reading(&input),
        Err(MonitorError::InvalidInput { field: "temperature", .. })
    ));
    assert_eq!(s.history_len(), 0);
}

#[test]
fn test_invalid_config_rejected() {
    assert!(MonitoringSession::new(trained_classifier(), &config(0)).is_err());

    let mut bad = MonitorConfig::default();
    bad.thresholds.warning_threshold = 80.0;
    assert!(matches!(
        MonitoringSession::new(trained_classifier(), &bad),
        Err(MonitorError::InvalidConfig(_))
    ));
}

#[test]
fn test_concurrent_readers_see_consistent_state() {
    let capacity = 16;
    let s = Arc::new(session(capacity, 11));
    let resolver = StatusResolver::default();

    let writer = {
        let s = Arc::clone(&s);
        thread::spawn(move || {
            for _ in 0..200 {
                s.tick();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let s = Arc::clone(&s);
            let resolver = resolver.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    if let Some(snapshot) = s.current_snapshot() {
                        assert_eq!(
                            resolver.resolve(snapshot.failure_probability),
                            (snapshot.current_status, snapshot.alert_level)
                        );
                    }

                    let records = s.recent(capacity * 2);
                    assert!(records.len() <= capacity);
                    assert!(records.windows(2).all(|w| w[0].timestamp < w[1].timestamp));

                    // What-if queries run in parallel with ticks
                    s.manual_predict(&SensorInput::new(70.0, 0.2, 15.0)).unwrap();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(s.history_len(), capacity);
}
