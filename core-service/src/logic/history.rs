//! History Store - bounded FIFO of past readings
//!
//! Giữ tối đa `capacity` records, record cũ nhất bị evict trước.
//! Thứ tự insert = thứ tự thời gian.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::features::SensorReading;
use super::model::PredictionResult;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default `limit` for trend queries
pub const DEFAULT_RECENT_LIMIT: usize = 20;

// ============================================================================
// RECORD
// ============================================================================

/// One scored reading. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub reading: SensorReading,
    pub result: PredictionResult,
    /// Seconds since epoch
    pub timestamp: i64,
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug, Clone)]
pub struct HistoryStore {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl HistoryStore {
    /// Capacity must be at least 1 (checked by `MonitorConfig::validate`)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append to the tail, evicting from the head while over capacity
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push_back(record);

        while self.records.len() > self.capacity {
            self.records.pop_front();
        }

        assert!(
            self.records.len() <= self.capacity,
            "history store exceeded capacity: {} > {}",
            self.records.len(),
            self.capacity
        );
    }

    /// Up to `limit` most recent records, oldest first
    pub fn recent(&self, limit: usize) -> Vec<HistoryRecord> {
        let skip = self.records.len().saturating_sub(limit);
        self.records.iter().skip(skip).copied().collect()
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

// ============================================================================
// TESTS
// ============================================================================
