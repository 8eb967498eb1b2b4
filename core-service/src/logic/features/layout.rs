//! Feature Layout - Centralized Sensor Channel Definition
//!
//! **This file controls the feature schema seen by the classifier**
//!
//! ## Rules:
//! 1. Add channel → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove channel → increment FEATURE_VERSION
//!
//! A persisted model carries the version + hash it was trained with and is
//! rejected on load if either differs.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Sensor channels in the exact order they appear in the feature vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "temperature", // 0: °C
    "vibration",   // 1: m/s²
    "pressure",    // 2: psi
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 3;

/// Index constants, kept next to the layout so they cannot drift apart
pub const TEMPERATURE: usize = 0;
pub const VIBRATION: usize = 1;
pub const PRESSURE: usize = 2;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over version + channel names, used to detect layout mismatches
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
        }
    }

    /// Same version, same hash
    pub fn is_compatible(&self) -> bool {
        *self == Self::current()
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Get channel name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
