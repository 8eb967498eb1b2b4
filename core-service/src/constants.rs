//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Monitored machine identity
pub const DEFAULT_MACHINE_ID: &str = "MACHINE-001";
pub const DEFAULT_MACHINE_NAME: &str = "Production Line A";

/// Default tick interval (seconds)
pub const DEFAULT_TICK_INTERVAL: u64 = 5;

/// Default synthetic training set size (split evenly between regimes)
pub const DEFAULT_TRAINING_SAMPLES: usize = 1000;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Machine Monitor";

// ============================================
// Helpers to read from env with fallback
// ============================================

/// String env var or default
pub fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parsed env var or default (unparsable values fall back silently)
pub fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
