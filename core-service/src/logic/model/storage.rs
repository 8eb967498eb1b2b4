//! Model Storage - persist trained classifier
//!
//! File format (opaque to callers):
//! ```text
//! { "header": {...}, "checksum": "<sha256 hex of payload>", "payload": "<classifier json>" }
//! ```
//! Payload giữ nguyên dạng string để checksum verify đúng từng byte.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::{FailureClassifier, TrainingConfig};
use crate::logic::error::{MonitorError, MonitorResult};
use crate::logic::features::LayoutInfo;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Bump when the envelope or classifier layout changes
pub const MODEL_FORMAT_VERSION: u32 = 1;

const MODEL_DIR_NAME: &str = "machine-monitor";
const MODEL_FILE_NAME: &str = "failure_model.json";

// ============================================================================
// FILE FORMAT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelHeader {
    pub format_version: u32,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub n_estimators: usize,
    pub trained_at: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelFile {
    header: ModelHeader,
    checksum: String,
    payload: String,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// `<data_local_dir>/machine-monitor/failure_model.json`
pub fn default_model_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(MODEL_DIR_NAME)
        .join(MODEL_FILE_NAME)
}

/// Save classifier with header + checksum
pub fn save_model(classifier: &FailureClassifier, path: &Path) -> MonitorResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string(classifier)?;
    let layout = classifier.layout();

    let file = ModelFile {
        header: ModelHeader {
            format_version: MODEL_FORMAT_VERSION,
            feature_version: layout.version,
            layout_hash: layout.hash,
            n_estimators: classifier.n_estimators(),
            trained_at: classifier.trained_at(),
            saved_at: Utc::now(),
        },
        checksum: compute_checksum(&payload),
        payload,
    };

    fs::write(path, serde_json::to_vec_pretty(&file)?)?;
    log::info!("Model saved to {}", path.display());
    Ok(())
}

/// Load and verify format, layout and checksum
pub fn load_model(path: &Path) -> MonitorResult<FailureClassifier> {
    let data = fs::read(path)?;
    let file: ModelFile = serde_json::from_slice(&data)?;

    if file.header.format_version != MODEL_FORMAT_VERSION {
        return Err(MonitorError::UnsupportedFormat(file.header.format_version));
    }

    let current = LayoutInfo::current();
    if file.header.feature_version != current.version || file.header.layout_hash != current.hash {
        return Err(MonitorError::LayoutMismatch {
            expected_version: current.version,
            expected_hash: current.hash,
            actual_version: file.header.feature_version,
            actual_hash: file.header.layout_hash,
        });
    }

    let actual = compute_checksum(&file.payload);
    if actual != file.checksum {
        return Err(MonitorError::ChecksumMismatch {
            expected: file.checksum,
            actual,
        });
    }

    let classifier: FailureClassifier = serde_json::from_str(&file.payload)?;
    classifier.validate()?;

    log::info!(
        "Model loaded from {} ({} trees, trained {})",
        path.display(),
        classifier.n_estimators(),
        classifier.trained_at().to_rfc3339()
    );

    Ok(classifier)
}

/// Load a persisted model; on any load failure train a new one and try to save it.
///
/// Only a training failure is returned as an error.
pub fn load_or_train(path: &Path, config: &TrainingConfig) -> MonitorResult<FailureClassifier> {
    match load_model(path) {
        Ok(classifier) => return Ok(classifier),
        Err(MonitorError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("Model file {} not found. Training new model...", path.display());
        }
        Err(e) => {
            log::warn!("Model load failed/invalid: {}. Training new model...", e);
        }
    }

    let (classifier, _report) = FailureClassifier::train_synthetic(config)?;

    if let Err(e) = save_model(&classifier, path) {
        log::error!("Failed to save trained model: {}", e);
    }

    Ok(classifier)
}

fn compute_checksum(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}
