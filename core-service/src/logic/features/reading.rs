//! Sensor Reading - Core data structure for classifier input
//!
//! `SensorReading` luôn hợp lệ (3 channels, finite).
//! `SensorInput` là dữ liệu thô từ caller, phải validate trước khi dùng.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT, PRESSURE, TEMPERATURE, VIBRATION};
use crate::logic::error::{MonitorError, MonitorResult};

// ============================================================================
// VALIDATED READING
// ============================================================================

/// One sample of the three sensor channels.
///
/// All fields are finite. There are no range limits: a 300 °C reading is a
/// valid (if alarming) input and still gets scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// °C
    pub temperature: f64,
    /// m/s²
    pub vibration: f64,
    /// psi
    pub pressure: f64,
}

impl SensorReading {
    /// Create a reading, rejecting NaN / infinite values
    pub fn new(temperature: f64, vibration: f64, pressure: f64) -> MonitorResult<Self> {
        let reading = Self { temperature, vibration, pressure };
        for (i, value) in reading.to_features().iter().enumerate() {
            if !value.is_finite() {
                return Err(MonitorError::invalid_input(
                    FEATURE_LAYOUT[i],
                    format!("value must be finite, got {}", value),
                ));
            }
        }
        Ok(reading)
    }

    /// Values in FEATURE_LAYOUT order
    pub fn to_features(&self) -> [f64; FEATURE_COUNT] {
        let mut features = [0.0; FEATURE_COUNT];
        features[TEMPERATURE] = self.temperature;
        features[VIBRATION] = self.vibration;
        features[PRESSURE] = self.pressure;
        features
    }

    pub fn from_features(features: [f64; FEATURE_COUNT]) -> Self {
        Self {
            temperature: features[TEMPERATURE],
            vibration: features[VIBRATION],
            pressure: features[PRESSURE],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.to_features().iter().all(|v| v.is_finite())
    }

    /// Display precision used by the live feed: 0.1 °C, 0.01 m/s², 0.1 psi
    pub fn rounded(&self) -> Self {
        Self {
            temperature: round_to(self.temperature, 1),
            vibration: round_to(self.vibration, 2),
            pressure: round_to(self.pressure, 1),
        }
    }
}

/// Round to a fixed number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// RAW INPUT
// ============================================================================

/// Raw sensor input as received from a caller.
///
/// Every field is optional and may be a JSON number or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorInput {
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub vibration: Option<Value>,
    #[serde(default)]
    pub pressure: Option<Value>,
}

impl SensorInput {
    /// Input with all three channels present
    pub fn new(temperature: f64, vibration: f64, pressure: f64) -> Self {
        Self {
            temperature: Some(number_value(temperature)),
            vibration: Some(number_value(vibration)),
            pressure: Some(number_value(pressure)),
        }
    }

    /// Parse from an arbitrary JSON document (request body)
    pub fn from_json(value: &Value) -> MonitorResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                temperature: map.get("temperature").cloned(),
                vibration: map.get("vibration").cloned(),
                pressure: map.get("pressure").cloned(),
            }),
            _ => Err(MonitorError::invalid_input(
                "body",
                "expected an object with temperature, vibration, pressure",
            )),
        }
    }

    /// Validate into a `SensorReading`
    pub fn validate(&self) -> MonitorResult<SensorReading> {
        let temperature = parse_field("temperature", self.temperature.as_ref())?;
        let vibration = parse_field("vibration", self.vibration.as_ref())?;
        let pressure = parse_field("pressure", self.pressure.as_ref())?;
        SensorReading::new(temperature, vibration, pressure)
    }
}

impl From<SensorReading> for SensorInput {
    fn from(reading: SensorReading) -> Self {
        Self::new(reading.temperature, reading.vibration, reading.pressure)
    }
}

/// JSON numbers cannot hold NaN or infinity; those are kept as text
/// ("NaN", "inf") so `validate` reports them as non-finite, not missing
fn number_value(value: f64) -> Value {
    match serde_json::Number::from_f64(value) {
        Some(n) => Value::Number(n),
        None => Value::String(value.to_string()),
    }
}

fn parse_field(field: &'static str, value: Option<&Value>) -> MonitorResult<f64> {
    let parsed = match value {
        None | Some(Value::Null) => {
            return Err(MonitorError::invalid_input(field, "missing required sensor value"));
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(MonitorError::invalid_input(
            field,
            format!("value must be finite, got {}", v),
        )),
        None => Err(MonitorError::invalid_input(field, "value is not numeric")),
    }
}

// ============================================================================
// TESTS
// ============================================================================
