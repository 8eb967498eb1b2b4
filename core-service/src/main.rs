//! Machine Monitor - Main Entry Point
//!
//! Load config → load/train classifier → tick every N seconds until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use machine_monitor_core::constants::{APP_NAME, APP_VERSION};
use machine_monitor_core::logic::model::load_or_train;
use machine_monitor_core::{MonitorConfig, MonitoringSession, SensorInput};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config = MonitorConfig::from_env();
    config.validate().context("invalid configuration")?;

    log::info!("   Model: {}", config.model_path.display());
    log::info!("   Tick interval: {}s", config.tick_interval_secs);

    // No valid predictions are possible without a classifier
    let classifier = load_or_train(&config.model_path, &config.training)
        .context("failed to load or train failure classifier")?;

    let session = Arc::new(MonitoringSession::new(Arc::new(classifier), &config)?);

    let identity = session.identity();
    log::info!(
        "   Machine: {} ({}), {} trees, history capacity: {}",
        identity.machine_name,
        identity.machine_id,
        session.classifier().n_estimators(),
        session.history_capacity()
    );

    // Startup self-check
    let probe = session.manual_predict(&SensorInput::new(85.0, 0.6, 12.0))?;
    log::info!(
        "Self-check: Temp=85°C, Vibration=0.6 m/s², Pressure=12 psi -> {:.1}% {} ({})",
        probe.failure_probability,
        probe.status,
        probe.alert_level
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.tick_interval_secs));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let snapshot = session.tick();
                log::info!(
                    "[{}] {} | {:.1}°C {:.2}m/s² {:.1}psi | failure {:.1}% ({})",
                    snapshot.machine_id,
                    snapshot.current_status,
                    snapshot.sensor_readings.temperature,
                    snapshot.sensor_readings.vibration,
                    snapshot.sensor_readings.pressure,
                    snapshot.failure_probability,
                    snapshot.alert_level
                );
            }
            _ = &mut shutdown => {
                log::info!("Shutting down ({} records in history)", session.history_len());
                break;
            }
        }
    }

    Ok(())
}
