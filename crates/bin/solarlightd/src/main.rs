//! # solarlightd — solar light trigger daemon
//!
//! Composition root that wires the MQTT adapter to the light state service.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Build the trigger registry and the light state service
//! - Connect to the MQTT broker and forward readings to the service
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use solarlight_app::services::light_state_service::LightStateService;
use solarlight_domain::registry::TriggerRegistry;

use crate::config::{Config, ConfigSource};

/// Readings buffered between the MQTT listener and the dispatch loop.
/// The listener drops readings once this is full instead of waiting.
const READING_QUEUE: usize = 64;
/// How long the listener gets to flush the disconnect before it is aborted.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (config, source) = Config::load().context("unable to load configuration")?;
    init_tracing(&config.logging.filter);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting solarlightd");
    match &source {
        ConfigSource::File(path) => {
            tracing::info!(path = %path.display(), "configuration loaded");
        }
        ConfigSource::Defaults { path, reason } => {
            tracing::warn!(
                %reason,
                path = %path.display(),
                "unable to read config file, using default values"
            );
        }
    }

    for trigger in &config.triggers {
        tracing::info!(
            trigger = %trigger.name,
            enabled = trigger.enabled,
            threshold = trigger.threshold,
            hysteresis = trigger.hysteresis,
            "configuring trigger"
        );
    }
    if config.triggers.is_empty() {
        tracing::warn!("no triggers configured, readings will not change any state");
    }

    // Core
    let registry = TriggerRegistry::build(config.triggers);

    // MQTT
    let (publisher, listener) = solarlight_adapter_mqtt::connect(&config.mqtt);
    let service = LightStateService::new(registry, publisher.clone());

    let (readings_tx, readings_rx) = mpsc::channel(READING_QUEUE);
    let mut listener_task = tokio::spawn(listener.run(readings_tx));
    let dispatch_task = tokio::spawn(async move { service.run(readings_rx).await });

    shutdown_signal().await;
    tracing::info!("shutdown signal received");

    if let Err(err) = publisher.disconnect().await {
        tracing::warn!(%err, "failed to disconnect from MQTT broker");
    }
    if tokio::time::timeout(SHUTDOWN_GRACE, &mut listener_task)
        .await
        .is_err()
    {
        listener_task.abort();
        tracing::debug!("MQTT listener aborted");
    }
    // The listener owned the sender, so the dispatch loop drains and stops.
    dispatch_task.await.context("dispatch loop panicked")?;

    tracing::info!("solarlightd stopped");
    Ok(())
}

fn init_tracing(directive: &str) {
    let (filter, invalid) = match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(err) = invalid {
        tracing::warn!(%err, directive, "invalid log filter, falling back to info");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
