//! # solarlight-adapter-mqtt
//!
//! MQTT adapter — connects the light state service to a broker via rumqttc.
//!
//! ## Responsibilities
//! - Connect to the MQTT broker (optionally with credentials)
//! - Subscribe to the solar radiation topic, re-subscribing after reconnects
//! - Decode payloads into readings (`0.0` with a logged error when unparseable)
//! - Publish each light state transition, retained, to `<prefix>/<trigger>`
//!
//! ## Dependency rule
//! Same as other adapters: depends on `solarlight-app` and `solarlight-domain`.

mod config;
mod error;
mod listener;
pub mod payload;
mod publisher;

pub use config::MqttConfig;
pub use error::MqttError;
pub use listener::MqttListener;
pub use publisher::MqttStatePublisher;

use std::time::Duration;

use rumqttc::{AsyncClient, MqttOptions};

/// Create the client for `config` and split it into its two halves.
///
/// No network activity happens until [`MqttListener::run`] polls the event
/// loop; the connection is established lazily there.
#[must_use]
pub fn connect(config: &MqttConfig) -> (MqttStatePublisher, MqttListener) {
    let options = mqtt_options(config);
    let (client, eventloop) = AsyncClient::new(options, config.request_capacity.max(1));

    tracing::debug!(
        host = %config.broker_host,
        port = config.broker_port,
        client_id = %config.client_id,
        "MQTT client created"
    );

    let publisher = MqttStatePublisher::new(client.clone(), config.clone());
    let listener = MqttListener::new(client, eventloop, config.clone());
    (publisher, listener)
}

fn mqtt_options(config: &MqttConfig) -> MqttOptions {
    let mut options = MqttOptions::new(
        config.client_id.clone(),
        config.broker_host.clone(),
        config.broker_port,
    );
    options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));
    if let Some(username) = &config.username {
        options.set_credentials(
            username.clone(),
            config.password.clone().unwrap_or_default(),
        );
    }
    options
}
