//! MQTT integration configuration.

use serde::Deserialize;

/// Configuration for the MQTT connection and topics.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// Optional username, sent together with `password`.
    pub username: Option<String>,
    pub password: Option<String>,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic carrying the solar radiation readings.
    pub solar_radiation_topic: String,
    /// Prefix of the per-trigger light state topics.
    pub light_state_topic_prefix: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause after a connection error before polling the broker again, in seconds.
    pub reconnect_delay_secs: u16,
    /// Capacity of the rumqttc request queue.
    pub request_capacity: usize,
}

impl MqttConfig {
    /// Topic a trigger's state is published on: `<prefix>/<trigger name>`.
    ///
    /// A single trailing `/` on the prefix is dropped.
    #[must_use]
    pub fn state_topic(&self, trigger_name: &str) -> String {
        let prefix = self
            .light_state_topic_prefix
            .strip_suffix('/')
            .unwrap_or(&self.light_state_topic_prefix);
        format!("{prefix}/{trigger_name}")
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            username: None,
            password: None,
            client_id: "solarlight".to_string(),
            solar_radiation_topic: "weather/solar_radiation".to_string(),
            light_state_topic_prefix: "solarlight/state".to_string(),
            keep_alive_secs: 30,
            reconnect_delay_secs: 5,
            request_capacity: 16,
        }
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for MqttConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MqttConfig")
            .field("broker_host", &self.broker_host)
            .field("broker_port", &self.broker_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("client_id", &self.client_id)
            .field("solar_radiation_topic", &self.solar_radiation_topic)
            .field("light_state_topic_prefix", &self.light_state_topic_prefix)
            .field("keep_alive_secs", &self.keep_alive_secs)
            .field("reconnect_delay_secs", &self.reconnect_delay_secs)
            .field("request_capacity", &self.request_capacity)
            .finish()
    }
}
