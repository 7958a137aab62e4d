//! Outbound side — publishes light states as retained MQTT messages.

use rumqttc::{AsyncClient, QoS};

use solarlight_app::ports::StatePublisher;
use solarlight_domain::error::SolarLightError;
use solarlight_domain::transition::Transition;

use crate::config::MqttConfig;
use crate::error::MqttError;

/// [`StatePublisher`] that writes each transition's label to the trigger's
/// state topic, retained, at `QoS` 0.
#[derive(Clone)]
pub struct MqttStatePublisher {
    client: AsyncClient,
    config: MqttConfig,
}

impl MqttStatePublisher {
    pub(crate) fn new(client: AsyncClient, config: MqttConfig) -> Self {
        Self { client, config }
    }

    /// Ask the event loop to send a clean disconnect to the broker.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Client`] if the event loop is already gone.
    pub async fn disconnect(&self) -> Result<(), MqttError> {
        self.client.disconnect().await.map_err(MqttError::Client)
    }
}

impl StatePublisher for MqttStatePublisher {
    async fn publish(&self, transition: &Transition) -> Result<(), SolarLightError> {
        let topic = self.config.state_topic(&transition.trigger_name);
        let payload = transition.label();

        tracing::debug!(%topic, payload, "publishing light state");

        self.client
            .publish(topic, QoS::AtMostOnce, true, payload)
            .await
            .map_err(MqttError::Client)?;
        Ok(())
    }
}
