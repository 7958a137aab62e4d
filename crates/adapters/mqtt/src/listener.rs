//! Inbound side — drives the rumqttc event loop and forwards readings.
//!
//! The listener is the only task polling the event loop. It (re)subscribes to
//! the solar radiation topic on every connection acknowledgement and pushes
//! each decoded reading into a channel consumed by the dispatch loop.
//!
//! The dispatch loop publishes through the same client, so the listener must
//! keep polling while it waits on the broker. Readings that do not fit in the
//! channel are dropped rather than awaited.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Outgoing, Packet, QoS, SubscribeReasonCode};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::config::MqttConfig;
use crate::payload;

/// What the listener should do with a single event loop notification.
#[derive(Debug, PartialEq)]
pub(crate) enum Inbound {
    /// The broker accepted the connection.
    Connected,
    /// A reading arrived on the solar radiation topic.
    Reading(f64),
    /// The broker refused the subscription.
    SubscribeRejected,
    /// A message arrived on a topic we do not handle.
    Unexpected,
    /// The client sent a disconnect; stop polling.
    Disconnected,
    /// Pings, acknowledgements and other protocol noise.
    Ignored,
}

pub(crate) fn classify(event: &Event, solar_radiation_topic: &str) -> Inbound {
    match event {
        Event::Incoming(Packet::ConnAck(_)) => Inbound::Connected,
        Event::Incoming(Packet::Publish(publish)) => {
            if publish.topic == *solar_radiation_topic {
                tracing::debug!(
                    topic = ?publish.topic,
                    payload = %String::from_utf8_lossy(&publish.payload),
                    "solar radiation message received"
                );
                Inbound::Reading(payload::reading_or_default(&publish.payload))
            } else {
                tracing::debug!(topic = ?publish.topic, "message received on unexpected topic");
                Inbound::Unexpected
            }
        }
        Event::Incoming(Packet::SubAck(ack))
            if ack
                .return_codes
                .iter()
                .any(|code| matches!(code, SubscribeReasonCode::Failure)) =>
        {
            Inbound::SubscribeRejected
        }
        Event::Outgoing(Outgoing::Disconnect) => Inbound::Disconnected,
        _ => Inbound::Ignored,
    }
}

/// Hand a reading to the dispatch loop without waiting for room.
///
/// Returns `false` once the receiving side is gone.
pub(crate) fn forward(readings: &mpsc::Sender<f64>, value: f64) -> bool {
    match readings.try_send(value) {
        Ok(()) => true,
        Err(TrySendError::Full(value)) => {
            tracing::warn!(value, "reading queue full, dropping reading");
            true
        }
        Err(TrySendError::Closed(_)) => false,
    }
}

/// Polls the broker connection and feeds readings to the dispatch loop.
pub struct MqttListener {
    client: AsyncClient,
    eventloop: EventLoop,
    config: MqttConfig,
}

impl MqttListener {
    pub(crate) fn new(client: AsyncClient, eventloop: EventLoop, config: MqttConfig) -> Self {
        Self {
            client,
            eventloop,
            config,
        }
    }

    /// Run until the client disconnects or the reading receiver is dropped.
    ///
    /// Connection errors are logged and retried after
    /// [`reconnect_delay_secs`](MqttConfig::reconnect_delay_secs); the next
    /// poll reconnects.
    pub async fn run(mut self, readings: mpsc::Sender<f64>) {
        let reconnect_delay = Duration::from_secs(u64::from(self.config.reconnect_delay_secs));

        loop {
            let event = match self.eventloop.poll().await {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(
                        %err,
                        host = %self.config.broker_host,
                        port = self.config.broker_port,
                        "connection to MQTT broker lost"
                    );
                    tokio::time::sleep(reconnect_delay).await;
                    continue;
                }
            };

            match classify(&event, &self.config.solar_radiation_topic) {
                Inbound::Connected => {
                    tracing::info!(
                        host = %self.config.broker_host,
                        port = self.config.broker_port,
                        "connected to MQTT broker"
                    );
                    self.subscribe();
                }
                Inbound::Reading(value) => {
                    if !forward(&readings, value) {
                        tracing::debug!("reading receiver dropped, MQTT listener stopped");
                        return;
                    }
                }
                Inbound::SubscribeRejected => {
                    tracing::warn!(
                        topic = %self.config.solar_radiation_topic,
                        "broker rejected subscription"
                    );
                }
                Inbound::Disconnected => {
                    tracing::info!("disconnected from MQTT broker");
                    return;
                }
                Inbound::Unexpected | Inbound::Ignored => {}
            }
        }
    }

    // `try_subscribe` because awaiting a full request queue here would block
    // the only task draining it.
    fn subscribe(&self) {
        let topic = &self.config.solar_radiation_topic;
        match self.client.try_subscribe(topic.as_str(), QoS::AtMostOnce) {
            Ok(()) => tracing::debug!(%topic, "subscription requested"),
            Err(err) => tracing::warn!(%err, %topic, "unable to subscribe"),
        }
    }
}
