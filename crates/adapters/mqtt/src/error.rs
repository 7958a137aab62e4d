//! MQTT adapter error types.

use solarlight_domain::error::SolarLightError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client could not queue a request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The payload is not valid UTF-8 text.
    #[error("MQTT payload is not valid UTF-8")]
    InvalidUtf8(#[source] std::str::Utf8Error),

    /// The payload text is not a number.
    #[error("failed to parse MQTT payload")]
    PayloadParse(#[source] std::num::ParseFloatError),

    /// A domain-level error.
    #[error("domain error")]
    Domain(#[source] SolarLightError),
}

impl MqttError {
    /// Convert into a [`SolarLightError::Transport`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> SolarLightError {
        match self {
            Self::Domain(err) => err,
            other => SolarLightError::Transport(Box::new(other)),
        }
    }
}

impl From<MqttError> for SolarLightError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
