//! Trigger — a named threshold with a hysteresis band.
//!
//! A trigger maps the solar radiation level onto a [`LightState`](crate::light_state::LightState)
//! and owns one output topic, derived from its name.

use serde::{Deserialize, Serialize};

use crate::error::{SolarLightError, ValidationError};

/// Static configuration of a single trigger. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Log label and output topic suffix.
    #[serde(default)]
    pub name: String,
    /// Disabled triggers are never evaluated.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub threshold: f64,
    /// Half-width of the dead zone around `threshold`.
    #[serde(default)]
    pub hysteresis: f64,
}

impl TriggerConfig {
    /// Create a builder for constructing a [`TriggerConfig`].
    #[must_use]
    pub fn builder() -> TriggerConfigBuilder {
        TriggerConfigBuilder::default()
    }

    /// Lower edge of the band, `threshold - hysteresis`.
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.threshold - self.hysteresis
    }

    /// Upper edge of the band, `threshold + hysteresis`.
    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.threshold + self.hysteresis
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SolarLightError::Validation`] when the name is empty, the
    /// threshold or hysteresis is not finite, or the hysteresis is negative.
    pub fn validate(&self) -> Result<(), SolarLightError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !self.threshold.is_finite() {
            return Err(ValidationError::NonFiniteThreshold.into());
        }
        if !self.hysteresis.is_finite() {
            return Err(ValidationError::NonFiniteHysteresis.into());
        }
        if self.hysteresis < 0.0 {
            return Err(ValidationError::NegativeHysteresis.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`TriggerConfig`].
#[derive(Debug, Default)]
pub struct TriggerConfigBuilder {
    name: Option<String>,
    enabled: Option<bool>,
    threshold: Option<f64>,
    hysteresis: Option<f64>,
}

impl TriggerConfigBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn hysteresis(mut self, hysteresis: f64) -> Self {
        self.hysteresis = Some(hysteresis);
        self
    }

    /// Consume the builder, validate, and return a [`TriggerConfig`].
    ///
    /// Triggers are enabled unless stated otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SolarLightError::Validation`] if the resulting trigger breaks
    /// an invariant (see [`TriggerConfig::validate`]).
    pub fn build(self) -> Result<TriggerConfig, SolarLightError> {
        let trigger = TriggerConfig {
            name: self.name.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            threshold: self.threshold.unwrap_or_default(),
            hysteresis: self.hysteresis.unwrap_or_default(),
        };
        trigger.validate()?;
        Ok(trigger)
    }
}
