//! Transition — the record of a trigger changing state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::light_state::LightState;

/// UTC timestamp attached to transitions.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// A trigger moved from one [`LightState`] to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub trigger_name: String,
    pub from: LightState,
    pub to: LightState,
    /// Reading that caused the change.
    pub value: f64,
    pub timestamp: Timestamp,
}

impl Transition {
    #[must_use]
    pub fn new(
        trigger_name: impl Into<String>,
        from: LightState,
        to: LightState,
        value: f64,
    ) -> Self {
        Self {
            trigger_name: trigger_name.into(),
            from,
            to,
            value,
            timestamp: now(),
        }
    }

    /// Label of the new state, as published on the bus.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.to.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_label_with_new_state() {
        let transition = Transition::new("patio", LightState::Undefined, LightState::Night, 5.0);
        assert_eq!(transition.label(), "night");
    }

    #[test]
    fn should_stamp_with_current_time() {
        let before = Utc::now();
        let transition = Transition::new("patio", LightState::Night, LightState::Day, 65.0);
        let after = Utc::now();
        assert!(transition.timestamp >= before);
        assert!(transition.timestamp <= after);
    }

    #[test]
    fn should_serialize_states_as_labels() {
        let transition = Transition::new("patio", LightState::Day, LightState::Night, 35.0);
        let json = serde_json::to_value(&transition).unwrap();
        assert_eq!(json["trigger_name"], "patio");
        assert_eq!(json["from"], "day");
        assert_eq!(json["to"], "night");
        assert_eq!(json["value"], 35.0);
    }
}
