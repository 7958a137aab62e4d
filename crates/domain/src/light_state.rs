//! Light state — the discrete day/night classification of a trigger.

use serde::{Deserialize, Serialize};

/// Discrete state derived from the solar radiation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    /// No reading has classified the trigger yet.
    #[default]
    Undefined,
    Day,
    Night,
}

impl LightState {
    /// Label published on the bus and used in logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl std::fmt::Display for LightState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
