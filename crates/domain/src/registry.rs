//! Trigger registry — ordered trigger configurations and their current states.

use crate::light_state::LightState;
use crate::trigger::TriggerConfig;

/// A trigger configuration paired with the state it currently holds.
#[derive(Debug, Clone)]
struct Slot {
    config: TriggerConfig,
    state: LightState,
}

/// Owns the configured triggers, in configuration order, together with the
/// [`LightState`] of each one.
///
/// Configurations and states share a single slot so they can never drift out
/// of alignment. States are only mutated through [`set_state`](Self::set_state).
#[derive(Debug, Clone, Default)]
pub struct TriggerRegistry {
    slots: Vec<Slot>,
}

impl TriggerRegistry {
    /// Build a registry with every trigger in [`LightState::Undefined`].
    ///
    /// Configurations are expected to be validated upstream.
    #[must_use]
    pub fn build(configs: impl IntoIterator<Item = TriggerConfig>) -> Self {
        let slots = configs
            .into_iter()
            .map(|config| Slot {
                config,
                state: LightState::Undefined,
            })
            .collect();
        Self { slots }
    }

    /// Configuration and current state of the trigger at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&TriggerConfig, LightState)> {
        self.slots
            .get(index)
            .map(|slot| (&slot.config, slot.state))
    }

    /// Overwrite the state of the trigger at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_state(&mut self, index: usize, state: LightState) {
        self.slots[index].state = state;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over `(config, state)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&TriggerConfig, LightState)> {
        self.slots.iter().map(|slot| (&slot.config, slot.state))
    }

    /// Snapshot of every trigger name with its current state.
    #[must_use]
    pub fn states(&self) -> Vec<(String, LightState)> {
        self.iter()
            .map(|(config, state)| (config.name.clone(), state))
            .collect()
    }
}
