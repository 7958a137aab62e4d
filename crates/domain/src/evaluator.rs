//! Hysteresis evaluator — turns a stream of readings into state transitions.
//!
//! For a trigger with threshold `T` and hysteresis `H`, the first matching
//! rule wins:
//!
//! 1. `Day` or `Undefined`, and `value < T - H` → `Night`
//! 2. `Night` or `Undefined`, and `value > T + H` → `Day`
//! 3. `Undefined`, and `value > T - H` → `Day`
//!
//! Rule 3 only classifies a trigger on startup. A reading of exactly `T - H`
//! leaves an undefined trigger undefined.

use crate::light_state::LightState;
use crate::registry::TriggerRegistry;
use crate::transition::Transition;
use crate::trigger::TriggerConfig;

/// State the trigger moves to for `value`, or `None` when it stays put.
///
/// The enabled flag is not consulted here.
#[must_use]
pub fn next_state(config: &TriggerConfig, state: LightState, value: f64) -> Option<LightState> {
    let lower = config.lower_bound();
    let upper = config.upper_bound();

    match state {
        LightState::Day | LightState::Undefined if value < lower => Some(LightState::Night),
        LightState::Night | LightState::Undefined if value > upper => Some(LightState::Day),
        LightState::Undefined if value > lower => Some(LightState::Day),
        _ => None,
    }
}

/// Apply `reading` to every enabled trigger of `registry`.
///
/// Each change is committed to the registry before its [`Transition`] is
/// recorded. Transitions come back in configuration order, at most one per
/// trigger.
pub fn evaluate(registry: &mut TriggerRegistry, reading: f64) -> Vec<Transition> {
    let mut transitions = Vec::new();

    for index in 0..registry.len() {
        let Some((config, current)) = registry.get(index) else {
            continue;
        };
        if !config.enabled {
            continue;
        }
        let Some(next) = next_state(config, current, reading) else {
            continue;
        };
        let transition = Transition::new(config.name.clone(), current, next, reading);
        registry.set_state(index, next);
        transitions.push(transition);
    }

    transitions
}
