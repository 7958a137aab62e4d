//! # solarlight-domain
//!
//! Pure domain model for the solar light trigger.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Triggers** (named threshold + hysteresis band)
//! - Define **Light states** (`undefined`, `day`, `night`)
//! - Hold the **Trigger registry** (configurations and their current states)
//! - Run the **Hysteresis evaluator** that turns readings into transitions
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod evaluator;
pub mod light_state;
pub mod registry;
pub mod transition;
pub mod trigger;
