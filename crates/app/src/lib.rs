//! # solarlight-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StatePublisher` — deliver light state transitions to the bus
//! - Define **driving/inbound ports** as use-case structs:
//!   - `LightStateService` — evaluate readings, publish transitions
//! - Serialize readings through a single dispatch point
//!
//! ## Dependency rule
//! Depends on `solarlight-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
