//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SolarLightError`] at port boundaries.

/// Base error shared by the domain, the application layer and adapters.
#[derive(Debug, thiserror::Error)]
pub enum SolarLightError {
    /// A configuration value broke a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The message transport failed (connect, subscribe, publish, …).
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected while validating a trigger definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("trigger name must not be empty")]
    EmptyName,

    #[error("hysteresis must not be negative")]
    NegativeHysteresis,

    #[error("threshold must be a finite number")]
    NonFiniteThreshold,

    #[error("hysteresis must be a finite number")]
    NonFiniteHysteresis,
}
