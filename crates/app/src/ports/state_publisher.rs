//! State publisher port — delivers light state transitions to the outside world.

use std::future::Future;

use solarlight_domain::error::SolarLightError;
use solarlight_domain::transition::Transition;

/// Publishes the new state of a trigger after it changed.
pub trait StatePublisher {
    /// Publish a single transition.
    fn publish(
        &self,
        transition: &Transition,
    ) -> impl Future<Output = Result<(), SolarLightError>> + Send;
}

impl<T: StatePublisher + Send + Sync> StatePublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        transition: &Transition,
    ) -> impl Future<Output = Result<(), SolarLightError>> + Send {
        (**self).publish(transition)
    }
}
