//! Light state service — the single dispatch point for incoming readings.
//!
//! Every reading is evaluated against the trigger registry and all resulting
//! transitions are published before the next reading is looked at.

use tokio::sync::{Mutex, mpsc};

use solarlight_domain::evaluator;
use solarlight_domain::light_state::LightState;
use solarlight_domain::registry::TriggerRegistry;
use solarlight_domain::transition::Transition;

use crate::ports::StatePublisher;

/// Owns the trigger registry and forwards state changes to a [`StatePublisher`].
pub struct LightStateService<P> {
    registry: Mutex<TriggerRegistry>,
    publisher: P,
}

impl<P: StatePublisher> LightStateService<P> {
    /// Create a new service over an already built registry.
    pub fn new(registry: TriggerRegistry, publisher: P) -> Self {
        Self {
            registry: Mutex::new(registry),
            publisher,
        }
    }

    /// Evaluate one reading and publish every resulting transition.
    ///
    /// The registry stays locked until all publishes are done, so concurrent
    /// callers are processed one reading at a time. Publish failures are
    /// logged and do not roll back the new state.
    pub async fn on_reading(&self, value: f64) -> Vec<Transition> {
        let mut registry = self.registry.lock().await;
        let transitions = evaluator::evaluate(&mut registry, value);

        for transition in &transitions {
            tracing::info!(
                trigger = %transition.trigger_name,
                from = %transition.from,
                to = %transition.to,
                value = transition.value,
                "trigger changed"
            );
            if let Err(err) = self.publisher.publish(transition).await {
                tracing::warn!(
                    %err,
                    trigger = %transition.trigger_name,
                    "failed to publish light state"
                );
            }
        }

        transitions
    }

    /// Consume readings until the sending side of the channel is dropped.
    pub async fn run(&self, mut readings: mpsc::Receiver<f64>) {
        while let Some(value) = readings.recv().await {
            self.on_reading(value).await;
        }
        tracing::debug!("reading channel closed, dispatch loop stopped");
    }

    /// Current state of every trigger, in configuration order.
    pub async fn states(&self) -> Vec<(String, LightState)> {
        self.registry.lock().await.states()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarlight_domain::error::SolarLightError;
    use solarlight_domain::trigger::TriggerConfig;
    use std::future::Future;
    use std::sync::Arc;

    // ── Fake publishers ────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingPublisher {
        published: std::sync::Mutex<Vec<(String, &'static str)>>,
    }

    impl RecordingPublisher {
        fn published(&self) -> Vec<(String, &'static str)> {
            self.published.lock().unwrap().clone()
        }
    }

    impl StatePublisher for RecordingPublisher {
        fn publish(
            &self,
            transition: &Transition,
        ) -> impl Future<Output = Result<(), SolarLightError>> + Send {
            self.published
                .lock()
                .unwrap()
                .push((transition.trigger_name.clone(), transition.label()));
            async { Ok(()) }
        }
    }

    struct FailingPublisher;

    impl StatePublisher for FailingPublisher {
        fn publish(
            &self,
            _transition: &Transition,
        ) -> impl Future<Output = Result<(), SolarLightError>> + Send {
            async {
                Err(SolarLightError::Transport(Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotConnected,
                    "broker unreachable",
                ))))
            }
        }
    }

    fn trigger(name: &str, threshold: f64, hysteresis: f64) -> TriggerConfig {
        TriggerConfig::builder()
            .name(name)
            .threshold(threshold)
            .hysteresis(hysteresis)
            .build()
            .unwrap()
    }

    fn make_service(
        triggers: Vec<TriggerConfig>,
    ) -> (
        LightStateService<Arc<RecordingPublisher>>,
        Arc<RecordingPublisher>,
    ) {
        let publisher = Arc::new(RecordingPublisher::default());
        let svc = LightStateService::new(
            TriggerRegistry::build(triggers),
            Arc::clone(&publisher),
        );
        (svc, publisher)
    }

    #[tokio::test]
    async fn should_publish_transition_when_state_changes() {
        let (svc, publisher) = make_service(vec![trigger("patio", 50.0, 10.0)]);

        let transitions = svc.on_reading(5.0).await;

        assert_eq!(transitions.len(), 1);
        assert_eq!(publisher.published(), vec![("patio".to_string(), "night")]);
        assert_eq!(
            svc.states().await,
            vec![("patio".to_string(), LightState::Night)]
        );
    }

    #[tokio::test]
    async fn should_not_publish_when_nothing_changes() {
        let (svc, publisher) = make_service(vec![trigger("patio", 50.0, 10.0)]);

        svc.on_reading(5.0).await;
        let transitions = svc.on_reading(45.0).await;

        assert!(transitions.is_empty());
        assert_eq!(publisher.published().len(), 1);
    }

    #[tokio::test]
    async fn should_publish_in_configuration_order() {
        let (svc, publisher) = make_service(vec![
            trigger("a", 100.0, 5.0),
            trigger("b", 140.0, 5.0),
        ]);

        svc.on_reading(150.0).await;

        assert_eq!(
            publisher.published(),
            vec![("a".to_string(), "day"), ("b".to_string(), "day")]
        );
    }

    #[tokio::test]
    async fn should_keep_new_state_when_publish_fails() {
        let registry = TriggerRegistry::build(vec![trigger("patio", 50.0, 10.0)]);
        let svc = LightStateService::new(registry, FailingPublisher);

        let transitions = svc.on_reading(80.0).await;

        assert_eq!(transitions.len(), 1);
        assert_eq!(
            svc.states().await,
            vec![("patio".to_string(), LightState::Day)]
        );
        assert!(svc.on_reading(80.0).await.is_empty());
    }

    #[tokio::test]
    async fn should_process_channel_readings_in_order() {
        let (svc, publisher) = make_service(vec![trigger("patio", 50.0, 10.0)]);
        let (tx, rx) = mpsc::channel(8);

        for reading in [5.0, 45.0, 65.0, 35.0] {
            tx.send(reading).await.unwrap();
        }
        drop(tx);

        svc.run(rx).await;

        assert_eq!(
            publisher.published(),
            vec![
                ("patio".to_string(), "night"),
                ("patio".to_string(), "day"),
                ("patio".to_string(), "night"),
            ]
        );
    }

    #[tokio::test]
    async fn should_serialize_concurrent_readings() {
        let (svc, publisher) = make_service(vec![trigger("patio", 50.0, 10.0)]);
        let svc = Arc::new(svc);

        let first = tokio::spawn({
            let svc = Arc::clone(&svc);
            async move { svc.on_reading(80.0).await }
        });
        let second = tokio::spawn({
            let svc = Arc::clone(&svc);
            async move { svc.on_reading(80.0).await }
        });

        let total = first.await.unwrap().len() + second.await.unwrap().len();
        assert_eq!(total, 1);
        assert_eq!(publisher.published(), vec![("patio".to_string(), "day")]);
    }
}
