//! Recording service double.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use parlor_protocol::{Iq, Jid, Stanza};
use parlor_service::{
    ComponentBroker, ComponentError, GameHandler, GameService, ServiceContext, ServiceError,
};

/// Lifecycle stations a service passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServicePhase {
    #[default]
    Created,
    Initialized,
    Started,
    ShutDown,
}

/// One observed call, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    Initialized { identity: Jid },
    Started,
    ShutDown,
    Processed(Stanza),
    Registered(String),
    Unregistered(String),
}

/// Permissive [`GameService`] double: accepts every call and remembers all
/// of them in order.
///
/// Iq requests are answered with an empty result through the broker, which
/// makes the broker → capture path observable end to end. Clones share the
/// recording, so a test keeps one handle for assertions and gives
/// [`factory`](Self::factory) to the harness.
#[derive(Clone)]
pub struct RecordingGameService {
    name: String,
    description: String,
    recorded: Arc<Mutex<Recorded>>,
}

#[derive(Default)]
struct Recorded {
    phase: ServicePhase,
    identity: Option<Jid>,
    broker: Option<Arc<dyn ComponentBroker>>,
    context: Option<ServiceContext>,
    events: Vec<ServiceEvent>,
}

impl RecordingGameService {
    pub fn new() -> Self {
        Self {
            name: "recording".to_string(),
            description: "Recording game service".to_string(),
            recorded: Arc::default(),
        }
    }

    /// The closure to hand to [`TestGameManager::start`]; binds the
    /// construction context and hands out a clone of this recorder.
    ///
    /// [`TestGameManager::start`]: crate::TestGameManager::start
    pub fn factory(&self) -> impl FnOnce(ServiceContext) -> Arc<RecordingGameService> {
        let service = self.clone();
        move |context| {
            service.recorded().context = Some(context);
            Arc::new(service)
        }
    }

    pub fn phase(&self) -> ServicePhase {
        self.recorded().phase
    }

    /// The identity handed to `initialize`, once it ran.
    pub fn identity(&self) -> Option<Jid> {
        self.recorded().identity.clone()
    }

    pub fn broker(&self) -> Option<Arc<dyn ComponentBroker>> {
        self.recorded().broker.clone()
    }

    /// The context the factory was called with.
    pub fn context(&self) -> Option<ServiceContext> {
        self.recorded().context.clone()
    }

    /// Every observed call, oldest first.
    pub fn events(&self) -> Vec<ServiceEvent> {
        self.recorded().events.clone()
    }

    /// The stanzas handed to `process_stanza`, oldest first.
    pub fn processed(&self) -> Vec<Stanza> {
        self.recorded()
            .events
            .iter()
            .filter_map(|event| match event {
                ServiceEvent::Processed(stanza) => Some(stanza.clone()),
                _ => None,
            })
            .collect()
    }

    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RecordingGameService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameService for RecordingGameService {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn initialize(
        &self,
        identity: Jid,
        broker: Arc<dyn ComponentBroker>,
    ) -> Result<(), ComponentError> {
        let mut recorded = self.recorded();
        recorded.phase = ServicePhase::Initialized;
        recorded.identity = Some(identity.clone());
        recorded.broker = Some(broker);
        recorded.events.push(ServiceEvent::Initialized { identity });
        Ok(())
    }

    async fn start(&self) -> Result<(), ComponentError> {
        let mut recorded = self.recorded();
        recorded.phase = ServicePhase::Started;
        recorded.events.push(ServiceEvent::Started);
        Ok(())
    }

    async fn shutdown(&self) {
        let mut recorded = self.recorded();
        recorded.phase = ServicePhase::ShutDown;
        recorded.events.push(ServiceEvent::ShutDown);
    }

    async fn process_stanza(&self, stanza: Stanza) {
        let broker = {
            let mut recorded = self.recorded();
            recorded.events.push(ServiceEvent::Processed(stanza.clone()));
            recorded.broker.clone()
        };
        if let (Stanza::Iq(request), Some(broker)) = (&stanza, broker) {
            if request.is_request() {
                let reply = Iq::result_for(request);
                if let Err(err) = broker.send_stanza(reply.into()).await {
                    tracing::warn!(error = %err, "Iq reply was not delivered");
                }
            }
        }
    }

    async fn register_game(
        &self,
        namespace: &str,
        _game: Arc<dyn GameHandler>,
    ) -> Result<(), ServiceError> {
        self.recorded()
            .events
            .push(ServiceEvent::Registered(namespace.to_string()));
        Ok(())
    }

    async fn unregister_game(&self, namespace: &str) -> Result<(), ServiceError> {
        self.recorded()
            .events
            .push(ServiceEvent::Unregistered(namespace.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::StubComponentBroker;
    use crate::capture::CaptureQueue;
    use parlor_protocol::{IqPayload, Message};
    use serde_json::json;

    fn broker_over(capture: CaptureQueue) -> Arc<dyn ComponentBroker> {
        Arc::new(StubComponentBroker::new("example.com", capture))
    }

    #[tokio::test]
    async fn records_lifecycle_in_order() {
        let service = RecordingGameService::new();
        assert_eq!(service.phase(), ServicePhase::Created);

        let identity = Jid::component("gaming", "example.com");
        service
            .initialize(identity.clone(), broker_over(CaptureQueue::new()))
            .await
            .expect("initializes");
        assert_eq!(service.phase(), ServicePhase::Initialized);
        service.start().await.expect("starts");
        service.shutdown().await;

        assert_eq!(
            service.events(),
            vec![
                ServiceEvent::Initialized { identity },
                ServiceEvent::Started,
                ServiceEvent::ShutDown,
            ]
        );
        assert_eq!(service.phase(), ServicePhase::ShutDown);
    }

    #[tokio::test]
    async fn answers_iq_requests_through_its_broker() {
        let service = RecordingGameService::new();
        let capture = CaptureQueue::new();
        service
            .initialize(
                Jid::component("gaming", "example.com"),
                broker_over(capture.clone()),
            )
            .await
            .expect("initializes");

        let request = Iq::get(
            Jid::bare("alice", "example.com"),
            Jid::server("gaming.example.com"),
            IqPayload::new("urn:parlor:disco", json!({})),
        );
        service.process_stanza(request.clone().into()).await;

        let Some(Stanza::Iq(reply)) = capture.try_take() else {
            panic!("expected a captured reply");
        };
        assert_eq!(reply.id, request.id);
        assert_eq!(service.processed().len(), 1);
    }

    #[tokio::test]
    async fn plain_messages_are_recorded_but_not_answered() {
        let service = RecordingGameService::new();
        let capture = CaptureQueue::new();
        service
            .initialize(
                Jid::component("gaming", "example.com"),
                broker_over(capture.clone()),
            )
            .await
            .expect("initializes");

        let message = Message::groupchat(
            Jid::full("alice", "example.com", "seat"),
            Jid::bare("chess", "gaming.example.com"),
            "e4",
        );
        service.process_stanza(message.clone().into()).await;

        assert!(capture.is_empty());
        assert_eq!(service.processed(), vec![Stanza::from(message)]);
    }
}
