//! The harness: a stand-in chat server around one game service.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use parlor_protocol::Stanza;
use parlor_service::{
    ComponentBroker, ComponentError, GameHandler, GameManager, GameRegistry, GameRepo, GameService,
    LocalePort, ServiceContext, ServiceError,
};

use crate::broker::StubComponentBroker;
use crate::capture::CaptureQueue;
use crate::config::HarnessConfig;
use crate::locale::StaticLocale;
use crate::repo::MemoryGameRepo;

/// Construction failures. The harness comes up whole or not at all.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("service failed to come up: {0}")]
    ServiceInit(#[from] ComponentError),
}

/// An in-process stand-in for the server side of the component contract.
///
/// Owns the service under test together with synthetic versions of every
/// server collaborator: component broker, game registry, outbound capture
/// queue, room repo and locale. Implements [`GameManager`] so code under
/// test can talk to it exactly as it would to a real manager.
pub struct TestGameManager {
    config: HarnessConfig,
    service: Arc<dyn GameService>,
    registry: GameRegistry,
    capture: CaptureQueue,
    broker: Arc<StubComponentBroker>,
    repo: Arc<dyn GameRepo>,
    locale: Arc<dyn LocalePort>,
}

impl TestGameManager {
    /// Bring a harness up around the service produced by `factory`, with
    /// default config, repo and locale.
    pub async fn start<S, F>(factory: F) -> Result<Self, HarnessError>
    where
        S: GameService + 'static,
        F: FnOnce(ServiceContext) -> Arc<S>,
    {
        Self::builder().start(factory).await
    }

    pub fn builder() -> TestGameManagerBuilder {
        TestGameManagerBuilder::default()
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The outbound capture queue. Clone it to keep observing after
    /// [`destroy`](Self::destroy).
    pub fn capture(&self) -> &CaptureQueue {
        &self.capture
    }

    /// The shared game registry. Clone it to keep observing after
    /// [`destroy`](Self::destroy).
    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn repo(&self) -> Arc<dyn GameRepo> {
        Arc::clone(&self.repo)
    }

    pub fn broker(&self) -> Arc<StubComponentBroker> {
        Arc::clone(&self.broker)
    }

    /// FIFO drain of captured outbound stanzas, waiting up to
    /// `config.poll_timeout` for one to arrive.
    pub async fn take_sent(&self) -> Option<Stanza> {
        self.capture.poll(self.config.poll_timeout).await
    }

    /// Captured stanzas not yet drained.
    pub fn sent_depth(&self) -> usize {
        self.capture.len()
    }

    /// Tear the harness down: detach every registered game through the
    /// public unregistration path, shut the service down, then empty the
    /// registry and close the capture queue. Per-game failures are logged
    /// and teardown continues.
    pub async fn destroy(self) {
        for namespace in self.registry.namespaces() {
            if let Err(err) = self.unregister_game(&namespace).await {
                tracing::warn!(
                    namespace = %namespace,
                    error = %err,
                    "Unregistration failed during teardown"
                );
            }
        }
        self.service.shutdown().await;
        self.registry.clear();
        self.capture.close();
        self.capture.clear();
        tracing::debug!("Harness torn down");
    }
}

#[async_trait]
impl GameManager for TestGameManager {
    fn server_name(&self) -> &str {
        &self.config.domain
    }

    fn locale(&self) -> Arc<dyn LocalePort> {
        Arc::clone(&self.locale)
    }

    fn service(&self) -> Arc<dyn GameService> {
        Arc::clone(&self.service)
    }

    fn is_game_registered(&self, namespace: &str) -> bool {
        !namespace.is_empty() && self.registry.contains(namespace)
    }

    async fn register_game(
        &self,
        namespace: &str,
        game: Arc<dyn GameHandler>,
    ) -> Result<(), ServiceError> {
        if namespace.is_empty() {
            return Err(ServiceError::EmptyNamespace);
        }
        // Delegation first; if it fails the registry stays untouched. The
        // two steps are independent, not a transaction.
        self.service
            .register_game(namespace, Arc::clone(&game))
            .await?;
        self.registry.insert(namespace, game);
        Ok(())
    }

    async fn unregister_game(&self, namespace: &str) -> Result<(), ServiceError> {
        self.service.unregister_game(namespace).await?;
        self.registry.remove(namespace);
        Ok(())
    }

    async fn process_stanza(&self, stanza: Stanza) {
        self.service.process_stanza(stanza).await;
    }

    async fn send_stanza(&self, stanza: Stanza) -> Result<(), ComponentError> {
        if self.capture.push(stanza) {
            Ok(())
        } else {
            Err(ComponentError::failed("capture queue is closed"))
        }
    }
}

/// Builder for harnesses that need a non-default config, repo or locale.
#[derive(Default)]
pub struct TestGameManagerBuilder {
    config: Option<HarnessConfig>,
    repo: Option<Arc<dyn GameRepo>>,
    locale: Option<Arc<dyn LocalePort>>,
}

impl TestGameManagerBuilder {
    pub fn config(mut self, config: HarnessConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn repo(mut self, repo: Arc<dyn GameRepo>) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn locale(mut self, locale: Arc<dyn LocalePort>) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Assemble the collaborators, call `factory` with their context, then
    /// run the service's `initialize` (with the synthetic component identity
    /// and the stub broker) and `start`. Any failure aborts construction;
    /// no harness is produced.
    pub async fn start<S, F>(self, factory: F) -> Result<TestGameManager, HarnessError>
    where
        S: GameService + 'static,
        F: FnOnce(ServiceContext) -> Arc<S>,
    {
        let config = self.config.unwrap_or_default();
        let repo = self
            .repo
            .unwrap_or_else(|| Arc::new(MemoryGameRepo::new()));
        let locale = self
            .locale
            .unwrap_or_else(|| Arc::new(StaticLocale::new()));
        let registry = GameRegistry::new();
        let capture = CaptureQueue::new();
        let broker = Arc::new(StubComponentBroker::new(
            config.domain.clone(),
            capture.clone(),
        ));

        let context = ServiceContext {
            subdomain: config.subdomain.clone(),
            description: config.description.clone(),
            registry: registry.clone(),
            repo: Arc::clone(&repo),
            locale: Arc::clone(&locale),
        };
        let service: Arc<dyn GameService> = factory(context);

        let identity = config.component_jid();
        tracing::debug!(identity = %identity, service = %service.name(), "Bringing service up");
        service
            .initialize(identity, Arc::clone(&broker) as Arc<dyn ComponentBroker>)
            .await?;
        service.start().await?;

        Ok(TestGameManager {
            config,
            service,
            registry,
            capture,
            broker,
            repo,
            locale,
        })
    }
}
