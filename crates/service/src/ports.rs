//! Port traits for the component contract.
//!
//! A game *service* attaches to a chat server through a [`ComponentBroker`],
//! hosts [`GameHandler`]s keyed by namespace, and is driven by a
//! [`GameManager`]. The traits here are the seams a harness (or a real
//! server) plugs into; none of them carry game rules.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parlor_protocol::{Iq, Jid, Stanza};
use serde::{Deserialize, Serialize};

use crate::error::{ComponentError, RepoError, ServiceError};
use crate::registry::GameRegistry;

/// A pluggable game hosted by a service.
///
/// Registered under a namespace; carries discovery metadata only.
pub trait GameHandler: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}

/// Locale lookup for user-facing strings.
pub trait LocalePort: Send + Sync {
    fn localized(&self, key: &str) -> String;
}

/// Persistence seam for game rooms.
#[async_trait]
pub trait GameRepo: Send + Sync {
    async fn load_rooms(&self, namespace: &str) -> Result<Vec<RoomRecord>, RepoError>;
    async fn save_room(&self, room: &RoomRecord) -> Result<(), RepoError>;
    async fn delete_room(&self, namespace: &str, room: &str) -> Result<(), RepoError>;
}

/// One room of one game, persisted as an opaque state blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub namespace: String,
    pub room: String,
    pub state: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl RoomRecord {
    pub fn new(
        namespace: impl Into<String>,
        room: impl Into<String>,
        state: serde_json::Value,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            room: room.into(),
            state,
            updated_at: Utc::now(),
        }
    }
}

/// The server-side component-manager surface a service talks to.
#[async_trait]
pub trait ComponentBroker: Send + Sync {
    /// Route an outbound stanza towards the server.
    async fn send_stanza(&self, stanza: Stanza) -> Result<(), ComponentError>;

    /// Send an iq request and wait up to `timeout` for its answer.
    async fn query(&self, request: Iq, timeout: Duration) -> Result<Iq, ComponentError>;

    /// Mount a further service under `subdomain` of the server.
    async fn add_component(
        &self,
        subdomain: &str,
        service: Arc<dyn GameService>,
    ) -> Result<(), ComponentError>;

    async fn remove_component(&self, subdomain: &str) -> Result<(), ComponentError>;

    fn get_property(&self, key: &str) -> Option<String>;

    fn set_property(&self, key: &str, value: &str);

    /// The domain of the server this broker fronts.
    fn server_name(&self) -> &str;

    /// Whether the component runs out-of-process from the server.
    fn is_external(&self) -> bool;
}

/// The game-serving component itself.
///
/// Lifecycle: `initialize` (once, with the component identity and a broker),
/// then `start`, then traffic via `process_stanza`, then `shutdown`.
#[async_trait]
pub trait GameService: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    async fn initialize(
        &self,
        identity: Jid,
        broker: Arc<dyn ComponentBroker>,
    ) -> Result<(), ComponentError>;

    async fn start(&self) -> Result<(), ComponentError>;

    async fn shutdown(&self);

    /// An inbound stanza addressed to the component.
    async fn process_stanza(&self, stanza: Stanza);

    async fn register_game(
        &self,
        namespace: &str,
        game: Arc<dyn GameHandler>,
    ) -> Result<(), ServiceError>;

    async fn unregister_game(&self, namespace: &str) -> Result<(), ServiceError>;
}

/// The manager in front of a service: registration bookkeeping plus the
/// outbound send path.
#[async_trait]
pub trait GameManager: Send + Sync {
    fn server_name(&self) -> &str;

    fn locale(&self) -> Arc<dyn LocalePort>;

    fn service(&self) -> Arc<dyn GameService>;

    fn is_game_registered(&self, namespace: &str) -> bool;

    async fn register_game(
        &self,
        namespace: &str,
        game: Arc<dyn GameHandler>,
    ) -> Result<(), ServiceError>;

    async fn unregister_game(&self, namespace: &str) -> Result<(), ServiceError>;

    async fn process_stanza(&self, stanza: Stanza);

    async fn send_stanza(&self, stanza: Stanza) -> Result<(), ComponentError>;
}

/// Everything a service factory needs: identity metadata plus the shared
/// collaborators, handed over explicitly.
#[derive(Clone)]
pub struct ServiceContext {
    pub subdomain: String,
    pub description: String,
    pub registry: GameRegistry,
    pub repo: Arc<dyn GameRepo>,
    pub locale: Arc<dyn LocalePort>,
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("subdomain", &self.subdomain)
            .field("description", &self.description)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
