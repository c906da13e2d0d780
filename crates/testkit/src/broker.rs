//! Component-manager stub.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use parlor_protocol::{Iq, Stanza};
use parlor_service::{ComponentBroker, ComponentError, GameService};

use crate::capture::CaptureQueue;

/// The server's component-manager surface, reduced to what unit tests need.
///
/// Outbound stanzas land in the capture queue shared with the harness.
/// Properties are scoped to this instance; two brokers never see each
/// other's entries. Everything else is rejected as unsupported rather than
/// silently dropped, and dependent tests assert on that rejection.
#[derive(Debug)]
pub struct StubComponentBroker {
    domain: String,
    capture: CaptureQueue,
    properties: RwLock<HashMap<String, String>>,
}

impl StubComponentBroker {
    /// `capture` is a clone of the harness queue; both drain from the same
    /// buffer.
    pub fn new(domain: impl Into<String>, capture: CaptureQueue) -> Self {
        Self {
            domain: domain.into(),
            capture,
            properties: RwLock::default(),
        }
    }

    pub fn capture(&self) -> &CaptureQueue {
        &self.capture
    }
}

#[async_trait]
impl ComponentBroker for StubComponentBroker {
    async fn send_stanza(&self, stanza: Stanza) -> Result<(), ComponentError> {
        if self.capture.push(stanza) {
            Ok(())
        } else {
            Err(ComponentError::failed("capture queue is closed"))
        }
    }

    async fn query(&self, _request: Iq, _timeout: Duration) -> Result<Iq, ComponentError> {
        Err(ComponentError::unsupported("query"))
    }

    async fn add_component(
        &self,
        _subdomain: &str,
        _service: Arc<dyn GameService>,
    ) -> Result<(), ComponentError> {
        Err(ComponentError::unsupported("add_component"))
    }

    async fn remove_component(&self, _subdomain: &str) -> Result<(), ComponentError> {
        Err(ComponentError::unsupported("remove_component"))
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_property(&self, key: &str, value: &str) {
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn server_name(&self) -> &str {
        &self.domain
    }

    fn is_external(&self) -> bool {
        false
    }
}
