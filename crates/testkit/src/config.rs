//! Harness configuration.

use std::time::Duration;

use parlor_protocol::Jid;

/// Knobs for one harness instance.
///
/// Configured in code by the test that owns the harness; there is no
/// environment or file loading. Defaults mirror a small development server.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Domain of the synthetic chat server.
    pub domain: String,
    /// Subdomain the game component mounts under.
    pub subdomain: String,
    /// Discovery description of the component.
    pub description: String,
    /// How long [`take_sent`](crate::TestGameManager::take_sent) waits for an
    /// outbound stanza before giving up.
    pub poll_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            domain: "example.com".to_string(),
            subdomain: "gaming".to_string(),
            description: "A gaming component for testing".to_string(),
            poll_timeout: Duration::from_secs(2),
        }
    }
}

impl HarnessConfig {
    /// The component identity, `{subdomain}.{domain}`.
    pub fn component_jid(&self) -> Jid {
        Jid::component(&self.subdomain, &self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_synthetic_server() {
        let config = HarnessConfig::default();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.subdomain, "gaming");
        assert_eq!(config.poll_timeout, Duration::from_secs(2));
    }

    #[test]
    fn component_jid_composes_subdomain_and_domain() {
        let config = HarnessConfig {
            subdomain: "arena".into(),
            domain: "play.test".into(),
            ..HarnessConfig::default()
        };
        assert_eq!(config.component_jid().to_string(), "arena.play.test");
    }
}
