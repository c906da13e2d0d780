//! XMPP-style addresses.
//!
//! A [`Jid`] is the `local@domain/resource` address form used to route
//! stanzas. Components and servers are addressed by bare domains; occupants
//! and accounts carry a local part and optionally a resource.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced while parsing a textual jid.
#[derive(Debug, Error)]
pub enum JidError {
    /// The input was empty.
    #[error("jid is empty")]
    Empty,
    /// Nothing before the `@` separator.
    #[error("jid has an empty local part")]
    EmptyLocal,
    /// No domain between `@` and `/` (or end of input).
    #[error("jid has an empty domain")]
    EmptyDomain,
    /// A `/` separator with nothing after it.
    #[error("jid has an empty resource")]
    EmptyResource,
    /// The domain itself contains an `@`.
    #[error("jid domain contains '@'")]
    InvalidDomain,
}

/// An XMPP-style address: optional local part, mandatory domain, optional
/// resource.
///
/// Constructors never validate their arguments beyond shape; parsing via
/// [`FromStr`] does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jid {
    local: Option<String>,
    domain: String,
    resource: Option<String>,
}

impl Jid {
    /// Address a server or component by bare domain.
    pub fn server(domain: impl Into<String>) -> Self {
        Self {
            local: None,
            domain: domain.into(),
            resource: None,
        }
    }

    /// Address a component mounted at `subdomain.domain`.
    pub fn component(subdomain: &str, domain: &str) -> Self {
        Self::server(format!("{subdomain}.{domain}"))
    }

    /// A bare `local@domain` address.
    pub fn bare(local: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            local: Some(local.into()),
            domain: domain.into(),
            resource: None,
        }
    }

    /// A full `local@domain/resource` address.
    pub fn full(
        local: impl Into<String>,
        domain: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            local: Some(local.into()),
            domain: domain.into(),
            resource: Some(resource.into()),
        }
    }

    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// The same address with the resource dropped.
    pub fn to_bare(&self) -> Jid {
        Jid {
            local: self.local.clone(),
            domain: self.domain.clone(),
            resource: None,
        }
    }

    pub fn is_bare(&self) -> bool {
        self.resource.is_none()
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(local) = &self.local {
            write!(f, "{local}@")?;
        }
        write!(f, "{}", self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{resource}")?;
        }
        Ok(())
    }
}

impl FromStr for Jid {
    type Err = JidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(JidError::Empty);
        }
        let (addr, resource) = match s.split_once('/') {
            Some((_, "")) => return Err(JidError::EmptyResource),
            Some((addr, resource)) => (addr, Some(resource.to_string())),
            None => (s, None),
        };
        let (local, domain) = match addr.split_once('@') {
            Some(("", _)) => return Err(JidError::EmptyLocal),
            Some((local, domain)) => (Some(local.to_string()), domain),
            None => (None, addr),
        };
        if domain.is_empty() {
            return Err(JidError::EmptyDomain);
        }
        if domain.contains('@') {
            return Err(JidError::InvalidDomain);
        }
        Ok(Jid {
            local,
            domain: domain.to_string(),
            resource,
        })
    }
}

// Jids travel as their text form, not as a struct.
impl Serialize for Jid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Jid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_jid() {
        let jid: Jid = "alice@example.com/table".parse().expect("valid jid");
        assert_eq!(jid.local(), Some("alice"));
        assert_eq!(jid.domain(), "example.com");
        assert_eq!(jid.resource(), Some("table"));
    }

    #[test]
    fn parses_server_jid() {
        let jid: Jid = "gaming.example.com".parse().expect("valid jid");
        assert_eq!(jid.local(), None);
        assert_eq!(jid.domain(), "gaming.example.com");
        assert!(jid.is_bare());
    }

    #[test]
    fn resource_may_contain_separators() {
        let jid: Jid = "alice@example.com/seat@table/2".parse().expect("valid jid");
        assert_eq!(jid.resource(), Some("seat@table/2"));
    }

    #[test]
    fn rejects_malformed_jids() {
        assert!(matches!("".parse::<Jid>(), Err(JidError::Empty)));
        assert!(matches!("@example.com".parse::<Jid>(), Err(JidError::EmptyLocal)));
        assert!(matches!("alice@".parse::<Jid>(), Err(JidError::EmptyDomain)));
        assert!(matches!(
            "alice@example.com/".parse::<Jid>(),
            Err(JidError::EmptyResource)
        ));
        assert!(matches!(
            "alice@bad@domain".parse::<Jid>(),
            Err(JidError::InvalidDomain)
        ));
    }

    #[test]
    fn display_round_trips() {
        for text in ["alice@example.com/table", "alice@example.com", "example.com"] {
            let jid: Jid = text.parse().expect("valid jid");
            assert_eq!(jid.to_string(), text);
        }
    }

    #[test]
    fn component_composes_subdomain() {
        let jid = Jid::component("gaming", "example.com");
        assert_eq!(jid.to_string(), "gaming.example.com");
    }

    #[test]
    fn to_bare_drops_resource() {
        let jid = Jid::full("alice", "example.com", "table");
        assert_eq!(jid.to_bare(), Jid::bare("alice", "example.com"));
    }

    #[test]
    fn serializes_as_text() {
        let jid = Jid::bare("alice", "example.com");
        let json = serde_json::to_string(&jid).expect("serialize");
        assert_eq!(json, "\"alice@example.com\"");
        let back: Jid = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, jid);
    }
}
