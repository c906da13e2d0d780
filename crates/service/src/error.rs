//! Error taxonomy for the component contract.

use thiserror::Error;

/// Failures crossing the component-broker boundary.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// The broker does not offer the requested capability, and never will.
    /// Callers may treat this as a permanent rejection.
    #[error("feature not implemented: {feature}")]
    Unsupported { feature: String },
    /// The capability exists but the operation failed.
    #[error("component operation failed: {0}")]
    Failed(String),
}

impl ComponentError {
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Failures raised by a game service or the manager in front of it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Games are keyed by namespace; an empty key is never routable.
    #[error("game namespace is empty")]
    EmptyNamespace,
    #[error("game already registered: {0}")]
    AlreadyRegistered(String),
    #[error("game not registered: {0}")]
    NotRegistered(String),
    #[error("service failure: {0}")]
    Failed(String),
}

/// Failures of the room persistence seam.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("no room {room} under {namespace}")]
    NotFound { namespace: String, room: String },
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("serialization failure: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Serialization(err.to_string())
    }
}
