//! Stanza vocabulary.
//!
//! The three stanza families (message, presence, iq) are modelled as plain
//! data with serde support so harnesses and services can inspect, build and
//! replay traffic without an XML layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::jid::Jid;

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Any routable packet.
///
/// Tagged serialization keeps captures self-describing:
/// `{"type": "message", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stanza {
    Message(Message),
    Presence(Presence),
    Iq(Iq),
}

impl Stanza {
    pub fn id(&self) -> &str {
        match self {
            Stanza::Message(m) => &m.id,
            Stanza::Presence(p) => &p.id,
            Stanza::Iq(iq) => &iq.id,
        }
    }

    pub fn sender(&self) -> Option<&Jid> {
        match self {
            Stanza::Message(m) => m.from.as_ref(),
            Stanza::Presence(p) => p.from.as_ref(),
            Stanza::Iq(iq) => iq.from.as_ref(),
        }
    }

    pub fn recipient(&self) -> Option<&Jid> {
        match self {
            Stanza::Message(m) => m.to.as_ref(),
            Stanza::Presence(p) => p.to.as_ref(),
            Stanza::Iq(iq) => iq.to.as_ref(),
        }
    }
}

impl From<Message> for Stanza {
    fn from(message: Message) -> Self {
        Stanza::Message(message)
    }
}

impl From<Presence> for Stanza {
    fn from(presence: Presence) -> Self {
        Stanza::Presence(presence)
    }
}

impl From<Iq> for Stanza {
    fn from(iq: Iq) -> Self {
        Stanza::Iq(iq)
    }
}

/// A chat or room message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Jid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Jid>,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Message {
    /// A one-to-one chat message.
    pub fn chat(from: Jid, to: Jid, body: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            from: Some(from),
            to: Some(to),
            kind: MessageKind::Chat,
            subject: None,
            body: Some(body.into()),
        }
    }

    /// A message broadcast to a room.
    pub fn groupchat(from: Jid, to: Jid, body: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            from: Some(from),
            to: Some(to),
            kind: MessageKind::GroupChat,
            subject: None,
            body: Some(body.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Normal,
    Chat,
    #[serde(rename = "groupchat")]
    GroupChat,
    Headline,
    Error,
}

/// Availability (or room occupancy) broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Jid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Jid>,
    #[serde(default)]
    pub kind: PresenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Presence {
    pub fn available(from: Jid, to: Jid) -> Self {
        Self {
            id: fresh_id(),
            from: Some(from),
            to: Some(to),
            kind: PresenceKind::Available,
            status: None,
        }
    }

    pub fn unavailable(from: Jid, to: Jid) -> Self {
        Self {
            id: fresh_id(),
            from: Some(from),
            to: Some(to),
            kind: PresenceKind::Unavailable,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceKind {
    #[default]
    Available,
    Unavailable,
    Error,
}

/// An info/query exchange.
///
/// Requests (`get`/`set`) expect exactly one `result` or `error` answer
/// carrying the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iq {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Jid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Jid>,
    pub kind: IqKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<IqPayload>,
}

impl Iq {
    pub fn get(from: Jid, to: Jid, payload: IqPayload) -> Self {
        Self {
            id: fresh_id(),
            from: Some(from),
            to: Some(to),
            kind: IqKind::Get,
            payload: Some(payload),
        }
    }

    pub fn set(from: Jid, to: Jid, payload: IqPayload) -> Self {
        Self {
            id: fresh_id(),
            from: Some(from),
            to: Some(to),
            kind: IqKind::Set,
            payload: Some(payload),
        }
    }

    /// The empty `result` acknowledging `request`: same id, addresses
    /// swapped.
    pub fn result_for(request: &Iq) -> Self {
        Self {
            id: request.id.clone(),
            from: request.to.clone(),
            to: request.from.clone(),
            kind: IqKind::Result,
            payload: None,
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self.kind, IqKind::Get | IqKind::Set)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IqKind {
    Get,
    Set,
    Result,
    Error,
}

/// Namespaced iq body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqPayload {
    pub namespace: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl IqPayload {
    pub fn new(namespace: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            namespace: namespace.into(),
            data,
        }
    }
}
