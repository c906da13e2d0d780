//! Parlor Protocol - Stanza vocabulary shared by game services and harnesses
//!
//! This crate contains the address and packet types everything else speaks:
//! - [`Jid`] addresses (`local@domain/resource`)
//! - The three stanza families: [`Message`], [`Presence`], [`Iq`]
//! - The [`Stanza`] envelope that routes and captures them
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, uuid, and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No transport** - XML framing and connection handling live elsewhere

pub mod jid;
pub mod stanza;

pub use jid::{Jid, JidError};
pub use stanza::{Iq, IqKind, IqPayload, Message, MessageKind, Presence, PresenceKind, Stanza};
