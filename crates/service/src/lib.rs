//! Parlor Service - Component contract, game registry and error taxonomy
//!
//! This crate defines the seams between a chat server and the game services
//! that attach to it as external components:
//! - Port traits: [`GameManager`], [`GameService`], [`GameHandler`],
//!   [`ComponentBroker`], [`GameRepo`], [`LocalePort`]
//! - The shared [`GameRegistry`] of hosted games
//! - The [`ServiceContext`] handed to service factories
//! - The error taxonomy ([`ComponentError`], [`ServiceError`], [`RepoError`])
//!
//! Implementations live elsewhere; this crate is the contract.

pub mod error;
pub mod ports;
pub mod registry;

pub use error::{ComponentError, RepoError, ServiceError};
pub use ports::{
    ComponentBroker, GameHandler, GameManager, GameRepo, GameService, LocalePort, RoomRecord,
    ServiceContext,
};
pub use registry::GameRegistry;
