//! Parlor Testkit - In-process harness for testing game services
//!
//! A stand-in for the server side of the component contract, so a game
//! service can be exercised without a running chat server:
//! - [`TestGameManager`] wires one service to synthetic collaborators and
//!   implements [`GameManager`](parlor_service::GameManager)
//! - [`StubComponentBroker`] routes outbound stanzas into the capture queue
//!   and rejects the server capabilities a test has no use for
//! - [`CaptureQueue`] is the FIFO the captured traffic drains from, with a
//!   bounded wait
//! - [`MemoryGameRepo`], [`StaticLocale`], [`StubGame`] and
//!   [`RecordingGameService`] are the default collaborators and fixtures

pub mod broker;
pub mod capture;
pub mod config;
pub mod game;
pub mod harness;
pub mod locale;
pub mod logging;
pub mod repo;
pub mod service;

pub use broker::StubComponentBroker;
pub use capture::CaptureQueue;
pub use config::HarnessConfig;
pub use game::StubGame;
pub use harness::{HarnessError, TestGameManager, TestGameManagerBuilder};
pub use locale::StaticLocale;
pub use logging::init_tracing;
pub use repo::MemoryGameRepo;
pub use service::{RecordingGameService, ServiceEvent, ServicePhase};
