//! Filmdesk - conversational film catalog service library
//!
//! Many independent users hold concurrent multi-turn dialogues with one
//! shared service that maintains a small mutable catalog of films.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `catalog`: the shared film store with stable, never-reused identities
//! - `session`: per-user dialogue state and partially entered fields
//! - `dialogue`: the engine routing events through the dialogue state machine
//! - `resolver`: selection tokens binding UI buttons to catalog identities
//! - `transport`: the messaging boundary and message-log middleware
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use filmdesk::{Catalog, Engine, InboundEvent};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let catalog = Arc::new(Catalog::new());
//!     let engine = Engine::new(catalog, "Filmdesk");
//!     let replies = engine
//!         .handle_event(InboundEvent::text("alice", "/start"))
//!         .await?;
//!     println!("{:?}", replies);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod resolver;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use catalog::{Catalog, Entry, EntryDraft, EntryId, FilterField};
pub use config::Config;
pub use dialogue::{BotCommand, DialogueState, Engine};
pub use error::{FilmdeskError, Result};
pub use session::{OwnerId, PendingFields, SessionStore};
pub use transport::{
    handle_logged, Choice, EventKind, InboundEvent, MessageLog, OutboundMessage, Transport,
};
