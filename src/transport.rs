//! Messaging transport model
//!
//! The chat network itself is an external collaborator. This module pins
//! down the boundary: the inbound event shape the dialogue engine consumes,
//! the outbound message shapes it produces, the [`Transport`] trait an
//! adapter implements to deliver them, and the message-log middleware an
//! adapter wraps around each `handle_event` call.

use crate::dialogue::Engine;
use crate::error::{FilmdeskError, Result};
use crate::session::OwnerId;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Payload of an inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Free text typed by the user
    Text(String),
    /// A button press carrying its selection token
    Selection(String),
}

impl EventKind {
    /// The raw content, for logging
    pub fn content(&self) -> &str {
        match self {
            Self::Text(s) | Self::Selection(s) => s,
        }
    }
}

/// One inbound event from the transport, tagged with its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub owner: OwnerId,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn text(owner: impl Into<OwnerId>, text: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            kind: EventKind::Text(text.into()),
        }
    }

    pub fn selection(owner: impl Into<OwnerId>, token: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            kind: EventKind::Selection(token.into()),
        }
    }
}

/// A selectable choice rendered as a button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label shown to the user
    pub label: String,
    /// Token handed back when the choice is pressed
    pub token: String,
}

/// An outbound message produced by the dialogue engine
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    /// Plain message to the conversation
    Text(String),
    /// Message bound to the event that triggered it
    Reply(String),
    /// Display image with caption
    Photo {
        url: String,
        caption: String,
        filename: String,
    },
    /// Prompt plus a list of selectable choices
    Menu {
        prompt: String,
        choices: Vec<Choice>,
    },
}

/// Delivery side of a transport adapter
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one outbound message to the owner's conversation
    async fn deliver(&self, owner: &OwnerId, message: &OutboundMessage) -> Result<()>;
}

/// Append-only log of inbound traffic
///
/// Records one `timestamp | owner | content` line per event, the same
/// record the service keeps for every call, plus a tracing event. Invoked
/// by the transport adapter around `handle_event`; the dialogue engine
/// itself knows nothing about it.
pub struct MessageLog {
    path: PathBuf,
    file: Mutex<std::fs::File>,
}

impl MessageLog {
    /// Open (or create) the log file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                FilmdeskError::Transport(format!(
                    "Failed to open message log {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    fn file(&self) -> MutexGuard<'_, std::fs::File> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one inbound event
    pub fn record(&self, owner: &OwnerId, kind: &EventKind) -> Result<()> {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} | {} | {}\n", now, owner, kind.content());
        self.file()
            .write_all(line.as_bytes())
            .map_err(|e| FilmdeskError::Transport(format!("Failed to write message log: {}", e)))?;
        Ok(())
    }

    /// Path this log writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Run one event through the engine with logging middleware applied
///
/// This is the call transport adapters are expected to make for every
/// inbound event: record the event, trace it, then hand it to the engine.
pub async fn handle_logged(
    engine: &Engine,
    log: &MessageLog,
    event: InboundEvent,
) -> Result<Vec<OutboundMessage>> {
    log.record(&event.owner, &event.kind)?;
    tracing::info!(
        owner = %event.owner,
        kind = match &event.kind {
            EventKind::Text(_) => "text",
            EventKind::Selection(_) => "selection",
        },
        "Handling inbound event"
    );
    engine.handle_event(event).await
}
