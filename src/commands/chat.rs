//! Interactive console conversation handler
//!
//! A thin transport adapter over stdin/stdout: each line typed becomes an
//! inbound event for one owner, every event goes through the message-log
//! middleware, and the engine's outbound messages are rendered to the
//! terminal. Menu buttons print with their selection tokens; typing a token
//! back (`film;3`, `search_by:genre`) plays the part of pressing the
//! button.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::dialogue::{BotCommand, Engine, FILTER_CHOICE_PREFIX};
use crate::error::Result;
use crate::session::OwnerId;
use crate::transport::{self, InboundEvent, MessageLog, OutboundMessage, Transport};
use async_trait::async_trait;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// Prefix selection tokens for catalog entries start with
const ENTRY_TOKEN_PREFIX: &str = "film;";

/// Console rendering of outbound messages
pub struct ConsoleTransport;

#[async_trait]
impl Transport for ConsoleTransport {
    async fn deliver(&self, _owner: &OwnerId, message: &OutboundMessage) -> Result<()> {
        match message {
            OutboundMessage::Text(text) => println!("{}", text),
            OutboundMessage::Reply(text) => println!("{}", text.cyan()),
            OutboundMessage::Photo {
                url,
                caption,
                filename,
            } => {
                println!("{}", format!("[photo {} <- {}]", filename, url).yellow());
                println!("{}", caption);
            }
            OutboundMessage::Menu { prompt, choices } => {
                println!("{}", prompt);
                for choice in choices {
                    println!("  {} {}", format!("[{}]", choice.token).green(), choice.label);
                }
            }
        }
        Ok(())
    }
}

/// Classify a console line as a button press or plain text
fn classify_input(owner: &OwnerId, line: &str) -> InboundEvent {
    if line.starts_with(ENTRY_TOKEN_PREFIX) || line.starts_with(FILTER_CHOICE_PREFIX) {
        InboundEvent::selection(owner.clone(), line)
    } else {
        InboundEvent::text(owner.clone(), line)
    }
}

/// Run the interactive console conversation
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `catalog` - The shared catalog, already seeded
/// * `owner` - Owner id console events are tagged with
pub async fn run_chat(config: Config, catalog: Arc<Catalog>, owner: String) -> Result<()> {
    tracing::info!("Starting interactive console chat");

    let engine = Engine::new(catalog, config.service.name.clone());
    let log = MessageLog::open(&config.log.message_log)?;
    let transport = ConsoleTransport;
    let owner = OwnerId::new(owner);

    println!(
        "{} — type {} to begin, 'exit' to leave.",
        config.service.name.bold(),
        "/start".green()
    );

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                    break;
                }
                rl.add_history_entry(trimmed)?;

                let event = classify_input(&owner, trimmed);
                let replies = transport::handle_logged(&engine, &log, event).await?;
                for message in &replies {
                    transport.deliver(&owner, message).await?;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Bye. Commands next time: {}", BotCommand::usage());
    Ok(())
}
