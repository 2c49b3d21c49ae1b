//! Dialogue engine
//!
//! The engine is the single entry point the transport adapter calls for
//! every inbound event. It looks up the owner's session, routes the event
//! to the active dialogue step (or treats it as a top-level command when
//! idle), validates input, accumulates pending fields, and commits to the
//! catalog when a dialogue completes.
//!
//! Events for different owners run concurrently; events for the same owner
//! are serialized in arrival order through a per-owner async mutex, so the
//! steps of one user's dialogue never interleave. No lock is held between
//! events — state lives in the session store.

use crate::catalog::{Catalog, Entry, EntryDraft};
use crate::error::Result;
use crate::resolver::SelectionResolver;
use crate::session::{OwnerId, PendingFields, SessionStore};
use crate::transport::{Choice, EventKind, InboundEvent, OutboundMessage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use url::Url;

pub mod router;
pub mod states;

pub use router::BotCommand;
pub use states::DialogueState;

/// Token prefix carried by the filter-criteria menu buttons
pub const FILTER_CHOICE_PREFIX: &str = "search_by:";

/// Separator the create form expects between actor names
const ACTORS_SEPARATOR: &str = ", ";

/// The per-user conversation state machine over the shared catalog
pub struct Engine {
    catalog: Arc<Catalog>,
    sessions: SessionStore,
    resolver: SelectionResolver,
    gates: Mutex<HashMap<OwnerId, Arc<tokio::sync::Mutex<()>>>>,
    service_name: String,
}

impl Engine {
    /// Create an engine over the given catalog
    pub fn new(catalog: Arc<Catalog>, service_name: impl Into<String>) -> Self {
        Self {
            resolver: SelectionResolver::new(catalog.clone()),
            catalog,
            sessions: SessionStore::new(),
            gates: Mutex::new(HashMap::new()),
            service_name: service_name.into(),
        }
    }

    /// The session store (exposed for transports that manage lifecycles,
    /// e.g. clearing abandoned sessions on a timeout)
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn gate(&self, owner: &OwnerId) -> Arc<tokio::sync::Mutex<()>> {
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(owner.clone())
            .or_default()
            .clone()
    }

    /// Handle one inbound event, returning the messages to send back
    ///
    /// Same-owner calls are processed strictly in arrival order; calls for
    /// different owners do not block each other.
    pub async fn handle_event(&self, event: InboundEvent) -> Result<Vec<OutboundMessage>> {
        let gate = self.gate(&event.owner);
        let _serialized = gate.lock().await;

        match &event.kind {
            EventKind::Text(text) => self.handle_text(&event.owner, text),
            EventKind::Selection(token) => self.handle_selection(&event.owner, token),
        }
    }

    fn handle_text(&self, owner: &OwnerId, text: &str) -> Result<Vec<OutboundMessage>> {
        if let Some(command) = BotCommand::parse(text) {
            // A new top-level command cancels any in-flight dialogue; its
            // pending fields must not leak into the next flow.
            self.sessions.clear(owner);
            return self.run_command(owner, command);
        }

        let session = self.sessions.get(owner);
        match session.state {
            Some(state) => self.dialogue_step(owner, state, text),
            None => Ok(vec![OutboundMessage::Reply(format!(
                "I did not catch that. Try one of: {}",
                BotCommand::usage()
            ))]),
        }
    }

    fn run_command(&self, owner: &OwnerId, command: BotCommand) -> Result<Vec<OutboundMessage>> {
        tracing::debug!(owner = %owner, ?command, "Running top-level command");
        match command {
            BotCommand::Start => Ok(vec![OutboundMessage::Text(format!(
                "Hello, {}!\nI am {}, a film catalog you can talk to.\nCommands: {}",
                owner,
                self.service_name,
                BotCommand::usage()
            ))]),

            BotCommand::List => {
                let entries = self.catalog.list_all();
                if entries.is_empty() {
                    return Ok(vec![OutboundMessage::Text(
                        "The catalog is empty. Add the first film with /create.".into(),
                    )]);
                }
                let choices = entries
                    .iter()
                    .map(|entry| Choice {
                        label: entry.name.clone(),
                        token: self.resolver.token_for(entry),
                    })
                    .collect();
                Ok(vec![OutboundMessage::Menu {
                    prompt: "Film list. Pick a title for details.".into(),
                    choices,
                }])
            }

            BotCommand::Recommend => match self.catalog.recommend() {
                Some(entry) => Ok(vec![OutboundMessage::Text(format!(
                    "Worth a watch:\n{} - {} (rating: {})",
                    entry.name,
                    entry.description,
                    format_rating(entry.rating)
                ))]),
                None => Ok(vec![OutboundMessage::Text(
                    "No rated films to recommend yet.".into(),
                )]),
            },

            BotCommand::Search => {
                self.sessions.set_state(owner, Some(DialogueState::SearchQuery));
                Ok(vec![OutboundMessage::Reply(
                    "Enter a film title to search for:".into(),
                )])
            }

            BotCommand::Filter => {
                self.sessions
                    .set_state(owner, Some(DialogueState::FilterCriteria));
                Ok(vec![OutboundMessage::Menu {
                    prompt: "Choose what to filter by:".into(),
                    choices: vec![
                        Choice {
                            label: "By title".into(),
                            token: format!("{}title", FILTER_CHOICE_PREFIX),
                        },
                        Choice {
                            label: "By genre".into(),
                            token: format!("{}genre", FILTER_CHOICE_PREFIX),
                        },
                        Choice {
                            label: "By actor".into(),
                            token: format!("{}actors", FILTER_CHOICE_PREFIX),
                        },
                    ],
                }])
            }

            BotCommand::Delete => {
                self.sessions.set_state(owner, Some(DialogueState::DeleteQuery));
                Ok(vec![OutboundMessage::Reply(
                    "Enter the title of the film to delete:".into(),
                )])
            }

            BotCommand::Edit => {
                self.sessions.set_state(owner, Some(DialogueState::EditQuery));
                Ok(vec![OutboundMessage::Reply(
                    "Enter the title of the film to edit:".into(),
                )])
            }

            BotCommand::Rate => {
                self.sessions.set_state(owner, Some(DialogueState::RateQuery));
                Ok(vec![OutboundMessage::Reply(
                    "Enter the title of the film to rate:".into(),
                )])
            }

            BotCommand::Create => {
                self.sessions.set_state(owner, Some(DialogueState::FilmName));
                Ok(vec![OutboundMessage::Reply("Enter the film title.".into())])
            }
        }
    }

    fn dialogue_step(
        &self,
        owner: &OwnerId,
        state: DialogueState,
        text: &str,
    ) -> Result<Vec<OutboundMessage>> {
        tracing::debug!(owner = %owner, %state, "Dialogue step");
        match state {
            DialogueState::FilmName => {
                self.sessions.update_fields(
                    owner,
                    PendingFields {
                        name: Some(text.to_string()),
                        ..Default::default()
                    },
                );
                self.sessions
                    .set_state(owner, Some(DialogueState::FilmDescription));
                Ok(vec![OutboundMessage::Reply(
                    "Enter the film description.".into(),
                )])
            }

            DialogueState::FilmDescription => {
                self.sessions.update_fields(
                    owner,
                    PendingFields {
                        description: Some(text.to_string()),
                        ..Default::default()
                    },
                );
                self.sessions
                    .set_state(owner, Some(DialogueState::FilmRating));
                Ok(vec![OutboundMessage::Reply(
                    "Enter a rating from 0 to 10.".into(),
                )])
            }

            DialogueState::FilmRating => {
                // Bad input re-prompts in place; the form is not abandoned.
                match text.trim().parse::<f64>() {
                    Ok(value) if (0.0..=10.0).contains(&value) => {
                        self.sessions.update_fields(
                            owner,
                            PendingFields {
                                rating: Some(value),
                                ..Default::default()
                            },
                        );
                        self.sessions
                            .set_state(owner, Some(DialogueState::FilmGenre));
                        Ok(vec![OutboundMessage::Reply("Enter the genre.".into())])
                    }
                    _ => Ok(vec![OutboundMessage::Reply(
                        "Enter a number from 0 to 10.".into(),
                    )]),
                }
            }

            DialogueState::FilmGenre => {
                self.sessions.update_fields(
                    owner,
                    PendingFields {
                        genre: Some(text.to_string()),
                        ..Default::default()
                    },
                );
                self.sessions
                    .set_state(owner, Some(DialogueState::FilmActors));
                Ok(vec![OutboundMessage::Reply(format!(
                    "Enter the actors, separated by '{}' (comma and a space).",
                    ACTORS_SEPARATOR
                ))])
            }

            DialogueState::FilmActors => {
                let actors = text
                    .split(ACTORS_SEPARATOR)
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                self.sessions.update_fields(
                    owner,
                    PendingFields {
                        actors: Some(actors),
                        ..Default::default()
                    },
                );
                self.sessions
                    .set_state(owner, Some(DialogueState::FilmPoster));
                Ok(vec![OutboundMessage::Reply(
                    "Enter a link to the film poster.".into(),
                )])
            }

            DialogueState::FilmPoster => {
                self.sessions.update_fields(
                    owner,
                    PendingFields {
                        poster: Some(text.to_string()),
                        ..Default::default()
                    },
                );
                let fields = self.sessions.fields(owner);
                self.sessions.clear(owner);

                let Some(draft) = draft_from_fields(fields) else {
                    tracing::warn!(owner = %owner, "Create form completed with missing fields");
                    return Ok(vec![OutboundMessage::Reply(
                        "The form went missing mid-way. Start again with /create.".into(),
                    )]);
                };
                let name = draft.name.clone();
                let id = self.catalog.add(draft);
                Ok(vec![OutboundMessage::Text(format!(
                    "Film {} added (id {}).",
                    name, id
                ))])
            }

            DialogueState::SearchQuery => {
                let hits = self.catalog.list_filtered("title", text);
                self.sessions.clear(owner);
                if hits.is_empty() {
                    return Ok(vec![OutboundMessage::Reply("Film not found.".into())]);
                }
                Ok(hits
                    .into_iter()
                    .map(|entry| {
                        OutboundMessage::Reply(format!(
                            "Found: {} - {}",
                            entry.name, entry.description
                        ))
                    })
                    .collect())
            }

            DialogueState::FilterCriteria => {
                // The choice arrives as a button press, not free text.
                Ok(vec![OutboundMessage::Reply(
                    "Pick one of the filter buttons.".into(),
                )])
            }

            DialogueState::FilterValue => {
                let field = self.sessions.fields(owner).filter_field.unwrap_or_default();
                let hits = self.catalog.list_filtered(&field, text);
                self.sessions.clear(owner);
                if hits.is_empty() {
                    return Ok(vec![OutboundMessage::Text(
                        "Nothing found for your query.".into(),
                    )]);
                }
                Ok(hits
                    .into_iter()
                    .map(|entry| {
                        OutboundMessage::Text(format!(
                            "{}\nRating: {}/10\nGenre: {}\n{}",
                            entry.name,
                            format_rating(entry.rating),
                            entry.genre,
                            entry.description
                        ))
                    })
                    .collect())
            }

            DialogueState::DeleteQuery => {
                let deleted = self.catalog.delete_by_name(text);
                self.sessions.clear(owner);
                if deleted == 0 {
                    return Ok(vec![OutboundMessage::Reply("Film not found.".into())]);
                }
                Ok(vec![OutboundMessage::Reply(format!(
                    "Deleted {} film(s) named '{}'.",
                    deleted, text
                ))])
            }

            DialogueState::EditQuery => {
                match self.find_by_name(text) {
                    Some(entry) => {
                        self.sessions.update_fields(
                            owner,
                            PendingFields {
                                target_name: Some(entry.name),
                                ..Default::default()
                            },
                        );
                        self.sessions
                            .set_state(owner, Some(DialogueState::EditDescription));
                        Ok(vec![OutboundMessage::Reply(
                            "Enter the new film description:".into(),
                        )])
                    }
                    None => {
                        self.sessions.clear(owner);
                        Ok(vec![OutboundMessage::Reply("Film not found.".into())])
                    }
                }
            }

            DialogueState::EditDescription => {
                let target = self.sessions.fields(owner).target_name;
                self.sessions.clear(owner);
                let Some(target) = target else {
                    return Ok(vec![OutboundMessage::Reply(
                        "Something went wrong, start again with /edit.".into(),
                    )]);
                };
                if self.catalog.update_description(&target, text) {
                    Ok(vec![OutboundMessage::Reply(format!(
                        "Film '{}' updated.",
                        target
                    ))])
                } else {
                    // Deleted by another user between lookup and commit.
                    Ok(vec![OutboundMessage::Reply(
                        "That film is no longer in the catalog.".into(),
                    )])
                }
            }

            DialogueState::RateQuery => {
                match self.find_by_name(text) {
                    Some(entry) => {
                        self.sessions.update_fields(
                            owner,
                            PendingFields {
                                target_name: Some(entry.name),
                                ..Default::default()
                            },
                        );
                        self.sessions
                            .set_state(owner, Some(DialogueState::SetRating));
                        Ok(vec![OutboundMessage::Reply(
                            "Enter a rating from 1 to 10:".into(),
                        )])
                    }
                    None => {
                        self.sessions.clear(owner);
                        Ok(vec![OutboundMessage::Reply("Film not found.".into())])
                    }
                }
            }

            DialogueState::SetRating => {
                let value = match text.trim().parse::<i64>() {
                    Ok(v) => v,
                    Err(_) => {
                        return Ok(vec![OutboundMessage::Reply("Enter a number.".into())]);
                    }
                };
                if !(1..=10).contains(&value) {
                    return Ok(vec![OutboundMessage::Reply(
                        "Enter a rating from 1 to 10.".into(),
                    )]);
                }

                let target = self.sessions.fields(owner).target_name;
                self.sessions.clear(owner);
                let Some(target) = target else {
                    return Ok(vec![OutboundMessage::Reply(
                        "Something went wrong, start again with /rate.".into(),
                    )]);
                };
                if self.catalog.update_rating(&target, value as f64)? {
                    Ok(vec![OutboundMessage::Reply(format!(
                        "Rating for '{}' set to {}.",
                        target, value
                    ))])
                } else {
                    Ok(vec![OutboundMessage::Reply(
                        "That film is no longer in the catalog.".into(),
                    )])
                }
            }
        }
    }

    fn handle_selection(&self, owner: &OwnerId, token: &str) -> Result<Vec<OutboundMessage>> {
        if let Some(choice) = token.strip_prefix(FILTER_CHOICE_PREFIX) {
            let session = self.sessions.get(owner);
            if session.state != Some(DialogueState::FilterCriteria) {
                return Ok(vec![OutboundMessage::Reply(
                    "That menu is no longer active.".into(),
                )]);
            }
            self.sessions.update_fields(
                owner,
                PendingFields {
                    filter_field: Some(choice.to_string()),
                    ..Default::default()
                },
            );
            self.sessions
                .set_state(owner, Some(DialogueState::FilterValue));
            return Ok(vec![OutboundMessage::Text(format!(
                "Enter a value to filter by {}:",
                choice
            ))]);
        }

        match self.resolver.resolve(token) {
            Some(entry) => {
                let caption = detail_caption(&entry);
                let filename = poster_filename(&entry);
                Ok(vec![OutboundMessage::Photo {
                    url: entry.poster,
                    caption,
                    filename,
                }])
            }
            None => Ok(vec![OutboundMessage::Reply(
                "That film is no longer available.".into(),
            )]),
        }
    }

    /// First case-insensitive name match, the lookup edit/rate use
    fn find_by_name(&self, name: &str) -> Option<Entry> {
        let needle = name.to_lowercase();
        self.catalog
            .list_all()
            .into_iter()
            .find(|e| e.name.to_lowercase() == needle)
    }
}

fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => value.to_string(),
        None => "?".to_string(),
    }
}

fn detail_caption(entry: &Entry) -> String {
    format!(
        "Film: {}\nDescription: {}\nRating: {}\nGenre: {}\nActors: {}",
        entry.name,
        entry.description,
        format_rating(entry.rating),
        entry.genre,
        entry.actors.join(", ")
    )
}

/// `<name>_poster.<ext>`, with the extension lifted from the poster URL
fn poster_filename(entry: &Entry) -> String {
    let ext = Url::parse(&entry.poster)
        .ok()
        .and_then(|url| {
            url.path()
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_string())
        })
        .unwrap_or_else(|| "jpg".to_string());
    format!("{}_poster.{}", entry.name, ext)
}

fn draft_from_fields(fields: PendingFields) -> Option<EntryDraft> {
    Some(EntryDraft {
        name: fields.name?,
        description: fields.description?,
        rating: fields.rating,
        genre: fields.genre?,
        actors: fields.actors?,
        poster: fields.poster?,
    })
}
