//! Top-level command recognition
//!
//! Parses the `/`-prefixed command tokens that start a dialogue or run a
//! stateless action. Commands are case-insensitive and accept the longer
//! legacy spellings (`/films`, `/search_movie`, ...) as aliases of the
//! short forms.

/// A recognized top-level command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Greet the user
    Start,
    /// Show the catalog as a selectable list
    List,
    /// Recommend the highest-rated film
    Recommend,
    /// Begin the search dialogue
    Search,
    /// Begin the filter dialogue
    Filter,
    /// Begin the delete dialogue
    Delete,
    /// Begin the edit-description dialogue
    Edit,
    /// Begin the rate dialogue
    Rate,
    /// Begin the create-film form
    Create,
}

impl BotCommand {
    /// Parse a command from a raw inbound line
    ///
    /// Only a lone `/`-prefixed token qualifies; anything else is `None`
    /// and flows to the active dialogue step (or the idle hint). That keeps
    /// free text like "delete scenes" from hijacking an in-flight dialogue.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let token = trimmed.strip_prefix('/')?;
        if token.is_empty() || token.contains(char::is_whitespace) {
            return None;
        }
        match token.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            "list" | "films" => Some(Self::List),
            "recommend" | "recommend_movie" => Some(Self::Recommend),
            "search" | "search_movie" => Some(Self::Search),
            "filter" | "filter_movies" => Some(Self::Filter),
            "delete" | "delete_movie" => Some(Self::Delete),
            "edit" | "edit_movie" => Some(Self::Edit),
            "rate" | "rate_movie" => Some(Self::Rate),
            "create" | "create_film" => Some(Self::Create),
            _ => None,
        }
    }

    /// Command list for help and usage messages
    pub fn usage() -> &'static str {
        "/start, /list, /recommend, /search, /filter, /delete, /edit, /rate, /create"
    }
}
