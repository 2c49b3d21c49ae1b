//! Dialogue state enumeration
//!
//! Every multi-step dialogue advances through a fixed set of named states.
//! The engine matches on this enum exhaustively, so adding a state without
//! wiring its handler is a compile error.

use std::fmt;

/// The step a user's dialogue is currently waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueState {
    // Create-film form, in entry order
    /// Waiting for the new film's title
    FilmName,
    /// Waiting for the description
    FilmDescription,
    /// Waiting for a rating in [0, 10] (re-prompts in place on bad input)
    FilmRating,
    /// Waiting for the genre
    FilmGenre,
    /// Waiting for the comma-separated actor list
    FilmActors,
    /// Waiting for the poster link; commits the film on input
    FilmPoster,

    /// Waiting for a title to search for
    SearchQuery,

    /// Waiting for a filter-field choice (title/genre/actors button)
    FilterCriteria,
    /// Waiting for the value to filter by
    FilterValue,

    /// Waiting for the name of the film to delete
    DeleteQuery,

    /// Waiting for the name of the film to edit
    EditQuery,
    /// Waiting for the replacement description
    EditDescription,

    /// Waiting for the name of the film to rate
    RateQuery,
    /// Waiting for an integer rating in [1, 10] (re-prompts in place)
    SetRating,
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FilmName => "film_name",
            Self::FilmDescription => "film_description",
            Self::FilmRating => "film_rating",
            Self::FilmGenre => "film_genre",
            Self::FilmActors => "film_actors",
            Self::FilmPoster => "film_poster",
            Self::SearchQuery => "search_query",
            Self::FilterCriteria => "filter_criteria",
            Self::FilterValue => "filter_value",
            Self::DeleteQuery => "delete_query",
            Self::EditQuery => "edit_query",
            Self::EditDescription => "edit_description",
            Self::RateQuery => "rate_query",
            Self::SetRating => "set_rating",
        };
        f.write_str(name)
    }
}
