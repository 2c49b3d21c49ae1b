//! End-to-end dialogue flows through the engine
//!
//! Each test drives the engine exactly the way a transport adapter would:
//! one inbound event per user turn, assertions on the outbound messages and
//! on the catalog afterwards.

mod common;

use common::{draft, engine_with, press, say, text_of};
use filmdesk::dialogue::DialogueState;
use filmdesk::session::OwnerId;
use filmdesk::transport::OutboundMessage;

#[tokio::test]
async fn create_dialogue_commits_exactly_one_entry() {
    let (catalog, engine) = engine_with(vec![]);

    say(&engine, "alice", "/create").await;
    say(&engine, "alice", "X").await;
    say(&engine, "alice", "D").await;
    say(&engine, "alice", "7").await;
    say(&engine, "alice", "G").await;
    say(&engine, "alice", "A, B").await;
    let out = say(&engine, "alice", "http://x/p.jpg").await;

    assert!(text_of(&out[0]).contains("X"));
    assert_eq!(catalog.len(), 1);

    let entry = catalog.list_all().pop().expect("one entry");
    assert_eq!(entry.name, "X");
    assert_eq!(entry.description, "D");
    assert_eq!(entry.rating, Some(7.0));
    assert_eq!(entry.genre, "G");
    assert_eq!(entry.actors, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(entry.poster, "http://x/p.jpg");

    // Session is gone once the form commits.
    assert!(engine.sessions().get(&OwnerId::from("alice")).state.is_none());
}

#[tokio::test]
async fn create_dialogue_reprompts_on_bad_rating_without_advancing() {
    let (catalog, engine) = engine_with(vec![]);
    let alice = OwnerId::from("alice");

    say(&engine, "alice", "/create").await;
    say(&engine, "alice", "X").await;
    say(&engine, "alice", "D").await;

    let out = say(&engine, "alice", "abc").await;
    assert!(text_of(&out[0]).contains("0 to 10"));
    assert_eq!(
        engine.sessions().get(&alice).state,
        Some(DialogueState::FilmRating)
    );

    // Out-of-range numbers re-prompt the same way.
    say(&engine, "alice", "10.5").await;
    assert_eq!(
        engine.sessions().get(&alice).state,
        Some(DialogueState::FilmRating)
    );

    // A valid retry advances to the genre step.
    say(&engine, "alice", "7").await;
    assert_eq!(
        engine.sessions().get(&alice).state,
        Some(DialogueState::FilmGenre)
    );
    assert_eq!(catalog.len(), 0);
}

#[tokio::test]
async fn search_dialogue_reports_matches_and_clears() {
    let (_, engine) = engine_with(vec![
        draft("The Matrix", "sci-fi", &[], Some(8.7)),
        draft("Matrix Reloaded", "sci-fi", &[], None),
        draft("Heat", "crime", &[], None),
    ]);
    let alice = OwnerId::from("alice");

    say(&engine, "alice", "/search").await;
    let out = say(&engine, "alice", "matrix").await;

    assert_eq!(out.len(), 2);
    assert!(text_of(&out[0]).contains("The Matrix"));
    assert!(text_of(&out[1]).contains("Matrix Reloaded"));
    assert!(engine.sessions().get(&alice).state.is_none());
}

#[tokio::test]
async fn search_dialogue_miss_clears_without_retry() {
    let (_, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);
    let alice = OwnerId::from("alice");

    say(&engine, "alice", "/search").await;
    let out = say(&engine, "alice", "zzz").await;

    assert_eq!(text_of(&out[0]), "Film not found.");
    assert!(engine.sessions().get(&alice).state.is_none());
}

#[tokio::test]
async fn filter_by_actors_matches_contributors_only() {
    let (_, engine) = engine_with(vec![
        // Title and genre contain "anne"; actors do not.
        draft("Anne of Avonlea", "anne-drama", &["Megan Follows"], None),
        draft("Les Miserables", "musical", &["Anne Hathaway"], None),
        draft("Interstellar", "sci-fi", &["Anne Hathaway", "Matthew McConaughey"], None),
    ]);

    say(&engine, "alice", "/filter").await;
    press(&engine, "alice", "search_by:actors").await;
    let out = say(&engine, "alice", "anne").await;

    assert_eq!(out.len(), 2);
    assert!(text_of(&out[0]).contains("Les Miserables"));
    assert!(text_of(&out[1]).contains("Interstellar"));
}

#[tokio::test]
async fn filter_menu_lists_the_three_fixed_choices() {
    let (_, engine) = engine_with(vec![]);
    let out = say(&engine, "alice", "/filter").await;

    let OutboundMessage::Menu { choices, .. } = &out[0] else {
        panic!("expected the criteria menu, got {:?}", out[0]);
    };
    let tokens: Vec<&str> = choices.iter().map(|c| c.token.as_str()).collect();
    assert_eq!(
        tokens,
        vec!["search_by:title", "search_by:genre", "search_by:actors"]
    );
}

#[tokio::test]
async fn filter_with_unrecognized_stored_choice_yields_empty() {
    let (_, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);

    say(&engine, "alice", "/filter").await;
    // A token the menu never emits; the stored choice is simply unknown.
    press(&engine, "alice", "search_by:year").await;
    let out = say(&engine, "alice", "1995").await;

    assert_eq!(out.len(), 1);
    assert_eq!(text_of(&out[0]), "Nothing found for your query.");
}

#[tokio::test]
async fn filter_free_text_before_choosing_reprompts() {
    let (_, engine) = engine_with(vec![]);
    let alice = OwnerId::from("alice");

    say(&engine, "alice", "/filter").await;
    let out = say(&engine, "alice", "crime").await;

    assert!(text_of(&out[0]).contains("filter buttons"));
    assert_eq!(
        engine.sessions().get(&alice).state,
        Some(DialogueState::FilterCriteria)
    );
}

#[tokio::test]
async fn delete_dialogue_removes_all_matches_and_reports_count() {
    let (catalog, engine) = engine_with(vec![
        draft("Dune", "sci-fi", &[], None),
        draft("Dune", "sci-fi", &[], None),
        draft("Heat", "crime", &[], None),
    ]);

    say(&engine, "alice", "/delete").await;
    let out = say(&engine, "alice", "Dune").await;

    assert!(text_of(&out[0]).contains("Deleted 2"));
    assert_eq!(catalog.len(), 1);
}

#[tokio::test]
async fn delete_dialogue_miss_reports_not_found_and_changes_nothing() {
    let (catalog, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);

    say(&engine, "alice", "/delete").await;
    let out = say(&engine, "alice", "heat").await; // case-sensitive: no match

    assert_eq!(text_of(&out[0]), "Film not found.");
    assert_eq!(catalog.len(), 1);
}

#[tokio::test]
async fn edit_dialogue_updates_description() {
    let (catalog, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);

    say(&engine, "alice", "/edit").await;
    // Lookup is case-insensitive and captures the canonical name.
    let out = say(&engine, "alice", "HEAT").await;
    assert!(text_of(&out[0]).contains("new film description"));

    let out = say(&engine, "alice", "Pacino vs De Niro.").await;
    assert!(text_of(&out[0]).contains("Heat"));

    let entry = catalog.list_all().pop().expect("entry");
    assert_eq!(entry.description, "Pacino vs De Niro.");
}

#[tokio::test]
async fn edit_dialogue_lookup_miss_aborts() {
    let (_, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);
    let alice = OwnerId::from("alice");

    say(&engine, "alice", "/edit").await;
    let out = say(&engine, "alice", "Nope").await;

    assert_eq!(text_of(&out[0]), "Film not found.");
    assert!(engine.sessions().get(&alice).state.is_none());
}

#[tokio::test]
async fn edit_target_deleted_mid_dialogue_reports_not_found() {
    let (catalog, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);

    say(&engine, "alice", "/edit").await;
    say(&engine, "alice", "Heat").await;

    // Another user deletes the film between lookup and commit.
    catalog.delete_by_name("Heat");

    let out = say(&engine, "alice", "New description").await;
    assert!(text_of(&out[0]).contains("no longer in the catalog"));
}

#[tokio::test]
async fn rate_dialogue_retries_out_of_range_then_commits() {
    let (catalog, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);
    let alice = OwnerId::from("alice");

    say(&engine, "alice", "/rate").await;
    say(&engine, "alice", "heat").await;

    let out = say(&engine, "alice", "11").await;
    assert!(text_of(&out[0]).contains("1 to 10"));
    assert_eq!(
        engine.sessions().get(&alice).state,
        Some(DialogueState::SetRating)
    );

    let out = say(&engine, "alice", "8").await;
    assert!(text_of(&out[0]).contains("set to 8"));
    assert!(engine.sessions().get(&alice).state.is_none());

    let entry = catalog.list_all().pop().expect("entry");
    assert_eq!(entry.rating, Some(8.0));
}

#[tokio::test]
async fn rate_dialogue_non_numeric_input_retries() {
    let (_, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);
    let alice = OwnerId::from("alice");

    say(&engine, "alice", "/rate").await;
    say(&engine, "alice", "Heat").await;

    let out = say(&engine, "alice", "eight").await;
    assert_eq!(text_of(&out[0]), "Enter a number.");
    assert_eq!(
        engine.sessions().get(&alice).state,
        Some(DialogueState::SetRating)
    );
}

#[tokio::test]
async fn rate_target_deleted_mid_dialogue_reports_not_found() {
    let (catalog, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);

    say(&engine, "alice", "/rate").await;
    say(&engine, "alice", "Heat").await;
    catalog.delete_by_name("Heat");

    let out = say(&engine, "alice", "8").await;
    assert!(text_of(&out[0]).contains("no longer in the catalog"));
}

#[tokio::test]
async fn detail_view_resolves_menu_token_to_photo() {
    let (_, engine) = engine_with(vec![draft("Heat", "crime", &["Al Pacino"], Some(8.3))]);

    let out = say(&engine, "alice", "/list").await;
    let OutboundMessage::Menu { choices, .. } = &out[0] else {
        panic!("expected the film menu, got {:?}", out[0]);
    };
    let token = choices[0].token.clone();

    let out = press(&engine, "alice", &token).await;
    let OutboundMessage::Photo { caption, filename, .. } = &out[0] else {
        panic!("expected a photo, got {:?}", out[0]);
    };
    assert!(caption.contains("Film: Heat"));
    assert!(caption.contains("Al Pacino"));
    assert!(filename.starts_with("Heat_poster."));
}

#[tokio::test]
async fn detail_view_for_deleted_entry_reports_unavailable() {
    let (catalog, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);

    let out = say(&engine, "alice", "/list").await;
    let OutboundMessage::Menu { choices, .. } = &out[0] else {
        panic!("expected the film menu, got {:?}", out[0]);
    };
    let token = choices[0].token.clone();

    catalog.delete_by_name("Heat");

    let out = press(&engine, "alice", &token).await;
    assert!(text_of(&out[0]).contains("no longer available"));
}

#[tokio::test]
async fn aborted_create_fields_never_reach_the_catalog() {
    let (catalog, engine) = engine_with(vec![]);

    // Start a form, enter a name, then abandon it for a new command.
    say(&engine, "alice", "/create").await;
    say(&engine, "alice", "Ghost Film").await;
    say(&engine, "alice", "/create").await;

    // Complete the second form.
    say(&engine, "alice", "Real Film").await;
    say(&engine, "alice", "desc").await;
    say(&engine, "alice", "5").await;
    say(&engine, "alice", "drama").await;
    say(&engine, "alice", "Solo Actor").await;
    say(&engine, "alice", "http://x/real.jpg").await;

    let entries = catalog.list_all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Real Film");
}

#[tokio::test]
async fn recommend_reports_highest_rated() {
    let (_, engine) = engine_with(vec![
        draft("Okay", "drama", &[], Some(5.0)),
        draft("Great", "drama", &[], Some(9.1)),
        draft("Unrated", "drama", &[], None),
    ]);

    let out = say(&engine, "alice", "/recommend").await;
    assert!(text_of(&out[0]).contains("Great"));
}

#[tokio::test]
async fn recommend_without_rated_entries_says_so() {
    let (_, engine) = engine_with(vec![draft("Unrated", "drama", &[], None)]);
    let out = say(&engine, "alice", "/recommend").await;
    assert!(text_of(&out[0]).contains("No rated films"));
}

#[tokio::test]
async fn start_greets_with_service_name_and_commands() {
    let (_, engine) = engine_with(vec![]);
    let out = say(&engine, "alice", "/start").await;
    let greeting = text_of(&out[0]);
    assert!(greeting.contains("Filmdesk"));
    assert!(greeting.contains("/create"));
}

#[tokio::test]
async fn legacy_command_aliases_still_work() {
    let (_, engine) = engine_with(vec![draft("Heat", "crime", &[], None)]);
    let alice = OwnerId::from("alice");

    let out = say(&engine, "alice", "/films").await;
    assert!(matches!(out[0], OutboundMessage::Menu { .. }));

    say(&engine, "alice", "/search_movie").await;
    assert_eq!(
        engine.sessions().get(&alice).state,
        Some(DialogueState::SearchQuery)
    );
}
