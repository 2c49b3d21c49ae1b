use filmdesk::catalog::{Catalog, EntryDraft};
use filmdesk::dialogue::Engine;
use filmdesk::transport::{InboundEvent, OutboundMessage};
use std::sync::Arc;

#[allow(dead_code)]
pub fn draft(name: &str, genre: &str, actors: &[&str], rating: Option<f64>) -> EntryDraft {
    EntryDraft {
        name: name.to_string(),
        description: format!("About {}", name),
        rating,
        genre: genre.to_string(),
        actors: actors.iter().map(|a| a.to_string()).collect(),
        poster: format!("http://posters/{}.jpg", name.to_lowercase().replace(' ', "-")),
    }
}

#[allow(dead_code)]
pub fn engine_with(drafts: Vec<EntryDraft>) -> (Arc<Catalog>, Engine) {
    let catalog = Arc::new(Catalog::with_entries(drafts));
    let engine = Engine::new(catalog.clone(), "Filmdesk");
    (catalog, engine)
}

/// Send one text line from `owner` and return the replies
#[allow(dead_code)]
pub async fn say(engine: &Engine, owner: &str, text: &str) -> Vec<OutboundMessage> {
    engine
        .handle_event(InboundEvent::text(owner, text))
        .await
        .expect("event should be handled")
}

/// Press a button carrying `token` as `owner` and return the replies
#[allow(dead_code)]
pub async fn press(engine: &Engine, owner: &str, token: &str) -> Vec<OutboundMessage> {
    engine
        .handle_event(InboundEvent::selection(owner, token))
        .await
        .expect("event should be handled")
}

/// Text content of a reply-or-text message, for assertions
#[allow(dead_code)]
pub fn text_of(message: &OutboundMessage) -> &str {
    match message {
        OutboundMessage::Text(s) | OutboundMessage::Reply(s) => s,
        other => panic!("expected a text message, got {:?}", other),
    }
}
