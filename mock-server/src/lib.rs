//! Local stand-in for the `/v1/cards` API.
//!
//! Serves a fixed deck with the upstream JSON shape and an optional
//! case-insensitive `name` substring filter. Fault routes let tests drive
//! the client's error handling: `/status/{code}` answers with that status,
//! `/malformed` returns a body that is not JSON, and `/empty` returns 200
//! with no body.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    pub mana_cost: Option<String>,
    #[serde(rename = "type")]
    pub card_type: String,
    pub rarity: String,
    pub set_name: String,
    pub original_text: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cards {
    pub cards: Vec<Card>,
}

#[derive(Deserialize)]
pub struct CardQuery {
    pub name: Option<String>,
}

pub type Deck = Arc<Vec<Card>>;

pub fn app() -> Router {
    app_with(fixture_deck())
}

/// Serve `cards` at `/v1/cards`, plus fault routes:
/// `/status/{code}` answers an empty body with `code`, `/malformed` answers
/// 200 with invalid JSON and `/empty` answers 200 with no body.
pub fn app_with(cards: Vec<Card>) -> Router {
    let deck: Deck = Arc::new(cards);
    Router::new()
        .route("/v1/cards", get(list_cards))
        .route("/status/{code}", get(status))
        .route("/malformed", get(malformed))
        .route("/empty", get(empty))
        .with_state(deck)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Case-insensitive substring match; an absent or empty `name` matches all.
async fn list_cards(State(deck): State<Deck>, Query(query): Query<CardQuery>) -> Json<Cards> {
    let needle = query.name.unwrap_or_default().to_lowercase();
    let cards = deck
        .iter()
        .filter(|card| card.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Json(Cards { cards })
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn malformed() -> &'static str {
    r#"{"cards":[{"name":"#
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

fn card(
    name: &str,
    mana_cost: Option<&str>,
    card_type: &str,
    rarity: &str,
    original_text: Option<&str>,
    multiverse_id: u32,
) -> Card {
    Card {
        name: name.to_string(),
        mana_cost: mana_cost.map(str::to_string),
        card_type: card_type.to_string(),
        rarity: rarity.to_string(),
        set_name: "Limited Edition Alpha".to_string(),
        original_text: original_text.map(str::to_string),
        image_url: Some(format!(
            "http://gatherer.wizards.com/Handlers/Image.ashx?multiverseid={multiverse_id}&type=card"
        )),
    }
}

/// A handful of Alpha cards, in the order the server returns them.
pub fn fixture_deck() -> Vec<Card> {
    vec![
        card(
            "Black Lotus",
            Some("{0}"),
            "Artifact",
            "Rare",
            Some("Sacrifice Black Lotus: Add three mana of any one color."),
            3,
        ),
        card(
            "Lightning Bolt",
            Some("{R}"),
            "Instant",
            "Common",
            Some("Lightning Bolt deals 3 damage to any target."),
            209,
        ),
        card(
            "Serra Angel",
            Some("{3}{W}{W}"),
            "Creature — Angel",
            "Uncommon",
            Some("Flying, vigilance"),
            279,
        ),
        card(
            "Black Knight",
            Some("{B}{B}"),
            "Creature — Human Knight",
            "Uncommon",
            Some("First strike, protection from white"),
            34,
        ),
        Card {
            image_url: None,
            ..card("Forest", None, "Basic Land — Forest", "Common", None, 288)
        },
    ]
}
