//! Card model decoded from the cards API.
//!
//! # Design
//! These types mirror the upstream JSON schema (camelCase keys) but are
//! defined independently from the mock-server crate; integration tests catch
//! any schema drift between the two. Both types are only ever produced by
//! decoding a response, and nothing in this crate mutates them afterwards.
//! Unknown keys are ignored because the real API returns far more fields
//! than the browsing UI needs.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A single trading card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
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

impl Card {
    /// The card artwork location, if the card has one and it is a valid URL.
    pub fn artwork_url(&self) -> Option<Url> {
        self.image_url.as_deref().and_then(|url| Url::parse(url).ok())
    }
}

/// Detail text shown for a single card.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Mana cost: {}", self.mana_cost.as_deref().unwrap_or("Unknown"))?;
        writeln!(f, "Type: {}", self.card_type)?;
        writeln!(f, "Rarity: {}", self.rarity)?;
        write!(f, "Set: {}", self.set_name)?;

        match self.original_text.as_deref() {
            Some(text) if !text.is_empty() => write!(f, "\nText: {text}"),
            _ => Ok(()),
        }
    }
}

/// The cards returned by one API response, in server order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardCollection {
    pub cards: Vec<Card>,
}

impl CardCollection {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl IntoIterator for CardCollection {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

impl fmt::Display for CardCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, card) in self.cards.iter().enumerate() {
            if index > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
