//! Portable JSON documents used for file import/export.
//!
//! These shapes are the interchange format; stored state uses [`GameDefinition`]
//! directly. Fields missing from older files fall back to the editor defaults.

use serde::{Deserialize, Serialize};

use crate::{
    Card, CardId, DEFAULT_COLOR, DEFAULT_EMOJI, DEFAULT_SIZE, GameDefinition, GameId, VictoryType,
};

pub const FORMAT_VERSION: &str = "1.0";
pub const CARD_DOCUMENT_TYPE: &str = "card";

/// A game definition without its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortableGame {
    pub title: String,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_free_center")]
    pub free_center: bool,
    #[serde(default = "default_victory_types")]
    pub victory_types: Vec<VictoryType>,
    pub words: Vec<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

fn default_free_center() -> bool {
    true
}

fn default_victory_types() -> Vec<VictoryType> {
    VictoryType::ALL.to_vec()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

impl From<&GameDefinition> for PortableGame {
    fn from(game: &GameDefinition) -> Self {
        PortableGame {
            title: game.title.clone(),
            size: game.size,
            free_center: game.free_center,
            victory_types: game.victory_types.clone(),
            words: game.words.clone(),
            color: game.color.clone(),
            emoji: game.emoji.clone(),
            created_at: Some(game.created_at.clone()),
        }
    }
}

impl PortableGame {
    pub fn into_definition(self, id: GameId, fallback_created_at: String) -> GameDefinition {
        GameDefinition {
            id,
            title: self.title,
            size: self.size,
            free_center: self.free_center,
            victory_types: self.victory_types,
            words: self.words,
            color: self.color,
            emoji: self.emoji,
            created_at: self.created_at.unwrap_or(fallback_created_at),
        }
    }
}

/// `{ "version": "1.0", "bingo": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDocument {
    pub version: String,
    pub bingo: PortableGame,
}

/// `{ "version": "1.0", "exportDate": ..., "bingos": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCollectionDocument {
    pub version: String,
    pub export_date: String,
    pub bingos: Vec<PortableGame>,
}

/// A card plus a denormalized snapshot of its game (without `createdAt`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDocument {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bingo_id: Option<GameId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<CardId>,
    pub bingo: PortableGame,
    pub card: Card,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portable_game_defaults() {
        let game: PortableGame =
            serde_json::from_str(r#"{"title":"Old","words":["x","y","z","w"]}"#).unwrap();

        assert_eq!(game.size, DEFAULT_SIZE);
        assert!(game.free_center);
        assert_eq!(game.victory_types, VictoryType::ALL.to_vec());
        assert_eq!(game.color, DEFAULT_COLOR);
        assert_eq!(game.emoji, DEFAULT_EMOJI);
        assert_eq!(game.created_at, None);
    }

    #[test]
    fn test_portable_game_requires_title_and_words() {
        assert!(serde_json::from_str::<PortableGame>(r#"{"title":"Only title"}"#).is_err());
        assert!(serde_json::from_str::<PortableGame>(r#"{"words":["a"]}"#).is_err());
    }

    #[test]
    fn test_created_at_omitted_when_absent() {
        let game: PortableGame = serde_json::from_str(r#"{"title":"T","words":[]}"#).unwrap();
        let value = serde_json::to_value(&game).unwrap();
        assert!(value.get("createdAt").is_none());
        assert_eq!(value["freeCenter"], serde_json::json!(true));
    }
}
