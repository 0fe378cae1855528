use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Card;

pub type GameId = String;
pub type CardId = String;

pub const DEFAULT_TITLE: &str = "My Bingo";
pub const DEFAULT_SIZE: usize = 5;
pub const DEFAULT_COLOR: &str = "#667eea";
pub const DEFAULT_EMOJI: &str = "🎯";
pub const MIN_SIZE: usize = 3;
pub const MAX_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum VictoryType {
    Line,
    Column,
    Diagonal,
    Full,
}

impl VictoryType {
    pub const ALL: [VictoryType; 4] = [
        VictoryType::Line,
        VictoryType::Column,
        VictoryType::Diagonal,
        VictoryType::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VictoryType::Line => "line",
            VictoryType::Column => "column",
            VictoryType::Diagonal => "diagonal",
            VictoryType::Full => "full",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "line" | "row" => Some(VictoryType::Line),
            "column" | "col" => Some(VictoryType::Column),
            "diagonal" => Some(VictoryType::Diagonal),
            "full" => Some(VictoryType::Full),
            _ => None,
        }
    }
}

/// A reusable bingo template. Immutable once stored; re-importing mints a new id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameDefinition {
    pub id: GameId,
    pub title: String,
    pub size: usize,
    pub free_center: bool,
    pub victory_types: Vec<VictoryType>,
    pub words: Vec<String>,
    pub color: String,
    pub emoji: String,
    pub created_at: String, // ISO 8601 string
}

impl GameDefinition {
    pub fn cell_count(&self) -> usize {
        self.size.saturating_mul(self.size)
    }

    pub fn has_victory_type(&self, victory_type: VictoryType) -> bool {
        self.victory_types.contains(&victory_type)
    }
}

/// Editor state for a game that has not been saved yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameDraft {
    pub title: String,
    pub size: usize,
    pub free_center: bool,
    pub victory_types: Vec<VictoryType>,
    pub words: Vec<String>,
    pub color: String,
    pub emoji: String,
}

impl Default for GameDraft {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            size: DEFAULT_SIZE,
            free_center: true,
            victory_types: VictoryType::ALL.to_vec(),
            words: Vec::new(),
            color: DEFAULT_COLOR.to_string(),
            emoji: DEFAULT_EMOJI.to_string(),
        }
    }
}

impl GameDraft {
    pub fn into_definition(self, id: GameId, created_at: String) -> GameDefinition {
        GameDefinition {
            id,
            title: self.title,
            size: self.size,
            free_center: self.free_center,
            victory_types: self.victory_types,
            words: self.words,
            color: self.color,
            emoji: self.emoji,
            created_at,
        }
    }
}

/// A persisted card with partial, non-winning progress. Derived on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IncompleteGameEntry {
    pub game_id: GameId,
    pub card_id: CardId,
    pub game: GameDefinition,
    pub card: Card,
    pub marked_count: usize,
    pub last_played: String, // ISO 8601 string
}
