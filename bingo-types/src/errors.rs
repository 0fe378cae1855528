use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use ts_rs::TS;

use crate::{CardId, GameId};

/// Coarse error category, for the UI to pick a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ErrorKind {
    Parse,
    Format,
    Validation,
    NotFound,
    Storage,
}

/// Business-rule violations in a game definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum ValidationIssue {
    #[error("board size {size} is not supported (use 3, 4 or 5)")]
    InvalidSize { size: usize },
    #[error("a {size}x{size} board needs at least {required} words, got {actual}")]
    InsufficientWords {
        size: usize,
        required: usize,
        actual: usize,
    },
    #[error("select at least one victory type")]
    NoVictoryTypes,
    #[error("word '{word}' appears more than once")]
    DuplicateWord { word: String },
}

/// Durable storage could not be read or written
#[derive(Debug, thiserror::Error)]
#[error("storage unavailable: {message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn backend<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BingoError {
    #[error("document is not valid JSON")]
    Parse(#[source] serde_json::Error),
    #[error("unrecognized document format: {reason}")]
    Format {
        reason: String,
        #[source]
        source: Option<serde_json::Error>,
    },
    #[error("invalid game: {0}")]
    Validation(#[from] ValidationIssue),
    #[error("game not found: {game_id}")]
    GameNotFound { game_id: GameId },
    #[error("card not found: {card_id} (game {game_id})")]
    CardNotFound { game_id: GameId, card_id: CardId },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BingoError {
    pub fn format(reason: impl Into<String>) -> Self {
        BingoError::Format {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn format_with(reason: impl Into<String>, source: serde_json::Error) -> Self {
        BingoError::Format {
            reason: reason.into(),
            source: Some(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BingoError::Parse(_) => ErrorKind::Parse,
            BingoError::Format { .. } => ErrorKind::Format,
            BingoError::Validation(_) => ErrorKind::Validation,
            BingoError::GameNotFound { .. } | BingoError::CardNotFound { .. } => {
                ErrorKind::NotFound
            }
            BingoError::Storage(_) => ErrorKind::Storage,
        }
    }
}
