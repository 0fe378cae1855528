//! Layout of the persisted keyspace.
//!
//! ```text
//! bingos                          every game definition, keyed by id
//! card_{gameId}_{cardId}          card grid with marks
//! lastPlayed_{gameId}_{cardId}    RFC 3339 timestamp of the last save
//! currentCardId_{gameId}          card resumed by default
//! ```
//!
//! Game ids never contain `_`; card ids may, so everything after the game id
//! belongs to the card id.

use bingo_types::{CardId, GameId};

pub const GAMES_KEY: &str = "bingos";
pub const CARD_PREFIX: &str = "card_";
pub const LAST_PLAYED_PREFIX: &str = "lastPlayed_";
pub const CURRENT_CARD_PREFIX: &str = "currentCardId_";

pub fn card_key(game_id: &str, card_id: &str) -> String {
    format!("{}{}_{}", CARD_PREFIX, game_id, card_id)
}

pub fn last_played_key(game_id: &str, card_id: &str) -> String {
    format!("{}{}_{}", LAST_PLAYED_PREFIX, game_id, card_id)
}

pub fn current_card_key(game_id: &str) -> String {
    format!("{}{}", CURRENT_CARD_PREFIX, game_id)
}

/// Prefix shared by every card of one game
pub fn game_cards_prefix(game_id: &str) -> String {
    format!("{}{}_", CARD_PREFIX, game_id)
}

pub fn game_last_played_prefix(game_id: &str) -> String {
    format!("{}{}_", LAST_PLAYED_PREFIX, game_id)
}

/// Split `card_{gameId}_{cardId}` back into its ids
pub fn parse_card_key(key: &str) -> Option<(GameId, CardId)> {
    let rest = key.strip_prefix(CARD_PREFIX)?;
    let (game_id, card_id) = rest.split_once('_')?;
    if game_id.is_empty() || card_id.is_empty() {
        return None;
    }
    Some((game_id.to_string(), card_id.to_string()))
}
