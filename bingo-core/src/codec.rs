//! Import/export of games and cards as versioned JSON documents.
//!
//! Incoming game documents are matched against an ordered list of shapes; the
//! first shape that recognizes the document decides how it is read:
//!
//! 1. `{"version": "1.0", "bingo": {...}}`
//! 2. `{"version": "1.0", "bingos": [...]}`
//! 3. `{"title": ..., "words": [...]}` without a version (legacy single game)
//! 4. `{"bingos": [...]}` without a version (legacy collection)
//! 5. `[{...}, ...]` (bare array of games)
//!
//! The first element of a bare array is read as a document of its own, so an
//! array may wrap any of the other shapes.
//!
//! A `version` other than "1.0" is rejected before any shape is tried. An
//! empty, zero or `false` version counts as no version at all.

use bingo_types::{
    BingoError, CARD_DOCUMENT_TYPE, Card, CardDocument, CardId, FORMAT_VERSION, GameCollectionDocument,
    GameDefinition, GameDocument, GameId, PortableGame,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{generate_id, validate_size};

/// Outcome of testing one document shape
enum ShapeMatch<'a> {
    Game(&'a Value),
    Games(&'a [Value]),
    List(&'a [Value]),
    Rejected(BingoError),
    NoMatch,
}

struct DocumentShape {
    name: &'static str,
    matches: for<'a> fn(&'a Value) -> ShapeMatch<'a>,
}

const GAME_SHAPES: [DocumentShape; 5] = [
    DocumentShape {
        name: "versioned single game",
        matches: match_versioned_game,
    },
    DocumentShape {
        name: "versioned game collection",
        matches: match_versioned_collection,
    },
    DocumentShape {
        name: "legacy single game",
        matches: match_legacy_game,
    },
    DocumentShape {
        name: "legacy game collection",
        matches: match_legacy_collection,
    },
    DocumentShape {
        name: "bare game array",
        matches: match_game_array,
    },
];

fn is_current_version(doc: &Value) -> bool {
    doc.get("version").and_then(Value::as_str) == Some(FORMAT_VERSION)
}

/// `version`, unless it is missing or falsy (`null`, `""`, `0`, `false`)
fn version_field(doc: &Value) -> Option<&Value> {
    doc.get("version").filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    })
}

fn is_unversioned(doc: &Value) -> bool {
    version_field(doc).is_none()
}

fn match_versioned_game(doc: &Value) -> ShapeMatch<'_> {
    match doc.get("bingo") {
        Some(game) if is_current_version(doc) && game.is_object() => ShapeMatch::Game(game),
        _ => ShapeMatch::NoMatch,
    }
}

fn match_versioned_collection(doc: &Value) -> ShapeMatch<'_> {
    match doc.get("bingos").and_then(Value::as_array) {
        Some(games) if is_current_version(doc) => {
            if games.is_empty() {
                ShapeMatch::Rejected(BingoError::format("the document contains no games"))
            } else {
                ShapeMatch::Games(games)
            }
        }
        _ => ShapeMatch::NoMatch,
    }
}

fn match_legacy_game(doc: &Value) -> ShapeMatch<'_> {
    if doc.is_object() && is_unversioned(doc) && doc.get("title").is_some() && doc.get("words").is_some()
    {
        ShapeMatch::Game(doc)
    } else {
        ShapeMatch::NoMatch
    }
}

fn match_legacy_collection(doc: &Value) -> ShapeMatch<'_> {
    match doc.get("bingos").and_then(Value::as_array) {
        Some(games) if is_unversioned(doc) && !games.is_empty() => ShapeMatch::Games(games),
        _ => ShapeMatch::NoMatch,
    }
}

fn match_game_array(doc: &Value) -> ShapeMatch<'_> {
    match doc.as_array() {
        Some(games) if games.is_empty() => {
            ShapeMatch::Rejected(BingoError::format("the document is an empty list"))
        }
        Some(items) => ShapeMatch::List(items),
        None => ShapeMatch::NoMatch,
    }
}

/// Parse document text into a JSON tree
pub fn parse_document(text: &str) -> Result<Value, BingoError> {
    serde_json::from_str(text).map_err(BingoError::Parse)
}

fn check_version(doc: &Value) -> Result<(), BingoError> {
    match version_field(doc) {
        None => Ok(()),
        Some(Value::String(v)) if v == FORMAT_VERSION => Ok(()),
        Some(Value::String(v)) => Err(BingoError::format(format!(
            "unsupported format version {}",
            v
        ))),
        Some(other) => Err(BingoError::format(format!(
            "unsupported format version {}",
            other
        ))),
    }
}

fn locate_games(doc: &Value) -> Result<ShapeMatch<'_>, BingoError> {
    check_version(doc)?;

    for shape in &GAME_SHAPES {
        match (shape.matches)(doc) {
            ShapeMatch::NoMatch => continue,
            ShapeMatch::Rejected(err) => return Err(err),
            found => {
                debug!(shape = shape.name, "Recognized game document");
                return Ok(found);
            }
        }
    }

    Err(BingoError::format(
        "expected a bingo export or a game object with \"title\" and \"words\"",
    ))
}

/// Decode one game entry and check its board size
fn decode_game(value: &Value, what: &str) -> Result<PortableGame, BingoError> {
    let game = PortableGame::deserialize(value).map_err(|e| {
        BingoError::format_with(format!("{} is missing \"title\" or \"words\"", what), e)
    })?;
    validate_size(game.size)?;
    Ok(game)
}

/// Read the game from a single- or multi-game document (first entry wins)
pub fn read_game(doc: &Value) -> Result<PortableGame, BingoError> {
    match locate_games(doc)? {
        ShapeMatch::Game(game) => decode_game(game, "game entry"),
        ShapeMatch::Games(games) => match games.first() {
            Some(game) => decode_game(game, "game entry"),
            None => Err(BingoError::format("the document contains no games")),
        },
        ShapeMatch::List(items) => match items.first() {
            Some(first) => read_game(first),
            None => Err(BingoError::format("the document is an empty list")),
        },
        ShapeMatch::Rejected(err) => Err(err),
        ShapeMatch::NoMatch => Err(BingoError::format("unrecognized game document")),
    }
}

/// Read every game from a document; single-game documents yield one entry
pub fn read_games(doc: &Value) -> Result<Vec<PortableGame>, BingoError> {
    match locate_games(doc)? {
        ShapeMatch::Game(game) => Ok(vec![decode_game(game, "game entry")?]),
        ShapeMatch::Games(games) => games
            .iter()
            .enumerate()
            .map(|(index, game)| decode_game(game, &format!("game #{}", index + 1)))
            .collect(),
        ShapeMatch::List(items) => items.iter().map(read_game).collect(),
        ShapeMatch::Rejected(err) => Err(err),
        ShapeMatch::NoMatch => Err(BingoError::format("unrecognized game document")),
    }
}

/// A validated card document, ids as found in the file
#[derive(Debug, Clone)]
pub struct CardImport {
    pub game_id: Option<GameId>,
    pub card_id: Option<CardId>,
    pub game: PortableGame,
    pub card: Card,
}

/// Read a card document, checking its grid against the embedded game
pub fn read_card(doc: &Value) -> Result<CardImport, BingoError> {
    check_version(doc)?;

    if !is_current_version(doc) {
        return Err(BingoError::format("card documents must carry a version"));
    }
    if doc.get("type").and_then(Value::as_str) != Some(CARD_DOCUMENT_TYPE) {
        return Err(BingoError::format("not a card document"));
    }
    if doc.get("bingo").is_none() || doc.get("card").is_none() {
        return Err(BingoError::format(
            "card document needs both \"bingo\" and \"card\"",
        ));
    }

    let document = CardDocument::deserialize(doc)
        .map_err(|e| BingoError::format_with("card document has unexpected fields", e))?;

    validate_size(document.bingo.size)?;

    let size = document.card.size();
    if size == 0 || !document.card.is_square() {
        return Err(BingoError::format("card grid must be a non-empty square"));
    }
    if size != document.bingo.size {
        return Err(BingoError::format(format!(
            "card is {}x{} but the game is {}x{}",
            size, size, document.bingo.size, document.bingo.size
        )));
    }

    Ok(CardImport {
        game_id: document.bingo_id.filter(|id| !id.is_empty()),
        card_id: document.card_id.filter(|id| !id.is_empty()),
        game: document.bingo,
        card: document.card,
    })
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Turn an imported game into a definition under `id`, keeping its
/// `createdAt` when the file had one
pub fn into_definition(game: PortableGame, id: GameId) -> GameDefinition {
    game.into_definition(id, now())
}

/// Parse a game document and mint a fresh id for it
pub fn import_game<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Result<GameDefinition, BingoError> {
    let doc = parse_document(text)?;
    let game = read_game(&doc)?;
    Ok(into_definition(game, generate_id(rng)))
}

/// Parse a batch document; every entry gets a fresh id
pub fn import_games<R: Rng + ?Sized>(
    text: &str,
    rng: &mut R,
) -> Result<Vec<GameDefinition>, BingoError> {
    let doc = parse_document(text)?;
    Ok(read_games(&doc)?
        .into_iter()
        .map(|game| into_definition(game, generate_id(rng)))
        .collect())
}

pub fn export_game(game: &GameDefinition) -> GameDocument {
    GameDocument {
        version: FORMAT_VERSION.to_string(),
        bingo: PortableGame::from(game),
    }
}

pub fn export_games<'a, I>(games: I) -> GameCollectionDocument
where
    I: IntoIterator<Item = &'a GameDefinition>,
{
    GameCollectionDocument {
        version: FORMAT_VERSION.to_string(),
        export_date: now(),
        bingos: games.into_iter().map(PortableGame::from).collect(),
    }
}

pub fn export_card(game: &GameDefinition, card: &Card, card_id: &str) -> CardDocument {
    CardDocument {
        version: FORMAT_VERSION.to_string(),
        kind: CARD_DOCUMENT_TYPE.to_string(),
        bingo_id: Some(game.id.clone()),
        card_id: Some(card_id.to_string()),
        bingo: PortableGame {
            created_at: None,
            ..PortableGame::from(game)
        },
        card: card.clone(),
        exported_at: Some(now()),
    }
}

/// Pretty-printed JSON, as offered for download
pub fn to_json<T: Serialize>(document: &T) -> Result<String, BingoError> {
    serde_json::to_string_pretty(document)
        .map_err(|e| BingoError::format_with("document could not be serialized", e))
}

/// `My Game!` becomes `My_Game_`
pub fn file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn game_file_name(game: &GameDefinition) -> String {
    format!("{}_bingo.json", file_stem(&game.title))
}

pub fn card_file_name(game: &GameDefinition, card_id: &str) -> String {
    format!("{}_card_{}.json", file_stem(&game.title), card_id)
}

pub fn collection_file_name() -> String {
    format!("bingos_export_{}.json", chrono::Utc::now().format("%Y-%m-%d"))
}
