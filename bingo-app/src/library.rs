use std::cmp::Reverse;
use std::collections::BTreeSet;

use bingo_core::codec;
use bingo_core::{CardProgress, generate_id, validate_draft};
use bingo_persistence::BingoRepository;
use bingo_types::{BingoError, CardId, GameDefinition, GameDraft, GameId, IncompleteGameEntry};
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_ID_ATTEMPTS;

/// Store-backed operations on the whole collection of games: creation,
/// import/export, cascade delete and the incomplete-game scan.
#[derive(Clone)]
pub struct BingoLibrary {
    repo: BingoRepository,
    id_attempts: usize,
}

/// A card written by [`BingoLibrary::import_card`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedCard {
    pub game_id: GameId,
    pub card_id: CardId,
}

impl BingoLibrary {
    pub fn new(repo: BingoRepository) -> Self {
        Self::with_id_attempts(repo, DEFAULT_ID_ATTEMPTS)
    }

    pub fn with_id_attempts(repo: BingoRepository, id_attempts: usize) -> Self {
        Self {
            repo,
            id_attempts: id_attempts.max(1),
        }
    }

    pub fn repository(&self) -> &BingoRepository {
        &self.repo
    }

    /// Mint an id not in `taken`. After `id_attempts` collisions the last
    /// candidate is used anyway.
    fn mint_id<R: Rng + ?Sized>(&self, taken: &BTreeSet<String>, rng: &mut R) -> String {
        let mut candidate = generate_id(rng);
        for _ in 1..self.id_attempts {
            if !taken.contains(&candidate) {
                return candidate;
            }
            debug!(id = %candidate, "Generated id already in use, retrying");
            candidate = generate_id(rng);
        }
        if taken.contains(&candidate) {
            warn!(id = %candidate, attempts = self.id_attempts, "Accepting colliding id");
        }
        candidate
    }

    async fn taken_game_ids(&self) -> Result<BTreeSet<GameId>, BingoError> {
        Ok(self.repo.games().await?.into_keys().collect())
    }

    pub(crate) async fn mint_card_id<R: Rng + ?Sized>(
        &self,
        game_id: &str,
        rng: &mut R,
    ) -> Result<CardId, BingoError> {
        let taken: BTreeSet<CardId> = self
            .repo
            .card_keys()
            .await?
            .into_iter()
            .filter(|(owner, _)| owner == game_id)
            .map(|(_, card_id)| card_id)
            .collect();
        Ok(self.mint_id(&taken, rng))
    }

    /// Validate an editor draft and store it as a new game
    pub async fn create_game<R: Rng + ?Sized>(
        &self,
        draft: GameDraft,
        rng: &mut R,
    ) -> Result<GameDefinition, BingoError> {
        validate_draft(&draft)?;

        let id = self.mint_id(&self.taken_game_ids().await?, rng);
        let game = draft.into_definition(id, Utc::now().to_rfc3339());
        self.repo.save_game(&game).await?;

        info!(game_id = %game.id, title = %game.title, size = game.size, "Created game");
        Ok(game)
    }

    pub async fn game(&self, game_id: &str) -> Result<GameDefinition, BingoError> {
        self.repo
            .game(game_id)
            .await?
            .ok_or_else(|| BingoError::GameNotFound {
                game_id: game_id.to_string(),
            })
    }

    /// Every game, newest first
    pub async fn games(&self) -> Result<Vec<GameDefinition>, BingoError> {
        let mut games: Vec<GameDefinition> = self.repo.games().await?.into_values().collect();
        games.sort_by_key(|game| Reverse(created_at(game)));
        Ok(games)
    }

    /// Remove a game together with all of its cards. Returns whether the game existed.
    pub async fn delete_game(&self, game_id: &str) -> Result<bool, BingoError> {
        let existed = self.repo.delete_game(game_id).await?;
        let removed = self.repo.delete_game_cards(game_id).await?;

        info!(game_id = %game_id, existed, removed_card_keys = removed, "Deleted game and cards");
        Ok(existed)
    }

    /// Import one game under a fresh id
    pub async fn import_game<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<GameDefinition, BingoError> {
        let doc = codec::parse_document(text)?;
        let portable = codec::read_game(&doc)?;

        let id = self.mint_id(&self.taken_game_ids().await?, rng);
        let game = codec::into_definition(portable, id);
        self.repo.save_game(&game).await?;

        info!(game_id = %game.id, title = %game.title, "Imported game");
        Ok(game)
    }

    /// Import every game in a document, each under a fresh id, in one write
    pub async fn import_games<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<Vec<GameDefinition>, BingoError> {
        let doc = codec::parse_document(text)?;
        let portables = codec::read_games(&doc)?;

        let mut taken = self.taken_game_ids().await?;
        let mut games = Vec::with_capacity(portables.len());
        for portable in portables {
            let id = self.mint_id(&taken, rng);
            taken.insert(id.clone());
            games.push(codec::into_definition(portable, id));
        }
        self.repo.save_games(&games).await?;

        info!(count = games.len(), "Imported games");
        Ok(games)
    }

    pub async fn export_game(&self, game_id: &str) -> Result<String, BingoError> {
        let game = self.game(game_id).await?;
        codec::to_json(&codec::export_game(&game))
    }

    /// Every stored game in one collection document, oldest first
    pub async fn export_all_games(&self) -> Result<String, BingoError> {
        let mut games: Vec<GameDefinition> = self.repo.games().await?.into_values().collect();
        games.sort_by_key(created_at);

        info!(count = games.len(), "Exporting all games");
        codec::to_json(&codec::export_games(&games))
    }

    pub async fn export_card(&self, game_id: &str, card_id: &str) -> Result<String, BingoError> {
        let game = self.game(game_id).await?;
        let card = self
            .repo
            .card_state(game_id, card_id)
            .await?
            .ok_or_else(|| BingoError::CardNotFound {
                game_id: game_id.to_string(),
                card_id: card_id.to_string(),
            })?;

        codec::to_json(&codec::export_card(&game, &card, card_id))
    }

    /// Store a card document. The embedded game is saved under the
    /// document's `bingoId` unless a game with that id already exists, in
    /// which case the card must fit that game's board.
    pub async fn import_card<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<ImportedCard, BingoError> {
        let doc = codec::parse_document(text)?;
        let import = codec::read_card(&doc)?;

        let game_id = match import.game_id {
            Some(id) => id,
            None => self.mint_id(&self.taken_game_ids().await?, rng),
        };
        if game_id.contains('_') {
            warn!(game_id = %game_id, "Imported game id contains '_'; its cards may not be found by the scanner");
        }

        if let Some(stored) = self.repo.game(&game_id).await? {
            if stored.size != import.card.size() {
                return Err(BingoError::format(format!(
                    "card is {}x{} but stored game {} is {}x{}",
                    import.card.size(),
                    import.card.size(),
                    game_id,
                    stored.size,
                    stored.size
                )));
            }
            debug!(game_id = %game_id, "Card belongs to a stored game, keeping it");
        } else {
            let game = codec::into_definition(import.game, game_id.clone());
            self.repo.save_game(&game).await?;
            info!(game_id = %game_id, title = %game.title, "Stored game from card document");
        }

        let card_id = match import.card_id {
            Some(id) => id,
            None => self.mint_card_id(&game_id, rng).await?,
        };
        self.repo.save_card_state(&game_id, &card_id, &import.card).await?;

        info!(game_id = %game_id, card_id = %card_id, "Imported card");
        Ok(ImportedCard { game_id, card_id })
    }

    /// Cards with partial, non-winning progress whose game still exists,
    /// most recently played first
    pub async fn list_incomplete_games(&self) -> Result<Vec<IncompleteGameEntry>, BingoError> {
        let games = self.repo.games().await?;
        let mut entries = Vec::new();

        for (game_id, card_id) in self.repo.card_keys().await? {
            let Some(game) = games.get(&game_id) else {
                debug!(game_id = %game_id, card_id = %card_id, "Skipping orphaned card");
                continue;
            };
            let Some(card) = self.repo.card_state(&game_id, &card_id).await? else {
                continue;
            };

            let progress = CardProgress::measure(game, &card);
            if !progress.is_incomplete() {
                continue;
            }

            let last_played = self
                .repo
                .last_played(&game_id, &card_id)
                .await?
                .unwrap_or_else(|| Utc::now().to_rfc3339());

            entries.push(IncompleteGameEntry {
                game_id,
                card_id,
                game: game.clone(),
                card,
                marked_count: progress.marked,
                last_played,
            });
        }

        let now = Utc::now();
        entries.sort_by_key(|entry| Reverse(parse_timestamp(&entry.last_played).unwrap_or(now)));
        Ok(entries)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Unreadable timestamps sort as the oldest
fn created_at(game: &GameDefinition) -> DateTime<Utc> {
    parse_timestamp(&game.created_at).unwrap_or(DateTime::<Utc>::MIN_UTC)
}
