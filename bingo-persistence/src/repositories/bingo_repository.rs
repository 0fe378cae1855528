use std::collections::BTreeMap;
use std::sync::Arc;

use bingo_types::{Card, CardId, GameDefinition, GameId, StorageError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::keys;
use crate::store::KeyValueStore;

/// Typed access to games, cards and play bookkeeping on top of a
/// [`KeyValueStore`]. Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct BingoRepository {
    store: Arc<dyn KeyValueStore>,
}

impl BingoRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Stored values that no longer parse are treated as absent
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring unreadable stored value");
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(StorageError::backend)?;
        self.store.set(key, json).await
    }

    /// Every stored game, keyed by id
    pub async fn games(&self) -> Result<BTreeMap<GameId, GameDefinition>, StorageError> {
        Ok(self.read_json(keys::GAMES_KEY).await?.unwrap_or_default())
    }

    pub async fn game(&self, game_id: &str) -> Result<Option<GameDefinition>, StorageError> {
        Ok(self.games().await?.remove(game_id))
    }

    pub async fn game_exists(&self, game_id: &str) -> Result<bool, StorageError> {
        Ok(self.games().await?.contains_key(game_id))
    }

    /// Insert or replace a game under its id
    pub async fn save_game(&self, game: &GameDefinition) -> Result<(), StorageError> {
        self.save_games(std::slice::from_ref(game)).await
    }

    /// Merge several games into the games map with a single write
    pub async fn save_games(&self, batch: &[GameDefinition]) -> Result<(), StorageError> {
        let mut games = self.games().await?;
        for game in batch {
            games.insert(game.id.clone(), game.clone());
        }
        self.write_json(keys::GAMES_KEY, &games).await?;

        info!(count = batch.len(), "Saved games");
        Ok(())
    }

    /// Remove a game definition. Its cards are left in place; see
    /// [`Self::delete_game_cards`]. Returns whether the game existed.
    pub async fn delete_game(&self, game_id: &str) -> Result<bool, StorageError> {
        let mut games = self.games().await?;
        if games.remove(game_id).is_none() {
            return Ok(false);
        }
        self.write_json(keys::GAMES_KEY, &games).await?;

        info!(game_id = %game_id, "Deleted game");
        Ok(true)
    }

    /// Store a card and stamp it as just played
    pub async fn save_card_state(
        &self,
        game_id: &str,
        card_id: &str,
        card: &Card,
    ) -> Result<(), StorageError> {
        self.write_json(&keys::card_key(game_id, card_id), card).await?;
        self.set_last_played(game_id, card_id, Utc::now()).await?;

        debug!(game_id = %game_id, card_id = %card_id, "Saved card state");
        Ok(())
    }

    pub async fn card_state(&self, game_id: &str, card_id: &str) -> Result<Option<Card>, StorageError> {
        self.read_json(&keys::card_key(game_id, card_id)).await
    }

    /// Remove every card and timestamp of a game, plus its current-card pointer.
    /// Returns how many keys were removed.
    pub async fn delete_game_cards(&self, game_id: &str) -> Result<usize, StorageError> {
        let mut doomed = self.store.keys_with_prefix(&keys::game_cards_prefix(game_id)).await?;
        doomed.extend(
            self.store
                .keys_with_prefix(&keys::game_last_played_prefix(game_id))
                .await?,
        );
        let current = keys::current_card_key(game_id);
        if self.store.get(&current).await?.is_some() {
            doomed.push(current);
        }

        for key in &doomed {
            self.store.remove(key).await?;
        }

        info!(game_id = %game_id, removed = doomed.len(), "Deleted game cards");
        Ok(doomed.len())
    }

    pub async fn current_card_id(&self, game_id: &str) -> Result<Option<CardId>, StorageError> {
        let card_id = self.store.get(&keys::current_card_key(game_id)).await?;
        Ok(card_id.filter(|id| !id.is_empty()))
    }

    pub async fn set_current_card_id(&self, game_id: &str, card_id: &str) -> Result<(), StorageError> {
        self.store
            .set(&keys::current_card_key(game_id), card_id.to_string())
            .await
    }

    pub async fn last_played(&self, game_id: &str, card_id: &str) -> Result<Option<String>, StorageError> {
        self.store.get(&keys::last_played_key(game_id, card_id)).await
    }

    pub async fn set_last_played(
        &self,
        game_id: &str,
        card_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.store
            .set(&keys::last_played_key(game_id, card_id), at.to_rfc3339())
            .await
    }

    /// `(gameId, cardId)` of every stored card, including orphans
    pub async fn card_keys(&self) -> Result<Vec<(GameId, CardId)>, StorageError> {
        let stored = self.store.keys_with_prefix(keys::CARD_PREFIX).await?;
        Ok(stored.iter().filter_map(|k| keys::parse_card_key(k)).collect())
    }

    pub async fn card_exists(&self, game_id: &str, card_id: &str) -> Result<bool, StorageError> {
        Ok(self
            .store
            .get(&keys::card_key(game_id, card_id))
            .await?
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use bingo_types::{Cell, GameDraft};

    fn setup_test_repo() -> (BingoRepository, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (BingoRepository::new(store.clone()), store)
    }

    fn test_game(id: &str) -> GameDefinition {
        GameDraft {
            title: format!("Game {}", id),
            size: 3,
            words: (0..9).map(|i| i.to_string()).collect(),
            ..GameDraft::default()
        }
        .into_definition(id.to_string(), "2024-01-01T00:00:00+00:00".to_string())
    }

    fn test_card() -> Card {
        Card::new(vec![
            vec![Cell::word("a"), Cell::word("b")],
            vec![Cell::word("c"), Cell::word("d")],
        ])
    }

    #[tokio::test]
    async fn test_game_upsert_and_lookup() {
        let (repo, _) = setup_test_repo();
        assert!(repo.game("g1").await.unwrap().is_none());

        let mut game = test_game("g1");
        repo.save_game(&game).await.unwrap();
        assert!(repo.game_exists("g1").await.unwrap());
        assert!(!repo.game_exists("g2").await.unwrap());
        assert_eq!(repo.game("g1").await.unwrap(), Some(game.clone()));

        game.title = "Renamed".to_string();
        repo.save_game(&game).await.unwrap();
        assert_eq!(repo.game("g1").await.unwrap().unwrap().title, "Renamed");
        assert_eq!(repo.games().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_games_merges() {
        let (repo, _) = setup_test_repo();
        repo.save_game(&test_game("g1")).await.unwrap();
        repo.save_games(&[test_game("g2"), test_game("g3")]).await.unwrap();

        let games = repo.games().await.unwrap();
        assert_eq!(games.keys().cloned().collect::<Vec<_>>(), vec!["g1", "g2", "g3"]);
    }

    #[tokio::test]
    async fn test_delete_game_does_not_cascade() {
        let (repo, _) = setup_test_repo();
        repo.save_game(&test_game("g1")).await.unwrap();
        repo.save_card_state("g1", "c1", &test_card()).await.unwrap();

        assert!(repo.delete_game("g1").await.unwrap());
        assert!(!repo.delete_game("g1").await.unwrap());
        assert!(repo.game("g1").await.unwrap().is_none());
        assert!(repo.card_state("g1", "c1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_card_state_and_timestamp() {
        let (repo, _) = setup_test_repo();
        assert!(repo.card_state("g1", "c1").await.unwrap().is_none());

        let card = test_card();
        repo.save_card_state("g1", "c1", &card).await.unwrap();

        assert_eq!(repo.card_state("g1", "c1").await.unwrap(), Some(card));
        let stamp = repo.last_played("g1", "c1").await.unwrap().unwrap();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[tokio::test]
    async fn test_delete_game_cards_is_scoped() {
        let (repo, store) = setup_test_repo();
        repo.save_game(&test_game("g1")).await.unwrap();
        repo.save_card_state("g1", "c1", &test_card()).await.unwrap();
        repo.save_card_state("g1", "c2", &test_card()).await.unwrap();
        repo.set_current_card_id("g1", "c2").await.unwrap();
        repo.save_card_state("g10", "c1", &test_card()).await.unwrap();
        repo.set_current_card_id("g10", "c1").await.unwrap();

        let removed = repo.delete_game_cards("g1").await.unwrap();
        assert_eq!(removed, 5);

        assert!(repo.card_state("g1", "c1").await.unwrap().is_none());
        assert!(repo.current_card_id("g1").await.unwrap().is_none());
        assert!(repo.last_played("g1", "c2").await.unwrap().is_none());

        // Another game whose id shares a prefix is untouched
        assert!(repo.card_state("g10", "c1").await.unwrap().is_some());
        assert_eq!(repo.current_card_id("g10").await.unwrap(), Some("c1".to_string()));

        // The games map itself is not touched
        assert!(store.get(keys::GAMES_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_current_card_pointer() {
        let (repo, _) = setup_test_repo();
        assert_eq!(repo.current_card_id("g1").await.unwrap(), None);

        repo.set_current_card_id("g1", "c9").await.unwrap();
        assert_eq!(repo.current_card_id("g1").await.unwrap(), Some("c9".to_string()));
    }

    #[tokio::test]
    async fn test_card_keys_lists_orphans() {
        let (repo, _) = setup_test_repo();
        repo.save_card_state("gone", "c1", &test_card()).await.unwrap();
        repo.save_card_state("g1", "c2", &test_card()).await.unwrap();

        let mut card_keys = repo.card_keys().await.unwrap();
        card_keys.sort();
        assert_eq!(
            card_keys,
            vec![
                ("g1".to_string(), "c2".to_string()),
                ("gone".to_string(), "c1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_corrupt_value_reads_as_absent() {
        let (repo, store) = setup_test_repo();
        store.set(&keys::card_key("g1", "c1"), "not json".to_string()).await.unwrap();
        store.set(keys::GAMES_KEY, "[1, 2".to_string()).await.unwrap();

        assert!(repo.card_state("g1", "c1").await.unwrap().is_none());
        assert!(repo.games().await.unwrap().is_empty());
        assert!(repo.card_exists("g1", "c1").await.unwrap());
    }
}
