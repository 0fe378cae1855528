#![allow(dead_code)]

use std::sync::Arc;

use bingo_app::{BingoLibrary, GameSession};
use bingo_persistence::{BingoRepository, KeyValueStore, MemoryStore, SqliteStore};
use bingo_types::{GameDefinition, GameDraft, VictoryType};
use migration::{Migrator, MigratorTrait};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Test setup backed by an in-memory store
pub struct TestLibrarySetup {
    pub store: Arc<MemoryStore>,
    pub library: BingoLibrary,
    pub rng: StdRng,
}

impl TestLibrarySetup {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let library = BingoLibrary::new(BingoRepository::new(store.clone()));

        Self {
            store,
            library,
            rng: StdRng::seed_from_u64(42),
        }
    }

    /// Creates a stored game with `size * size` distinct words
    pub async fn create_game(&mut self, title: &str, size: usize) -> GameDefinition {
        self.create_game_with(title, size, false, VictoryType::ALL.to_vec())
            .await
    }

    pub async fn create_game_with(
        &mut self,
        title: &str,
        size: usize,
        free_center: bool,
        victory_types: Vec<VictoryType>,
    ) -> GameDefinition {
        let draft = GameDraft {
            title: title.to_string(),
            size,
            free_center,
            victory_types,
            words: numbered_words(size * size),
            ..GameDraft::default()
        };
        self.library
            .create_game(draft, &mut self.rng)
            .await
            .expect("Failed to create game")
    }

    pub async fn open(&mut self, game_id: &str, card_id: Option<&str>) -> GameSession {
        GameSession::open(&self.library, game_id, card_id, &mut self.rng)
            .await
            .expect("Failed to open session")
    }

    pub async fn stored_keys(&self) -> Vec<String> {
        self.store.keys().await.expect("Failed to list keys")
    }
}

/// Library over SQLite in memory with the schema migrated
pub async fn sqlite_library() -> BingoLibrary {
    let db = bingo_persistence::connection::connect_to_memory_database()
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    BingoLibrary::new(BingoRepository::new(Arc::new(SqliteStore::new(db))))
}

/// `["word 1", "word 2", ...]`
pub fn numbered_words(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("word {}", i)).collect()
}

/// Toggle every cell in `row`
pub async fn mark_row(session: &mut GameSession, row: usize) {
    for col in 0..session.game().size {
        session.toggle(row, col).await.expect("Failed to toggle");
    }
}
