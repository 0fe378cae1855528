#![allow(dead_code)]

use bingo_core::generate_card;
use bingo_types::{Card, GameDefinition, GameDraft, VictoryType};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Deterministic randomness for tests
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `["A", "B", ...]` with `count` letters
pub fn letter_words(count: usize) -> Vec<String> {
    (b'A'..)
        .take(count)
        .map(|b| (b as char).to_string())
        .collect()
}

/// Creates a game definition with every victory type enabled
pub fn create_test_game(size: usize, free_center: bool) -> GameDefinition {
    create_game_with_types(size, free_center, VictoryType::ALL.to_vec())
}

pub fn create_game_with_types(
    size: usize,
    free_center: bool,
    victory_types: Vec<VictoryType>,
) -> GameDefinition {
    GameDraft {
        title: format!("Test {}x{}", size, size),
        size,
        free_center,
        victory_types,
        words: letter_words(size * size),
        ..GameDraft::default()
    }
    .into_definition("game0001".to_string(), "2024-01-01T00:00:00+00:00".to_string())
}

/// Deals a card for the game with a fixed seed
pub fn deal(game: &GameDefinition, seed: u64) -> Card {
    generate_card(&game.words, game.size, game.free_center, &mut seeded_rng(seed))
}

/// Marks the given cells (free cells are left alone)
pub fn mark_cells(card: &mut Card, cells: &[(usize, usize)]) {
    for &(row, col) in cells {
        card.toggle(row, col);
    }
}

pub fn mark_all(card: &mut Card) {
    let size = card.size();
    for row in 0..size {
        for col in 0..size {
            if !card.cell(row, col).is_some_and(|c| c.marked) {
                card.toggle(row, col);
            }
        }
    }
}
