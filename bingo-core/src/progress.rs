use bingo_types::{Card, GameDefinition, Win};

use crate::detect_wins;

/// How far a stored card has been played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardProgress {
    /// Marked cells, free cells excluded
    pub marked: usize,
    /// Cells a player can mark (board cells minus free cells)
    pub markable: usize,
    pub wins: Vec<Win>,
}

impl CardProgress {
    pub fn measure(game: &GameDefinition, card: &Card) -> Self {
        Self {
            marked: card.marked_count(),
            markable: game.cell_count().saturating_sub(card.free_count()),
            wins: detect_wins(card, &game.victory_types),
        }
    }

    pub fn has_full_win(&self) -> bool {
        self.wins.iter().any(Win::is_full)
    }

    /// Started, not every cell marked, and no full-card win yet
    pub fn is_incomplete(&self) -> bool {
        self.marked > 0 && self.marked < self.markable && !self.has_full_win()
    }

    /// Share of markable cells that are marked, 0.0 to 1.0
    pub fn ratio(&self) -> f64 {
        if self.markable == 0 {
            return 0.0;
        }
        self.marked as f64 / self.markable as f64
    }
}
