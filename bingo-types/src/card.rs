use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Text shown on the reserved center cell
pub const FREE_CELL_TEXT: &str = "🎯 FREE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cell {
    pub text: String,
    pub is_free: bool,
    pub marked: bool,
}

impl Cell {
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_free: false,
            marked: false,
        }
    }

    /// Free cells start marked and stay marked
    pub fn free() -> Self {
        Self {
            text: FREE_CELL_TEXT.to_string(),
            is_free: true,
            marked: true,
        }
    }
}

/// Square grid of cells, stored row-major. Serializes as a bare matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Card(pub Vec<Vec<Cell>>);

impl Card {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self(rows)
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.0
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.0.get(row).and_then(|r| r.get(col))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.0.iter().flatten()
    }

    /// Every row has as many cells as there are rows
    pub fn is_square(&self) -> bool {
        let size = self.size();
        self.0.iter().all(|row| row.len() == size)
    }

    /// Flip the mark on a non-free cell. Returns the new mark, or None when
    /// the coordinates are out of range or the cell is free.
    pub fn toggle(&mut self, row: usize, col: usize) -> Option<bool> {
        let cell = self.0.get_mut(row).and_then(|r| r.get_mut(col))?;
        if cell.is_free {
            return None;
        }
        cell.marked = !cell.marked;
        Some(cell.marked)
    }

    /// Marked cells, not counting free cells
    pub fn marked_count(&self) -> usize {
        self.cells().filter(|c| c.marked && !c.is_free).count()
    }

    pub fn free_count(&self) -> usize {
        self.cells().filter(|c| c.is_free).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DiagonalKind {
    Main,      // (i, i)
    Secondary, // (i, size - 1 - i)
}

/// One satisfied victory condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "lowercase")]
#[ts(export)]
pub enum Win {
    Line { index: usize },
    Column { index: usize },
    Diagonal { which: DiagonalKind },
    Full,
}

impl Win {
    pub fn is_full(&self) -> bool {
        matches!(self, Win::Full)
    }
}
