use bingo_types::{Card, DiagonalKind, VictoryType, Win};

pub struct WinDetector;

impl WinDetector {
    /// Every cell in the row is marked
    pub fn check_line(card: &Card, row: usize) -> bool {
        card.rows()
            .get(row)
            .is_some_and(|cells| cells.iter().all(|c| c.marked))
    }

    /// Every cell in the column is marked
    pub fn check_column(card: &Card, col: usize) -> bool {
        card.rows()
            .iter()
            .all(|cells| cells.get(col).is_some_and(|c| c.marked))
    }

    pub fn check_diagonal(card: &Card, which: DiagonalKind) -> bool {
        let size = card.size();
        card.rows().iter().enumerate().all(|(i, cells)| {
            let col = match which {
                DiagonalKind::Main => i,
                DiagonalKind::Secondary => size - 1 - i,
            };
            cells.get(col).is_some_and(|c| c.marked)
        })
    }

    pub fn check_full(card: &Card) -> bool {
        card.cells().all(|c| c.marked)
    }
}

/// All victory conditions the card currently satisfies, among the enabled types.
///
/// Order: rows, columns, main then secondary diagonal, full card. The result
/// is recomputed from scratch on each call; deciding which wins are new is up
/// to the caller.
pub fn detect_wins(card: &Card, victory_types: &[VictoryType]) -> Vec<Win> {
    let size = card.size();
    let enabled = |t: VictoryType| victory_types.contains(&t);
    let mut wins = Vec::new();

    if enabled(VictoryType::Line) {
        wins.extend(
            (0..size)
                .filter(|&i| WinDetector::check_line(card, i))
                .map(|index| Win::Line { index }),
        );
    }

    if enabled(VictoryType::Column) {
        wins.extend(
            (0..size)
                .filter(|&i| WinDetector::check_column(card, i))
                .map(|index| Win::Column { index }),
        );
    }

    if enabled(VictoryType::Diagonal) && size > 0 {
        for which in [DiagonalKind::Main, DiagonalKind::Secondary] {
            if WinDetector::check_diagonal(card, which) {
                wins.push(Win::Diagonal { which });
            }
        }
    }

    if enabled(VictoryType::Full) && size > 0 && WinDetector::check_full(card) {
        wins.push(Win::Full);
    }

    wins
}

/// Wins present in `current` but not in `previous`
pub fn new_wins(previous: &[Win], current: &[Win]) -> Vec<Win> {
    current
        .iter()
        .filter(|win| !previous.contains(win))
        .copied()
        .collect()
}
