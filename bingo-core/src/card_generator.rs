use bingo_types::{Card, Cell};
use rand::Rng;
use rand::seq::SliceRandom;

/// Index of the free cell on a `size`x`size` board. For even sizes this is
/// the lower-right of the four central cells.
pub fn free_cell_index(size: usize) -> (usize, usize) {
    (size / 2, size / 2)
}

/// Deal a new card from a word pool.
///
/// Words are shuffled, then laid out row-major. When the pool is smaller than
/// the number of word cells the shuffled sequence wraps around, so words may
/// repeat on one card.
pub fn generate_card<R: Rng + ?Sized>(
    words: &[String],
    size: usize,
    free_center: bool,
    rng: &mut R,
) -> Card {
    let mut shuffled = words.to_vec();
    shuffled.shuffle(rng);

    let free_cell = free_center.then(|| free_cell_index(size));
    let mut pool = shuffled.iter().cycle();

    let rows: Vec<Vec<Cell>> = (0..size)
        .map(|row| {
            (0..size)
                .map(|col| {
                    if free_cell == Some((row, col)) {
                        Cell::free()
                    } else {
                        // An empty pool leaves blank cells rather than panicking
                        Cell::word(pool.next().cloned().unwrap_or_default())
                    }
                })
                .collect()
        })
        .collect();

    Card::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{}", i)).collect()
    }

    #[test]
    fn test_card_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        for size in 3..=5 {
            let card = generate_card(&words(size * size), size, false, &mut rng);
            assert_eq!(card.size(), size);
            assert!(card.is_square());
            assert_eq!(card.free_count(), 0);
        }
    }

    #[test]
    fn test_free_center_placement() {
        let mut rng = StdRng::seed_from_u64(3);

        let card = generate_card(&words(25), 5, true, &mut rng);
        assert!(card.cell(2, 2).unwrap().is_free);
        assert!(card.cell(2, 2).unwrap().marked);
        assert_eq!(card.free_count(), 1);

        // Even sizes keep the floor(size / 2) rule
        let card = generate_card(&words(16), 4, true, &mut rng);
        assert!(card.cell(2, 2).unwrap().is_free);
        assert!(!card.cell(1, 1).unwrap().is_free);
        assert_eq!(card.free_count(), 1);
    }

    #[test]
    fn test_each_word_used_once_when_pool_matches() {
        let pool = words(9);
        let card = generate_card(&pool, 3, false, &mut StdRng::seed_from_u64(9));
        let texts: HashSet<&str> = card.cells().map(|c| c.text.as_str()).collect();
        assert_eq!(texts.len(), 9);
    }

    #[test]
    fn test_small_pool_wraps_around() {
        let pool = words(4);
        let card = generate_card(&pool, 3, false, &mut StdRng::seed_from_u64(5));

        assert_eq!(card.cells().count(), 9);
        assert!(card.cells().all(|c| pool.contains(&c.text)));

        // Wrapping repeats the shuffled order: cell 4 matches cell 0
        let flat: Vec<&str> = card.cells().map(|c| c.text.as_str()).collect();
        assert_eq!(flat[0], flat[4]);
        assert_eq!(flat[1], flat[5]);
    }

    #[test]
    fn test_empty_pool_yields_blank_cells() {
        let card = generate_card(&[], 3, true, &mut StdRng::seed_from_u64(5));
        assert_eq!(card.free_count(), 1);
        assert!(card.cells().filter(|c| !c.is_free).all(|c| c.text.is_empty()));
    }

    #[test]
    fn test_new_cells_unmarked() {
        let card = generate_card(&words(25), 5, true, &mut StdRng::seed_from_u64(8));
        assert_eq!(card.marked_count(), 0);
    }
}
