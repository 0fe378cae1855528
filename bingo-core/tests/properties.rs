mod common;

use bingo_core::{detect_wins, free_cell_index, generate_card};
use bingo_types::{Card, VictoryType, Win};
use common::*;
use proptest::prelude::*;

fn word_pool() -> impl Strategy<Value = (usize, Vec<String>)> {
    (3usize..=5).prop_flat_map(|size| {
        let min = size * size;
        (
            Just(size),
            proptest::collection::hash_set("[a-z]{1,8}", min..min + 10)
                .prop_map(|words| words.into_iter().collect::<Vec<_>>()),
        )
    })
}

fn unmarked(size: usize) -> Card {
    generate_card(&letter_words(size * size), size, false, &mut seeded_rng(0))
}

proptest! {
    #[test]
    fn generated_card_has_requested_shape(
        (size, words) in word_pool(),
        free_center in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let card = generate_card(&words, size, free_center, &mut seeded_rng(seed));

        prop_assert_eq!(card.size(), size);
        prop_assert!(card.is_square());
        prop_assert_eq!(card.free_count(), usize::from(free_center));
        if free_center {
            let (row, col) = free_cell_index(size);
            prop_assert!(card.cell(row, col).unwrap().is_free);
        }
        for cell in card.cells().filter(|c| !c.is_free) {
            prop_assert!(words.contains(&cell.text));
        }
    }

    #[test]
    fn fully_marked_card_wins_everything(size in 3usize..=5, seed in any::<u64>()) {
        let mut card = generate_card(&letter_words(size * size), size, false, &mut seeded_rng(seed));
        mark_all(&mut card);

        let wins = detect_wins(&card, &VictoryType::ALL);
        prop_assert_eq!(wins.len(), 2 * size + 3);
        prop_assert_eq!(wins.iter().filter(|w| matches!(w, Win::Line { .. })).count(), size);
        prop_assert_eq!(wins.iter().filter(|w| matches!(w, Win::Column { .. })).count(), size);
        prop_assert_eq!(wins.last(), Some(&Win::Full));
    }

    #[test]
    fn unmarked_card_never_wins(
        size in 3usize..=5,
        types in proptest::sample::subsequence(VictoryType::ALL.to_vec(), 0..=4),
    ) {
        prop_assert!(detect_wins(&unmarked(size), &types).is_empty());
    }
}
