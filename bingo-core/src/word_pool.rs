use std::collections::HashSet;

use bingo_types::{GameDraft, MAX_SIZE, MIN_SIZE, ValidationIssue};

/// Minimum number of distinct words for a `size`x`size` board
pub fn min_words(size: usize) -> usize {
    size.saturating_mul(size)
}

/// Ordered list of distinct, trimmed words as edited in the game editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Build a pool from existing words, keeping the first occurrence of each
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pool = Self::new();
        for word in words {
            pool.add(word.as_ref());
        }
        pool
    }

    /// Add a single word. Returns false for blank or duplicate words.
    pub fn add(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() || self.contains(word) {
            return false;
        }
        self.words.push(word.to_string());
        true
    }

    /// Add one word per line of pasted text. Returns how many were new.
    pub fn add_lines(&mut self, text: &str) -> usize {
        text.lines().filter(|line| self.add(line)).count()
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.words.len()).then(|| self.words.remove(index))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    /// How many more words a board of this size needs
    pub fn missing_for(&self, size: usize) -> usize {
        min_words(size).saturating_sub(self.len())
    }
}

/// Check the rules a draft must meet before it can be saved or exported
pub fn validate_draft(draft: &GameDraft) -> Result<(), ValidationIssue> {
    validate_rules(draft.size, &draft.words, draft.victory_types.is_empty())
}

/// Boards are 3x3 to 5x5
pub fn validate_size(size: usize) -> Result<(), ValidationIssue> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(ValidationIssue::InvalidSize { size });
    }
    Ok(())
}

pub(crate) fn validate_rules(
    size: usize,
    words: &[String],
    no_victory_types: bool,
) -> Result<(), ValidationIssue> {
    validate_size(size)?;

    let required = min_words(size);
    if words.len() < required {
        return Err(ValidationIssue::InsufficientWords {
            size,
            required,
            actual: words.len(),
        });
    }

    if no_victory_types {
        return Err(ValidationIssue::NoVictoryTypes);
    }

    let mut seen = HashSet::new();
    if let Some(word) = words.iter().find(|w| !seen.insert(w.as_str())) {
        return Err(ValidationIssue::DuplicateWord { word: word.clone() });
    }

    Ok(())
}

/// Same rules as [`validate_draft`], for a definition that is already stored
pub fn validate_definition(game: &bingo_types::GameDefinition) -> Result<(), ValidationIssue> {
    validate_rules(game.size, &game.words, game.victory_types.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingo_types::VictoryType;

    fn draft_with(size: usize, word_count: usize) -> GameDraft {
        GameDraft {
            size,
            words: (0..word_count).map(|i| format!("word{}", i)).collect(),
            ..GameDraft::default()
        }
    }

    #[test]
    fn test_add_trims_and_dedupes() {
        let mut pool = WordPool::new();
        assert!(pool.add("  apple "));
        assert!(!pool.add("apple"));
        assert!(!pool.add("   "));
        assert!(pool.add("Apple")); // case sensitive
        assert_eq!(pool.words(), &["apple".to_string(), "Apple".to_string()]);
    }

    #[test]
    fn test_add_lines_paste() {
        let mut pool = WordPool::from_words(["one"]);
        let added = pool.add_lines("one\n two \n\n\tthree\ntwo\n");
        assert_eq!(added, 2);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.words()[2], "three");
    }

    #[test]
    fn test_remove_by_index() {
        let mut pool = WordPool::from_words(["a", "b", "c"]);
        assert_eq!(pool.remove(1), Some("b".to_string()));
        assert_eq!(pool.remove(9), None);
        assert_eq!(pool.words(), &["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_missing_for() {
        let pool = WordPool::from_words(["a", "b", "c", "d"]);
        assert_eq!(pool.missing_for(3), 5);
        assert_eq!(WordPool::from_words((0..30).map(|i| i.to_string())).missing_for(5), 0);
    }

    #[test]
    fn test_valid_draft() {
        assert_eq!(validate_draft(&draft_with(3, 9)), Ok(()));
        assert_eq!(validate_draft(&draft_with(5, 40)), Ok(()));
    }

    #[test]
    fn test_size_bounds() {
        assert_eq!(
            validate_draft(&draft_with(2, 9)),
            Err(ValidationIssue::InvalidSize { size: 2 })
        );
        assert_eq!(
            validate_draft(&draft_with(6, 40)),
            Err(ValidationIssue::InvalidSize { size: 6 })
        );
    }

    #[test]
    fn test_validate_size_alone() {
        assert_eq!(validate_size(3), Ok(()));
        assert_eq!(validate_size(5), Ok(()));
        assert_eq!(validate_size(0), Err(ValidationIssue::InvalidSize { size: 0 }));
        assert_eq!(
            validate_size(usize::MAX),
            Err(ValidationIssue::InvalidSize { size: usize::MAX })
        );
        assert_eq!(min_words(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_insufficient_words() {
        assert_eq!(
            validate_draft(&draft_with(4, 15)),
            Err(ValidationIssue::InsufficientWords {
                size: 4,
                required: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_requires_victory_type() {
        let mut draft = draft_with(3, 9);
        draft.victory_types.clear();
        assert_eq!(validate_draft(&draft), Err(ValidationIssue::NoVictoryTypes));

        draft.victory_types = vec![VictoryType::Full];
        assert_eq!(validate_draft(&draft), Ok(()));
    }

    #[test]
    fn test_duplicate_words_rejected() {
        let mut draft = draft_with(3, 9);
        draft.words.push("word3".to_string());
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationIssue::DuplicateWord {
                word: "word3".to_string()
            })
        );
    }
}
