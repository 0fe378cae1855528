use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const ID_LENGTH: usize = 7;

/// Short random base-36 identifier for games and cards.
///
/// Uniqueness is probabilistic; callers that can see the existing ids retry
/// on collision.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_id_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let id = generate_id(&mut rng);
            assert_eq!(id.len(), ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_seeded_ids_repeat() {
        let a = generate_id(&mut StdRng::seed_from_u64(42));
        let b = generate_id(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
