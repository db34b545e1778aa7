//! Secret code generation

use super::Code;
use super::code::{MAX_DIGIT, MAX_LEN, MIN_LEN, WIDTH};
use rand::Rng;

/// Generate a random secret with a length between `min_len` and `max_len`
///
/// The length is drawn uniformly first, then every digit independently and
/// uniformly from 0-5. Bounds are clamped to the allowed 4-6 range, and a
/// reversed range collapses to `min_len`.
pub fn generate<R: Rng>(rng: &mut R, min_len: usize, max_len: usize) -> Code {
    let min_len = min_len.clamp(MIN_LEN, MAX_LEN);
    let max_len = max_len.clamp(min_len, MAX_LEN);

    let len = rng.random_range(min_len..=max_len);
    let mut digits = [0u8; WIDTH];
    for digit in &mut digits[..len] {
        *digit = rng.random_range(0..=MAX_DIGIT);
    }

    Code::from_parts(digits, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn lengths_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let code = generate(&mut rng, 4, 6);
            assert!((4..=6).contains(&code.len()), "{code}");
            assert!(code.digits().iter().all(|&d| d <= 5));
        }
    }

    #[test]
    fn every_length_is_produced() {
        let mut rng = StdRng::seed_from_u64(2);
        let lengths: HashSet<usize> = (0..300).map(|_| generate(&mut rng, 4, 6).len()).collect();
        assert_eq!(lengths, HashSet::from([4, 5, 6]));
    }

    #[test]
    fn every_digit_is_produced() {
        let mut rng = StdRng::seed_from_u64(3);
        let digits: HashSet<u8> = (0..100)
            .flat_map(|_| generate(&mut rng, 4, 6).digits().to_vec())
            .collect();
        assert_eq!(digits, (0..=5).collect());
    }

    #[test]
    fn fixed_length() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            assert_eq!(generate(&mut rng, 5, 5).len(), 5);
        }
    }

    #[test]
    fn bounds_are_clamped() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(generate(&mut rng, 0, 2).len(), 4);
            assert_eq!(generate(&mut rng, 9, 12).len(), 6);
            assert_eq!(generate(&mut rng, 6, 4).len(), 6);
        }
    }

    #[test]
    fn same_seed_same_code() {
        let a = generate(&mut StdRng::seed_from_u64(99), 4, 6);
        let b = generate(&mut StdRng::seed_from_u64(99), 4, 6);
        assert_eq!(a, b);
    }
}
