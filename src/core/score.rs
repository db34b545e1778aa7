//! Feedback scoring
//!
//! A score is the pair of pin counts the lock reports for a guess:
//! - red (exact): right digit in the right position
//! - white (partial): right digit in the wrong position
//!
//! Every position of the secret and of the guess is counted at most once
//! across both kinds of pin, and blank positions never count at all.

use super::Code;
use super::code::WIDTH;
use std::fmt;

/// Pin counts for one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    exact: u8,
    partial: u8,
}

impl Score {
    /// Create a score from raw pin counts
    #[inline]
    #[must_use]
    pub const fn new(exact: u8, partial: u8) -> Self {
        Self { exact, partial }
    }

    /// Red pins: digits in the correct position
    #[inline]
    #[must_use]
    pub const fn exact(self) -> u8 {
        self.exact
    }

    /// White pins: digits present at a different position
    #[inline]
    #[must_use]
    pub const fn partial(self) -> u8 {
        self.partial
    }

    /// Score `guess` against `secret`
    ///
    /// # Algorithm
    /// 1. First pass: count exact matches and consume both positions
    /// 2. Second pass: for each unconsumed guess position, consume the
    ///    leftmost unconsumed secret position with the same digit
    ///
    /// Both codes are viewed at the fixed width; positions beyond either
    /// code's logical length are blank and match nothing.
    ///
    /// # Examples
    /// ```
    /// use lockbreaker::core::{Code, Score};
    ///
    /// let secret = Code::parse("1231").unwrap();
    /// let guess = Code::parse("1213").unwrap();
    ///
    /// // 1 and 2 in place, the trailing 1 and 3 swapped
    /// assert_eq!(Score::calculate(&secret, &guess), Score::new(2, 2));
    /// ```
    #[must_use]
    pub fn calculate(secret: &Code, guess: &Code) -> Self {
        let mut secret_used = [false; WIDTH];
        let mut guess_used = [false; WIDTH];
        let mut exact = 0u8;
        let mut partial = 0u8;

        // First pass: exact matches
        // Allow: index drives both codes and both marker arrays
        #[allow(clippy::needless_range_loop)]
        for i in 0..WIDTH {
            if let (Some(g), Some(s)) = (guess.slot(i), secret.slot(i))
                && g == s
            {
                exact += 1;
                secret_used[i] = true;
                guess_used[i] = true;
            }
        }

        // Second pass: right digit, wrong position
        for i in 0..WIDTH {
            if guess_used[i] {
                continue;
            }
            let Some(g) = guess.slot(i) else {
                continue;
            };

            let found = (0..WIDTH).find(|&j| !secret_used[j] && secret.slot(j) == Some(g));
            if let Some(j) = found {
                partial += 1;
                secret_used[j] = true;
                guess_used[i] = true;
            }
        }

        Self { exact, partial }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.exact, self.partial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn code(s: &str) -> Code {
        Code::parse(s).unwrap()
    }

    fn score(secret: &str, guess: &str) -> Score {
        Score::calculate(&code(secret), &code(guess))
    }

    fn random_code(rng: &mut StdRng) -> Code {
        let len = rng.random_range(4..=6);
        let digits: Vec<u8> = (0..len).map(|_| rng.random_range(0..=5)).collect();
        Code::from_digits(&digits).unwrap()
    }

    #[test]
    fn no_matches() {
        assert_eq!(score("0000", "1111"), Score::new(0, 0));
    }

    #[test]
    fn identical_code_is_all_exact() {
        for s in ["1231", "00000", "543210", "5555"] {
            let c = code(s);
            assert_eq!(
                Score::calculate(&c, &c),
                Score::new(c.len() as u8, 0),
                "secret {s}"
            );
        }
    }

    #[test]
    fn swapped_digits_score_partial() {
        assert_eq!(score("1231", "1213"), Score::new(2, 2));
        assert_eq!(score("0123", "3210"), Score::new(0, 4));
    }

    #[test]
    fn exact_match_takes_priority_over_partial() {
        // The guess's first 2 must not steal the secret's 2 from the exact match
        assert_eq!(score("1234", "2244"), Score::new(2, 0));
    }

    #[test]
    fn repeated_guess_digit_counts_once_per_secret_digit() {
        assert_eq!(score("1000", "2111"), Score::new(0, 1));
        assert_eq!(score("1100", "0011"), Score::new(0, 4));
    }

    #[test]
    fn repeated_secret_digit_counts_once_per_guess_digit() {
        assert_eq!(score("3333", "0003"), Score::new(1, 0));
        assert_eq!(score("3330", "0003"), Score::new(0, 2));
    }

    #[test]
    fn longer_guess_tail_never_matches_blanks() {
        // Secret 1231 is 1231oo; the guess's trailing digits meet blanks
        assert_eq!(score("1231", "123100"), Score::new(4, 0));
        assert_eq!(score("1231", "000012"), Score::new(0, 2));
    }

    #[test]
    fn shorter_guess_scores_against_full_secret() {
        // Guess 5432 vs secret 012345: 5, 4, 3, 2 all present elsewhere
        assert_eq!(score("012345", "5432"), Score::new(0, 4));
        // Secret digits beyond the guess length can still take partial pins
        assert_eq!(score("000055", "5500"), Score::new(2, 2));
    }

    #[test]
    fn display_and_default() {
        let s = Score::new(2, 1);
        assert_eq!(s.to_string(), "2 1");
        assert_eq!(Score::default(), Score::new(0, 0));
    }

    #[test]
    fn exact_count_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let a = random_code(&mut rng);
            let b = random_code(&mut rng);
            assert_eq!(
                Score::calculate(&a, &b).exact(),
                Score::calculate(&b, &a).exact(),
                "{a} vs {b}"
            );
        }
    }

    #[test]
    fn total_pins_bounded_by_shared_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let secret = random_code(&mut rng);
            let guess = random_code(&mut rng);
            let s = Score::calculate(&secret, &guess);

            let shared = guess
                .digits()
                .iter()
                .filter(|d| secret.digits().contains(d))
                .count();
            let total = usize::from(s.exact() + s.partial());

            assert!(total <= shared, "{secret} vs {guess}: {s}");
            assert!(total <= secret.len(), "{secret} vs {guess}: {s}");
        }
    }
}
