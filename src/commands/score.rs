//! One-shot scoring command
//!
//! Scores a guess against a secret given on the command line.

use crate::core::{Code, Score};
use anyhow::{Context, Result};

/// Result of scoring one guess
pub struct ScoreResult {
    pub secret: Code,
    pub guess: Code,
    pub score: Score,
}

/// Parse both codes and score the guess against the secret
///
/// # Errors
///
/// Returns an error if either code is not 4-6 digits from 0-5.
pub fn score_guess(secret: &str, guess: &str) -> Result<ScoreResult> {
    let secret = Code::parse(secret).context("invalid secret")?;
    let guess = Code::parse(guess).context("invalid guess")?;
    let score = Score::calculate(&secret, &guess);

    Ok(ScoreResult {
        secret,
        guess,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_valid_codes() {
        let result = score_guess("1231", "1213").unwrap();
        assert_eq!(result.score, Score::new(2, 2));
        assert_eq!(result.secret.padded(), "1231oo");
    }

    #[test]
    fn reports_which_code_is_invalid() {
        let err = score_guess("12", "1213").err().unwrap();
        assert_eq!(err.to_string(), "invalid secret");

        let err = score_guess("1231", "9999").err().unwrap();
        assert_eq!(err.to_string(), "invalid guess");
    }
}
