//! Versioned save record
//!
//! A record is a JSON document holding the secret, the completed rounds and
//! the round counter, plus the player name and save time. Codes are written
//! in their fixed-width padded form (`"1231oo"`), so the blank symbol is kept
//! apart from the digits. The outcome is never stored.
//!
//! Decoding checks the whole record before building a [`Game`]; anything
//! inconsistent is reported as [`SessionError::CorruptRecord`].

use super::SessionError;
use crate::core::{Code, Game, MAX_ROUNDS, SaveMeta, Score, Turn};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Current record schema version
pub const RECORD_VERSION: u32 = 1;

/// On-disk form of a saved game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub version: u32,
    pub secret: String,
    pub history: Vec<TurnRecord>,
    pub round: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<NaiveDateTime>,
}

/// On-disk form of one completed round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnRecord {
    pub guess: String,
    pub exact: u8,
    pub partial: u8,
}

impl SessionRecord {
    /// Capture a game's persistent fields
    #[must_use]
    pub fn from_game(game: &Game) -> Self {
        Self {
            version: RECORD_VERSION,
            secret: game.secret().padded(),
            history: game
                .history()
                .iter()
                .map(|turn| TurnRecord {
                    guess: turn.guess.padded(),
                    exact: turn.score.exact(),
                    partial: turn.score.partial(),
                })
                .collect(),
            round: game.round(),
            player: game.meta().map(|m| m.player.clone()),
            saved_at: game.meta().map(|m| m.saved_at),
        }
    }

    /// Validate the record and rebuild the game it describes
    ///
    /// # Errors
    /// Returns `SessionError::CorruptRecord` if the version is unknown, a code
    /// is malformed, the round counter disagrees with the history, no rounds
    /// remain, a stored score differs from re-scoring the guess, or only half
    /// of the save details are present.
    pub fn into_game(self) -> Result<Game, SessionError> {
        if self.version != RECORD_VERSION {
            return Err(corrupt(format!(
                "unsupported record version {}",
                self.version
            )));
        }

        let secret = Code::from_padded(&self.secret)
            .ok_or_else(|| corrupt(format!("invalid secret \"{}\"", self.secret)))?;

        if self.round != self.history.len() {
            return Err(corrupt(format!(
                "round {} does not match {} history entries",
                self.round,
                self.history.len()
            )));
        }
        if self.round >= MAX_ROUNDS {
            return Err(corrupt(format!("round {} leaves no guesses", self.round)));
        }

        let history = self
            .history
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let guess = Code::from_padded(&entry.guess).ok_or_else(|| {
                    corrupt(format!("invalid guess \"{}\" in round {}", entry.guess, i + 1))
                })?;
                let score = Score::new(entry.exact, entry.partial);
                if score != Score::calculate(&secret, &guess) {
                    return Err(corrupt(format!("score {score} in round {} is wrong", i + 1)));
                }
                Ok(Turn { guess, score })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let meta = match (self.player, self.saved_at) {
            (Some(player), Some(saved_at)) => Some(SaveMeta { player, saved_at }),
            (None, None) => None,
            _ => return Err(corrupt("player and save time must appear together")),
        };

        Ok(Game::restore(secret, history, meta))
    }
}

fn corrupt(reason: impl Into<String>) -> SessionError {
    SessionError::CorruptRecord(reason.into())
}

/// Serialize a game to record text
///
/// # Errors
/// Returns `SessionError::Encode` if JSON serialization fails.
pub fn encode(game: &Game) -> Result<String, SessionError> {
    let record = SessionRecord::from_game(game);
    let mut text = serde_json::to_string_pretty(&record).map_err(SessionError::Encode)?;
    text.push('\n');
    Ok(text)
}

/// Parse record text back into a game
///
/// # Errors
/// Returns `SessionError::CorruptRecord` if the text is not a valid record.
pub fn decode(text: &str) -> Result<Game, SessionError> {
    let record: SessionRecord =
        serde_json::from_str(text).map_err(|e| corrupt(format!("unreadable record: {e}")))?;
    debug!(version = record.version, round = record.round, "decoding record");
    record.into_game()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outcome;
    use chrono::NaiveDate;

    fn saved_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 5)
            .unwrap()
            .and_hms_opt(14, 3, 22)
            .unwrap()
    }

    fn game_with_rounds(secret: &str, guesses: &[&str]) -> Game {
        let mut game = Game::with_secret(Code::parse(secret).unwrap());
        for guess in guesses {
            game.submit(guess).unwrap();
        }
        game
    }

    fn record_json(secret: &str, history: &str, round: usize) -> String {
        format!(r#"{{"version":1,"secret":"{secret}","history":[{history}],"round":{round}}}"#)
    }

    #[test]
    fn encoded_codes_are_padded() {
        let game = game_with_rounds("1231", &["1213"]);
        let record = SessionRecord::from_game(&game);

        assert_eq!(record.secret, "1231oo");
        assert_eq!(record.round, 1);
        assert_eq!(
            record.history,
            vec![TurnRecord {
                guess: "1213oo".to_string(),
                exact: 2,
                partial: 2,
            }]
        );
        assert!(record.player.is_none());
    }

    #[test]
    fn reload_keeps_rounds_and_history() {
        let mut game = game_with_rounds("54321", &["0000", "5432", "12345"]);
        game.set_meta(SaveMeta {
            player: "Ada".to_string(),
            saved_at: saved_at(),
        });

        let restored = decode(&encode(&game).unwrap()).unwrap();

        assert_eq!(restored.round(), 3);
        assert_eq!(restored.history(), game.history());
        assert_eq!(restored.secret(), game.secret());
        assert_eq!(restored.outcome(), Outcome::InProgress);
        assert_eq!(restored.meta(), game.meta());
    }

    #[test]
    fn winning_history_reloads_in_progress() {
        let json = record_json("1231oo", r#"{"guess":"1231oo","exact":4,"partial":0}"#, 1);
        let game = decode(&json).unwrap();
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn rejects_unparsable_text() {
        assert!(matches!(
            decode("not json"),
            Err(SessionError::CorruptRecord(_))
        ));
        assert!(matches!(decode(""), Err(SessionError::CorruptRecord(_))));
    }

    #[test]
    fn rejects_missing_fields() {
        let json = r#"{"version":1,"secret":"1231oo","round":0}"#;
        assert!(matches!(decode(json), Err(SessionError::CorruptRecord(_))));
    }

    #[test]
    fn rejects_unknown_version() {
        let json = r#"{"version":2,"secret":"1231oo","history":[],"round":0}"#;
        assert!(matches!(decode(json), Err(SessionError::CorruptRecord(_))));
    }

    #[test]
    fn rejects_malformed_secret() {
        for secret in ["1231", "1239oo", "12o1oo", "oooooo"] {
            let json = record_json(secret, "", 0);
            assert!(
                matches!(decode(&json), Err(SessionError::CorruptRecord(_))),
                "secret {secret}"
            );
        }
    }

    #[test]
    fn rejects_round_mismatch() {
        let json = record_json("1231oo", "", 2);
        assert!(matches!(decode(&json), Err(SessionError::CorruptRecord(_))));
    }

    #[test]
    fn rejects_finished_round_count() {
        let entry = r#"{"guess":"0000oo","exact":0,"partial":0}"#;
        let history = vec![entry; 10].join(",");
        let json = record_json("1231oo", &history, 10);
        assert!(matches!(decode(&json), Err(SessionError::CorruptRecord(_))));
    }

    #[test]
    fn rejects_tampered_score() {
        let json = record_json("1231oo", r#"{"guess":"1213oo","exact":4,"partial":0}"#, 1);
        assert!(matches!(decode(&json), Err(SessionError::CorruptRecord(_))));
    }

    #[test]
    fn rejects_malformed_guess() {
        let json = record_json("1231oo", r#"{"guess":"12x3oo","exact":0,"partial":0}"#, 1);
        assert!(matches!(decode(&json), Err(SessionError::CorruptRecord(_))));
    }

    #[test]
    fn rejects_half_of_save_details() {
        let json = r#"{"version":1,"secret":"1231oo","history":[],"round":0,"player":"Ada"}"#;
        assert!(matches!(decode(json), Err(SessionError::CorruptRecord(_))));
    }
}
