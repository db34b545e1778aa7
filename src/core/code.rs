//! Lock code representation
//!
//! A `Code` is a sequence of 4-6 digits in the range 0-5. Codes carry their
//! logical length explicitly; the fixed-width form padded with [`BLANK`] only
//! appears when a code is displayed or persisted.

use std::fmt;
use thiserror::Error;

/// Display and storage width of every code
pub const WIDTH: usize = 6;

/// Shortest allowed code
pub const MIN_LEN: usize = 4;

/// Longest allowed code
pub const MAX_LEN: usize = WIDTH;

/// Largest digit a code may contain
pub const MAX_DIGIT: u8 = 5;

/// Padding symbol used beyond a code's logical length
pub const BLANK: char = 'o';

/// A guess or secret, 4-6 digits from 0-5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    // Entries at `len..` are always zero so derived equality compares
    // logical length and digits only.
    digits: [u8; WIDTH],
    len: usize,
}

/// Reasons a guess string is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Your guess was empty. Guess lengths must be between 4 and 6.")]
    Empty,
    #[error("Your guess was \"{0}\". It must be only numbers!")]
    NotDigits(String),
    #[error("Your guess was \"{0}\". This is too long. Guess lengths must be between 4 and 6.")]
    TooLong(String),
    #[error("Your guess was \"{0}\". This is too short. Guess lengths must be between 4 and 6.")]
    TooShort(String),
    #[error("Your guess was \"{0}\". It must be only numbers 0 through 5.")]
    DigitOutOfRange(String),
}

impl Code {
    /// Parse and validate player input
    ///
    /// Surrounding whitespace is ignored. The checks run in the order the
    /// player is told about them: characters, then length, then digit range.
    ///
    /// # Errors
    /// Returns `GuessError` if the input is empty, contains anything other
    /// than ASCII digits, is not 4-6 characters long, or has a digit above 5.
    ///
    /// # Examples
    /// ```
    /// use lockbreaker::core::Code;
    ///
    /// let code = Code::parse("1231").unwrap();
    /// assert_eq!(code.len(), 4);
    /// assert_eq!(code.padded(), "1231oo");
    ///
    /// assert!(Code::parse("123").is_err());
    /// assert!(Code::parse("1239").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, GuessError> {
        let text = input.trim();

        if text.is_empty() {
            return Err(GuessError::Empty);
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GuessError::NotDigits(text.to_string()));
        }
        if text.len() > MAX_LEN {
            return Err(GuessError::TooLong(text.to_string()));
        }
        if text.len() < MIN_LEN {
            return Err(GuessError::TooShort(text.to_string()));
        }

        let digits: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
        Self::from_digits(&digits).ok_or_else(|| GuessError::DigitOutOfRange(text.to_string()))
    }

    /// Build a code from raw digit values
    ///
    /// Returns `None` if the length is outside 4-6 or any digit exceeds 5.
    #[must_use]
    pub fn from_digits(values: &[u8]) -> Option<Self> {
        if !(MIN_LEN..=MAX_LEN).contains(&values.len()) {
            return None;
        }
        if values.iter().any(|&d| d > MAX_DIGIT) {
            return None;
        }

        let mut digits = [0u8; WIDTH];
        digits[..values.len()].copy_from_slice(values);
        Some(Self {
            digits,
            len: values.len(),
        })
    }

    /// Assemble a code whose digits are already known to be in range
    ///
    /// Entries at `len..` must be zero.
    pub(crate) fn from_parts(digits: [u8; WIDTH], len: usize) -> Self {
        debug_assert!((MIN_LEN..=MAX_LEN).contains(&len), "code length out of range");
        debug_assert!(digits.iter().all(|&d| d <= MAX_DIGIT));
        debug_assert!(digits[len..].iter().all(|&d| d == 0));
        Self { digits, len }
    }

    /// Parse the fixed-width padded form, e.g. `"1231oo"`
    ///
    /// Every digit must come before every blank. Returns `None` for anything
    /// else, including a valid unpadded code.
    #[must_use]
    pub fn from_padded(text: &str) -> Option<Self> {
        if text.chars().count() != WIDTH {
            return None;
        }

        let logical = text.trim_end_matches(BLANK);
        if !logical.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits: Vec<u8> = logical.bytes().map(|b| b - b'0').collect();
        Self::from_digits(&digits)
    }

    /// Logical length (4-6)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false; codes hold at least four digits
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The digits, without padding
    #[inline]
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// The symbol at a fixed-width position (0-5)
    ///
    /// Positions at or beyond the logical length are blank and yield `None`.
    #[inline]
    #[must_use]
    pub fn slot(&self, position: usize) -> Option<u8> {
        (position < self.len).then(|| self.digits[position])
    }

    /// Fixed-width form padded with [`BLANK`]
    #[must_use]
    pub fn padded(&self) -> String {
        (0..WIDTH)
            .map(|i| self.slot(i).map_or(BLANK, |d| char::from(b'0' + d)))
            .collect()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in self.digits() {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Code {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
