use crate::radix::RadixError;

/// An ordered digit alphabet for positional text encoding.
///
/// The radix is the number of characters in the alphabet, and each
/// character's position is its digit value. The presets cover the common
/// bases; [`Alphabet::new`] accepts any caller-supplied digit set.
///
/// # Example
///
/// ```
/// use floe::{Alphabet, RadixError};
///
/// let hex = Alphabet::BASE16;
/// assert_eq!(hex.radix(), 16);
///
/// let custom = Alphabet::new("↑↓")?;
/// assert_eq!(custom.radix(), 2);
/// # Ok::<(), RadixError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet<'a> {
    digits: &'a str,
    radix: usize,
}

impl Alphabet<'static> {
    /// Binary digits.
    pub const BASE2: Self = Self {
        digits: "01",
        radix: 2,
    };

    /// Octal digits.
    pub const BASE8: Self = Self {
        digits: "01234567",
        radix: 8,
    };

    /// Decimal digits.
    pub const BASE10: Self = Self {
        digits: "0123456789",
        radix: 10,
    };

    /// Lowercase hexadecimal digits.
    pub const BASE16: Self = Self {
        digits: "0123456789abcdef",
        radix: 16,
    };

    /// Digits, then uppercase, then lowercase letters.
    ///
    /// This is the wire alphabet for flake identifiers.
    pub const BASE62: Self = Self {
        digits: "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
        radix: 62,
    };
}

impl<'a> Alphabet<'a> {
    /// Builds an alphabet from a caller-supplied digit set.
    ///
    /// # Errors
    ///
    /// - [`RadixError::AlphabetTooSmall`] if `digits` holds fewer than two
    ///   characters
    /// - [`RadixError::DuplicateDigit`] if any character appears twice
    pub fn new(digits: &'a str) -> Result<Self, RadixError> {
        let radix = digits.chars().count();
        if radix < 2 {
            return Err(RadixError::AlphabetTooSmall { len: radix });
        }
        for (position, ch) in digits.chars().enumerate() {
            if digits.chars().take(position).any(|seen| seen == ch) {
                return Err(RadixError::DuplicateDigit { ch });
            }
        }
        Ok(Self { digits, radix })
    }

    /// The base this alphabet encodes.
    #[must_use]
    pub const fn radix(&self) -> usize {
        self.radix
    }

    /// The character for digit `value`.
    ///
    /// Callers guarantee `value < self.radix()`; encode derives digit values
    /// by reducing modulo the radix.
    pub(crate) fn digit(&self, value: usize) -> char {
        debug_assert!(value < self.radix);
        self.digits
            .chars()
            .nth(value)
            .unwrap_or_else(|| unreachable!("digit value {value} out of range for radix {}", self.radix))
    }

    /// The digit value of `ch`, if it is part of the alphabet.
    pub(crate) fn index_of(&self, ch: char) -> Option<usize> {
        self.digits.chars().position(|digit| digit == ch)
    }
}
