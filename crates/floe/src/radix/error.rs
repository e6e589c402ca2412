use thiserror::Error;

/// Errors produced by the radix codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RadixError {
    /// An alphabet needs at least two distinct characters to name a base.
    #[error("alphabet has {len} characters, but a radix needs at least 2")]
    AlphabetTooSmall { len: usize },

    /// A character's position is its digit value, so it may appear only once.
    #[error("alphabet repeats {ch:?}")]
    DuplicateDigit { ch: char },

    /// The input contained a character that is not part of the alphabet.
    #[error("{ch:?} is not a digit of the given alphabet")]
    InvalidDigit { ch: char },

    /// The decoded value does not fit into 128 bits.
    #[error("decoded value exceeds 128 bits")]
    Overflow,
}
