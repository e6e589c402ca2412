use thiserror::Error;

/// A specialized result type for identifier operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All failures the identifier subsystem reports to callers.
///
/// Every variant is local and non-recoverable, surfaced synchronously and
/// before any generator state is mutated. Clock skew and sequence
/// exhaustion are deliberately absent: the generator waits those out
/// internally, and callers only ever observe them as latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The timestamp is at or before the unix epoch origin.
    #[error("timestamp {millis}ms is not after the unix epoch")]
    InvalidTimestamp { millis: i64 },

    /// The worker tag is not exactly 48 bits wide.
    #[error("worker id is {bits} bits wide, expected exactly 48")]
    InvalidWorkerId { bits: usize },

    /// No operational, non-loopback interface with a 48-bit hardware
    /// address was found while auto-selecting a worker tag.
    #[error("no network interface qualifies as a worker id source")]
    NoEligibleWorkerId,

    /// The encoded text contains a character outside the base62 alphabet.
    #[error("{ch:?} is not a base62 digit")]
    InvalidDigit { ch: char },

    /// The text decodes, but not to a structurally valid identifier.
    #[error("malformed identifier: {reason}")]
    MalformedIdentifier { reason: &'static str },
}
