use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

/// A 48-bit worker tag, typically the hardware address of a network
/// interface, distinguishing the issuing process or node.
///
/// The type itself enforces the 48-bit width; fallible conversions from
/// byte slices or text report [`Error::InvalidWorkerId`] for anything that
/// is not exactly six bytes. The tag value carries no ordering meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId([u8; 6]);

impl WorkerId {
    /// Builds a worker id from exactly six bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// The six address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl TryFrom<&[u8]> for WorkerId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        match <[u8; 6]>::try_from(bytes) {
            Ok(bytes) => Ok(Self(bytes)),
            Err(_) => Err(Error::InvalidWorkerId {
                bits: bytes.len() * 8,
            }),
        }
    }
}

impl FromStr for WorkerId {
    type Err = Error;

    /// Parses `8d:88:d1:27:46:7b`, `8d-88-d1-27-46-7b`, or bare
    /// `8d88d127467b`.
    fn from_str(s: &str) -> Result<Self> {
        let hex: String = s.chars().filter(|ch| !matches!(ch, ':' | '-')).collect();
        if hex.len() != 12 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(Error::InvalidWorkerId {
                bits: hex.len() * 4,
            });
        }
        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| {
                Error::InvalidWorkerId {
                    bits: hex.len() * 4,
                }
            })?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_hardware_address_spellings() {
        let expected = WorkerId::from_bytes([0x8d, 0x88, 0xd1, 0x27, 0x46, 0x7b]);
        assert_eq!("8d:88:d1:27:46:7b".parse(), Ok(expected));
        assert_eq!("8D-88-D1-27-46-7B".parse(), Ok(expected));
        assert_eq!("8d88d127467b".parse(), Ok(expected));
    }

    #[test]
    fn displays_as_lowercase_colon_separated_hex() {
        let worker = WorkerId::from_bytes([0x8d, 0x88, 0xd1, 0x27, 0x46, 0x7b]);
        assert_eq!(worker.to_string(), "8d:88:d1:27:46:7b");
    }

    #[test]
    fn rejects_anything_but_48_bits() {
        assert_eq!(
            WorkerId::try_from(&[1u8, 2, 3, 4][..]),
            Err(Error::InvalidWorkerId { bits: 32 })
        );
        assert_eq!(
            WorkerId::try_from(&[0u8; 8][..]),
            Err(Error::InvalidWorkerId { bits: 64 })
        );
        assert_eq!(
            "8d:88:d1".parse::<WorkerId>(),
            Err(Error::InvalidWorkerId { bits: 24 })
        );
        assert!(matches!(
            "not-a-hardware-address".parse::<WorkerId>(),
            Err(Error::InvalidWorkerId { .. })
        ));
    }
}
