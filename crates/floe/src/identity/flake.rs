use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::identity::{EntityTag, Id, Identity, WorkerId};
use crate::radix::{self, Alphabet, RadixError};
use crate::{Error, Result};

/// Size of the packed identifier layout in bytes.
const LAYOUT_BYTES: usize = 16;

/// A 128-bit k-ordered flake identifier for entity type `E`.
///
/// Three components, most significant first:
///
/// ```text
///  Byte offset:  15         8 7          2 1         0
///                +------------+------------+-----------+
///  Field:        | timestamp  | worker id  | sequence  |
///                |  (64 bit)  |  (48 bit)  |  (16 bit) |
///                +------------+------------+-----------+
///                |<-- MSB -- little-endian --- LSB --->|
/// ```
///
/// Every field is stored little-endian regardless of host byte order. The
/// 16 bytes, read as a single little-endian unsigned integer, are base62
/// encoded to give the canonical string form — the only representation
/// exposed on the wire. Identifiers issued later never sort earlier under
/// the identity ordering, although exact ordering across worker tags is
/// not guaranteed.
pub struct FlakeId<E: ?Sized> {
    id: Id<E>,
    timestamp_millis: i64,
    worker_id: WorkerId,
    sequence: u16,
}

impl<E: ?Sized> FlakeId<E> {
    /// Builds an identifier from explicit components, without touching any
    /// generator state.
    ///
    /// This is the pure constructor behind issuance; it is also the
    /// deterministic entry point for tests and for replaying known
    /// identifiers.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTimestamp`] if `timestamp_millis` is not strictly
    /// after the unix epoch. The worker id width is enforced by
    /// [`WorkerId`] itself.
    pub fn from_parts(timestamp_millis: i64, worker_id: WorkerId, sequence: u16) -> Result<Self> {
        if timestamp_millis <= 0 {
            return Err(Error::InvalidTimestamp {
                millis: timestamp_millis,
            });
        }
        let raw = pack(timestamp_millis, worker_id, sequence);
        let encoded = radix::encode(raw, &Alphabet::BASE62);
        Ok(Self {
            id: Id::new(encoded),
            timestamp_millis,
            worker_id,
            sequence,
        })
    }

    /// Recreates an identifier from its base62 encoded form.
    ///
    /// Leading zero bytes of the layout do not survive the minimal-length
    /// encoding, so the decoded integer is widened back to the full
    /// 16-byte layout before the fields are read. The stored value is the
    /// canonical re-encoding of those fields.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDigit`] if `encoded` contains a character outside
    ///   the base62 alphabet
    /// - [`Error::MalformedIdentifier`] if the text decodes to something
    ///   that is not a structurally valid identifier
    pub fn parse(encoded: &str) -> Result<Self> {
        let raw = radix::decode(encoded, &Alphabet::BASE62).map_err(|err| match err {
            RadixError::InvalidDigit { ch } => Error::InvalidDigit { ch },
            _ => Error::MalformedIdentifier {
                reason: "value exceeds the 16-byte layout",
            },
        })?;
        let (timestamp_millis, worker_id, sequence) = unpack(raw);
        Self::from_parts(timestamp_millis, worker_id, sequence).map_err(|_| {
            Error::MalformedIdentifier {
                reason: "timestamp component is not after the unix epoch",
            }
        })
    }

    /// The timestamp component in milliseconds since the unix epoch.
    #[must_use]
    pub const fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    /// The timestamp component as wall-clock time.
    #[must_use]
    pub fn timestamp(&self) -> SystemTime {
        // Strictly positive by construction.
        UNIX_EPOCH + Duration::from_millis(self.timestamp_millis as u64)
    }

    /// The worker tag component.
    #[must_use]
    pub const fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    /// The sequence component, disambiguating identifiers issued within
    /// the same millisecond by the same worker tag.
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        self.sequence
    }

    /// The base62 encoded value of the id.
    #[must_use]
    pub fn value(&self) -> &str {
        self.id.value()
    }
}

fn pack(timestamp_millis: i64, worker_id: WorkerId, sequence: u16) -> u128 {
    let mut bytes = [0u8; LAYOUT_BYTES];
    bytes[0..2].copy_from_slice(&sequence.to_le_bytes());
    bytes[2..8].copy_from_slice(worker_id.as_bytes());
    bytes[8..16].copy_from_slice(&timestamp_millis.to_le_bytes());
    u128::from_le_bytes(bytes)
}

fn unpack(raw: u128) -> (i64, WorkerId, u16) {
    let bytes = raw.to_le_bytes();
    let sequence = u16::from_le_bytes([bytes[0], bytes[1]]);
    let mut worker = [0u8; 6];
    worker.copy_from_slice(&bytes[2..8]);
    let mut timestamp = [0u8; 8];
    timestamp.copy_from_slice(&bytes[8..16]);
    (
        i64::from_le_bytes(timestamp),
        WorkerId::from_bytes(worker),
        sequence,
    )
}

impl<E: ?Sized> AsRef<Id<E>> for FlakeId<E> {
    fn as_ref(&self) -> &Id<E> {
        &self.id
    }
}

impl<E: ?Sized + 'static> Identity for FlakeId<E> {
    fn tag(&self) -> EntityTag {
        EntityTag::of::<E>()
    }

    fn value(&self) -> &str {
        self.id.value()
    }
}

impl<E: ?Sized> Clone for FlakeId<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            timestamp_millis: self.timestamp_millis,
            worker_id: self.worker_id,
            sequence: self.sequence,
        }
    }
}

impl<E: ?Sized + 'static> fmt::Debug for FlakeId<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlakeId")
            .field("tag", &EntityTag::of::<E>().name())
            .field("value", &self.id.value())
            .field("timestamp_millis", &self.timestamp_millis)
            .field("worker_id", &self.worker_id)
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl<E: ?Sized + 'static, F: ?Sized + 'static> PartialEq<FlakeId<F>> for FlakeId<E> {
    fn eq(&self, other: &FlakeId<F>) -> bool {
        self.id == other.id
    }
}

impl<E: ?Sized + 'static> Eq for FlakeId<E> {}

impl<E: ?Sized + 'static, F: ?Sized + 'static> PartialOrd<FlakeId<F>> for FlakeId<E> {
    fn partial_cmp(&self, other: &FlakeId<F>) -> Option<Ordering> {
        self.id.partial_cmp(&other.id)
    }
}

impl<E: ?Sized + 'static> Ord for FlakeId<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<E: ?Sized + 'static> Hash for FlakeId<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<E: ?Sized> fmt::Display for FlakeId<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

impl<E: ?Sized> FromStr for FlakeId<E> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<E: ?Sized> Serialize for FlakeId<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id.value())
    }
}

impl<'de, E: ?Sized> Deserialize<'de> for FlakeId<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::parse(&encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Invoice;

    const WORKER_ZERO: WorkerId = WorkerId::from_bytes([0; 6]);
    const WORKER: WorkerId = WorkerId::from_bytes([0x8d, 0x88, 0xd1, 0x27, 0x46, 0x7b]);

    /// 2022-04-13T04:36:15.005Z.
    const TS: i64 = 1_649_824_575_005;

    #[test]
    fn encodes_the_smallest_issuable_identifier() {
        let id: FlakeId<Invoice> = FlakeId::from_parts(1, WORKER_ZERO, 0).unwrap();
        assert_eq!(id.to_string(), "LygHa16AHYG");
        assert_eq!(id.timestamp_millis(), 1);
        assert_eq!(id.worker_id(), WORKER_ZERO);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn encodes_a_fully_populated_identifier() {
        let id: FlakeId<Invoice> = FlakeId::from_parts(TS, WORKER, 123).unwrap();
        assert_eq!(id.to_string(), "AIOZva1J1jQXuOMSOh");
        assert_eq!(id.timestamp(), UNIX_EPOCH + Duration::from_millis(TS as u64));
    }

    #[test]
    fn packs_fields_little_endian_at_fixed_offsets() {
        let raw = pack(0x0102_0304_0506_0708, WorkerId::from_bytes([1, 2, 3, 4, 5, 6]), 0xBEEF);
        let bytes = raw.to_le_bytes();
        assert_eq!(&bytes[0..2], &[0xEF, 0xBE]);
        assert_eq!(&bytes[2..8], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&bytes[8..16], &[8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn parse_reproduces_every_component() {
        // Leading zero bytes in each field: a tiny timestamp truncates the
        // most significant bytes of the layout, an all-zero worker tag and
        // sequence vanish entirely from the minimal encoding.
        let cases = [
            (1, WORKER_ZERO, 0),
            (1, WORKER_ZERO, 7),
            (1, WORKER, 0),
            (TS, WORKER_ZERO, 0),
            (TS, WorkerId::from_bytes([0, 0, 0, 0, 0, 1]), 1),
            (TS, WORKER, u16::MAX),
            (i64::MAX, WORKER, 42),
        ];
        for (timestamp, worker, sequence) in cases {
            let id: FlakeId<Invoice> = FlakeId::from_parts(timestamp, worker, sequence).unwrap();
            let parsed: FlakeId<Invoice> = FlakeId::parse(id.value()).unwrap();
            assert_eq!(parsed.timestamp_millis(), timestamp);
            assert_eq!(parsed.worker_id(), worker);
            assert_eq!(parsed.sequence(), sequence);
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn parse_normalizes_redundant_leading_zero_digits() {
        let id: FlakeId<Invoice> = FlakeId::from_parts(TS, WORKER, 123).unwrap();
        let padded = format!("000{}", id.value());
        let parsed: FlakeId<Invoice> = FlakeId::parse(&padded).unwrap();
        assert_eq!(parsed.value(), id.value());
    }

    #[test]
    fn rejects_timestamps_at_or_before_the_epoch() {
        assert_eq!(
            FlakeId::<Invoice>::from_parts(0, WORKER, 0),
            Err(Error::InvalidTimestamp { millis: 0 })
        );
        assert_eq!(
            FlakeId::<Invoice>::from_parts(-3_155_760_000_000, WORKER, 0),
            Err(Error::InvalidTimestamp {
                millis: -3_155_760_000_000
            })
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            FlakeId::<Invoice>::parse("trB!g"),
            Err(Error::InvalidDigit { ch: '!' })
        );
        // Decodes fine, but the timestamp component is zero.
        assert!(matches!(
            FlakeId::<Invoice>::parse("0"),
            Err(Error::MalformedIdentifier { .. })
        ));
        // 23 base62 digits overflow the 16-byte layout.
        assert!(matches!(
            FlakeId::<Invoice>::parse("zzzzzzzzzzzzzzzzzzzzzzz"),
            Err(Error::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn serde_round_trips_as_the_encoded_string() {
        let id: FlakeId<Invoice> = FlakeId::from_parts(TS, WORKER, 123).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"AIOZva1J1jQXuOMSOh\"");
        let back: FlakeId<Invoice> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
