use crate::base62::{self, BASE62_LEN, BE_BYTES_LEN};
use crate::error::DecodeError;
use crate::monoflake::ALLOCATION_BITS;
use chrono::{DateTime, TimeDelta, Utc};
use std::{fmt, str::FromStr};

/// A generated identifier.
///
/// Layout, most significant bit first:
///
/// ```text
/// | 1 bit (sign, 0) | 40 bits (ms since epoch) | 23 - n bits (sequence) | n bits (node id) |
/// ```
///
/// The node bit width `n` is not stored in the id; pass the generator's value
/// to [`Id::sequence`] and [`Id::node_id`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(i64);

impl Id {
    /// The out-of-band value returned by the sentinel decoders on overflow.
    /// No generator ever produces it.
    pub const INVALID: Id = Id(-1);

    /// Wrap a raw integer.
    pub const fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// The raw integer value.
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Returns `false` for [`Id::INVALID`] and any other negative value.
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }

    /// Base62 form as an 11 character string.
    pub fn to_base62_string(self) -> String {
        let buf = self.to_base62_bytes();
        buf.iter().map(|&b| b as char).collect()
    }

    /// Base62 form as 11 ASCII bytes.
    pub fn to_base62_bytes(self) -> [u8; BASE62_LEN] {
        base62::encode_base62(self.0 as u64)
    }

    /// Two's-complement big-endian form.
    pub fn to_be_bytes(self) -> [u8; BE_BYTES_LEN] {
        base62::encode_be_bytes(self.0)
    }

    /// Milliseconds elapsed from the generator's epoch.
    pub const fn since(self) -> i64 {
        self.0 >> ALLOCATION_BITS
    }

    /// The per-millisecond sequence field for a layout with `node_bits` node bits.
    ///
    /// `node_bits` above 23 is treated as 23, which leaves no sequence bits.
    pub const fn sequence(self, node_bits: u8) -> i64 {
        let node_bits = clamp_node_bits(node_bits);
        let mask = (1i64 << (ALLOCATION_BITS - node_bits)) - 1;
        (self.0 >> node_bits) & mask
    }

    /// The node id field for a layout with `node_bits` node bits.
    ///
    /// `node_bits` above 23 is treated as 23.
    pub const fn node_id(self, node_bits: u8) -> i64 {
        let mask = (1i64 << clamp_node_bits(node_bits)) - 1;
        self.0 & mask
    }

    /// Wall-clock time of the id's millisecond bucket, given the epoch of the
    /// generator that produced it. `None` if the result is out of range.
    pub fn timestamp(self, epoch: DateTime<Utc>) -> Option<DateTime<Utc>> {
        epoch.checked_add_signed(TimeDelta::try_milliseconds(self.since())?)
    }

    /// Break the id up into its fields.
    pub const fn decompose(self, node_bits: u8) -> Decomposed {
        Decomposed {
            id: self,
            since: self.since(),
            sequence: self.sequence(node_bits),
            node_id: self.node_id(node_bits),
        }
    }

    /// Parse base62 text, reporting overflow as an error.
    pub fn try_from_base62(text: &str) -> Result<Self, DecodeError> {
        base62::decode_base62(text)
            .map(Self)
            .ok_or(DecodeError::Overflow)
    }

    /// Parse big-endian bytes, reporting overflow as an error.
    pub fn try_from_be_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        base62::decode_be_bytes(bytes)
            .map(Self)
            .ok_or(DecodeError::Overflow)
    }
}

const fn clamp_node_bits(node_bits: u8) -> u32 {
    if node_bits as u32 > ALLOCATION_BITS {
        ALLOCATION_BITS
    } else {
        node_bits as u32
    }
}

/// Parse base62 text into an [`Id`], returning [`Id::INVALID`] on overflow.
///
/// Characters outside the base62 alphabet are read as `'0'`; validate input
/// beforehand if that matters.
pub fn parse_base62(text: &str) -> Id {
    Id::try_from_base62(text).unwrap_or(Id::INVALID)
}

/// Parse big-endian bytes into an [`Id`], returning [`Id::INVALID`] on overflow.
///
/// Lengths other than 8 are not rejected: extra leading bytes are folded in.
pub fn parse_be_bytes(bytes: &[u8]) -> Id {
    Id::try_from_be_bytes(bytes).unwrap_or(Id::INVALID)
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buf = self.to_base62_bytes();
        // base62 output is always ASCII
        let s = std::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.write_str(s)
    }
}

impl FromStr for Id {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_base62(s)
    }
}

impl From<Id> for i64 {
    fn from(id: Id) -> Self {
        id.0
    }
}

/// The fields of an [`Id`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposed {
    /// The id itself.
    pub id: Id,
    /// Milliseconds since the epoch.
    pub since: i64,
    /// Per-millisecond sequence.
    pub sequence: i64,
    /// Node id of the generator.
    pub node_id: i64,
}
