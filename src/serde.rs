//! Serde support, enabled with the `serde` feature.
//!
//! [`Id`] serializes as its 11 character base62 string by default. Use
//! [`as_i64`] with `#[serde(with = "monoflake::serde::as_i64")]` to store the
//! raw integer instead.

use crate::Id;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_base62_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_str(Base62Visitor)
    }
}

struct Base62Visitor;

impl de::Visitor<'_> for Base62Visitor {
    type Value = Id;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a base62 encoded id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Id, E> {
        Id::try_from_base62(v).map_err(E::custom)
    }
}

/// Serialize and deserialize an [`Id`] as its raw integer value.
pub mod as_i64 {
    use crate::Id;
    use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    /// Serialize an id as its integer value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &Id, s: S) -> Result<S::Ok, S::Error> {
        id.as_i64().serialize(s)
    }

    /// Deserialize an id from its integer value.
    ///
    /// # Errors
    ///
    /// Returns an error if the deserializer fails or the value is negative.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Id, D::Error> {
        let id = Id::from_i64(i64::deserialize(d)?);
        if !id.is_valid() {
            return Err(de::Error::custom(format!("invalid id: {}", id.as_i64())));
        }
        Ok(id)
    }
}
