//! Serde plumbing used by generated identifiers.
//!
//! Identifiers are encoded as their bare raw value, with no envelope.

use std::fmt;

use serde::de::{Error as _, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::{Error, Identifier};

pub fn serialize_raw_value<T, S>(raw_value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize + ?Sized,
    S: Serializer,
{
    raw_value.serialize(serializer)
}

pub fn deserialize<'de, I, D>(deserializer: D) -> Result<I, D::Error>
where
    I: Identifier,
    D: Deserializer<'de>,
{
    let raw_value = I::RawValue::deserialize(deserializer)?;
    I::from_raw_value(raw_value).ok_or_else(|| D::Error::custom(Error::invalid_raw_value::<I>()))
}

/// Always the lowercase hyphenated form.
pub fn serialize_uuid<S>(raw_value: &Uuid, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&raw_value.hyphenated())
}

/// Reads back what [`serialize_uuid`] writes, in any casing. Always a string,
/// including in formats that are not human readable.
pub fn deserialize_uuid<'de, I, D>(deserializer: D) -> Result<I, D::Error>
where
    I: Identifier<RawValue = Uuid>,
    D: Deserializer<'de>,
{
    let raw_value = deserializer.deserialize_str(UuidVisitor)?;
    I::from_raw_value(raw_value).ok_or_else(|| D::Error::custom(Error::invalid_raw_value::<I>()))
}

struct UuidVisitor;

impl<'de> Visitor<'de> for UuidVisitor {
    type Value = Uuid;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a hyphenated UUID string")
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Uuid, E> {
        Uuid::parse_str(value).map_err(E::custom)
    }
}
