use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// A strongly typed wrapper around a raw value.
///
/// Implementations are generated by `identifier!`, `declare_identifier!`,
/// `#[backed_by]` and `#[identifiable]`. Two identifiers are equal exactly
/// when their raw values are.
pub trait Identifier:
    Clone + Eq + Hash + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The wrapped value. Besides being serializable it must implement
    /// [`Display`], which generated identifiers forward to and
    /// [`description`](Identifier::description) is built from. A custom struct
    /// used as a backing type therefore needs its own `Display` impl.
    type RawValue: Clone + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// `None` when the raw value is not a valid identity for this type.
    fn from_raw_value(raw_value: Self::RawValue) -> Option<Self>;

    fn raw_value(&self) -> &Self::RawValue;

    fn into_raw_value(self) -> Self::RawValue;

    /// The raw value's string form.
    fn description(&self) -> String {
        self.raw_value().to_string()
    }
}

/// Identifiers backed by a [`Uuid`].
pub trait UuidIdentifier: Identifier<RawValue = Uuid> {
    /// A fresh identifier from a random (v4) UUID.
    ///
    /// # Panics
    ///
    /// If the identifier rejects the generated UUID.
    fn unique() -> Self {
        Self::from_raw_value(Uuid::new_v4()).expect("identifier rejected a random UUID")
    }
}

impl<T: Identifier<RawValue = Uuid>> UuidIdentifier for T {}
