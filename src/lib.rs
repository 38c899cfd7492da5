//! Strongly typed identifiers.
//!
//! An identifier is a newtype over a raw value (`String`, `Uuid`, integers,
//! floats, `Url`, ...) that keeps an `OrderId` from being mixed up with a
//! `UserId` even when both wrap a `Uuid`:
//!
//! ```ignore
//! use identity::{identifier, Identifier, Uuid, UuidIdentifier};
//!
//! identifier!(pub OrderId, backing: Uuid, adopts: Ord);
//!
//! let order = OrderId::unique();
//! assert_eq!(OrderId::from_raw_value(*order.raw_value()), Some(order));
//! ```
//!
//! The macros are thin front ends over `identity-codegen`, which also ships
//! the `identity-gen` generator for build-step code generation.

extern crate self as identity;

mod error;
mod identified;
mod identifier;

pub mod codec;
pub mod collections;
pub mod testing;

pub use collections::IdentityMapExt;
pub use error::*;
pub use identified::*;
pub use identifier::*;
pub use identity_macros::{backed_by, declare_identifier, identifiable, identifier};
pub use uuid::Uuid;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
