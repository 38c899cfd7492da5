//! Literal construction for tests.
//!
//! Adopt one of these traits by listing it as a capability:
//!
//! ```ignore
//! use identity::testing::StringLiteral;
//!
//! identity::identifier!(UserId, backing: String, adopts: StringLiteral);
//!
//! assert_eq!(UserId::from_str_literal("ada").description(), "ada");
//! ```
//!
//! The constructors panic when the identifier rejects the literal, so they
//! belong in tests and fixtures, not in production paths.

use crate::Identifier;

pub trait StringLiteral: Identifier<RawValue: From<&'static str>> {
    /// # Panics
    ///
    /// If the identifier rejects the raw value.
    fn from_str_literal(literal: &'static str) -> Self {
        Self::from_raw_value(literal.into()).expect("string literal is not a valid identifier")
    }
}

pub trait IntegerLiteral: Identifier<RawValue: TryFrom<i128>> {
    /// # Panics
    ///
    /// If the literal does not fit the raw value type or the identifier
    /// rejects it.
    fn from_int_literal(literal: i128) -> Self {
        let raw_value = Self::RawValue::try_from(literal)
            .ok()
            .expect("integer literal out of range for the raw value");
        Self::from_raw_value(raw_value).expect("integer literal is not a valid identifier")
    }
}

pub trait FloatLiteral: Identifier<RawValue: FromFloatLiteral> {
    /// # Panics
    ///
    /// If the identifier rejects the raw value.
    fn from_float_literal(literal: f64) -> Self {
        Self::from_raw_value(FromFloatLiteral::from_f64(literal))
            .expect("float literal is not a valid identifier")
    }
}

/// Raw value types constructible from a float literal.
pub trait FromFloatLiteral {
    fn from_f64(literal: f64) -> Self;
}

impl FromFloatLiteral for f64 {
    fn from_f64(literal: f64) -> Self {
        literal
    }
}

impl FromFloatLiteral for f32 {
    fn from_f64(literal: f64) -> Self {
        literal as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::identifier!(Name, backing: String, adopts: StringLiteral);
    crate::identifier!(Port, backing: u16, adopts: IntegerLiteral, Ord);
    crate::identifier!(Weight, backing: f32, adopts: FloatLiteral);

    #[test]
    fn string_literal() {
        assert_eq!(Name::from_str_literal("ada").raw_value(), "ada");
    }

    #[test]
    fn integer_literal() {
        assert_eq!(*Port::from_int_literal(8080).raw_value(), 8080u16);
        assert!(Port::from_int_literal(1) < Port::from_int_literal(2));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn integer_literal_out_of_range() {
        Port::from_int_literal(70_000);
    }

    #[test]
    fn float_literal() {
        assert_eq!(*Weight::from_float_literal(0.5).raw_value(), 0.5f32);
        assert_eq!(Weight::from_float_literal(0.5), Weight::new(0.5));
    }
}
