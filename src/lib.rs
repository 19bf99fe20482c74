#![warn(missing_docs)]
#![crate_name = "number_tower"]

//! A closed numeric tower of arbitrary-precision decimals, exact fractions and complex numbers.
//!
//! Every value is a [`Number`]. Binary operations between different kinds promote to the more
//! general kind (`Decimal < Fraction < Complex`), so callers never have to coerce by hand.
//! Operations on negative reals that leave the real line (square roots, logarithms, fractional
//! powers) are promoted to complex numbers on the principal branch.
//!
//! # Examples
//!
//! ```
//! use number_tower::{Fraction, Number};
//!
//! let third = Number::from(Fraction::new(1.into(), 3.into()).unwrap());
//! let half = Number::one_half();
//!
//! assert_eq!((&third + &half).to_string(), "5/6");
//! assert!(Number::from(-4).sqrt().unwrap().to_string().ends_with('i'));
//! ```

use custom_error::custom_error;

mod complex;
mod decimal;
mod fraction;
mod math;
mod number;
pub mod token;

#[cfg(test)]
mod tests;

pub use crate::complex::Complex;
pub use crate::decimal::Decimal;
pub use crate::fraction::Fraction;
pub use crate::number::{Kind, Number, Rank};

custom_error! {
    /// Error type for all errors in this crate.
    #[derive(PartialEq)]
    pub TowerError
        /// A complex number with a non-zero imaginary part was used where a real value is required
        InvalidNesting {
            /// Which part of the value was being constructed
            part: &'static str,
            /// The offending complex number
            value: String
        } = "{part} must be real, got complex number {value}",
        /// Sign or ordering was requested for a complex number with a non-zero imaginary part
        UndefinedOrdering {
            /// The complex number
            value: String
        } = "complex number {value} has no ordering",
        /// A remainder was requested for non-integer operands or for a complex quotient
        UndefinedRemainder {
            /// The dividend
            dividend: String,
            /// The divisor
            divisor: String
        } = "remainder of {dividend}/{divisor} is undefined",
        /// A decimal approximation required dividing by an exact zero
        DivisionByZero {
            /// The dividend
            dividend: String
        } = "division by zero: {dividend}/0",
        /// The transcendental provider had no finite result for the operand
        Undefined {
            /// Name of the operation
            operation: &'static str,
            /// The operand
            operand: String
        } = "{operation} is undefined for {operand}",
        /// A String could not be parsed as a decimal literal
        ParseError {
            /// The string that failed to parse
            parsed: String,
            /// Why it failed
            reason: String
        } = "Error while parsing \"{parsed}\": {reason}",
        /// The tokenizer left input unconsumed or handed over a token that is not a number
        MalformedInput {
            /// The raw input
            input: String,
            /// Why it was rejected
            reason: String
        } = "malformed number \"{input}\": {reason}"
}

/// Number of significant decimal digits kept by transcendental results (decimal128 class).
pub const WORKING_PRECISION: u64 = 34;
/// Precision in binary digits handed to the transcendental provider.
///
/// 34 decimal digits need 113 bits, the rest are guard bits.
pub const WORKING_BITS: u32 = 128;
/// Digits added to the combined operand scales when a fraction approximation does not terminate.
pub const EXTRA_DIVISION_SCALE: i64 = 40;

lazy_static::lazy_static! {
    /// Shared decimal constants used by the derived operations.
    pub(crate) static ref NEG_ONE: Number = Number::from(-1);
    pub(crate) static ref TWO: Number = Number::from(2);
    /// The fraction 1/2, exponent of every square root.
    pub(crate) static ref ONE_HALF: Number = Number::from(Fraction::from_decimal_parts(Decimal::one(), Decimal::two()));
}
