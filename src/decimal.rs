use std::{
    convert::TryFrom,
    fmt::{Display, Formatter},
    str::FromStr,
};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use tracing::trace;

use crate::{math, Complex, Kind, Number, TowerError};

/// An arbitrary-precision decimal, the leaf of the tower.
///
/// Addition and multiplication are exact; transcendental results are rounded to
/// [`WORKING_PRECISION`](crate::WORKING_PRECISION) significant digits.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal {
    value: BigDecimal,
}

impl Decimal {
    /// Wraps a decimal magnitude
    pub fn new(value: BigDecimal) -> Decimal {
        Decimal { value }
    }

    /// Returns the wrapped magnitude
    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    /// Unwraps the magnitude
    pub fn into_inner(self) -> BigDecimal {
        self.value
    }

    /// Returns a Decimal with a value of 0
    pub fn zero() -> Decimal {
        Decimal::from(0)
    }

    /// Returns a Decimal with a value of 1
    pub fn one() -> Decimal {
        Decimal::from(1)
    }

    /// Returns a Decimal with a value of -1
    pub fn neg_one() -> Decimal {
        Decimal::from(-1)
    }

    /// Returns a Decimal with a value of 2
    pub fn two() -> Decimal {
        Decimal::from(2)
    }

    /// Returns true if the value is below zero
    pub fn is_negative(&self) -> bool {
        self.value.sign() == Sign::Minus
    }

    /// Returns true if the value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if the value has no fractional digits once trailing zeros are stripped
    pub fn is_integer(&self) -> bool {
        self.is_zero() || self.value.normalized().as_bigint_and_exponent().1 <= 0
    }

    /// Exact sum
    pub fn add(&self, other: &Decimal) -> Decimal {
        Decimal::new(&self.value + &other.value)
    }

    /// Exact product
    pub fn multiply(&self, other: &Decimal) -> Decimal {
        Decimal::new(&self.value * &other.value)
    }

    /// Returns the negated value
    pub fn negate(&self) -> Decimal {
        Decimal::new(-self.value.clone())
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Decimal {
        Decimal::new(self.value.abs())
    }

    /// Returns e raised to this value
    pub fn exp(&self) -> Result<Decimal, TowerError> {
        Ok(Decimal::new(math::exp(&self.value)?))
    }

    /// Returns the natural logarithm.
    ///
    /// A negative value is promoted to a complex number and yields `ln|x| + i*pi`.
    pub fn ln(&self) -> Result<Number, TowerError> {
        if self.is_negative() {
            trace!(value = %self, "logarithm of a negative decimal, promoting to complex");
            return Complex::from_decimal(self.clone()).ln();
        }
        Ok(Decimal::new(math::ln(&self.value)?).into())
    }

    /// Raises this value to `exponent`.
    ///
    /// * a complex exponent with zero imaginary part is replaced by its real part
    /// * any other complex exponent, or a negative base with a non-integer exponent, promotes
    ///   this value to a complex number (principal branch)
    /// * a negative base with an integer exponent raises the magnitude and restores the sign for
    ///   odd exponents
    /// * a fractional exponent `p/q` takes the `q`-th root of `self^p`
    pub fn pow(&self, exponent: &Number) -> Result<Number, TowerError> {
        if let Kind::Complex(c) = exponent.kind() {
            if c.imaginary().is_zero() {
                return self.pow(c.real());
            }
            return Complex::from_decimal(self.clone()).pow(exponent);
        }

        if self.is_negative() {
            if exponent.is_integer() {
                let magnitude = self.abs().pow(exponent)?;
                return Ok(if exponent.is_odd()? {
                    magnitude.negate()
                } else {
                    magnitude
                });
            }
            trace!(base = %self, %exponent, "negative base with a non-integer exponent, promoting to complex");
            return Complex::from_decimal(self.clone()).pow(exponent);
        }

        let result = match exponent.kind() {
            Kind::Fraction(f) => {
                let raised = math::pow(&self.value, f.numerator().value())?;
                math::root(&raised, f.denominator().value())?
            }
            _ => math::pow(&self.value, exponent.approximation()?)?,
        };
        Ok(Decimal::new(result).into())
    }

    /// Renders the value without an exponent, keeping its scale
    pub fn to_plain_string(&self) -> String {
        let (digits, scale) = self.value.as_bigint_and_exponent();
        let negative = digits.sign() == Sign::Minus;
        let mut magnitude = digits.magnitude().to_string();

        if scale <= 0 {
            magnitude.extend(std::iter::repeat('0').take(scale.unsigned_abs() as usize));
        } else {
            let scale = scale as usize;
            if magnitude.len() <= scale {
                let padding = "0".repeat(scale - magnitude.len() + 1);
                magnitude.insert_str(0, &padding);
            }
            magnitude.insert(magnitude.len() - scale, '.');
        }

        if negative {
            magnitude.insert(0, '-');
        }
        magnitude
    }

    /// Returns the value as a float, rounding where needed
    pub fn to_f64(&self) -> Option<f64> {
        self.value.to_f64()
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

impl From<BigDecimal> for Decimal {
    fn from(value: BigDecimal) -> Self {
        Decimal::new(value)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::new(BigDecimal::from(value))
    }
}

macro_rules! impl_from_primitive {
    ($prim_type:ty) => {
        impl From<$prim_type> for Decimal {
            fn from(prim: $prim_type) -> Self {
                Decimal::new(BigDecimal::from(prim))
            }
        }
    };
}

impl_from_primitive!(i32);
impl_from_primitive!(i64);
impl_from_primitive!(u32);
impl_from_primitive!(u64);

impl FromStr for Decimal {
    type Err = TowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigDecimal::from_str(s.trim())
            .map(Decimal::new)
            .map_err(|error| TowerError::ParseError {
                parsed: s.to_string(),
                reason: error.to_string(),
            })
    }
}

impl TryFrom<&str> for Decimal {
    type Error = TowerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(feature = "serde")]
mod serde {
    use super::*;
    use serde_crate::Deserialize;

    impl serde_crate::Serialize for Decimal {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde_crate::Serializer,
        {
            serializer.serialize_str(&self.to_plain_string())
        }
    }

    impl<'de> serde_crate::Deserialize<'de> for Decimal {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde_crate::Deserializer<'de>,
        {
            let d = String::deserialize(deserializer)?;
            d.parse()
                .map_err(|_| serde_crate::de::Error::custom("Could not parse Decimal"))
        }
    }
}
