use std::{
    cmp::Ordering,
    convert::TryFrom,
    fmt::{Debug, Display, Formatter},
    ops::{Add, Div, Mul, Neg, Sub},
    str::FromStr,
};

use bigdecimal::BigDecimal;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use once_cell::sync::OnceCell;

use crate::{math, Complex, Decimal, Fraction, TowerError, NEG_ONE, ONE_HALF, TWO};

/// Position of a representation in the tower.
///
/// A binary operation between two kinds is always carried out by the operand of higher rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Arbitrary-precision decimals
    Decimal,
    /// Exact fractions of decimals
    Fraction,
    /// Complex numbers over decimals and fractions
    Complex,
}

/// The concrete representation held by a [`Number`].
#[derive(Clone, Debug)]
pub enum Kind {
    /// An arbitrary-precision decimal
    Decimal(Decimal),
    /// An exact fraction
    Fraction(Fraction),
    /// A complex number
    Complex(Complex),
}

/// Write-once cells kept next to the immutable value. They never take part in equality.
#[derive(Clone, Default)]
struct Cache {
    approximation: OnceCell<BigDecimal>,
    even: OnceCell<bool>,
}

/// A value of the numeric tower.
///
/// Numbers are immutable; every operation returns a new value. Mixed-kind operations promote
/// to the more general kind (see [`Rank`]).
#[derive(Clone)]
pub struct Number {
    pub(crate) kind: Kind,
    cache: Cache,
}

impl Number {
    fn new(kind: Kind) -> Number {
        Number {
            kind,
            cache: Cache::default(),
        }
    }

    /// Returns 0
    pub fn zero() -> Number {
        Decimal::zero().into()
    }

    /// Returns 1
    pub fn one() -> Number {
        Decimal::one().into()
    }

    /// Returns the fraction 1/2
    pub fn one_half() -> Number {
        ONE_HALF.clone()
    }

    /// π rounded to [`WORKING_PRECISION`](crate::WORKING_PRECISION) digits
    pub fn pi() -> Result<Number, TowerError> {
        Ok(Decimal::new(math::pi()?).into())
    }

    /// Creates `numerator / denominator`, failing if either is a true complex number
    pub fn fraction(numerator: Number, denominator: Number) -> Result<Number, TowerError> {
        Ok(Fraction::new(numerator, denominator)?.into())
    }

    /// Creates `real + imaginary*i`, failing if either is a true complex number
    pub fn complex(real: Number, imaginary: Number) -> Result<Number, TowerError> {
        Ok(Complex::new(real, imaginary)?.into())
    }

    /// The concrete representation
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Unwraps the concrete representation
    pub fn into_kind(self) -> Kind {
        self.kind
    }

    /// The position of this value's representation in the tower
    pub fn rank(&self) -> Rank {
        match self.kind {
            Kind::Decimal(_) => Rank::Decimal,
            Kind::Fraction(_) => Rank::Fraction,
            Kind::Complex(_) => Rank::Complex,
        }
    }

    /// Returns the decimal if this value is one
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match &self.kind {
            Kind::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the fraction if this value is one
    pub fn as_fraction(&self) -> Option<&Fraction> {
        match &self.kind {
            Kind::Fraction(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the complex number if this value is one
    pub fn as_complex(&self) -> Option<&Complex> {
        match &self.kind {
            Kind::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// Returns true if this value is exactly zero
    pub fn is_zero(&self) -> bool {
        match &self.kind {
            Kind::Decimal(d) => d.is_zero(),
            Kind::Fraction(f) => f.is_zero(),
            Kind::Complex(c) => c.is_zero(),
        }
    }

    /// Returns true if this value is below zero.
    ///
    /// Fails for complex numbers with a non-zero imaginary part.
    pub fn is_negative(&self) -> Result<bool, TowerError> {
        match &self.kind {
            Kind::Decimal(d) => Ok(d.is_negative()),
            Kind::Fraction(f) => Ok(f.is_negative()),
            Kind::Complex(c) => c.is_negative(),
        }
    }

    /// Returns true if this value is zero or above
    pub fn is_positive(&self) -> Result<bool, TowerError> {
        self.is_negative().map(|negative| !negative)
    }

    /// Adds two values, promoting to the more general kind
    pub fn add(&self, other: &Number) -> Number {
        if self.rank() < other.rank() {
            return other.add(self);
        }
        match &self.kind {
            Kind::Decimal(a) => match &other.kind {
                Kind::Decimal(b) => a.add(b).into(),
                _ => other.add(self),
            },
            Kind::Fraction(f) => f.add(other),
            Kind::Complex(c) => c.add(other),
        }
    }

    /// Multiplies two values, promoting to the more general kind
    pub fn multiply(&self, other: &Number) -> Number {
        if self.rank() < other.rank() {
            return other.multiply(self);
        }
        match &self.kind {
            Kind::Decimal(a) => match &other.kind {
                Kind::Decimal(b) => a.multiply(b).into(),
                _ => other.multiply(self),
            },
            Kind::Fraction(f) => f.multiply(other),
            Kind::Complex(c) => c.multiply(other),
        }
    }

    /// `self - other = (-other) + self`
    pub fn subtract(&self, other: &Number) -> Number {
        other.negate().add(self)
    }

    /// `self / other = (1/other) * self`
    pub fn divide(&self, other: &Number) -> Number {
        other.reciprocal().multiply(self)
    }

    /// `-self = self * -1`
    pub fn negate(&self) -> Number {
        self.multiply(&NEG_ONE)
    }

    /// `1/self`. Exact for every kind; a zero value yields a fraction over zero.
    pub fn reciprocal(&self) -> Number {
        match &self.kind {
            Kind::Decimal(d) => Fraction::from_decimal_parts(Decimal::one(), d.clone()).into(),
            Kind::Fraction(f) => f.reciprocal().into(),
            Kind::Complex(c) => c.reciprocal().into(),
        }
    }

    /// Raises this value to `exponent`, promoting to complex where the real result is undefined
    pub fn pow(&self, exponent: &Number) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Decimal(d) => d.pow(exponent),
            Kind::Fraction(f) => f.pow(exponent),
            Kind::Complex(c) => c.pow(exponent),
        }
    }

    /// The `n`-th root, `self^(1/n)`
    pub fn root(&self, n: &Number) -> Result<Number, TowerError> {
        self.pow(&n.reciprocal())
    }

    /// The principal square root, `self^(1/2)`
    pub fn sqrt(&self) -> Result<Number, TowerError> {
        self.pow(&ONE_HALF)
    }

    /// e raised to this value
    pub fn exp(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Decimal(d) => Ok(d.exp()?.into()),
            Kind::Fraction(f) => f.exp(),
            Kind::Complex(c) => c.exp(),
        }
    }

    /// The natural logarithm on the principal branch
    pub fn ln(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Decimal(d) => d.ln(),
            Kind::Fraction(f) => f.ln(),
            Kind::Complex(c) => c.ln(),
        }
    }

    /// The absolute value; the modulus for complex numbers
    pub fn abs(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Complex(c) => c.abs(),
            _ if self.is_negative()? => Ok(self.negate()),
            _ => Ok(self.clone()),
        }
    }

    fn approximate_with<F>(&self, f: F) -> Result<Number, TowerError>
    where
        F: FnOnce(&BigDecimal) -> Result<BigDecimal, TowerError>,
    {
        Ok(Decimal::new(f(self.approximation()?)?).into())
    }

    /// Sine, in radians
    pub fn sin(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Complex(c) => c.sin(),
            _ => self.approximate_with(math::sin),
        }
    }

    /// Cosine, in radians
    pub fn cos(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Complex(c) => c.cos(),
            _ => self.approximate_with(math::cos),
        }
    }

    /// Tangent, in radians
    pub fn tan(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Complex(c) => c.tan(),
            _ => self.approximate_with(math::tan),
        }
    }

    /// Hyperbolic sine
    pub fn sinh(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Complex(c) => c.sinh(),
            _ => self.approximate_with(math::sinh),
        }
    }

    /// Hyperbolic cosine
    pub fn cosh(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Complex(c) => c.cosh(),
            _ => self.approximate_with(math::cosh),
        }
    }

    /// Hyperbolic tangent
    pub fn tanh(&self) -> Result<Number, TowerError> {
        match &self.kind {
            Kind::Complex(c) => c.tanh(),
            _ => self.approximate_with(math::tanh),
        }
    }

    /// A decimal equal or close to this value.
    ///
    /// Computed once per value and cached. Fails for complex numbers with a non-zero imaginary
    /// part and for fractions over zero.
    pub fn approximation(&self) -> Result<&BigDecimal, TowerError> {
        match &self.kind {
            Kind::Decimal(d) => Ok(d.value()),
            Kind::Fraction(f) => self.cache.approximation.get_or_try_init(|| f.approximate()),
            Kind::Complex(c) => self.cache.approximation.get_or_try_init(|| {
                if c.imaginary().is_zero() {
                    c.real().approximation().map(Clone::clone)
                } else {
                    Err(TowerError::Undefined {
                        operation: "decimal approximation",
                        operand: c.to_string(),
                    })
                }
            }),
        }
    }

    /// Returns true if this value is a whole number
    pub fn is_integer(&self) -> bool {
        match &self.kind {
            Kind::Decimal(d) => d.is_integer(),
            Kind::Fraction(f) => f.is_integer(),
            Kind::Complex(c) => c.imaginary().is_zero() && c.real().is_integer(),
        }
    }

    /// `self mod 2 == 0`, cached. Only defined for integers.
    pub fn is_even(&self) -> Result<bool, TowerError> {
        self.cache
            .even
            .get_or_try_init(|| Ok(self.remainder(&TWO)?.is_zero()))
            .map(|even| *even)
    }

    /// The opposite of [`is_even`](Number::is_even)
    pub fn is_odd(&self) -> Result<bool, TowerError> {
        self.is_even().map(|even| !even)
    }

    /// The absolute remainder of `self / other`. Both operands must be integers.
    pub fn remainder(&self, other: &Number) -> Result<Decimal, TowerError> {
        if !(self.is_integer() && other.is_integer()) {
            return Err(TowerError::UndefinedRemainder {
                dividend: self.to_string(),
                divisor: other.to_string(),
            });
        }
        // approximations of integers are exact
        let quotient = Fraction::from_decimal_parts(
            Decimal::new(self.approximation()?.clone()),
            Decimal::new(other.approximation()?.clone()),
        );
        quotient.remainder()
    }

    /// Orders two values by the sign of their difference.
    ///
    /// Equal values compare equal even when complex; otherwise fails if the difference has a
    /// non-zero imaginary part.
    pub fn compare(&self, other: &Number) -> Result<Ordering, TowerError> {
        let difference = self.subtract(other);
        if difference.is_zero() {
            Ok(Ordering::Equal)
        } else if difference.is_negative()? {
            Ok(Ordering::Less)
        } else {
            Ok(Ordering::Greater)
        }
    }

    fn components(&self) -> Result<(BigDecimal, BigDecimal), TowerError> {
        match &self.kind {
            Kind::Complex(c) => Ok((
                c.real().approximation()?.clone(),
                c.imaginary().approximation()?.clone(),
            )),
            _ => Ok((self.approximation()?.clone(), BigDecimal::zero())),
        }
    }

    /// Tolerance is relative to the largest component magnitude of the two values, and absolute
    /// when every magnitude is below one.
    /// For example, with 1e-30 two results of a transcendental function that differ only in the
    /// last working digit count as equal.
    pub fn eq_tolerance(&self, other: &Number, tolerance: f64) -> bool {
        let tolerance = match BigDecimal::from_f64(tolerance) {
            Some(tolerance) => tolerance,
            None => return false,
        };
        let ((a_re, a_im), (b_re, b_im)) = match (self.components(), other.components()) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return false,
        };

        let largest = [&a_re, &a_im, &b_re, &b_im]
            .iter()
            .map(|v| v.abs())
            .fold(BigDecimal::from(1), |largest, v| largest.max(v));
        let bound = tolerance * largest;

        (&a_re - &b_re).abs() <= bound && (&a_im - &b_im).abs() <= bound
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

impl PartialEq<f64> for Number {
    fn eq(&self, other: &f64) -> bool {
        self.to_f64() == Some(*other)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl ToPrimitive for Number {
    fn to_i64(&self) -> Option<i64> {
        self.approximation().ok()?.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.approximation().ok()?.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        self.approximation().ok()?.to_f64()
    }
}

impl Debug for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Number").field(&self.kind).finish()
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            Kind::Decimal(d) => write!(f, "{}", d),
            Kind::Fraction(fraction) => write!(f, "{}", fraction),
            Kind::Complex(c) => write!(f, "{}", c),
        }
    }
}

impl From<Kind> for Number {
    fn from(kind: Kind) -> Self {
        Number::new(kind)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number::new(Kind::Decimal(value))
    }
}

impl From<Fraction> for Number {
    fn from(value: Fraction) -> Self {
        Number::new(Kind::Fraction(value))
    }
}

impl From<Complex> for Number {
    fn from(value: Complex) -> Self {
        Number::new(Kind::Complex(value))
    }
}

impl From<BigDecimal> for Number {
    fn from(value: BigDecimal) -> Self {
        Decimal::new(value).into()
    }
}

macro_rules! impl_from_primitive {
    ($prim_type:ty) => {
        impl From<$prim_type> for Number {
            fn from(prim: $prim_type) -> Self {
                Decimal::from(prim).into()
            }
        }
    };
}

impl_from_primitive!(i32);
impl_from_primitive!(i64);
impl_from_primitive!(u32);
impl_from_primitive!(u64);

/// Parses a decimal literal. Fraction and complex literals come in through [`crate::token`].
impl FromStr for Number {
    type Err = TowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Decimal>()?.into())
    }
}

impl TryFrom<&str> for Number {
    type Error = TowerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

macro_rules! impl_ops {
    ($op_trait:ident, $op_fn:ident, $tower_fn:ident) => {
        impl<'a> $op_trait<&'a Number> for &'a Number {
            type Output = Number;

            fn $op_fn(self, rhs: &'a Number) -> Self::Output {
                Number::$tower_fn(self, rhs)
            }
        }
    };
}

impl_ops!(Add, add, add);
impl_ops!(Sub, sub, subtract);
impl_ops!(Mul, mul, multiply);
impl_ops!(Div, div, divide);

impl<'a> Neg for &'a Number {
    type Output = Number;

    fn neg(self) -> Number {
        self.negate()
    }
}

#[cfg(feature = "serde")]
mod serde {
    use super::*;
    use serde_crate::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    /// Wire shape of a number; deserializing goes back through the flattening constructors.
    #[derive(Serialize, Deserialize)]
    #[serde(crate = "serde_crate")]
    enum Repr {
        Decimal(Decimal),
        Fraction(Decimal, Decimal),
        Complex(Box<Repr>, Box<Repr>),
    }

    impl From<&Number> for Repr {
        fn from(number: &Number) -> Self {
            match number.kind() {
                Kind::Decimal(d) => Repr::Decimal(d.clone()),
                Kind::Fraction(f) => Repr::Fraction(f.numerator().clone(), f.denominator().clone()),
                Kind::Complex(c) => Repr::Complex(
                    Box::new(Repr::from(c.real())),
                    Box::new(Repr::from(c.imaginary())),
                ),
            }
        }
    }

    impl TryFrom<Repr> for Number {
        type Error = TowerError;

        fn try_from(repr: Repr) -> Result<Self, Self::Error> {
            match repr {
                Repr::Decimal(d) => Ok(d.into()),
                Repr::Fraction(n, d) => Number::fraction(n.into(), d.into()),
                Repr::Complex(re, im) => {
                    Number::complex(Number::try_from(*re)?, Number::try_from(*im)?)
                }
            }
        }
    }

    impl Serialize for Number {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Repr::from(self).serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Number {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let repr = Repr::deserialize(deserializer)?;
            Number::try_from(repr).map_err(D::Error::custom)
        }
    }
}
