use std::fmt::{Display, Formatter};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use tracing::trace;

use crate::{Decimal, Kind, Number, TowerError, EXTRA_DIVISION_SCALE, WORKING_PRECISION};

/// An exact ratio of two decimals.
///
/// Construction flattens nested fractions by cross-multiplication and unwraps complex operands
/// whose imaginary part is zero, so both parts are always plain [`Decimal`]s. The denominator is
/// kept non-negative. Fractions are never reduced to lowest terms.
#[derive(Clone, Debug)]
pub struct Fraction {
    numerator: Decimal,
    denominator: Decimal,
}

/// Splits a real tower value into the decimal numerator and the optional decimal denominator it
/// contributes to an enclosing fraction.
fn split(part: &'static str, value: &Number) -> Result<(Decimal, Option<Decimal>), TowerError> {
    match value.kind() {
        Kind::Decimal(d) => Ok((d.clone(), None)),
        Kind::Fraction(f) => Ok((f.numerator.clone(), Some(f.denominator.clone()))),
        Kind::Complex(c) if c.imaginary().is_zero() => split(part, c.real()),
        Kind::Complex(c) => Err(TowerError::InvalidNesting {
            part,
            value: c.to_string(),
        }),
    }
}

/// Brings two decimals to a common scale and returns both unscaled integers with that scale.
pub(crate) fn aligned(a: &BigDecimal, b: &BigDecimal) -> (BigInt, BigInt, i64) {
    let (a_digits, a_scale) = a.as_bigint_and_exponent();
    let (b_digits, b_scale) = b.as_bigint_and_exponent();
    let scale = a_scale.max(b_scale);
    let widen = |digits: BigInt, from: i64| digits * BigInt::from(10).pow((scale - from) as u32);
    (widen(a_digits, a_scale), widen(b_digits, b_scale), scale)
}

/// Divides `a` by `b` and rounds half away from zero.
fn divide_half_up(a: &BigInt, b: &BigInt) -> BigInt {
    let (quotient, remainder) = a.div_rem(b);
    if (remainder.abs() * 2u32) >= b.abs() {
        if (a.sign() == Sign::Minus) == (b.sign() == Sign::Minus) {
            quotient + 1u32
        } else {
            quotient - 1u32
        }
    } else {
        quotient
    }
}

/// Returns `count` such that `value = rest * factor^count` with `rest` not divisible by `factor`.
fn strip_factor(value: &mut BigInt, factor: u32) -> u32 {
    let factor = BigInt::from(factor);
    let mut count = 0;
    while !value.is_zero() && value.is_multiple_of(&factor) {
        *value /= &factor;
        count += 1;
    }
    count
}

impl Fraction {
    /// Creates `numerator / denominator` from any two real tower values.
    ///
    /// Fails with [`TowerError::InvalidNesting`] if either operand is a complex number with a
    /// non-zero imaginary part.
    pub fn new(numerator: Number, denominator: Number) -> Result<Fraction, TowerError> {
        let (a, b) = split("numerator", &numerator)?;
        let (c, d) = split("denominator", &denominator)?;

        // (a/b) / (c/d) = (a*d) / (b*c)
        let numerator = match d {
            Some(d) => a.multiply(&d),
            None => a,
        };
        let denominator = match b {
            Some(b) => c.multiply(&b),
            None => c,
        };
        Ok(Fraction::from_decimal_parts(numerator, denominator))
    }

    /// Creates a fraction from values that are known to be real.
    ///
    /// Panics if either is a complex number with a non-zero imaginary part; callers only pass the
    /// results of real arithmetic.
    pub(crate) fn from_reals(numerator: Number, denominator: Number) -> Fraction {
        match Fraction::new(numerator, denominator) {
            Ok(fraction) => fraction,
            Err(error) => panic!("fraction built from real arithmetic: {}", error),
        }
    }

    /// Creates `numerator / denominator`, moving a negative denominator's sign to the numerator
    pub fn from_decimal_parts(numerator: Decimal, denominator: Decimal) -> Fraction {
        if denominator.is_negative() {
            Fraction {
                numerator: numerator.negate(),
                denominator: denominator.negate(),
            }
        } else {
            Fraction {
                numerator,
                denominator,
            }
        }
    }

    /// Converts a decimal into `decimal / 1`
    pub fn from_decimal(value: Decimal) -> Fraction {
        Fraction::from_decimal_parts(value, Decimal::one())
    }

    /// Returns the fraction 1/2
    pub fn one_half() -> Fraction {
        Fraction::from_decimal_parts(Decimal::one(), Decimal::two())
    }

    /// The numerator
    pub fn numerator(&self) -> &Decimal {
        &self.numerator
    }

    /// The denominator, never negative
    pub fn denominator(&self) -> &Decimal {
        &self.denominator
    }

    /// Returns true if exactly one of the parts is negative
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative() ^ self.denominator.is_negative()
    }

    /// Returns true if the numerator is zero
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns true if the denominator divides the numerator exactly
    pub fn is_integer(&self) -> bool {
        if self.denominator.is_zero() {
            return false;
        }
        let (a, b, _) = aligned(self.numerator.value(), self.denominator.value());
        a.is_multiple_of(&b)
    }

    /// `(a/b) + (c/d) = (ad + bc) / bd`; a decimal operand is read as `decimal / 1`
    pub(crate) fn add(&self, other: &Number) -> Number {
        match other.kind() {
            Kind::Fraction(o) => Fraction::from_decimal_parts(
                self.numerator
                    .multiply(&o.denominator)
                    .add(&o.numerator.multiply(&self.denominator)),
                self.denominator.multiply(&o.denominator),
            )
            .into(),
            Kind::Decimal(d) => self.add(&Fraction::from_decimal(d.clone()).into()),
            Kind::Complex(_) => other.add(&self.clone().into()),
        }
    }

    /// `(a/b) * (c/d) = ac / bd`; a decimal operand is read as `decimal / 1`
    pub(crate) fn multiply(&self, other: &Number) -> Number {
        match other.kind() {
            Kind::Fraction(o) => Fraction::from_decimal_parts(
                self.numerator.multiply(&o.numerator),
                self.denominator.multiply(&o.denominator),
            )
            .into(),
            Kind::Decimal(d) => self.multiply(&Fraction::from_decimal(d.clone()).into()),
            Kind::Complex(_) => other.multiply(&self.clone().into()),
        }
    }

    /// Swaps numerator and denominator
    pub fn reciprocal(&self) -> Fraction {
        Fraction::from_decimal_parts(self.denominator.clone(), self.numerator.clone())
    }

    /// The absolute remainder of the numerator divided by the denominator.
    ///
    /// Both parts must be integers.
    pub fn remainder(&self) -> Result<Decimal, TowerError> {
        if !(self.numerator.is_integer() && self.denominator.is_integer()) {
            return Err(TowerError::UndefinedRemainder {
                dividend: self.numerator.to_string(),
                divisor: self.denominator.to_string(),
            });
        }
        if self.denominator.is_zero() {
            return Err(TowerError::DivisionByZero {
                dividend: self.numerator.to_string(),
            });
        }
        let (a, b, scale) = aligned(self.numerator.value(), self.denominator.value());
        Ok(Decimal::new(BigDecimal::new((a % b).abs(), scale)))
    }

    /// `(n/d)^e = n^e / d^e`
    ///
    /// If a part leaves the real line the quotient is complex.
    pub fn pow(&self, exponent: &Number) -> Result<Number, TowerError> {
        let numerator = self.numerator.pow(exponent)?;
        let denominator = self.denominator.pow(exponent)?;
        Ok(numerator.divide(&denominator))
    }

    /// `exp(a/b)` is the `b`-th root of `exp(a)`
    pub fn exp(&self) -> Result<Number, TowerError> {
        Number::from(self.numerator.exp()?).root(&self.denominator.clone().into())
    }

    /// `ln(a/b) = ln(a) - ln(b)`
    pub fn ln(&self) -> Result<Number, TowerError> {
        Ok(self.numerator.ln()?.subtract(&self.denominator.ln()?))
    }

    /// Divides the parts exactly when the quotient terminates, otherwise rounds half-up.
    ///
    /// The rounding scale is the combined operand scale plus [`EXTRA_DIVISION_SCALE`] digits, raised
    /// where needed so the quotient keeps [`WORKING_PRECISION`] plus [`EXTRA_DIVISION_SCALE`]
    /// significant digits however small it is.
    pub(crate) fn approximate(&self) -> Result<BigDecimal, TowerError> {
        if self.denominator.is_zero() {
            return Err(TowerError::DivisionByZero {
                dividend: self.numerator.to_string(),
            });
        }

        let (a, a_scale) = self.numerator.value().as_bigint_and_exponent();
        let (b, b_scale) = self.denominator.value().as_bigint_and_exponent();

        let divisor = a.gcd(&b);
        let reduced = &a / &divisor;
        let mut rest = &b / &divisor;
        let twos = strip_factor(&mut rest, 2);
        let fives = strip_factor(&mut rest, 5);

        if rest.abs().is_one() {
            // a'/(2^t 5^f) = a' 2^(k-t) 5^(k-f) / 10^k
            let k = twos.max(fives);
            let digits = reduced
                * BigInt::from(2).pow(k - twos)
                * BigInt::from(5).pow(k - fives)
                * rest.signum();
            return Ok(BigDecimal::new(digits, i64::from(k) + a_scale - b_scale));
        }

        // the quotient lies within a factor of ten of 10^magnitude
        let magnitude = (self.numerator.value().digits() as i64 - a_scale)
            - (self.denominator.value().digits() as i64 - b_scale);
        let significant = WORKING_PRECISION as i64 + EXTRA_DIVISION_SCALE;
        let scale = (EXTRA_DIVISION_SCALE + a_scale + b_scale).max(significant - magnitude + 1);
        trace!(fraction = %self, scale, "fraction does not terminate, rounding half-up");
        let shift = scale + b_scale - a_scale;
        let digits = if shift >= 0 {
            divide_half_up(&(a * BigInt::from(10).pow(shift as u32)), &b)
        } else {
            divide_half_up(&a, &(b * BigInt::from(10).pow(shift.unsigned_abs() as u32)))
        };
        Ok(BigDecimal::new(digits, scale))
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
