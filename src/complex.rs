use std::fmt::{Display, Formatter};

use crate::{math, Decimal, Fraction, Kind, Number, TowerError, TWO};

/// A complex number `real + imaginary*i`.
///
/// Both components are real tower values (decimals or fractions); a complex component with a
/// zero imaginary part is unwrapped on construction.
#[derive(Clone, Debug)]
pub struct Complex {
    real: Box<Number>,
    imaginary: Box<Number>,
}

fn flatten(part: &'static str, value: Number) -> Result<Number, TowerError> {
    match value.kind {
        Kind::Complex(c) if c.imaginary.is_zero() => Ok(*c.real),
        Kind::Complex(c) => Err(TowerError::InvalidNesting {
            part,
            value: c.to_string(),
        }),
        _ => Ok(value),
    }
}

impl Complex {
    /// Creates `real + imaginary*i`.
    ///
    /// Fails with [`TowerError::InvalidNesting`] if either part is itself a complex number with a
    /// non-zero imaginary part.
    pub fn new(real: Number, imaginary: Number) -> Result<Complex, TowerError> {
        Ok(Complex {
            real: Box::new(flatten("real part", real)?),
            imaginary: Box::new(flatten("imaginary part", imaginary)?),
        })
    }

    /// Creates a complex number from components produced by real arithmetic.
    ///
    /// Panics if a component is a complex number with a non-zero imaginary part.
    pub(crate) fn from_parts(real: Number, imaginary: Number) -> Complex {
        match Complex::new(real, imaginary) {
            Ok(complex) => complex,
            Err(error) => panic!("complex built from real arithmetic: {}", error),
        }
    }

    /// Converts a decimal into `decimal + 0i`
    pub fn from_decimal(value: Decimal) -> Complex {
        Complex {
            real: Box::new(value.into()),
            imaginary: Box::new(Decimal::zero().into()),
        }
    }

    /// Converts a fraction into `fraction + 0i`
    pub fn from_fraction(value: Fraction) -> Complex {
        Complex {
            real: Box::new(value.into()),
            imaginary: Box::new(Decimal::zero().into()),
        }
    }

    /// The real part
    pub fn real(&self) -> &Number {
        &self.real
    }

    /// The imaginary part
    pub fn imaginary(&self) -> &Number {
        &self.imaginary
    }

    /// Only defined when the imaginary part is zero
    pub fn is_negative(&self) -> Result<bool, TowerError> {
        if self.imaginary.is_zero() {
            return self.real.is_negative();
        }
        Err(TowerError::UndefinedOrdering {
            value: self.to_string(),
        })
    }

    /// Returns true if both parts are zero
    pub fn is_zero(&self) -> bool {
        self.real.is_zero() && self.imaginary.is_zero()
    }

    pub(crate) fn add(&self, other: &Number) -> Number {
        let sum = match other.kind() {
            Kind::Complex(o) => {
                Complex::from_parts(self.real.add(&o.real), self.imaginary.add(&o.imaginary))
            }
            _ => Complex::from_parts(self.real.add(other), (*self.imaginary).clone()),
        };
        sum.into()
    }

    pub(crate) fn multiply(&self, other: &Number) -> Number {
        let product = match other.kind() {
            Kind::Complex(o) => {
                // (a+bi)(c+di) = (ac - bd) + (ad + bc)i
                let (a, b, c, d) = (&*self.real, &*self.imaginary, &*o.real, &*o.imaginary);
                Complex::from_parts(
                    a.multiply(c).subtract(&b.multiply(d)),
                    a.multiply(d).add(&b.multiply(c)),
                )
            }
            _ => Complex::from_parts(self.real.multiply(other), self.imaginary.multiply(other)),
        };
        product.into()
    }

    /// `a^2 + b^2`, computed exactly
    fn norm(&self) -> Number {
        self.real
            .multiply(&self.real)
            .add(&self.imaginary.multiply(&self.imaginary))
    }

    /// `1/(a+bi) = (a-bi)/(a^2+b^2)`, with both parts exact fractions over the same denominator
    pub fn reciprocal(&self) -> Complex {
        let denominator = self.norm();
        Complex {
            real: Box::new(Fraction::from_reals((*self.real).clone(), denominator.clone()).into()),
            imaginary: Box::new(Fraction::from_reals(self.imaginary.negate(), denominator).into()),
        }
    }

    /// `z^w = exp(w * ln(z))` on the principal branch.
    ///
    /// Zero raised to a non-negative real exponent is `0`, or `1` for a zero exponent.
    pub fn pow(&self, exponent: &Number) -> Result<Number, TowerError> {
        if self.is_zero() {
            if let Ok(false) = exponent.is_negative() {
                return Ok(if exponent.is_zero() {
                    Number::one()
                } else {
                    Number::zero()
                });
            }
        }
        exponent.multiply(&self.ln()?).exp()
    }

    /// `exp(a+bi) = e^a (cos(b) + i sin(b))`
    pub fn exp(&self) -> Result<Number, TowerError> {
        let scale = self.real.exp()?;
        Ok(Complex::from_parts(
            scale.multiply(&self.imaginary.cos()?),
            scale.multiply(&self.imaginary.sin()?),
        )
        .into())
    }

    /// `ln(z) = ln|z| + i arg(z)` on the principal branch
    pub fn ln(&self) -> Result<Number, TowerError> {
        Ok(Complex::from_parts(self.abs()?.ln()?, self.angle()?.into()).into())
    }

    /// The argument of this number in radians, `atan2(imaginary, real)`
    pub fn angle(&self) -> Result<Decimal, TowerError> {
        Ok(Decimal::new(math::atan2(
            self.imaginary.approximation()?,
            self.real.approximation()?,
        )?))
    }

    /// `|a+bi| = sqrt(a^2 + b^2)`
    pub fn abs(&self) -> Result<Number, TowerError> {
        self.norm().sqrt()
    }

    /// `sin(a+bi) = sin(a)cosh(b) + i cos(a)sinh(b)`
    pub fn sin(&self) -> Result<Number, TowerError> {
        let (a, b) = (&self.real, &self.imaginary);
        Ok(Complex::from_parts(
            a.sin()?.multiply(&b.cosh()?),
            a.cos()?.multiply(&b.sinh()?),
        )
        .into())
    }

    /// `cos(a+bi) = cos(a)cosh(b) - i sin(a)sinh(b)`
    pub fn cos(&self) -> Result<Number, TowerError> {
        let (a, b) = (&self.real, &self.imaginary);
        Ok(Complex::from_parts(
            a.cos()?.multiply(&b.cosh()?),
            a.sin()?.multiply(&b.sinh()?).negate(),
        )
        .into())
    }

    /// `tan(a+bi) = (sin(2a) + i sinh(2b)) / (cos(2a) + cosh(2b))`
    pub fn tan(&self) -> Result<Number, TowerError> {
        let a2 = self.real.multiply(&TWO);
        let b2 = self.imaginary.multiply(&TWO);
        let denominator = a2.cos()?.add(&b2.cosh()?);
        Ok(Complex::from_parts(
            Fraction::from_reals(a2.sin()?, denominator.clone()).into(),
            Fraction::from_reals(b2.sinh()?, denominator).into(),
        )
        .into())
    }

    /// `sinh(a+bi) = sinh(a)cos(b) + i cosh(a)sin(b)`
    pub fn sinh(&self) -> Result<Number, TowerError> {
        let (a, b) = (&self.real, &self.imaginary);
        Ok(Complex::from_parts(
            a.sinh()?.multiply(&b.cos()?),
            a.cosh()?.multiply(&b.sin()?),
        )
        .into())
    }

    /// `cosh(a+bi) = cosh(a)cos(b) + i sinh(a)sin(b)`
    pub fn cosh(&self) -> Result<Number, TowerError> {
        let (a, b) = (&self.real, &self.imaginary);
        Ok(Complex::from_parts(
            a.cosh()?.multiply(&b.cos()?),
            a.sinh()?.multiply(&b.sin()?),
        )
        .into())
    }

    /// `tanh(a+bi) = (sinh(2a) + i sin(2b)) / (cosh(2a) + cos(2b))`
    pub fn tanh(&self) -> Result<Number, TowerError> {
        let a2 = self.real.multiply(&TWO);
        let b2 = self.imaginary.multiply(&TWO);
        let denominator = a2.cosh()?.add(&b2.cos()?);
        Ok(Complex::from_parts(
            Fraction::from_reals(a2.sinh()?, denominator.clone()).into(),
            Fraction::from_reals(b2.sin()?, denominator).into(),
        )
        .into())
    }
}

impl Display for Complex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.imaginary.is_zero() {
            return write!(f, "{}", self.real);
        }
        match self.imaginary.is_negative() {
            Ok(true) => {
                let magnitude = self.imaginary.to_string();
                write!(f, "{}-{}i", self.real, magnitude.replacen('-', "", 1))
            }
            _ => write!(f, "{}+{}i", self.real, self.imaginary),
        }
    }
}
