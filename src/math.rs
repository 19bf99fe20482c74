//! Bridge to the arbitrary-precision transcendental provider (MPFR through `rug`).
//!
//! Operands are rounded to `WORKING_BITS` floats. Results are converted back exactly and then
//! rounded to `WORKING_PRECISION` significant digits.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Num, ToPrimitive, Zero};
use rug::{float::Constant, ops::Pow, Float};
use tracing::debug;

use crate::{TowerError, WORKING_BITS, WORKING_PRECISION};

fn to_float(value: &BigDecimal) -> Result<Float, TowerError> {
    let (digits, scale) = value.as_bigint_and_exponent();
    let literal = format!("{}e{}", digits, -scale);
    match Float::parse(&literal) {
        Ok(parsed) => Ok(Float::with_val(WORKING_BITS, parsed)),
        Err(error) => Err(TowerError::ParseError {
            parsed: literal,
            reason: error.to_string(),
        }),
    }
}

fn from_float(operation: &'static str, result: Float, operand: &BigDecimal) -> Result<BigDecimal, TowerError> {
    if !result.is_finite() {
        debug!(operation, %operand, "provider result is not finite");
        return Err(TowerError::Undefined {
            operation,
            operand: operand.to_string(),
        });
    }

    if result.is_zero() {
        return Ok(BigDecimal::zero());
    }

    let (mantissa, exponent) = match result.to_integer_exp() {
        Some(parts) => parts,
        None => {
            return Err(TowerError::Undefined {
                operation,
                operand: operand.to_string(),
            })
        }
    };
    let mantissa = BigInt::from_str_radix(&mantissa.to_string_radix(16), 16).map_err(|error| {
        TowerError::ParseError {
            parsed: mantissa.to_string(),
            reason: error.to_string(),
        }
    })?;

    // m * 2^e is exactly m * 5^-e / 10^-e when e is negative
    let exact = if exponent >= 0 {
        BigDecimal::from(mantissa * BigInt::from(2).pow(exponent as u32))
    } else {
        let shift = exponent.unsigned_abs();
        BigDecimal::new(mantissa * BigInt::from(5).pow(shift), i64::from(shift))
    };

    Ok(exact.with_prec(WORKING_PRECISION).normalized())
}

fn evaluate<F>(operation: &'static str, operand: &BigDecimal, f: F) -> Result<BigDecimal, TowerError>
where
    F: FnOnce(Float) -> Float,
{
    let result = f(to_float(operand)?);
    from_float(operation, result, operand)
}

pub(crate) fn exp(x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    evaluate("exp", x, Float::exp)
}

pub(crate) fn ln(x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    evaluate("ln", x, Float::ln)
}

pub(crate) fn pow(base: &BigDecimal, exponent: &BigDecimal) -> Result<BigDecimal, TowerError> {
    let exponent = to_float(exponent)?;
    evaluate("pow", base, |base| base.pow(&exponent))
}

/// The `n`-th root of `x`. Integer indices use MPFR's root directly, others go through `pow(x, 1/n)`.
pub(crate) fn root(x: &BigDecimal, n: &BigDecimal) -> Result<BigDecimal, TowerError> {
    let index = if n.normalized().as_bigint_and_exponent().1 <= 0 {
        n.to_u32().filter(|k| *k > 0)
    } else {
        None
    };

    match index {
        Some(k) => evaluate("root", x, |x| x.root(k)),
        None => {
            let inverse = Float::with_val(WORKING_BITS, 1) / to_float(n)?;
            evaluate("root", x, |x| x.pow(&inverse))
        }
    }
}

pub(crate) fn sin(x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    evaluate("sin", x, Float::sin)
}

pub(crate) fn cos(x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    evaluate("cos", x, Float::cos)
}

pub(crate) fn tan(x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    evaluate("tan", x, Float::tan)
}

pub(crate) fn sinh(x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    evaluate("sinh", x, Float::sinh)
}

pub(crate) fn cosh(x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    evaluate("cosh", x, Float::cosh)
}

pub(crate) fn tanh(x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    evaluate("tanh", x, Float::tanh)
}

/// Two-argument arctangent of `y / x`, in `(-pi, pi]`.
pub(crate) fn atan2(y: &BigDecimal, x: &BigDecimal) -> Result<BigDecimal, TowerError> {
    let x = to_float(x)?;
    evaluate("atan2", y, |y| y.atan2(&x))
}

pub(crate) fn pi() -> Result<BigDecimal, TowerError> {
    let pi = Float::with_val(WORKING_BITS, Constant::Pi);
    from_float("pi", pi, &BigDecimal::zero())
}
