//! Construction of tower values from the tokens of an external number tokenizer.
//!
//! The tokenizer itself lives outside this crate. It is owned by the caller and handed in through
//! the [`Tokenizer`] trait; this module only turns its tokens into correctly-kinded values.

use std::{convert::TryFrom, fmt::Display};

use crate::{Complex, Decimal, Fraction, Number, TowerError};

/// A decimal literal such as `-12.5`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalToken {
    /// The literal text
    pub text: String,
}

/// A decimal literal, optionally over a second one: `3` or `3/4`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FractionToken {
    /// The numerator, or the whole value when there is no denominator
    pub numerator: DecimalToken,
    /// The denominator, if the literal is a fraction
    pub denominator: Option<DecimalToken>,
}

/// A real literal, optionally with an imaginary part: `1/2` or `1/2+3i`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexToken {
    /// The real part
    pub real: FractionToken,
    /// The imaginary part, if the literal is complex
    pub imaginary: Option<FractionToken>,
}

/// A token produced by the tokenizer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A number literal
    Number(ComplexToken),
    /// Anything the tokenizer recognized that is not a number, with its text
    Other(String),
}

/// An external tokenizer, constructed once by the caller and reused across inputs.
pub trait Tokenizer {
    /// Error reported by the tokenizer itself
    type Error: Display;

    /// Starts reading `input` from the beginning
    fn reset(&mut self, input: &str);

    /// Returns the next token, or `None` once the input is exhausted
    fn next_token(&mut self) -> Result<Option<Token>, Self::Error>;
}

impl DecimalToken {
    /// Creates a token from literal text
    pub fn new<S: Into<String>>(text: S) -> DecimalToken {
        DecimalToken { text: text.into() }
    }
}

impl TryFrom<&DecimalToken> for Decimal {
    type Error = TowerError;

    fn try_from(token: &DecimalToken) -> Result<Self, Self::Error> {
        token.text.parse()
    }
}

impl TryFrom<&FractionToken> for Number {
    type Error = TowerError;

    fn try_from(token: &FractionToken) -> Result<Self, Self::Error> {
        let numerator = Decimal::try_from(&token.numerator)?;
        match &token.denominator {
            None => Ok(numerator.into()),
            Some(denominator) => Ok(Fraction::from_decimal_parts(
                numerator,
                Decimal::try_from(denominator)?,
            )
            .into()),
        }
    }
}

impl TryFrom<&ComplexToken> for Number {
    type Error = TowerError;

    fn try_from(token: &ComplexToken) -> Result<Self, Self::Error> {
        let real = Number::try_from(&token.real)?;
        match &token.imaginary {
            None => Ok(real),
            Some(imaginary) => Ok(Complex::new(real, Number::try_from(imaginary)?)?.into()),
        }
    }
}

/// Reads exactly one number from `input`.
///
/// Fails with [`TowerError::MalformedInput`] if the input is empty, holds more than one token, or
/// holds a token that is not a number.
pub fn parse_with<T>(tokenizer: &mut T, input: &str) -> Result<Number, TowerError>
where
    T: Tokenizer + ?Sized,
{
    let malformed = |reason: String| TowerError::MalformedInput {
        input: input.to_string(),
        reason,
    };

    tokenizer.reset(input);
    let token = tokenizer
        .next_token()
        .map_err(|error| malformed(error.to_string()))?;
    let trailing = tokenizer
        .next_token()
        .map_err(|error| malformed(error.to_string()))?;

    if let Some(extra) = trailing {
        return Err(malformed(format!("unexpected trailing token {:?}", extra)));
    }

    match token {
        Some(Token::Number(number)) => Number::try_from(&number),
        Some(Token::Other(text)) => Err(malformed(format!("\"{}\" is not a number", text))),
        None => Err(malformed("no number found".to_string())),
    }
}
