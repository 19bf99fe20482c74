use std::{
    cmp::Ordering,
    collections::{HashMap, VecDeque},
    convert::TryFrom,
};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use quickcheck::{quickcheck, TestResult};

use super::token::{parse_with, ComplexToken, DecimalToken, FractionToken, Token, Tokenizer};
use super::{Complex, Decimal, Fraction, Kind, Number, Rank, TowerError};

fn d(s: &str) -> Number {
    s.parse().unwrap()
}

fn frac(n: i64, d: i64) -> Number {
    Number::fraction(n.into(), d.into()).unwrap()
}

fn complex(re: i64, im: i64) -> Number {
    Number::complex(re.into(), im.into()).unwrap()
}

fn complex_of(re: &str, im: &str) -> Number {
    Number::complex(d(re), d(im)).unwrap()
}

const TOLERANCE: f64 = 1e-30;

#[test]
fn decimal() {
    assert_eq!(d("12.50").to_string(), "12.50");
    assert_eq!(d("-0.001").to_string(), "-0.001");
    assert_eq!(d("1E+3").to_string(), "1000");
    assert_eq!(d("0").to_string(), "0");
    assert_eq!(Number::from(-42).to_string(), "-42");

    assert!(matches!(
        "abc".parse::<Number>(),
        Err(TowerError::ParseError { .. })
    ));
    assert!(Decimal::try_from("1.5").is_ok());

    assert!(Decimal::from(3).is_integer());
    assert!("2.000".parse::<Decimal>().unwrap().is_integer());
    assert!(!"2.5".parse::<Decimal>().unwrap().is_integer());
}

#[test]
fn simple_maths() {
    let a = Number::from(4);
    let b = Number::from(2);

    assert_eq!(&a + &b, Number::from(6));
    assert_eq!(&a - &b, Number::from(2));
    assert_eq!(&a * &b, Number::from(8));
    assert_eq!(&a / &b, Number::from(2));
    assert_eq!((&a / &b).to_string(), "4/2");
    assert_eq!((-&a).to_string(), "-4");
}

#[test]
fn fraction_arithmetic() {
    let half = Number::one_half();
    let third = frac(1, 3);

    assert_eq!(half.add(&third).to_string(), "5/6");
    assert_eq!(half.multiply(&frac(2, 3)).to_string(), "2/6");
    assert_eq!(Number::one().add(&half).to_string(), "3/2");
    assert_eq!(half.subtract(&third).to_string(), "1/6");
    assert_eq!(half.divide(&third), frac(3, 2));
    assert_eq!(Fraction::one_half().to_string(), "1/2");
}

#[test]
fn fraction_sign_is_on_the_numerator() {
    assert_eq!(frac(1, -2).to_string(), "-1/2");
    assert_eq!(frac(-1, -2).to_string(), "1/2");
    assert_eq!(frac(-1, 2).to_string(), "-1/2");

    assert_eq!(frac(1, -2).is_negative(), Ok(true));
    assert_eq!(frac(-1, -2).is_negative(), Ok(false));
    assert!(!frac(3, -4).as_fraction().unwrap().denominator().is_negative());
}

#[test]
fn fraction_flattening() {
    let nested = Number::fraction(frac(1, 2), frac(3, 4)).unwrap();
    assert_eq!(nested.to_string(), "4/6");
    assert_eq!(nested.rank(), Rank::Fraction);

    let real_complex = Number::fraction(complex(3, 0), 4.into()).unwrap();
    assert_eq!(real_complex.to_string(), "3/4");

    assert_eq!(
        Number::fraction(complex(1, 1), 1.into()).unwrap_err(),
        TowerError::InvalidNesting {
            part: "numerator",
            value: "1+1i".to_string(),
        }
    );
}

#[test]
fn fraction_approximation() {
    let third = frac(1, 3);
    let expected = format!("0.{}", "3".repeat(75));
    assert_eq!(Decimal::new(third.approximation().unwrap().clone()).to_string(), expected);

    let two_thirds = Decimal::new(frac(2, 3).approximation().unwrap().clone());
    assert_eq!(two_thirds.to_string(), format!("0.{}7", "6".repeat(74)));
    let negative = Decimal::new(frac(-2, 3).approximation().unwrap().clone());
    assert_eq!(negative.to_string(), format!("-0.{}7", "6".repeat(74)));

    let eighth = Decimal::new(frac(1, 8).approximation().unwrap().clone());
    assert_eq!(eighth.to_string(), "0.125");

    let scaled = Number::fraction(d("0.5"), d("0.25")).unwrap();
    assert_eq!(Decimal::new(scaled.approximation().unwrap().clone()).to_string(), "2");

    assert_eq!(
        frac(1, 0).approximation().unwrap_err(),
        TowerError::DivisionByZero {
            dividend: "1".to_string(),
        }
    );
}

#[test]
fn small_fraction_keeps_significant_digits() {
    let tiny = Number::one().divide(&d("3e45"));
    let approximation = Number::from(tiny.approximation().unwrap().clone());
    assert!(!approximation.is_zero());
    assert!(approximation
        .multiply(&d("3e45"))
        .eq_tolerance(&Number::one(), TOLERANCE));
    let float = tiny.to_f64().unwrap();
    assert!((float * 3e45 - 1.0).abs() < 1e-12);

    let huge = Number::from(200).exp().unwrap();
    let reciprocal = Number::from(huge.reciprocal().approximation().unwrap().clone());
    let direct = Number::from(-200).exp().unwrap();
    assert!(reciprocal
        .divide(&direct)
        .eq_tolerance(&Number::one(), TOLERANCE));
}

#[test]
fn approximation_is_cached() {
    let third = frac(1, 3);
    assert!(std::ptr::eq(
        third.approximation().unwrap(),
        third.approximation().unwrap()
    ));
}

#[test]
fn division_by_zero_is_lazy() {
    let quotient = Number::from(1).divide(&Number::zero());
    assert_eq!(quotient.to_string(), "1/0");
    assert_eq!(quotient.rank(), Rank::Fraction);
    assert!(matches!(
        quotient.approximation(),
        Err(TowerError::DivisionByZero { .. })
    ));
    assert_eq!(quotient.to_f64(), None);
}

#[test]
fn promotion() {
    assert_eq!(Number::from(1).add(&frac(1, 2)).rank(), Rank::Fraction);
    assert_eq!(frac(1, 2).multiply(&complex(1, 1)).rank(), Rank::Complex);
    assert_eq!(Number::from(2).multiply(&Number::from(3)).rank(), Rank::Decimal);
    assert!(Rank::Decimal < Rank::Fraction && Rank::Fraction < Rank::Complex);

    assert!(matches!(Number::from(1).kind(), Kind::Decimal(_)));
    assert!(matches!(frac(1, 2).into_kind(), Kind::Fraction(_)));
}

#[test]
fn is_integer() {
    assert!(frac(4, 2).is_integer());
    assert!(!frac(1, 3).is_integer());
    assert!(!frac(1, 0).is_integer());
    assert!(d("2.000").is_integer());
    assert!(!d("2.5").is_integer());
    assert!(complex(4, 0).is_integer());
    assert!(!complex(1, 1).is_integer());
}

#[test]
fn parity() {
    assert_eq!(Number::from(4).is_even(), Ok(true));
    assert_eq!(Number::from(7).is_odd(), Ok(true));
    assert_eq!(Number::from(-3).is_odd(), Ok(true));
    assert_eq!(frac(4, 2).is_even(), Ok(true));
    assert_eq!(d("2.000").is_even(), Ok(true));

    let half = d("2.5");
    assert!(matches!(
        half.is_even(),
        Err(TowerError::UndefinedRemainder { .. })
    ));
    assert!(matches!(
        complex(1, 1).is_odd(),
        Err(TowerError::UndefinedRemainder { .. })
    ));

    let seven = Number::from(7);
    assert_eq!(seven.is_even(), seven.is_even());
}

#[test]
fn rem() {
    let three = Number::from(3);

    assert_eq!(Number::from(7).remainder(&three).unwrap().to_string(), "1");
    assert_eq!(Number::from(-7).remainder(&three).unwrap().to_string(), "1");
    assert_eq!(frac(10, 2).remainder(&three).unwrap().to_string(), "2");
    assert_eq!(complex(7, 0).remainder(&three).unwrap().to_string(), "1");

    assert_eq!(
        d("7.5").remainder(&three).unwrap_err(),
        TowerError::UndefinedRemainder {
            dividend: "7.5".to_string(),
            divisor: "3".to_string(),
        }
    );
    assert!(matches!(
        Number::from(7).remainder(&Number::zero()),
        Err(TowerError::DivisionByZero { .. })
    ));
}

#[test]
#[allow(clippy::bool_assert_comparison)]
fn cmp() {
    let one = Number::one();
    let three_halves = frac(3, 2);

    assert_eq!(one.compare(&three_halves), Ok(Ordering::Less));
    assert_eq!(three_halves.compare(&one), Ok(Ordering::Greater));
    assert_eq!(frac(2, 4).compare(&Number::one_half()), Ok(Ordering::Equal));
    assert_eq!(one < three_halves, true);
    assert_eq!(frac(-1, 2) < Number::zero(), true);

    assert_eq!(complex(1, 2), complex(1, 2));
    assert_ne!(complex(1, 2), complex(1, 3));
    assert_eq!(complex(1, 2).partial_cmp(&complex(1, 3)), None);
    assert_eq!(
        complex(1, 1).compare(&Number::zero()),
        Err(TowerError::UndefinedOrdering {
            value: "1+1i".to_string(),
        })
    );

    assert_eq!(complex(5, 0), Number::from(5));
    assert_eq!(Number::from(5), complex(5, 0));
}

#[test]
fn neg_abs() {
    assert_eq!(Number::from(-3).abs().unwrap().to_string(), "3");
    assert_eq!(frac(-1, 2).abs().unwrap().to_string(), "1/2");
    assert_eq!(frac(1, 2).abs().unwrap().to_string(), "1/2");
    assert_eq!(complex(3, 4).abs().unwrap().to_string(), "5");

    assert_eq!(Number::zero().is_positive(), Ok(true));
    assert_eq!(Number::from(-1).is_positive(), Ok(false));
    assert_eq!(complex(-1, 0).is_negative(), Ok(true));
    assert!(complex(-1, 1).is_negative().is_err());
}

#[test]
fn conversions() {
    assert_eq!(frac(7, 2).to_i64(), Some(3));
    assert_eq!(frac(-7, 2).to_i64(), Some(-3));
    assert_eq!(
        Number::from(9_007_199_254_740_993i64).to_i64(),
        Some(9_007_199_254_740_993)
    );
    assert_eq!(Number::from(-5).to_u64(), None);
    assert_eq!(d("1e30").to_i64(), None);
    assert_eq!(frac(7, 2).to_f64(), Some(3.5));
    assert_eq!(Number::from(-7).to_f64(), Some(-7.0));
    assert_eq!(complex(2, 0).to_u8(), Some(2));
    assert_eq!(complex(1, 1).to_f64(), None);
    assert!(Number::from(3) == 3.0);
    assert!(frac(1, 4) == 0.25);
}

#[test]
fn complex_construction() {
    let flattened = Number::complex(complex(2, 0), 3.into()).unwrap();
    assert_eq!(flattened.to_string(), "2+3i");
    assert_eq!(flattened.as_complex().unwrap().real().rank(), Rank::Decimal);

    assert_eq!(
        Number::complex(complex(1, 1), 1.into()).unwrap_err(),
        TowerError::InvalidNesting {
            part: "real part",
            value: "1+1i".to_string(),
        }
    );
    assert!(Complex::new(1.into(), complex(0, 1)).is_err());

    assert_eq!(Complex::from_decimal(Decimal::two()).to_string(), "2");
    assert!(Complex::from_fraction(Fraction::one_half())
        .imaginary()
        .is_zero());
}

#[test]
fn complex_display() {
    assert_eq!(complex(1, 2).to_string(), "1+2i");
    assert_eq!(complex(1, -2).to_string(), "1-2i");
    assert_eq!(complex(1, 0).to_string(), "1");
    assert_eq!(
        Number::complex(frac(1, 2), frac(-3, 4)).unwrap().to_string(),
        "1/2-3/4i"
    );
    assert_eq!(
        Number::complex(1.into(), frac(3, -4)).unwrap().to_string(),
        "1-3/4i"
    );
}

#[test]
fn complex_arithmetic() {
    let a = complex(1, 2);
    let b = complex(3, 4);

    assert_eq!((&a * &b).to_string(), "-5+10i");
    assert_eq!((&a + &Number::from(3)).to_string(), "4+2i");
    assert_eq!((&a - &a), Number::zero());
    assert_eq!((&a / &a), Number::one());
    assert_eq!(b.reciprocal().to_string(), "3/25-4/25i");
    assert_eq!(b.reciprocal().multiply(&b), Number::one());

    let reciprocal = b.reciprocal();
    let parts = reciprocal.as_complex().unwrap();
    assert_eq!(parts.real().as_fraction().unwrap().denominator(), &Decimal::from(25));
    assert_eq!(parts.imaginary().as_fraction().unwrap().numerator(), &Decimal::from(-4));
}

#[test]
fn roots_and_powers() {
    assert_eq!(Number::from(16).sqrt().unwrap().to_string(), "4");
    assert!(Number::from(2)
        .sqrt()
        .unwrap()
        .eq_tolerance(&d("1.41421356237309504880168872420969808"), TOLERANCE));
    assert_eq!(Number::from(2).pow(&Number::from(10)).unwrap().to_string(), "1024");
    assert_eq!(Number::from(2).pow(&Number::from(-2)).unwrap().to_string(), "0.25");
    assert!(Number::from(2)
        .pow(&d("0.75"))
        .unwrap()
        .eq_tolerance(&d("1.68179283050742908606225095246642979"), TOLERANCE));
    assert!(Number::from(2)
        .root(&Number::from(3))
        .unwrap()
        .eq_tolerance(&d("1.25992104989487316476721060727822835"), TOLERANCE));
    assert_eq!(frac(1, 2).pow(&Number::from(2)).unwrap().to_string(), "1/4");
}

#[test]
fn negative_base_powers() {
    let minus_two = Number::from(-2);
    assert_eq!(minus_two.pow(&Number::from(3)).unwrap().to_string(), "-8");
    assert_eq!(minus_two.pow(&Number::from(2)).unwrap().to_string(), "4");
    assert_eq!(minus_two.pow(&Number::from(3)).unwrap().rank(), Rank::Decimal);

    let root = Number::from(-4).sqrt().unwrap();
    assert_eq!(root.rank(), Rank::Complex);
    assert!(root.eq_tolerance(&complex(0, 2), TOLERANCE));

    let half_i = frac(-1, 4).sqrt().unwrap();
    assert_eq!(half_i.rank(), Rank::Complex);
    assert!(half_i.eq_tolerance(&complex_of("0", "0.5"), TOLERANCE));

    let cube_root = Number::from(-8).pow(&frac(1, 3)).unwrap();
    assert!(cube_root.eq_tolerance(
        &complex_of("1", "1.73205080756887729352744634150587237"),
        TOLERANCE
    ));
}

#[test]
fn exp_ln() {
    assert!(Number::one()
        .exp()
        .unwrap()
        .eq_tolerance(&d("2.71828182845904523536028747135266250"), TOLERANCE));
    assert!(Number::one().ln().unwrap().is_zero());
    assert!(frac(1, 2)
        .exp()
        .unwrap()
        .eq_tolerance(&d("1.64872127070012814684865078781416357"), TOLERANCE));
    assert!(Number::from(2)
        .ln()
        .unwrap()
        .eq_tolerance(&d("0.693147180559945309417232121458176568"), TOLERANCE));

    let ln_minus_two = Number::from(-2).ln().unwrap();
    assert_eq!(ln_minus_two.rank(), Rank::Complex);
    assert!(ln_minus_two.eq_tolerance(
        &complex_of(
            "0.693147180559945309417232121458176568",
            "3.14159265358979323846264338327950288"
        ),
        TOLERANCE
    ));

    let x = Number::from(2);
    let y = d("0.75");
    let through_ln = y.multiply(&x.ln().unwrap()).exp().unwrap();
    assert!(x.pow(&y).unwrap().eq_tolerance(&through_ln, TOLERANCE));

    let three_halves = frac(3, 2);
    let squared = Number::from(2)
        .multiply(&three_halves.ln().unwrap())
        .exp()
        .unwrap();
    assert!(squared.eq_tolerance(&frac(9, 4), TOLERANCE));
}

#[test]
fn complex_exp_ln() {
    let i_pi = Number::complex(Number::zero(), Number::pi().unwrap()).unwrap();
    assert!(i_pi.exp().unwrap().eq_tolerance(&Number::from(-1), TOLERANCE));

    assert!(complex(3, 4).ln().unwrap().eq_tolerance(
        &complex_of(
            "1.60943791243410037460075933322618764",
            "0.927295218001612232428512462922428804"
        ),
        TOLERANCE
    ));

    let z = complex(1, 1);
    assert!(z.pow(&z).unwrap().eq_tolerance(
        &complex_of(
            "0.273957253830121071130342117417502918",
            "0.583700758758614627514961896777168081"
        ),
        TOLERANCE
    ));
}

#[test]
fn powers_of_complex_zero() {
    let z = complex(1, 2);
    let zero = &z - &z;
    assert_eq!(zero.rank(), Rank::Complex);
    assert!(zero.pow(&Number::from(2)).unwrap().is_zero());
    assert!(zero.pow(&frac(1, 2)).unwrap().is_zero());
    assert_eq!(zero.pow(&Number::zero()).unwrap(), Number::one());
    assert!(matches!(
        zero.pow(&Number::from(-1)),
        Err(TowerError::Undefined { .. })
    ));
    assert!(matches!(
        zero.pow(&complex(0, 1)),
        Err(TowerError::Undefined { .. })
    ));
}

#[test]
fn real_trig() {
    let one = Number::one();
    assert!(one.sin().unwrap().eq_tolerance(&d("0.841470984807896506652502321630298999"), TOLERANCE));
    assert!(one.cos().unwrap().eq_tolerance(&d("0.540302305868139717400936607442976604"), TOLERANCE));
    assert!(one.tan().unwrap().eq_tolerance(&d("1.55740772465490223050697480745836017"), TOLERANCE));
    assert!(one.sinh().unwrap().eq_tolerance(&d("1.17520119364380145688238185059560082"), TOLERANCE));
    assert!(one.cosh().unwrap().eq_tolerance(&d("1.54308063481524377847790562075706168"), TOLERANCE));
    assert!(one.tanh().unwrap().eq_tolerance(&d("0.761594155955764888119458282604793590"), TOLERANCE));

    assert_eq!(Number::zero().cos().unwrap().to_string(), "1");
    assert!(frac(1, 2).sin().unwrap().eq_tolerance(
        &d("0.479425538604203000273287935215571388"),
        TOLERANCE
    ));
}

#[test]
fn complex_trig_on_the_imaginary_axis() {
    let i = complex(0, 1);
    assert!(i.sin().unwrap().eq_tolerance(&complex_of("0", "1.17520119364380145688238185059560082"), TOLERANCE));
    assert!(i.cos().unwrap().eq_tolerance(&d("1.54308063481524377847790562075706168"), TOLERANCE));
    assert!(i.tan().unwrap().eq_tolerance(&complex_of("0", "0.761594155955764888119458282604793590"), TOLERANCE));
    assert!(i.sinh().unwrap().eq_tolerance(&complex_of("0", "0.841470984807896506652502321630298999"), TOLERANCE));
    assert!(i.cosh().unwrap().eq_tolerance(&d("0.540302305868139717400936607442976604"), TOLERANCE));
    assert!(i.tanh().unwrap().eq_tolerance(&complex_of("0", "1.55740772465490223050697480745836017"), TOLERANCE));
}

#[test]
fn complex_trig() {
    let z = complex(1, 1);
    let re = "1.29845758141597729482604236580781562";
    let im = "0.634963914784736108255082202991509782";
    assert!(z.sin().unwrap().eq_tolerance(&complex_of(re, im), TOLERANCE));
    assert!(z.sinh().unwrap().eq_tolerance(&complex_of(im, re), TOLERANCE));

    let re = "0.833730025131149048883885394335094480";
    let im = "0.988897705762865096382129540892686189";
    assert!(z.cos().unwrap().eq_tolerance(&complex_of(re, &format!("-{}", im)), TOLERANCE));
    assert!(z.cosh().unwrap().eq_tolerance(&complex_of(re, im), TOLERANCE));

    let re = "0.271752585319511716528843722498588921";
    let im = "1.08392332733869454347575206121197172";
    assert!(z.tan().unwrap().eq_tolerance(&complex_of(re, im), TOLERANCE));
    assert!(z.tanh().unwrap().eq_tolerance(&complex_of(im, re), TOLERANCE));
}

#[test]
fn angle() {
    let angle = complex(0, 1).as_complex().unwrap().angle().unwrap();
    let half_pi = Number::pi().unwrap().divide(&Number::from(2));
    assert!(Number::from(angle).eq_tolerance(&half_pi, TOLERANCE));
}

#[test]
fn eq_tolerance() {
    assert!(d("1.0000001").eq_tolerance(&Number::one(), 1e-6));
    assert!(!d("1.0001").eq_tolerance(&Number::one(), 1e-6));
    assert!(d("1000000.1").eq_tolerance(&Number::from(1_000_000), 1e-6));
    assert!(!complex(1, 1).eq_tolerance(&Number::one(), 1e-6));
    assert!(!frac(1, 0).eq_tolerance(&Number::one(), 1e-6));
}

/// Replays canned tokens for known inputs; unknown inputs produce no tokens at all.
#[derive(Default)]
struct ScriptedTokenizer {
    scripts: HashMap<&'static str, Vec<Result<Token, String>>>,
    pending: VecDeque<Result<Token, String>>,
    resets: usize,
}

impl ScriptedTokenizer {
    fn script(mut self, input: &'static str, tokens: Vec<Result<Token, String>>) -> Self {
        self.scripts.insert(input, tokens);
        self
    }
}

impl Tokenizer for ScriptedTokenizer {
    type Error = String;

    fn reset(&mut self, input: &str) {
        self.resets += 1;
        self.pending = self.scripts.get(input).cloned().unwrap_or_default().into();
    }

    fn next_token(&mut self) -> Result<Option<Token>, String> {
        self.pending.pop_front().transpose()
    }
}

fn real(numerator: &str, denominator: Option<&str>) -> FractionToken {
    FractionToken {
        numerator: DecimalToken::new(numerator),
        denominator: denominator.map(DecimalToken::new),
    }
}

fn number(real: FractionToken, imaginary: Option<FractionToken>) -> Result<Token, String> {
    Ok(Token::Number(ComplexToken { real, imaginary }))
}

fn tokenizer() -> ScriptedTokenizer {
    ScriptedTokenizer::default()
        .script("-12.5", vec![number(real("-12.5", None), None)])
        .script("3/-4", vec![number(real("3", Some("-4")), None)])
        .script(
            "1/2+3/4i",
            vec![number(real("1", Some("2")), Some(real("3", Some("4"))))],
        )
        .script("2+0i", vec![number(real("2", None), Some(real("0", None)))])
        .script(
            "1 2",
            vec![number(real("1", None), None), number(real("2", None), None)],
        )
        .script("x", vec![Ok(Token::Other("x".to_string()))])
        .script("!", vec![Err("unexpected character".to_string())])
        .script("1.2.3", vec![number(real("1.2.3", None), None)])
}

#[test]
fn parse_numbers() {
    let mut tokenizer = tokenizer();

    let decimal = parse_with(&mut tokenizer, "-12.5").unwrap();
    assert_eq!(decimal.rank(), Rank::Decimal);
    assert_eq!(decimal.to_string(), "-12.5");

    let fraction = parse_with(&mut tokenizer, "3/-4").unwrap();
    assert_eq!(fraction.rank(), Rank::Fraction);
    assert_eq!(fraction.to_string(), "-3/4");

    let complex = parse_with(&mut tokenizer, "1/2+3/4i").unwrap();
    assert_eq!(complex.rank(), Rank::Complex);
    assert_eq!(complex.to_string(), "1/2+3/4i");

    assert_eq!(parse_with(&mut tokenizer, "2+0i").unwrap(), Number::from(2));
    assert_eq!(tokenizer.resets, 4);
}

#[test]
fn parse_rejects_malformed_input() {
    let mut tokenizer = tokenizer();

    assert!(matches!(
        parse_with(&mut tokenizer, "1 2"),
        Err(TowerError::MalformedInput { .. })
    ));
    assert!(matches!(
        parse_with(&mut tokenizer, "x"),
        Err(TowerError::MalformedInput { .. })
    ));
    assert!(matches!(
        parse_with(&mut tokenizer, ""),
        Err(TowerError::MalformedInput { .. })
    ));
    assert_eq!(
        parse_with(&mut tokenizer, "!").unwrap_err(),
        TowerError::MalformedInput {
            input: "!".to_string(),
            reason: "unexpected character".to_string(),
        }
    );
    assert!(matches!(
        parse_with(&mut tokenizer, "1.2.3"),
        Err(TowerError::ParseError { .. })
    ));
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let value = Number::complex(frac(1, 2), 3.into()).unwrap();
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"Complex":[{"Fraction":["1","2"]},{"Decimal":"3"}]}"#);

    let back: Number = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_string(), "1/2+3i");
    assert_eq!(back, value);

    let flipped: Number = serde_json::from_str(r#"{"Fraction":["1","-2"]}"#).unwrap();
    assert_eq!(flipped.to_string(), "-1/2");

    let nested = r#"{"Complex":[{"Complex":[{"Decimal":"1"},{"Decimal":"1"}]},{"Decimal":"0"}]}"#;
    assert!(serde_json::from_str::<Number>(nested).is_err());
}

fn decimal_from(mantissa: i64, scale: u8) -> Number {
    BigDecimal::new(BigInt::from(mantissa), i64::from(scale % 12)).into()
}

quickcheck! {
    fn additive_and_multiplicative_identity(mantissa: i64, scale: u8) -> bool {
        let x = decimal_from(mantissa, scale);
        x.add(&Number::zero()) == x && x.multiply(&Number::one()) == x
    }

    fn fraction_identity(n: i32, d: i32) -> TestResult {
        if d == 0 {
            return TestResult::discard();
        }
        let x = frac(n.into(), d.into());
        TestResult::from_bool(x.add(&Number::zero()) == x && x.multiply(&Number::one()) == x)
    }

    fn complex_identity(a: i32, b: i32) -> bool {
        let z = complex(a.into(), b.into());
        z.add(&Number::zero()) == z && z.multiply(&Number::one()) == z
    }

    fn subtracting_self_is_zero(n: i32, d: i32) -> TestResult {
        if d == 0 {
            return TestResult::discard();
        }
        let x = frac(n.into(), d.into());
        TestResult::from_bool(x.subtract(&x).is_zero())
    }

    fn fraction_double_reciprocal(n: i32, d: i32) -> TestResult {
        if d == 0 {
            return TestResult::discard();
        }
        let x = frac(n.into(), d.into());
        TestResult::from_bool(x.reciprocal().reciprocal() == x)
    }

    fn fraction_addition_commutes(a: i32, b: i32, c: i32, d: i32) -> TestResult {
        if b == 0 || d == 0 {
            return TestResult::discard();
        }
        let x = frac(a.into(), b.into());
        let y = frac(c.into(), d.into());
        TestResult::from_bool(x.add(&y) == y.add(&x))
    }

    fn reciprocal_is_inverse(mantissa: i64, scale: u8) -> TestResult {
        let x = decimal_from(mantissa, scale);
        if x.is_zero() {
            return TestResult::discard();
        }
        TestResult::from_bool(x.multiply(&x.reciprocal()) == Number::one())
    }

    fn parity_is_exclusive(x: i64) -> bool {
        let n = Number::from(x);
        let even = n.is_even().unwrap();
        even != n.is_odd().unwrap() && even == (x % 2 == 0)
    }

    fn compare_agrees_with_integers(a: i64, b: i64) -> bool {
        Number::from(a).compare(&Number::from(b)) == Ok(a.cmp(&b))
    }
}
