//! Integer text conventions.
//!
//! Integers travel as `0x`-prefixed lowercase hex strings, with a leading `-`
//! for negative values. On input any of the following is accepted, whether it
//! arrives as a JSON number or inside a JSON string:
//!
//! - an optional `+`/`-` sign,
//! - a `0x`, `0o` or `0b` prefix selecting base 16, 8 or 2 (base 10 otherwise),
//! - a decimal literal in float form (`1e3`, `10.0`) when its value is integral.

use crate::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};

/// Fixed-width primitive integers, converted through sign and magnitude.
pub(crate) trait Integer: Sized + Copy {
    const SIGNED: bool;
    const BITS: u32;
    const NAME: &'static str;

    fn from_parts(negative: bool, magnitude: u128) -> Option<Self>;
    fn to_parts(self) -> (bool, u128);
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl Integer for $ty {
            const SIGNED: bool = false;
            const BITS: u32 = <$ty>::BITS;
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn from_parts(negative: bool, magnitude: u128) -> Option<Self> {
                if negative && magnitude != 0 {
                    return None;
                }
                <$ty>::try_from(magnitude).ok()
            }

            #[inline]
            fn to_parts(self) -> (bool, u128) {
                (false, self as u128)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl Integer for $ty {
            const SIGNED: bool = true;
            const BITS: u32 = <$ty>::BITS;
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn from_parts(negative: bool, magnitude: u128) -> Option<Self> {
                if !negative {
                    return <$ty>::try_from(magnitude).ok();
                }
                if magnitude == 0 {
                    return Some(0);
                }
                // -(m - 1) - 1 reaches MIN without overflowing
                <$ty>::try_from(magnitude - 1).ok().map(|v| -v - 1)
            }

            #[inline]
            fn to_parts(self) -> (bool, u128) {
                (self < 0, self.unsigned_abs() as u128)
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_signed!(i8, i16, i32, i64, i128, isize);

/// Sign, radix and digit text of an integer literal.
struct Literal<'a> {
    negative: bool,
    radix: u32,
    digits: &'a str,
}

fn split_literal(s: &str) -> Literal<'_> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let bytes = rest.as_bytes();
    let radix = if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1].to_ascii_lowercase() {
            b'x' => 16,
            b'o' => 8,
            b'b' => 2,
            _ => 10,
        }
    } else {
        10
    };
    let digits = if radix == 10 { rest } else { &rest[2..] };
    Literal {
        negative,
        radix,
        digits,
    }
}

/// Decimal text that only makes sense as a float (`1.5`, `1e3`).
fn is_float_form(lit: &Literal<'_>) -> bool {
    lit.radix == 10 && lit.digits.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

/// Longest digit string a float-form literal may expand to.
const MAX_EXPANDED_DIGITS: usize = 1024;

/// Exponent of a float-form literal, clamped so the scale arithmetic below
/// cannot overflow.
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(b - b'0'))
            .min(i64::from(u32::MAX))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Expands a decimal literal in float form (`1.5e3`) to the exact decimal
/// digits of its value. A nonzero fractional part is `InvalidNumber`.
fn integral_digits(digits: &str, text: &str, target: &'static str) -> Result<String> {
    let (mantissa, exponent) = match digits.find(|c: char| c == 'e' || c == 'E') {
        Some(at) => (&digits[..at], Some(&digits[at + 1..])),
        None => (digits, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(Error::invalid_number(text));
    }
    let exponent = match exponent {
        Some(exponent) => parse_exponent(exponent).ok_or_else(|| Error::invalid_number(text))?,
        None => 0,
    };

    let joined = format!("{}{}", whole, fraction);
    let significant = joined.trim_start_matches('0');
    if significant.is_empty() {
        return Ok("0".to_string());
    }
    // value = significant * 10^scale
    let scale = exponent - fraction.len() as i64;
    let integer_len = significant.len() as i64 + scale;
    if scale < 0 {
        if integer_len <= 0 {
            return Err(Error::invalid_number(text));
        }
        let (integer, rest) = significant.split_at(integer_len as usize);
        if rest.bytes().any(|b| b != b'0') {
            return Err(Error::invalid_number(text));
        }
        return Ok(integer.to_string());
    }
    if integer_len > MAX_EXPANDED_DIGITS as i64 {
        return Err(Error::overflow(text, target));
    }
    let mut out = String::with_capacity(integer_len as usize);
    out.push_str(significant);
    out.extend(std::iter::repeat('0').take(scale as usize));
    Ok(out)
}

fn parse_magnitude(text: &str, target: &'static str) -> Result<(bool, u128)> {
    let lit = split_literal(text);
    let expanded;
    let (radix, digits) = if is_float_form(&lit) {
        expanded = integral_digits(lit.digits, text, target)?;
        (10, expanded.as_str())
    } else {
        (lit.radix, lit.digits)
    };
    if digits.is_empty() {
        return Err(Error::invalid_character(text));
    }
    let mut magnitude: u128 = 0;
    let mut overflowed = false;
    for ch in digits.chars() {
        let digit = ch
            .to_digit(radix)
            .ok_or_else(|| Error::invalid_character(text))?;
        match magnitude
            .checked_mul(radix as u128)
            .and_then(|m| m.checked_add(digit as u128))
        {
            Some(m) => magnitude = m,
            None => overflowed = true,
        }
    }
    if overflowed {
        return Err(Error::overflow(text, target));
    }
    Ok((lit.negative, magnitude))
}

/// Parses an integer literal with automatic base detection.
pub(crate) fn parse_int<T: Integer>(text: &str) -> Result<T> {
    let (negative, magnitude) = parse_magnitude(text, T::NAME)?;
    T::from_parts(negative, magnitude).ok_or_else(|| Error::overflow(text, T::NAME))
}

/// Parses an arbitrary-precision signed integer literal.
pub(crate) fn parse_big_int(text: &str) -> Result<BigInt> {
    let lit = split_literal(text);
    let expanded;
    let (radix, digits) = if is_float_form(&lit) {
        expanded = integral_digits(lit.digits, text, "BigInt")?;
        (10, expanded.as_str())
    } else {
        (lit.radix, lit.digits)
    };
    if digits.is_empty() {
        return Err(Error::invalid_character(text));
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| Error::invalid_character(text))?;
    let sign = if lit.negative { Sign::Minus } else { Sign::Plus };
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Parses an arbitrary-precision unsigned integer literal.
pub(crate) fn parse_big_uint(text: &str) -> Result<BigUint> {
    let value = parse_big_int(text)?;
    match value.sign() {
        Sign::Minus => Err(Error::overflow(text, "BigUint")),
        _ => Ok(value.magnitude().clone()),
    }
}

/// Parses a float from a number token or a quoted string, accepting the
/// `NaN`/`inf`/`-inf` spellings written for non-finite values.
pub(crate) fn parse_float(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| Error::invalid_number(text))
}

/// Whether a string token should be read as a numeric enum tag.
pub(crate) fn looks_numeric(text: &str) -> bool {
    let lit = split_literal(text);
    !lit.digits.is_empty() && lit.digits.as_bytes()[0].is_ascii_digit()
}
