//! Positional expansion of a `Real` in bases 2 through 36

use crate::error::{ExpansionError, Result};
use crate::precision::Precision;
use crate::real::{Accuracy, Real};
use log::trace;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;

/// Digit characters, lowest value first
pub const DIGIT_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// A number written out in some base, digits most significant first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub negative: bool,
    /// Never empty; zero is a single `0`
    pub integer: Vec<u8>,
    /// Exactly as many digits as were requested, truncated
    pub fraction: Vec<u8>,
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |digits: &[u8]| -> String {
            digits
                .iter()
                .map(|&d| DIGIT_ALPHABET[d as usize] as char)
                .collect()
        };

        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", render(&self.integer))?;
        if !self.fraction.is_empty() {
            write!(f, ".{}", render(&self.fraction))?;
        }
        Ok(())
    }
}

pub(crate) fn check_base(base: u32) -> Result<()> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(ExpansionError::invalid(format!(
            "base must be between {} and {}, got {}",
            MIN_BASE, MAX_BASE, base
        )));
    }
    Ok(())
}

/// Expand `x` in `base` with exactly `frac_places` fractional digits
///
/// Digits are truncated, never rounded. An approximate `x` must carry at
/// least `Precision::for_expansion(base, frac_places)` bits, otherwise the
/// trailing digits could not be trusted and the call fails.
pub fn expand(x: &Real, base: u32, frac_places: usize) -> Result<Expansion> {
    check_base(base)?;

    let required = Precision::for_expansion(base, frac_places);
    if let Accuracy::Bits(carried) = x.accuracy() {
        if !x.accuracy().supports(required) {
            return Err(ExpansionError::invalid(format!(
                "{} base-{} digits need {} bits of precision, value carries {}",
                frac_places,
                base,
                required.bits(),
                carried
            )));
        }
    }

    let magnitude = x.value().abs();
    let denom = magnitude.denom();
    let (whole, mut remainder) = magnitude.numer().div_rem(denom);

    let integer = if whole.is_zero() {
        vec![0]
    } else {
        whole.to_radix_be(base).1
    };

    let radix = BigInt::from(base);
    let mut fraction = Vec::with_capacity(frac_places);
    for _ in 0..frac_places {
        remainder *= &radix;
        let (digit, rest) = remainder.div_rem(denom);
        let digit = digit
            .to_u8()
            .ok_or_else(|| ExpansionError::invalid(format!("digit {} outside base {}", digit, base)))?;
        fraction.push(digit);
        remainder = rest;
    }

    trace!(
        "Expanded to {} integer and {} fractional base-{} digits",
        integer.len(),
        fraction.len(),
        base
    );

    Ok(Expansion {
        negative: x.is_negative(),
        integer,
        fraction,
    })
}

/// `[-]<integer-digits>[.<fractional-digits>]` in `base`, uppercase
pub fn to_base(x: &Real, base: u32, frac_places: usize) -> Result<String> {
    Ok(expand(x, base, frac_places)?.to_string())
}

/// Read back a string produced by [`to_base`] as an exact rational
pub fn parse_in_base(text: &str, base: u32) -> Result<BigRational> {
    check_base(base)?;

    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    if whole.is_empty() {
        return Err(ExpansionError::invalid(format!("'{}' has no integer digits", text)));
    }

    let radix = BigInt::from(base);
    let mut numer = BigInt::zero();
    let mut denom = BigInt::one();
    let digit_value = |ch: char| {
        ch.to_digit(base).ok_or_else(|| {
            ExpansionError::invalid(format!("'{}' is not a base-{} digit in '{}'", ch, base, text))
        })
    };
    for ch in whole.chars() {
        numer = numer * &radix + BigInt::from(digit_value(ch)?);
    }
    for ch in fraction.chars() {
        numer = numer * &radix + BigInt::from(digit_value(ch)?);
        denom *= &radix;
    }

    let value = BigRational::new(numer, denom);
    Ok(if negative { -value } else { value })
}
