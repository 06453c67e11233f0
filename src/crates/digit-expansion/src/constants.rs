//! Fixed-point evaluation of the constants and functions a source can name
//!
//! Every routine returns a `BigInt` mantissa scaled by `2^bits`. Series are
//! summed until their terms underflow to zero; each term contributes at most
//! one ulp of truncation error, which the caller's guard bits absorb.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

fn one(bits: usize) -> BigInt {
    BigInt::one() << bits
}

/// `atan(1/k)` by its Taylor series
fn atan_inverse(k: u32, bits: usize) -> BigInt {
    let k = BigInt::from(k);
    let k_squared = &k * &k;

    let mut power = one(bits) / &k;
    let mut sum = power.clone();
    let mut n: u64 = 1;
    let mut subtract = true;
    loop {
        power /= &k_squared;
        if power.is_zero() {
            break;
        }
        n += 2;
        let term = &power / BigInt::from(n);
        if subtract {
            sum -= term;
        } else {
            sum += term;
        }
        subtract = !subtract;
    }
    sum
}

/// `atanh(y)` for a fixed-point `0 <= y < 1`
fn atanh(y: &BigInt, bits: usize) -> BigInt {
    let y_squared = (y * y) >> bits;

    let mut power = y.clone();
    let mut sum = y.clone();
    let mut n: u64 = 1;
    loop {
        power = (&power * &y_squared) >> bits;
        if power.is_zero() {
            break;
        }
        n += 2;
        sum += &power / BigInt::from(n);
    }
    sum
}

/// Machin's formula: `pi = 16 atan(1/5) - 4 atan(1/239)`
pub fn pi(bits: usize) -> BigInt {
    (atan_inverse(5, bits) << 4usize) - (atan_inverse(239, bits) << 2usize)
}

/// `e = sum 1/n!`
pub fn e(bits: usize) -> BigInt {
    let mut term = one(bits);
    let mut sum = term.clone();
    let mut n: u64 = 1;
    loop {
        term /= BigInt::from(n);
        if term.is_zero() {
            break;
        }
        sum += &term;
        n += 1;
    }
    sum
}

/// Golden ratio `(1 + sqrt 5) / 2`
pub fn phi(bits: usize) -> BigInt {
    let root_five = sqrt(&BigRational::from_integer(BigInt::from(5)), bits);
    (one(bits) + root_five) >> 1usize
}

/// Square root of a non-negative rational, truncated to the fixed-point grid
pub fn sqrt(x: &BigRational, bits: usize) -> BigInt {
    let scaled = (x.numer().clone() << (2 * bits)) / x.denom();
    scaled.sqrt()
}

/// `ln 2 = 2 atanh(1/3)`
pub fn ln2(bits: usize) -> BigInt {
    atanh(&(one(bits) / BigInt::from(3)), bits) << 1usize
}

/// Natural logarithm of a positive rational
///
/// `x` is split exactly as `m * 2^k` with `1 <= m < 2`, then
/// `ln x = 2 atanh((m - 1) / (m + 1)) + k ln 2`; the atanh argument stays
/// below 1/3 so the series gains over three bits per term.
pub fn ln(x: &BigRational, bits: usize) -> BigInt {
    let mut numer = x.numer().clone();
    let mut denom = x.denom().clone();

    let mut k = numer.bits() as i64 - denom.bits() as i64;
    if k > 0 {
        denom = denom << (k as usize);
    } else if k < 0 {
        numer = numer << ((-k) as usize);
    }
    if numer < denom {
        numer = numer << 1usize;
        k -= 1;
    }

    let y = ((&numer - &denom) << bits) / (&numer + &denom);
    let ln_m = atanh(&y, bits) << 1usize;
    ln_m + ln2(bits) * BigInt::from(k)
}
