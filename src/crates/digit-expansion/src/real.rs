use crate::error::{ExpansionError, Result};
use crate::precision::Precision;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive};
use std::fmt;
use std::str::FromStr;

/// Largest decimal exponent accepted in a literal such as `1e300`
const MAX_LITERAL_EXPONENT: u64 = 10_000;

/// How close a `Real` is known to be to the number it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    /// The value is the number itself
    Exact,
    /// Absolute error is below `2^-bits`
    Bits(usize),
}

impl Accuracy {
    /// Whether a value with this accuracy can be expanded at `precision`
    pub fn supports(&self, precision: Precision) -> bool {
        match self {
            Accuracy::Exact => true,
            Accuracy::Bits(bits) => *bits >= precision.bits(),
        }
    }
}

/// Real number held as an exact rational together with its accuracy
#[derive(Debug, Clone, PartialEq)]
pub struct Real {
    value: BigRational,
    accuracy: Accuracy,
}

impl Real {
    pub fn exact(value: BigRational) -> Self {
        Real {
            value,
            accuracy: Accuracy::Exact,
        }
    }

    pub fn from_int(n: i64) -> Self {
        Real::exact(BigRational::from_integer(BigInt::from(n)))
    }

    /// Exact binary value of a finite float
    pub fn from_f64(f: f64) -> Result<Self> {
        BigRational::from_float(f)
            .map(Real::exact)
            .ok_or_else(|| ExpansionError::invalid(format!("{} is not a finite number", f)))
    }

    /// Fixed-point value `mantissa / 2^scale_bits`, trusted to `accuracy_bits`
    pub fn approximate(mantissa: BigInt, scale_bits: usize, accuracy_bits: usize) -> Self {
        Real {
            value: BigRational::new(mantissa, BigInt::one() << scale_bits),
            accuracy: Accuracy::Bits(accuracy_bits.min(scale_bits)),
        }
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.value.is_positive()
    }

    /// Nearest `f64`, for display only; NaN if it does not fit
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_integer() {
            write!(f, "{}", self.value.numer())
        } else {
            write!(f, "{}/{}", self.value.numer(), self.value.denom())
        }
    }
}

/// Parses a decimal literal: optional sign, digits with an optional point,
/// optional exponent (`-12.5`, `.25`, `3e-2`). The result is exact.
impl FromStr for Real {
    type Err = ExpansionError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let not_a_number = || ExpansionError::invalid(format!("'{}' is not a decimal number", text));

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(idx) => {
                let exponent: i64 = unsigned[idx + 1..].parse().map_err(|_| not_a_number())?;
                (&unsigned[..idx], exponent)
            }
            None => (unsigned, 0),
        };
        if exponent.unsigned_abs() > MAX_LITERAL_EXPONENT {
            return Err(ExpansionError::invalid(format!(
                "exponent of '{}' exceeds {}",
                text, MAX_LITERAL_EXPONENT
            )));
        }

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(not_a_number());
        }

        let digits = format!("{}{}", whole, fraction);
        let numer = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(not_a_number)?;
        let numer = if negative { -numer } else { numer };

        let scale = fraction.len() as i64 - exponent;
        let ten = BigInt::from(10);
        let value = if scale >= 0 {
            BigRational::new(numer, num_traits::pow(ten, scale as usize))
        } else {
            BigRational::from_integer(numer * num_traits::pow(ten, (-scale) as usize))
        };

        Ok(Real::exact(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn test_parse_plain_decimals() {
        let x: Real = "3.25".parse().unwrap();
        assert_eq!(x.value(), &ratio(13, 4));
        assert_eq!(x.accuracy(), Accuracy::Exact);

        let y: Real = "-12.75".parse().unwrap();
        assert_eq!(y.value(), &ratio(-51, 4));
        assert!(y.is_negative());
    }

    #[test]
    fn test_parse_partial_forms() {
        assert_eq!("0.25".parse::<Real>().unwrap(), ".25".parse::<Real>().unwrap());
        assert_eq!("7.".parse::<Real>().unwrap(), Real::from_int(7));
        assert_eq!("+42".parse::<Real>().unwrap(), Real::from_int(42));
    }

    #[test]
    fn test_parse_exponent() {
        let x: Real = "3e-2".parse().unwrap();
        assert_eq!(x.value(), &ratio(3, 100));

        let y: Real = "1.5E3".parse().unwrap();
        assert_eq!(y, Real::from_int(1500));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Real>().is_err());
        assert!(".".parse::<Real>().is_err());
        assert!("abc".parse::<Real>().is_err());
        assert!("1.2.3".parse::<Real>().is_err());
        assert!("e5".parse::<Real>().is_err());
        assert!("1e99999".parse::<Real>().is_err());
    }

    #[test]
    fn test_from_f64_is_exact() {
        let x = Real::from_f64(0.375).unwrap();
        assert_eq!(x.value(), &ratio(3, 8));
        assert!(Real::from_f64(f64::NAN).is_err());
        assert!(Real::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_approximate_accuracy() {
        let x = Real::approximate(BigInt::from(3) << 10usize, 10, 8);
        assert_eq!(x, Real {
            value: ratio(3, 1),
            accuracy: Accuracy::Bits(8),
        });
        assert!(x.accuracy().supports(Precision::from_bits(8)));
        assert!(!x.accuracy().supports(Precision::from_bits(9)));
        assert!(Accuracy::Exact.supports(Precision::from_bits(1_000_000)));
    }

    #[test]
    fn test_to_f64() {
        assert_eq!("2.5".parse::<Real>().unwrap().to_f64(), 2.5);
        assert_eq!(Real::from_int(-3).to_f64(), -3.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Real::from_int(-3).to_string(), "-3");
        assert_eq!("2.5".parse::<Real>().unwrap().to_string(), "5/2");
    }
}
