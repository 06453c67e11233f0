use crate::constants;
use crate::error::{ExpansionError, Result};
use crate::precision::Precision;
use crate::real::Real;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// A number the user asked to hear
#[derive(Debug, Clone, PartialEq)]
pub enum NumberSource {
    /// Archimedes' constant
    Pi,
    /// Euler's number
    E,
    /// Golden ratio
    Phi,
    /// Natural logarithm of a positive literal
    Ln(Real),
    /// Square root of a non-negative literal
    Sqrt(Real),
    /// A decimal literal, expanded exactly
    Literal(Real),
}

impl NumberSource {
    /// Evaluate the source to at least `precision`
    ///
    /// Literals come back exact; everything else is computed in fixed point at
    /// `precision.working_bits()` and tagged with `precision.bits()` accuracy.
    pub fn evaluate(&self, precision: Precision) -> Result<Real> {
        let bits = precision.working_bits();
        let mantissa = match self {
            NumberSource::Pi => constants::pi(bits),
            NumberSource::E => constants::e(bits),
            NumberSource::Phi => constants::phi(bits),
            NumberSource::Ln(arg) => {
                if !arg.is_positive() {
                    return Err(ExpansionError::invalid(format!(
                        "ln is undefined for {}",
                        arg
                    )));
                }
                constants::ln(arg.value(), bits)
            }
            NumberSource::Sqrt(arg) => {
                if arg.is_negative() {
                    return Err(ExpansionError::invalid(format!(
                        "sqrt is undefined for {}",
                        arg
                    )));
                }
                constants::sqrt(arg.value(), bits)
            }
            NumberSource::Literal(value) => return Ok(value.clone()),
        };

        let value = Real::approximate(mantissa, bits, precision.bits());
        debug!("Evaluated {} ~ {} at {} working bits", self, value.to_f64(), bits);
        Ok(value)
    }
}

impl fmt::Display for NumberSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberSource::Pi => write!(f, "pi"),
            NumberSource::E => write!(f, "e"),
            NumberSource::Phi => write!(f, "phi"),
            NumberSource::Ln(arg) => write!(f, "ln({})", arg),
            NumberSource::Sqrt(arg) => write!(f, "sqrt({})", arg),
            NumberSource::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// `ln(2.5)` -> `Some("2.5")` for `name == "ln"`
fn call_argument<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

impl FromStr for NumberSource {
    type Err = ExpansionError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_lowercase();
        let unrecognized = || ExpansionError::unsupported(format!("Unrecognized number: {}", s.trim()));

        match text.as_str() {
            "pi" | "π" => return Ok(NumberSource::Pi),
            "e" => return Ok(NumberSource::E),
            "phi" | "φ" => return Ok(NumberSource::Phi),
            _ => {}
        }

        if let Some(arg) = call_argument(&text, "ln") {
            return arg.parse().map(NumberSource::Ln).map_err(|_| unrecognized());
        }
        if let Some(arg) = call_argument(&text, "sqrt") {
            return arg.parse().map(NumberSource::Sqrt).map_err(|_| unrecognized());
        }

        text.parse()
            .map(NumberSource::Literal)
            .map_err(|_| unrecognized())
    }
}
