//! Arbitrary-precision digit expansion of real numbers
//!
//! This crate turns a number (a decimal literal, or a named constant such as
//! pi, e or the golden ratio, or `ln(x)` / `sqrt(x)`) into its positional
//! expansion in any base from 2 to 36. Values are held as exact rationals;
//! irrational values are computed in fixed point with enough bits that every
//! requested digit is trustworthy.
//!
//! # Examples
//!
//! ```
//! use digit_expansion::{fractional_digits, to_base, NumberSource, Real};
//!
//! let x: Real = "255.5".parse().unwrap();
//! assert_eq!(to_base(&x, 16, 3).unwrap(), "FF.800");
//!
//! let pi: NumberSource = "pi".parse().unwrap();
//! assert_eq!(fractional_digits(&pi, 7, 5).unwrap(), vec![0, 6, 6, 3, 6]);
//! ```
//!
//! # Main Components
//!
//! - **Real**: exact rational value plus the accuracy it is known to
//! - **Precision**: bit budget needed for a given base and digit count
//! - **NumberSource**: parsed description of the number to expand
//! - **to_base / expand**: the base converter itself

pub mod constants;
pub mod convert;
pub mod digits;
pub mod error;
pub mod precision;
pub mod real;
pub mod source;

pub use convert::{expand, parse_in_base, to_base, Expansion, DIGIT_ALPHABET, MAX_BASE, MIN_BASE};
pub use digits::fractional_digits;
pub use error::{ExpansionError, Result};
pub use precision::{Precision, GUARD_BITS, MARGIN_DIGITS};
pub use real::{Accuracy, Real};
pub use source::NumberSource;
