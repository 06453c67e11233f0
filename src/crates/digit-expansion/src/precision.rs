/// Extra digits computed beyond the requested fractional places
pub const MARGIN_DIGITS: usize = 5;

/// Working bits carried by series evaluation on top of the claimed precision
pub const GUARD_BITS: usize = 64;

/// Number of bits a value must be accurate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision {
    bits: usize,
}

impl Precision {
    pub fn from_bits(bits: usize) -> Self {
        Precision { bits }
    }

    /// Precision needed to produce `frac_places` trustworthy digits in `base`,
    /// plus `MARGIN_DIGITS` more.
    ///
    /// Each base-`b` digit is charged `ceil(log2(b))` bits, which slightly
    /// over-provisions bases that are not powers of two.
    pub fn for_expansion(base: u32, frac_places: usize) -> Self {
        Precision {
            bits: (frac_places + MARGIN_DIGITS) * bits_per_digit(base),
        }
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Bits a fixed-point computation should run at to honour this precision
    pub fn working_bits(&self) -> usize {
        self.bits + GUARD_BITS
    }
}

/// `ceil(log2(base))`, never less than one
pub fn bits_per_digit(base: u32) -> usize {
    let bits = u32::BITS - base.saturating_sub(1).leading_zeros();
    bits.max(1) as usize
}
