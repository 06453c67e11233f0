use crate::convert::{check_base, expand};
use crate::error::Result;
use crate::precision::Precision;
use crate::source::NumberSource;
use log::debug;

/// The first `count` digits after the radix point of `source` in `base`
///
/// Each value is in `[0, base)`, most significant first. The source is
/// evaluated with `Precision::for_expansion(base, count)`, so every returned
/// digit is backed by the margin.
pub fn fractional_digits(source: &NumberSource, base: u32, count: usize) -> Result<Vec<u8>> {
    check_base(base)?;

    let precision = Precision::for_expansion(base, count);
    debug!(
        "Expanding {} to {} base-{} digits ({} bits)",
        source,
        count,
        base,
        precision.bits()
    );

    let value = source.evaluate(precision)?;
    Ok(expand(&value, base, count)?.fraction)
}
