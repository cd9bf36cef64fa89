//! Sample decoding
//!
//! Bit accumulation and the 24-bit to 32-bit sign extension.
//!
//! The accumulator is OR-ed then shifted for every bit, so after 24 bits
//! the sample sits in bits 1..=24 with a trailing zero in bit 0. The
//! sign test looks at bit 19 of the inverted word (or the `0x7FFFFF`
//! sentinel) rather than bit 23. Both quirks are kept bit-for-bit so that
//! decoded values match existing calibrations.

use core::num::NonZeroU8;

/// Mask for the 24 data bits
pub const DATA_MASK: u32 = 0x00FF_FFFF;

/// Bit inspected in the inverted word to pick negative padding
pub const SIGN_TEST_MASK: u32 = 0x0008_0000;

/// Inverted value that also selects negative padding
pub const SIGN_SENTINEL: u32 = 0x007F_FFFF;

/// Fold one sampled data bit into the accumulator
#[inline]
pub const fn accumulate_bit(acc: u32, bit: bool) -> u32 {
    (acc | bit as u32) << 1
}

/// Accumulator produced by shifting in `bits` (MSB first)
///
/// Only the low 24 bits of `bits` are used.
pub const fn accumulate_word(bits: u32) -> u32 {
    let mut acc = 0u32;
    let mut i = 24;
    while i > 0 {
        i -= 1;
        acc = accumulate_bit(acc, (bits >> i) & 1 == 1);
    }
    acc
}

/// Decode a raw accumulator (raw bias already removed) to a signed value
///
/// The zero point is *not* applied here.
pub const fn decode(raw: u32) -> i32 {
    let inverted = raw ^ DATA_MASK;

    let padding: u32 = if (inverted & SIGN_TEST_MASK) != 0 || inverted == SIGN_SENTINEL {
        0xFF
    } else {
        0x00
    };

    let padded = inverted | (padding << 24);
    padded.wrapping_add(1) as i32
}

/// Truncating mean of `count` samples pulled from `next`
///
/// Samples are summed in 64 bits so no combination of `i32` inputs can
/// overflow; the quotient truncates toward zero.
pub fn truncating_mean<E>(
    count: NonZeroU8,
    mut next: impl FnMut() -> Result<i32, E>,
) -> Result<i32, E> {
    let mut sum: i64 = 0;
    for _ in 0..count.get() {
        sum += i64::from(next()?);
    }
    Ok((sum / i64::from(count.get())) as i32)
}
