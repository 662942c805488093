//! UTF-8 encoding of decoded `\u` escapes and UTF-16 surrogate pairing.
//!
//! Escapes are decoded to raw code units and encoded with [`encode_utf8`],
//! which is deliberately more permissive than [`char::encode_utf8`]: lone
//! surrogates are encoded as their three-byte form (the way WTF-8 does) and
//! no upper bound is checked. U+0000 encodes to nothing, so decoded strings
//! never carry NUL bytes.

use core::ops::RangeInclusive;

pub(crate) const HIGH_SURROGATES: RangeInclusive<u32> = 0xD800..=0xDBFF;
pub(crate) const LOW_SURROGATES: RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// `(0xD800 << 10) + 0xDC00 - 0x10000`
const SURROGATE_OFFSET: u32 = 0x035F_DC00;

/// Encodes `cp` into `buf`, returning the written prefix.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn encode_utf8(cp: u32, buf: &mut [u8; 4]) -> &[u8] {
    let len = match cp {
        0 => 0,
        0x01..=0x7F => {
            buf[0] = cp as u8;
            1
        }
        0x80..=0x07FF => {
            buf[0] = 0xC0 | ((cp >> 6) & 0x1F) as u8;
            buf[1] = 0x80 | (cp & 0x3F) as u8;
            2
        }
        0x0800..=0xFFFF => {
            buf[0] = 0xE0 | ((cp >> 12) & 0x0F) as u8;
            buf[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            buf[2] = 0x80 | (cp & 0x3F) as u8;
            3
        }
        _ => {
            buf[0] = 0xF0 | ((cp >> 18) & 0x07) as u8;
            buf[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            buf[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            buf[3] = 0x80 | (cp & 0x3F) as u8;
            4
        }
    };
    &buf[..len]
}

#[inline]
pub(crate) fn is_high_surrogate(unit: u32) -> bool {
    HIGH_SURROGATES.contains(&unit)
}

/// Outcome of pairing a high surrogate with the `\u` escape that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Surrogates {
    /// A valid pair, combined into one scalar value above U+FFFF.
    Combined(u32),
    /// The second unit is not a low surrogate; both are encoded as they are.
    Unpaired(u32, u32),
}

pub(crate) fn pair_surrogates(high: u32, low: u32) -> Surrogates {
    if LOW_SURROGATES.contains(&low) {
        Surrogates::Combined((high << 10) + low - SURROGATE_OFFSET)
    } else {
        Surrogates::Unpaired(high, low)
    }
}
