//! Exact bit-cost model shared by the optimal parser and the encoder.
//!
//! All costs are in emitted bits. The pure `*_bits` functions return `None`
//! for values outside the modelled ranges; the `cost_of_*` wrappers report
//! such values through the [`Notify`] sink and substitute [`INVALID_COST`].

use super::types::{INVALID_COST, NUM_BITS_LONG, NUM_BITS_SHORT};
use crate::notify::{Notify, LEVEL_WARN};

// ─────────────────────────────────────────────────────────────────────────────
// Length codes
// ─────────────────────────────────────────────────────────────────────────────

/// Size of the length code for `len` (1..=255).
///
/// The code spends two bits per significant bit below the leading one, plus
/// a stop bit for values below 128.
#[inline]
pub fn length_bits(len: usize) -> Option<u32> {
    match len {
        1 => Some(1),
        2..=3 => Some(3),
        4..=7 => Some(5),
        8..=15 => Some(7),
        16..=31 => Some(9),
        32..=63 => Some(11),
        64..=127 => Some(13),
        128..=255 => Some(14),
        _ => None,
    }
}

pub fn cost_of_length(len: usize, notify: &mut dyn Notify) -> u32 {
    length_bits(len).unwrap_or_else(|| {
        crate::notify!(notify, LEVEL_WARN, "cost_of_length got wrong value: {}", len);
        INVALID_COST
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Offset ranges
// ─────────────────────────────────────────────────────────────────────────────

/// Which of the four offset ranges a value falls in, and its width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffsetClass {
    /// Two-bit range selector (0..=3).
    pub selector: u32,
    /// Number of magnitude bits following the selector.
    pub bits: u32,
}

/// Offset width table used for a match whose encoded length is `len`
/// (i.e. the real length minus one).
#[inline]
pub fn offset_table(len: usize) -> &'static [u32; 4] {
    if len == 1 {
        &NUM_BITS_SHORT
    } else {
        &NUM_BITS_LONG
    }
}

/// Classify an encoded offset (`offset - 1`) for encoded length `len`.
#[inline]
pub fn classify_offset(offset: usize, len: usize) -> Option<OffsetClass> {
    offset_table(len)
        .iter()
        .position(|&bits| offset < 1 << bits)
        .map(|i| OffsetClass {
            selector: i as u32,
            bits: offset_table(len)[i],
        })
}

/// Magnitude bits for encoded offset `offset` at encoded length `len`.
#[inline]
pub fn offset_bits(offset: usize, len: usize) -> Option<u32> {
    classify_offset(offset, len).map(|c| c.bits)
}

pub fn cost_of_offset(offset: usize, len: usize, notify: &mut dyn Notify) -> u32 {
    offset_bits(offset, len).unwrap_or_else(|| {
        crate::notify!(notify, LEVEL_WARN, "cost_of_offset got wrong offset: {}", offset);
        INVALID_COST
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Token costs
// ─────────────────────────────────────────────────────────────────────────────

/// Bits to emit a match of `len` bytes at distance `offset`.
///
/// copy flag + length code of `len - 1` + two selector bits + offset bits.
pub fn cost_of_match(len: usize, offset: usize, notify: &mut dyn Notify) -> u32 {
    let mut cost = 1;
    cost += cost_of_length(len - 1, notify);
    cost += 2;
    cost += cost_of_offset(offset - 1, len - 1, notify);
    cost
}

/// Cost of a node whose literal run, counted from this position, is
/// `lit_len` long, given the cost `old_cost` of the following node.
///
/// Charges 8 bits for the byte, plus the approximate growth of the literal
/// length code at its bit boundaries. The approximation is known to favour
/// short matches over long literal runs on hard-to-crunch data; existing
/// archives depend on it, so it stays as is.
pub fn cost_of_literal(old_cost: u32, lit_len: usize) -> u32 {
    let mut cost = old_cost + 8;
    cost += match lit_len {
        1 | 128 => 1,
        2 | 4 | 8 | 16 | 32 | 64 => 2,
        _ => 0,
    };
    cost
}
