//! Cruncher constants, per-position records, and the error type.
//!
//! The offset ranges mirror the decruncher's four-entry bit-width tables:
//!   - short table (match length 2):   3 / 6 / 8 / 10 bits
//!   - long table  (match length 3+):  4 / 7 / 10 / 13 bits
//!
//! Records in this module are plain `Copy` values stored in position-indexed
//! arenas (`Vec<RleInfo>`, `Vec<ParseNode>`), never individually boxed.

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Memory image constants
// ─────────────────────────────────────────────────────────────────────────────

/// Size of the target machine's address space.
pub const MEM_SIZE: usize = 0x10000;

/// Bytes taken by the little-endian load address in front of every PRG image.
pub const PRG_HEADER_SIZE: usize = 2;

/// Largest payload (excluding the load address) the cruncher accepts.
pub const MAX_INPUT_SIZE: usize = 0xFFFF - PRG_HEADER_SIZE;

// ─────────────────────────────────────────────────────────────────────────────
// Offset tables
// ─────────────────────────────────────────────────────────────────────────────

/// Bit widths of the four offset ranges used by length-2 matches.
pub const NUM_BITS_SHORT: [u32; 4] = [3, 6, 8, 10];

/// Bit widths of the four offset ranges used by matches of length 3 and up.
pub const NUM_BITS_LONG: [u32; 4] = [4, 7, 10, 13];

/// Largest back-reference distance (inclusive) any match may use.
pub const MAX_OFFSET: usize = 1 << NUM_BITS_LONG[3]; // 8192

/// Largest back-reference distance (inclusive) a length-2 match may use.
pub const MAX_OFFSET_SHORT: usize = 1 << NUM_BITS_SHORT[3]; // 1024

// ─────────────────────────────────────────────────────────────────────────────
// Length limits
// ─────────────────────────────────────────────────────────────────────────────

/// Longest match the bitstream can express.
pub const MAX_MATCH_LEN: usize = 255;

/// Longest literal chunk emitted under a single length code.
pub const MAX_LITERAL_CHUNK: usize = 255;

/// Length code value reserved as the end-of-stream marker.
pub const END_OF_STREAM: usize = 0xFF;

/// Cost assigned to length/offset values outside every modelled range.
///
/// Large enough that the optimal parser never prefers such a choice.
pub const INVALID_COST: u32 = 10_000;

// ─────────────────────────────────────────────────────────────────────────────
// RleInfo
// ─────────────────────────────────────────────────────────────────────────────

/// Run-length record for one input position.
///
/// `length` is the number of equal bytes starting at the position and
/// extending towards lower indices (0 = not a run start). `value_after` is the
/// byte that terminates the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RleInfo {
    pub length: usize,
    pub value_after: u8,
}

// ─────────────────────────────────────────────────────────────────────────────
// Match / MatchSet
// ─────────────────────────────────────────────────────────────────────────────

/// A back-reference candidate. `length == 0` marks an empty slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Match {
    pub length: usize,
    pub offset: usize,
}

/// Best known match per exact length at the current scan position.
///
/// Slot `len` holds a match of exactly `len` bytes. Slots 0 and 1 are never
/// filled.
#[derive(Clone, Debug)]
pub struct MatchSet {
    slots: [Match; MAX_MATCH_LEN + 1],
}

impl MatchSet {
    pub fn new() -> Self {
        Self {
            slots: [Match::default(); MAX_MATCH_LEN + 1],
        }
    }

    /// Empty every slot.
    #[inline]
    pub fn clear(&mut self) {
        self.slots.fill(Match::default());
    }

    /// Return the candidate of exactly `len` bytes, if any.
    #[inline]
    pub fn get(&self, len: usize) -> Option<Match> {
        let m = self.slots[len];
        (m.length != 0).then_some(m)
    }

    /// Unconditionally store `offset` as the candidate for `len`.
    #[inline]
    pub fn set(&mut self, len: usize, offset: usize) {
        debug_assert!((2..=MAX_MATCH_LEN).contains(&len));
        self.slots[len] = Match { length: len, offset };
    }

    /// Offer a match of `len` bytes at `offset` to every shorter length too.
    ///
    /// Walks down from `len` and stops at the first slot that is already
    /// taken, so earlier (nearer) candidates are never displaced. A length-2
    /// slot is only filled when `offset` fits the short offset table.
    pub fn offer(&mut self, mut len: usize, offset: usize) {
        while len >= 2 && self.slots[len].length == 0 {
            if len > 2 || offset <= MAX_OFFSET_SHORT {
                self.set(len, offset);
            }
            len -= 1;
        }
    }

    /// Iterate over the filled slots, longest first.
    pub fn iter_longest_first(&self) -> impl Iterator<Item = Match> + '_ {
        self.slots.iter().rev().copied().filter(|m| m.length != 0)
    }

    /// Number of filled slots.
    #[doc(hidden)]
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|m| m.length != 0).count()
    }
}

impl Default for MatchSet {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ParseNode
// ─────────────────────────────────────────────────────────────────────────────

/// One node of the optimal-parse table.
///
/// `cost` is the minimum number of bits needed to encode the input from this
/// position to the end; 0 means the node has not been reached yet. `next` is
/// the position after the chosen token. `lit_len` is 0 for a match, otherwise
/// the number of literals in the run starting here. `offset` is only
/// meaningful for matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseNode {
    pub cost: u32,
    pub next: usize,
    pub lit_len: usize,
    pub offset: usize,
}

impl ParseNode {
    #[inline]
    pub fn is_match(&self) -> bool {
        self.lit_len == 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors reported by the crunch entry points before any work is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrunchError {
    /// Target address outside `0..=0xFFFF`.
    InvalidAddress(i64),
    /// Target address string is not an integer.
    InvalidAddressSyntax(String),
    /// Input is shorter than the two-byte load address.
    InputTooShort(usize),
    /// Payload exceeds [`MAX_INPUT_SIZE`].
    InputTooLarge(usize),
}

impl fmt::Display for CrunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrunchError::InvalidAddress(a) => {
                write!(f, "address {} is outside the range $0000-$ffff", a)
            }
            CrunchError::InvalidAddressSyntax(s) => write!(f, "address '{}' is not an integer", s),
            CrunchError::InputTooShort(n) => {
                write!(f, "input of {} bytes has no load address", n)
            }
            CrunchError::InputTooLarge(n) => write!(
                f,
                "payload of {} bytes exceeds the {} byte limit",
                n, MAX_INPUT_SIZE
            ),
        }
    }
}

impl std::error::Error for CrunchError {}
