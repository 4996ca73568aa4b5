//! Match index: hash chains keyed by the two bytes ending at a position.
//!
//! Three flat arrays form singly-linked lists over input positions:
//!
//! - `first[ctx]`: newest (highest) position not yet consumed for `ctx`
//! - `last[ctx]` : oldest (lowest) position appended for `ctx`
//! - `link[pos]` : next lower position sharing the context of `pos`
//!
//! Position 0 doubles as the "end of chain" marker; it is never indexed
//! because it has no preceding byte to form a full context.
//!
//! The match finder walks positions downwards and consumes the head of the
//! chain for every position it finishes, so at any time `first[ctx]` is the
//! current position itself and `link[first[ctx]]` the nearest older candidate.

use super::types::RleInfo;

/// Number of distinct two-byte contexts.
pub const CONTEXT_COUNT: usize = 1 << 16;

/// Context of `pos`: the byte at `pos` in the high half and the byte just
/// before it in the low half (0 at the buffer start).
#[inline(always)]
pub fn context_at(buf: &[u8], pos: usize) -> usize {
    let low = if pos > 0 { buf[pos - 1] } else { 0 };
    ((buf[pos] as usize) << 8) | low as usize
}

/// Chain tables for one input buffer.
#[derive(Clone, Debug)]
pub struct MatchIndex {
    first: Box<[usize]>,
    last: Box<[usize]>,
    link: Vec<usize>,
}

impl MatchIndex {
    /// Allocate empty tables.
    pub fn new() -> Self {
        Self {
            first: vec![0; CONTEXT_COUNT].into_boxed_slice(),
            last: vec![0; CONTEXT_COUNT].into_boxed_slice(),
            link: Vec::new(),
        }
    }

    /// Allocate and fill the tables for `buf`.
    pub fn build(buf: &[u8], rle: &[RleInfo]) -> Self {
        let mut index = Self::new();
        index.fill(buf, rle);
        index
    }

    /// Refill the tables for `buf`, reusing the fixed-size allocations.
    ///
    /// Inside a run only one representative per shift is linked: the scan
    /// advances by `length - 1` at a run start instead of by one.
    pub fn fill(&mut self, buf: &[u8], rle: &[RleInfo]) {
        debug_assert_eq!(buf.len(), rle.len());
        self.first.fill(0);
        self.last.fill(0);
        self.link.clear();
        self.link.resize(buf.len(), 0);

        if buf.is_empty() {
            return;
        }

        let mut get = buf.len() - 1;
        while get > 0 {
            let ctx = context_at(buf, get);
            if self.first[ctx] == 0 {
                self.first[ctx] = get;
            } else {
                self.link[self.last[ctx]] = get;
            }
            self.last[ctx] = get;

            let step = match rle[get].length {
                0 => 1,
                len => (len - 1).max(1),
            };
            match get.checked_sub(step) {
                Some(g) => get = g,
                None => break,
            }
        }
    }

    /// First older candidate for a position whose context is `ctx`.
    ///
    /// Skips the chain head, which is the position being searched itself.
    #[inline(always)]
    pub fn chain_start(&self, ctx: usize) -> usize {
        self.link[self.first[ctx]]
    }

    /// Next older candidate after `pos`, or 0 at the end of the chain.
    #[inline(always)]
    pub fn next(&self, pos: usize) -> usize {
        self.link[pos]
    }

    /// Drop the chain head for `ctx` once its position has been searched.
    #[inline(always)]
    pub fn spend(&mut self, ctx: usize) {
        self.first[ctx] = self.link[self.first[ctx]];
    }

    /// Current chain head for `ctx` (0 when exhausted).
    #[doc(hidden)]
    pub fn head(&self, ctx: usize) -> usize {
        self.first[ctx]
    }

    /// Oldest position appended for `ctx`.
    #[doc(hidden)]
    pub fn tail(&self, ctx: usize) -> usize {
        self.last[ctx]
    }

    /// Collect the whole remaining chain for `ctx`, newest first.
    #[doc(hidden)]
    pub fn chain(&self, ctx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut pos = self.first[ctx];
        while pos != 0 {
            out.push(pos);
            pos = self.link[pos];
        }
        out
    }
}

impl Default for MatchIndex {
    fn default() -> Self {
        Self::new()
    }
}
