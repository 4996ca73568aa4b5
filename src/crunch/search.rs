//! Match finder.
//!
//! [`MatchFinder::find`] is called once per position, from the end of the
//! buffer down to 0. For each position it fills a [`MatchSet`] with the best
//! known match of every length. Matches are found by extending *backwards*
//! from the current position `get`: a match of length `len` at offset `off`
//! asserts `buf[get - k] == buf[get - off - k]` for `k in 0..len`.
//!
//! Two search paths:
//!
//! 1. **Plain**: walk the context chain, extend each candidate byte by byte,
//!    and offer every improvement to all shorter lengths (first writer wins).
//! 2. **RLE**: the position is inside a run. Register the run against itself
//!    (offset 1), then look for older runs of at least the same length and
//!    for matches that continue past the run into its terminating byte.
//!    Interior run positions inherit a shortened record instead of being
//!    indexed, and the chain head is only consumed at the run's last byte.

use super::index::{context_at, MatchIndex};
use super::rle;
use super::types::{MatchSet, RleInfo, MAX_MATCH_LEN, MAX_OFFSET, MAX_OFFSET_SHORT};

/// Per-buffer match finder state: RLE records, chain tables and input.
pub struct MatchFinder<'a> {
    buf: &'a [u8],
    rle: Vec<RleInfo>,
    index: MatchIndex,
}

impl<'a> MatchFinder<'a> {
    /// Analyse `buf` and build its match index.
    pub fn new(buf: &'a [u8]) -> Self {
        let rle = rle::analyze(buf);
        let index = MatchIndex::build(buf, &rle);
        Self { buf, rle, index }
    }

    /// Like [`new`](Self::new) but refills an existing index allocation.
    pub fn with_index(buf: &'a [u8], mut index: MatchIndex) -> Self {
        let rle = rle::analyze(buf);
        index.fill(buf, &rle);
        Self { buf, rle, index }
    }

    /// Hand the index allocation back for reuse.
    pub fn into_index(self) -> MatchIndex {
        self.index
    }

    /// RLE record currently in effect for `pos`.
    #[doc(hidden)]
    pub fn rle_at(&self, pos: usize) -> RleInfo {
        self.rle[pos]
    }

    /// Fill `matches` with the candidates for position `get`.
    ///
    /// Must be called for every position exactly once, in descending order:
    /// it consumes chain entries and propagates run records downwards.
    pub fn find(&mut self, get: usize, matches: &mut MatchSet) {
        matches.clear();

        let ctx = context_at(self.buf, get);
        let scn = self.index.chain_start(ctx);
        let here = self.rle[get];

        if here.length == 0 {
            self.scan_plain(get, scn, matches);
            self.index.spend(ctx);
            return;
        }

        self.scan_rle(get, scn, here, matches);

        if here.length > 2 {
            // Next position is still inside the run, one byte shorter.
            self.rle[get - 1] = RleInfo {
                length: here.length - 1,
                value_after: here.value_after,
            };
        } else {
            self.index.spend(ctx);
        }
    }

    fn scan_plain(&self, get: usize, mut scn: usize, matches: &mut MatchSet) {
        let buf = self.buf;
        let mut longest = 0;

        while scn > 0 && get - scn <= MAX_OFFSET && longest < MAX_MATCH_LEN {
            debug_assert!(scn < get);

            // The shared context guarantees two equal bytes.
            let mut len = 2;
            while len < MAX_MATCH_LEN && scn >= len && buf[scn - len] == buf[get - len] {
                len += 1;
            }

            if len > longest {
                longest = len;
                matches.offer(len, get - scn);
            }

            scn = self.index.next(scn);
        }
    }

    fn scan_rle(&self, get: usize, mut scn: usize, here: RleInfo, matches: &mut MatchSet) {
        let buf = self.buf;
        let rle_len = here.length;
        let mut longest = 0;

        // A run always matches itself one byte back.
        let self_len = rle_len - 1;
        if self_len > 1 {
            let len = self_len.min(MAX_MATCH_LEN);
            longest = len;
            for l in 2..=len {
                matches.set(l, 1);
            }
        }

        while scn > 0 && get - scn <= MAX_OFFSET && longest < MAX_MATCH_LEN {
            debug_assert!(scn < get);
            let other = self.rle[scn];

            // An older run of the same byte, as long as this one allows.
            if other.length > longest && rle_len > longest {
                let offset = get - scn;
                let len = other.length.min(rle_len);
                if len > 2 || (len == 2 && offset <= MAX_OFFSET_SHORT) {
                    matches.set(len, offset);
                    longest = len;
                }
            }

            // An older run ending in the same byte: align the run ends and
            // keep comparing past them.
            if other.length >= rle_len && other.value_after == here.value_after {
                let offset = get - scn + other.length - rle_len;
                if offset <= MAX_OFFSET {
                    let mut len = rle_len;
                    while len < MAX_MATCH_LEN
                        && get >= offset + len
                        && buf[get - offset - len] == buf[get - len]
                    {
                        len += 1;
                    }

                    if len > longest {
                        longest = len;
                        matches.offer(len, offset);
                    }
                }
            }

            scn = self.index.next(scn);
        }
    }
}
