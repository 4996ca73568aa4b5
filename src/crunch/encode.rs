//! Bitstream encoder.
//!
//! Bits and whole bytes share one output buffer. Bits are packed MSB-first
//! into a "bit byte" whose slot is reserved in the output at the moment the
//! first bit of it is needed; whole bytes (literals, low offset bytes) are
//! appended directly. The decruncher mirrors this exactly: it fetches a new
//! bit byte only when it runs out of bits.
//!
//! Token layout:
//!
//! | token   | bits                                                         |
//! |---------|--------------------------------------------------------------|
//! | match   | `1` (elided right after a short literal run), length code of |
//! |         | `len - 1`, 2 selector bits, offset magnitude                 |
//! | literal | `0`, length code of the chunk (1..=255), raw bytes           |
//! | end     | `1`, length code of 255, zero padding                        |

use super::cost::classify_offset;
use super::types::{ParseNode, END_OF_STREAM, MAX_LITERAL_CHUNK, MEM_SIZE};
use crate::notify::{Notify, LEVEL_TRACE, LEVEL_WARN};

// ─────────────────────────────────────────────────────────────────────────────
// BitWriter
// ─────────────────────────────────────────────────────────────────────────────

/// Output buffer with a bit cursor and a byte cursor.
#[derive(Debug, Clone)]
pub struct BitWriter {
    buf: Vec<u8>,
    cur_byte: u8,
    /// Free bits left in `cur_byte`.
    cur_cnt: u32,
    /// Where `cur_byte` will be stored.
    cur_index: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(MEM_SIZE);
        buf.push(0);
        Self {
            buf,
            cur_byte: 0,
            cur_cnt: 8,
            cur_index: 0,
        }
    }

    /// Bytes reserved or written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        if self.cur_cnt == 0 {
            self.buf[self.cur_index] = self.cur_byte;
            self.cur_index = self.buf.len();
            self.buf.push(0);
            self.cur_cnt = 8;
            self.cur_byte = 0;
        }
        self.cur_byte = (self.cur_byte << 1) | bit as u8;
        self.cur_cnt -= 1;
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.buf.push(b);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Length code for `len` (1..=255).
    ///
    /// After the implicit leading one, every lower bit is sent as a `1`
    /// continue bit followed by the bit itself. Values below 128 end with a
    /// `0`; for 128 and up the code is self-terminating.
    pub fn write_length(&mut self, len: usize) {
        debug_assert!((1..=255).contains(&len));
        let mut bit = 0x80;
        while bit > 1 && len & bit == 0 {
            bit >>= 1;
        }

        while bit > 1 {
            self.write_bit(true);
            bit >>= 1;
            self.write_bit(len & bit != 0);
        }

        if len < 0x80 {
            self.write_bit(false);
        }
    }

    /// Offset code for encoded offset `offset` (real offset - 1) at encoded
    /// length `len` (real length - 1).
    ///
    /// Two selector bits, then the magnitude. Wide ranges send the bits above
    /// the low byte one by one and the low byte whole and inverted; narrow
    /// ranges send every bit inverted.
    pub fn write_offset(&mut self, offset: usize, len: usize, notify: &mut dyn Notify) {
        let (selector, n) = match classify_offset(offset, len) {
            Some(c) => (c.selector, c.bits),
            None => {
                crate::notify!(notify, LEVEL_WARN, "woffset got wrong offset: {}", offset);
                (0, 0)
            }
        };

        self.write_bit(selector & 2 != 0);
        self.write_bit(selector & 1 != 0);

        let mut b = 1usize << n;
        if n >= 8 {
            while b > 0x100 {
                b >>= 1;
                self.write_bit(b & offset != 0);
            }
            self.write_byte((offset & 0xFF) as u8 ^ 0xFF);
        } else {
            while b > 1 {
                b >>= 1;
                self.write_bit(b & offset == 0);
            }
        }
    }

    /// Pad the pending bit byte with zeros and return the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        self.cur_byte = self.cur_byte.checked_shl(self.cur_cnt).unwrap_or(0);
        self.buf[self.cur_index] = self.cur_byte;
        self.buf
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token stream
// ─────────────────────────────────────────────────────────────────────────────

/// Encoder output: the packed stream and the in-place safety margin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    pub bytes: Vec<u8>,
    /// Largest lead of the decruncher's write cursor over its read cursor,
    /// relative to the packed data laid out to end where the original ends.
    pub margin: i64,
}

/// Serialize the parse in `nodes` for input `buf`.
pub fn encode(buf: &[u8], nodes: &[ParseNode], notify: &mut dyn Notify) -> Packed {
    debug_assert_eq!(buf.len(), nodes.len());
    let mut out = BitWriter::new();
    let mut max_diff: i64 = 0;
    let mut need_copy_bit = true;

    let mut i = 0;
    while i < buf.len() {
        let node = nodes[i];

        if node.is_match() {
            let len = node.next - i;
            crate::notify!(notify, LEVEL_TRACE, "${:04x}: Mat({}, {})", i, len, node.offset);

            if need_copy_bit {
                out.write_bit(true);
            }
            out.write_length(len - 1);
            out.write_offset(node.offset - 1, len - 1, notify);

            i = node.next;
            need_copy_bit = true;
        } else {
            need_copy_bit = false;

            let mut lit_len = node.lit_len;
            while lit_len > 0 {
                let len = lit_len.min(MAX_LITERAL_CHUNK);
                crate::notify!(notify, LEVEL_TRACE, "${:04x}: Lit({})", i, len);

                out.write_bit(false);
                out.write_length(len);
                out.write_bytes(&buf[i..i + len]);

                // A full chunk may be followed by either token kind.
                if lit_len == MAX_LITERAL_CHUNK {
                    need_copy_bit = true;
                }

                lit_len -= len;
                i += len;
            }
        }

        max_diff = max_diff.max(i as i64 - out.len() as i64);
    }

    // The end marker always carries its flag; after a short literal run the
    // decruncher reads the flag as the first bit of the length code instead,
    // which still decodes to 255.
    out.write_bit(true);
    out.write_length(END_OF_STREAM);

    let put = out.len() as i64;
    let bytes = out.finish();
    Packed {
        margin: max_diff - i as i64 + put,
        bytes,
    }
}
