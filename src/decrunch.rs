//! Host-side decruncher.
//!
//! Reverses the bitstream produced by [`crate::crunch::encode`] the same way
//! the embedded 6502 routine does, so crunched images can be verified without
//! an emulator. It reads bits lazily: a new bit byte is fetched from the
//! stream only when the previous one is used up, which keeps it in step with
//! the interleaved whole bytes.

use core::fmt;

use crate::crunch::cost::offset_table;
use crate::crunch::decruncher::{Patch, BASIC_START, DECRUNCHER_LEN};
use crate::crunch::types::{END_OF_STREAM, MAX_LITERAL_CHUNK, MEM_SIZE, PRG_HEADER_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecrunchError {
    /// The stream ended before the end marker.
    Truncated,
    /// A match points before the start of the output.
    BadOffset { at: usize, offset: usize },
    /// The output would exceed the 64 KiB address space.
    Overflow,
    /// The image is too short for its declared layout.
    BadImage,
}

impl fmt::Display for DecrunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecrunchError::Truncated => write!(f, "stream ended before the end marker"),
            DecrunchError::BadOffset { at, offset } => {
                write!(f, "match at ${:04x} reaches back {} bytes", at, offset)
            }
            DecrunchError::Overflow => write!(f, "output exceeds 64 KiB"),
            DecrunchError::BadImage => write!(f, "image too short for its layout"),
        }
    }
}

impl std::error::Error for DecrunchError {}

// ─────────────────────────────────────────────────────────────────────────────
// BitReader
// ─────────────────────────────────────────────────────────────────────────────

struct BitReader<'a> {
    src: &'a [u8],
    pos: usize,
    cur_byte: u8,
    /// Unread bits left in `cur_byte`.
    cur_cnt: u32,
}

impl<'a> BitReader<'a> {
    fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            cur_byte: 0,
            cur_cnt: 0,
        }
    }

    #[inline]
    fn byte(&mut self) -> Result<u8, DecrunchError> {
        let b = *self.src.get(self.pos).ok_or(DecrunchError::Truncated)?;
        self.pos += 1;
        Ok(b)
    }

    #[inline]
    fn bit(&mut self) -> Result<bool, DecrunchError> {
        if self.cur_cnt == 0 {
            self.cur_byte = self.byte()?;
            self.cur_cnt = 8;
        }
        let bit = self.cur_byte & 0x80 != 0;
        self.cur_byte <<= 1;
        self.cur_cnt -= 1;
        Ok(bit)
    }

    fn length(&mut self) -> Result<usize, DecrunchError> {
        let mut v = 1;
        while v < 0x80 {
            if !self.bit()? {
                break;
            }
            v = (v << 1) | self.bit()? as usize;
        }
        Ok(v)
    }

    fn offset(&mut self, len: usize) -> Result<usize, DecrunchError> {
        let selector = (self.bit()? as usize) << 1 | self.bit()? as usize;
        let n = offset_table(len)[selector];

        let mut v = 0;
        if n >= 8 {
            for _ in 8..n {
                v = (v << 1) | self.bit()? as usize;
            }
            v = (v << 8) | (self.byte()? ^ 0xFF) as usize;
        } else {
            for _ in 0..n {
                v = (v << 1) | !self.bit()? as usize;
            }
        }
        Ok(v)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Decode a raw packed stream.
pub fn decrunch_stream(stream: &[u8]) -> Result<Vec<u8>, DecrunchError> {
    let mut r = BitReader::new(stream);
    let mut out: Vec<u8> = Vec::new();
    let mut need_flag = true;

    loop {
        let is_match = !need_flag || r.bit()?;

        if is_match {
            let len_code = r.length()?;
            if len_code == END_OF_STREAM {
                break;
            }
            let len = len_code + 1;
            let offset = r.offset(len_code)? + 1;
            if offset > out.len() {
                return Err(DecrunchError::BadOffset {
                    at: out.len(),
                    offset,
                });
            }
            if out.len() + len > MEM_SIZE {
                return Err(DecrunchError::Overflow);
            }
            // Byte by byte: the source may overlap the bytes being written.
            let from = out.len() - offset;
            for k in 0..len {
                out.push(out[from + k]);
            }
            need_flag = true;
        } else {
            let len = r.length()?;
            if out.len() + len > MEM_SIZE {
                return Err(DecrunchError::Overflow);
            }
            for _ in 0..len {
                out.push(r.byte()?);
            }
            need_flag = len == MAX_LITERAL_CHUNK;
        }
    }

    Ok(out)
}

/// A decrunched memory region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrunched {
    /// Where the data belongs in memory.
    pub address: u16,
    pub data: Vec<u8>,
}

impl Decrunched {
    /// The data as a PRG image.
    pub fn to_prg(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PRG_HEADER_SIZE + self.data.len());
        out.extend_from_slice(&self.address.to_le_bytes());
        out.extend_from_slice(&self.data);
        out
    }
}

/// Decode a plain or relocated image: `[load][depack_to][stream]`.
pub fn decrunch(image: &[u8]) -> Result<Decrunched, DecrunchError> {
    if image.len() < 4 {
        return Err(DecrunchError::BadImage);
    }
    Ok(Decrunched {
        address: u16::from_le_bytes([image[2], image[3]]),
        data: decrunch_stream(&image[4..])?,
    })
}

/// Decode a self-extracting image, returning the data and the jump target.
pub fn decrunch_executable(image: &[u8]) -> Result<(Decrunched, u16), DecrunchError> {
    let code_end = PRG_HEADER_SIZE + DECRUNCHER_LEN;
    if image.len() < code_end || image[..2] != BASIC_START.to_le_bytes() {
        return Err(DecrunchError::BadImage);
    }
    let patch = Patch::read(&image[PRG_HEADER_SIZE..code_end]).ok_or(DecrunchError::BadImage)?;
    let data = decrunch_stream(&image[code_end..])?;
    Ok((
        Decrunched {
            address: u16::from_le_bytes(patch.depack_to),
            data,
        },
        patch.jump_to,
    ))
}
