//! Embedded 6502 decruncher for self-extracting images.
//!
//! The routine is a fixed binary: a BASIC `SYS 2061` stub, a copier that
//! moves the routine into zero page and the packed data to the top of
//! memory, and the decruncher proper. Only the four address operands below
//! are patched per image; everything else is copied verbatim.

/// Load address of the executable image (BASIC start).
pub const BASIC_START: u16 = 0x0801;

/// Operand of the copy loop: end of the image in memory, minus its length.
pub const PATCH_TRANSFER_FROM: usize = 0x1f;
/// Operand of the bit-byte fetch: first byte of the relocated stream.
pub const PATCH_DEPACK_FROM: usize = 0xbc;
/// Operand of the output pointer init: the original load address.
pub const PATCH_DEPACK_TO: usize = 0x85;
/// Operand of the final `JMP`.
pub const PATCH_JUMP_TO: usize = 0xca;

/// Offset added to the image length to obtain the transfer address.
pub const TRANSFER_BIAS: usize = 0x6ff;

pub const DECRUNCHER_LEN: usize = 213;

pub static DECRUNCHER: [u8; DECRUNCHER_LEN] = [
    0x0B, 0x08, 0x00, 0x00, 0x9E, 0x32, 0x30, 0x36, 0x31, 0x00, 0x00, 0x00, 0x78, 0xA9, 0x34, 0x85,
    0x01, 0xA2, 0xB7, 0xBD, 0x1E, 0x08, 0x95, 0x0F, 0xCA, 0xD0, 0xF8, 0x4C, 0x10, 0x00, 0xBD, 0xD6,
    0x07, 0x9D, 0x00, 0xFF, 0xE8, 0xD0, 0xF7, 0xC6, 0x12, 0xC6, 0x15, 0xA5, 0x12, 0xC9, 0x07, 0xB0,
    0xED, 0x20, 0xA0, 0x00, 0xB0, 0x17, 0x20, 0x8E, 0x00, 0x85, 0x36, 0xA0, 0x00, 0x20, 0xAD, 0x00,
    0x91, 0x77, 0xC8, 0xC0, 0x00, 0xD0, 0xF6, 0x20, 0x83, 0x00, 0xC8, 0xF0, 0xE4, 0x20, 0x8E, 0x00,
    0xAA, 0xE8, 0xF0, 0x71, 0x86, 0x7B, 0xA9, 0x00, 0xE0, 0x03, 0x2A, 0x20, 0x9B, 0x00, 0x20, 0x9B,
    0x00, 0xAA, 0xB5, 0xBF, 0xF0, 0x07, 0x20, 0x9B, 0x00, 0xB0, 0xFB, 0x30, 0x07, 0x49, 0xFF, 0xA8,
    0x20, 0xAD, 0x00, 0xAE, 0xA0, 0xFF, 0x65, 0x77, 0x85, 0x74, 0x98, 0x65, 0x78, 0x85, 0x75, 0xA0,
    0x00, 0xB9, 0xAD, 0xDE, 0x99, 0x00, 0x00, 0xC8, 0xC0, 0x00, 0xD0, 0xF5, 0x20, 0x83, 0x00, 0xD0,
    0xA0, 0x18, 0x98, 0x65, 0x77, 0x85, 0x77, 0x90, 0x02, 0xE6, 0x78, 0x60, 0xA9, 0x01, 0x20, 0xA0,
    0x00, 0x90, 0x05, 0x20, 0x9B, 0x00, 0x10, 0xF6, 0x60, 0x20, 0xA0, 0x00, 0x2A, 0x60, 0x06, 0xBE,
    0xD0, 0x08, 0x48, 0x20, 0xAD, 0x00, 0x2A, 0x85, 0xBE, 0x68, 0x60, 0xAD, 0xED, 0xFE, 0xE6, 0xAE,
    0xD0, 0x02, 0xE6, 0xAF, 0x60, 0xA9, 0x37, 0x85, 0x01, 0x4C, 0x00, 0x00, 0x80, 0xDF, 0xFB, 0x00,
    0x80, 0xEF, 0xFD, 0x80, 0xF0,
];

/// Addresses written into the decruncher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    pub transfer_from: u16,
    pub depack_from: u16,
    /// Little-endian bytes, copied from the source image header.
    pub depack_to: [u8; 2],
    pub jump_to: u16,
}

impl Patch {
    /// Compute the patch for a stream of `packed_len` bytes.
    pub fn new(packed_len: usize, depack_to: [u8; 2], jump_to: u16) -> Self {
        let file_len = packed_len + DECRUNCHER_LEN + 2;
        Self {
            transfer_from: (file_len + TRANSFER_BIAS) as u16,
            // Stored modulo 64 KiB, like the operand it lands in.
            depack_from: 0u16.wrapping_sub(packed_len as u16),
            depack_to,
            jump_to,
        }
    }

    /// Copy of the decruncher with the four operands filled in.
    pub fn apply(&self) -> [u8; DECRUNCHER_LEN] {
        let mut code = DECRUNCHER;
        put_le16(&mut code, PATCH_TRANSFER_FROM, self.transfer_from);
        put_le16(&mut code, PATCH_DEPACK_FROM, self.depack_from);
        code[PATCH_DEPACK_TO..PATCH_DEPACK_TO + 2].copy_from_slice(&self.depack_to);
        put_le16(&mut code, PATCH_JUMP_TO, self.jump_to);
        code
    }

    /// Read the operands back out of a patched decruncher.
    pub fn read(code: &[u8]) -> Option<Self> {
        if code.len() < DECRUNCHER_LEN {
            return None;
        }
        Some(Self {
            transfer_from: get_le16(code, PATCH_TRANSFER_FROM),
            depack_from: get_le16(code, PATCH_DEPACK_FROM),
            depack_to: [code[PATCH_DEPACK_TO], code[PATCH_DEPACK_TO + 1]],
            jump_to: get_le16(code, PATCH_JUMP_TO),
        })
    }
}

#[inline]
fn put_le16(code: &mut [u8], at: usize, v: u16) {
    code[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

#[inline]
fn get_le16(code: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([code[at], code[at + 1]])
}
