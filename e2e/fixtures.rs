//! E2E Test Suite 01: Regression fixtures
//!
//! Byte-exact images for the three-byte program `[0x00, 0x10, 0x60]` (load
//! address $1000, one data byte) in all three output shapes. Any change to
//! the parse, the bit layout or the decruncher shows up here first.

use byteboozer2::crunch::decruncher::{
    DECRUNCHER, DECRUNCHER_LEN, PATCH_DEPACK_FROM, PATCH_DEPACK_TO, PATCH_JUMP_TO,
    PATCH_TRANSFER_FROM,
};
use byteboozer2::{crunch, ecrunch, rcrunch};

const SMALL: [u8; 3] = [0x00, 0x10, 0x60];
const STREAM: [u8; 4] = [0x3F, 0x60, 0xFF, 0x80];

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: plain
// ─────────────────────────────────────────────────────────────────────────────

/// Loads at $1000 + 1 - 4 - 2 + 3 = $0ffe, depacks to $1000.
#[test]
fn test_plain_small() {
    let image = crunch(&SMALL).unwrap();
    assert_eq!(image, vec![0xFE, 0x0F, 0x00, 0x10, 0x3F, 0x60, 0xFF, 0x80]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: relocated
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_relocated_small() {
    let image = rcrunch(&SMALL, 0x2000).unwrap();
    assert_eq!(image, vec![0xFA, 0x1F, 0x00, 0x10, 0x3F, 0x60, 0xFF, 0x80]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: executable
// ─────────────────────────────────────────────────────────────────────────────

/// `[$0801][patched decruncher][stream]` with
/// transfer_from = 4 + 213 + 2 + $6ff = $07da and depack_from = $10000 - 4.
#[test]
fn test_executable_small() {
    let image = ecrunch(&SMALL, 0x1000).unwrap();
    assert_eq!(image.len(), 2 + DECRUNCHER_LEN + STREAM.len());
    assert_eq!(&image[..2], &[0x01, 0x08]);

    let code = &image[2..2 + DECRUNCHER_LEN];
    let operand = |at: usize| [code[at], code[at + 1]];
    assert_eq!(operand(PATCH_TRANSFER_FROM), [0xDA, 0x07]);
    assert_eq!(operand(PATCH_DEPACK_FROM), [0xFC, 0xFF]);
    assert_eq!(operand(PATCH_DEPACK_TO), [0x00, 0x10]);
    assert_eq!(operand(PATCH_JUMP_TO), [0x00, 0x10]);

    let patched = [
        PATCH_TRANSFER_FROM,
        PATCH_DEPACK_FROM,
        PATCH_DEPACK_TO,
        PATCH_JUMP_TO,
    ];
    for i in 0..DECRUNCHER_LEN {
        if !patched.iter().any(|&p| i == p || i == p + 1) {
            assert_eq!(code[i], DECRUNCHER[i], "decruncher byte {:#04x}", i);
        }
    }

    assert_eq!(&image[2 + DECRUNCHER_LEN..], &STREAM);
}

/// The jump target is independent of the depack address.
#[test]
fn test_executable_custom_jump() {
    let image = ecrunch(&SMALL, 0x080D).unwrap();
    assert_eq!(&image[2 + PATCH_JUMP_TO..2 + PATCH_JUMP_TO + 2], &[0x0D, 0x08]);
    assert_eq!(&image[2 + PATCH_DEPACK_TO..2 + PATCH_DEPACK_TO + 2], &[0x00, 0x10]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: determinism
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_repeated_calls_identical() {
    for _ in 0..3 {
        assert_eq!(&crunch(&SMALL).unwrap()[4..], &STREAM);
    }
}
