//! E2E Test Suite 02: Round trip
//!
//! Crunches a range of data shapes and decodes them again with the host
//! decruncher. Every shape must come back byte for byte at the original load
//! address, in all three output modes.

use byteboozer2::crunch::{Options, Workspace};
use byteboozer2::notify::{Recorder, Silent, LEVEL_TRACE};
use byteboozer2::{crunch, crunch_with, decrunch, decrunch_executable, ecrunch, rcrunch};

/// Prefix `payload` with a little-endian load address.
fn prg(load: u16, payload: &[u8]) -> Vec<u8> {
    let mut v = load.to_le_bytes().to_vec();
    v.extend_from_slice(payload);
    v
}

/// Deterministic pseudo-random bytes (LCG).
fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (x >> 24) as u8
        })
        .collect()
}

fn text(len: usize) -> Vec<u8> {
    b"READY.\nLOAD\"*\",8,1\nSEARCHING FOR *\nLOADING\nREADY.\nRUN\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// Plain crunch, then decrunch and compare.
fn assert_plain_roundtrip(input: &[u8]) {
    let image = crunch(input).unwrap();
    let out = decrunch(&image).unwrap();
    assert_eq!(out.address.to_le_bytes(), [input[0], input[1]]);
    assert_eq!(out.data.len(), input.len() - 2);
    assert!(out.data == input[2..], "plain round trip differs");
    assert_eq!(out.to_prg(), input);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: data shapes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_payload() {
    assert_plain_roundtrip(&[0x01, 0x08]);
}

#[test]
fn test_text() {
    assert_plain_roundtrip(&prg(0x0801, &text(8000)));
}

#[test]
fn test_noise() {
    assert_plain_roundtrip(&prg(0x2000, &noise(20_000, 1)));
}

#[test]
fn test_zeros() {
    assert_plain_roundtrip(&prg(0x4000, &[0u8; 4096]));
}

#[test]
fn test_short_inputs() {
    for len in 1..40 {
        assert_plain_roundtrip(&prg(0x1000, &noise(len, len as u32)));
        assert_plain_roundtrip(&prg(0x1000, &vec![0xEA; len]));
    }
}

#[test]
fn test_mixed_runs_and_noise() {
    let mut payload = Vec::new();
    for i in 0..40u32 {
        payload.extend(noise(50 + (i as usize * 7) % 90, i));
        payload.extend(std::iter::repeat(i as u8).take(2 + (i as usize * 13) % 300));
        payload.extend(text(30 + i as usize));
    }
    assert_plain_roundtrip(&prg(0x0900, &payload));
}

#[test]
fn test_sparse_pattern() {
    // Runs separated by single bytes exercise matches that continue past a run.
    let mut payload = Vec::new();
    for i in 0..500u32 {
        payload.extend(std::iter::repeat(0u8).take(3 + (i % 5) as usize));
        payload.push((i % 3) as u8 + 1);
    }
    assert_plain_roundtrip(&prg(0x3000, &payload));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: maximal RLE
// ─────────────────────────────────────────────────────────────────────────────

/// An all-identical buffer near the size limit stays linear and decodes.
#[test]
fn test_all_identical_large() {
    let input = prg(0x0400, &vec![0xA0; 60_000]);
    let image = crunch(&input).unwrap();
    assert!(image.len() < 1000);
    assert_eq!(decrunch(&image).unwrap().to_prg(), input);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: literal chunk boundary
// ─────────────────────────────────────────────────────────────────────────────

/// 255 bytes with no repeated byte pair, then a copy of the first 100.
fn boundary_payload() -> Vec<u8> {
    let head: Vec<u8> = (0..255u32).map(|i| (i * 7 + 3) as u8).collect();
    let mut payload = head.clone();
    payload.extend_from_slice(&head[..100]);
    payload
}

/// A full 255-byte literal chunk must be followed by an explicit match flag.
#[test]
fn test_full_literal_chunk_then_match() {
    let input = prg(0x1000, &boundary_payload());
    let mut rec = Recorder::new(LEVEL_TRACE);
    let image = crunch_with(&input, &Options::default(), &mut rec).unwrap();

    assert_eq!(
        rec.at_level(LEVEL_TRACE).collect::<Vec<_>>(),
        vec!["$0000: Lit(255)", "$00ff: Mat(100, 255)"]
    );
    assert_eq!(decrunch(&image).unwrap().to_prg(), input);
}

/// Literal runs longer than one chunk are split and still decode.
#[test]
fn test_long_literal_runs() {
    for len in [254, 255, 256, 509, 510, 511, 1000] {
        let input = prg(0xC000, &noise(len, 99));
        assert_plain_roundtrip(&input);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: relocated and executable images
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_relocated_roundtrip() {
    let input = prg(0x0801, &text(3000));
    let image = rcrunch(&input, 0xD000).unwrap();
    let packed_len = image.len() - 4;
    let start = u16::from_le_bytes([image[0], image[1]]) as usize;
    assert_eq!(start, 0xD000 - packed_len - 2);
    assert_eq!(decrunch(&image).unwrap().to_prg(), input);
}

#[test]
fn test_executable_roundtrip() {
    let input = prg(0x0801, &text(5000));
    let image = ecrunch(&input, 0x080D).unwrap();
    let (out, jump_to) = decrunch_executable(&image).unwrap();
    assert_eq!(jump_to, 0x080D);
    assert_eq!(out.to_prg(), input);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: determinism and workspace reuse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_deterministic() {
    let input = prg(0x2000, &noise(5000, 7));
    assert_eq!(crunch(&input).unwrap(), crunch(&input).unwrap());
    assert_eq!(ecrunch(&input, 0x2000).unwrap(), ecrunch(&input, 0x2000).unwrap());
}

#[test]
fn test_workspace_reuse() {
    let inputs = [
        prg(0x1000, &text(4000)),
        prg(0x2000, &[0x55; 3000]),
        prg(0x3000, &noise(2000, 3)),
    ];
    let mut ws = Workspace::new();
    for input in inputs.iter().chain(inputs.iter().rev()) {
        let reused = ws.crunch(input, &Options::default(), &mut Silent).unwrap();
        assert_eq!(reused, crunch(input).unwrap());
    }
}

/// Plain images end where in-place decrunching stays safe.
#[test]
fn test_plain_placement() {
    let payload = text(2500);
    let input = prg(0x1000, &payload);
    let mut ws = Workspace::new();
    let packed = ws.pack(&payload, &mut Silent);
    let image = crunch(&input).unwrap();

    let start = u16::from_le_bytes([image[0], image[1]]) as i64;
    let stream_end = start + 2 + packed.bytes.len() as i64;
    assert_eq!(stream_end, 0x1000 + payload.len() as i64 + packed.margin);
    assert_eq!(&image[4..], &packed.bytes[..]);
}
