//! E2E Test Suite 05: Golden images
//!
//! Multi-kilobyte synthetic programs crunched to byte-exact reference images.
//! The inputs mix byte runs longer than 255, literal stretches longer than a
//! chunk, and copies of earlier data up to 8192 bytes back, so the images pin
//! the parse tie-breaks and the literal-cost thresholds, not just validity.
//! Any change in token choice changes the stream and fails here.

use byteboozer2::crunch::Options;
use byteboozer2::notify::{Recorder, LEVEL_TRACE};
use byteboozer2::{crunch, crunch_with, decrunch, decrunch_executable, ecrunch, rcrunch};

const PROGRAM: &[u8] = include_bytes!("golden/program.b2");
const TABLES: &[u8] = include_bytes!("golden/tables.b2");
const LEVEL: &[u8] = include_bytes!("golden/level.b2");

const TEXT: &[u8] = b"READY.\nLOAD\"*\",8,1\nSEARCHING FOR *\nLOADING\nREADY.\nRUN\n";

/// xorshift32; `seed` must be non-zero.
struct Rng(u32);

impl Rng {
    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn below(&mut self, n: u32) -> u32 {
        self.next() % n
    }
}

/// `len` payload bytes built from runs, random literals, back copies and
/// text, prefixed with `load`.
fn synthetic(load: u16, seed: u32, len: usize) -> Vec<u8> {
    let mut rng = Rng(seed);
    let mut out: Vec<u8> = Vec::with_capacity(len + 300);
    while out.len() < len {
        match rng.below(5) {
            0 => {
                let b = rng.below(256) as u8;
                let n = 2 + rng.below(300) as usize;
                out.extend(std::iter::repeat(b).take(n));
            }
            1 => {
                let n = 1 + rng.below(400) as usize;
                for _ in 0..n {
                    out.push(rng.below(256) as u8);
                }
            }
            2 | 3 if !out.is_empty() => {
                let dist = 1 + rng.below(out.len().min(8192) as u32) as usize;
                let n = 2 + rng.below(300) as usize;
                // May overlap the bytes being appended.
                let from = out.len() - dist;
                for k in 0..n {
                    let b = out[from + k];
                    out.push(b);
                }
            }
            _ => {
                let n = 1 + rng.below(TEXT.len() as u32) as usize;
                out.extend_from_slice(&TEXT[..n]);
            }
        }
    }
    out.truncate(len);

    let mut prg = load.to_le_bytes().to_vec();
    prg.extend_from_slice(&out);
    prg
}

/// Compare images, reporting the first differing offset.
fn assert_image_eq(actual: &[u8], expected: &[u8]) {
    let first_diff = actual.iter().zip(expected).position(|(a, e)| a != e);
    assert!(
        first_diff.is_none() && actual.len() == expected.len(),
        "image differs at {:?} (len {} vs {})",
        first_diff,
        actual.len(),
        expected.len()
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: plain
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_golden_plain_program() {
    let input = synthetic(0x0801, 1, 6000);
    let image = crunch(&input).unwrap();
    assert_image_eq(&image, PROGRAM);
    assert_eq!(decrunch(&image).unwrap().to_prg(), input);
}

/// The opening tokens, including a length-2 match chosen over a literal.
#[test]
fn test_golden_plain_program_trace() {
    let input = synthetic(0x0801, 1, 6000);
    let mut rec = Recorder::new(LEVEL_TRACE);
    crunch_with(&input, &Options::default(), &mut rec).unwrap();

    let trace: Vec<_> = rec.at_level(LEVEL_TRACE).collect();
    assert_eq!(trace.len(), 72);
    assert_eq!(
        &trace[..8],
        &[
            "$0000: Lit(9)",
            "$0009: Mat(2, 7)",
            "$000b: Lit(100)",
            "$006f: Mat(17, 1)",
            "$0080: Lit(156)",
            "$011c: Mat(5, 284)",
            "$0121: Lit(1)",
            "$0122: Mat(255, 1)",
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: executable
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_golden_executable_tables() {
    let input = synthetic(0x2000, 7, 12000);
    let image = ecrunch(&input, 0x2000).unwrap();
    assert_image_eq(&image, TABLES);

    let (out, jump) = decrunch_executable(&image).unwrap();
    assert_eq!(jump, 0x2000);
    assert_eq!(out.to_prg(), input);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: relocated
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_golden_relocated_level() {
    let input = synthetic(0x4000, 42, 24000);
    let image = rcrunch(&input, 0xC000).unwrap();
    assert_image_eq(&image, LEVEL);
    assert_eq!(decrunch(&image).unwrap().to_prg(), input);
}
