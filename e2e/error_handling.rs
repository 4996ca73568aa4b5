//! E2E Test Suite 04: Error handling
//!
//! Address validation and input limits across every entry point. Invalid
//! requests fail with a typed error before any crunching starts.

use byteboozer2::crunch::{parse_address, CrunchError, Cruncher, Options, MAX_INPUT_SIZE};
use byteboozer2::decrunch::decrunch_stream;
use byteboozer2::{crunch, decrunch, decrunch_executable, ecrunch, rcrunch, DecrunchError};

const SMALL: [u8; 3] = [0x00, 0x10, 0x60];

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: address range
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_rejects_out_of_range_addresses() {
    for addr in [-1, 65536, i64::MIN, i64::MAX] {
        assert_eq!(ecrunch(&SMALL, addr), Err(CrunchError::InvalidAddress(addr)));
        assert_eq!(rcrunch(&SMALL, addr), Err(CrunchError::InvalidAddress(addr)));
    }
}

#[test]
fn test_accepts_boundary_addresses() {
    for addr in [0, 65535] {
        assert!(ecrunch(&SMALL, addr).is_ok());
        assert!(rcrunch(&SMALL, addr).is_ok());
    }
}

#[test]
fn test_rejects_non_integer_address() {
    for s in ["test", "", "0x", "$12g4", "1e3"] {
        assert!(matches!(
            parse_address(s),
            Err(CrunchError::InvalidAddressSyntax(_))
        ));
    }
}

#[test]
fn test_cruncher_rejects_bad_options() {
    let err = Cruncher::new(&SMALL, Options::relocated(-1)).err();
    assert_eq!(err, Some(CrunchError::InvalidAddress(-1)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: input size
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_input_too_short() {
    assert_eq!(crunch(&[]), Err(CrunchError::InputTooShort(0)));
    assert_eq!(crunch(&[0x01]), Err(CrunchError::InputTooShort(1)));
}

#[test]
fn test_input_too_large() {
    let data = vec![0u8; MAX_INPUT_SIZE + 3];
    assert_eq!(crunch(&data), Err(CrunchError::InputTooLarge(MAX_INPUT_SIZE + 1)));
}

#[test]
fn test_address_checked_before_size() {
    assert_eq!(ecrunch(&[], 70000), Err(CrunchError::InvalidAddress(70000)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: corrupt images
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_stream() {
    let image = crunch(&SMALL).unwrap();
    assert_eq!(decrunch(&image[..5]), Err(DecrunchError::Truncated));
    assert_eq!(decrunch(&image[..3]), Err(DecrunchError::BadImage));
}

#[test]
fn test_offset_before_start() {
    // Match flag, length code 1 (len 2), selector 00, then the inverted
    // offset bits 111 -> 0, i.e. offset 1. Nothing has been output yet, so it
    // reaches before the start.
    assert_eq!(
        decrunch_stream(&[0b1000_1110]),
        Err(DecrunchError::BadOffset { at: 0, offset: 1 })
    );
}

#[test]
fn test_executable_requires_basic_start() {
    let mut image = ecrunch(&SMALL, 0x1000).unwrap();
    image[0] = 0x00;
    assert_eq!(decrunch_executable(&image), Err(DecrunchError::BadImage));
    assert_eq!(decrunch_executable(&image[..100]), Err(DecrunchError::BadImage));
}

#[test]
fn test_error_display() {
    assert_eq!(
        CrunchError::InputTooShort(1).to_string(),
        "input of 1 bytes has no load address"
    );
    assert_eq!(
        DecrunchError::BadOffset { at: 0, offset: 1 }.to_string(),
        "match at $0000 reaches back 1 bytes"
    );
}
