// Unit tests for crunch::encode (BitWriter and token serialization).
//
// Coverage:
//   - bit bytes are reserved lazily and filled MSB-first around whole bytes
//   - length codes for small, mid and self-terminating values
//   - offset codes for narrow (inverted bits) and wide (inverted low byte) ranges
//   - the single-byte stream, its margin and its trace output

use byteboozer2::crunch::encode::{encode, BitWriter};
use byteboozer2::crunch::parse::parse;
use byteboozer2::notify::{Recorder, Silent, LEVEL_TRACE};

fn bits(f: impl FnOnce(&mut BitWriter)) -> Vec<u8> {
    let mut w = BitWriter::new();
    f(&mut w);
    w.finish()
}

#[test]
fn empty_writer_holds_one_reserved_byte() {
    let w = BitWriter::new();
    assert_eq!(w.len(), 1);
    assert_eq!(w.finish(), vec![0x00]);
}

#[test]
fn bytes_interleave_with_bit_byte() {
    let out = bits(|w| {
        w.write_bit(true);
        w.write_bit(false);
        w.write_bit(true);
        w.write_byte(0x55);
    });
    assert_eq!(out, vec![0xA0, 0x55]);
}

#[test]
fn ninth_bit_reserves_after_bytes() {
    let out = bits(|w| {
        for _ in 0..8 {
            w.write_bit(true);
        }
        w.write_bytes(&[0xAA, 0xBB]);
        w.write_bit(true);
    });
    assert_eq!(out, vec![0xFF, 0xAA, 0xBB, 0x80]);
}

#[test]
fn length_codes() {
    assert_eq!(bits(|w| w.write_length(1)), vec![0x00]);
    assert_eq!(bits(|w| w.write_length(2)), vec![0x80]);
    assert_eq!(bits(|w| w.write_length(3)), vec![0xC0]);
    // 128..=255 need no stop bit.
    assert_eq!(bits(|w| w.write_length(128)), vec![0xAA, 0xA8]);
    assert_eq!(bits(|w| w.write_length(255)), vec![0xFF, 0xFC]);
}

#[test]
fn narrow_offset_bits_are_inverted() {
    // selector 00, then 3 bits of 0 inverted
    assert_eq!(bits(|w| w.write_offset(0, 1, &mut Silent)), vec![0x38]);
    // selector 01, then 7 bits of 16 inverted
    assert_eq!(bits(|w| w.write_offset(16, 2, &mut Silent)), vec![0x77, 0x80]);
}

#[test]
fn wide_offset_low_byte_is_inverted() {
    // selector 10, bits 9..8 of 0x1FF plain, low byte 0xFF inverted
    assert_eq!(bits(|w| w.write_offset(0x1FF, 2, &mut Silent)), vec![0x90, 0x00]);
}

#[test]
fn single_byte_stream() {
    let buf = [0x60];
    let nodes = parse(&buf, &mut Silent);
    let packed = encode(&buf, &nodes, &mut Silent);
    assert_eq!(packed.bytes, vec![0x3F, 0x60, 0xFF, 0x80]);
    assert_eq!(packed.margin, 3);
}

#[test]
fn empty_stream_is_just_the_end_marker() {
    let packed = encode(&[], &[], &mut Silent);
    assert_eq!(packed.bytes, vec![0xFF, 0xFE]);
    assert_eq!(packed.margin, 2);
}

#[test]
fn tokens_are_traced() {
    let buf = [0x60];
    let nodes = parse(&buf, &mut Silent);
    let mut rec = Recorder::new(LEVEL_TRACE);
    encode(&buf, &nodes, &mut rec);
    assert_eq!(rec.at_level(LEVEL_TRACE).collect::<Vec<_>>(), vec!["$0000: Lit(1)"]);
}
