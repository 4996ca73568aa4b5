// Unit tests for crunch::cost (bit-cost model).
//
// Coverage:
//   - length code sizes at every bucket boundary
//   - offset range classification for both tables
//   - out-of-range values cost INVALID_COST and warn through the sink
//   - literal cost thresholds
//   - match cost for a few hand-computed tokens

use byteboozer2::crunch::cost::*;
use byteboozer2::crunch::types::INVALID_COST;
use byteboozer2::notify::{Recorder, Silent, LEVEL_WARN};

#[test]
fn length_bucket_boundaries() {
    let cases = [
        (1, 1),
        (2, 3),
        (3, 3),
        (4, 5),
        (7, 5),
        (8, 7),
        (15, 7),
        (16, 9),
        (31, 9),
        (32, 11),
        (63, 11),
        (64, 13),
        (127, 13),
        (128, 14),
        (255, 14),
    ];
    for (len, bits) in cases {
        assert_eq!(length_bits(len), Some(bits), "len {}", len);
    }
    assert_eq!(length_bits(0), None);
    assert_eq!(length_bits(256), None);
}

#[test]
fn offset_classes() {
    let short = |o| classify_offset(o, 1).map(|c| (c.selector, c.bits));
    assert_eq!(short(0), Some((0, 3)));
    assert_eq!(short(7), Some((0, 3)));
    assert_eq!(short(8), Some((1, 6)));
    assert_eq!(short(64), Some((2, 8)));
    assert_eq!(short(1023), Some((3, 10)));

    let long = |o| classify_offset(o, 2).map(|c| (c.selector, c.bits));
    assert_eq!(long(15), Some((0, 4)));
    assert_eq!(long(16), Some((1, 7)));
    assert_eq!(long(128), Some((2, 10)));
    assert_eq!(long(1024), Some((3, 13)));
    assert_eq!(long(8191), Some((3, 13)));
    assert_eq!(long(8192), None);
}

#[test]
fn out_of_range_warns() {
    let mut rec = Recorder::new(LEVEL_WARN);
    assert_eq!(cost_of_length(0, &mut rec), INVALID_COST);
    assert_eq!(cost_of_offset(9000, 2, &mut rec), INVALID_COST);
    let warnings: Vec<&str> = rec.at_level(LEVEL_WARN).collect();
    assert_eq!(
        warnings,
        vec![
            "cost_of_length got wrong value: 0",
            "cost_of_offset got wrong offset: 9000"
        ]
    );
}

#[test]
fn in_range_is_quiet() {
    let mut rec = Recorder::default();
    cost_of_match(255, 8192, &mut rec);
    cost_of_match(2, 1024, &mut rec);
    assert!(rec.entries.is_empty());
}

#[test]
fn literal_thresholds() {
    assert_eq!(cost_of_literal(0, 1), 9);
    assert_eq!(cost_of_literal(10, 2), 20);
    assert_eq!(cost_of_literal(0, 3), 8);
    assert_eq!(cost_of_literal(0, 64), 10);
    assert_eq!(cost_of_literal(0, 128), 9);
    assert_eq!(cost_of_literal(0, 129), 8);
    assert_eq!(cost_of_literal(0, 255), 8);
}

#[test]
fn match_costs() {
    // flag + len code + selector + offset bits
    assert_eq!(cost_of_match(2, 1, &mut Silent), 1 + 1 + 2 + 3);
    assert_eq!(cost_of_match(2, 9, &mut Silent), 1 + 1 + 2 + 6);
    assert_eq!(cost_of_match(3, 17, &mut Silent), 1 + 3 + 2 + 7);
    assert_eq!(cost_of_match(100, 255, &mut Silent), 1 + 13 + 2 + 10);
    assert_eq!(cost_of_match(255, 8192, &mut Silent), 1 + 14 + 2 + 13);
}
