// Unit tests for crunch::search::MatchFinder.
//
// The finder must be driven from the last position down to 0, one call per
// position, exactly as the parser does.
//
// Coverage:
//   - plain chain match, extended backwards
//   - run positions match themselves at offset 1
//   - run records propagate to interior positions
//   - an older run of the same byte is found
//   - no candidates at position 0 or without history

use byteboozer2::crunch::search::MatchFinder;
use byteboozer2::crunch::types::{Match, MatchSet, RleInfo};

/// Drive the finder from the end down to `stop` and return the set found at
/// `stop`.
fn find_at(buf: &[u8], stop: usize) -> (MatchSet, MatchFinder<'_>) {
    let mut finder = MatchFinder::new(buf);
    let mut set = MatchSet::new();
    for get in (stop..buf.len()).rev() {
        finder.find(get, &mut set);
    }
    (set, finder)
}

#[test]
fn plain_match_extends_backwards() {
    let (set, _) = find_at(b"abcabc", 5);
    assert_eq!(set.get(3), Some(Match { length: 3, offset: 3 }));
    assert_eq!(set.get(2), Some(Match { length: 2, offset: 3 }));
    assert_eq!(set.count(), 2);
}

#[test]
fn nothing_without_history() {
    let (set, _) = find_at(b"abcdef", 5);
    assert_eq!(set.count(), 0);
    let (set, _) = find_at(b"abcabc", 0);
    assert_eq!(set.count(), 0);
}

#[test]
fn run_matches_itself() {
    let buf = [0u8; 6];
    let (set, finder) = find_at(&buf, 5);
    assert_eq!(set.count(), 4);
    for len in 2..=5 {
        assert_eq!(set.get(len), Some(Match { length: len, offset: 1 }));
    }
    assert_eq!(finder.rle_at(4), RleInfo { length: 5, value_after: 0 });
}

#[test]
fn interior_run_position_uses_shorter_record() {
    let buf = [0u8; 6];
    let (set, _) = find_at(&buf, 4);
    assert_eq!(set.count(), 3);
    assert_eq!(set.get(4), Some(Match { length: 4, offset: 1 }));
    assert_eq!(set.get(5), None);
}

#[test]
fn self_match_is_capped() {
    let buf = [0x20u8; 1000];
    let (set, _) = find_at(&buf, 999);
    assert_eq!(set.count(), 254);
    assert_eq!(set.get(255), Some(Match { length: 255, offset: 1 }));
}

#[test]
fn older_run_is_found() {
    // Two runs of 0x55, four bytes each, separated by distinct bytes.
    let buf = [1, 0x55, 0x55, 0x55, 0x55, 2, 3, 4, 0x55, 0x55, 0x55, 0x55];
    let (set, _) = find_at(&buf, 11);
    // Run of four matches itself up to three bytes back...
    assert_eq!(set.get(3), Some(Match { length: 3, offset: 1 }));
    // ...and the older run in full.
    assert_eq!(set.get(4), Some(Match { length: 4, offset: 7 }));
}
