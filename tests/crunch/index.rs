// Unit tests for crunch::index (context hashing and chain tables).
//
// Coverage:
//   - context_at packs the current byte high and the previous byte low
//   - chains list positions newest first and skip position 0
//   - chain_start / next / spend walk and consume the chain
//   - a run is indexed once per shift, not once per byte
//   - fill() on a reused index forgets the previous buffer

use byteboozer2::crunch::index::{context_at, MatchIndex};
use byteboozer2::crunch::rle::analyze;

fn build(buf: &[u8]) -> MatchIndex {
    MatchIndex::build(buf, &analyze(buf))
}

#[test]
fn context_layout() {
    let buf = [0x12, 0x34];
    assert_eq!(context_at(&buf, 0), 0x1200);
    assert_eq!(context_at(&buf, 1), 0x3412);
}

#[test]
fn chains_are_newest_first() {
    let buf = [1, 2, 1, 2, 1, 2];
    let index = build(&buf);
    assert_eq!(index.chain(0x0201), vec![5, 3, 1]);
    assert_eq!(index.chain(0x0102), vec![4, 2]);
    assert_eq!(index.head(0x0201), 5);
    assert_eq!(index.tail(0x0201), 1);
    assert!(index.chain(0x0303).is_empty());
}

#[test]
fn walk_and_spend() {
    let buf = [1, 2, 1, 2, 1, 2];
    let mut index = build(&buf);
    assert_eq!(index.chain_start(0x0201), 3);
    assert_eq!(index.next(3), 1);
    assert_eq!(index.next(1), 0);

    index.spend(0x0201);
    assert_eq!(index.head(0x0201), 3);
    assert_eq!(index.chain_start(0x0201), 1);
}

#[test]
fn run_is_indexed_once() {
    let buf = [9u8; 5];
    let index = build(&buf);
    assert_eq!(index.chain(0x0909), vec![4]);
}

#[test]
fn refill_forgets_previous_buffer() {
    let mut index = build(&[1, 2, 1, 2]);
    let other = [7, 8, 9];
    index.fill(&other, &analyze(&other));
    assert!(index.chain(0x0201).is_empty());
    assert_eq!(index.chain(0x0908), vec![2]);
}
