// Unit tests for crunch::rle::analyze.
//
// Coverage:
//   - empty and run-free buffers
//   - only the run start (highest index) carries a record
//   - value_after is the byte below the run, or the run value at index 0
//   - adjacent runs are detected independently

use byteboozer2::crunch::rle::analyze;
use byteboozer2::crunch::types::RleInfo;

fn run(length: usize, value_after: u8) -> RleInfo {
    RleInfo { length, value_after }
}

#[test]
fn empty_buffer() {
    assert!(analyze(&[]).is_empty());
}

#[test]
fn no_runs() {
    let info = analyze(&[1, 2, 3, 2, 1]);
    assert!(info.iter().all(|r| *r == RleInfo::default()));
}

#[test]
fn run_records_terminating_byte() {
    let info = analyze(&[1, 7, 7, 7, 2]);
    assert_eq!(info[3], run(3, 1));
    assert_eq!(info[2], RleInfo::default());
    assert_eq!(info[1], RleInfo::default());
    assert_eq!(info[4], RleInfo::default());
}

#[test]
fn adjacent_runs() {
    let info = analyze(&[5, 5, 5, 5, 9, 9]);
    assert_eq!(info[5], run(2, 5));
    assert_eq!(info[3], run(4, 5));
    assert_eq!(info.iter().filter(|r| r.length != 0).count(), 2);
}

#[test]
fn whole_buffer_is_one_run() {
    let info = analyze(&[0; 1000]);
    assert_eq!(info[999], run(1000, 0));
    assert_eq!(info.iter().filter(|r| r.length != 0).count(), 1);
}
