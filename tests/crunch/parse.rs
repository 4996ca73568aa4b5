// Unit tests for crunch::parse (backward optimal parse).
//
// Coverage:
//   - single byte and empty input
//   - the chosen path reaches the end and every match is a real repeat
//   - literal runs are counted consistently along the path
//   - repetitive input costs far less than its literal encoding
//   - a long run is covered almost entirely by matches

use byteboozer2::crunch::parse::{parse, total_cost};
use byteboozer2::crunch::types::ParseNode;
use byteboozer2::notify::Silent;

/// Follow the chosen path and check each token against `buf`.
fn check_path(buf: &[u8], nodes: &[ParseNode]) -> (usize, usize) {
    let (mut matches, mut literals) = (0, 0);
    let mut i = 0;
    while i < buf.len() {
        let node = nodes[i];
        assert!(node.next > i, "no progress at {}", i);
        if node.is_match() {
            let len = node.next - i;
            assert!((2..=255).contains(&len));
            assert!(node.offset >= 1 && node.offset <= i, "offset at {}", i);
            for j in i..node.next {
                assert_eq!(buf[j], buf[j - node.offset], "match at {} differs", i);
            }
            matches += 1;
            i = node.next;
        } else {
            // A literal run covers lit_len positions, each one shorter.
            for k in 0..node.lit_len {
                assert_eq!(nodes[i + k].lit_len, node.lit_len - k);
                assert!(!nodes[i + k].is_match());
            }
            literals += node.lit_len;
            i += node.lit_len;
        }
    }
    assert_eq!(i, buf.len());
    (matches, literals)
}

#[test]
fn single_byte() {
    let nodes = parse(&[0x60], &mut Silent);
    assert_eq!(
        nodes,
        vec![ParseNode { cost: 9, next: 1, lit_len: 1, offset: 0 }]
    );
    assert_eq!(total_cost(&nodes), 9);
}

#[test]
fn empty_input() {
    let nodes = parse(&[], &mut Silent);
    assert!(nodes.is_empty());
    assert_eq!(total_cost(&nodes), 0);
}

#[test]
fn repeated_phrase() {
    let buf: Vec<u8> = b"the quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(2000)
        .collect();
    let nodes = parse(&buf, &mut Silent);
    let (matches, literals) = check_path(&buf, &nodes);
    assert!(matches > 0);
    assert!(literals < 100);
    assert!(total_cost(&nodes) < 8 * 200);
}

#[test]
fn long_run() {
    let buf = vec![0xAAu8; 5000];
    let nodes = parse(&buf, &mut Silent);
    let (matches, literals) = check_path(&buf, &nodes);
    assert!(literals <= 2);
    assert!(matches >= 5000 / 255);
}

#[test]
fn mixed_content_path_is_valid() {
    let mut buf = Vec::new();
    let mut x: u32 = 12345;
    for i in 0..4000u32 {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
        let b = match (i / 500) % 3 {
            0 => (x >> 16) as u8,
            1 => (i % 7) as u8,
            _ => 0x00,
        };
        buf.push(b);
    }
    let nodes = parse(&buf, &mut Silent);
    check_path(&buf, &nodes);
}
