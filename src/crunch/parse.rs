//! Optimal parser.
//!
//! A single backward pass computes, for every position, the cheapest way (in
//! bits) to encode the rest of the buffer. All edges point to higher
//! positions, so when the scan reaches position `get` the node at `get + 1`
//! is final and every choice at `get` can be priced exactly:
//!
//! - a match of length `len` found at `get` covers `[get - len + 1, get]`,
//!   so it is recorded on node `get - len + 1` (if cheaper than what that node
//!   already holds), pointing at `get + 1`;
//! - a literal at `get` extends the literal run of node `get + 1`.
//!
//! Lower nodes may be revised many times by competing matches before the
//! scan reaches and finalizes them.

use super::cost::{cost_of_literal, cost_of_match};
use super::index::MatchIndex;
use super::search::MatchFinder;
use super::types::{MatchSet, ParseNode};
use crate::notify::Notify;

/// Run the match finder and the backward dynamic program over `buf`.
///
/// Returns one node per input position. Following `next` from node 0
/// reaches `buf.len()`.
pub fn parse(buf: &[u8], notify: &mut dyn Notify) -> Vec<ParseNode> {
    let (nodes, _) = parse_with_index(buf, MatchIndex::new(), notify);
    nodes
}

/// [`parse`] reusing a match-index allocation; the index is handed back.
pub fn parse_with_index(
    buf: &[u8],
    index: MatchIndex,
    notify: &mut dyn Notify,
) -> (Vec<ParseNode>, MatchIndex) {
    let mut nodes = vec![ParseNode::default(); buf.len()];
    let mut finder = MatchFinder::with_index(buf, index);
    let mut matches = MatchSet::new();

    // Node get + 1; starts as the virtual node past the end.
    let mut last = ParseNode::default();

    for get in (0..buf.len()).rev() {
        finder.find(get, &mut matches);

        for m in matches.iter_longest_first() {
            let target = get + 1 - m.length;
            let cost = last.cost + cost_of_match(m.length, m.offset, notify);

            let node = &mut nodes[target];
            if node.cost != 0 && node.cost <= cost {
                continue;
            }
            *node = ParseNode {
                cost,
                next: get + 1,
                lit_len: 0,
                offset: m.offset,
            };
        }

        // Literals win ties.
        let lit_len = last.lit_len + 1;
        let lit_cost = cost_of_literal(last.cost, lit_len);
        let this = &mut nodes[get];
        if this.cost == 0 || this.cost >= lit_cost {
            *this = ParseNode {
                cost: lit_cost,
                next: get + 1,
                lit_len,
                offset: 0,
            };
        }

        last = *this;
    }

    (nodes, finder.into_index())
}

/// Total bit cost of the chosen parse (0 for an empty buffer).
pub fn total_cost(nodes: &[ParseNode]) -> u32 {
    nodes.first().map_or(0, |n| n.cost)
}
