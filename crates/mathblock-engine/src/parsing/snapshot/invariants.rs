use xi_rope::Rope;

use crate::parsing::{rope::Span, tree::Document};

/// Validates parser output invariants.
///
/// Asserts that:
/// - every line span is non-inverted and within rope bounds
/// - a node's line spans do not overlap and appear in source order
/// - children of a node appear in source order
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, doc: &Document) {
    let n = rope.len();
    let whole = Span::new(0, n);
    for id in doc.descendants() {
        let lines = doc.lines(id);
        for sp in lines {
            assert!(
                sp.start <= sp.end && whole.contains(*sp),
                "line span out of bounds: {sp:?} (rope len: {n})"
            );
        }
        for pair in lines.windows(2) {
            assert!(
                pair[0].end <= pair[1].start,
                "line spans overlap or are out of order: {:?} then {:?}",
                pair[0],
                pair[1]
            );
        }

        let starts: Vec<usize> = doc
            .children(id)
            .iter()
            .filter_map(|&c| doc.lines(c).first().map(|sp| sp.start))
            .collect();
        for pair in starts.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "siblings out of source order: {} before {}",
                pair[0],
                pair[1]
            );
        }
    }
}
