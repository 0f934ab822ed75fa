//! Insertion points over the live tree.

use pentimento_tela::{NodeId, TreeSink};

/// A contiguous span among one parent's children in the live tree.
///
/// An anchor is the location a virtual node currently occupies, or an empty
/// slot content can be inserted into. [`replace_with`](Anchor::replace_with)
/// tightens the boundaries around the new occupant before returning, so a
/// sibling point derived with [`after`](Anchor::after) is always well placed.
///
/// Once occupied, a span is exactly one node wide (every materialization
/// produces a single live root), so under the append-only child discipline
/// sibling anchors never go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    parent: NodeId,
    start: usize,
    end: usize,
}

impl Anchor {
    /// An empty span at offset `at` inside `parent`.
    pub fn collapsed(parent: NodeId, at: usize) -> Self {
        Self {
            parent,
            start: at,
            end: at,
        }
    }

    /// A span covering all current children of `parent`.
    ///
    /// This is the mount anchor: replacing its content clears the container.
    pub fn covering(tree: &impl TreeSink, parent: NodeId) -> Self {
        Self {
            parent,
            start: 0,
            end: tree.child_count(parent),
        }
    }

    /// The parent node this span lives in.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Start offset of the span.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset of the span (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Span width in child slots.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span currently holds nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Delete everything in the span and insert `node`, tightening the
    /// boundaries around it.
    pub fn replace_with(&mut self, tree: &mut impl TreeSink, node: NodeId) {
        tree.splice(self.parent, self.start, self.end, &[node]);
        self.end = self.start + 1;
    }

    /// An empty point immediately following this span's end.
    pub fn after(&self) -> Anchor {
        Anchor::collapsed(self.parent, self.end)
    }
}
