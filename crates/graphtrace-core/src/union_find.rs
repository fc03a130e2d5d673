//! Disjoint-set forest used by the Kruskal trace.
//!
//! `find` compresses paths iteratively (two passes: locate the root, then
//! repoint every node on the path at it), so deep chains on large graphs
//! cannot exhaust the stack. `join` links the first root under the
//! second without any rank heuristic.

use crate::types::NodeId;

/// Root pointers for every node, initialized to the identity mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointSet {
    root: Vec<NodeId>,
}

impl DisjointSet {
    /// Create `n` singleton sets: `root[i] = i`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            root: (0..n).collect(),
        }
    }

    /// Number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns `true` if there are no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Representative of the set containing `x`. Every node visited on
    /// the way is repointed directly at the representative.
    ///
    /// `x` must be less than [`len`](Self::len).
    pub fn find(&mut self, x: NodeId) -> NodeId {
        let mut representative = x;
        while self.root[representative] != representative {
            representative = self.root[representative];
        }

        let mut node = x;
        while self.root[node] != representative {
            let next = self.root[node];
            self.root[node] = representative;
            node = next;
        }

        representative
    }

    /// Merge the sets containing `a` and `b`: `root[find(a)] = find(b)`.
    pub fn join(&mut self, a: NodeId, b: NodeId) {
        let ra = self.find(a);
        let rb = self.find(b);
        self.root[ra] = rb;
    }

    /// Returns `true` if `a` and `b` are in the same set.
    pub fn same(&mut self, a: NodeId, b: NodeId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Current root pointers, without compressing anything.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.root
    }
}
