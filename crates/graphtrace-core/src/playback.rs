//! Frame-indexed views over traces for a renderer that loops forever.
//!
//! A renderer advances a step counter once per frame and wraps it
//! cyclically over the trace length. These views compute the state to
//! highlight at a given counter value: the current step plus everything
//! that happened before it. Nothing here draws or tracks time.

use serde::Serialize;

use crate::bfs::{TraversalStep, TraversalTrace};
use crate::kruskal::{MstStep, MstTrace};
use crate::types::{NodeId, WeightedEdge};

/// BFS state at one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BfsFrame<'a> {
    /// Position within the trace (`step % trace.len()`).
    pub index: usize,
    /// The discovery edge being shown.
    pub current: TraversalStep,
    /// Discovery edges from earlier steps.
    pub visited_edges: &'a [TraversalStep],
    /// The start node followed by every node discovered in earlier steps.
    pub visited_nodes: Vec<NodeId>,
}

impl BfsFrame<'_> {
    /// The node discovered at this frame.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.current.to
    }
}

/// Kruskal state at one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MstFrame<'a> {
    /// Position within the trace (`step % trace.len()`).
    pub index: usize,
    /// The decision being shown.
    pub current: &'a MstStep,
    /// Edges accepted before this frame.
    pub tree_edges: Vec<WeightedEdge>,
}

impl TraversalTrace {
    /// View of the trace at renderer step `step`, wrapping cyclically.
    ///
    /// Returns `None` if the trace has no steps.
    #[must_use]
    pub fn frame(&self, step: usize) -> Option<BfsFrame<'_>> {
        if self.steps.is_empty() {
            return None;
        }
        let index = step % self.steps.len();
        let visited_edges = &self.steps[..index];
        let visited_nodes = std::iter::once(self.start)
            .chain(visited_edges.iter().map(|s| s.to))
            .collect();
        Some(BfsFrame {
            index,
            current: self.steps[index],
            visited_edges,
            visited_nodes,
        })
    }
}

impl MstTrace {
    /// View of the trace at renderer step `step`, wrapping cyclically.
    ///
    /// Returns `None` if the trace has no steps.
    #[must_use]
    pub fn frame(&self, step: usize) -> Option<MstFrame<'_>> {
        if self.steps.is_empty() {
            return None;
        }
        let index = step % self.steps.len();
        let tree_edges = self.steps[..index]
            .iter()
            .filter(|s| s.accepted)
            .map(|s| s.edge)
            .collect();
        Some(MstFrame {
            index,
            current: &self.steps[index],
            tree_edges,
        })
    }
}
