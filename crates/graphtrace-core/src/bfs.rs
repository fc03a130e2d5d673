//! Breadth-first traversal trace.
//!
//! Records the tree-discovery edges in the order a FIFO breadth-first
//! search finds them. Neighbor list order is the only tie-break, so the
//! same graph and start node always produce the same trace.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::graph::WeightedGraph;
use crate::types::{GraphError, NodeId};

/// One discovery step: `to` was first reached while scanning `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStep {
    /// Node whose neighbor list was being scanned.
    pub from: NodeId,
    /// Newly discovered node.
    pub to: NodeId,
}

/// Ordered breadth-first discovery edges from a start node.
///
/// Holds at most `n - 1` steps; exactly `n - 1` when every node is
/// reachable from [`start`](Self::start).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalTrace {
    pub(crate) start: NodeId,
    pub(crate) steps: Vec<TraversalStep>,
}

impl TraversalTrace {
    /// The node the traversal started from.
    #[must_use]
    pub const fn start(&self) -> NodeId {
        self.start
    }

    /// All discovery steps in order.
    #[must_use]
    pub fn steps(&self) -> &[TraversalStep] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the start node has no neighbors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Nodes in visit order: the start node, then each discovered node.
    #[must_use]
    pub fn visit_order(&self) -> Vec<NodeId> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|s| s.to))
            .collect()
    }
}

/// Run a breadth-first search from `start` and record every edge that
/// discovers a new node.
///
/// Nodes unreachable from `start` never appear in the trace.
///
/// # Errors
///
/// Returns [`GraphError::StartOutOfRange`] if `start` is not a node of
/// `graph`.
pub fn bfs_trace(graph: &WeightedGraph, start: NodeId) -> Result<TraversalTrace, GraphError> {
    let node_count = graph.node_count();
    if start >= node_count {
        return Err(GraphError::StartOutOfRange {
            node: start,
            node_count,
        });
    }

    let adjacency = graph.adjacency();
    let mut visited = vec![false; node_count];
    let mut queue = VecDeque::from([start]);
    let mut steps = Vec::with_capacity(node_count.saturating_sub(1));
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        for neighbor in &adjacency[current] {
            if !visited[neighbor.node] {
                visited[neighbor.node] = true;
                steps.push(TraversalStep {
                    from: current,
                    to: neighbor.node,
                });
                queue.push_back(neighbor.node);
            }
        }
    }

    Ok(TraversalTrace { start, steps })
}
