//! Kruskal minimum-spanning-forest trace.
//!
//! Every edge is recorded in ascending-weight order together with the
//! union-find decision made for it, so rejected edges ("considered but
//! skipped") are part of the trace as well.
//!
//! # Algorithm
//!
//! 1. Copy the edge list and stable-sort the copy by weight. Equal
//!    weights keep their input order.
//! 2. Start from singleton sets `root[i] = i`.
//! 3. For each edge `(a, b, w)`: if `find(a) != find(b)` the edge is
//!    accepted and the sets are joined, otherwise it closes a cycle and
//!    is rejected.

use serde::{Deserialize, Serialize};

use crate::types::{GraphError, WeightedEdge};
use crate::union_find::DisjointSet;

/// One Kruskal decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MstStep {
    /// The edge under consideration.
    pub edge: WeightedEdge,
    /// Whether the edge joined two components of the forest.
    pub accepted: bool,
}

/// Ordered Kruskal decisions, one per input edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MstTrace {
    pub(crate) node_count: usize,
    pub(crate) steps: Vec<MstStep>,
}

impl MstTrace {
    /// Number of nodes the trace was computed over.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// All decisions in ascending-weight order.
    #[must_use]
    pub fn steps(&self) -> &[MstStep] {
        &self.steps
    }

    /// Number of decisions (equal to the number of input edges).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if there were no edges to consider.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The accepted edges, in acceptance order.
    pub fn accepted_edges(&self) -> impl Iterator<Item = &WeightedEdge> {
        self.steps.iter().filter(|s| s.accepted).map(|s| &s.edge)
    }

    /// Number of accepted edges. At most `node_count - 1`.
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.steps.iter().filter(|s| s.accepted).count()
    }

    /// Number of rejected edges.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.len() - self.accepted_count()
    }

    /// Sum of accepted edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.accepted_edges().map(|e| e.weight).sum()
    }

    /// Number of trees in the resulting spanning forest (isolated nodes
    /// count as single-node trees).
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.node_count - self.accepted_count()
    }

    /// Returns `true` if the accepted edges span all nodes.
    #[must_use]
    pub fn is_spanning_tree(&self) -> bool {
        self.component_count() <= 1
    }
}

/// Run Kruskal's algorithm over `edges` and record every decision.
///
/// `edges` is left untouched; a private copy is sorted. The union-find
/// state lives only for the duration of this call.
///
/// # Errors
///
/// Returns [`GraphError::EdgeOutOfRange`] if any endpoint is not less
/// than `node_count`.
pub fn mst_trace(edges: &[WeightedEdge], node_count: usize) -> Result<MstTrace, GraphError> {
    for edge in edges {
        for node in [edge.u, edge.v] {
            if node >= node_count {
                return Err(GraphError::EdgeOutOfRange {
                    u: edge.u,
                    v: edge.v,
                    node,
                    node_count,
                });
            }
        }
    }

    // `sort_by` is stable: equal weights keep their input order.
    let mut sorted = edges.to_vec();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut sets = DisjointSet::new(node_count);
    let steps = sorted
        .into_iter()
        .map(|edge| {
            let accepted = !sets.same(edge.u, edge.v);
            if accepted {
                sets.join(edge.u, edge.v);
            }
            MstStep { edge, accepted }
        })
        .collect();

    Ok(MstTrace { node_count, steps })
}
