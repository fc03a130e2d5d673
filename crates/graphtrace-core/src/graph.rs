//! Weighted graph construction: derive edge weights from node positions
//! and materialize both the adjacency lists and the canonical edge list.

use std::collections::HashSet;

use geo::Euclidean;
use geo::line_measures::Distance;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::types::{GeometricInput, GraphError, Neighbor, NodeId, Point, WeightedEdge};

/// Factor applied to the Euclidean distance before rounding.
pub const WEIGHT_SCALE: f64 = 100.0;

/// Weight of the edge between two positions: Euclidean distance scaled by
/// [`WEIGHT_SCALE`] and rounded to one decimal place.
#[must_use]
pub fn edge_weight(a: Point, b: Point) -> f64 {
    let distance = Euclidean.distance(&geo::Point::from(a), &geo::Point::from(b));
    round_to_tenth(distance * WEIGHT_SCALE)
}

/// Round to one decimal place from the exact binary value, ties to even.
///
/// `{:.1}` formatting is correctly rounded, so `0.449...96` stays `0.4`
/// where `(v * 10.0).round()` would first land on `4.5` and carry up.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// An undirected weighted graph with explicit symmetric adjacency.
///
/// Produced by [`WeightedGraph::build`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedGraph {
    adjacency: Vec<Vec<Neighbor>>,
    edges: Vec<WeightedEdge>,
}

impl WeightedGraph {
    /// Build the adjacency structure and edge-weight list from node
    /// positions and a raw edge set.
    ///
    /// Every raw edge `(a, b)` appends `(b, w)` to `a`'s neighbor list,
    /// `(a, w)` to `b`'s, and `(a, b, w)` to the edge list. A pair that
    /// was already supplied (in either orientation) is stored once, at
    /// its first occurrence. A self-loop `(a, a)` has weight `0.0` and
    /// lands in `a`'s list twice.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NonFinitePosition`] if any position has a
    /// non-finite coordinate and [`GraphError::EdgeOutOfRange`] if an
    /// edge names a node outside `0..positions.len()`.
    pub fn build(input: &GeometricInput) -> Result<Self, GraphError> {
        let positions = &input.positions;
        let node_count = positions.len();

        if let Some((node, p)) = positions.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(GraphError::NonFinitePosition {
                node,
                x: p.x,
                y: p.y,
            });
        }

        let mut adjacency: Vec<Vec<Neighbor>> = vec![Vec::new(); node_count];
        let mut edges = Vec::with_capacity(input.edges.len());
        let mut seen: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(input.edges.len());

        for &(a, b) in &input.edges {
            for node in [a, b] {
                if node >= node_count {
                    return Err(GraphError::EdgeOutOfRange {
                        u: a,
                        v: b,
                        node,
                        node_count,
                    });
                }
            }

            let edge = WeightedEdge::new(a, b, edge_weight(positions[a], positions[b]));
            if !seen.insert(edge.key()) {
                continue;
            }

            adjacency[a].push(Neighbor {
                node: b,
                weight: edge.weight,
            });
            adjacency[b].push(Neighbor {
                node: a,
                weight: edge.weight,
            });
            edges.push(edge);
        }

        Ok(Self { adjacency, edges })
    }

    /// Number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Neighbor list of `node` in insertion order, or `None` if the node
    /// does not exist.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> Option<&[Neighbor]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    /// All neighbor lists, indexed by [`NodeId`].
    #[must_use]
    pub fn adjacency(&self) -> &[Vec<Neighbor>] {
        &self.adjacency
    }

    /// The canonical edge-weight list, one entry per undirected edge, in
    /// input order.
    #[must_use]
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Number of nodes with no incident edge.
    #[must_use]
    pub fn isolated_node_count(&self) -> usize {
        self.adjacency.iter().filter(|n| n.is_empty()).count()
    }

    /// Export as a `petgraph` undirected graph. Node `i` maps to
    /// `NodeIndex::new(i)`; edges keep their list order.
    #[must_use]
    pub fn to_petgraph(&self) -> UnGraph<(), f64> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count());
        for _ in 0..self.node_count() {
            graph.add_node(());
        }
        for edge in &self.edges {
            graph.add_edge(NodeIndex::new(edge.u), NodeIndex::new(edge.v), edge.weight);
        }
        graph
    }
}
