//! graphtrace-core: weighted geometric graphs with replayable traversal
//! and spanning-tree traces (sans-IO).
//!
//! Turns node positions and raw undirected pairs into:
//! weighted adjacency -> breadth-first discovery trace ->
//! Kruskal decision trace (accepted and rejected edges).
//!
//! Every trace is fully materialized so a renderer can index it with a
//! wrapping frame counter (see [`playback`]). This crate has **no I/O
//! dependencies**; reading files, printing, and wall-clock time live in
//! the `graphtrace` binary.

pub mod bfs;
pub mod diagnostics;
pub mod geometric;
pub mod graph;
pub mod kruskal;
pub mod playback;
pub mod types;
pub mod union_find;

use serde::{Deserialize, Serialize};

pub use bfs::{TraversalStep, TraversalTrace, bfs_trace};
pub use diagnostics::{Clock, TraceDiagnostics, trace_with_diagnostics};
pub use graph::{WeightedGraph, edge_weight};
pub use kruskal::{MstStep, MstTrace, mst_trace};
pub use playback::{BfsFrame, MstFrame};
pub use types::{
    GeneratorConfig, GeometricInput, GraphError, Neighbor, NodeId, Point, WeightedEdge,
};

/// Everything computed for one input: the weighted graph and both traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Adjacency structure and edge-weight list.
    pub graph: WeightedGraph,
    /// Breadth-first discovery trace from the requested start node.
    pub bfs: TraversalTrace,
    /// Kruskal decisions over the graph's edge list.
    pub mst: MstTrace,
}

/// Build the weighted graph and compute both traces.
///
/// # Steps
///
/// 1. Derive edge weights and adjacency ([`WeightedGraph::build`])
/// 2. Breadth-first trace from `start` ([`bfs_trace`])
/// 3. Kruskal trace over the edge-weight list ([`mst_trace`])
///
/// # Errors
///
/// Returns [`GraphError::NonFinitePosition`] or
/// [`GraphError::EdgeOutOfRange`] for malformed input, and
/// [`GraphError::StartOutOfRange`] if `start` is not a node.
pub fn trace(input: &GeometricInput, start: NodeId) -> Result<TraceResult, GraphError> {
    let graph = WeightedGraph::build(input)?;
    let bfs = bfs_trace(&graph, start)?;
    let mst = mst_trace(graph.edges(), graph.node_count())?;
    Ok(TraceResult { graph, bfs, mst })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn triangle() -> GeometricInput {
        GeometricInput {
            positions: vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0),
            ],
            edges: vec![(0, 1), (0, 2), (1, 2)],
        }
    }

    #[test]
    fn triangle_weights() {
        let result = trace(&triangle(), 0).unwrap();
        let weights: Vec<f64> = result.graph.edges().iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![100.0, 100.0, 141.4]);
    }

    #[test]
    fn triangle_mst_accepts_short_edges_in_input_order() {
        let result = trace(&triangle(), 0).unwrap();
        let steps = result.mst.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!((steps[0].edge.u, steps[0].edge.v), (0, 1));
        assert!(steps[0].accepted);
        assert_eq!((steps[1].edge.u, steps[1].edge.v), (0, 2));
        assert!(steps[1].accepted);
        assert_eq!((steps[2].edge.u, steps[2].edge.v), (1, 2));
        assert!(!steps[2].accepted);
        assert_eq!(result.mst.total_weight(), 200.0);
    }

    #[test]
    fn triangle_bfs_from_zero() {
        let result = trace(&triangle(), 0).unwrap();
        assert_eq!(
            result.bfs.steps(),
            &[
                TraversalStep { from: 0, to: 1 },
                TraversalStep { from: 0, to: 2 },
            ]
        );
    }

    #[test]
    fn bad_start_is_reported() {
        assert_eq!(
            trace(&triangle(), 3).unwrap_err(),
            GraphError::StartOutOfRange {
                node: 3,
                node_count: 3,
            }
        );
    }

    #[test]
    fn generated_default_graph_traces() {
        let input = geometric::generate(&GeneratorConfig::default()).unwrap();
        let result = trace(&input, 0).unwrap();
        assert_eq!(result.graph.node_count(), GeneratorConfig::DEFAULT_NODE_COUNT);
        assert_eq!(result.mst.len(), result.graph.edge_count());
        assert!(result.bfs.len() < result.graph.node_count());
    }

    #[test]
    fn result_serde_round_trip() {
        let result = trace(&triangle(), 0).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: TraceResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
