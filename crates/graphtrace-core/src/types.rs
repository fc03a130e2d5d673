//! Shared types for graph construction and trace generation.

use serde::{Deserialize, Serialize};

/// Node identifier. Nodes of a graph with `n` nodes are `0..n`.
pub type NodeId = usize;

/// A 2D node position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Raw output of a geometric graph generator: one position per node and
/// the undirected node pairs that are geometrically connected.
///
/// The node count is `positions.len()`; node `i` sits at `positions[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricInput {
    /// Position of each node, indexed by [`NodeId`].
    pub positions: Vec<Point>,
    /// Undirected edges as node pairs.
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GeometricInput {
    /// Number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.positions.len()
    }
}

/// One entry of a node's neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// The adjacent node.
    pub node: NodeId,
    /// Weight of the connecting edge.
    pub weight: f64,
}

/// An undirected edge with its derived weight.
///
/// `u` and `v` keep the orientation in which the edge was first supplied;
/// the edge itself is unordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    /// First endpoint.
    pub u: NodeId,
    /// Second endpoint.
    pub v: NodeId,
    /// Scaled Euclidean length, rounded to one decimal place.
    pub weight: f64,
}

impl WeightedEdge {
    /// Create a new weighted edge.
    #[must_use]
    pub const fn new(u: NodeId, v: NodeId, weight: f64) -> Self {
        Self { u, v, weight }
    }

    /// The endpoints as an unordered key (`min`, `max`).
    #[must_use]
    pub fn key(&self) -> (NodeId, NodeId) {
        (self.u.min(self.v), self.u.max(self.v))
    }
}

/// Configuration for the random geometric graph generator.
///
/// # Future work
///
/// Only normally distributed positions are supported. A uniform
/// placement mode would need its own parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of nodes to place.
    pub node_count: usize,

    /// Connection radius. Two distinct nodes are joined when their
    /// Euclidean distance is at most this value.
    pub radius: f64,

    /// Standard deviation of the zero-mean normal distribution used for
    /// both coordinates of every node.
    pub position_sigma: f64,

    /// Seed for the position generator. Equal seeds produce equal graphs.
    pub seed: u64,
}

impl GeneratorConfig {
    /// Default number of nodes.
    pub const DEFAULT_NODE_COUNT: usize = 20;
    /// Default connection radius.
    pub const DEFAULT_RADIUS: f64 = 0.172;
    /// Default coordinate standard deviation.
    pub const DEFAULT_POSITION_SIGMA: f64 = 0.12;
    /// Default seed.
    pub const DEFAULT_SEED: u64 = 7;

    /// Check the invariants the generator relies on.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConfig`] if `radius` is negative or
    /// not finite, or if `position_sigma` is not a positive finite number.
    pub fn validate(&self) -> Result<(), GraphError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "radius must be finite and non-negative, got {}",
                self.radius
            )));
        }
        if !self.position_sigma.is_finite() || self.position_sigma <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "position_sigma must be finite and positive, got {}",
                self.position_sigma
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count: Self::DEFAULT_NODE_COUNT,
            radius: Self::DEFAULT_RADIUS,
            position_sigma: Self::DEFAULT_POSITION_SIGMA,
            seed: Self::DEFAULT_SEED,
        }
    }
}

/// Errors raised while building a graph or generating a trace.
///
/// A disconnected graph is not an error: traces over it are simply
/// shorter.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum GraphError {
    /// An edge endpoint lies outside `0..node_count`.
    #[error("edge ({u}, {v}) references node {node} outside 0..{node_count}")]
    EdgeOutOfRange {
        /// First endpoint as supplied.
        u: NodeId,
        /// Second endpoint as supplied.
        v: NodeId,
        /// The offending endpoint.
        node: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// The BFS start node lies outside `0..node_count`.
    #[error("start node {node} is outside 0..{node_count}")]
    StartOutOfRange {
        /// The requested start node.
        node: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// A node position has a NaN or infinite coordinate.
    #[error("node {node} has non-finite position ({x}, {y})")]
    NonFinitePosition {
        /// The node with the bad position.
        node: NodeId,
        /// Horizontal coordinate as supplied.
        x: f64,
        /// Vertical coordinate as supplied.
        y: f64,
    },

    /// Generator configuration is invalid.
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_is_finite() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn point_into_geo() {
        let g: geo::Point<f64> = Point::new(3.0, 4.0).into();
        assert!((g.x() - 3.0).abs() < f64::EPSILON);
        assert!((g.y() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn edge_key_is_orientation_free() {
        assert_eq!(WeightedEdge::new(4, 1, 2.0).key(), (1, 4));
        assert_eq!(WeightedEdge::new(1, 4, 2.0).key(), (1, 4));
    }

    #[test]
    fn generator_config_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.node_count, 20);
        assert!((config.radius - 0.172).abs() < f64::EPSILON);
        assert!((config.position_sigma - 0.12).abs() < f64::EPSILON);
        assert_eq!(config.seed, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn generator_config_rejects_negative_radius() {
        let config = GeneratorConfig {
            radius: -0.1,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig(_))
        ));
    }

    #[test]
    fn generator_config_rejects_zero_sigma() {
        let config = GeneratorConfig {
            position_sigma: 0.0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig(_))
        ));
    }

    #[test]
    fn generator_config_partial_json_fills_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"node_count": 5}"#).unwrap();
        assert_eq!(config.node_count, 5);
        assert_eq!(config.seed, GeneratorConfig::DEFAULT_SEED);
    }

    #[test]
    fn error_edge_out_of_range_display() {
        let err = GraphError::EdgeOutOfRange {
            u: 0,
            v: 9,
            node: 9,
            node_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "edge (0, 9) references node 9 outside 0..3"
        );
    }

    #[test]
    fn error_start_out_of_range_display() {
        let err = GraphError::StartOutOfRange {
            node: 5,
            node_count: 2,
        };
        assert_eq!(err.to_string(), "start node 5 is outside 0..2");
    }

    #[test]
    fn error_serde_round_trip() {
        let err = GraphError::StartOutOfRange {
            node: 3,
            node_count: 1,
        };
        let json = serde_json::to_string(&err).unwrap();
        let back: GraphError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
