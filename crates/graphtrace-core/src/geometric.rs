//! Seeded random geometric graph generation.
//!
//! Places nodes with normally distributed coordinates and connects every
//! pair of nodes that lie within a fixed radius of each other. The output
//! is a plain [`GeometricInput`]; weights are derived later by
//! [`WeightedGraph::build`](crate::WeightedGraph::build).

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::types::{GeneratorConfig, GeometricInput, GraphError, NodeId, Point};

/// A node position tagged with its identifier, for R\*-tree insertion.
type IndexedPosition = GeomWithData<[f64; 2], NodeId>;

/// Generate node positions and radius-based edges from `config`.
///
/// Both coordinates of every node are drawn from `N(0, position_sigma)`
/// using a PCG generator seeded with `config.seed`. An edge `(u, v)` with
/// `u < v` is emitted for every pair at Euclidean distance `<= radius`.
/// Edges are sorted lexicographically.
///
/// # Errors
///
/// Returns [`GraphError::InvalidConfig`] if the configuration fails
/// [`GeneratorConfig::validate`].
pub fn generate(config: &GeneratorConfig) -> Result<GeometricInput, GraphError> {
    config.validate()?;

    let normal = Normal::new(0.0, config.position_sigma)
        .map_err(|e| GraphError::InvalidConfig(format!("position distribution: {e}")))?;
    let mut rng = Pcg64::seed_from_u64(config.seed);

    let positions: Vec<Point> = (0..config.node_count)
        .map(|_| {
            let x = normal.sample(&mut rng);
            let y = normal.sample(&mut rng);
            Point::new(x, y)
        })
        .collect();

    let edges = pairs_within_radius(&positions, config.radius);

    Ok(GeometricInput { positions, edges })
}

/// All node pairs `(u, v)`, `u < v`, whose distance is at most `radius`,
/// in lexicographic order.
fn pairs_within_radius(positions: &[Point], radius: f64) -> Vec<(NodeId, NodeId)> {
    let entries: Vec<IndexedPosition> = positions
        .iter()
        .enumerate()
        .map(|(i, p)| GeomWithData::new([p.x, p.y], i))
        .collect();
    let tree = RTree::bulk_load(entries);
    let radius_squared = radius * radius;

    let mut edges = Vec::new();
    for (u, p) in positions.iter().enumerate() {
        let mut near: Vec<NodeId> = tree
            .locate_within_distance([p.x, p.y], radius_squared)
            .map(|entry| entry.data)
            .filter(|&v| v > u)
            .collect();
        near.sort_unstable();
        edges.extend(near.into_iter().map(|v| (u, v)));
    }
    edges
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_reproducible() {
        let config = GeneratorConfig::default();
        let a = generate(&config).unwrap();
        let b = generate(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.node_count(), GeneratorConfig::DEFAULT_NODE_COUNT);
    }

    #[test]
    fn different_seeds_give_different_positions() {
        let a = generate(&GeneratorConfig::default()).unwrap();
        let b = generate(&GeneratorConfig {
            seed: 8,
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert_ne!(a.positions, b.positions);
    }

    #[test]
    fn edges_match_brute_force() {
        for seed in 0..10 {
            let config = GeneratorConfig {
                node_count: 40,
                seed,
                ..GeneratorConfig::default()
            };
            let input = generate(&config).unwrap();
            let p = &input.positions;

            let mut expected = Vec::new();
            for u in 0..p.len() {
                for v in (u + 1)..p.len() {
                    let dx = p[u].x - p[v].x;
                    let dy = p[u].y - p[v].y;
                    if dx * dx + dy * dy <= config.radius * config.radius {
                        expected.push((u, v));
                    }
                }
            }
            assert_eq!(input.edges, expected, "seed {seed}");
        }
    }

    #[test]
    fn edges_are_ordered_and_unique() {
        let input = generate(&GeneratorConfig {
            node_count: 60,
            radius: 0.3,
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert!(!input.edges.is_empty());
        for &(u, v) in &input.edges {
            assert!(u < v);
        }
        for pair in input.edges.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn zero_radius_gives_no_edges() {
        let input = generate(&GeneratorConfig {
            radius: 0.0,
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert!(input.edges.is_empty());
    }

    #[test]
    fn zero_nodes() {
        let input = generate(&GeneratorConfig {
            node_count: 0,
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert!(input.positions.is_empty());
        assert!(input.edges.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = generate(&GeneratorConfig {
            position_sigma: f64::NAN,
            ..GeneratorConfig::default()
        });
        assert!(matches!(result, Err(GraphError::InvalidConfig(_))));
    }

    #[test]
    fn positions_are_finite() {
        let input = generate(&GeneratorConfig::default()).unwrap();
        assert!(input.positions.iter().all(|p| p.is_finite()));
    }
}
