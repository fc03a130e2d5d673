//! Trace diagnostics: timing and counts for each stage.
//!
//! The core performs no I/O and reads no clock on its own. Callers pass
//! a [`Clock`] so native binaries can use `std::time::Instant` while
//! tests use a deterministic fake.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use petgraph::algo::connected_components;
use serde::{Deserialize, Serialize};

use crate::bfs::bfs_trace;
use crate::graph::WeightedGraph;
use crate::kruskal::mst_trace;
use crate::types::{GeometricInput, GraphError, NodeId};
use crate::TraceResult;

/// Time source injected by the caller.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Capture the current time.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single [`trace_with_diagnostics`] run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDiagnostics {
    /// Weighted graph construction.
    pub build: StageDiagnostics,
    /// Breadth-first trace.
    pub bfs: StageDiagnostics,
    /// Kruskal trace.
    pub mst: StageDiagnostics,
    /// Wall-clock duration of all stages together (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary across stages.
    pub summary: TraceSummary,
}

/// Diagnostics for a single stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Graph construction metrics.
    Build {
        /// Number of nodes.
        node_count: usize,
        /// Number of stored (deduplicated) edges.
        edge_count: usize,
        /// Number of raw edges supplied.
        raw_edge_count: usize,
        /// Nodes without any incident edge.
        isolated_node_count: usize,
        /// Connected components, counting isolated nodes.
        component_count: usize,
        /// Smallest edge weight, if any edge exists.
        min_weight: Option<f64>,
        /// Largest edge weight, if any edge exists.
        max_weight: Option<f64>,
    },
    /// Breadth-first trace metrics.
    Bfs {
        /// Start node.
        start: NodeId,
        /// Number of discovery steps.
        step_count: usize,
        /// Nodes reached, including the start node.
        reached_node_count: usize,
    },
    /// Kruskal trace metrics.
    Mst {
        /// Edges considered.
        considered: usize,
        /// Edges accepted into the forest.
        accepted: usize,
        /// Edges rejected because they would close a cycle.
        rejected: usize,
        /// Sum of accepted weights.
        total_weight: f64,
        /// Trees in the resulting forest.
        component_count: usize,
    },
}

/// High-level summary of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of stored edges.
    pub edge_count: usize,
    /// Whether the graph is connected.
    pub connected: bool,
    /// Length of the BFS trace.
    pub bfs_steps: usize,
    /// Total weight of the spanning forest.
    pub mst_total_weight: f64,
}

/// Build the graph and compute both traces, timing each stage.
///
/// Produces the same [`TraceResult`] as [`crate::trace`].
///
/// # Errors
///
/// Propagates any [`GraphError`] from graph construction or the BFS
/// start check.
pub fn trace_with_diagnostics<C: Clock>(
    input: &GeometricInput,
    start: NodeId,
    clock: &C,
) -> Result<(TraceResult, TraceDiagnostics), GraphError> {
    let total_start = clock.now();

    let t = clock.now();
    let graph = WeightedGraph::build(input)?;
    let component_count = connected_components(&graph.to_petgraph());
    let build = StageDiagnostics {
        duration: clock.elapsed(&t),
        metrics: StageMetrics::Build {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            raw_edge_count: input.edges.len(),
            isolated_node_count: graph.isolated_node_count(),
            component_count,
            min_weight: graph.edges().iter().map(|e| e.weight).reduce(f64::min),
            max_weight: graph.edges().iter().map(|e| e.weight).reduce(f64::max),
        },
    };

    let t = clock.now();
    let bfs = bfs_trace(&graph, start)?;
    let bfs_diag = StageDiagnostics {
        duration: clock.elapsed(&t),
        metrics: StageMetrics::Bfs {
            start,
            step_count: bfs.len(),
            reached_node_count: bfs.len() + 1,
        },
    };

    let t = clock.now();
    let mst = mst_trace(graph.edges(), graph.node_count())?;
    let mst_diag = StageDiagnostics {
        duration: clock.elapsed(&t),
        metrics: StageMetrics::Mst {
            considered: mst.len(),
            accepted: mst.accepted_count(),
            rejected: mst.rejected_count(),
            total_weight: mst.total_weight(),
            component_count: mst.component_count(),
        },
    };

    let summary = TraceSummary {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        connected: component_count <= 1,
        bfs_steps: bfs.len(),
        mst_total_weight: mst.total_weight(),
    };

    let diagnostics = TraceDiagnostics {
        build,
        bfs: bfs_diag,
        mst: mst_diag,
        total_duration: clock.elapsed(&total_start),
        summary,
    };

    Ok((TraceResult { graph, bfs, mst }, diagnostics))
}

impl TraceDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Trace Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Graph: {} nodes, {} edges ({})",
            self.summary.node_count,
            self.summary.edge_count,
            if self.summary.connected {
                "connected"
            } else {
                "disconnected"
            },
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(80));

        let total_ms = duration_ms(self.total_duration);
        let stages = [("Build", &self.build), ("BFS", &self.bfs), ("MST", &self.mst)];

        for (name, diag) in &stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "BFS steps: {}  |  MST total weight: {:.1}",
            self.summary.bfs_steps, self.summary.mst_total_weight,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Build {
            node_count,
            edge_count,
            raw_edge_count,
            isolated_node_count,
            component_count,
            min_weight,
            max_weight,
        } => {
            let range = match (min_weight, max_weight) {
                (Some(lo), Some(hi)) => format!(" w={lo:.1}..{hi:.1}"),
                _ => String::new(),
            };
            format!(
                "{node_count} nodes, {raw_edge_count}->{edge_count} edges, {isolated_node_count} isolated, {component_count} components{range}",
            )
        }
        StageMetrics::Bfs {
            start,
            step_count,
            reached_node_count,
        } => format!("start={start} steps={step_count} reached={reached_node_count}"),
        StageMetrics::Mst {
            considered,
            accepted,
            rejected,
            total_weight,
            component_count,
        } => format!(
            "{considered} considered, {accepted} accepted, {rejected} rejected, weight={total_weight:.1}, trees={component_count}",
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::types::Point;

    /// Fake clock that advances one millisecond per reading.
    struct TickClock {
        ticks: Cell<u64>,
    }

    impl Clock for TickClock {
        type Instant = u64;

        fn now(&self) -> u64 {
            let t = self.ticks.get();
            self.ticks.set(t + 1);
            t
        }

        fn elapsed(&self, since: &u64) -> Duration {
            Duration::from_millis(self.now() - since)
        }
    }

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
    fn duration_ms_converts_correctly() {
        let d = Duration::from_millis(1234);
        let ms = duration_ms(d);
        assert!((ms - 1234.0).abs() < 0.01);
    }

    #[test]
    fn diagnostics_match_plain_trace() {
        let clock = TickClock {
            ticks: Cell::new(0),
        };
        let (result, diag) = trace_with_diagnostics(&triangle(), 0, &clock).unwrap();
        assert_eq!(result, crate::trace(&triangle(), 0).unwrap());
        assert!(diag.summary.connected);
        assert_eq!(diag.summary.bfs_steps, 2);
        assert!((diag.summary.mst_total_weight - 200.0).abs() < 1e-9);
        assert!(diag.total_duration > Duration::ZERO);
    }

    #[test]
    fn build_metrics_report_components() {
        let input = GeometricInput {
            positions: vec![Point::new(0.0, 0.0); 5],
            edges: vec![(0, 1), (1, 0), (2, 3)],
        };
        let clock = TickClock {
            ticks: Cell::new(0),
        };
        let (_, diag) = trace_with_diagnostics(&input, 0, &clock).unwrap();
        match diag.build.metrics {
            StageMetrics::Build {
                raw_edge_count,
                edge_count,
                isolated_node_count,
                component_count,
                ..
            } => {
                assert_eq!(raw_edge_count, 3);
                assert_eq!(edge_count, 2);
                assert_eq!(isolated_node_count, 1);
                assert_eq!(component_count, 3);
            }
            ref other => unreachable!("unexpected metrics {other:?}"),
        }
        assert!(!diag.summary.connected);
    }

    #[test]
    fn errors_propagate() {
        let clock = TickClock {
            ticks: Cell::new(0),
        };
        let err = trace_with_diagnostics(&triangle(), 9, &clock).unwrap_err();
        assert!(matches!(err, GraphError::StartOutOfRange { node: 9, .. }));
    }

    #[test]
    fn report_produces_nonempty_string() {
        let clock = TickClock {
            ticks: Cell::new(0),
        };
        let (_, diag) = trace_with_diagnostics(&triangle(), 0, &clock).unwrap();
        let report = diag.report();
        assert!(report.contains("Trace Diagnostics Report"));
        assert!(report.contains("MST"));
        assert!(report.contains("weight=200.0"));
    }

    #[test]
    fn diagnostics_serde_round_trip() {
        let clock = TickClock {
            ticks: Cell::new(0),
        };
        let (_, diag) = trace_with_diagnostics(&triangle(), 0, &clock).unwrap();
        let json = serde_json::to_string(&diag).unwrap();
        let back: TraceDiagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary.bfs_steps, diag.summary.bfs_steps);
        let drift = back.total_duration.abs_diff(diag.total_duration);
        assert!(drift < Duration::from_micros(1));
    }
}
