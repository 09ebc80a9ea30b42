//! Snapshot Types
//!
//! Serialization structs for the network state and the statistics reported
//! while the dynamics run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::FormatError;

/// An undirected edge, endpoints in canonical order (`source < target`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub source: usize,
    pub target: usize,
    #[serde(default)]
    pub weight: f64,
}

impl EdgeSnapshot {
    /// Creates an edge, swapping the endpoints if needed.
    pub fn new(a: usize, b: usize, weight: f64) -> Self {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        Self {
            source,
            target,
            weight,
        }
    }

    pub fn pair(&self) -> (usize, usize) {
        (self.source, self.target)
    }
}

/// The network handed to the serializers: node count plus edges in creation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub agent_count: usize,
    pub edges: Vec<EdgeSnapshot>,
    /// Agent attributes by id, empty when not recorded
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<f64>,
}

impl NetworkSnapshot {
    pub fn new(agent_count: usize) -> Self {
        Self {
            agent_count,
            edges: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Appends an unweighted edge (builder style)
    pub fn with_edge(mut self, a: usize, b: usize) -> Self {
        self.edges.push(EdgeSnapshot::new(a, b, 0.0));
        self
    }

    /// Maximum number of undirected edges for this node count, n(n-1)/2
    pub fn max_links(&self) -> usize {
        self.agent_count * self.agent_count.saturating_sub(1) / 2
    }

    /// Ratio of existing edges to the maximum possible
    pub fn density(&self) -> f64 {
        let max = self.max_links();
        if max == 0 {
            return 0.0;
        }
        self.edges.len() as f64 / max as f64
    }

    /// Edge set with normalized endpoint order, for order-insensitive comparison
    pub fn edge_set(&self) -> BTreeSet<(usize, usize)> {
        self.edges
            .iter()
            .map(|e| EdgeSnapshot::new(e.source, e.target, e.weight).pair())
            .collect()
    }

    /// Checks node ranges, self-loops and duplicate pairs
    pub fn validate(&self) -> Result<(), FormatError> {
        let mut seen = BTreeSet::new();
        for edge in &self.edges {
            if edge.source >= self.agent_count || edge.target >= self.agent_count {
                return Err(FormatError::NodeOutOfRange {
                    from: edge.source,
                    to: edge.target,
                    agent_count: self.agent_count,
                });
            }
            if edge.source == edge.target {
                return Err(FormatError::SelfLoop(edge.source));
            }
            let pair = EdgeSnapshot::new(edge.source, edge.target, 0.0).pair();
            if !seen.insert(pair) {
                return Err(FormatError::DuplicateEdge(pair.0, pair.1));
            }
        }
        Ok(())
    }
}

/// Statistics for a single iteration, one row of the progress table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u64,
    /// Links removed-and-replaced in the pass that produced this state
    pub removed: usize,
    pub links: usize,
    pub density: f64,
    pub clustering: f64,
    pub assortativity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_path_length: Option<f64>,
}

/// Model parameters and final network statistics of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub population_size: usize,
    pub initial_links: usize,
    pub assimilation_threshold: f64,
    pub assimilation_step: f64,
    pub link_threshold: f64,
    pub seed: u64,
    pub iterations: u64,
    pub links: usize,
    pub density: f64,
    pub clustering: f64,
    pub assortativity: f64,
    pub average_path_length: f64,
    /// Ordered agent pairs connected by some path
    pub reachable_pairs: u64,
}

/// Complete statistics output of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub summary: RunSummary,
    pub history: Vec<IterationRecord>,
}

impl SimulationReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_canonical_order() {
        let edge = EdgeSnapshot::new(7, 2, 0.5);
        assert_eq!(edge.pair(), (2, 7));
        assert_eq!(edge.weight, 0.5);
    }

    #[test]
    fn test_density() {
        let snapshot = NetworkSnapshot::new(4).with_edge(0, 1).with_edge(1, 2).with_edge(2, 3);
        assert_eq!(snapshot.max_links(), 6);
        assert!((snapshot.density() - 0.5).abs() < 1e-12);
        assert_eq!(NetworkSnapshot::new(1).density(), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_edges() {
        let out_of_range = NetworkSnapshot::new(2).with_edge(0, 2);
        assert!(matches!(
            out_of_range.validate(),
            Err(FormatError::NodeOutOfRange { .. })
        ));

        let self_loop = NetworkSnapshot::new(3).with_edge(1, 1);
        assert!(matches!(self_loop.validate(), Err(FormatError::SelfLoop(1))));

        let duplicate = NetworkSnapshot::new(3).with_edge(0, 1).with_edge(1, 0);
        assert!(matches!(
            duplicate.validate(),
            Err(FormatError::DuplicateEdge(0, 1))
        ));
    }

    #[test]
    fn test_report_json() {
        let report = SimulationReport {
            summary: RunSummary {
                population_size: 4,
                initial_links: 3,
                assimilation_threshold: 0.5,
                assimilation_step: 0.1,
                link_threshold: 0.9,
                seed: 42,
                iterations: 101,
                links: 3,
                density: 0.5,
                clustering: 0.0,
                assortativity: -0.5,
                average_path_length: 1.5,
                reachable_pairs: 12,
            },
            history: vec![IterationRecord {
                iteration: 0,
                removed: 0,
                links: 3,
                density: 0.5,
                clustering: 0.0,
                assortativity: -0.5,
                average_path_length: None,
            }],
        };

        let json = report.to_json().unwrap();
        assert!(json.contains("\"population_size\": 4"));
        assert!(!json.contains("average_path_length\": null"));

        let parsed = SimulationReport::from_json(&json).unwrap();
        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.history, report.history);
    }
}
