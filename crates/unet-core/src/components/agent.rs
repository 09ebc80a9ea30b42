//! Agent Components
//!
//! An agent holds a scalar attribute in [0, 1]. It is the node weight of the
//! network graph; its links are the graph's incident edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an agent, equal to its index in the population
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which branch of the social comparison fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// Moved toward the peer
    Assimilated,
    /// Moved away from the peer
    Contrasted,
    /// Difference exactly at the threshold
    Inert,
    /// Equal attributes, so no direction to move in
    Undirected { assimilation: bool },
}

#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    attribute: f64,
}

impl Agent {
    pub fn new(id: AgentId, attribute: f64) -> Self {
        Self {
            id,
            attribute: attribute.clamp(0.0, 1.0),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn attribute(&self) -> f64 {
        self.attribute
    }

    /// Set the attribute, clamped to [0, 1]
    pub fn set_attribute(&mut self, value: f64) {
        self.attribute = value.clamp(0.0, 1.0);
    }

    /// Social comparison against a peer's attribute.
    ///
    /// A difference larger than `threshold` assimilates (step toward the
    /// peer), a smaller one contrasts (step away). Only this agent changes.
    pub fn compare(&mut self, peer_attribute: f64, threshold: f64, step: f64) -> ComparisonOutcome {
        let difference = self.attribute - peer_attribute;

        tracing::trace!(
            agent = self.id.0,
            attribute = self.attribute,
            peer_attribute,
            difference = difference.abs(),
            "social comparison"
        );

        if difference.abs() > threshold {
            if difference < 0.0 {
                self.shift(step);
            } else if difference > 0.0 {
                self.shift(-step);
            } else {
                tracing::error!(
                    agent = self.id.0,
                    difference,
                    attribute = self.attribute,
                    peer_attribute,
                    "impossible condition in assimilation: attributes are equal"
                );
                return ComparisonOutcome::Undirected { assimilation: true };
            }
            ComparisonOutcome::Assimilated
        } else if difference.abs() < threshold {
            if difference < 0.0 {
                self.shift(-step);
            } else if difference > 0.0 {
                self.shift(step);
            } else {
                return ComparisonOutcome::Undirected { assimilation: false };
            }
            ComparisonOutcome::Contrasted
        } else {
            ComparisonOutcome::Inert
        }
    }

    fn shift(&mut self, delta: f64) {
        self.attribute = (self.attribute + delta).clamp(0.0, 1.0);
    }
}
