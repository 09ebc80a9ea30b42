//! Link Components
//!
//! An undirected, weighted edge between two agents. Endpoints are stored in
//! canonical order (`source < target`) so a pair has a single identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::agent::AgentId;
use crate::error::NetworkError;

/// Stable identifier of a link, never reused within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(pub u64);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    id: LinkId,
    /// In [0, 1]; carried in the model but not used by the dynamics
    weight: f64,
    source: AgentId,
    target: AgentId,
}

impl Link {
    /// Creates a link between two distinct agents in canonical order.
    ///
    /// Finite weights are clamped to [0, 1]; NaN and infinities are rejected.
    pub fn new(id: LinkId, a: AgentId, b: AgentId, weight: f64) -> Result<Self, NetworkError> {
        if a == b {
            return Err(NetworkError::SelfLink(a));
        }
        if !weight.is_finite() {
            return Err(NetworkError::InvalidWeight(weight));
        }
        let (source, target) = Self::canonical(a, b);
        Ok(Self {
            id,
            weight: weight.clamp(0.0, 1.0),
            source,
            target,
        })
    }

    /// Orders a pair so the lower id comes first
    pub fn canonical(a: AgentId, b: AgentId) -> (AgentId, AgentId) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn source(&self) -> AgentId {
        self.source
    }

    pub fn target(&self) -> AgentId {
        self.target
    }

    pub fn endpoints(&self) -> (AgentId, AgentId) {
        (self.source, self.target)
    }

    pub fn connects(&self, agent: AgentId) -> bool {
        self.source == agent || self.target == agent
    }

    /// The opposite endpoint, `None` if `agent` is not an endpoint
    pub fn try_other(&self, agent: AgentId) -> Option<AgentId> {
        if self.target == agent {
            Some(self.source)
        } else if self.source == agent {
            Some(self.target)
        } else {
            None
        }
    }

    /// The opposite endpoint.
    ///
    /// # Panics
    ///
    /// If `agent` is neither endpoint: the caller found this link through an
    /// adjacency list it does not belong to, so the network is corrupted.
    pub fn other(&self, agent: AgentId) -> AgentId {
        match self.try_other(agent) {
            Some(other) => other,
            None => panic!(
                "agent {}'s link list is corrupted: link {} connects {} and {}",
                agent, self.id, self.source, self.target
            ),
        }
    }
}
