//! The social network: every agent and every link alive in a run.
//!
//! Agents are the nodes and links the edges of a petgraph `StableUnGraph`.
//! Node indices equal agent ids since agents are never removed; edge indices
//! stay valid across removals, but freed slots are reused, so creation order
//! is recovered from the monotonically increasing [`LinkId`].

use bevy_ecs::prelude::*;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use std::collections::HashSet;

use unet_snapshot::{EdgeSnapshot, NetworkSnapshot};

use super::agent::{Agent, AgentId, ComparisonOutcome};
use super::link::{Link, LinkId};
use crate::error::NetworkError;
use crate::SimRng;

fn node(agent: AgentId) -> NodeIndex {
    NodeIndex::new(agent.0)
}

/// Resource: all agents and links of the simulation
#[derive(Resource, Debug, Default)]
pub struct SocialNetwork {
    graph: StableUnGraph<Agent, Link>,
    next_link_id: u64,
}

impl SocialNetwork {
    /// Creates an unlinked network over the given population.
    ///
    /// Agents are re-identified by their position so ids always equal indices.
    pub fn new(agents: Vec<Agent>) -> Self {
        let mut graph = StableUnGraph::with_capacity(agents.len(), 0);
        for (index, agent) in agents.into_iter().enumerate() {
            graph.add_node(Agent::new(AgentId(index), agent.attribute()));
        }
        Self {
            graph,
            next_link_id: 0,
        }
    }

    /// Rebuilds a network from a snapshot. Agents without a recorded
    /// attribute start at 0.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Self, NetworkError> {
        let agents = (0..snapshot.agent_count)
            .map(|index| {
                let attribute = snapshot.attributes.get(index).copied().unwrap_or(0.0);
                Agent::new(AgentId(index), attribute)
            })
            .collect();
        let mut network = Self::new(agents);
        for edge in &snapshot.edges {
            network.insert_link(AgentId(edge.source), AgentId(edge.target), edge.weight)?;
        }
        Ok(network)
    }

    pub fn agent_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// n(n-1)/2 for n agents
    pub fn max_links(&self) -> usize {
        max_links(self.agent_count())
    }

    /// Existing links over possible links, 0 when no link is possible
    pub fn density(&self) -> f64 {
        let max = self.max_links();
        if max == 0 {
            return 0.0;
        }
        self.link_count() as f64 / max as f64
    }

    /// Agents in id order
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.graph.node_weights()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.graph.node_weight(node(id))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.graph.node_weight_mut(node(id))
    }

    /// All links in creation order
    pub fn links(&self) -> impl Iterator<Item = &Link> + '_ {
        let mut links: Vec<&Link> = self.graph.edge_weights().collect();
        links.sort_by_key(|link| link.id());
        links.into_iter()
    }

    pub fn is_linked(&self, a: AgentId, b: AgentId) -> bool {
        self.graph.contains_edge(node(a), node(b))
    }

    /// True if both agents exist, differ, and are not linked yet
    pub fn can_link(&self, a: AgentId, b: AgentId) -> bool {
        if a == b {
            tracing::trace!(agent = a.0, "cannot link an agent to itself, retrying");
            return false;
        }
        if a.0 >= self.agent_count() || b.0 >= self.agent_count() {
            return false;
        }
        if self.is_linked(a, b) {
            tracing::trace!(a = a.0, b = b.0, "that link already exists, retrying");
            return false;
        }
        true
    }

    /// Creates a link between two existing, unlinked agents
    pub fn insert_link(&mut self, a: AgentId, b: AgentId, weight: f64) -> Result<LinkId, NetworkError> {
        for agent in [a, b] {
            if agent.0 >= self.agent_count() {
                return Err(NetworkError::UnknownAgent(agent));
            }
        }

        let id = LinkId(self.next_link_id);
        let link = Link::new(id, a, b, weight)?;
        let (source, target) = link.endpoints();
        if self.is_linked(source, target) {
            return Err(NetworkError::AlreadyLinked(source, target));
        }

        self.next_link_id += 1;
        self.graph.add_edge(node(source), node(target), link);

        tracing::trace!(link = %id, source = source.0, target = target.0, "linked");
        Ok(id)
    }

    /// Removes the link between two agents and hands it back.
    ///
    /// A missing link is a logical error returned to the caller. Should the
    /// pair still be linked afterwards (a parallel link), that is reported and
    /// left in place: only the first match is removed.
    pub fn remove_link_between(&mut self, a: AgentId, b: AgentId) -> Result<Link, NetworkError> {
        let (source, target) = Link::canonical(a, b);
        let link = self
            .graph
            .find_edge(node(source), node(target))
            .and_then(|edge| self.graph.remove_edge(edge))
            .ok_or(NetworkError::LinkNotFound(source, target))?;

        if self.is_linked(source, target) {
            tracing::error!("{}", NetworkError::DuplicateLink(source, target));
        }

        tracing::trace!(link = %link.id(), source = source.0, target = target.0, "unlinked");
        Ok(link)
    }

    /// Agents linked to `agent`, in the order their links were created
    pub fn peers(&self, agent: AgentId) -> Vec<AgentId> {
        let mut incident: Vec<&Link> = self
            .graph
            .edges(node(agent))
            .map(|edge| edge.weight())
            .collect();
        incident.sort_by_key(|link| link.id());
        incident.into_iter().map(|link| link.other(agent)).collect()
    }

    /// A uniformly random peer, or `agent` itself when it has no links.
    ///
    /// Callers must read a self-return as "no peer available".
    pub fn random_peer(&self, agent: AgentId, rng: &mut SimRng) -> AgentId {
        let peers = self.peers(agent);
        if peers.is_empty() {
            return agent;
        }
        peers[rng.uniform_index(peers.len())]
    }

    pub fn degree(&self, agent: AgentId) -> usize {
        self.graph.edges(node(agent)).count()
    }

    /// `agent` compares itself to `peer`; only `agent`'s attribute changes
    pub fn compare(
        &mut self,
        agent: AgentId,
        peer: AgentId,
        threshold: f64,
        step: f64,
    ) -> Result<ComparisonOutcome, NetworkError> {
        let peer_attribute = self
            .agent(peer)
            .map(Agent::attribute)
            .ok_or(NetworkError::UnknownAgent(peer))?;
        let agent = self
            .agent_mut(agent)
            .ok_or(NetworkError::UnknownAgent(agent))?;
        Ok(agent.compare(peer_attribute, threshold, step))
    }

    /// Absolute attribute difference between two agents
    pub fn attribute_gap(&self, a: AgentId, b: AgentId) -> Result<f64, NetworkError> {
        let first = self.agent(a).ok_or(NetworkError::UnknownAgent(a))?;
        let second = self.agent(b).ok_or(NetworkError::UnknownAgent(b))?;
        Ok((first.attribute() - second.attribute()).abs())
    }

    /// Verifies that agent ids match node indices and that every link record
    /// agrees with the graph edge carrying it
    pub fn check_consistency(&self) -> Result<(), NetworkError> {
        for index in self.graph.node_indices() {
            let agent = self.graph[index].id();
            if agent.0 != index.index() {
                return Err(NetworkError::CorruptAdjacency {
                    agent,
                    link: LinkId(self.next_link_id),
                });
            }
        }

        let mut pairs = HashSet::new();
        let mut ids = HashSet::new();
        for edge in self.graph.edge_indices() {
            let link = &self.graph[edge];
            let corrupt = NetworkError::CorruptAdjacency {
                agent: link.source(),
                link: link.id(),
            };
            let Some((a, b)) = self.graph.edge_endpoints(edge) else {
                return Err(corrupt);
            };
            let endpoints = Link::canonical(AgentId(a.index()), AgentId(b.index()));
            if endpoints != link.endpoints()
                || link.source() >= link.target()
                || link.id().0 >= self.next_link_id
                || !pairs.insert(endpoints)
                || !ids.insert(link.id())
            {
                return Err(corrupt);
            }
        }
        Ok(())
    }

    /// Node count, edges in creation order and attributes
    pub fn to_snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            agent_count: self.agent_count(),
            edges: self
                .links()
                .map(|link| EdgeSnapshot::new(link.source().0, link.target().0, link.weight()))
                .collect(),
            attributes: self.agents().map(Agent::attribute).collect(),
        }
    }
}

/// n(n-1)/2
pub fn max_links(agent_count: usize) -> usize {
    agent_count * agent_count.saturating_sub(1) / 2
}
