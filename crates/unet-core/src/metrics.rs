//! Network Metrics
//!
//! Structural statistics reported every iteration: degree assortativity,
//! the global clustering coefficient and the average shortest-path length.

use std::collections::{HashSet, VecDeque};

use crate::components::{AgentId, SocialNetwork};

/// Pearson correlation between the degrees of the two endpoints of every link.
///
/// Returns 0 when either endpoint degree has no variance (including an
/// empty network), where the correlation is undefined.
pub fn assortativity(network: &SocialNetwork) -> f64 {
    let n = network.link_count() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;

    for link in network.links() {
        let x = network.degree(link.source()) as f64;
        let y = network.degree(link.target()) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let variance_x = n * sum_x2 - sum_x * sum_x;
    let variance_y = n * sum_y2 - sum_y * sum_y;
    if variance_x == 0.0 || variance_y == 0.0 {
        tracing::debug!("no variance in degree of links");
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / (variance_x * variance_y).sqrt()
}

/// Fraction of ordered neighbour pairs that are linked themselves.
///
/// Every link inside the neighbourhood is counted from both ends, matching
/// the `size * (size - 1)` denominator. Fewer than two neighbours gives 0.
pub fn local_clustering(network: &SocialNetwork, agent: AgentId) -> f64 {
    let neighbourhood = network.peers(agent);
    let size = neighbourhood.len();
    if size < 2 {
        return 0.0;
    }

    let members: HashSet<AgentId> = neighbourhood.iter().copied().collect();
    let closed: usize = neighbourhood
        .iter()
        .map(|&peer| {
            network
                .peers(peer)
                .into_iter()
                .filter(|other| members.contains(other))
                .count()
        })
        .sum();

    closed as f64 / (size * (size - 1)) as f64
}

/// Mean local clustering over all agents, 0 for an empty population
pub fn clustering_coefficient(network: &SocialNetwork) -> f64 {
    let n = network.agent_count();
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = network
        .agents()
        .map(|agent| local_clustering(network, agent.id()))
        .sum();
    sum / n as f64
}

/// Shortest-path totals from a breadth-first search out of every agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathLengthSummary {
    /// Sum of hop distances over all reachable ordered pairs
    pub total_distance: u64,
    /// Ordered pairs (a, b), a != b, with a path from a to b
    pub reachable_pairs: u64,
    /// n(n-1)
    pub ordered_pairs: u64,
}

impl PathLengthSummary {
    /// Total distance over all ordered pairs. Unreachable pairs add nothing
    /// to the numerator, so disconnected networks read shorter than they are.
    pub fn average(&self) -> f64 {
        if self.ordered_pairs == 0 {
            return 0.0;
        }
        self.total_distance as f64 / self.ordered_pairs as f64
    }

    /// Total distance over the pairs that are actually connected
    pub fn average_reachable(&self) -> f64 {
        if self.reachable_pairs == 0 {
            return 0.0;
        }
        self.total_distance as f64 / self.reachable_pairs as f64
    }

    pub fn is_connected(&self) -> bool {
        self.reachable_pairs == self.ordered_pairs
    }
}

/// Runs a breadth-first search from every agent and sums hop distances
pub fn path_lengths(network: &SocialNetwork) -> PathLengthSummary {
    let n = network.agent_count();
    let mut summary = PathLengthSummary {
        ordered_pairs: (n as u64) * (n as u64).saturating_sub(1),
        ..PathLengthSummary::default()
    };

    let mut distance: Vec<Option<u64>> = vec![None; n];
    let mut queue = VecDeque::new();

    for start in 0..n {
        distance.iter_mut().for_each(|d| *d = None);
        distance[start] = Some(0);
        queue.push_back(AgentId(start));

        while let Some(current) = queue.pop_front() {
            let steps = distance[current.0].unwrap_or_default() + 1;
            for peer in network.peers(current) {
                if distance[peer.0].is_some() {
                    continue;
                }
                distance[peer.0] = Some(steps);
                summary.total_distance += steps;
                summary.reachable_pairs += 1;
                queue.push_back(peer);
            }
        }
    }

    summary
}

/// Average shortest-path length over all n(n-1) ordered pairs
pub fn average_path_length(network: &SocialNetwork) -> f64 {
    path_lengths(network).average()
}
