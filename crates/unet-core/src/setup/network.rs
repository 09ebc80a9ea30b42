//! Initial Network Construction
//!
//! An Erdős–Rényi style random network: random agent pairs are drawn until
//! the target number of links exists, rejecting self-links and duplicates.

use crate::components::{Agent, AgentId, LinkId, SocialNetwork};
use crate::error::NetworkError;
use crate::SimRng;

/// Creates `size` agents with ids `0..size` and uniform random attributes
pub fn spawn_population(size: usize, rng: &mut SimRng) -> Vec<Agent> {
    (0..size)
        .map(|index| Agent::new(AgentId(index), rng.uniform()))
        .collect()
}

/// Adds random links until the network holds `target` of them.
///
/// Fails up front when `target` exceeds n(n-1)/2, since the sampling loop
/// could never finish.
pub fn build_random_network(
    network: &mut SocialNetwork,
    target: usize,
    rng: &mut SimRng,
) -> Result<(), NetworkError> {
    let max = network.max_links();
    if target > max {
        return Err(NetworkError::TooManyLinks { requested: target, max });
    }

    tracing::info!(
        links = target,
        possible = max,
        "creating random social network according to the Erdős-Rényi (1959) model"
    );

    while network.link_count() < target {
        add_random_link(network, rng)?;
    }

    tracing::info!(links = network.link_count(), "successfully created random network");
    Ok(())
}

/// Links one random pair of distinct, unlinked agents.
///
/// Pairs are drawn with replacement until one is valid; the weight is drawn
/// after the pair is accepted.
pub fn add_random_link(network: &mut SocialNetwork, rng: &mut SimRng) -> Result<LinkId, NetworkError> {
    let max = network.max_links();
    if network.link_count() >= max {
        return Err(NetworkError::TooManyLinks {
            requested: network.link_count() + 1,
            max,
        });
    }

    let n = network.agent_count();
    loop {
        let a = AgentId(rng.uniform_index(n));
        let b = AgentId(rng.uniform_index(n));
        tracing::trace!(a = a.0, b = b.0, "trying to link agents");
        if network.can_link(a, b) {
            let weight = rng.uniform();
            return network.insert_link(a, b, weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_population() {
        let mut rng = SimRng::seeded(1);
        let agents = spawn_population(20, &mut rng);
        assert_eq!(agents.len(), 20);
        for (index, agent) in agents.iter().enumerate() {
            assert_eq!(agent.id(), AgentId(index));
            assert!((0.0..1.0).contains(&agent.attribute()));
        }
    }

    #[test]
    fn test_build_exact_link_count() {
        let mut rng = SimRng::seeded(2);
        let mut network = SocialNetwork::new(spawn_population(30, &mut rng));
        build_random_network(&mut network, 60, &mut rng).unwrap();

        assert_eq!(network.link_count(), 60);
        network.check_consistency().unwrap();
        for link in network.links() {
            assert!(link.source() < link.target());
            assert!((0.0..=1.0).contains(&link.weight()));
        }
    }

    #[test]
    fn test_build_complete_graph() {
        let mut rng = SimRng::seeded(3);
        let mut network = SocialNetwork::new(spawn_population(6, &mut rng));
        build_random_network(&mut network, 15, &mut rng).unwrap();
        assert_eq!(network.link_count(), 15);
        assert_eq!(network.density(), 1.0);
        assert!(matches!(
            add_random_link(&mut network, &mut rng),
            Err(NetworkError::TooManyLinks { max: 15, .. })
        ));
    }

    #[test]
    fn test_too_many_links_rejected() {
        let mut rng = SimRng::seeded(4);
        let mut network = SocialNetwork::new(spawn_population(4, &mut rng));
        assert_eq!(
            build_random_network(&mut network, 7, &mut rng),
            Err(NetworkError::TooManyLinks { requested: 7, max: 6 })
        );
        assert_eq!(network.link_count(), 0);
    }

    #[test]
    fn test_zero_links() {
        let mut rng = SimRng::seeded(5);
        let mut network = SocialNetwork::new(spawn_population(1, &mut rng));
        build_random_network(&mut network, 0, &mut rng).unwrap();
        assert_eq!(network.link_count(), 0);
    }

    #[test]
    fn test_same_seed_same_network() {
        let build = |seed| {
            let mut rng = SimRng::seeded(seed);
            let mut network = SocialNetwork::new(spawn_population(25, &mut rng));
            build_random_network(&mut network, 40, &mut rng).unwrap();
            network.to_snapshot()
        };
        assert_eq!(build(11), build(11));
        assert_ne!(build(11).edges, build(12).edges);
    }
}
