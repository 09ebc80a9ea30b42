//! End-to-end scenarios for the network dynamics.

use unet_core::components::{AgentId, SocialNetwork};
use unet_core::error::{ParamError, SimError};
use unet_core::simulation::RunSettings;
use unet_core::{metrics, SimParams, Simulation};
use unet_snapshot::{fixtures, parse_edge_list, write_edge_list};

fn chain_params() -> SimParams {
    SimParams {
        population_size: 4,
        initial_links: 3,
        assimilation_threshold: 0.5,
        assimilation_step: 0.1,
        link_threshold: 0.9,
    }
}

fn one_iteration(seed: u64) -> RunSettings {
    RunSettings {
        max_iterations: 0,
        ..RunSettings::with_seed(seed)
    }
}

fn chain_with(attributes: &[f64]) -> SocialNetwork {
    let mut snapshot = fixtures::path_graph(attributes.len());
    snapshot.attributes = attributes.to_vec();
    SocialNetwork::from_snapshot(&snapshot).unwrap()
}

/// Chain 0-1-2-3: every comparison contrasts, nothing is rewired
#[test]
fn test_chain_single_iteration() {
    let network = chain_with(&[0.1, 0.3, 0.6, 0.95]);
    let mut sim = Simulation::from_network(chain_params(), one_iteration(1), network).unwrap();
    sim.run().unwrap();

    assert_eq!(sim.total_rewired(), 0);
    assert_eq!(
        sim.network().to_snapshot().edge_set(),
        fixtures::path_graph(4).edge_set()
    );

    let expected = [0.0, 0.3, 0.6, 1.0];
    for (agent, want) in sim.network().agents().zip(expected) {
        assert!(
            (agent.attribute() - want).abs() < 1e-9,
            "agent {} has {}, expected {}",
            agent.id(),
            agent.attribute(),
            want
        );
    }
}

/// Starting inside [0.25, 0.75] nothing clamps and every agent moves by
/// whole steps of 0.1
#[test]
fn test_chain_moves_in_whole_steps() {
    for seed in 0..25u64 {
        let mut rng = unet_core::SimRng::seeded(seed);
        let initial: Vec<f64> = (0..4).map(|_| 0.25 + 0.5 * rng.uniform()).collect();

        let network = chain_with(&initial);
        let mut sim = Simulation::from_network(chain_params(), one_iteration(seed), network).unwrap();
        sim.run().unwrap();
        assert_eq!(sim.total_rewired(), 0, "seed {}", seed);

        for (agent, start) in sim.network().agents().zip(&initial) {
            let value = agent.attribute();
            let steps = (value - start) / 0.1;
            assert!(
                (steps - steps.round()).abs() < 1e-9,
                "seed {}: agent {} moved {} from {}",
                seed,
                agent.id(),
                value - start,
                start
            );
        }
    }
}

/// Too many initial links is rejected before any network exists
#[test]
fn test_too_many_links_rejected() {
    let params = SimParams {
        population_size: 10,
        initial_links: 46,
        ..chain_params()
    };
    match Simulation::new(params, RunSettings::with_seed(1)) {
        Err(SimError::Params(ParamError::TooManyLinks { requested, max })) => {
            assert_eq!(requested, 46);
            assert_eq!(max, 45);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected the parameters to be rejected"),
    }
}

/// Structural invariants hold after a long run with heavy rewiring
#[test]
fn test_invariants_after_rewiring() {
    let params = SimParams {
        population_size: 50,
        initial_links: 150,
        assimilation_threshold: 0.2,
        assimilation_step: 0.1,
        link_threshold: 0.15,
    };
    let mut sim = Simulation::new(params, RunSettings::with_seed(2024)).unwrap();
    let summary = sim.run().unwrap();

    assert!(sim.total_rewired() > 0);
    assert_eq!(summary.links, 150);
    assert!(sim.history().iter().all(|r| r.links == 150));

    let network = sim.network();
    network.check_consistency().unwrap();
    for link in network.links() {
        assert!(link.source() < link.target());
        assert!(network.peers(link.source()).contains(&link.target()));
        assert!(network.peers(link.target()).contains(&link.source()));
    }
    for agent in network.agents() {
        assert!((0.0..=1.0).contains(&agent.attribute()));
    }
    assert!((-1.0..=1.0).contains(&summary.assortativity));
    assert!((0.0..=1.0).contains(&summary.clustering));
}

/// The final network survives an edge-list round trip
#[test]
fn test_final_network_roundtrip() {
    let params = SimParams {
        population_size: 25,
        initial_links: 40,
        assimilation_threshold: 0.3,
        assimilation_step: 0.05,
        link_threshold: 0.35,
    };
    let settings = RunSettings {
        max_iterations: 10,
        ..RunSettings::with_seed(31)
    };
    let mut sim = Simulation::new(params, settings).unwrap();
    sim.run().unwrap();

    let original = sim.network().to_snapshot();
    let mut buffer = Vec::new();
    write_edge_list(&original, &mut buffer).unwrap();
    let parsed = parse_edge_list(&String::from_utf8(buffer).unwrap()).unwrap();

    assert_eq!(parsed.agent_count, original.agent_count);
    assert_eq!(parsed.edge_set(), original.edge_set());
    assert_eq!(parsed.edges, original.edges);

    let rebuilt = SocialNetwork::from_snapshot(&parsed).unwrap();
    rebuilt.check_consistency().unwrap();
    for agent in 0..rebuilt.agent_count() {
        assert_eq!(
            rebuilt.degree(AgentId(agent)),
            sim.network().degree(AgentId(agent))
        );
    }
    assert_eq!(
        metrics::clustering_coefficient(&rebuilt),
        metrics::clustering_coefficient(sim.network())
    );
}

/// Isolated agents take part in no comparison
#[test]
fn test_isolated_agents_untouched() {
    let mut snapshot = fixtures::path_graph(3);
    snapshot.agent_count = 5;
    snapshot.attributes = vec![0.2, 0.4, 0.6, 0.33, 0.77];
    let network = SocialNetwork::from_snapshot(&snapshot).unwrap();

    let params = SimParams {
        link_threshold: 1.0,
        ..chain_params()
    };
    let settings = RunSettings {
        max_iterations: 5,
        ..RunSettings::with_seed(3)
    };
    let mut sim = Simulation::from_network(params, settings, network).unwrap();
    sim.run().unwrap();

    assert_eq!(sim.network().agent(AgentId(3)).unwrap().attribute(), 0.33);
    assert_eq!(sim.network().agent(AgentId(4)).unwrap().attribute(), 0.77);
}
