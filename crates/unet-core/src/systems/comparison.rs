//! Comparison System
//!
//! Every agent compares itself to each of its peers. When a pair ends up
//! further apart than the link threshold, their link is dropped and a new
//! random link is created elsewhere, so the link count is conserved.

use bevy_ecs::prelude::*;

use super::IterationState;
use crate::components::{AgentId, ComparisonOutcome, SocialNetwork};
use crate::config::SimParams;
use crate::error::NetworkError;
use crate::setup::add_random_link;
use crate::SimRng;

/// One pass over the population; returns the number of rewired links.
///
/// Each agent's peer list is captured before its comparisons start, so links
/// created or removed while processing that agent do not change which peers
/// it visits. Attribute changes are visible to every later comparison.
pub fn comparison_pass(
    network: &mut SocialNetwork,
    params: &SimParams,
    rng: &mut SimRng,
) -> Result<usize, NetworkError> {
    let mut rewired = 0;
    let mut assimilated = 0usize;
    let mut contrasted = 0usize;

    for index in 0..network.agent_count() {
        let agent = AgentId(index);
        let peers = network.peers(agent);

        for peer in peers {
            match network.compare(
                agent,
                peer,
                params.assimilation_threshold,
                params.assimilation_step,
            )? {
                ComparisonOutcome::Assimilated => assimilated += 1,
                ComparisonOutcome::Contrasted => contrasted += 1,
                ComparisonOutcome::Inert | ComparisonOutcome::Undirected { .. } => {}
            }

            let gap = network.attribute_gap(agent, peer)?;
            if gap <= params.link_threshold {
                tracing::trace!(
                    agent = agent.0,
                    peer = peer.0,
                    gap,
                    "link threshold not exceeded, keeping link"
                );
                continue;
            }

            tracing::debug!(
                agent = agent.0,
                peer = peer.0,
                gap,
                threshold = params.link_threshold,
                "link threshold exceeded, rewiring"
            );
            if rewire(network, agent, peer, rng)? {
                rewired += 1;
            }
        }
    }

    tracing::debug!(assimilated, contrasted, rewired, "comparison pass complete");
    Ok(rewired)
}

/// Replaces the link between `agent` and `peer` with a new random link.
///
/// Returns `false` when there was no link to remove. That logical error is
/// logged and no replacement is created, so the link count stays unchanged.
pub fn rewire(
    network: &mut SocialNetwork,
    agent: AgentId,
    peer: AgentId,
    rng: &mut SimRng,
) -> Result<bool, NetworkError> {
    match network.remove_link_between(agent, peer) {
        Ok(_) => {
            add_random_link(network, rng)?;
            Ok(true)
        }
        // Not counted and not replaced: see "Missing link on removal" in DESIGN.md
        Err(err) if err.is_recoverable() => {
            tracing::error!("{}", err);
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// System: run the comparison pass over the network resource
pub fn run_comparison_pass(
    mut network: ResMut<SocialNetwork>,
    params: Res<SimParams>,
    mut rng: ResMut<SimRng>,
    mut state: ResMut<IterationState>,
) {
    match comparison_pass(&mut network, &params, &mut rng) {
        Ok(rewired) => {
            state.rewired = rewired;
            state.total_rewired += rewired;
        }
        Err(err) => {
            tracing::error!(iteration = state.iteration, "comparison pass aborted: {}", err);
            state.fatal = Some(err);
        }
    }
}
