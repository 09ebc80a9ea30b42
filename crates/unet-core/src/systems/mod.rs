//! Simulation Systems
//!
//! ECS systems run once per iteration, chained in this order:
//! 1. record_iteration_stats - measure the network entering the pass
//! 2. run_comparison_pass - social comparison and rewiring
//! 3. advance_iteration - bump the loop counter

use bevy_ecs::prelude::*;

use crate::error::NetworkError;

pub mod comparison;
pub mod stats;

pub use comparison::{comparison_pass, rewire, run_comparison_pass};
pub use stats::{measure_iteration, record_iteration_stats};

/// Resource: the loop counter and what the last pass did
#[derive(Resource, Debug, Default)]
pub struct IterationState {
    pub iteration: u64,
    pub max_iterations: u64,
    /// Links removed-and-replaced in the most recent pass
    pub rewired: usize,
    pub total_rewired: usize,
    /// Set when a pass hit an unrecoverable error
    pub fatal: Option<NetworkError>,
}

impl IterationState {
    pub fn new(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            ..Self::default()
        }
    }

    /// The loop stops once the counter exceeds the ceiling
    pub fn is_finished(&self) -> bool {
        self.iteration > self.max_iterations || self.fatal.is_some()
    }
}

/// System: advance the iteration counter
pub fn advance_iteration(mut state: ResMut<IterationState>) {
    state.iteration += 1;
}
