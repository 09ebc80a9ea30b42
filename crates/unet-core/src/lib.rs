//! unet: social-influence dynamics on an evolving social network
//!
//! Agents holding a scalar attribute are linked by a random network. Each
//! iteration every linked pair makes a social comparison (assimilation or
//! contrast), and pairs drifting apart beyond a threshold are rewired.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub mod components;
pub mod config;
pub mod error;
pub mod metrics;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{Config, SimParams};
pub use error::{ConfigError, NetworkError, ParamError, SimError};
pub use simulation::Simulation;

/// Seeded random number generator resource
#[derive(Resource, Debug)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform float in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    /// Uniform index in [0, n). `n` must be positive.
    pub fn uniform_index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }
}
