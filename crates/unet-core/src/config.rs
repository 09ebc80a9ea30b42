//! Configuration System
//!
//! Model parameters come from the command line; run settings that rarely
//! change can live in a TOML tuning file (`unet.toml`).

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::components::network::max_links;
use crate::error::{ConfigError, ParamError};

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "unet.toml";

/// Iteration ceiling of the dynamics loop
pub const DEFAULT_MAX_ITERATIONS: u64 = 100;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Simulation run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Iterations run are 0..=max_iterations
    pub max_iterations: u64,
    /// Fixed seed; the wall clock is used when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }
}

/// Per-iteration reporting settings
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Also compute the average path length every iteration
    pub path_length: bool,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default path, or use defaults if there is none
    pub fn load_or_default() -> Self {
        if !Path::new(DEFAULT_TUNING_PATH).exists() {
            return Self::default();
        }
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }
}

/// The five model parameters
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    pub population_size: usize,
    /// Links in the initial network
    pub initial_links: usize,
    /// Minimum difference between two agents that leads to assimilation
    pub assimilation_threshold: f64,
    /// Step by which attributes change on each comparison
    pub assimilation_step: f64,
    /// Maximum attribute difference a link survives
    pub link_threshold: f64,
}

impl SimParams {
    /// n(n-1)/2 for the population size
    pub fn max_links(&self) -> usize {
        max_links(self.population_size)
    }

    /// Checks every parameter before any network is built
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.population_size == 0 {
            return Err(ParamError::EmptyPopulation);
        }
        if self.initial_links > self.max_links() {
            return Err(ParamError::TooManyLinks {
                requested: self.initial_links,
                max: self.max_links(),
            });
        }
        for (name, value) in [
            ("assimilation threshold", self.assimilation_threshold),
            ("assimilation step", self.assimilation_step),
            ("link threshold", self.link_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamError::OutOfUnitRange { name, value });
            }
        }
        Ok(())
    }
}
