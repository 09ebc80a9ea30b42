//! Error types for the engine.

use std::path::PathBuf;
use thiserror::Error;

use crate::components::{AgentId, LinkId};

/// Errors raised while maintaining the network
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("agent {0} does not exist")]
    UnknownAgent(AgentId),

    #[error("cannot link agent {0} to itself")]
    SelfLink(AgentId),

    #[error("link weight must be a finite number, got {0}")]
    InvalidWeight(f64),

    #[error("agents {0} and {1} are already linked")]
    AlreadyLinked(AgentId, AgentId),

    #[error("the link between agents {0} and {1} could not be found")]
    LinkNotFound(AgentId, AgentId),

    #[error("there are duplicate links between agents {0} and {1}")]
    DuplicateLink(AgentId, AgentId),

    #[error("nr. of links ({requested}) exceeds maximum number of links ({max})")]
    TooManyLinks { requested: usize, max: usize },

    #[error("agent {agent}'s link list is corrupted at link {link}")]
    CorruptAdjacency { agent: AgentId, link: LinkId },
}

impl NetworkError {
    /// Logical errors are reported and the run continues
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NetworkError::LinkNotFound(..) | NetworkError::DuplicateLink(..)
        )
    }
}

/// Invalid model parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("nr. of links ({requested}) exceeds maximum number of links ({max})")]
    TooManyLinks { requested: usize, max: usize },

    #[error("{name} must be between 0 and 1, got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },
}

/// Errors loading the tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Anything that stops a run
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Params(#[from] ParamError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] unet_snapshot::FormatError),
}
