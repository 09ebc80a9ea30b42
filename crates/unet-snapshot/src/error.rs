//! Errors raised while reading or validating serialized networks.

use thiserror::Error;

/// Errors that can occur while reading, writing or validating a network.
#[derive(Debug, Error)]
pub enum FormatError {
    /// IO error reading or writing a network file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line that does not match the expected shape
    #[error("line {line}: expected {expected}, found `{found}`")]
    Malformed {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// Edge list without a `nodes N` header
    #[error("missing `nodes` header")]
    MissingHeader,

    /// Edge endpoint outside the node range
    #[error("edge {from}-{to} references a node outside 0..{agent_count}")]
    NodeOutOfRange {
        from: usize,
        to: usize,
        agent_count: usize,
    },

    /// Edge from a node to itself
    #[error("self-loop on node {0}")]
    SelfLoop(usize),

    /// The same unordered pair listed twice
    #[error("duplicate edge {0}-{1}")]
    DuplicateEdge(usize, usize),
}
