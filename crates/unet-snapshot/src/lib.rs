//! Shared network records and text formats for the unet simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine in `unet-core` hands its final state to the writers here, and
//! the edge-list parser lets a written network be read back in.

pub mod edgelist;
pub mod error;
pub mod graphml;
pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use error::FormatError;

// Re-export snapshot types
pub use snapshot::{EdgeSnapshot, IterationRecord, NetworkSnapshot, RunSummary, SimulationReport};

// Re-export writers and parsers
pub use edgelist::{parse_edge_list, read_edge_list, write_dot, write_edge_list};
pub use graphml::write_graphml;
