//! Setup Module
//!
//! Spawning the population and building the initial random network.

pub mod network;

pub use network::{add_random_link, build_random_network, spawn_population};
