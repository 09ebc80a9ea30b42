//! Canonical graphs for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // unet-snapshot = { path = "../unet-snapshot", features = ["test-fixtures"] }
//!
//! use unet_snapshot::fixtures;
//!
//! let chain = fixtures::path_graph(4);
//! ```

use crate::NetworkSnapshot;

/// Path 0-1-2-...-(k-1)
pub fn path_graph(k: usize) -> NetworkSnapshot {
    (1..k).fold(NetworkSnapshot::new(k), |s, i| s.with_edge(i - 1, i))
}

/// Ring over k agents (k >= 3)
pub fn cycle_graph(k: usize) -> NetworkSnapshot {
    let path = path_graph(k);
    if k < 3 {
        return path;
    }
    path.with_edge(k - 1, 0)
}

/// Every pair of the k agents linked
pub fn clique(k: usize) -> NetworkSnapshot {
    let mut snapshot = NetworkSnapshot::new(k);
    for a in 0..k {
        for b in (a + 1)..k {
            snapshot = snapshot.with_edge(a, b);
        }
    }
    snapshot
}

/// Agent 0 linked to every other agent
pub fn star_graph(k: usize) -> NetworkSnapshot {
    (1..k).fold(NetworkSnapshot::new(k), |s, i| s.with_edge(0, i))
}

/// Two disjoint triangles, {0,1,2} and {3,4,5}
pub fn two_triangles() -> NetworkSnapshot {
    NetworkSnapshot::new(6)
        .with_edge(0, 1)
        .with_edge(1, 2)
        .with_edge(0, 2)
        .with_edge(3, 4)
        .with_edge(4, 5)
        .with_edge(3, 5)
}
