//! Statistics System
//!
//! Measures the network at the start of every iteration and hands the row
//! to the progress table and the stats collector.

use bevy_ecs::prelude::*;
use unet_snapshot::IterationRecord;

use super::IterationState;
use crate::components::SocialNetwork;
use crate::config::ReportConfig;
use crate::metrics;
use crate::output::{ProgressTable, StatsCollector};

/// Computes one iteration's statistics
pub fn measure_iteration(
    network: &SocialNetwork,
    iteration: u64,
    removed: usize,
    with_path_length: bool,
) -> IterationRecord {
    IterationRecord {
        iteration,
        removed,
        links: network.link_count(),
        density: network.density(),
        clustering: metrics::clustering_coefficient(network),
        assortativity: metrics::assortativity(network),
        average_path_length: with_path_length.then(|| metrics::average_path_length(network)),
    }
}

/// System: record and report the statistics for the current iteration
pub fn record_iteration_stats(
    network: Res<SocialNetwork>,
    state: Res<IterationState>,
    report: Res<ReportConfig>,
    mut collector: ResMut<StatsCollector>,
    mut table: ResMut<ProgressTable>,
) {
    let record = measure_iteration(&network, state.iteration, state.rewired, report.path_length);
    table.write_row(&record);
    collector.record(record);
}

#[cfg(test)]
mod tests {
    use super::*;
    use unet_snapshot::fixtures;

    #[test]
    fn test_measure_path_graph() {
        let network = SocialNetwork::from_snapshot(&fixtures::path_graph(4)).unwrap();
        let record = measure_iteration(&network, 3, 2, false);

        assert_eq!(record.iteration, 3);
        assert_eq!(record.removed, 2);
        assert_eq!(record.links, 3);
        assert!((record.density - 0.5).abs() < 1e-12);
        assert_eq!(record.clustering, 0.0);
        assert!((record.assortativity + 0.5).abs() < 1e-12);
        assert_eq!(record.average_path_length, None);
    }

    #[test]
    fn test_measure_with_path_length() {
        let network = SocialNetwork::from_snapshot(&fixtures::clique(4)).unwrap();
        let record = measure_iteration(&network, 0, 0, true);
        assert_eq!(record.average_path_length, Some(1.0));
        assert_eq!(record.clustering, 1.0);
        assert_eq!(record.density, 1.0);
    }
}
