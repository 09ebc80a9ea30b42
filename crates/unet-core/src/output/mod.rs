//! Output Module
//!
//! The progress table written while the run is going, the statistics report,
//! and the final network in the format asked for.

pub mod stats;
pub mod table;

pub use stats::{write_stats, StatsCollector};
pub use table::ProgressTable;

use std::io::{self, Write};

use unet_snapshot::{write_dot, write_edge_list, write_graphml, RunSummary};

use crate::components::SocialNetwork;

/// How the final network is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Undirected GraphML document
    Graphml,
    /// GraphViz DOT
    Dot,
    /// `nodes N` header followed by one `a b` line per link
    EdgeList,
    /// Parameters and final statistics as a single table row
    Summary,
    /// Nothing beyond the progress table
    #[default]
    None,
}

/// Writes the final state of the run
pub fn write_network<W: Write>(
    format: OutputFormat,
    network: &SocialNetwork,
    summary: &RunSummary,
    out: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Graphml => write_graphml(&network.to_snapshot(), out),
        OutputFormat::Dot => write_dot(&network.to_snapshot(), out),
        OutputFormat::EdgeList => write_edge_list(&network.to_snapshot(), out),
        OutputFormat::Summary => write_summary(summary, out),
        OutputFormat::None => Ok(()),
    }
}

/// Model parameters and final network statistics, one row
pub fn write_summary<W: Write>(summary: &RunSummary, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "pop_size nr_links ass_tres ass_step lnk_tres itrtions rel_size density  clustrng assrtvty avgpath"
    )?;
    writeln!(
        out,
        "{:<9}{:<9}{:<9.2}{:<9.2}{:<9.2}{:<9}{:<9}{:<9.2}{:<9.2}{:<9.2}{:<9.2}",
        summary.population_size,
        summary.initial_links,
        summary.assimilation_threshold,
        summary.assimilation_step,
        summary.link_threshold,
        summary.iterations,
        summary.links,
        summary.density,
        summary.clustering,
        summary.assortativity,
        summary.average_path_length,
    )
}
