//! unet
//!
//! A simulation of social psychology and social network structure: agents
//! assimilate to or contrast with their peers, and links between agents that
//! drift too far apart are replaced by random new ones.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

use unet_core::output::{self, OutputFormat};
use unet_core::simulation::RunSettings;
use unet_core::{Config, SimError, SimParams, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "unet")]
#[command(about = "A simulation of social psychology and social network structure")]
struct Args {
    /// Verbose; prints progress messages to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Population size
    #[arg(value_name = "POP_SIZE")]
    pop_size: usize,

    /// Nr. of links in the initial network
    #[arg(value_name = "NR_LINKS")]
    nr_links: usize,

    /// Assimilation threshold: the minimum difference between two agents
    /// that leads to assimilation (between 0 and 1)
    #[arg(value_name = "ASS_TRES")]
    ass_tres: f64,

    /// Assimilation step: the step by which agent attributes change on each
    /// interaction (between 0 and 1)
    #[arg(value_name = "ASS_STEP")]
    ass_step: f64,

    /// Link threshold: the maximum difference between agents' attributes
    /// (between 0 and 1)
    #[arg(value_name = "LNK_TRES")]
    lnk_tres: f64,

    /// Random seed for reproducibility (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Iteration ceiling; iterations 0..=N are run
    #[arg(long)]
    iterations: Option<u64>,

    /// How to write the final network to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::None)]
    format: OutputFormat,

    /// TOML tuning file (defaults to unet.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the per-iteration statistics and final summary as JSON
    #[arg(long)]
    stats_json: Option<PathBuf>,

    /// Also report the average path length every iteration
    #[arg(long)]
    path_length: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("fatal error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), SimError> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };

    tracing::info!("Parsing command line arguments...");
    let params = SimParams {
        population_size: args.pop_size,
        initial_links: args.nr_links,
        assimilation_threshold: args.ass_tres,
        assimilation_step: args.ass_step,
        link_threshold: args.lnk_tres,
    };
    tracing::info!(
        population_size = params.population_size,
        links = params.initial_links,
        assimilation_threshold = params.assimilation_threshold,
        assimilation_step = params.assimilation_step,
        link_threshold = params.link_threshold,
        "model parameters"
    );
    params.validate()?;

    let seed = args
        .seed
        .or(config.simulation.seed)
        .unwrap_or_else(clock_seed);
    tracing::info!(seed, "Using seed");

    let settings = RunSettings {
        seed,
        max_iterations: args.iterations.unwrap_or(config.simulation.max_iterations),
        path_length: args.path_length || config.report.path_length,
    };

    let mut simulation =
        Simulation::new(params, settings)?.with_progress_output(Box::new(io::stderr()));

    tracing::info!("Proceeding with updating the network by social psychological processes...");
    let summary = simulation.run()?;

    if let Some(path) = &args.stats_json {
        output::write_stats(&simulation.report(), path)?;
        tracing::info!("Wrote {}", path.display());
    }

    tracing::info!("Sending results to STDOUT...");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_network(args.format, simulation.network(), &summary, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Seconds since 1970, the seed when none is given
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
