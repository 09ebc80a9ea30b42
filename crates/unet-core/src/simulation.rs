//! Simulation driver
//!
//! Owns the ECS world and the per-iteration schedule. Iterations
//! `0..=max_iterations` are run; the loop body always executes at least once.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use std::io::Write;

use unet_snapshot::{IterationRecord, RunSummary, SimulationReport};

use crate::components::SocialNetwork;
use crate::config::{ReportConfig, SimParams, DEFAULT_MAX_ITERATIONS};
use crate::error::SimError;
use crate::metrics;
use crate::output::{ProgressTable, StatsCollector};
use crate::setup::{build_random_network, spawn_population};
use crate::systems::{advance_iteration, record_iteration_stats, run_comparison_pass, IterationState};
use crate::SimRng;

/// Settings of a run that are not model parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub seed: u64,
    pub max_iterations: u64,
    /// Report the average path length every iteration
    pub path_length: bool,
}

impl RunSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            path_length: false,
        }
    }
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
    params: SimParams,
    settings: RunSettings,
}

impl Simulation {
    /// Validates the parameters, then spawns the population and builds the
    /// initial random network from the seeded generator.
    pub fn new(params: SimParams, settings: RunSettings) -> Result<Self, SimError> {
        params.validate()?;

        let mut rng = SimRng::seeded(settings.seed);
        tracing::info!(agents = params.population_size, "spawning agents");
        let mut network = SocialNetwork::new(spawn_population(params.population_size, &mut rng));
        build_random_network(&mut network, params.initial_links, &mut rng)?;

        Ok(Self::assemble(params, settings, network, rng))
    }

    /// Runs the dynamics on a prepared network instead of a random one.
    ///
    /// Population size and initial link count are taken from the network.
    pub fn from_network(
        params: SimParams,
        settings: RunSettings,
        network: SocialNetwork,
    ) -> Result<Self, SimError> {
        let params = SimParams {
            population_size: network.agent_count(),
            initial_links: network.link_count(),
            ..params
        };
        params.validate()?;
        network.check_consistency()?;

        let rng = SimRng::seeded(settings.seed);
        Ok(Self::assemble(params, settings, network, rng))
    }

    fn assemble(params: SimParams, settings: RunSettings, network: SocialNetwork, rng: SimRng) -> Self {
        let mut world = World::new();
        world.insert_resource(params);
        world.insert_resource(network);
        world.insert_resource(rng);
        world.insert_resource(IterationState::new(settings.max_iterations));
        world.insert_resource(ReportConfig {
            path_length: settings.path_length,
        });
        world.insert_resource(StatsCollector::new());
        world.insert_resource(ProgressTable::disabled());

        // Statistics describe the network entering the pass, so they run first
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((record_iteration_stats, run_comparison_pass, advance_iteration).chain());

        Self {
            world,
            schedule,
            params,
            settings,
        }
    }

    /// Stream progress rows to `out` as each iteration is measured
    pub fn with_progress_output(mut self, out: Box<dyn Write + Send + Sync>) -> Self {
        self.world
            .insert_resource(ProgressTable::new(out, self.settings.path_length));
        self
    }

    /// Runs one iteration. Does nothing once the loop has finished.
    pub fn step(&mut self) -> Result<(), SimError> {
        if self.is_finished() {
            return Ok(());
        }
        self.schedule.run(&mut self.world);

        let fatal = self.world.resource_mut::<IterationState>().fatal.take();
        if let Some(err) = fatal {
            // Keep the loop stopped after reporting the failure
            let mut state = self.world.resource_mut::<IterationState>();
            state.iteration = state.max_iterations.saturating_add(1);
            return Err(err.into());
        }
        Ok(())
    }

    /// Runs until the iteration counter exceeds the ceiling
    pub fn run(&mut self) -> Result<RunSummary, SimError> {
        loop {
            self.step()?;
            if self.is_finished() {
                break;
            }
        }

        let state = self.world.resource::<IterationState>();
        tracing::info!(
            iterations = state.iteration,
            rewired = state.total_rewired,
            links = self.network().link_count(),
            "simulation complete"
        );
        Ok(self.summary())
    }

    pub fn is_finished(&self) -> bool {
        self.world.resource::<IterationState>().is_finished()
    }

    /// Iterations completed so far
    pub fn iteration(&self) -> u64 {
        self.world.resource::<IterationState>().iteration
    }

    /// Links removed-and-replaced over all passes so far
    pub fn total_rewired(&self) -> usize {
        self.world.resource::<IterationState>().total_rewired
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn network(&self) -> &SocialNetwork {
        self.world.resource::<SocialNetwork>()
    }

    pub fn history(&self) -> &[IterationRecord] {
        &self.world.resource::<StatsCollector>().history
    }

    /// Parameters plus statistics of the network as it stands now
    pub fn summary(&self) -> RunSummary {
        let network = self.network();
        let paths = metrics::path_lengths(network);
        RunSummary {
            population_size: self.params.population_size,
            initial_links: self.params.initial_links,
            assimilation_threshold: self.params.assimilation_threshold,
            assimilation_step: self.params.assimilation_step,
            link_threshold: self.params.link_threshold,
            seed: self.settings.seed,
            iterations: self.iteration(),
            links: network.link_count(),
            density: network.density(),
            clustering: metrics::clustering_coefficient(network),
            assortativity: metrics::assortativity(network),
            average_path_length: paths.average(),
            reachable_pairs: paths.reachable_pairs,
        }
    }

    /// Summary plus every recorded iteration
    pub fn report(&self) -> SimulationReport {
        self.world
            .resource::<StatsCollector>()
            .generate_report(self.summary())
    }
}
