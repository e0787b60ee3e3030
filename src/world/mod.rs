//! World - owns the grid, the agents, the clock and the random source
//!
//! `World::advance` is the only way simulation state changes after
//! construction. It takes `&mut self`, so at most one tick can run at a time.

pub mod census;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::calendar::SimulationClock;
use crate::core::config::{MortalityRule, SimulationConfig};
use crate::core::error::Result;
use crate::core::types::{Dimensions, Position};
use crate::entity::Agent;
use crate::output::{NullSnapshots, SnapshotFiles, SnapshotSink, SnapshotWriter, TickUpdate};
use crate::simulation::{run_simulation_tick, spawn_initial_population, TickSummary};

pub use census::SpeciesCensus;

/// Everything one call to `World::advance` produced
#[derive(Debug)]
pub struct TickOutcome {
    /// Post-tick state for forwarding to clients
    pub update: TickUpdate,
    pub summary: TickSummary,
    /// Snapshot result. A failure here leaves the tick itself in place.
    pub snapshot: Result<Option<SnapshotFiles>>,
}

pub struct World {
    dimensions: Dimensions,
    agents: Vec<Agent>,
    clock: SimulationClock,
    mortality: MortalityRule,
    /// Random number generator (deterministic when seeded)
    rng: ChaCha8Rng,
    snapshots: Box<dyn SnapshotSink>,
}

impl World {
    /// Build a world from config, writing snapshots where the config says
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        let sink: Box<dyn SnapshotSink> = if config.snapshots.enabled {
            Box::new(SnapshotWriter::new(&config.snapshots.directory))
        } else {
            Box::new(NullSnapshots)
        };
        Self::with_snapshots(config, sink)
    }

    /// Build a world from config with an explicit snapshot sink
    pub fn with_snapshots(
        config: &SimulationConfig,
        snapshots: Box<dyn SnapshotSink>,
    ) -> Result<Self> {
        config.validate()?;
        let dimensions = config.dimensions()?;
        let count = config.initial_population()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let clock = SimulationClock::new(config.clock.start_date, config.clock.step_years);
        let agents = spawn_initial_population(count, dimensions, clock.current_date(), &mut rng);

        tracing::info!(
            width = dimensions.width,
            height = dimensions.height,
            population = agents.len(),
            start = %clock.current_date(),
            seed = ?config.seed,
            "world created"
        );

        Ok(Self {
            dimensions,
            agents,
            clock,
            mortality: config.mortality,
            rng,
            snapshots,
        })
    }

    /// Replace the population, e.g. to resume from a snapshot or set up a
    /// hand-built scenario. Agents outside the grid are wrapped onto it.
    pub fn replace_agents(&mut self, agents: Vec<Agent>) {
        let dims = self.dimensions;
        self.agents = agents
            .into_iter()
            .map(|agent| {
                if dims.contains(agent.position()) {
                    agent
                } else {
                    let p = agent.position();
                    let wrapped = Position::new(p.x % dims.width, p.y % dims.height);
                    Agent::new(
                        agent.species(),
                        agent.health(),
                        agent.age(),
                        wrapped,
                        agent.birth_date(),
                    )
                    .with_knowledge(agent.knowledge().unwrap_or(0))
                }
            })
            .collect();
    }

    /// Advance the simulation by one tick, snapshot it, and report the result
    pub fn advance(&mut self) -> TickOutcome {
        let summary = run_simulation_tick(
            &mut self.agents,
            &mut self.clock,
            self.dimensions,
            self.mortality,
            &mut self.rng,
        );

        let snapshot = self.snapshots.persist(summary.date, &self.agents);
        if let Err(e) = &snapshot {
            tracing::warn!(date = %summary.date, error = %e, "snapshot not saved");
        }

        TickOutcome {
            update: TickUpdate::new(summary.date, &self.agents),
            summary,
            snapshot,
        }
    }

    /// Current state in the same shape `advance` returns
    pub fn update(&self) -> TickUpdate {
        TickUpdate::new(self.current_date(), &self.agents)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn population(&self) -> usize {
        self.agents.len()
    }

    pub fn census(&self) -> SpeciesCensus {
        SpeciesCensus::tally(self.agents.iter().map(Agent::species))
    }

    pub fn current_date(&self) -> NaiveDate {
        self.clock.current_date()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn mortality(&self) -> MortalityRule {
        self.mortality
    }
}
