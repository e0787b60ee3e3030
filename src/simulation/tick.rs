//! Tick system - advances every agent by one simulated step
//!
//! Per agent, in collection order: move -> age -> reproduce. Offspring are
//! held aside and appended once every pre-existing agent has been processed,
//! so newborns are first updated on the following tick. Reproduction is
//! stamped with the date the tick started on; the clock moves forward last.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::SimulationClock;
use crate::core::config::MortalityRule;
use crate::core::types::Dimensions;
use crate::entity::Agent;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Date the clock shows after the tick
    pub date: NaiveDate,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

/// Run one tick over `agents`, then advance `clock`
pub fn run_simulation_tick<R: Rng + ?Sized>(
    agents: &mut Vec<Agent>,
    clock: &mut SimulationClock,
    dimensions: Dimensions,
    mortality: MortalityRule,
    rng: &mut R,
) -> TickSummary {
    let born_on = clock.current_date();
    let mut offspring = Vec::new();

    for agent in agents.iter_mut() {
        agent.move_randomly(dimensions, rng);
        agent.advance_age();
        if let Some(child) = agent.reproduce(born_on) {
            offspring.push(child);
        }
    }

    let births = offspring.len();
    agents.extend(offspring);

    let deaths = match mortality {
        MortalityRule::Immortal => 0,
        MortalityRule::RemoveAtZeroHealth => {
            let before = agents.len();
            agents.retain(|a| !a.is_dead());
            before - agents.len()
        }
    };

    let date = clock.advance();

    tracing::debug!(
        %date,
        births,
        deaths,
        population = agents.len(),
        "tick complete"
    );

    TickSummary {
        date,
        births,
        deaths,
        population: agents.len(),
    }
}
