//! Initial population placement

use chrono::NaiveDate;
use rand::Rng;

use crate::core::types::Dimensions;
use crate::entity::{Agent, Species};

/// Spawn `count` founders with a uniformly random species and cell
pub fn spawn_initial_population<R: Rng + ?Sized>(
    count: usize,
    dimensions: Dimensions,
    born_on: NaiveDate,
    rng: &mut R,
) -> Vec<Agent> {
    (0..count)
        .map(|_| {
            let species = Species::ALL[rng.gen_range(0..Species::ALL.len())];
            let position = dimensions.random_position(rng);
            Agent::founder(species, position, born_on)
        })
        .collect()
}
