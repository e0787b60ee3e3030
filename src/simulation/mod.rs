//! Simulation systems

pub mod population;
pub mod tick;

pub use population::spawn_initial_population;
pub use tick::{run_simulation_tick, TickSummary};
