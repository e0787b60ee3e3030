//! World Sim - agent-based population simulation on a toroidal grid

pub mod core;
pub mod entity;
pub mod output;
pub mod simulation;
pub mod world;

pub use crate::core::{Result, SimError, SimulationConfig};
pub use crate::world::{TickOutcome, World};
