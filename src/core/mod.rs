pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::SimulationClock;
pub use config::{MortalityRule, SimulationConfig};
pub use error::{Result, SimError};
pub use types::{Dimensions, Direction, Position};
