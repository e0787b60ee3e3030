//! Agents and species

pub mod agent;
pub mod species;

pub use agent::Agent;
pub use species::{ReproductionRule, Species};
