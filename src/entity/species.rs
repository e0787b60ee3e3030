//! Species and their life-cycle parameters
//!
//! Every species-specific number lives here as data on the enum, so the
//! engine dispatches by exhaustive match rather than by type tests.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Human,
    Animal,
    Insect,
}

/// When an agent may reproduce and how its offspring starts out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReproductionRule {
    /// Parent age must be strictly greater than this
    pub min_age: u32,
    /// Parent health must be strictly greater than this
    pub min_health: i32,
    pub offspring_health: i32,
}

impl ReproductionRule {
    pub fn allows(&self, age: u32, health: i32) -> bool {
        age > self.min_age && health > self.min_health
    }
}

/// Starting state for members of the initial population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Founder {
    pub health: i32,
    pub age: u32,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Human, Species::Animal, Species::Insect];

    pub fn reproduction(&self) -> ReproductionRule {
        match self {
            Species::Human => ReproductionRule {
                min_age: 18,
                min_health: 50,
                offspring_health: 100,
            },
            Species::Animal => ReproductionRule {
                min_age: 2,
                min_health: 20,
                offspring_health: 100,
            },
            Species::Insect => ReproductionRule {
                min_age: 1,
                min_health: 10,
                offspring_health: 50,
            },
        }
    }

    pub fn founder(&self) -> Founder {
        match self {
            Species::Human => Founder { health: 100, age: 20 },
            Species::Animal => Founder { health: 100, age: 10 },
            Species::Insect => Founder { health: 50, age: 1 },
        }
    }

    /// Only humans accumulate knowledge
    pub fn tracks_knowledge(&self) -> bool {
        matches!(self, Species::Human)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Human => "human",
            Species::Animal => "animal",
            Species::Insect => "insect",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
