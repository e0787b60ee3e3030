//! Population counts per species

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::Species;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCensus {
    pub humans: usize,
    pub animals: usize,
    pub insects: usize,
}

impl SpeciesCensus {
    pub fn tally(species: impl IntoIterator<Item = Species>) -> Self {
        let mut census = Self::default();
        for s in species {
            match s {
                Species::Human => census.humans += 1,
                Species::Animal => census.animals += 1,
                Species::Insect => census.insects += 1,
            }
        }
        census
    }

    pub fn total(&self) -> usize {
        self.humans + self.animals + self.insects
    }

    pub fn count(&self, species: Species) -> usize {
        match species {
            Species::Human => self.humans,
            Species::Animal => self.animals,
            Species::Insect => self.insects,
        }
    }
}

impl fmt::Display for SpeciesCensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} agents ({} humans, {} animals, {} insects)",
            self.total(),
            self.humans,
            self.animals,
            self.insects
        )
    }
}
