//! A single simulated individual

use chrono::NaiveDate;
use rand::Rng;

use crate::core::types::{Dimensions, Direction, Position};
use crate::entity::species::Species;

/// Age after which every further year costs health
pub const OLD_AGE: u32 = 80;
/// Health lost per year beyond `OLD_AGE`
pub const OLD_AGE_HEALTH_LOSS: i32 = 10;

/// One individual on the grid
///
/// Species and birth date are fixed at construction and only exposed
/// through getters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    species: Species,
    birth_date: NaiveDate,
    health: i32,
    age: u32,
    position: Position,
    knowledge: i32,
}

impl Agent {
    pub fn new(
        species: Species,
        health: i32,
        age: u32,
        position: Position,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            species,
            birth_date,
            health,
            age,
            position,
            knowledge: 0,
        }
    }

    /// Member of the starting population, using the species' founder values
    pub fn founder(species: Species, position: Position, birth_date: NaiveDate) -> Self {
        let founder = species.founder();
        Self::new(species, founder.health, founder.age, position, birth_date)
    }

    /// Restores a stored knowledge value. Ignored for species that do not track it.
    pub fn with_knowledge(mut self, knowledge: i32) -> Self {
        if self.species.tracks_knowledge() {
            self.knowledge = knowledge;
        }
        self
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// `None` for species that do not track knowledge
    pub fn knowledge(&self) -> Option<i32> {
        self.species.tracks_knowledge().then_some(self.knowledge)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Take one random orthogonal step, wrapping around the grid edges
    pub fn move_randomly<R: Rng + ?Sized>(&mut self, dims: Dimensions, rng: &mut R) {
        self.step(Direction::random(rng), dims);
    }

    pub fn step(&mut self, direction: Direction, dims: Dimensions) {
        self.position = self.position.stepped(direction, dims);
        debug_assert!(
            dims.contains(self.position),
            "agent left the grid: {:?} outside {:?}",
            self.position,
            dims
        );
    }

    /// Grow one year older; past `OLD_AGE` each year costs health
    pub fn advance_age(&mut self) {
        self.age += 1;
        if self.age > OLD_AGE {
            self.health -= OLD_AGE_HEALTH_LOSS;
        }
    }

    /// Single-parent reproduction. The offspring appears on the parent's
    /// cell, aged zero, born on `current_date`.
    pub fn reproduce(&self, current_date: NaiveDate) -> Option<Agent> {
        let rule = self.species.reproduction();
        if !rule.allows(self.age, self.health) {
            return None;
        }
        Some(Agent::new(
            self.species,
            rule.offspring_health,
            0,
            self.position,
            current_date,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::epoch;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
    }

    #[test]
    fn test_human_reproduces_above_threshold() {
        let parent = Agent::new(Species::Human, 51, 19, Position::new(3, 4), epoch());
        let child = parent.reproduce(date(40)).expect("Should reproduce");

        assert_eq!(child.species(), Species::Human);
        assert_eq!(child.age(), 0);
        assert_eq!(child.health(), 100);
        assert_eq!(child.birth_date(), date(40));
        assert_eq!(child.position(), Position::new(3, 4));
        assert_eq!(child.knowledge(), Some(0));
    }

    #[test]
    fn test_human_at_threshold_age_does_not_reproduce() {
        let parent = Agent::new(Species::Human, 100, 18, Position::default(), epoch());
        assert!(parent.reproduce(date(20)).is_none());

        let frail = Agent::new(Species::Human, 50, 40, Position::default(), epoch());
        assert!(frail.reproduce(date(20)).is_none());
    }

    #[test]
    fn test_animal_and_insect_offspring() {
        let animal = Agent::new(Species::Animal, 21, 3, Position::new(1, 1), epoch());
        let cub = animal.reproduce(date(5)).unwrap();
        assert_eq!(cub.species(), Species::Animal);
        assert_eq!(cub.health(), 100);
        assert_eq!(cub.knowledge(), None);

        let insect = Agent::new(Species::Insect, 11, 2, Position::new(2, 2), epoch());
        let larva = insect.reproduce(date(5)).unwrap();
        assert_eq!(larva.species(), Species::Insect);
        assert_eq!(larva.health(), 50);

        let young_insect = Agent::new(Species::Insect, 50, 1, Position::new(2, 2), epoch());
        assert!(young_insect.reproduce(date(5)).is_none());
    }

    #[test]
    fn test_old_age_penalty_starts_after_eighty() {
        let mut agent = Agent::new(Species::Human, 100, 79, Position::default(), epoch());
        agent.advance_age();
        assert_eq!(agent.age(), 80);
        assert_eq!(agent.health(), 100);

        agent.advance_age();
        assert_eq!(agent.age(), 81);
        assert_eq!(agent.health(), 90);
    }

    #[test]
    fn test_health_can_go_negative() {
        let mut agent = Agent::new(Species::Animal, 5, 90, Position::default(), epoch());
        agent.advance_age();
        assert_eq!(agent.health(), -5);
        assert!(agent.is_dead());
    }

    #[test]
    fn test_move_is_single_orthogonal_step() {
        let dims = Dimensions::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut agent = Agent::new(Species::Insect, 50, 1, Position::new(5, 5), epoch());

        for _ in 0..50 {
            let before = agent.position();
            agent.move_randomly(dims, &mut rng);
            let after = agent.position();
            let dx = (after.x as i64 - before.x as i64).rem_euclid(10);
            let dy = (after.y as i64 - before.y as i64).rem_euclid(10);
            let moved = matches!((dx, dy), (1, 0) | (9, 0) | (0, 1) | (0, 9));
            assert!(moved, "{:?} -> {:?}", before, after);
        }
    }

    #[test]
    fn test_knowledge_only_for_humans() {
        let origin = Position::default();
        let animal = Agent::founder(Species::Animal, origin, epoch()).with_knowledge(7);
        assert_eq!(animal.knowledge(), None);

        let human = Agent::founder(Species::Human, origin, epoch()).with_knowledge(7);
        assert_eq!(human.knowledge(), Some(7));
    }

    #[test]
    fn test_founder_values() {
        let human = Agent::founder(Species::Human, Position::default(), epoch());
        assert_eq!((human.health(), human.age()), (100, 20));
        let animal = Agent::founder(Species::Animal, Position::default(), epoch());
        assert_eq!((animal.health(), animal.age()), (100, 10));
        let insect = Agent::founder(Species::Insect, Position::default(), epoch());
        assert_eq!((insect.health(), insect.age()), (50, 1));
    }
}
