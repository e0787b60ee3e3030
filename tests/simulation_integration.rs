//! Integration tests for the tick loop
//!
//! These run whole worlds through `World::advance` and check the
//! population-level guarantees:
//! - ages advance one year per tick
//! - population never shrinks without a mortality rule
//! - the clock moves in whole calendar years
//! - seeded runs are reproducible

use chrono::{Datelike, NaiveDate};
use world_sim::core::config::MortalityRule;
use world_sim::core::types::Position;
use world_sim::entity::{Agent, Species};
use world_sim::{SimulationConfig, World};

fn config(seed: u64, population: i64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.seed = Some(seed);
    config.world.width = 16;
    config.world.height = 12;
    config.world.initial_population = population;
    config.snapshots.enabled = false;
    config
}

#[test]
fn test_clock_reaches_year_eleven_after_ten_ticks() {
    let mut world = World::new(&config(1, 3)).unwrap();
    assert_eq!(world.current_date().year(), 1);

    for _ in 0..10 {
        world.advance();
    }

    assert_eq!(world.current_date().year(), 11);
    assert_eq!(world.current_date(), NaiveDate::from_ymd_opt(11, 1, 1).unwrap());
}

#[test]
fn test_founders_age_one_year_per_tick() {
    let mut world = World::new(&config(2, 20)).unwrap();
    let initial_ages: Vec<u32> = world.agents().iter().map(Agent::age).collect();

    let ticks = 7;
    for _ in 0..ticks {
        world.advance();
    }

    // Offspring are appended, so founders keep their indices
    for (i, age) in initial_ages.iter().enumerate() {
        assert_eq!(world.agents()[i].age(), age + ticks);
    }
}

#[test]
fn test_population_never_shrinks() {
    let mut world = World::new(&config(3, 10)).unwrap();
    let mut previous = world.population();

    for _ in 0..8 {
        let outcome = world.advance();
        assert!(outcome.summary.population >= previous);
        assert_eq!(outcome.summary.population, previous + outcome.summary.births);
        assert_eq!(outcome.summary.deaths, 0);
        previous = outcome.summary.population;
    }
}

#[test]
fn test_positions_stay_on_grid() {
    let mut world = World::new(&config(4, 30)).unwrap();
    let dims = world.dimensions();

    for _ in 0..6 {
        world.advance();
        for agent in world.agents() {
            assert!(dims.contains(agent.position()), "{:?} off grid", agent.position());
        }
    }
}

#[test]
fn test_birth_dates_never_after_current_date() {
    let mut world = World::new(&config(5, 10)).unwrap();
    for _ in 0..5 {
        world.advance();
        let now = world.current_date();
        assert!(world.agents().iter().all(|a| a.birth_date() <= now));
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let mut a = World::new(&config(99, 15)).unwrap();
    let mut b = World::new(&config(99, 15)).unwrap();

    for _ in 0..6 {
        let ua = a.advance().update;
        let ub = b.advance().update;
        assert_eq!(ua, ub);
    }

    assert_eq!(a.agents(), b.agents());
    assert_eq!(a.current_date(), b.current_date());
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = World::new(&config(1, 15)).unwrap();
    let mut b = World::new(&config(2, 15)).unwrap();
    for _ in 0..3 {
        a.advance();
        b.advance();
    }
    assert_ne!(a.agents(), b.agents());
}

#[test]
fn test_single_human_scenario() {
    let mut world = World::new(&config(6, 0)).unwrap();
    let start = world.current_date();
    world.replace_agents(vec![Agent::new(Species::Human, 51, 19, Position::new(0, 0), start)]);

    let outcome = world.advance();

    assert_eq!(outcome.summary.births, 1);
    let child = &world.agents()[1];
    assert_eq!(child.species(), Species::Human);
    assert_eq!(child.age(), 0);
    assert_eq!(child.health(), 100);
    assert_eq!(child.birth_date(), start);
    assert_eq!(child.knowledge(), Some(0));
}

#[test]
fn test_underage_human_has_no_offspring() {
    // 17 ages to 18 during the tick, which is not strictly above the threshold
    let mut world = World::new(&config(7, 0)).unwrap();
    let start = world.current_date();
    world.replace_agents(vec![Agent::new(Species::Human, 100, 17, Position::new(3, 3), start)]);

    let outcome = world.advance();
    assert_eq!(outcome.summary.births, 0);
    assert_eq!(world.population(), 1);
}

#[test]
fn test_old_age_decline_over_ticks() {
    let mut world = World::new(&config(8, 0)).unwrap();
    let start = world.current_date();
    world.replace_agents(vec![Agent::new(Species::Animal, 100, 79, Position::new(3, 3), start)]);

    world.advance(); // 80, no penalty
    assert_eq!(world.agents()[0].health(), 100);
    world.advance(); // 81
    assert_eq!(world.agents()[0].health(), 90);
    world.advance(); // 82
    assert_eq!(world.agents()[0].health(), 80);
}

#[test]
fn test_mortality_extension_removes_exhausted_agents() {
    let mut cfg = config(9, 0);
    cfg.mortality = MortalityRule::RemoveAtZeroHealth;
    let mut world = World::new(&cfg).unwrap();
    let start = world.current_date();
    world.replace_agents(vec![Agent::new(Species::Insect, 20, 81, Position::new(1, 1), start)]);

    // 20 -> 10: still alive, and too frail to reproduce
    let first = world.advance();
    assert_eq!(first.summary.deaths, 0);
    assert_eq!(first.summary.births, 0);

    // 10 -> 0 and removed
    let second = world.advance();
    assert_eq!(second.summary.deaths, 1);
    assert_eq!(world.population(), 0);
}
