//! Core type definitions used throughout the codebase

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Size of the toroidal world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Both axes must be non-zero; callers go through config validation first.
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Uniformly random cell on the grid
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }
}

/// A cell on the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Position one unit step away, wrapped onto the torus
    pub fn stepped(&self, direction: Direction, dims: Dimensions) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: wrap(self.x, dx, dims.width),
            y: wrap(self.y, dy, dims.height),
        }
    }
}

impl From<(u32, u32)> for Position {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (u32, u32) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

fn wrap(coord: u32, delta: i64, extent: u32) -> u32 {
    (coord as i64 + delta).rem_euclid(extent as i64) as u32
}

/// The four orthogonal unit moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    West,
    North,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    pub fn delta(&self) -> (i64, i64) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
