//! Simulation configuration
//!
//! Everything the world needs at startup: grid size, initial population,
//! calendar, random seed, snapshot location and the mortality rule. Values can
//! be loaded from a TOML file; any section left out falls back to defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::core::calendar::epoch;
use crate::core::error::{Result, SimError};
use crate::core::types::Dimensions;

/// Top-level configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the world's random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub mortality: MortalityRule,
    pub world: WorldConfig,
    pub clock: ClockConfig,
    pub snapshots: SnapshotConfig,
}

/// Grid and starting population
///
/// Kept signed so that bad input can be reported instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: i64,
    pub height: i64,
    pub initial_population: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Written either as a TOML date (`1850-03-01`) or as a string
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    /// Whole calendar years added per tick
    pub step_years: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub enabled: bool,
    pub directory: PathBuf,
}

/// What happens to agents whose health has run out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MortalityRule {
    /// Agents are never removed; population can only grow.
    #[default]
    Immortal,
    /// Extension: agents with health <= 0 are dropped at the end of a tick.
    RemoveAtZeroHealth,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mortality: MortalityRule::default(),
            world: WorldConfig::default(),
            clock: ClockConfig::default(),
            snapshots: SnapshotConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            initial_population: 10,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_date: epoch(),
            step_years: 1,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("progress"),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.dimensions()?;
        self.initial_population()?;

        if self.clock.step_years == 0 {
            return Err(SimError::Config("clock.step_years must be at least 1".into()));
        }

        if self.snapshots.enabled && self.snapshots.directory.as_os_str().is_empty() {
            return Err(SimError::Config(
                "snapshots.directory must be set when snapshots are enabled".into(),
            ));
        }

        Ok(())
    }

    /// Grid dimensions, rejecting non-positive or oversized axes
    pub fn dimensions(&self) -> Result<Dimensions> {
        let width = positive_axis("width", self.world.width)?;
        let height = positive_axis("height", self.world.height)?;
        Ok(Dimensions::new(width, height))
    }

    pub fn initial_population(&self) -> Result<usize> {
        usize::try_from(self.world.initial_population).map_err(|_| {
            SimError::Config(format!(
                "world.initial_population must not be negative (got {})",
                self.world.initial_population
            ))
        })
    }
}

fn positive_axis(name: &str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(SimError::Config(format!(
            "world.{} must be positive (got {})",
            name, value
        )));
    }
    u32::try_from(value)
        .map_err(|_| SimError::Config(format!("world.{} is too large (got {})", name, value)))
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(text) => text.parse().map_err(D::Error::custom),
        toml::Value::Datetime(dt) => match (dt.date, dt.time, dt.offset) {
            (Some(d), None, None) => {
                NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day))
                    .ok_or_else(|| D::Error::custom(format!("invalid calendar date {}", dt)))
            }
            _ => Err(D::Error::custom(format!(
                "expected a date without time or offset, got {}",
                dt
            ))),
        },
        other => Err(D::Error::custom(format!(
            "expected a date, got {}",
            other.type_str()
        ))),
    }
}
