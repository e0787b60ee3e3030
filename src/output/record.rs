//! Serializable views of agents
//!
//! `AgentRecord` is the shape shared by snapshot files and the per-tick
//! update handed to the transport layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::{Agent, Species};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    #[serde(rename = "type")]
    pub species: Species,
    pub health: i32,
    pub age: u32,
    pub position: (u32, u32),
    pub birth_date: NaiveDate,
    /// Null for species that do not track knowledge
    pub knowledge: Option<i32>,
}

impl From<&Agent> for AgentRecord {
    fn from(agent: &Agent) -> Self {
        Self {
            species: agent.species(),
            health: agent.health(),
            age: agent.age(),
            position: agent.position().into(),
            birth_date: agent.birth_date(),
            knowledge: agent.knowledge(),
        }
    }
}

impl From<&AgentRecord> for Agent {
    fn from(record: &AgentRecord) -> Self {
        Agent::new(
            record.species,
            record.health,
            record.age,
            record.position.into(),
            record.birth_date,
        )
        .with_knowledge(record.knowledge.unwrap_or(0))
    }
}

/// Plain-text line used in `.txt` snapshots
impl fmt::Display for AgentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={} health={} age={} position=({}, {}) birth_date={} knowledge=",
            self.species, self.health, self.age, self.position.0, self.position.1, self.birth_date
        )?;
        match self.knowledge {
            Some(k) => write!(f, "{}", k),
            None => f.write_str("none"),
        }
    }
}

pub fn records(agents: &[Agent]) -> Vec<AgentRecord> {
    agents.iter().map(AgentRecord::from).collect()
}

/// Payload returned from every tick for forwarding to clients
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickUpdate {
    pub date: NaiveDate,
    pub characters: Vec<AgentRecord>,
}

impl TickUpdate {
    pub fn new(date: NaiveDate, agents: &[Agent]) -> Self {
        Self {
            date,
            characters: records(agents),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
