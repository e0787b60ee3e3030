//! Simulation output and serialization

pub mod record;
pub mod snapshot;

pub use record::{AgentRecord, TickUpdate};
pub use snapshot::{read_snapshot, NullSnapshots, SnapshotFiles, SnapshotSink, SnapshotWriter};
