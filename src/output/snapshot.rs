//! Dated snapshots of the full agent collection
//!
//! Each tick produces `state_<date>.json` (array of agent records) and
//! `state_<date>.txt` (one line per agent) keyed by the post-tick date.
//! Both files are staged as `.tmp` siblings and only renamed into place once
//! both are fully written; a failed call leaves neither behind.

use chrono::NaiveDate;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::{Result, SimError};
use crate::entity::Agent;
use crate::output::record::{records, AgentRecord};

/// Files produced by one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFiles {
    pub json: PathBuf,
    pub text: PathBuf,
}

/// Destination for per-tick snapshots
pub trait SnapshotSink {
    /// Persist the whole collection as of `date`. Returns `None` when the
    /// sink does not write anything.
    fn persist(&mut self, date: NaiveDate, agents: &[Agent]) -> Result<Option<SnapshotFiles>>;
}

/// Sink that discards every snapshot
#[derive(Debug, Default)]
pub struct NullSnapshots;

impl SnapshotSink for NullSnapshots {
    fn persist(&mut self, _date: NaiveDate, _agents: &[Agent]) -> Result<Option<SnapshotFiles>> {
        Ok(None)
    }
}

/// Writes snapshot files into a directory
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    directory: PathBuf,
}

impl SnapshotWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Paths a snapshot for `date` is written to
    pub fn files_for(&self, date: NaiveDate) -> SnapshotFiles {
        SnapshotFiles {
            json: self.directory.join(format!("state_{}.json", date)),
            text: self.directory.join(format!("state_{}.txt", date)),
        }
    }

    pub fn write(&self, date: NaiveDate, agents: &[Agent]) -> Result<SnapshotFiles> {
        fs::create_dir_all(&self.directory)
            .map_err(|e| SimError::persistence(&self.directory, e))?;

        let files = self.files_for(date);
        let records = records(agents);

        let json = serde_json::to_vec_pretty(&records)?;
        let mut text = Vec::with_capacity(records.len() * 96);
        for record in &records {
            writeln!(text, "{}", record)?;
        }

        // Both files are staged before either is published
        let json_tmp = stage(&files.json, &json)?;
        let text_tmp = match stage(&files.text, &text) {
            Ok(tmp) => tmp,
            Err(e) => {
                discard(&[&json_tmp]);
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&json_tmp, &files.json) {
            discard(&[&json_tmp, &text_tmp]);
            return Err(SimError::persistence(&files.json, e));
        }
        if let Err(e) = fs::rename(&text_tmp, &files.text) {
            // Withdraw the JSON so the date has either both files or neither
            discard(&[&text_tmp, &files.json]);
            return Err(SimError::persistence(&files.text, e));
        }

        Ok(files)
    }
}

impl SnapshotSink for SnapshotWriter {
    fn persist(&mut self, date: NaiveDate, agents: &[Agent]) -> Result<Option<SnapshotFiles>> {
        self.write(date, agents).map(Some)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write `contents` next to `path` and return the temporary file's path.
/// Nothing is left behind on failure.
fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf> {
    let tmp = tmp_path(path);
    let written = fs::File::create(&tmp).and_then(|file| {
        let mut writer = BufWriter::new(file);
        writer.write_all(contents)?;
        writer.flush()
    });

    match written {
        Ok(()) => Ok(tmp),
        Err(e) => {
            discard(&[&tmp]);
            Err(SimError::persistence(path, e))
        }
    }
}

/// Best-effort cleanup after a failed write
fn discard<P: AsRef<Path>>(paths: &[P]) {
    for path in paths {
        let path = path.as_ref();
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "could not remove leftover snapshot file"
                );
            }
        }
    }
}

/// Load the agent records stored in a JSON snapshot
pub fn read_snapshot(path: &Path) -> Result<Vec<AgentRecord>> {
    let content = fs::read(path).map_err(|e| SimError::persistence(path, e))?;
    Ok(serde_json::from_slice(&content)?)
}
