use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tempfile::NamedTempFile;

use crate::dlog;
use crate::workout::Workout;

/// Name of the single durable slot holding the serialized collection.
pub const SLOT_KEY: &str = "workouts";

/// Whole-collection persistence against one JSON file. Every save rewrites
/// the complete serialized collection; there is no incremental update.
#[derive(Debug, Clone)]
pub struct Slot {
    path: PathBuf,
}

impl Slot {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{SLOT_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mirror the full collection into the slot. Written to a temp file in
    /// the slot's directory and renamed over the old content, so a reader
    /// never observes a partial write.
    pub fn save(&self, workouts: &[Workout]) -> io::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let bytes = serde_json::to_vec_pretty(workouts).map_err(io::Error::other)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        dlog!(
            "slot_saved path={} workouts={}",
            self.path.display(),
            workouts.len()
        );
        Ok(())
    }

    /// Read the slot back. An absent slot, unreadable file, unparsable
    /// payload or unrevivable record all yield an empty collection; the
    /// warn line is the only trace of the problem.
    pub fn load(&self) -> Vec<Workout> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    err = %e,
                    "unreadable workout log, starting empty"
                );
                return Vec::new();
            }
        };

        let records: Vec<JsonValue> = match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    err = %e,
                    "malformed workout log, starting empty"
                );
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(records.len());
        for record in records {
            match Workout::revive(record) {
                Ok(workout) => out.push(workout),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        err = %e,
                        "corrupt workout record, starting empty"
                    );
                    return Vec::new();
                }
            }
        }

        dlog!("slot_loaded path={} workouts={}", self.path.display(), out.len());
        out
    }
}
