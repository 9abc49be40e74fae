// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Infrastructure Ripple Simulation Suite ("Terra") - Scenario Store

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::SimulationResult;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("scenario store io: {0}")]
    Io(#[from] io::Error),
    #[error("scenario record corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

// ─── Persisted record ────────────────────────────────────────────────────────

/// One self-contained scenario record: the full result plus a creation
/// timestamp, retrievable independently of any other scenario.
#[derive(Debug, Serialize, Deserialize)]
struct ScenarioRecord {
    created_at_ms: u64,
    #[serde(flatten)]
    result: SimulationResult,
}

// ─── ScenarioStore ───────────────────────────────────────────────────────────

/// File-backed persistence: one JSON document per scenario id. Writes are
/// independent per id; a colliding id overwrites (last writer wins).
pub struct ScenarioStore {
    dir: PathBuf,
}

impl ScenarioStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persist the result under its scenario id. The record lands in a
    /// single atomic step (temp file + rename), so a failed save never
    /// leaves a partially-written scenario behind.
    pub fn save(&self, result: &SimulationResult) -> Result<(), StoreError> {
        let record = ScenarioRecord {
            created_at_ms: now_ms(),
            result: result.clone(),
        };
        let data = serde_json::to_vec_pretty(&record)?;

        let path = self.path_for(&result.scenario_id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Retrieve a saved result. Unknown ids are an absence, not an
    /// error; only an unreadable or corrupt record fails.
    pub fn load(&self, scenario_id: &str) -> Result<Option<SimulationResult>, StoreError> {
        let path = self.path_for(scenario_id);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record: ScenarioRecord = serde_json::from_slice(&data)?;
        Ok(Some(record.result))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, scenario_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", scenario_id))
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WorldGraph;
    use crate::propagation::simulate_shock;
    use crate::types::Shock;

    fn scratch_store(tag: &str) -> ScenarioStore {
        let dir = std::env::temp_dir().join(format!(
            "terra-store-{}-{}-{}",
            tag,
            std::process::id(),
            now_ms()
        ));
        ScenarioStore::open(dir).expect("store open")
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let store = scratch_store("roundtrip");
        let graph = WorldGraph::fallback();
        let result = simulate_shock(&graph, &Shock::new(vec!["na".into()], 0.5, 3)).unwrap();

        store.save(&result).expect("save");
        let loaded = store.load(&result.scenario_id).expect("load").expect("present");
        assert_eq!(loaded, result);

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_missing_id_is_absent_not_error() {
        let store = scratch_store("missing");
        let loaded = store.load("scenario_never_saved").expect("load must not fail");
        assert!(loaded.is_none());

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let store = scratch_store("corrupt");
        fs::write(store.dir().join("scenario_bad.json"), b"{ nope").unwrap();
        assert!(matches!(
            store.load("scenario_bad"),
            Err(StoreError::Corrupt(_))
        ));

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_save_overwrites_existing_id() {
        let store = scratch_store("overwrite");
        let graph = WorldGraph::fallback();

        let mut first = simulate_shock(&graph, &Shock::new(vec!["na".into()], 0.2, 1)).unwrap();
        first.scenario_id = "scenario_fixed".into();
        let mut second = simulate_shock(&graph, &Shock::new(vec!["eu".into()], 0.9, 2)).unwrap();
        second.scenario_id = "scenario_fixed".into();

        store.save(&first).unwrap();
        store.save(&second).unwrap();

        let loaded = store.load("scenario_fixed").unwrap().unwrap();
        assert_eq!(loaded, second, "last writer must win");

        let _ = fs::remove_dir_all(store.dir());
    }
}
