use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::error::{SimError, SimResult};
use crate::result::SimulationResult;

/// Where finished simulation results are kept.
///
/// Each result is written on its own; implementations take `&self` so
/// parallel runs can save without coordination.
pub trait ResultStore {
    /// Persist a result, replacing any result with the same id.
    fn save(&self, result: &SimulationResult) -> SimResult<()>;

    /// Load a result by id.
    fn load(&self, id: Uuid) -> SimResult<SimulationResult>;

    /// Ids of all stored results, sorted.
    fn list(&self) -> SimResult<Vec<Uuid>>;

    /// Load several results, failing on the first unknown id.
    fn load_many(&self, ids: &[Uuid]) -> SimResult<Vec<SimulationResult>> {
        ids.iter().map(|id| self.load(*id)).collect()
    }
}

/// One pretty-printed JSON file per result in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> SimResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SimError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl ResultStore for JsonDirStore {
    fn save(&self, result: &SimulationResult) -> SimResult<()> {
        let path = self.path_for(result.id);
        let json = serde_json::to_string_pretty(result)?;
        std::fs::write(&path, json).map_err(|source| SimError::Io { path, source })?;
        tracing::debug!(id = %result.id, "saved simulation result");
        Ok(())
    }

    fn load(&self, id: Uuid) -> SimResult<SimulationResult> {
        let path = self.path_for(id);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SimError::SimulationNotFound(id));
            }
            Err(source) => return Err(SimError::Io { path, source }),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn list(&self) -> SimResult<Vec<Uuid>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| SimError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let mut ids: Vec<Uuid> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension()? != "json" {
                    return None;
                }
                Uuid::parse_str(path.file_stem()?.to_str()?).ok()
            })
            .collect();
        ids.sort();
        Ok(ids)
    }
}

/// Results held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    results: Mutex<BTreeMap<Uuid, SimulationResult>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn save(&self, result: &SimulationResult) -> SimResult<()> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(result.id, result.clone());
        Ok(())
    }

    fn load(&self, id: Uuid) -> SimResult<SimulationResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(SimError::SimulationNotFound(id))
    }

    fn list(&self) -> SimResult<Vec<Uuid>> {
        Ok(self
            .results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect())
    }
}
