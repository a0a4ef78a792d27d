//! Objective list persistence over the key-value store.
//!
//! # Responsibility
//! - Serialize the whole objective list under one key.
//! - Recover from malformed stored data by resetting to an empty list.
//! - Assign and persist ids for records stored before ids existed.
//!
//! # Invariants
//! - `save_objectives` overwrites the full list; there is no merge.
//! - `load_objectives` never fails on bad JSON, only on storage transport.
//! - Saving a freshly loaded list reproduces the same blob.
//! - Repeated loads of the same stored list yield the same ids.

use crate::model::objective::{Objective, ObjectiveId};
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use log::{error, info, warn};

/// Storage key holding the serialized objective list.
pub const OBJECTIVES_KEY: &str = "objectives";

/// Repository interface for the objective list.
pub trait ObjectiveRepository {
    /// Reads the persisted list. Absent or malformed data yields an empty list.
    fn load_objectives(&self) -> RepoResult<Vec<Objective>>;
    /// Replaces the persisted list.
    fn save_objectives(&self, objectives: &[Objective]) -> RepoResult<()>;
}

/// Objective repository storing a JSON array in a `KeyValueStore`.
pub struct KvObjectiveRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvObjectiveRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the raw stored blob, if any.
    pub fn raw_blob(&self) -> RepoResult<Option<String>> {
        self.store.get(OBJECTIVES_KEY)
    }

    /// Writes back a list whose missing ids were just assigned.
    ///
    /// A failed write still returns the list to the caller; the ids are then
    /// only stable for this load and the upgrade is retried on the next one.
    fn persist_upgrade(&self, objectives: &[Objective], assigned: usize) {
        match self.save_objectives(objectives) {
            Ok(()) => info!(
                "event=objectives_upgrade module=repo status=ok assigned_ids={} count={}",
                assigned,
                objectives.len()
            ),
            Err(err) => warn!(
                "event=objectives_upgrade module=repo status=error assigned_ids={} error={}",
                assigned, err
            ),
        }
    }
}

impl<S: KeyValueStore> ObjectiveRepository for KvObjectiveRepository<S> {
    fn load_objectives(&self) -> RepoResult<Vec<Objective>> {
        let Some(blob) = self.store.get(OBJECTIVES_KEY)? else {
            info!("event=objectives_load module=repo status=ok count=0 source=absent");
            return Ok(Vec::new());
        };

        match decode_objectives(&blob) {
            Some(mut objectives) => {
                info!(
                    "event=objectives_load module=repo status=ok count={} source=stored",
                    objectives.len()
                );
                let assigned = assign_missing_ids(&mut objectives);
                if assigned > 0 {
                    self.persist_upgrade(&objectives, assigned);
                }
                Ok(objectives)
            }
            None => {
                warn!(
                    "event=objectives_load module=repo status=reset error_code=malformed_blob blob_bytes={}",
                    blob.len()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_objectives(&self, objectives: &[Objective]) -> RepoResult<()> {
        let blob = serde_json::to_string(objectives)
            .map_err(|err| RepoError::Encode(err.to_string()))?;

        if let Err(err) = self.store.set(OBJECTIVES_KEY, &blob) {
            error!(
                "event=objectives_save module=repo status=error count={} blob_bytes={} error={}",
                objectives.len(),
                blob.len(),
                err
            );
            return Err(err);
        }

        info!(
            "event=objectives_save module=repo status=ok count={} blob_bytes={}",
            objectives.len(),
            blob.len()
        );
        Ok(())
    }
}

/// `null` is what the browser store holds after an explicit clear.
fn decode_objectives(blob: &str) -> Option<Vec<Objective>> {
    serde_json::from_str::<Option<Vec<Objective>>>(blob)
        .ok()
        .map(Option::unwrap_or_default)
}

/// Gives every record still carrying the nil id a fresh one.
fn assign_missing_ids(objectives: &mut [Objective]) -> usize {
    let mut assigned = 0;
    for objective in objectives.iter_mut().filter(|o| o.id.is_nil()) {
        objective.id = ObjectiveId::new_v4();
        assigned += 1;
    }
    assigned
}
