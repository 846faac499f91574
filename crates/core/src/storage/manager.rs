use log::warn;

use crate::errors::CoreError;
use crate::models::state::LedgerState;

use super::store::SnapshotStore;

/// The fixed key the session snapshot lives under.
pub const SNAPSHOT_KEY: &str = "cashflow_state_v1";

/// High-level snapshot operations: save/load the ledger state as one
/// JSON object under [`SNAPSHOT_KEY`], overwritten wholesale on every
/// change. There is no schema version beyond implicit shape
/// compatibility — unknown fields default, malformed data is discarded.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the state and overwrite the stored snapshot.
    pub fn save(state: &LedgerState, store: &mut dyn SnapshotStore) -> Result<(), CoreError> {
        let json = serde_json::to_string(state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))?;
        store.put(SNAPSHOT_KEY, &json)
    }

    /// Read the stored snapshot.
    ///
    /// Missing and unparseable snapshots both come back as `None`:
    /// corrupt data is indistinguishable from a fresh session, and the
    /// caller falls back to defaults and the setup sequence.
    pub fn load(store: &dyn SnapshotStore) -> Result<Option<LedgerState>, CoreError> {
        let Some(json) = store.get(SNAPSHOT_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!("discarding malformed snapshot: {e}");
                Ok(None)
            }
        }
    }

    /// Drop the stored snapshot entirely.
    pub fn clear(store: &mut dyn SnapshotStore) -> Result<(), CoreError> {
        store.remove(SNAPSHOT_KEY)
    }
}
