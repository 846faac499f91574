use cashflow_ledger_core::models::state::LedgerState;
use cashflow_ledger_core::storage::manager::{StorageManager, SNAPSHOT_KEY};
use cashflow_ledger_core::storage::store::{FileStore, MemoryStore, SnapshotStore};

fn named_state(player: &str) -> LedgerState {
    let mut state = LedgerState::default();
    state.player = player.to_string();
    state.profession = "Engineer".to_string();
    state.salary = 4600.0;
    state
}

// ═══════════════════════════════════════════════════════════════════
//  MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn put_then_get() {
        let mut store = MemoryStore::new();
        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn get_missing_is_none() {
        assert_eq!(MemoryStore::new().get("nope").unwrap(), None);
    }

    #[test]
    fn put_overwrites() {
        let mut store = MemoryStore::new();
        store.put("k", "a").unwrap();
        store.put("k", "b").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = MemoryStore::new();
        store.put("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.put("session", "{\"a\":1}").unwrap();
        assert_eq!(store.get("session").unwrap().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.put("session", "persisted").unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("session").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn remove_deletes_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.put("session", "x").unwrap();
        store.remove("session").unwrap();
        store.remove("session").unwrap();
        assert_eq!(store.get("session").unwrap(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StorageManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let state = named_state("Alice");

        StorageManager::save(&state, &mut store).unwrap();
        let loaded = StorageManager::load(&store).unwrap();
        assert_eq!(loaded, Some(state));
    }

    #[test]
    fn saves_under_the_fixed_key() {
        let mut store = MemoryStore::new();
        StorageManager::save(&named_state("Alice"), &mut store).unwrap();
        assert!(store.get(SNAPSHOT_KEY).unwrap().is_some());
        assert_eq!(SNAPSHOT_KEY, "cashflow_state_v1");
    }

    #[test]
    fn absent_snapshot_loads_as_none() {
        assert_eq!(StorageManager::load(&MemoryStore::new()).unwrap(), None);
    }

    #[test]
    fn malformed_snapshot_loads_as_none() {
        let mut store = MemoryStore::new();
        store.put(SNAPSHOT_KEY, "{not valid json").unwrap();
        assert_eq!(StorageManager::load(&store).unwrap(), None);
    }

    #[test]
    fn wrong_shape_snapshot_loads_as_none() {
        let mut store = MemoryStore::new();
        store.put(SNAPSHOT_KEY, "[1,2,3]").unwrap();
        assert_eq!(StorageManager::load(&store).unwrap(), None);
    }

    #[test]
    fn partial_snapshot_fills_defaults() {
        let mut store = MemoryStore::new();
        store
            .put(SNAPSHOT_KEY, r#"{"player":"Cara","profession":"Pilot"}"#)
            .unwrap();
        let state = StorageManager::load(&store).unwrap().unwrap();
        assert_eq!(state.player, "Cara");
        assert!(!state.needs_setup());
        assert_eq!(state.winning_passive_income_goal, 50_000.0);
    }

    #[test]
    fn clear_removes_the_snapshot() {
        let mut store = MemoryStore::new();
        StorageManager::save(&named_state("Alice"), &mut store).unwrap();
        StorageManager::clear(&mut store).unwrap();
        assert_eq!(StorageManager::load(&store).unwrap(), None);
    }

    #[test]
    fn save_overwrites_wholesale() {
        let mut store = MemoryStore::new();
        StorageManager::save(&named_state("Alice"), &mut store).unwrap();
        StorageManager::save(&named_state("Bob"), &mut store).unwrap();

        let loaded = StorageManager::load(&store).unwrap().unwrap();
        assert_eq!(loaded.player, "Bob");
    }
}
