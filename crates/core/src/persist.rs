//! Inventory persistence.
//!
//! The inventory is stored wholesale under a single key as a JSON array of
//! exactly [`SLOT_COUNT`] elements, each `null` or `{"id", "count"}` plus the
//! non-authoritative `name`/`color` display fields. Payloads of any other shape
//! are rejected as corrupt rather than truncated or padded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::catalog::ItemCatalog;
use crate::error::InventoryError;
use crate::inventory::{SlotEntry, SlotStore, SLOT_COUNT};

/// Key the inventory is stored under.
pub const INVENTORY_KEY: &str = "minecraftInventory";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Wrap IO errors from file-backed stores.
    #[error("inventory store IO failed: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde encoding issues.
    #[error("failed to encode inventory: {0}")]
    Encode(#[from] serde_json::Error),
    /// Keys are restricted to `[A-Za-z0-9_.-]`.
    #[error("invalid store key `{0}`")]
    InvalidKey(String),
}

/// Minimal key-value byte store the inventory persists into.
pub trait KeyValueStore {
    /// Store `bytes` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Load the bytes stored under `key`, `None` if nothing was saved.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}

/// In-memory store, mostly for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes under `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|v| v.as_slice())
    }

    /// Seed raw bytes under `key`.
    pub fn insert(&mut self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), bytes.into());
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory the store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        // Write-then-rename so a failed save never leaves a half-written payload.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote store entry");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Serialized form of one occupied slot.
#[derive(Debug, Serialize, Deserialize)]
struct SlotRecord {
    id: String,
    count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

/// Encode every slot, empty ones as explicit `null`s.
pub fn encode_inventory(store: &SlotStore, catalog: &ItemCatalog) -> Result<Vec<u8>, StoreError> {
    let records: Vec<Option<SlotRecord>> = store
        .slots()
        .iter()
        .map(|slot| {
            slot.as_ref().map(|entry| {
                let def = catalog.get(entry.item_id());
                SlotRecord {
                    id: entry.item_id().to_string(),
                    count: entry.count(),
                    name: def.map(|d| d.name.clone()),
                    color: def.map(|d| d.color.clone()),
                }
            })
        })
        .collect();
    Ok(serde_json::to_vec(&records)?)
}

/// Decode a payload produced by [`encode_inventory`].
///
/// Any malformed payload, wrong slot count, zero count or unknown item id is
/// reported as [`InventoryError::PersistenceCorrupt`].
pub fn decode_inventory(bytes: &[u8], catalog: &ItemCatalog) -> Result<SlotStore, InventoryError> {
    let records: Vec<Option<SlotRecord>> = serde_json::from_slice(bytes)
        .map_err(|err| InventoryError::PersistenceCorrupt(err.to_string()))?;

    if records.len() != SLOT_COUNT {
        return Err(InventoryError::PersistenceCorrupt(format!(
            "expected {} slots, got {}",
            SLOT_COUNT,
            records.len()
        )));
    }

    let mut slots = Vec::with_capacity(SLOT_COUNT);
    for (index, record) in records.into_iter().enumerate() {
        let entry = match record {
            None => None,
            Some(record) => {
                if !catalog.contains(&record.id) {
                    return Err(InventoryError::PersistenceCorrupt(format!(
                        "slot {index} references unknown item `{}`",
                        record.id
                    )));
                }
                let entry = SlotEntry::new(record.id, record.count).map_err(|_| {
                    InventoryError::PersistenceCorrupt(format!("slot {index} has count 0"))
                })?;
                Some(entry)
            }
        };
        slots.push(entry);
    }

    SlotStore::from_slots(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Inventory, SampleAssignment};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn sample_store() -> SlotStore {
        let mut inv = Inventory::new();
        inv.fill_sample(&ItemCatalog::builtin(), &SampleAssignment::defaults())
            .unwrap();
        inv.store().clone()
    }

    fn null_payload(len: usize) -> String {
        format!("[{}]", vec!["null"; len].join(","))
    }

    #[test]
    fn encode_writes_explicit_nulls_and_display_fields() {
        let bytes = encode_inventory(&sample_store(), &ItemCatalog::builtin()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let array = value.as_array().unwrap();

        assert_eq!(array.len(), SLOT_COUNT);
        assert!(array[2].is_null());
        assert_eq!(array[0]["id"], "stone");
        assert_eq!(array[0]["count"], 64);
        assert_eq!(array[0]["name"], "Stone");
        assert_eq!(array[0]["color"], "#808080");
    }

    #[test]
    fn decode_restores_encoded_store() {
        let catalog = ItemCatalog::builtin();
        let store = sample_store();
        let bytes = encode_inventory(&store, &catalog).unwrap();
        assert_eq!(decode_inventory(&bytes, &catalog).unwrap(), store);
    }

    #[test]
    fn decode_ignores_display_fields() {
        let catalog = ItemCatalog::builtin();
        let mut slots = vec!["null".to_string(); SLOT_COUNT];
        slots[7] = r##"{"id":"sand","count":9,"name":"Not Sand","color":"#000000"}"##.into();
        let payload = format!("[{}]", slots.join(","));

        let store = decode_inventory(payload.as_bytes(), &catalog).unwrap();
        let entry = store.get(7).unwrap().unwrap();
        assert_eq!(entry.item_id(), "sand");
        assert_eq!(entry.count(), 9);
    }

    #[test]
    fn decode_rejects_wrong_lengths() {
        let catalog = ItemCatalog::builtin();
        for len in [0, 1, 36, 38, 40] {
            let err = decode_inventory(null_payload(len).as_bytes(), &catalog).unwrap_err();
            assert!(err.is_corrupt(), "length {len} should be corrupt");
        }
        assert!(decode_inventory(null_payload(SLOT_COUNT).as_bytes(), &catalog).is_ok());
    }

    #[test]
    fn decode_rejects_malformed_payloads() {
        let catalog = ItemCatalog::builtin();
        let mut zero = vec!["null".to_string(); SLOT_COUNT];
        zero[0] = r#"{"id":"stone","count":0}"#.into();
        let mut negative = vec!["null".to_string(); SLOT_COUNT];
        negative[0] = r#"{"id":"stone","count":-4}"#.into();
        let mut unknown = vec!["null".to_string(); SLOT_COUNT];
        unknown[0] = r#"{"id":"bedrock","count":1}"#.into();

        let payloads = [
            "not json".to_string(),
            "{}".to_string(),
            format!("[{}]", zero.join(",")),
            format!("[{}]", negative.join(",")),
            format!("[{}]", unknown.join(",")),
        ];
        for payload in payloads {
            let err = decode_inventory(payload.as_bytes(), &catalog).unwrap_err();
            assert!(err.is_corrupt(), "payload {payload:?} should be corrupt");
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load(INVENTORY_KEY).unwrap().is_none());
        store.save(INVENTORY_KEY, b"[1]").unwrap();
        assert_eq!(store.load(INVENTORY_KEY).unwrap().as_deref(), Some(&b"[1]"[..]));
    }

    #[test]
    fn file_store_round_trip_and_missing_key() {
        let dir = std::env::temp_dir().join(format!(
            "slotgrid_store_{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut store = FileStore::new(&dir).unwrap();

        assert!(store.load(INVENTORY_KEY).unwrap().is_none());
        store.save(INVENTORY_KEY, b"payload").unwrap();
        assert_eq!(
            store.load(INVENTORY_KEY).unwrap().as_deref(),
            Some(&b"payload"[..])
        );
        assert!(dir.join("minecraftInventory.json").exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = std::env::temp_dir().join("slotgrid_store_keys");
        let mut store = FileStore::new(&dir).unwrap();
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.save(key, b"x"),
                Err(StoreError::InvalidKey(_))
            ));
        }
    }
}
