//! JSON load/save for [`InventoryStore`].
//!
//! On disk the inventory is a single JSON object of item name → number, saved
//! with 4-space indentation. Entry order in the file is the store's insertion
//! order, and loading restores file order.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use serde_json::ser::PrettyFormatter;

use stockpile_core::{ItemName, Quantity};

use crate::error::{InventoryError, InventoryResult};
use crate::store::{InventoryStore, StockLevel};

pub const DEFAULT_INVENTORY_PATH: &str = "inventory.json";

/// What a successful [`InventoryStore::load`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store was replaced with `items` entries from the file.
    Loaded { items: usize },
    /// No file at the path; the store was left as it was.
    NotFound,
}

impl InventoryStore {
    /// Replace the whole mapping with the contents of the JSON file at `path`.
    ///
    /// The store is only touched once the file has been read and fully parsed;
    /// every failure leaves it exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> InventoryResult<LoadOutcome> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "file {} not found, keeping current inventory",
                    path.display()
                );
                return Ok(LoadOutcome::NotFound);
            }
            Err(source) => {
                tracing::error!(path = %path.display(), "error reading file: {source}");
                return Err(InventoryError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let snapshot: Snapshot = match serde_json::from_str(&contents) {
            Ok(s) => s,
            Err(source) if source.classify() == Category::Data => {
                tracing::error!(path = %path.display(), "invalid data format: {source}");
                return Err(InventoryError::InvalidFormat {
                    path: path.to_path_buf(),
                    reason: source.to_string(),
                });
            }
            Err(source) => {
                tracing::error!(path = %path.display(), "invalid JSON: {source}");
                return Err(InventoryError::Json {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let Snapshot(loaded) = snapshot;
        let items = loaded.len();
        *self = loaded;
        tracing::info!(path = %path.display(), items, "inventory data loaded");
        Ok(LoadOutcome::Loaded { items })
    }

    /// Write the mapping to `path` as indented JSON, overwriting any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> InventoryResult<()> {
        let path = path.as_ref();
        let bytes = self.to_json_pretty().map_err(|source| {
            tracing::error!(path = %path.display(), "error encoding inventory: {source}");
            InventoryError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;

        fs::write(path, bytes).map_err(|source| {
            tracing::error!(path = %path.display(), "error saving file: {source}");
            InventoryError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::info!(path = %path.display(), items = self.len(), "inventory data saved");
        Ok(())
    }

    fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl Serialize for InventoryStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let levels = self.levels();
        let mut map = serializer.serialize_map(Some(levels.len()))?;
        for level in levels {
            map.serialize_entry(&level.item, &level.quantity)?;
        }
        map.end()
    }
}

/// File contents as a fresh store, in file order. Rejects duplicate keys
/// rather than letting the last one win silently.
struct Snapshot(InventoryStore);

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = Snapshot;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object mapping item names to quantities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Snapshot, A::Error> {
        let mut store = InventoryStore::new();
        while let Some((item, quantity)) = map.next_entry::<ItemName, Quantity>()? {
            if let Err(dup) = store.push_level(StockLevel { item, quantity }) {
                return Err(de::Error::custom(format!("duplicate item `{}`", dup.item)));
            }
        }
        Ok(Snapshot(store))
    }
}
