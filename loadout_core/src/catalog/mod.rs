//! Item catalog - Item definitions indexed by slot and name
//!
//! Catalog files are JSON objects of the shape
//! `{ slot: { item_name: { stat: number, ... }, ... }, ... }`.
//! Slot names must be known [`SlotType`]s and every stat value must be a
//! number. Stats outside the known vocabulary are kept in [`Item::extra`]
//! unless strict loading is requested.

mod item;

pub use item::{Item, ItemStats, Stat};

use crate::types::SlotType;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// The catalog source does not have the expected nested-mapping shape
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("Failed to read catalog '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a mapping for {context}")]
    NotAMapping { context: String },
    #[error("Unknown slot type '{0}'")]
    UnknownSlot(String),
    #[error("Stat '{stat}' of {slot}/{item} is not a number")]
    NonNumeric {
        slot: SlotType,
        item: String,
        stat: String,
    },
    #[error("Unknown stat '{stat}' on {slot}/{item}")]
    UnknownStat {
        slot: SlotType,
        item: String,
        stat: String,
    },
}

/// Read-only item catalog, built once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Items per slot, ordered by name
    slots: BTreeMap<SlotType, Vec<Item>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path, strict: bool) -> Result<Self, DataFormatError> {
        let content = fs::read_to_string(path).map_err(|error| DataFormatError::Io {
            error,
            path: path.to_path_buf(),
        })?;
        let catalog = Self::parse(&content, strict)?;
        info!(
            path = %path.display(),
            slots = catalog.slots.len(),
            items = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from a JSON string
    pub fn parse(content: &str, strict: bool) -> Result<Self, DataFormatError> {
        let root: Value = serde_json::from_str(content)?;
        let root = as_mapping(&root, || "catalog root".to_string())?;

        let mut catalog = Catalog::new();
        for (slot_name, items) in root {
            let slot: SlotType = slot_name
                .parse()
                .map_err(DataFormatError::UnknownSlot)?;
            let items = as_mapping(items, || format!("slot '{}'", slot_name))?;

            for (item_name, attrs) in items {
                let attrs = as_mapping(attrs, || format!("item '{}/{}'", slot_name, item_name))?;
                let item = parse_item(slot, item_name, attrs, strict)?;
                catalog.insert(item);
            }
        }

        Ok(catalog)
    }

    /// Add an item, replacing any item with the same slot and name
    pub fn insert(&mut self, item: Item) {
        let items = self.slots.entry(item.slot).or_default();
        match items.binary_search_by(|probe| probe.name.as_str().cmp(&item.name)) {
            Ok(idx) => items[idx] = item,
            Err(idx) => items.insert(idx, item),
        }
    }

    /// Builder-style insert
    pub fn with_item(mut self, item: Item) -> Self {
        self.insert(item);
        self
    }

    /// All items of a slot, ordered by name (empty if the slot is absent)
    pub fn items_of(&self, slot: SlotType) -> &[Item] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the catalog defines the slot at all
    pub fn has_slot(&self, slot: SlotType) -> bool {
        self.slots.contains_key(&slot)
    }

    /// Look up an item by slot and name
    pub fn get(&self, slot: SlotType, name: &str) -> Option<&Item> {
        let items = self.slots.get(&slot)?;
        items
            .binary_search_by(|probe| probe.name.as_str().cmp(name))
            .ok()
            .map(|idx| &items[idx])
    }

    /// Slots present in the catalog
    pub fn slot_types(&self) -> impl Iterator<Item = SlotType> + '_ {
        self.slots.keys().copied()
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn as_mapping<'v>(
    value: &'v Value,
    context: impl FnOnce() -> String,
) -> Result<&'v Map<String, Value>, DataFormatError> {
    value
        .as_object()
        .ok_or_else(|| DataFormatError::NotAMapping { context: context() })
}

fn parse_item(
    slot: SlotType,
    name: &str,
    attrs: &Map<String, Value>,
    strict: bool,
) -> Result<Item, DataFormatError> {
    let mut item = Item::new(slot, name, ItemStats::default());

    for (key, value) in attrs {
        let value = value.as_f64().ok_or_else(|| DataFormatError::NonNumeric {
            slot,
            item: name.to_string(),
            stat: key.clone(),
        })?;

        match key.parse::<Stat>() {
            Ok(stat) => item.define(stat, value),
            Err(_) if strict => {
                return Err(DataFormatError::UnknownStat {
                    slot,
                    item: name.to_string(),
                    stat: key.clone(),
                });
            }
            Err(_) => {
                warn!(%slot, item = name, stat = %key, "unknown stat ignored in calculations");
                item.extra.insert(key.clone(), value);
            }
        }
    }

    Ok(item)
}
