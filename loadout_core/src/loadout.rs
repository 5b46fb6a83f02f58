//! Loadout - One chosen item per searched slot

use crate::catalog::{Item, ItemStats, Stat};
use crate::types::SlotType;
use serde::Serialize;

/// A set of equipped items, at most one per slot.
///
/// Items are borrowed from the catalog and kept in search slot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loadout<'a> {
    items: Vec<&'a Item>,
}

impl<'a> Loadout<'a> {
    /// Build a loadout, or `None` if two items share a slot
    pub fn new(items: Vec<&'a Item>) -> Option<Self> {
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.slot == item.slot) {
                return None;
            }
        }
        Some(Loadout { items })
    }

    /// Build from items already known to occupy distinct slots
    pub(crate) fn from_distinct(items: Vec<&'a Item>) -> Self {
        debug_assert!(Loadout::new(items.clone()).is_some());
        Loadout { items }
    }

    pub fn empty() -> Self {
        Loadout { items: Vec::new() }
    }

    /// Item equipped in a slot
    pub fn get(&self, slot: SlotType) -> Option<&'a Item> {
        self.items.iter().copied().find(|item| item.slot == slot)
    }

    /// (slot, item) pairs in search order
    pub fn iter(&self) -> impl Iterator<Item = (SlotType, &'a Item)> + '_ {
        self.items.iter().map(|item| (item.slot, *item))
    }

    pub fn items(&self) -> &[&'a Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of a stat over every equipped item; items without it add 0
    pub fn sum(&self, stat: Stat) -> f64 {
        self.items.iter().map(|item| item.stat(stat)).sum()
    }

    /// Sum of an extension stat (one outside the known vocabulary)
    pub fn sum_extra(&self, name: &str) -> f64 {
        self.items
            .iter()
            .filter_map(|item| item.extra.get(name))
            .sum()
    }

    /// Every known stat summed in a single pass
    pub fn totals(&self) -> ItemStats {
        let mut totals = ItemStats::default();
        for item in &self.items {
            totals.accumulate(&item.stats);
        }
        totals
    }
}

/// Sum a stat across a loadout
pub fn sum_attribute(stat: Stat, loadout: &Loadout<'_>) -> f64 {
    loadout.sum(stat)
}
