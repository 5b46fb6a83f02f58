//! Candidate filtering - Whitelist/blacklist rules per slot
//!
//! An item is eligible when it is not blacklisted and either no whitelist is
//! set or the whitelist names it. A whitelist that matches nothing in a slot
//! is treated as inapplicable to that slot: the slot falls back to every
//! non-blacklisted item instead of dropping out of the search.

use crate::catalog::{Catalog, Item};
use crate::types::SlotType;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Include/exclude rules applied to item names
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    whitelist: Option<HashSet<String>>,
    blacklist: HashSet<String>,
}

impl ItemFilter {
    pub fn new<W, B, S>(whitelist: Option<W>, blacklist: B) -> Self
    where
        W: IntoIterator<Item = S>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let whitelist: Option<HashSet<String>> =
            whitelist.map(|names| names.into_iter().map(Into::into).collect());
        ItemFilter {
            // An empty whitelist means "no whitelist"
            whitelist: whitelist.filter(|w| !w.is_empty()),
            blacklist: blacklist.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.blacklist.contains(name)
    }

    /// Strict eligibility, without the per-slot fallback
    pub fn is_eligible(&self, name: &str) -> bool {
        !self.is_blacklisted(name)
            && self
                .whitelist
                .as_ref()
                .map_or(true, |whitelist| whitelist.contains(name))
    }

    /// Eligible items of one slot, preserving the input order
    pub fn candidates<'c>(&self, slot: SlotType, items: &'c [Item]) -> Vec<&'c Item> {
        self.select(slot, items.iter().collect(), |item| item.name.as_str())
    }

    /// Eligible entries of one slot with the whitelist fallback applied
    fn select<T, F>(&self, slot: SlotType, entries: Vec<T>, name: F) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        if entries.iter().any(|entry| self.is_eligible(name(entry))) {
            return entries
                .into_iter()
                .filter(|entry| self.is_eligible(name(entry)))
                .collect();
        }

        let fallback: Vec<T> = entries
            .into_iter()
            .filter(|entry| !self.is_blacklisted(name(entry)))
            .collect();
        if self.whitelist.is_some() && !fallback.is_empty() {
            warn!(%slot, "whitelist matches no item in slot, using every non-blacklisted item");
        }
        fallback
    }
}

/// Name-level form of [`ItemFilter::candidates`]
pub fn candidates_for<'n>(
    slot: SlotType,
    all_item_names: &[&'n str],
    whitelist: Option<&[String]>,
    blacklist: &[String],
) -> Vec<&'n str> {
    let filter = ItemFilter::new(
        whitelist.map(|w| w.iter().map(String::as_str)),
        blacklist.iter().map(String::as_str),
    );
    filter.select(slot, all_item_names.to_vec(), |name| *name)
}

/// Candidate items for one slot of the search
#[derive(Debug, Clone)]
pub struct SlotCandidates<'a> {
    pub slot: SlotType,
    pub items: Vec<&'a Item>,
}

/// Build the ordered per-slot candidate lists searched by the optimizer.
///
/// Slots follow `slots` order. The weapon slot is omitted when `skip_weapon`
/// is set, and slots left with no items (absent from the catalog or fully
/// blacklisted) are dropped from the cross-product.
pub fn build_candidates<'a>(
    catalog: &'a Catalog,
    slots: &[SlotType],
    filter: &ItemFilter,
    skip_weapon: bool,
) -> Vec<SlotCandidates<'a>> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for &slot in slots {
        if !seen.insert(slot) {
            warn!(%slot, "slot listed more than once, ignoring repeat");
            continue;
        }
        if skip_weapon && slot.is_weapon() {
            debug!(%slot, "skipping weapon slot");
            continue;
        }
        if !catalog.has_slot(slot) {
            warn!(%slot, "slot not present in catalog");
            continue;
        }

        let items = filter.candidates(slot, catalog.items_of(slot));
        if items.is_empty() {
            warn!(%slot, "no eligible items, slot left out of the search");
            continue;
        }

        debug!(
            %slot,
            count = items.len(),
            items = ?items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            "slot candidates"
        );
        candidates.push(SlotCandidates { slot, items });
    }

    candidates
}
