//! Cursor over a contiguous range of the per-slot cross-product
//!
//! Combination `i` is `i` written in mixed radix over the slot candidate
//! counts, last slot varying fastest.

use crate::catalog::Item;
use crate::filter::SlotCandidates;
use std::ops::Range;

pub(crate) struct Combinations<'s, 'a> {
    slots: &'s [SlotCandidates<'a>],
    digits: Vec<usize>,
    next: u64,
    end: u64,
    started: bool,
}

impl<'s, 'a> Combinations<'s, 'a> {
    pub(crate) fn new(slots: &'s [SlotCandidates<'a>], range: Range<u64>) -> Self {
        let mut digits = vec![0; slots.len()];
        let mut rem = range.start;
        for (digit, slot) in digits.iter_mut().zip(slots).rev() {
            let radix = slot.items.len().max(1) as u64;
            *digit = (rem % radix) as usize;
            rem /= radix;
        }

        Combinations {
            slots,
            digits,
            next: range.start,
            end: range.end,
            started: false,
        }
    }

    /// Move to the next combination and return its index
    pub(crate) fn advance(&mut self) -> Option<u64> {
        if self.next >= self.end {
            return None;
        }
        if self.started {
            self.increment();
        } else {
            self.started = true;
        }
        let index = self.next;
        self.next += 1;
        Some(index)
    }

    /// Items of the current combination, in slot order
    pub(crate) fn items(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.slots
            .iter()
            .zip(&self.digits)
            .map(|(slot, &digit)| slot.items[digit])
    }

    fn increment(&mut self) {
        for (digit, slot) in self.digits.iter_mut().zip(self.slots).rev() {
            *digit += 1;
            if *digit < slot.items.len() {
                return;
            }
            *digit = 0;
        }
    }
}

/// Number of combinations, or `None` if it does not fit in `u64`
pub(crate) fn search_space(slots: &[SlotCandidates<'_>]) -> Option<u64> {
    slots
        .iter()
        .try_fold(1u64, |acc, slot| acc.checked_mul(slot.items.len() as u64))
}
