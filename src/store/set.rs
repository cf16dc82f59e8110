//! Deduplicating CAR set.

use std::collections::HashMap;

use crate::rule::{CondSet, RuleItem};

/// Ordered set of rule items holding at most one item per condition set.
///
/// When two items share a condition set the one with the higher
/// confidence survives; on equal confidence the earlier one stays. Every
/// item accepted into the store receives a fresh, increasing
/// [`id`](RuleItem::id), which later serves as the deterministic
/// precedence tie-break.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleStore {
    rules: Vec<RuleItem>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<CondSet, usize>,
    next_id: usize,
}

/// What [`RuleStore::insert`] did with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// New condition set; the item was appended.
    Added,
    /// The item displaced a lower-confidence item with the same conditions.
    Replaced,
    /// An item with the same conditions and at least equal confidence
    /// already exists.
    Kept,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Stored rules in insertion order.
    pub fn rules(&self) -> &[RuleItem] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleItem> {
        self.rules.iter()
    }

    /// Rule stored for `cond_set`, if any.
    pub fn get(&self, cond_set: &CondSet) -> Option<&RuleItem> {
        if self.index.len() != self.rules.len() {
            return self.rules.iter().find(|r| r.cond_set() == cond_set);
        }
        self.index.get(cond_set).map(|&i| &self.rules[i])
    }

    /// Inserts `item` under the condition-set deduplication rule.
    pub fn insert(&mut self, mut item: RuleItem) -> Insertion {
        if self.index.len() != self.rules.len() {
            self.rebuild_index();
        }
        match self.index.get(item.cond_set()) {
            Some(&slot) if self.rules[slot].confidence() < item.confidence() => {
                item.id = self.take_id();
                self.rules[slot] = item;
                Insertion::Replaced
            }
            Some(_) => Insertion::Kept,
            None => {
                item.id = self.take_id();
                self.index.insert(item.cond_set().clone(), self.rules.len());
                self.rules.push(item);
                Insertion::Added
            }
        }
    }

    /// Inserts `item` only if it is frequent and accurate enough.
    ///
    /// Returns `None` when the item misses either threshold.
    pub fn admit(&mut self, item: RuleItem, min_support: f64, min_confidence: f64) -> Option<Insertion> {
        if item.support() >= min_support && item.confidence() >= min_confidence {
            Some(self.insert(item))
        } else {
            None
        }
    }

    fn take_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // The index is skipped by serde; restore it lazily after deserializing.
    fn rebuild_index(&mut self) {
        self.index = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.cond_set().clone(), i))
            .collect();
    }
}

impl<'a> IntoIterator for &'a RuleStore {
    type Item = &'a RuleItem;
    type IntoIter = std::slice::Iter<'a, RuleItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<RuleItem> for RuleStore {
    fn from_iter<I: IntoIterator<Item = RuleItem>>(iter: I) -> Self {
        let mut store = Self::new();
        for item in iter {
            store.insert(item);
        }
        store
    }
}
