//! Pessimistic rule simplification.
//!
//! A rule is simplified by dropping conditions as long as the training
//! error (rows the rule matches with the wrong label) does not grow.
//! The search is depth-first over condition subsets: after dropping one
//! attribute, an accepted subset with two or more conditions is explored
//! before its siblings. An explicit frame stack replaces recursion.

use log::{debug, trace};

use super::set::RuleStore;
use crate::data::Dataset;
use crate::rule::{CondSet, RuleItem};

/// One level of the depth-first search: a condition set and the
/// attributes not yet tried for removal.
struct Frame {
    cond_set: CondSet,
    attributes: Vec<usize>,
    next: usize,
}

impl Frame {
    fn new(cond_set: CondSet) -> Self {
        let attributes = cond_set.attributes().collect();
        Self {
            cond_set,
            attributes,
            next: 0,
        }
    }

    /// The next simplification of this frame's condition set, if any.
    fn next_simplification(&mut self) -> Option<CondSet> {
        let attribute = *self.attributes.get(self.next)?;
        self.next += 1;
        Some(self.cond_set.without(attribute))
    }
}

/// Returns the condition subset of `rule` with minimal training error.
///
/// Equal error favours the candidate found later, which is never larger
/// than the one it replaces. Rules with a single condition are returned
/// unchanged. The returned item has fresh statistics but keeps no store id.
pub fn prune_rule(rule: &RuleItem, dataset: &Dataset) -> RuleItem {
    let mut best = rule.clone();
    let mut best_errors = rule.training_errors();
    if rule.cond_set().len() < 2 {
        return best;
    }

    let mut stack = vec![Frame::new(rule.cond_set().clone())];
    while let Some(frame) = stack.last_mut() {
        let Some(cond_set) = frame.next_simplification() else {
            stack.pop();
            continue;
        };
        let candidate = RuleItem::new(cond_set, rule.class_label(), dataset);
        let errors = candidate.training_errors();
        if errors <= best_errors {
            trace!("prune {rule}: {candidate} has {errors} error(s), best was {best_errors}");
            best_errors = errors;
            if candidate.cond_set().len() >= 2 {
                stack.push(Frame::new(candidate.cond_set().clone()));
            }
            best = candidate;
        }
    }
    best
}

/// Prunes every rule of `store` (in store order) into a new store.
///
/// The new store applies the usual condition-set deduplication; support
/// and confidence thresholds are not re-applied.
pub fn prune(store: &RuleStore, dataset: &Dataset) -> RuleStore {
    let mut pruned = RuleStore::new();
    for rule in store {
        pruned.insert(prune_rule(rule, dataset));
    }
    debug!("pruned {} rule(s) down to {}", store.len(), pruned.len());
    pruned
}

impl RuleStore {
    /// Shorthand for [`prune`].
    pub fn pruned(&self, dataset: &Dataset) -> RuleStore {
        prune(self, dataset)
    }
}
