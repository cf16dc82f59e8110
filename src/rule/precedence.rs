//! Total precedence order over rules.
//!
//! `r1` precedes `r2` when, in order of decreasing priority:
//!
//! 1. `r1` has higher confidence;
//! 2. `r1` has higher support;
//! 3. `r1` has fewer conditions (it is more general, so level-wise mining
//!    produced it earlier);
//! 4. `r1` has the smaller store id (it was generated first).
//!
//! Orderings are expressed as [`Ordering::Less`] for "precedes", so an
//! ascending sort puts the strongest rule first.

use std::cmp::Ordering;

use super::item::RuleItem;

/// Compares two rules; `Less` means `a` precedes `b`.
pub fn cmp_precedence(a: &RuleItem, b: &RuleItem) -> Ordering {
    b.confidence()
        .total_cmp(&a.confidence())
        .then_with(|| b.support().total_cmp(&a.support()))
        .then_with(|| a.cond_set().len().cmp(&b.cond_set().len()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Like [`cmp_precedence`] with absent rules ranked last.
///
/// Two absent rules compare equal.
pub fn cmp_precedence_opt(a: Option<&RuleItem>, b: Option<&RuleItem>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp_precedence(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Whether `a` strictly precedes `b` (an absent `b` is always preceded
/// by a present `a`).
pub fn precedes(a: Option<&RuleItem>, b: Option<&RuleItem>) -> bool {
    cmp_precedence_opt(a, b) == Ordering::Less
}

/// Sorts rules strongest first.
pub fn sort_by_precedence(rules: &mut [RuleItem]) {
    rules.sort_by(cmp_precedence);
}
