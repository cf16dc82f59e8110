//! Condition sets, rule items and the three-valued match predicate.

use std::collections::BTreeMap;
use std::fmt;

use crate::data::{Dataset, Value};

/// Conjunction of `attribute == value` tests, kept in ascending
/// attribute order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CondSet(BTreeMap<usize, Value>);

impl CondSet {
    /// Creates an empty condition set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the condition on `attribute`, replacing any previous value.
    pub fn insert(&mut self, attribute: usize, value: Value) {
        self.0.insert(attribute, value);
    }

    /// Returns a copy without the condition on `attribute`.
    pub fn without(&self, attribute: usize) -> Self {
        let mut out = self.clone();
        out.0.remove(&attribute);
        out
    }

    /// Value required for `attribute`, if constrained.
    pub fn get(&self, attribute: usize) -> Option<Value> {
        self.0.get(&attribute).copied()
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Constrained attributes, ascending.
    pub fn attributes(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    /// `(attribute, value)` pairs, ascending by attribute.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Value)> + '_ {
        self.0.iter().map(|(&a, &v)| (a, v))
    }

    /// Whether every condition holds for `attributes`.
    ///
    /// Attributes beyond the end of the slice never match.
    pub fn covers(&self, attributes: &[Value]) -> bool {
        self.0
            .iter()
            .all(|(&a, &v)| attributes.get(a).is_some_and(|&x| x == v))
    }

    /// Union of two condition sets that agree on their shared attributes.
    ///
    /// Returns `None` when the sets are equal or disagree on any shared
    /// attribute.
    pub fn join(&self, other: &Self) -> Option<Self> {
        if self == other {
            return None;
        }
        let mut joined = self.clone();
        for (attribute, value) in other.iter() {
            match self.get(attribute) {
                Some(mine) if mine != value => return None,
                Some(_) => {}
                None => joined.insert(attribute, value),
            }
        }
        Some(joined)
    }
}

impl FromIterator<(usize, Value)> for CondSet {
    fn from_iter<I: IntoIterator<Item = (usize, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CondSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (attribute, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({attribute}, {value})")?;
        }
        write!(f, "}}")
    }
}

/// Outcome of testing one labelled row against one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Some condition fails; the rule does not apply to the row.
    NoMatch,
    /// All conditions hold and the row carries the rule's label.
    Correct,
    /// All conditions hold but the row carries another label.
    Wrong,
}

/// A condition set implying a class label, with its statistics over the
/// dataset it was built from.
///
/// Statistics are computed once in [`RuleItem::new`]; the item is
/// immutable afterwards apart from the store-assigned [`id`](RuleItem::id).
///
/// # Examples
///
/// ```
/// use u_cba::data::Dataset;
/// use u_cba::rule::{CondSet, RuleItem};
///
/// let data = Dataset::new(vec![vec![1, 1, 1], vec![1, 1, 0], vec![2, 1, 1]]).unwrap();
/// let cond: CondSet = [(0, 1)].into_iter().collect();
/// let item = RuleItem::new(cond, 1, &data);
/// assert_eq!(item.cond_sup_count(), 2);
/// assert_eq!(item.rule_sup_count(), 1);
/// assert!((item.confidence() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleItem {
    cond_set: CondSet,
    class_label: Value,
    cond_sup_count: usize,
    rule_sup_count: usize,
    support: f64,
    confidence: f64,
    pub(crate) id: usize,
}

impl RuleItem {
    /// Builds a rule item and counts its support over `dataset`.
    pub fn new(cond_set: CondSet, class_label: Value, dataset: &Dataset) -> Self {
        let mut cond_sup_count = 0;
        let mut rule_sup_count = 0;
        for row in dataset.rows() {
            if cond_set.covers(row) {
                cond_sup_count += 1;
                if row[row.len() - 1] == class_label {
                    rule_sup_count += 1;
                }
            }
        }
        let support = rule_sup_count as f64 / dataset.len() as f64;
        let confidence = if cond_sup_count > 0 {
            rule_sup_count as f64 / cond_sup_count as f64
        } else {
            0.0
        };
        Self {
            cond_set,
            class_label,
            cond_sup_count,
            rule_sup_count,
            support,
            confidence,
            id: 0,
        }
    }

    pub fn cond_set(&self) -> &CondSet {
        &self.cond_set
    }

    pub fn class_label(&self) -> Value {
        self.class_label
    }

    /// Rows matching every condition.
    pub fn cond_sup_count(&self) -> usize {
        self.cond_sup_count
    }

    /// Rows matching every condition and carrying the class label.
    pub fn rule_sup_count(&self) -> usize {
        self.rule_sup_count
    }

    pub fn support(&self) -> f64 {
        self.support
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Generation index assigned by the rule store; the last precedence
    /// tie-break.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Rows of the source dataset this rule matches with the wrong label.
    pub fn training_errors(&self) -> usize {
        self.cond_sup_count - self.rule_sup_count
    }

    /// Tests a labelled row (label in the last slot).
    pub fn matches(&self, row: &[Value]) -> MatchOutcome {
        let Some((&label, attributes)) = row.split_last() else {
            return MatchOutcome::NoMatch;
        };
        if !self.cond_set.covers(attributes) {
            MatchOutcome::NoMatch
        } else if label == self.class_label {
            MatchOutcome::Correct
        } else {
            MatchOutcome::Wrong
        }
    }

    /// Tests the condition set only, ignoring any label.
    pub fn covers(&self, attributes: &[Value]) -> bool {
        self.cond_set.covers(attributes)
    }
}

impl fmt::Display for RuleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> (class, {})", self.cond_set, self.class_label)
    }
}
