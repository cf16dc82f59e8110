//! The ordered-rule classifier and the cover trace both builders emit.

use std::fmt;

use crate::data::{Dataset, Value};
use crate::rule::RuleItem;

/// An ordered rule list with a fallback label.
///
/// The first rule whose condition set covers a row decides the label,
/// whether or not that label turns out to be right. Rows no rule covers
/// get [`default_class`](Classifier::default_class).
///
/// # Examples
///
/// ```
/// use u_cba::classifier::Classifier;
/// use u_cba::data::Dataset;
/// use u_cba::rule::RuleItem;
///
/// let data = Dataset::new(vec![vec![1, 1], vec![2, 0]]).unwrap();
/// let rule = RuleItem::new([(0, 1)].into_iter().collect(), 1, &data);
/// let classifier = Classifier::new(vec![rule], 0);
///
/// assert_eq!(classifier.predict(&[1]), 1);
/// assert_eq!(classifier.predict(&[7]), 0);
/// assert_eq!(classifier.error_count(&data), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classifier {
    rules: Vec<RuleItem>,
    default_class: Value,
}

impl Classifier {
    pub fn new(rules: Vec<RuleItem>, default_class: Value) -> Self {
        Self {
            rules,
            default_class,
        }
    }

    /// Selected rules in application order.
    pub fn rules(&self) -> &[RuleItem] {
        &self.rules
    }

    pub fn default_class(&self) -> Value {
        self.default_class
    }

    /// Number of selected rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Predicts the label of `row`.
    ///
    /// `row` may hold only the attribute values or a full labelled row;
    /// rules never look at the label slot.
    pub fn predict(&self, row: &[Value]) -> Value {
        self.rules
            .iter()
            .find(|rule| rule.covers(row))
            .map_or(self.default_class, |rule| rule.class_label())
    }

    /// Rows of `dataset` whose predicted label differs from their own.
    pub fn error_count(&self, dataset: &Dataset) -> usize {
        (0..dataset.len())
            .filter(|&i| {
                let row = dataset.row(i);
                self.predict(&row[..row.len() - 1]) != dataset.label(i)
            })
            .count()
    }

    /// `error_count / N`.
    pub fn error_rate(&self, dataset: &Dataset) -> f64 {
        self.error_count(dataset) as f64 / dataset.len() as f64
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        write!(f, "default_class: {}", self.default_class)
    }
}

/// One rule appended during construction, before truncation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverStep {
    /// The appended rule.
    pub rule: RuleItem,

    /// Majority label of the rows still unclaimed after this step;
    /// `None` when no rows remain.
    pub default_class: Option<Value>,

    /// Recorded error of stopping after this step; truncation keeps the
    /// first minimum. M1 counts the unclaimed rows, M2 the accumulated
    /// rule errors, and both add the errors `default_class` makes on the
    /// unclaimed rows. `usize::MAX` when no rows remain.
    pub total_errors: usize,
}

/// Result of a classifier build.
#[derive(Debug, Clone)]
pub struct CoverResult {
    /// The truncated classifier.
    pub classifier: Classifier,

    /// Every appended rule with its recorded error, in order.
    pub steps: Vec<CoverStep>,

    /// Index of the last step kept; `None` when no rule was appended.
    pub chosen: Option<usize>,

    /// For each training row, the step that claimed it (before truncation).
    pub claimed_by: Vec<Option<usize>>,
}

impl CoverResult {
    /// Truncates `steps` at the first minimum of `total_errors`.
    ///
    /// Falls back to the training-set majority label when the chosen step
    /// has no default class or when there are no steps at all.
    pub(crate) fn truncate(steps: Vec<CoverStep>, claimed_by: Vec<Option<usize>>, dataset: &Dataset) -> Self {
        let chosen = steps
            .iter()
            .enumerate()
            .min_by_key(|(_, step)| step.total_errors)
            .map(|(i, _)| i);

        let classifier = match chosen {
            Some(i) => Classifier::new(
                steps[..=i].iter().map(|s| s.rule.clone()).collect(),
                steps[i]
                    .default_class
                    .unwrap_or_else(|| dataset.majority_class()),
            ),
            None => Classifier::new(Vec::new(), dataset.majority_class()),
        };

        Self {
            classifier,
            steps,
            chosen,
            claimed_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;

    fn item(pairs: &[(usize, Value)], label: Value, data: &Dataset) -> RuleItem {
        RuleItem::new(pairs.iter().copied().collect(), label, data)
    }

    fn step(rule: RuleItem, default_class: Option<Value>, total_errors: usize) -> CoverStep {
        CoverStep {
            rule,
            default_class,
            total_errors,
        }
    }

    #[test]
    fn test_first_covering_rule_decides() {
        let data = sample();
        let classifier = Classifier::new(
            vec![item(&[(1, 3)], 0, &data), item(&[(0, 2)], 1, &data)],
            1,
        );
        // Row (2, 3) is covered by both; the first wins.
        assert_eq!(classifier.predict(&[2, 3]), 0);
        assert_eq!(classifier.predict(&[2, 2]), 1);
        assert_eq!(classifier.predict(&[3, 1]), 1);
        // A full labelled row predicts the same.
        assert_eq!(classifier.predict(&[2, 3, 1]), 0);
    }

    #[test]
    fn test_empty_classifier_predicts_default() {
        let data = sample();
        let classifier = Classifier::new(Vec::new(), 0);
        assert!(classifier.is_empty());
        assert_eq!(classifier.predict(&[1, 1]), 0);
        assert_eq!(classifier.error_count(&data), 5);
        assert!((classifier.error_rate(&data) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_truncate_first_minimum() {
        let data = sample();
        let steps = vec![
            step(item(&[(1, 3)], 0, &data), Some(1), 4),
            step(item(&[(0, 1)], 1, &data), Some(0), 2),
            step(item(&[(0, 2)], 0, &data), Some(0), 2),
            step(item(&[(1, 2)], 1, &data), None, usize::MAX),
        ];
        let result = CoverResult::truncate(steps, vec![None; data.len()], &data);
        assert_eq!(result.chosen, Some(1));
        assert_eq!(result.classifier.len(), 2);
        assert_eq!(result.classifier.default_class(), 0);
        assert_eq!(result.steps.len(), 4);
    }

    #[test]
    fn test_truncate_without_steps_uses_majority() {
        let data = sample();
        let result = CoverResult::truncate(Vec::new(), vec![None; data.len()], &data);
        assert_eq!(result.chosen, None);
        assert!(result.classifier.is_empty());
        assert_eq!(result.classifier.default_class(), data.majority_class());
    }

    #[test]
    fn test_truncate_at_empty_remainder_uses_majority() {
        let data = sample();
        let steps = vec![step(item(&[(0, 1)], 1, &data), None, usize::MAX)];
        let result = CoverResult::truncate(steps, vec![None; data.len()], &data);
        assert_eq!(result.chosen, Some(0));
        assert_eq!(result.classifier.default_class(), 0);
    }

    #[test]
    fn test_display() {
        let data = sample();
        let classifier = Classifier::new(vec![item(&[(1, 3)], 0, &data)], 1);
        assert_eq!(
            classifier.to_string(),
            "{(1, 3)} -> (class, 0)\ndefault_class: 1"
        );
    }
}
