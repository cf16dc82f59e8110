//! Validated dataset and class-distribution helpers.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::CbaError;

/// A discrete attribute value or class label.
pub type Value = u32;

/// An ordered collection of rows sharing one column layout.
///
/// Construction validates the layout, so every algorithm downstream can
/// index rows without bounds surprises.
///
/// # Examples
///
/// ```
/// use u_cba::data::Dataset;
///
/// let data = Dataset::new(vec![vec![1, 1, 1], vec![2, 1, 0]]).unwrap();
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.attribute_count(), 2);
/// assert_eq!(data.label(1), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Validates `rows` and wraps them.
    ///
    /// # Errors
    ///
    /// - [`CbaError::EmptyDataset`] when there are no rows.
    /// - [`CbaError::MissingAttributes`] when a row has fewer than two columns.
    /// - [`CbaError::InconsistentRow`] when row lengths differ.
    pub fn new(rows: Vec<Vec<Value>>) -> Result<Self, CbaError> {
        let expected = match rows.first() {
            Some(first) => first.len(),
            None => return Err(CbaError::EmptyDataset),
        };
        for (row, values) in rows.iter().enumerate() {
            if values.len() < 2 {
                return Err(CbaError::MissingAttributes {
                    row,
                    found: values.len(),
                });
            }
            if values.len() != expected {
                return Err(CbaError::InconsistentRow {
                    row,
                    expected,
                    found: values.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Number of rows (`N`).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false` for a validated dataset; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of attribute columns (row length minus the label).
    pub fn attribute_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len() - 1)
    }

    /// All rows, label last.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Row `i`, label last.
    pub fn row(&self, i: usize) -> &[Value] {
        &self.rows[i]
    }

    /// Class label of row `i`.
    pub fn label(&self, i: usize) -> Value {
        label_of(&self.rows[i])
    }

    /// Distinct class labels in ascending order.
    pub fn labels(&self) -> BTreeSet<Value> {
        self.rows.iter().map(|r| label_of(r)).collect()
    }

    /// Distinct values observed in attribute `column`, ascending.
    pub fn column_values(&self, column: usize) -> BTreeSet<Value> {
        self.rows.iter().map(|r| r[column]).collect()
    }

    /// Label counts over the whole dataset.
    pub fn class_distribution(&self) -> BTreeMap<Value, usize> {
        class_distribution(self.rows.iter().map(|r| label_of(r)))
    }

    /// Majority label over the whole dataset (ties go to the smallest label).
    pub fn majority_class(&self) -> Value {
        // A validated dataset always has at least one label.
        majority(&self.class_distribution()).unwrap_or_default()
    }

    /// Builds a new dataset from the rows at `indices`, in that order.
    ///
    /// Returns `None` when `indices` is empty.
    pub fn subset(&self, indices: &[usize]) -> Option<Self> {
        if indices.is_empty() {
            return None;
        }
        Some(Self {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        })
    }
}

/// Class label of a row (its last value).
pub(crate) fn label_of(row: &[Value]) -> Value {
    row[row.len() - 1]
}

/// Counts labels.
pub(crate) fn class_distribution<I>(labels: I) -> BTreeMap<Value, usize>
where
    I: IntoIterator<Item = Value>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Majority label of a distribution; ties go to the smallest label.
pub(crate) fn majority(distribution: &BTreeMap<Value, usize>) -> Option<Value> {
    let mut best: Option<(Value, usize)> = None;
    for (&label, &count) in distribution {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// Errors made by predicting `default` for every row in `distribution`.
///
/// An empty distribution yields `usize::MAX` so that an empty remainder
/// never looks attractive to truncation.
pub(crate) fn default_errors(distribution: &BTreeMap<Value, usize>, default: Option<Value>) -> usize {
    match default {
        Some(label) if !distribution.is_empty() => distribution
            .iter()
            .filter(|(&l, _)| l != label)
            .map(|(_, &c)| c)
            .sum(),
        _ => usize::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;

    #[test]
    fn test_shape() {
        let data = sample();
        assert_eq!(data.len(), 10);
        assert_eq!(data.attribute_count(), 2);
        assert_eq!(data.labels().into_iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(
            data.column_values(0).into_iter().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Dataset::new(vec![]), Err(CbaError::EmptyDataset));
    }

    #[test]
    fn test_label_only_row_rejected() {
        assert_eq!(
            Dataset::new(vec![vec![1]]),
            Err(CbaError::MissingAttributes { row: 0, found: 1 })
        );
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert_eq!(
            Dataset::new(vec![vec![1, 2, 0], vec![1, 0]]),
            Err(CbaError::InconsistentRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_majority_tie_prefers_smallest_label() {
        // Five rows of each class.
        assert_eq!(sample().majority_class(), 0);

        let dist = class_distribution([4, 2, 2, 4]);
        assert_eq!(majority(&dist), Some(2));
        assert_eq!(majority(&BTreeMap::new()), None);
    }

    #[test]
    fn test_default_errors() {
        let dist = class_distribution([1, 1, 0, 2]);
        assert_eq!(default_errors(&dist, Some(1)), 2);
        assert_eq!(default_errors(&BTreeMap::new(), None), usize::MAX);
    }

    #[test]
    fn test_subset() {
        let data = sample();
        let sub = data.subset(&[9, 0]).unwrap();
        assert_eq!(sub.rows(), &[vec![3, 2, 0], vec![1, 1, 1]]);
        assert!(data.subset(&[]).is_none());
    }
}
