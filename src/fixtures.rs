//! Shared test data.

use crate::data::Dataset;

/// The ten-row, two-attribute walkthrough dataset used across the tests.
pub(crate) fn sample() -> Dataset {
    Dataset::new(vec![
        vec![1, 1, 1],
        vec![1, 1, 1],
        vec![1, 2, 1],
        vec![2, 2, 1],
        vec![2, 2, 1],
        vec![2, 2, 0],
        vec![2, 3, 0],
        vec![2, 3, 0],
        vec![1, 1, 0],
        vec![3, 2, 0],
    ])
    .expect("fixture is well formed")
}
