//! Cleaned tabular input.
//!
//! A [`Dataset`] is a validated list of rows of discrete [`Value`]s. The
//! last slot of every row is the class label; all other slots are
//! attribute values that have already been discretized and re-coded by
//! an upstream preprocessing step.

mod dataset;

pub use dataset::{Dataset, Value};
pub(crate) use dataset::{class_distribution, default_errors, majority};
