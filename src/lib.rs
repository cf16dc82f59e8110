//! Classification based on association rules (CBA).
//!
//! Builds an ordered rule-list classifier from discretized tabular data in
//! three stages:
//!
//! - **Rule generation (CBA-RG)**: level-wise, Apriori-style mining of
//!   class association rules (CARs) that meet a minimum support and
//!   confidence.
//! - **Pruning**: optional pessimistic-error simplification of every CAR.
//! - **Classifier building (CBA-CB)**: the greedy M1 cover or the
//!   conflict-resolving M2 cover. Both keep the rule prefix with the
//!   lowest total training error and finish with a default class.
//!
//! A cross-validation runner ties the stages together for evaluation.
//!
//! # Examples
//!
//! ```
//! use u_cba::{build_m1, generate, Dataset};
//!
//! let data = Dataset::new(vec![
//!     vec![1, 1, 1],
//!     vec![1, 2, 1],
//!     vec![2, 2, 0],
//!     vec![2, 3, 0],
//! ])
//! .unwrap();
//!
//! let store = generate(&data, 0.2, 0.6).unwrap();
//! let classifier = build_m1(&store, &data);
//! assert_eq!(classifier.predict(&[1, 3]), 1);
//! assert_eq!(classifier.predict(&[2, 1]), 0);
//! ```
//!
//! # Architecture
//!
//! Input is expected to be discretized and re-coded upstream: every
//! attribute value and class label is a small unsigned integer, and the
//! label is the last value of each row. All algorithms are deterministic
//! and single-threaded; the `parallel` feature only spreads candidate
//! counting over rayon. The `serde` feature derives serialization for the
//! data, rule, store, classifier and configuration types.

pub mod classifier;
pub mod data;
pub mod error;
pub mod generator;
pub mod rule;
pub mod store;
pub mod validation;

#[cfg(test)]
mod fixtures;

pub use classifier::{build_m1, build_m2, BuildStrategy, Classifier};
pub use data::{Dataset, Value};
pub use error::CbaError;
pub use generator::{generate, GeneratorConfig, RuleGenerator};
pub use rule::{CondSet, RuleItem};
pub use store::{prune, RuleStore};
