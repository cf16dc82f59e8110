//! Classifier construction (CBA-CB).
//!
//! Turns a rule store into an ordered rule list with a default class.
//! Two builders are provided:
//!
//! - **M1** ([`M1Builder`]): greedy covering. Each rule in precedence
//!   order claims every remaining row it covers, provided it classifies
//!   at least one of them correctly.
//! - **M2** ([`M2Builder`]): finds for each row its strongest correct and
//!   strongest wrong rule, resolves the conflicts between them, then
//!   emits candidates in precedence order.
//!
//! Both record after every appended rule the total error of stopping
//! there, then keep the prefix with the first minimal error.
//!
//! Builders implement [`CoverBuilder`], so callers can plug in their own.
//!
//! # References
//!
//! - Liu, Hsu & Ma (1998), "Integrating Classification and Association Rule Mining"

mod m1;
mod m2;
mod model;

pub use m1::M1Builder;
pub use m2::M2Builder;
pub use model::{Classifier, CoverResult, CoverStep};

use crate::data::Dataset;
use crate::store::RuleStore;

/// Builds a classifier from a rule store.
///
/// # Examples
///
/// ```
/// use u_cba::classifier::{CoverBuilder, M1Builder};
/// use u_cba::data::Dataset;
/// use u_cba::generator::generate;
///
/// let data = Dataset::new(vec![vec![1, 1], vec![1, 1], vec![2, 0]]).unwrap();
/// let store = generate(&data, 0.1, 0.5).unwrap();
/// let result = M1Builder.build(&store, &data);
///
/// assert_eq!(result.classifier.error_count(&data), 0);
/// ```
pub trait CoverBuilder {
    /// Returns the name of this builder.
    fn name(&self) -> &str;

    /// Builds the classifier and its construction trace.
    fn build(&self, store: &RuleStore, dataset: &Dataset) -> CoverResult;
}

/// Built-in classifier builders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildStrategy {
    /// Greedy covering.
    #[default]
    M1,
    /// Conflict-resolving cover.
    M2,
}

impl BuildStrategy {
    pub fn name(&self) -> &str {
        match self {
            Self::M1 => M1Builder.name(),
            Self::M2 => M2Builder.name(),
        }
    }

    /// Runs the selected builder.
    pub fn build(&self, store: &RuleStore, dataset: &Dataset) -> CoverResult {
        match self {
            Self::M1 => M1Builder.build(store, dataset),
            Self::M2 => M2Builder.build(store, dataset),
        }
    }
}

/// Builds a classifier with M1.
pub fn build_m1(store: &RuleStore, dataset: &Dataset) -> Classifier {
    M1Builder.build(store, dataset).classifier
}

/// Builds a classifier with M2.
pub fn build_m2(store: &RuleStore, dataset: &Dataset) -> Classifier {
    M2Builder.build(store, dataset).classifier
}
