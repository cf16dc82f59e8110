//! CAR storage and pruning.
//!
//! [`RuleStore`] keeps the admitted class association rules, one per
//! distinct condition set. [`prune`] derives a smaller store in which
//! every rule has been simplified to its lowest-error condition subset.

mod prune;
mod set;

pub use prune::{prune, prune_rule};
pub use set::{Insertion, RuleStore};
