//! Class association rules.
//!
//! - [`RuleItem`]: condition set, class label and the support/confidence
//!   statistics measured on a dataset.
//! - [`MatchOutcome`]: the three-valued result of testing a labelled row.
//!   A rule that does not apply is different from a rule that applies
//!   with the wrong label, and the covering algorithms rely on it.
//! - [`cmp_precedence`]: the total order every sort and comparison uses.
//!
//! # References
//!
//! Liu, Hsu & Ma (1998), "Integrating Classification and Association Rule Mining"

mod item;
mod precedence;

pub use item::{CondSet, MatchOutcome, RuleItem};
pub use precedence::{cmp_precedence, cmp_precedence_opt, precedes, sort_by_precedence};
