//! CBA-CB M1: greedy covering.
//!
//! # Algorithm
//!
//! 1. Sort the rules by precedence.
//! 2. For each rule, collect the still-unclaimed rows its conditions
//!    cover. If at least one of them carries the rule's label:
//!    a. claim all collected rows (right or wrong, the rule decides them),
//!    b. append the rule and pick the majority label of the unclaimed
//!       rows as the default class,
//!    c. record the number of unclaimed rows plus the errors the default
//!       class makes on them.
//! 3. Keep the prefix ending at the first minimal recorded error.

use log::{debug, info};

use super::model::{CoverResult, CoverStep};
use super::CoverBuilder;
use crate::data::{class_distribution, default_errors, majority, Dataset};
use crate::rule::{sort_by_precedence, MatchOutcome};
use crate::store::RuleStore;

/// Greedy covering classifier builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct M1Builder;

impl CoverBuilder for M1Builder {
    fn name(&self) -> &str {
        "M1"
    }

    fn build(&self, store: &RuleStore, dataset: &Dataset) -> CoverResult {
        let mut rules = store.rules().to_vec();
        sort_by_precedence(&mut rules);

        // Working copy: indices of rows no appended rule has claimed yet.
        let mut remaining: Vec<usize> = (0..dataset.len()).collect();
        let mut claimed_by = vec![None; dataset.len()];
        let mut steps = Vec::new();

        for rule in rules {
            let mut covered = Vec::new();
            let mut correct = false;
            for &i in &remaining {
                match rule.matches(dataset.row(i)) {
                    MatchOutcome::NoMatch => {}
                    MatchOutcome::Correct => {
                        covered.push(i);
                        correct = true;
                    }
                    MatchOutcome::Wrong => covered.push(i),
                }
            }
            if !correct {
                continue;
            }

            let step = steps.len();
            for &i in &covered {
                claimed_by[i] = Some(step);
            }
            remaining.retain(|&i| claimed_by[i].is_none());

            let distribution = class_distribution(remaining.iter().map(|&i| dataset.label(i)));
            let default_class = majority(&distribution);
            // Empty remainder: `default_errors` is `usize::MAX`.
            let total_errors =
                remaining.len().saturating_add(default_errors(&distribution, default_class));
            debug!(
                "M1 step {step}: {rule} claims {} row(s), default {:?}, total errors {}",
                covered.len(),
                default_class,
                total_errors
            );
            steps.push(CoverStep {
                rule,
                default_class,
                total_errors,
            });
        }

        let result = CoverResult::truncate(steps, claimed_by, dataset);
        info!(
            "M1 kept {} of {} appended rule(s) from {} CAR(s)",
            result.classifier.len(),
            result.steps.len(),
            store.len()
        );
        result
    }
}
