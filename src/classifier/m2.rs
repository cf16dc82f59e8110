//! CBA-CB M2: conflict-resolving cover.
//!
//! # Algorithm
//!
//! Rules are sorted by precedence and placed in an arena; arena index
//! order is precedence order.
//!
//! 1. **Scan.** For each row find `cRule`, the strongest rule that covers
//!    it with the right label, and `wRule`, the strongest rule that covers
//!    it with a different label. If `cRule` precedes `wRule` (an absent
//!    rule is weakest), `cRule` is marked as a definite classifier rule.
//!    Otherwise the row is recorded as a conflict.
//! 2. **Resolve.** For a conflict whose `wRule` is marked, the row moves
//!    from `cRule` to `wRule`. Otherwise every used rule that precedes
//!    `cRule` and misclassifies the row takes on a replacement
//!    obligation and joins the candidate set.
//! 3. **Emit.** Candidates are visited in precedence order. A candidate
//!    that still covers cases of its own class settles its obligations,
//!    claims the rows it classifies correctly, and is appended with the
//!    resulting rule errors, default class and default errors.
//!
//! The prefix with the first minimal recorded error is kept.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};

use super::model::{CoverResult, CoverStep};
use super::CoverBuilder;
use crate::data::{class_distribution, default_errors, majority, Dataset, Value};
use crate::rule::{precedes, sort_by_precedence, MatchOutcome, RuleItem};
use crate::store::RuleStore;

/// A pending reassignment: row `row` (labelled `label`) may have to be
/// taken away from rule `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Replacement {
    origin: Option<usize>,
    row: usize,
    label: Value,
}

/// Arena record wrapping a rule with its mutable coverage bookkeeping.
#[derive(Debug)]
struct ArenaRule {
    item: RuleItem,
    class_cases_covered: BTreeMap<Value, i64>,
    replace: BTreeSet<Replacement>,
}

impl ArenaRule {
    fn new(item: RuleItem) -> Self {
        Self {
            item,
            class_cases_covered: BTreeMap::new(),
            replace: BTreeSet::new(),
        }
    }

    fn covered(&self, label: Value) -> i64 {
        self.class_cases_covered.get(&label).copied().unwrap_or(0)
    }

    fn adjust(&mut self, label: Value, delta: i64) {
        *self.class_cases_covered.entry(label).or_insert(0) += delta;
    }
}

/// A row whose strongest correct rule (if any) does not precede its
/// strongest wrong rule.
#[derive(Debug, Clone, Copy)]
struct Conflict {
    row: usize,
    label: Value,
    c_rule: Option<usize>,
    w_rule: usize,
}

/// Conflict-resolving classifier builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct M2Builder;

impl CoverBuilder for M2Builder {
    fn name(&self) -> &str {
        "M2"
    }

    fn build(&self, store: &RuleStore, dataset: &Dataset) -> CoverResult {
        let mut items = store.rules().to_vec();
        sort_by_precedence(&mut items);
        let mut arena: Vec<ArenaRule> = items.into_iter().map(ArenaRule::new).collect();

        // Stage 1
        let mut q = BTreeSet::new();
        let mut u = BTreeSet::new();
        let mut marked = BTreeSet::new();
        let mut conflicts = Vec::new();

        for row in 0..dataset.len() {
            let values = dataset.row(row);
            let label = dataset.label(row);
            let attributes = &values[..values.len() - 1];

            let c_rule = arena
                .iter()
                .position(|r| r.item.matches(values) == MatchOutcome::Correct);
            let w_rule = arena
                .iter()
                .position(|r| r.item.class_label() != label && r.item.covers(attributes));

            if let Some(c) = c_rule {
                u.insert(c);
                arena[c].adjust(label, 1);
                if precedes(Some(&arena[c].item), w_rule.map(|w| &arena[w].item)) {
                    q.insert(c);
                    marked.insert(c);
                    continue;
                }
            }
            if let Some(w_rule) = w_rule {
                conflicts.push(Conflict {
                    row,
                    label,
                    c_rule,
                    w_rule,
                });
            }
        }
        debug!(
            "M2 stage 1: {} used, {} marked, {} conflict(s)",
            u.len(),
            marked.len(),
            conflicts.len()
        );

        // Stage 2
        for conflict in &conflicts {
            if marked.contains(&conflict.w_rule) {
                if let Some(c) = conflict.c_rule {
                    arena[c].adjust(conflict.label, -1);
                }
                arena[conflict.w_rule].adjust(conflict.label, 1);
                continue;
            }

            let values = dataset.row(conflict.row);
            let c_item = conflict.c_rule.map(|c| &arena[c].item);
            let w_set: Vec<usize> = u
                .iter()
                .copied()
                .filter(|&j| {
                    precedes(Some(&arena[j].item), c_item)
                        && arena[j].item.matches(values) == MatchOutcome::Wrong
                })
                .collect();
            for &j in &w_set {
                arena[j].replace.insert(Replacement {
                    origin: conflict.c_rule,
                    row: conflict.row,
                    label: conflict.label,
                });
                arena[j].adjust(conflict.label, 1);
            }
            q.extend(w_set);
        }
        debug!("M2 stage 2: {} candidate rule(s)", q.len());

        // Stage 3: `q` iterates in arena order, which is precedence order.
        let mut covered = vec![false; dataset.len()];
        let mut claimed_by = vec![None; dataset.len()];
        let mut rule_errors = 0usize;
        let mut steps = Vec::new();

        for r in q {
            let own = arena[r].item.class_label();
            if arena[r].covered(own) == 0 {
                continue;
            }

            let obligations = std::mem::take(&mut arena[r].replace);
            for obligation in &obligations {
                if covered[obligation.row] {
                    arena[r].adjust(obligation.label, -1);
                } else if let Some(origin) = obligation.origin {
                    arena[origin].adjust(obligation.label, -1);
                }
            }

            let step = steps.len();
            let mut wrong = 0usize;
            for row in 0..dataset.len() {
                if covered[row] {
                    continue;
                }
                match arena[r].item.matches(dataset.row(row)) {
                    MatchOutcome::Correct => {
                        covered[row] = true;
                        claimed_by[row] = Some(step);
                    }
                    MatchOutcome::Wrong => wrong += 1,
                    MatchOutcome::NoMatch => {}
                }
            }
            rule_errors += wrong;

            let distribution = class_distribution(
                (0..dataset.len())
                    .filter(|&row| !covered[row])
                    .map(|row| dataset.label(row)),
            );
            let default_class = majority(&distribution);
            let total_errors =
                rule_errors.saturating_add(default_errors(&distribution, default_class));
            debug!(
                "M2 step {step}: {}, default {:?}, total errors {}",
                arena[r].item, default_class, total_errors
            );
            steps.push(CoverStep {
                rule: arena[r].item.clone(),
                default_class,
                total_errors,
            });
        }

        let result = CoverResult::truncate(steps, claimed_by, dataset);
        info!(
            "M2 kept {} of {} appended rule(s) from {} CAR(s)",
            result.classifier.len(),
            result.steps.len(),
            store.len()
        );
        result
    }
}
