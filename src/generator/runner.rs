//! Level-wise CAR mining.
//!
//! # Algorithm
//!
//! 1. Seed: one candidate per (attribute, observed value, class label);
//!    those meeting `min_support` become the frequent set.
//! 2. Admit every frequent candidate that also meets `min_confidence`.
//! 3. While the frequent set is non-empty, at most `max_rules` rules are
//!    admitted, and the last level added at least
//!    `min_new_rules_per_level` rules:
//!    a. Join pairs of frequent items with the same label, distinct
//!       condition sets and agreeing shared attributes (capped at
//!       `max_candidates_per_level` distinct candidates).
//!    b. Count candidate statistics over the full dataset.
//!    c. Frequent candidates form the next frequent set and are admitted.

use std::collections::HashSet;

use log::{debug, info};

use super::config::GeneratorConfig;
use crate::data::{Dataset, Value};
use crate::error::CbaError;
use crate::rule::{CondSet, RuleItem};
use crate::store::RuleStore;

/// Why the level-wise loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// No frequent items were left to join.
    Exhausted,
    /// More than `max_rules` rules were admitted.
    RuleLimit,
    /// The last level added fewer than `min_new_rules_per_level` rules.
    Stagnated,
}

/// Bookkeeping for one level of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelStats {
    /// 1 for the seed pass.
    pub level: usize,
    /// Distinct candidates evaluated.
    pub candidates: usize,
    /// Candidates meeting the support threshold.
    pub frequent: usize,
    /// Growth of the store during this level.
    pub new_rules: usize,
    /// Store size after this level.
    pub total_rules: usize,
}

/// Result of a rule generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The admitted CARs.
    pub store: RuleStore,

    /// Per-level statistics, seed pass first.
    pub levels: Vec<LevelStats>,

    /// Which bound ended the search.
    pub stop_reason: StopReason,
}

/// Executes level-wise CAR mining.
pub struct RuleGenerator;

impl RuleGenerator {
    /// Mines the CAR set of `dataset`.
    ///
    /// # Errors
    ///
    /// [`CbaError::InvalidConfig`] when `config` fails validation.
    pub fn run(dataset: &Dataset, config: &GeneratorConfig) -> Result<GenerationResult, CbaError> {
        config.validate().map_err(CbaError::InvalidConfig)?;

        let mut store = RuleStore::new();
        let mut levels = Vec::new();

        let seeds = seed_candidates(dataset);
        let seed_count = seeds.len();
        let mut frequent = frequent_items(evaluate(seeds, dataset, config.parallel), config);
        admit_all(&mut store, &frequent, config);
        levels.push(LevelStats {
            level: 1,
            candidates: seed_count,
            frequent: frequent.len(),
            new_rules: store.len(),
            total_rules: store.len(),
        });
        debug!(
            "level 1: {} candidate(s), {} frequent, {} rule(s)",
            seed_count,
            frequent.len(),
            store.len()
        );

        let mut last_total = 0usize;
        let stop_reason = loop {
            let total = store.len();
            if frequent.is_empty() {
                break StopReason::Exhausted;
            }
            if total > config.max_rules {
                break StopReason::RuleLimit;
            }
            if total.saturating_sub(last_total) < config.min_new_rules_per_level {
                break StopReason::Stagnated;
            }

            let keys = candidate_keys(&frequent, config.max_candidates_per_level);
            let candidate_count = keys.len();
            frequent = frequent_items(evaluate(keys, dataset, config.parallel), config);
            admit_all(&mut store, &frequent, config);

            last_total = total;
            let stats = LevelStats {
                level: levels.len() + 1,
                candidates: candidate_count,
                frequent: frequent.len(),
                new_rules: store.len() - total,
                total_rules: store.len(),
            };
            debug!(
                "level {}: {} candidate(s), {} frequent, {} new rule(s)",
                stats.level, stats.candidates, stats.frequent, stats.new_rules
            );
            levels.push(stats);
        };

        info!(
            "generated {} CAR(s) over {} level(s) ({:?})",
            store.len(),
            levels.len(),
            stop_reason
        );

        Ok(GenerationResult {
            store,
            levels,
            stop_reason,
        })
    }
}

/// Mines CARs with the default resource bounds.
///
/// # Examples
///
/// ```
/// use u_cba::data::Dataset;
/// use u_cba::generator::generate;
///
/// let data = Dataset::new(vec![vec![1, 0, 1], vec![1, 1, 1], vec![2, 1, 0]]).unwrap();
/// let store = generate(&data, 0.3, 0.8).unwrap();
/// assert!(store.iter().all(|r| r.confidence() >= 0.8));
/// ```
pub fn generate(dataset: &Dataset, min_support: f64, min_confidence: f64) -> Result<RuleStore, CbaError> {
    RuleGenerator::run(dataset, &GeneratorConfig::new(min_support, min_confidence))
        .map(|result| result.store)
}

/// One `(condition set, label)` per attribute, observed value and label,
/// in ascending order of each.
fn seed_candidates(dataset: &Dataset) -> Vec<(CondSet, Value)> {
    let labels = dataset.labels();
    let mut seeds = Vec::new();
    for column in 0..dataset.attribute_count() {
        for value in dataset.column_values(column) {
            for &label in &labels {
                let mut cond_set = CondSet::new();
                cond_set.insert(column, value);
                seeds.push((cond_set, label));
            }
        }
    }
    seeds
}

/// Joins every ordered pair of frequent items into distinct candidates,
/// stopping once `cap` candidates exist.
fn candidate_keys(frequent: &[RuleItem], cap: usize) -> Vec<(CondSet, Value)> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for a in frequent {
        for b in frequent {
            if a.class_label() != b.class_label() {
                continue;
            }
            let Some(cond_set) = a.cond_set().join(b.cond_set()) else {
                continue;
            };
            let key = (cond_set, a.class_label());
            if seen.insert(key.clone()) {
                keys.push(key);
                if keys.len() >= cap {
                    return keys;
                }
            }
        }
    }
    keys
}

#[cfg(feature = "parallel")]
fn evaluate(keys: Vec<(CondSet, Value)>, dataset: &Dataset, parallel: bool) -> Vec<RuleItem> {
    use rayon::prelude::*;

    if parallel {
        keys.into_par_iter()
            .map(|(cond_set, label)| RuleItem::new(cond_set, label, dataset))
            .collect()
    } else {
        evaluate_sequential(keys, dataset)
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate(keys: Vec<(CondSet, Value)>, dataset: &Dataset, _parallel: bool) -> Vec<RuleItem> {
    evaluate_sequential(keys, dataset)
}

fn evaluate_sequential(keys: Vec<(CondSet, Value)>, dataset: &Dataset) -> Vec<RuleItem> {
    keys.into_iter()
        .map(|(cond_set, label)| RuleItem::new(cond_set, label, dataset))
        .collect()
}

fn frequent_items(items: Vec<RuleItem>, config: &GeneratorConfig) -> Vec<RuleItem> {
    items
        .into_iter()
        .filter(|item| item.support() >= config.min_support)
        .collect()
}

fn admit_all(store: &mut RuleStore, frequent: &[RuleItem], config: &GeneratorConfig) {
    for item in frequent {
        store.admit(item.clone(), config.min_support, config.min_confidence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;
    use proptest::prelude::*;

    fn cond(pairs: &[(usize, Value)]) -> CondSet {
        pairs.iter().copied().collect()
    }

    fn summary(store: &RuleStore) -> Vec<(CondSet, Value)> {
        store
            .iter()
            .map(|r| (r.cond_set().clone(), r.class_label()))
            .collect()
    }

    #[test]
    fn test_default_bounds_stop_after_seed_level() {
        let data = sample();
        let result = RuleGenerator::run(&data, &GeneratorConfig::new(0.15, 0.6)).unwrap();

        assert_eq!(result.stop_reason, StopReason::Stagnated);
        assert_eq!(result.levels.len(), 1);
        assert_eq!(result.levels[0].candidates, 12);
        assert_eq!(result.levels[0].frequent, 7);
        assert_eq!(
            summary(&result.store),
            vec![
                (cond(&[(0, 1)]), 1),
                (cond(&[(0, 2)]), 0),
                (cond(&[(1, 1)]), 1),
                (cond(&[(1, 2)]), 1),
                (cond(&[(1, 3)]), 0),
            ]
        );
        let ids: Vec<usize> = result.store.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_second_level_without_stagnation_bound() {
        let data = sample();
        let config = GeneratorConfig::new(0.15, 0.6).with_min_new_rules_per_level(0);
        let result = RuleGenerator::run(&data, &config).unwrap();

        assert_eq!(result.stop_reason, StopReason::Exhausted);
        assert_eq!(result.levels.len(), 3);
        assert_eq!(result.levels[1].candidates, 6);
        assert_eq!(result.levels[1].new_rules, 3);
        assert_eq!(result.levels[2].candidates, 0);
        assert_eq!(result.store.len(), 8);

        let joined = result.store.get(&cond(&[(0, 1), (1, 1)])).unwrap();
        assert_eq!(joined.class_label(), 1);
        assert_eq!(joined.cond_sup_count(), 3);
        assert_eq!(joined.rule_sup_count(), 2);
        assert!((joined.support() - 0.2).abs() < 1e-12);
        assert!((joined.confidence() - 2.0 / 3.0).abs() < 1e-9);

        assert!(result.store.get(&cond(&[(0, 2), (1, 3)])).is_some());
        assert_eq!(
            result.store.get(&cond(&[(0, 2), (1, 2)])).unwrap().class_label(),
            1
        );
    }

    #[test]
    fn test_candidate_cap() {
        let data = sample();
        let config = GeneratorConfig::new(0.15, 0.6)
            .with_min_new_rules_per_level(0)
            .with_max_candidates_per_level(2);
        let result = RuleGenerator::run(&data, &config).unwrap();

        assert_eq!(result.levels[1].candidates, 2);
        assert_eq!(result.store.len(), 6);
    }

    #[test]
    fn test_rule_limit() {
        let data = sample();
        let config = GeneratorConfig::new(0.15, 0.6)
            .with_min_new_rules_per_level(0)
            .with_max_rules(4);
        let result = RuleGenerator::run(&data, &config).unwrap();

        assert_eq!(result.stop_reason, StopReason::RuleLimit);
        assert_eq!(result.store.len(), 5);
    }

    #[test]
    fn test_invalid_config() {
        let data = sample();
        let err = RuleGenerator::run(&data, &GeneratorConfig::new(0.0, 0.5)).unwrap_err();
        assert!(matches!(err, CbaError::InvalidConfig(_)));
        assert!(generate(&data, 0.1, 2.0).is_err());
    }

    #[test]
    fn test_parallel_flag_gives_same_rules() {
        let data = sample();
        let base = GeneratorConfig::new(0.1, 0.5).with_min_new_rules_per_level(0);
        let a = RuleGenerator::run(&data, &base).unwrap();
        let b = RuleGenerator::run(&data, &base.clone().with_parallel(true)).unwrap();
        assert_eq!(a.store.rules(), b.store.rules());
    }

    proptest! {
        #[test]
        fn prop_admitted_rules_respect_thresholds(
            rows in prop::collection::vec(prop::collection::vec(0u32..3, 4), 1..30),
            min_support in 0.05f64..0.5,
            min_confidence in 0.0f64..1.0,
        ) {
            let data = Dataset::new(rows).unwrap();
            let config = GeneratorConfig::new(min_support, min_confidence)
                .with_min_new_rules_per_level(0);
            let first = RuleGenerator::run(&data, &config).unwrap();
            let second = RuleGenerator::run(&data, &config).unwrap();

            let mut seen = HashSet::new();
            for rule in first.store.iter() {
                prop_assert!(rule.support() >= min_support);
                prop_assert!(rule.confidence() >= min_confidence);
                prop_assert!(!rule.cond_set().is_empty());
                prop_assert!(seen.insert(rule.cond_set().clone()));
            }
            prop_assert_eq!(first.store.rules(), second.store.rules());
        }
    }
}
