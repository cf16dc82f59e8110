//! k-fold cross-validation runner.
//!
//! # Algorithm
//!
//! 1. Shuffle the row indices with a seeded RNG.
//! 2. Cut them into `folds` contiguous blocks of `N / folds` rows; the
//!    last block also takes the remainder.
//! 3. For each block: mine CARs on the other blocks, optionally prune,
//!    build the classifier and measure its error rate on the block.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::config::CrossValidationConfig;
use crate::classifier::Classifier;
use crate::data::Dataset;
use crate::error::CbaError;
use crate::generator::RuleGenerator;

/// Outcome of one fold.
#[derive(Debug, Clone)]
pub struct FoldResult {
    /// Zero-based fold index.
    pub fold: usize,

    /// Rows used for training.
    pub train_rows: usize,

    /// Rows held out for testing.
    pub test_rows: usize,

    /// Misclassified fraction of the held-out rows.
    pub error_rate: f64,

    /// CARs mined on the training rows (after pruning, if enabled).
    pub car_count: usize,

    /// Rules in the built classifier.
    pub rule_count: usize,

    /// Wall-clock time spent mining (and pruning).
    pub generation_time: Duration,

    /// Wall-clock time spent building the classifier.
    pub build_time: Duration,

    /// The classifier trained for this fold.
    pub classifier: Classifier,
}

/// Aggregate outcome of a cross-validation run.
#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    /// Per-fold results, in fold order.
    pub folds: Vec<FoldResult>,

    /// Mean held-out error rate.
    pub mean_error_rate: f64,

    /// Mean number of CARs per fold.
    pub mean_car_count: f64,

    /// Mean classifier size per fold.
    pub mean_rule_count: f64,
}

/// Executes k-fold cross-validation of the CBA pipeline.
///
/// # Examples
///
/// ```
/// use u_cba::data::Dataset;
/// use u_cba::validation::{CrossValidationConfig, CrossValidator};
///
/// let rows = (0..20u32).map(|i| vec![i % 2, i % 3, i % 2]).collect();
/// let data = Dataset::new(rows).unwrap();
/// let config = CrossValidationConfig::default()
///     .with_folds(4)
///     .with_min_support(0.1)
///     .with_seed(42);
///
/// let result = CrossValidator::run(&data, &config).unwrap();
/// assert_eq!(result.folds.len(), 4);
/// assert_eq!(result.mean_error_rate, 0.0);
/// ```
pub struct CrossValidator;

impl CrossValidator {
    /// Runs cross-validation on `dataset`.
    ///
    /// # Errors
    ///
    /// - [`CbaError::InvalidConfig`] when `config` fails validation.
    /// - [`CbaError::InvalidFolds`] when `config.folds` exceeds the row count.
    pub fn run(
        dataset: &Dataset,
        config: &CrossValidationConfig,
    ) -> Result<CrossValidationResult, CbaError> {
        config.validate().map_err(CbaError::InvalidConfig)?;
        if config.folds > dataset.len() {
            return Err(CbaError::InvalidFolds {
                folds: config.folds,
                rows: dataset.len(),
            });
        }

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let mut order: Vec<usize> = (0..dataset.len()).collect();
        order.shuffle(&mut rng);

        let mut folds = Vec::with_capacity(config.folds);
        for (fold, range) in fold_ranges(dataset.len(), config.folds).into_iter().enumerate() {
            let test_idx = &order[range.clone()];
            let train_idx: Vec<usize> = order[..range.start]
                .iter()
                .chain(&order[range.end..])
                .copied()
                .collect();
            let train = dataset.subset(&train_idx).ok_or(CbaError::EmptyDataset)?;
            let test = dataset.subset(test_idx).ok_or(CbaError::EmptyDataset)?;

            let start = Instant::now();
            let mut store = RuleGenerator::run(&train, &config.generator)?.store;
            if config.prune {
                store = store.pruned(&train);
            }
            let generation_time = start.elapsed();

            let start = Instant::now();
            let classifier = config.strategy.build(&store, &train).classifier;
            let build_time = start.elapsed();

            let result = FoldResult {
                fold,
                train_rows: train.len(),
                test_rows: test.len(),
                error_rate: classifier.error_rate(&test),
                car_count: store.len(),
                rule_count: classifier.len(),
                generation_time,
                build_time,
                classifier,
            };
            debug!(
                "fold {}: error {:.4}, {} CAR(s), {} rule(s), mined in {:?}, built in {:?}",
                fold,
                result.error_rate,
                result.car_count,
                result.rule_count,
                result.generation_time,
                result.build_time
            );
            folds.push(result);
        }

        let n = folds.len() as f64;
        let mean_error_rate = folds.iter().map(|f| f.error_rate).sum::<f64>() / n;
        let mean_car_count = folds.iter().map(|f| f.car_count as f64).sum::<f64>() / n;
        let mean_rule_count = folds.iter().map(|f| f.rule_count as f64).sum::<f64>() / n;
        info!(
            "{}-fold {} cross-validation: mean error {:.4}, mean {:.1} CAR(s), mean {:.1} rule(s)",
            config.folds,
            config.strategy.name(),
            mean_error_rate,
            mean_car_count,
            mean_rule_count
        );

        Ok(CrossValidationResult {
            folds,
            mean_error_rate,
            mean_car_count,
            mean_rule_count,
        })
    }
}

fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Contiguous block boundaries; the last block absorbs `n % folds`.
fn fold_ranges(n: usize, folds: usize) -> Vec<std::ops::Range<usize>> {
    let size = n / folds;
    (0..folds)
        .map(|k| {
            let end = if k + 1 == folds { n } else { (k + 1) * size };
            k * size..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::BuildStrategy;
    use crate::fixtures::sample;

    #[test]
    fn test_fold_ranges_cover_all_rows() {
        let ranges = fold_ranges(10, 3);
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
        assert_eq!(fold_ranges(4, 4), vec![0..1, 1..2, 2..3, 3..4]);
    }

    #[test]
    fn test_fold_sizes() {
        let data = sample();
        let config = CrossValidationConfig::default()
            .with_folds(3)
            .with_min_support(0.15)
            .with_min_confidence(0.6)
            .with_seed(1);
        let result = CrossValidator::run(&data, &config).unwrap();

        let tests: Vec<usize> = result.folds.iter().map(|f| f.test_rows).collect();
        assert_eq!(tests, vec![3, 3, 4]);
        for fold in &result.folds {
            assert_eq!(fold.train_rows + fold.test_rows, data.len());
            assert!((0.0..=1.0).contains(&fold.error_rate));
            assert_eq!(fold.rule_count, fold.classifier.len());
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let data = sample();
        let config = CrossValidationConfig::default()
            .with_folds(5)
            .with_min_support(0.1)
            .with_strategy(BuildStrategy::M2)
            .with_prune(true)
            .with_seed(42);
        let a = CrossValidator::run(&data, &config).unwrap();
        let b = CrossValidator::run(&data, &config).unwrap();

        assert_eq!(a.mean_error_rate, b.mean_error_rate);
        for (x, y) in a.folds.iter().zip(&b.folds) {
            assert_eq!(x.classifier, y.classifier);
            assert_eq!(x.car_count, y.car_count);
        }
    }

    #[test]
    fn test_means_match_folds() {
        let data = sample();
        let config = CrossValidationConfig::default().with_folds(2).with_seed(3);
        let result = CrossValidator::run(&data, &config).unwrap();
        let mean = (result.folds[0].error_rate + result.folds[1].error_rate) / 2.0;
        assert!((result.mean_error_rate - mean).abs() < 1e-12);
        let cars = (result.folds[0].car_count + result.folds[1].car_count) as f64 / 2.0;
        assert!((result.mean_car_count - cars).abs() < 1e-12);
    }

    #[test]
    fn test_separable_data_has_no_error() {
        let rows = (0..30u32).map(|i| vec![i % 3, i % 2, i % 2]).collect();
        let data = Dataset::new(rows).unwrap();
        for strategy in [BuildStrategy::M1, BuildStrategy::M2] {
            let config = CrossValidationConfig::default()
                .with_folds(5)
                .with_min_support(0.05)
                .with_strategy(strategy)
                .with_seed(9);
            let result = CrossValidator::run(&data, &config).unwrap();
            assert_eq!(result.mean_error_rate, 0.0, "{strategy:?}");
        }
    }

    #[test]
    fn test_too_many_folds() {
        let data = sample();
        let config = CrossValidationConfig::default().with_folds(11);
        assert_eq!(
            CrossValidator::run(&data, &config).unwrap_err(),
            CbaError::InvalidFolds { folds: 11, rows: 10 }
        );
    }

    #[test]
    fn test_invalid_config() {
        let data = sample();
        let config = CrossValidationConfig::default().with_folds(1);
        assert!(matches!(
            CrossValidator::run(&data, &config),
            Err(CbaError::InvalidConfig(_))
        ));
    }
}
