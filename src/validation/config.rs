//! Cross-validation configuration.

use crate::classifier::BuildStrategy;
use crate::generator::GeneratorConfig;

/// Configuration for [`CrossValidator`](super::CrossValidator).
///
/// Mining thresholds and bounds live in the embedded
/// [`GeneratorConfig`]; the support and confidence setters here are
/// shorthands for it.
///
/// # Examples
///
/// ```
/// use u_cba::classifier::BuildStrategy;
/// use u_cba::validation::CrossValidationConfig;
///
/// let config = CrossValidationConfig::default()
///     .with_folds(5)
///     .with_min_support(0.05)
///     .with_strategy(BuildStrategy::M2)
///     .with_prune(true)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.generator.min_support, 0.05);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossValidationConfig {
    /// Number of folds, at least 2.
    pub folds: usize,

    /// Rule mining thresholds and resource bounds.
    pub generator: GeneratorConfig,

    /// Classifier builder.
    pub strategy: BuildStrategy,

    /// Prune the mined rules before building.
    pub prune: bool,

    /// Random seed for the row shuffle.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            folds: 10,
            generator: GeneratorConfig::default(),
            strategy: BuildStrategy::M1,
            prune: false,
            seed: None,
        }
    }
}

impl CrossValidationConfig {
    pub fn with_folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }

    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.generator.min_support = min_support;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.generator.min_confidence = min_confidence;
        self
    }

    /// Replaces the whole generator configuration.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_strategy(mut self, strategy: BuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// The upper bound on `folds` depends on the dataset and is checked
    /// by the runner.
    pub fn validate(&self) -> Result<(), String> {
        if self.folds < 2 {
            return Err(format!("folds must be at least 2, got {}", self.folds));
        }
        self.generator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CrossValidationConfig::default();
        assert_eq!(config.folds, 10);
        assert_eq!(config.strategy, BuildStrategy::M1);
        assert!(!config.prune);
        assert!(config.seed.is_none());
        assert!((config.generator.min_support - 0.01).abs() < 1e-12);
        assert!((config.generator.min_confidence - 0.5).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = CrossValidationConfig::default()
            .with_generator(GeneratorConfig::default().with_max_rules(50))
            .with_min_confidence(0.7)
            .with_seed(7);
        assert_eq!(config.generator.max_rules, 50);
        assert!((config.generator.min_confidence - 0.7).abs() < 1e-12);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_folds() {
        assert!(CrossValidationConfig::default().with_folds(1).validate().is_err());
        assert!(CrossValidationConfig::default().with_folds(2).validate().is_ok());
    }

    #[test]
    fn test_validate_delegates_to_generator() {
        let config = CrossValidationConfig::default().with_min_support(0.0);
        assert!(config.validate().unwrap_err().contains("min_support"));
    }
}
