//! Rule generation configuration.
//!
//! [`GeneratorConfig`] holds the support/confidence thresholds and the
//! resource bounds of the level-wise search.

/// Configuration for [`RuleGenerator`](super::RuleGenerator).
///
/// # Defaults
///
/// ```
/// use u_cba::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.max_candidates_per_level, 1000);
/// assert_eq!(config.max_rules, 2000);
/// assert_eq!(config.min_new_rules_per_level, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_cba::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::new(0.15, 0.6)
///     .with_max_rules(500)
///     .with_min_new_rules_per_level(0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Minimum support, in (0, 1].
    pub min_support: f64,

    /// Minimum confidence, in [0, 1].
    pub min_confidence: f64,

    /// Candidate generation for a level stops once this many distinct
    /// candidates have been produced.
    pub max_candidates_per_level: usize,

    /// The level-wise loop stops once more than this many rules have
    /// been admitted.
    pub max_rules: usize,

    /// The level-wise loop stops once a level adds fewer new rules than
    /// this. Set to 0 to disable.
    pub min_new_rules_per_level: usize,

    /// Compute candidate statistics with rayon.
    ///
    /// Only takes effect with the `parallel` cargo feature. Results are
    /// identical either way.
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_support: 0.01,
            min_confidence: 0.5,
            max_candidates_per_level: 1000,
            max_rules: 2000,
            min_new_rules_per_level: 10,
            parallel: false,
        }
    }
}

impl GeneratorConfig {
    /// Default bounds with the given thresholds.
    pub fn new(min_support: f64, min_confidence: f64) -> Self {
        Self {
            min_support,
            min_confidence,
            ..Self::default()
        }
    }

    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_max_candidates_per_level(mut self, n: usize) -> Self {
        self.max_candidates_per_level = n;
        self
    }

    pub fn with_max_rules(mut self, n: usize) -> Self {
        self.max_rules = n;
        self
    }

    /// Sets the stagnation bound (0 to disable).
    pub fn with_min_new_rules_per_level(mut self, n: usize) -> Self {
        self.min_new_rules_per_level = n;
        self
    }

    /// Enables or disables parallel statistics.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(format!(
                "min_support must be in (0, 1], got {}",
                self.min_support
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            ));
        }
        if self.max_candidates_per_level == 0 {
            return Err("max_candidates_per_level must be at least 1".into());
        }
        Ok(())
    }
}
