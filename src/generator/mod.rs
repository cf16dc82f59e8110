//! Class association rule generation (CBA-RG).
//!
//! An Apriori-style, level-wise search over rule items. Each level joins
//! the frequent items of the previous one, recounts support against the
//! full dataset and admits the frequent, confident results into a
//! [`RuleStore`](crate::store::RuleStore).
//!
//! # Key Types
//!
//! - [`GeneratorConfig`]: thresholds and resource bounds
//! - [`RuleGenerator`]: executes the search
//! - [`GenerationResult`]: the store plus per-level statistics
//!
//! # References
//!
//! - Agrawal & Srikant (1994), "Fast Algorithms for Mining Association Rules"
//! - Liu, Hsu & Ma (1998), "Integrating Classification and Association Rule Mining"

mod config;
mod runner;

pub use config::GeneratorConfig;
pub use runner::{generate, GenerationResult, LevelStats, RuleGenerator, StopReason};
