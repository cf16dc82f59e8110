//! k-fold cross-validation of the full pipeline.
//!
//! Each fold mines CARs on the training rows, optionally prunes them,
//! builds a classifier with the configured strategy and scores it on the
//! held-out rows.
//!
//! # Key Types
//!
//! - [`CrossValidationConfig`]: folds, thresholds, strategy and seed
//! - [`CrossValidator`]: executes the run
//! - [`CrossValidationResult`]: per-fold results and their means

mod config;
mod runner;

pub use config::CrossValidationConfig;
pub use runner::{CrossValidationResult, CrossValidator, FoldResult};
