// Copyright 2025 Cowboy AI, LLC.

//! Crate-wide error type.
//!
//! The inference core is a total function over a `DependencyGraph`: it
//! never fails on bad *graph* input, only on bad *configuration*. This is
//! the only error type in the crate, and the only fallible entry point is
//! [`crate::config::PipelineConfig::validate`].

use thiserror::Error;

/// Fatal configuration-setup errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The four inter-cluster evidence weights must sum to
    /// `1.0` within tolerance.
    #[error("evidence weights must sum to 1.0 (within {tolerance}), got {actual}")]
    WeightsDoNotSumToOne { actual: f64, tolerance: f64 },

    /// A threshold configured outside its valid `[0, 1]` range.
    #[error("threshold '{name}' must be in [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
}
